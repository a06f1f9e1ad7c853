//! iCalendar feed parsing.

mod parse;

pub use parse::{is_date_only, parse_feed, parse_feed_datetime};
