//! Feed-neutral event types.
//!
//! `RawFeedEvent` is the shape the fetch boundary hands over: property
//! values straight out of the feed, dates still unparsed. `NormalizedEvent`
//! is the canonical shape the aggregator consumes, derived on every sync —
//! cached copies are a performance optimization, never a source of truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw event as produced by the calendar fetch boundary.
///
/// `start`/`end` hold the unparsed source values (iCalendar date or
/// date-time strings); `all_day` reflects whether the source start value
/// carried a time-of-day component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFeedEvent {
    pub uid: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub all_day: bool,
    pub categories: Vec<String>,
}

/// A calendar entry converted to canonical shape, with inferred assignee
/// and category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub all_day: bool,
    pub location: String,
    pub description: String,
    /// Family member name the event belongs to, or None for shared/parental
    /// events.
    pub assignee: Option<String>,
    pub category: Category,
}

/// Event category inferred from free text.
///
/// Variant order is the inference priority order: when multiple keyword
/// sets match, the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    School,
    Sports,
    Appointments,
    Celebrations,
    Travel,
    Other,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::School => "School",
            Category::Sports => "Sports",
            Category::Appointments => "Appointments",
            Category::Celebrations => "Celebrations",
            Category::Travel => "Travel",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
