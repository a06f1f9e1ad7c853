use anyhow::Result;

use choreboard_core::agenda::build_week_with_start;

use super::{open_board, parse_date_arg};
use crate::render::render_week;

pub fn run(date: Option<&str>) -> Result<()> {
    let (config, board) = open_board()?;
    let date = parse_date_arg(date)?;

    let family = board.family()?;
    if family.is_empty() {
        anyhow::bail!(
            "No family members yet.\n\n\
            Add one with:\n  \
            choreboard family add <name>\n\n\
            Or seed the example roster:\n  \
            choreboard family seed-defaults"
        );
    }

    let chores = board.chores()?;
    let events = board.cached_events()?;
    let ledger = board.ledger()?;

    let schedule = build_week_with_start(
        date,
        config.week_start_day(),
        &family,
        &chores,
        &events,
        &ledger,
    );

    println!("{}", render_week(&schedule));
    Ok(())
}
