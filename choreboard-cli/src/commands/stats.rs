use anyhow::Result;
use chrono::Local;
use serde::Serialize;

use choreboard_core::agenda::{build_week_with_start, schedule_kind_counts, PersonWeekStats};

use super::open_board;
use crate::render::render_stats_table;

#[derive(Serialize)]
struct StatsOutput {
    week_start: chrono::NaiveDate,
    per_person: Vec<PersonWeekStats>,
    schedule_kinds: Vec<(String, usize)>,
}

pub fn run(json: bool) -> Result<()> {
    let (config, board) = open_board()?;

    let family = board.family()?;
    let chores = board.chores()?;
    let events = board.cached_events()?;
    let ledger = board.ledger()?;

    let schedule = build_week_with_start(
        Local::now().date_naive(),
        config.week_start_day(),
        &family,
        &chores,
        &events,
        &ledger,
    );

    let per_person = schedule.stats();
    let schedule_kinds = schedule_kind_counts(&chores);

    if json {
        let output = StatsOutput {
            week_start: schedule.week_start,
            per_person,
            schedule_kinds: schedule_kinds
                .into_iter()
                .map(|(label, count)| (label.to_string(), count))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", render_stats_table(schedule.week_start, &per_person, &schedule_kinds));
    }

    Ok(())
}
