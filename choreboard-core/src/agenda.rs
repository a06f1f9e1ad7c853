//! Weekly agenda aggregation.
//!
//! Merges two independently-sourced streams — locally stored chores with
//! recurrence rules, and normalized external calendar events — into one
//! per-person, per-day schedule for a week, with completion state overlaid
//! from the ledger and a deterministic ordering within each cell.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::chore::{Chore, Priority, Schedule};
use crate::event::NormalizedEvent;
use crate::ledger::CompletionLedger;
use crate::person::Person;

/// Label shown for all-day events instead of a start time.
pub const ALL_DAY_LABEL: &str = "All day";

/// One entry in a person/day cell, either a chore occurrence or a calendar
/// event. Derived on every build, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaItem {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    pub completed: bool,
    pub priority: Priority,
    /// Formatted start time for events ("3:30 PM" or "All day"); None for
    /// chores.
    pub time: Option<String>,
    pub source: ItemSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Chore,
    Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSource {
    Chores,
    Calendar,
}

/// Completion status of one person/day cell. Only chore items count toward
/// the ratio; events are informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    NoItems,
    NotStarted,
    InProgress,
    Completed,
}

/// One person/day cell: ordered items plus summary figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub items: Vec<AgendaItem>,
    pub status: CellStatus,
}

impl DayCell {
    pub fn total(&self) -> usize {
        self.items.len()
    }
}

/// One roster row: a person and their seven cells, aligned with
/// `WeekSchedule::days`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonWeek {
    pub person: Person,
    pub cells: Vec<DayCell>,
}

/// A full week of agenda cells for every person on the roster.
///
/// Every person appears even with an all-empty week; consumers rely on
/// stable roster membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSchedule {
    pub week_start: NaiveDate,
    pub days: Vec<NaiveDate>,
    pub rows: Vec<PersonWeek>,
}

impl WeekSchedule {
    /// Items for one person/day cell, if the person is on the roster.
    pub fn items_for(&self, person_id: &str, date: NaiveDate) -> Option<&[AgendaItem]> {
        let row = self.rows.iter().find(|r| r.person.id == person_id)?;
        let cell = row.cells.iter().find(|c| c.date == date)?;
        Some(&cell.items)
    }

    /// Per-person aggregate figures for chart/table consumers.
    pub fn stats(&self) -> Vec<PersonWeekStats> {
        self.rows
            .iter()
            .map(|row| {
                let mut chores = 0usize;
                let mut completed = 0usize;
                let mut events = 0usize;
                for cell in &row.cells {
                    for item in &cell.items {
                        match item.kind {
                            ItemKind::Chore => {
                                chores += 1;
                                if item.completed {
                                    completed += 1;
                                }
                            }
                            ItemKind::Event => events += 1,
                        }
                    }
                }
                PersonWeekStats {
                    person_id: row.person.id.clone(),
                    name: row.person.name.clone(),
                    chores,
                    completed,
                    events,
                    completion_rate: if chores == 0 {
                        0.0
                    } else {
                        completed as f64 / chores as f64
                    },
                }
            })
            .collect()
    }
}

/// Aggregate weekly figures for one person (the presentation adapter's
/// input contract).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonWeekStats {
    pub person_id: String,
    pub name: String,
    pub chores: usize,
    pub completed: usize,
    pub events: usize,
    pub completion_rate: f64,
}

/// Count chores by schedule kind (daily/weekly/monthly/once), another
/// chart input.
pub fn schedule_kind_counts(chores: &[Chore]) -> Vec<(&'static str, usize)> {
    let mut counts = vec![("daily", 0), ("weekly", 0), ("monthly", 0), ("once", 0)];
    for chore in chores {
        let label = chore.schedule.kind_label();
        if let Some(entry) = counts.iter_mut().find(|(l, _)| *l == label) {
            entry.1 += 1;
        }
    }
    counts
}

/// Normalize a date to the start of its week for the given start-of-week
/// day (same day if it already is one).
pub fn week_start_of(date: NaiveDate, start_day: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_sunday()
        - start_day.num_days_from_sunday())
        % 7;
    date - Duration::days(i64::from(offset))
}

/// Build a week schedule with the default Sunday week start.
pub fn build_week(
    week_start: NaiveDate,
    people: &[Person],
    chores: &[Chore],
    events: &[NormalizedEvent],
    ledger: &CompletionLedger,
) -> WeekSchedule {
    build_week_with_start(week_start, Weekday::Sun, people, chores, events, ledger)
}

/// Build a week schedule starting on a configurable weekday.
///
/// `week_start` is normalized to the start of its week first, so any date
/// within the target week can be passed.
pub fn build_week_with_start(
    week_start: NaiveDate,
    start_day: Weekday,
    people: &[Person],
    chores: &[Chore],
    events: &[NormalizedEvent],
    ledger: &CompletionLedger,
) -> WeekSchedule {
    let week_start = week_start_of(week_start, start_day);
    let days: Vec<NaiveDate> = (0..7)
        .map(|i| week_start + Duration::days(i))
        .collect();

    let rows = people
        .iter()
        .map(|person| PersonWeek {
            person: person.clone(),
            cells: days
                .iter()
                .map(|&date| build_cell(person, date, chores, events, ledger))
                .collect(),
        })
        .collect();

    WeekSchedule {
        week_start,
        days,
        rows,
    }
}

fn build_cell(
    person: &Person,
    date: NaiveDate,
    chores: &[Chore],
    events: &[NormalizedEvent],
    ledger: &CompletionLedger,
) -> DayCell {
    let mut items: Vec<AgendaItem> = Vec::new();

    for chore in chores {
        if chore.assigned_to.as_deref() != Some(person.id.as_str()) {
            continue;
        }
        if !chore.is_active_on(date) {
            continue;
        }

        // Recurring occurrences get a per-date id; one-time chores keep
        // their own.
        let id = match chore.schedule {
            Schedule::Recurring(_) => format!("{}-{}", chore.id, date),
            Schedule::Once(_) => chore.id.clone(),
        };

        items.push(AgendaItem {
            id,
            name: chore.title.clone(),
            kind: ItemKind::Chore,
            completed: ledger.is_completed_on(&chore.id, Some(&person.id), date),
            priority: chore.priority,
            time: None,
            source: ItemSource::Chores,
        });
    }

    for event in events {
        if event.start.date_naive() != date {
            continue;
        }
        let Some(assignee) = &event.assignee else {
            continue;
        };
        if !assignee.eq_ignore_ascii_case(&person.name) {
            continue;
        }

        items.push(AgendaItem {
            id: event.id.clone(),
            name: event.title.clone(),
            kind: ItemKind::Event,
            completed: false,
            priority: Priority::Medium,
            time: Some(format_event_time(event)),
            source: ItemSource::Calendar,
        });
    }

    sort_cell(&mut items);
    let status = cell_status(&items);

    DayCell {
        date,
        items,
        status,
    }
}

fn format_event_time(event: &NormalizedEvent) -> String {
    if event.all_day {
        ALL_DAY_LABEL.to_string()
    } else {
        event.start.format("%-I:%M %p").to_string()
    }
}

/// Cell ordering: completed last, then priority, then time (chores carry
/// no time and sort before events in the same band; events compare on the
/// formatted string), then name.
fn sort_cell(items: &mut [AgendaItem]) {
    items.sort_by(|a, b| {
        a.completed
            .cmp(&b.completed)
            .then_with(|| a.priority.rank().cmp(&b.priority.rank()))
            .then_with(|| a.time.cmp(&b.time))
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn cell_status(items: &[AgendaItem]) -> CellStatus {
    if items.is_empty() {
        return CellStatus::NoItems;
    }

    let chores = items.iter().filter(|i| i.kind == ItemKind::Chore);
    let total = chores.clone().count();
    let completed = chores.filter(|i| i.completed).count();

    if completed == 0 {
        CellStatus::NotStarted
    } else if completed < total {
        CellStatus::InProgress
    } else {
        CellStatus::Completed
    }
}
