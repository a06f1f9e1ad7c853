//! Terminal rendering for choreboard types.
//!
//! Colored output lives here so choreboard-core stays presentation-free;
//! the core only hands over `WeekSchedule` and stats structs.

use chrono::NaiveDate;
use owo_colors::OwoColorize;

use choreboard_core::agenda::{
    AgendaItem, CellStatus, ItemKind, PersonWeekStats, WeekSchedule,
};
use choreboard_core::chore::Chore;
use choreboard_core::person::Person;

fn render_status(status: CellStatus) -> String {
    match status {
        CellStatus::NoItems => "-".dimmed().to_string(),
        CellStatus::NotStarted => "not started".to_string(),
        CellStatus::InProgress => "in progress".yellow().to_string(),
        CellStatus::Completed => "done".green().to_string(),
    }
}

fn render_item(item: &AgendaItem) -> String {
    match item.kind {
        ItemKind::Chore => {
            if item.completed {
                format!("[{}] {}", "x".green(), item.name.strikethrough())
            } else {
                format!("[ ] {}", item.name)
            }
        }
        ItemKind::Event => {
            let time = item.time.as_deref().unwrap_or("");
            format!("{} {} {}", "*".cyan(), item.name, time.dimmed())
        }
    }
}

/// Render the full weekly grid, one block per family member.
pub fn render_week(schedule: &WeekSchedule) -> String {
    let mut lines = Vec::new();

    let week_end = schedule.days[schedule.days.len() - 1];
    lines.push(format!(
        "Week of {} - {}",
        schedule.week_start.format("%b %-d"),
        week_end.format("%b %-d")
    ));

    for row in &schedule.rows {
        lines.push(String::new());
        lines.push(row.person.name.bold().to_string());

        for cell in &row.cells {
            let heading = format!(
                "  {} {}",
                cell.date.format("%a"),
                cell.date.format("%-m/%-d")
            );

            if cell.items.is_empty() {
                lines.push(format!("{}  {}", heading.dimmed(), render_status(cell.status)));
                continue;
            }

            lines.push(format!(
                "{}  ({}) {}",
                heading,
                cell.total(),
                render_status(cell.status)
            ));
            for item in &cell.items {
                lines.push(format!("      {}", render_item(item)));
            }
        }
    }

    lines.join("\n")
}

/// One-line chore summary for list views.
pub fn render_chore_line(chore: &Chore, family: &[Person]) -> String {
    let assignee = chore
        .assigned_to
        .as_deref()
        .and_then(|id| family.iter().find(|p| p.id == id))
        .map(|p| p.name.as_str())
        .unwrap_or("unassigned");

    let mut line = format!(
        "  {} {} {}",
        chore.title,
        format!("({})", chore.schedule.kind_label()).dimmed(),
        format!("-> {}", assignee).cyan()
    );
    if chore.points > 0 {
        line.push_str(&format!(" {}", format!("{}pt", chore.points).yellow()));
    }
    line.push_str(&format!("  {}", chore.id.dimmed()));
    line
}

pub fn render_person_line(person: &Person) -> String {
    format!(
        "  {} {}  {}",
        person.name,
        person.color.dimmed(),
        person.id.dimmed()
    )
}

/// Stats table: per-person chore/event counts and completion rates, plus
/// schedule-kind totals.
pub fn render_stats_table(
    week_start: NaiveDate,
    per_person: &[PersonWeekStats],
    schedule_kinds: &[(&'static str, usize)],
) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Week of {}", week_start.format("%b %-d")));
    lines.push(String::new());

    for stats in per_person {
        let rate = (stats.completion_rate * 100.0).round() as u32;
        let rate_str = format!("{}%", rate);
        let colored_rate = if stats.chores == 0 {
            "-".dimmed().to_string()
        } else if stats.completed == stats.chores {
            rate_str.green().to_string()
        } else if stats.completed > 0 {
            rate_str.yellow().to_string()
        } else {
            rate_str.to_string()
        };

        lines.push(format!(
            "  {}: {}/{} chores {}  {} events",
            stats.name.bold(),
            stats.completed,
            stats.chores,
            colored_rate,
            stats.events
        ));
    }

    lines.push(String::new());
    let kinds = schedule_kinds
        .iter()
        .map(|(label, count)| format!("{} {}", count, label))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("  Chores by schedule: {}", kinds));

    lines.join("\n")
}
