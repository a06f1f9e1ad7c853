use anyhow::Result;
use chrono::Weekday;
use clap::Subcommand;
use owo_colors::OwoColorize;

use choreboard_core::chore::{Chore, Priority, RecurrencePolicy, Schedule};

use super::{open_board, parse_date_arg, resolve_chore, resolve_person};
use crate::render::render_chore_line;

#[derive(Subcommand)]
pub enum ChoreAction {
    /// Add a chore
    Add {
        title: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Assign to a family member (id or name)
        #[arg(short, long)]
        assign: Option<String>,

        #[arg(long)]
        points: Option<u32>,

        /// high, medium or low
        #[arg(long)]
        priority: Option<String>,

        /// Repeat every day
        #[arg(long)]
        daily: bool,

        /// Repeat on these weekdays (comma-separated, e.g. mon,thu)
        #[arg(long, value_delimiter = ',')]
        weekly: Option<Vec<String>>,

        /// Repeat on this day of the month (1-31)
        #[arg(long)]
        monthly_day: Option<u8>,

        /// One-time due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },
    /// List all chores
    List,
    /// Reassign a chore to another family member (or nobody)
    Assign {
        /// Chore id or exact title
        chore: String,

        /// Person id or name; omit to unassign
        person: Option<String>,
    },
    /// Delete a chore and its completion history
    Remove {
        /// Chore id or exact title
        chore: String,
    },
}

pub fn run(action: ChoreAction) -> Result<()> {
    match action {
        ChoreAction::Add {
            title,
            description,
            assign,
            points,
            priority,
            daily,
            weekly,
            monthly_day,
            due,
        } => {
            let schedule = resolve_schedule(daily, weekly.as_deref(), monthly_day, due.as_deref())?;

            let (_, mut board) = open_board()?;
            let mut chore = Chore::new(title, schedule)?;
            if let Some(description) = description {
                chore.description = description;
            }
            if let Some(points) = points {
                chore.points = points;
            }
            if let Some(priority) = priority {
                chore.priority = priority.parse::<Priority>()?;
            }
            if let Some(needle) = assign {
                let person = resolve_person(&board.family()?, &needle)?;
                chore.assigned_to = Some(person.id);
            }

            let title = chore.title.clone();
            board.add_chore(chore)?;
            println!("{}", format!("  Added: {}", title).green());
            Ok(())
        }
        ChoreAction::List => {
            let (_, board) = open_board()?;
            let chores = board.chores()?;
            let family = board.family()?;

            if chores.is_empty() {
                println!("{}", "  No chores yet. Add one with: choreboard chore add".dimmed());
                return Ok(());
            }

            for chore in &chores {
                println!("{}", render_chore_line(chore, &family));
            }
            Ok(())
        }
        ChoreAction::Assign { chore, person } => {
            let (_, mut board) = open_board()?;
            let mut target = resolve_chore(&board.chores()?, &chore)?;

            let label = match person {
                Some(needle) => {
                    let person = resolve_person(&board.family()?, &needle)?;
                    target.assigned_to = Some(person.id);
                    person.name
                }
                None => {
                    target.assigned_to = None;
                    "nobody".to_string()
                }
            };

            let title = target.title.clone();
            board.update_chore(target)?;
            println!("{}", format!("  {} -> {}", title, label).green());
            Ok(())
        }
        ChoreAction::Remove { chore } => {
            let (_, mut board) = open_board()?;
            let target = resolve_chore(&board.chores()?, &chore)?;

            board.remove_chore(&target.id)?;
            println!("{}", format!("  Removed: {}", target.title).green());
            Ok(())
        }
    }
}

/// Build a schedule from the CLI flags. Recurrence flags win over --due
/// when both are given.
fn resolve_schedule(
    daily: bool,
    weekly: Option<&[String]>,
    monthly_day: Option<u8>,
    due: Option<&str>,
) -> Result<Schedule> {
    if daily {
        return Ok(Schedule::Recurring(RecurrencePolicy::Daily));
    }
    if let Some(days) = weekly {
        let days = parse_weekdays(days)?;
        return Ok(Schedule::Recurring(RecurrencePolicy::weekly(days)));
    }
    if let Some(day) = monthly_day {
        return Ok(Schedule::Recurring(RecurrencePolicy::MonthlyOnDay(day)));
    }
    if let Some(due) = due {
        return Ok(Schedule::Once(parse_date_arg(Some(due))?));
    }
    anyhow::bail!("Specify a schedule: --daily, --weekly <days>, --monthly-day <n> or --due <date>")
}

fn parse_weekdays(names: &[String]) -> Result<Vec<Weekday>> {
    names
        .iter()
        .map(|name| match name.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(Weekday::Sun),
            "monday" | "mon" => Ok(Weekday::Mon),
            "tuesday" | "tue" => Ok(Weekday::Tue),
            "wednesday" | "wed" => Ok(Weekday::Wed),
            "thursday" | "thu" => Ok(Weekday::Thu),
            "friday" | "fri" => Ok(Weekday::Fri),
            "saturday" | "sat" => Ok(Weekday::Sat),
            other => Err(anyhow::anyhow!("Unknown weekday '{}'", other)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_short_and_long_weekday_names() {
        let days = parse_weekdays(&strings(&["mon", "Thursday"])).unwrap();
        assert_eq!(days, vec![Weekday::Mon, Weekday::Thu]);
    }

    #[test]
    fn rejects_unknown_weekdays() {
        assert!(parse_weekdays(&strings(&["funday"])).is_err());
    }

    #[test]
    fn recurrence_wins_over_due_date() {
        let schedule =
            resolve_schedule(true, None, None, Some("2024-01-10")).unwrap();
        assert_eq!(schedule, Schedule::Recurring(RecurrencePolicy::Daily));

        let schedule = resolve_schedule(
            false,
            Some(&strings(&["mon"])),
            None,
            Some("2024-01-10"),
        )
        .unwrap();
        assert!(matches!(schedule, Schedule::Recurring(_)));
    }

    #[test]
    fn due_date_without_recurrence_is_once() {
        let schedule = resolve_schedule(false, None, None, Some("2024-01-10")).unwrap();
        assert!(matches!(schedule, Schedule::Once(_)));
    }

    #[test]
    fn missing_schedule_is_an_error() {
        assert!(resolve_schedule(false, None, None, None).is_err());
    }
}
