use anyhow::Result;
use owo_colors::OwoColorize;

use super::{open_board, parse_date_arg, resolve_chore, resolve_person};

pub fn run(chore: &str, person: Option<&str>, date: Option<&str>) -> Result<()> {
    let (_, mut board) = open_board()?;
    let target = resolve_chore(&board.chores()?, chore)?;
    let date = parse_date_arg(date)?;

    // Explicit --person wins; otherwise fall back to the chore's assignee.
    let person_id = match person {
        Some(needle) => Some(resolve_person(&board.family()?, needle)?.id),
        None => target.assigned_to.clone(),
    };

    let state = board.toggle_completion(&target.id, person_id.as_deref(), date)?;

    match state {
        Some(true) => println!(
            "{}",
            format!("  Done: {} on {}", target.title, date).green()
        ),
        Some(false) => println!(
            "{}",
            format!("  Undone: {} on {}", target.title, date).yellow()
        ),
        // resolve_chore already guaranteed the id exists; treat a miss as a
        // quiet no-op all the same.
        None => println!("{}", "  Nothing to toggle".dimmed()),
    }

    Ok(())
}
