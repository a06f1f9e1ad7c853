use anyhow::Result;
use clap::Subcommand;
use owo_colors::OwoColorize;

use choreboard_core::person::Person;

use super::{open_board, resolve_person};
use crate::render::render_person_line;

/// Roster seeded by `family seed-defaults` on a fresh board.
const DEFAULT_FAMILY: &[(&str, &str)] = &[
    ("Ember", "#ff9999"),
    ("Lilly", "#ffcc99"),
    ("Levi", "#99ccff"),
    ("Eva", "#cc99ff"),
    ("Elijah", "#99ff99"),
    ("Kallie", "#ff99cc"),
];

#[derive(Subcommand)]
pub enum FamilyAction {
    /// Add a family member
    Add {
        name: String,

        /// Display color as #rrggbb
        #[arg(short, long, default_value = "#cccccc")]
        color: String,
    },
    /// List family members
    List,
    /// Remove a family member; their chores are kept but unassigned
    Remove {
        /// Person id or name
        person: String,
    },
    /// Seed the example roster onto an empty board
    SeedDefaults,
}

pub fn run(action: FamilyAction) -> Result<()> {
    match action {
        FamilyAction::Add { name, color } => {
            let (_, mut board) = open_board()?;
            let person = Person::new(name, color)?;
            let name = person.name.clone();
            board.add_person(person)?;
            println!("{}", format!("  Added: {}", name).green());
            Ok(())
        }
        FamilyAction::List => {
            let (_, board) = open_board()?;
            let family = board.family()?;

            if family.is_empty() {
                println!(
                    "{}",
                    "  No family members yet. Add one with: choreboard family add".dimmed()
                );
                return Ok(());
            }

            for person in &family {
                println!("{}", render_person_line(person));
            }
            Ok(())
        }
        FamilyAction::Remove { person } => {
            let (_, mut board) = open_board()?;
            let target = resolve_person(&board.family()?, &person)?;

            board.remove_person(&target.id)?;
            println!(
                "{}",
                format!("  Removed: {} (their chores are now unassigned)", target.name).green()
            );
            Ok(())
        }
        FamilyAction::SeedDefaults => {
            let (_, mut board) = open_board()?;
            if !board.family()?.is_empty() {
                anyhow::bail!("The roster is not empty; refusing to seed defaults");
            }

            for (name, color) in DEFAULT_FAMILY {
                board.add_person(Person::new(*name, *color)?)?;
            }
            println!(
                "{}",
                format!("  Seeded {} family members", DEFAULT_FAMILY.len()).green()
            );
            Ok(())
        }
    }
}
