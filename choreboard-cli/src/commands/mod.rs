pub mod chore;
pub mod data;
pub mod family;
pub mod stats;
pub mod sync;
pub mod toggle;
pub mod week;

use anyhow::Result;
use chrono::NaiveDate;
use choreboard_core::board::Board;
use choreboard_core::board_config::BoardConfig;
use choreboard_core::person::Person;
use choreboard_core::store::JsonFileStore;
use choreboard_core::Chore;
use indicatif::{ProgressBar, ProgressStyle};

/// Open the board over the configured store file.
pub fn open_board() -> Result<(BoardConfig, Board<JsonFileStore>)> {
    let config = BoardConfig::load()?;
    let store = JsonFileStore::open(config.store_path())?;
    Ok((config, Board::open(store)))
}

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Parse YYYY-MM-DD, defaulting to today when absent.
pub fn parse_date_arg(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid date format '{}'. Expected YYYY-MM-DD", s)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Find a chore by id or exact title.
pub fn resolve_chore(chores: &[Chore], needle: &str) -> Result<Chore> {
    chores
        .iter()
        .find(|c| c.id == needle || c.title == needle)
        .cloned()
        .ok_or_else(|| {
            let available: Vec<_> = chores.iter().map(|c| c.title.as_str()).collect();
            anyhow::anyhow!(
                "Chore '{}' not found. Available: {}",
                needle,
                available.join(", ")
            )
        })
}

/// Find a person by id or name (case-insensitive).
pub fn resolve_person(family: &[Person], needle: &str) -> Result<Person> {
    family
        .iter()
        .find(|p| p.id == needle || p.name.eq_ignore_ascii_case(needle))
        .cloned()
        .ok_or_else(|| {
            let available: Vec<_> = family.iter().map(|p| p.name.as_str()).collect();
            anyhow::anyhow!(
                "Family member '{}' not found. Available: {}",
                needle,
                available.join(", ")
            )
        })
}
