use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use choreboard_core::store::KeyValueStore;

use super::open_board;

pub fn export(out: Option<&Path>) -> Result<()> {
    let (_, board) = open_board()?;
    let snapshot = board.store().export_data()?;
    let content = serde_json::to_string_pretty(&snapshot)?;

    match out {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", format!("  Exported to {}", path.display()).green());
        }
        None => println!("{}", content),
    }

    Ok(())
}

pub fn import(file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let snapshot: serde_json::Value =
        serde_json::from_str(&content).context("Import file is not valid JSON")?;

    let (_, mut board) = open_board()?;
    board.store_mut().import_data(snapshot)?;

    println!(
        "{}",
        format!("  Imported {} (all previous data replaced)", file.display()).green()
    );
    Ok(())
}
