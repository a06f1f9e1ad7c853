use anyhow::{Context, Result};
use chrono::Utc;
use owo_colors::OwoColorize;

use choreboard_core::ics;
use choreboard_core::normalize::Normalizer;

use super::{create_spinner, open_board};
use crate::fetch::fetch_feed;

pub async fn run(check: bool, url_override: Option<String>) -> Result<()> {
    let (config, mut board) = open_board()?;

    let url = url_override
        .or_else(|| config.feed_url.clone())
        .context(
            "No feed URL configured.\n\n\
            Set one in ~/.config/choreboard/config.toml:\n  \
            feed_url = \"https://...\"\n\n\
            Or pass one directly:\n  \
            choreboard sync --url <feed-url>",
        )?;

    // Stamp the attempt before any I/O so a slower superseded attempt can
    // never overwrite a newer one's result. Check mode never commits, so
    // it doesn't take a ticket.
    let ticket = if check { 0 } else { board.begin_sync()? };

    let spinner = create_spinner("Fetching calendar feed...".to_string());
    let fetched = fetch_feed(&url, &config.proxies).await;
    spinner.finish_and_clear();

    let content = match fetched {
        Ok(content) => content,
        Err(e) => {
            // A failed refresh keeps the last good cache in place.
            println!("{}", format!("  Sync failed: {}", e).red());
            println!("{}", "  Keeping previously synced events".dimmed());
            return Ok(());
        }
    };

    let raw_events = ics::parse_feed(&content)?;
    let normalizer = Normalizer::new(&board.family()?);
    let events = normalizer.normalize_batch(&raw_events, Utc::now());
    let dropped = raw_events.len() - events.len();

    if check {
        println!(
            "{}",
            format!("  Connection OK: {} events in the feed", events.len()).green()
        );
        if dropped > 0 {
            println!("{}", format!("  ({} malformed events skipped)", dropped).yellow());
        }
        return Ok(());
    }

    if board.commit_sync(ticket, &events, Utc::now())? {
        println!("{}", format!("  Synced {} events", events.len()).green());
        if dropped > 0 {
            println!("{}", format!("  ({} malformed events skipped)", dropped).yellow());
        }
    } else {
        println!("{}", "  A newer sync finished first; discarding this one".dimmed());
    }

    Ok(())
}
