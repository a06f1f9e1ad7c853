//! Calendar feed fetching with proxy fallback.
//!
//! Feeds are fetched directly first, then through each configured relay
//! proxy in order, stopping at the first success. Callers decide what a
//! total failure means; the fetcher never touches cached state.

use anyhow::{anyhow, Result};
use tracing::{debug, warn};

pub async fn fetch_feed(url: &str, proxies: &[String]) -> Result<String> {
    let client = reqwest::Client::new();

    match try_fetch(&client, url).await {
        Ok(content) => return Ok(content),
        Err(e) => warn!(%e, "direct fetch failed, falling back to proxies"),
    }

    let mut last_error = anyhow!("Could not fetch calendar data");
    for proxy in proxies {
        let proxied = proxied_url(proxy, url);
        match try_fetch(&client, &proxied).await {
            Ok(content) => {
                debug!(proxy, "fetched feed via proxy");
                return Ok(content);
            }
            Err(e) => {
                warn!(proxy, %e, "proxy fetch failed");
                last_error = e;
            }
        }
    }

    Err(last_error)
}

async fn try_fetch(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP error! status: {}", response.status());
    }

    let body = response.text().await?;
    if !body.contains("BEGIN:VCALENDAR") {
        anyhow::bail!("Invalid iCalendar data received");
    }

    Ok(body)
}

/// Append the percent-encoded target URL to a proxy prefix.
fn proxied_url(proxy: &str, url: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
    format!("{}{}", proxy, encoded)
}
