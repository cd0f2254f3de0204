//! Fetch record metadata from the Zenodo records API.
//!
//! This is outside the retrying core: a failure here is fatal to the run,
//! not something the pass loop works around.

use anyhow::{Context, Result};
use std::time::Duration;

use super::parse::Record;

const API_BASE: &str = "https://zenodo.org/api/records";

/// API URL for a record ID.
pub fn record_url(record_id: &str) -> String {
    format!("{}/{}", API_BASE, record_id)
}

/// Fetch and parse the record with the given ID.
pub fn fetch_record(record_id: &str) -> Result<Record> {
    fetch_record_at(&record_url(record_id))
}

/// Fetch and parse a record from an explicit URL (tests point this at a
/// local server).
pub fn fetch_record_at(url: &str) -> Result<Record> {
    tracing::info!("fetching record metadata: {}", url);
    let body = http_get(url)?;
    let record: Record = serde_json::from_slice(&body)
        .with_context(|| format!("parse record JSON from {}", url))?;
    Ok(record)
}

fn http_get(url: &str) -> Result<Vec<u8>> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(15))?;
    easy.timeout(Duration::from_secs(30))?;

    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform().context("metadata request failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }
    Ok(body)
}
