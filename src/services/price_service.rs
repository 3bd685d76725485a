use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDateTime, Timelike};
use tracing::{debug, info};

use crate::api::stromligning::{FetchError, PriceResponse, StromligningClient};
use crate::config::Config;
use crate::models::PriceEntry;

/// Obtain the raw price list for this run.
///
/// Development mode reads the cached fixture and never touches the network;
/// otherwise exactly one request is made against the price API.
pub async fn fetch_prices(config: &Config) -> Result<PriceResponse, FetchError> {
    if config.dev_mode {
        info!("🧪 Development mode: reading {}", config.fixture_path.display());
        return read_fixture(&config.fixture_path);
    }

    let client = StromligningClient::with_base_url(config.api_url.clone(), config.request_timeout)?;
    let response = client.fetch_prices(&config.price_area).await?;
    info!("Fetched {} hourly prices for {}", response.prices.len(), config.price_area);
    Ok(response)
}

/// Read a cached API response from disk
pub fn read_fixture(path: &Path) -> Result<PriceResponse, FetchError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(FetchError::FixtureMissing {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(FetchError::FixtureIo {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    Ok(serde_json::from_str(&content)?)
}

/// Fetch the live response and store it verbatim as the development fixture
pub async fn refresh_fixture(config: &Config) -> Result<PathBuf, FetchError> {
    let client = StromligningClient::with_base_url(config.api_url.clone(), config.request_timeout)?;
    let raw = client.fetch_raw(&config.price_area).await?;

    let path = config.fixture_path.clone();
    let io_err = |source| FetchError::FixtureIo {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let pretty = serde_json::to_string_pretty(&raw)?;
    std::fs::write(&path, pretty).map_err(io_err)?;

    info!("Saved price fixture to {}", path.display());
    Ok(path)
}

/// Flatten the API response into display entries, keeping API order
pub fn hourly_prices(response: PriceResponse) -> Vec<PriceEntry> {
    response.prices.into_iter().map(PriceEntry::from).collect()
}

/// `now` rounded down to the start of its hour
pub fn current_hour(now: NaiveDateTime) -> NaiveDateTime {
    now.date().and_hms_opt(now.hour(), 0, 0).unwrap_or(now)
}

/// Keep the entries that fall in `[current_hour, current_hour + hours)`.
///
/// Input order is preserved and nothing is padded: if the source does not
/// cover the whole window the result is simply shorter.
pub fn select_window(entries: &[PriceEntry], hours: u32, now: NaiveDateTime) -> Vec<PriceEntry> {
    let start = current_hour(now);
    // a window past the calendar's end is open-ended
    let end = Duration::try_hours(i64::from(hours))
        .and_then(|span| start.checked_add_signed(span))
        .unwrap_or(NaiveDateTime::MAX);

    let window: Vec<PriceEntry> = entries
        .iter()
        .filter(|e| start <= e.local_timestamp && e.local_timestamp < end)
        .cloned()
        .collect();

    debug!("Selected {} of {} entries in [{}, {})", window.len(), entries.len(), start, end);
    window
}
