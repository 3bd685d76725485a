use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of `GET /api/prices`
///
/// Only the fields the display needs are modelled; everything else in the
/// response is ignored. A body without a `prices` key decodes to an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceResponse {
    #[serde(default)]
    pub prices: Vec<RawPrice>,
}

/// One hourly entry as the API sends it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPrice {
    /// Local wall-clock start of the hour, e.g. `2025-10-04T00:00:00`
    pub local_date: NaiveDateTime,
    pub price: RawPriceDetail,
}

/// Nested price object of a [`RawPrice`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPriceDetail {
    pub total: f64,
    pub unit: String,
}

/// Errors raised while obtaining the raw price list
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network/transport failure, including the request timeout
    #[error("Request Error: {0}")]
    Request(#[from] reqwest::Error),
    /// The API answered with a non-2xx status
    #[error("HTTP Error ({status}): {body}")]
    Status { status: u16, body: String },
    /// The body was not the JSON shape we expect
    #[error("Deserialization Error: {0}")]
    Deserialization(#[from] serde_json::Error),
    /// Development mode is on but the cached response is absent
    #[error(
        "Development mode enabled but {} not found. Run `elpris-ink --refresh-fixture` to create it.",
        path.display()
    )]
    FixtureMissing { path: PathBuf },
    #[error("Failed to access {}: {source}", path.display())]
    FixtureIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
