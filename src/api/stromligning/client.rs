use std::time::Duration;

use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::models::{FetchError, PriceResponse};

/// Strømligning price API client
pub struct StromligningClient {
    http_client: HttpClient,
    base_url: String,
}

impl StromligningClient {
    pub const DEFAULT_URL: &'static str = "https://stromligning.dk/api/prices";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a client against `base_url` (the public endpoint unless overridden)
    pub fn with_base_url(base_url: String, timeout: Duration) -> Result<Self, FetchError> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// GET /api/prices?priceArea={area}&aggregation=1h
    ///
    /// Returns the body as untyped JSON so it can be cached verbatim.
    /// No retry: transport failures and non-2xx answers are returned as-is.
    pub async fn fetch_raw(&self, price_area: &str) -> Result<serde_json::Value, FetchError> {
        debug!("GET {} (priceArea={})", self.base_url, price_area);

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("priceArea", price_area), ("aggregation", "1h")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Price API returned {}: {}", status, body);
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch and decode the hourly price list
    pub async fn fetch_prices(&self, price_area: &str) -> Result<PriceResponse, FetchError> {
        let raw = self.fetch_raw(price_area).await?;
        Ok(serde_json::from_value(raw)?)
    }
}
