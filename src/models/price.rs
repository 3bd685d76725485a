//! Price window models

use chrono::NaiveDateTime;

use crate::api::stromligning::RawPrice;

/// One hour's price, as shown on the panel
#[derive(Debug, Clone, PartialEq)]
pub struct PriceEntry {
    /// Start of the hour in local wall-clock time
    pub local_timestamp: NaiveDateTime,
    pub total_price: f64,
    pub unit: String,
}

impl From<RawPrice> for PriceEntry {
    fn from(raw: RawPrice) -> Self {
        Self {
            local_timestamp: raw.local_date,
            total_price: raw.price.total,
            unit: raw.price.unit,
        }
    }
}
