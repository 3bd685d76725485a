use thiserror::Error;

use crate::api::stromligning::FetchError;
use crate::config::ConfigError;
use crate::display::DisplayError;

/// Any failure that ends a run
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to fetch prices: {0}")]
    Fetch(#[from] FetchError),
    #[error("Display error: {0}")]
    Display(#[from] DisplayError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_fixture_message_points_at_refresh() {
        let err: AppError = FetchError::FixtureMissing {
            path: PathBuf::from("example-response.json"),
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("example-response.json not found"));
        assert!(msg.contains("--refresh-fixture"));
    }
}
