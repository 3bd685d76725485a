//! Run configuration
//!
//! Built once in `main` from the environment (after `.env` is loaded) and the
//! command line, then passed by reference into every pipeline stage. Nothing
//! else in the crate reads environment variables.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::Parser;
use thiserror::Error;

use crate::api::stromligning::StromligningClient;

pub const DEFAULT_PRICE_AREA: &str = "DK1";
pub const DEFAULT_HOURS: u32 = 5;
/// Relative to the working directory the binary is started from
pub const DEFAULT_FIXTURE_PATH: &str = "example-response.json";
pub const DEFAULT_OUTPUT_PATH: &str = "output/prices.png";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Render upcoming hourly electricity prices for an e-ink panel
#[derive(Debug, Default, Parser)]
#[command(name = "elpris-ink")]
#[command(version)]
#[command(about = "Render upcoming hourly electricity prices for a three-color e-ink panel")]
pub struct Cli {
    /// Use the cached fixture instead of the API and write a PNG (same as DEV_MODE=1)
    #[arg(long)]
    pub dev: bool,

    /// Fetch the live response, save it as the development fixture and exit
    #[arg(long)]
    pub refresh_fixture: bool,

    /// Number of hours to show, starting with the current one
    #[arg(long)]
    pub hours: Option<u32>,

    /// Price area code (DK1 or DK2)
    #[arg(long)]
    pub price_area: Option<String>,

    /// Where the PNG fallback is written
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Cached API response used in development mode.
    /// Relative paths resolve against the working directory, so scheduled runs
    /// should pass an absolute path.
    #[arg(long, value_name = "PATH")]
    pub fixture: Option<PathBuf>,
}

/// Terms of the car lease used for the expected odometer readout
#[derive(Debug, Clone, PartialEq)]
pub struct LeaseTerms {
    pub start: NaiveDate,
    pub total_allowed: f64,
    pub duration_days: f64,
    pub unit: String,
}

impl Default for LeaseTerms {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 7, 18).unwrap_or_default(),
            total_allowed: 20000.0,
            duration_days: 365.0,
            unit: "km".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub dev_mode: bool,
    pub price_area: String,
    pub hours: u32,
    pub api_url: String,
    pub request_timeout: Duration,
    pub fixture_path: PathBuf,
    pub output_path: PathBuf,
    pub lease: LeaseTerms,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dev_mode: false,
            price_area: DEFAULT_PRICE_AREA.to_string(),
            hours: DEFAULT_HOURS,
            api_url: StromligningClient::DEFAULT_URL.to_string(),
            request_timeout: StromligningClient::DEFAULT_TIMEOUT,
            fixture_path: PathBuf::from(DEFAULT_FIXTURE_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            lease: LeaseTerms::default(),
        }
    }
}

impl Config {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Config::default();

        config.dev_mode = get("DEV_MODE").is_some();
        if let Some(area) = get("PRICE_AREA") {
            config.price_area = area.to_uppercase();
        }
        if let Some(hours) = get("PRICE_HOURS") {
            config.hours = parse_value("PRICE_HOURS", &hours)?;
        }
        if let Some(url) = get("PRICE_API_URL") {
            config.api_url = url;
        }
        if let Some(path) = get("FIXTURE_PATH") {
            config.fixture_path = PathBuf::from(path);
        }
        if let Some(path) = get("OUTPUT_PATH") {
            config.output_path = PathBuf::from(path);
        }
        if let Some(start) = get("LEASE_START") {
            config.lease.start = NaiveDate::parse_from_str(&start, "%Y-%m-%d").map_err(|e| {
                ConfigError::InvalidValue {
                    key: "LEASE_START",
                    value: start.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        if let Some(total) = get("LEASE_TOTAL_KM") {
            config.lease.total_allowed = parse_value("LEASE_TOTAL_KM", &total)?;
        }
        if let Some(days) = get("LEASE_DURATION_DAYS") {
            config.lease.duration_days = parse_value("LEASE_DURATION_DAYS", &days)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Command-line flags take precedence over the environment
    pub fn apply_cli(&mut self, cli: &Cli) -> Result<(), ConfigError> {
        if cli.dev {
            self.dev_mode = true;
        }
        if let Some(hours) = cli.hours {
            self.hours = hours;
        }
        if let Some(area) = &cli.price_area {
            self.price_area = area.trim().to_uppercase();
        }
        if let Some(path) = &cli.output {
            self.output_path = path.clone();
        }
        if let Some(path) = &cli.fixture {
            self.fixture_path = path.clone();
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.lease.duration_days > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "LEASE_DURATION_DAYS",
                value: self.lease.duration_days.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.price_area.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "PRICE_AREA",
                value: String::new(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
