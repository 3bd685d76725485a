pub mod client;
pub mod models;

pub use client::StromligningClient;
pub use models::{FetchError, PriceResponse, RawPrice};
