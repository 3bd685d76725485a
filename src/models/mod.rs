//! Data models shared by the pipeline stages

pub mod display;
pub mod price;

pub use display::DisplayConfig;
pub use price::PriceEntry;
