pub mod bitmap;
pub mod errors;

pub use bitmap::{Bitmap, InkColor, Palette};
pub use errors::AppError;
