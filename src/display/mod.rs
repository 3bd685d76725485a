//! Output devices
//!
//! [`InkDisplay`] is the whole surface the pipeline needs from a panel. A
//! hardware driver implements it by pushing the bitmap over its bus; the
//! [`PngFile`] implementation writes the bitmap to disk instead.

pub mod png_file;

pub use png_file::PngFile;

use std::path::PathBuf;

use thiserror::Error;

use crate::utils::{Bitmap, InkColor};

#[derive(Debug, Error)]
pub enum DisplayError {
    /// The device does not implement this optional call
    #[error("{0} is not supported by this display")]
    Unsupported(&'static str),
    #[error("Image is {got_w}x{got_h} but the display is {want_w}x{want_h}")]
    SizeMismatch {
        got_w: u32,
        got_h: u32,
        want_w: u32,
        want_h: u32,
    },
    #[error("show() called before set_image()")]
    NoImage,
    #[error("Failed to encode {}: {message}", path.display())]
    Encode { path: PathBuf, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Minimal capability interface of a three-color panel
pub trait InkDisplay {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn resolution(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Not every panel can drive its border; callers must tolerate
    /// [`DisplayError::Unsupported`].
    fn set_border(&mut self, _color: InkColor) -> Result<(), DisplayError> {
        Err(DisplayError::Unsupported("set_border"))
    }

    /// Stage an image for the next refresh
    fn set_image(&mut self, image: &Bitmap) -> Result<(), DisplayError>;

    /// Refresh the panel with the staged image
    fn show(&mut self) -> Result<(), DisplayError>;
}

/// Reject images that do not match the panel resolution
pub(crate) fn check_size(display: &dyn InkDisplay, image: &Bitmap) -> Result<(), DisplayError> {
    let (want_w, want_h) = display.resolution();
    if (image.width(), image.height()) != (want_w, want_h) {
        return Err(DisplayError::SizeMismatch {
            got_w: image.width(),
            got_h: image.height(),
            want_w,
            want_h,
        });
    }
    Ok(())
}
