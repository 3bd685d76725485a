use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::{debug, info};

use super::{check_size, DisplayError, InkDisplay};
use crate::utils::{Bitmap, Palette};

/// Display stand-in that writes each refresh to a PNG file
pub struct PngFile {
    path: PathBuf,
    width: u32,
    height: u32,
    staged: Option<Bitmap>,
}

impl PngFile {
    pub fn with_resolution(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
            staged: None,
        }
    }
}

impl InkDisplay for PngFile {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_image(&mut self, image: &Bitmap) -> Result<(), DisplayError> {
        check_size(self, image)?;
        self.staged = Some(image.clone());
        Ok(())
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        let image = self.staged.as_ref().ok_or(DisplayError::NoImage)?;
        save_png(image, &self.path)?;
        info!("💾 Wrote {}x{} image to {}", image.width(), image.height(), self.path.display());
        println!("Saved image to {}", self.path.display());
        Ok(())
    }
}

/// Encode an indexed bitmap as an RGB PNG, creating parent directories
pub fn save_png(image: &Bitmap, path: &Path) -> Result<(), DisplayError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let encode_err = |message: String| DisplayError::Encode {
        path: path.to_path_buf(),
        message,
    };

    {
        let backend = BitMapBackend::new(path, (image.width(), image.height()));
        let root = backend.into_drawing_area();
        let palette = Palette::table();

        for y in 0..image.height() {
            for x in 0..image.width() {
                let i = image.get_pixel(x, y).unwrap_or_default() as usize * 3;
                let color = RGBColor(palette[i], palette[i + 1], palette[i + 2]);
                root.draw_pixel((x as i32, y as i32), &color)
                    .map_err(|e| encode_err(format!("Failed to draw pixel: {}", e)))?;
            }
        }

        root.present()
            .map_err(|e| encode_err(format!("Failed to render image: {}", e)))?;
    }

    debug!("PNG encoded at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::InkColor;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_show_writes_png_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output").join("prices.png");

        let mut display = PngFile::with_resolution(&path, 250, 122);
        let mut image = Bitmap::new(250, 122, InkColor::White);
        image.put_pixel(10, 10, InkColor::Amber);

        display.set_image(&image).unwrap();
        display.show().unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_border_is_unsupported() {
        let mut display = PngFile::with_resolution("unused.png", 250, 122);
        let err = display.set_border(InkColor::White).unwrap_err();
        assert!(matches!(err, DisplayError::Unsupported("set_border")));
    }

    #[test]
    fn test_rejects_wrong_size_and_missing_image() {
        let mut display = PngFile::with_resolution("unused.png", 400, 300);
        assert_eq!(display.resolution(), (400, 300));
        assert!(matches!(display.show(), Err(DisplayError::NoImage)));

        let image = Bitmap::new(250, 122, InkColor::White);
        let err = display.set_image(&image).unwrap_err();
        assert!(matches!(err, DisplayError::SizeMismatch { want_w: 400, .. }));
    }
}
