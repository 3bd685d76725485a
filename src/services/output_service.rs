use std::path::Path;

use tracing::{debug, info};

use crate::display::{DisplayError, InkDisplay, PngFile};
use crate::services::render_service::BACKGROUND;
use crate::utils::Bitmap;

/// Push a finished bitmap to the panel, or to `fallback_path` as PNG when no
/// panel is attached.
pub fn emit(image: &Bitmap, display: Option<&mut dyn InkDisplay>, fallback_path: &Path) -> Result<(), DisplayError> {
    match display {
        Some(display) => push(image, display),
        None => {
            info!("No display attached, writing {}", fallback_path.display());
            let mut file = PngFile::with_resolution(fallback_path, image.width(), image.height());
            push(image, &mut file)
        }
    }
}

fn push(image: &Bitmap, display: &mut dyn InkDisplay) -> Result<(), DisplayError> {
    match display.set_border(BACKGROUND) {
        Ok(()) => {}
        Err(DisplayError::Unsupported(call)) => debug!("{} not supported, skipping", call),
        Err(e) => return Err(e),
    }
    display.set_image(image)?;
    display.show()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::InkColor;

    #[derive(Default)]
    struct RecordingDisplay {
        calls: Vec<&'static str>,
        border_supported: bool,
        image: Option<Bitmap>,
    }

    impl InkDisplay for RecordingDisplay {
        fn width(&self) -> u32 {
            4
        }

        fn height(&self) -> u32 {
            2
        }

        fn set_border(&mut self, _color: InkColor) -> Result<(), DisplayError> {
            self.calls.push("set_border");
            if self.border_supported {
                Ok(())
            } else {
                Err(DisplayError::Unsupported("set_border"))
            }
        }

        fn set_image(&mut self, image: &Bitmap) -> Result<(), DisplayError> {
            self.calls.push("set_image");
            self.image = Some(image.clone());
            Ok(())
        }

        fn show(&mut self) -> Result<(), DisplayError> {
            self.calls.push("show");
            Ok(())
        }
    }

    #[test]
    fn test_hardware_calls_in_order() {
        let mut display = RecordingDisplay {
            border_supported: true,
            ..Default::default()
        };
        let image = Bitmap::new(4, 2, InkColor::White);

        emit(&image, Some(&mut display), Path::new("unused.png")).unwrap();
        assert_eq!(display.calls, vec!["set_border", "set_image", "show"]);
        assert_eq!(display.image, Some(image));
    }

    #[test]
    fn test_unsupported_border_is_tolerated() {
        let mut display = RecordingDisplay::default();
        let image = Bitmap::new(4, 2, InkColor::White);

        emit(&image, Some(&mut display), Path::new("unused.png")).unwrap();
        assert_eq!(display.calls, vec!["set_border", "set_image", "show"]);
    }

    #[test]
    fn test_falls_back_to_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.png");
        let image = Bitmap::new(250, 122, InkColor::White);

        emit(&image, None, &path).unwrap();
        assert!(path.exists());
    }
}
