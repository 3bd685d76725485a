//! Indexed-color canvas for three-color e-ink panels
//!
//! Every pixel is one byte holding a palette index. The canvas implements
//! `embedded_graphics::DrawTarget`, so text and primitives can be drawn on it
//! directly.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::PixelColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};

/// Number of bytes in a full 256-entry RGB palette table
pub const PALETTE_TABLE_LEN: usize = 768;

/// The three inks a black/white/amber panel can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InkColor {
    Black,
    White,
    Amber,
}

impl InkColor {
    /// Palette index stored in the bitmap
    pub const fn index(self) -> u8 {
        match self {
            InkColor::Black => 0,
            InkColor::White => 1,
            InkColor::Amber => 2,
        }
    }
}

impl PixelColor for InkColor {
    type Raw = ();
}

/// Fixed RGB palette shared by every run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette;

impl Palette {
    pub const ENTRIES: [[u8; 3]; 3] = [
        [0, 0, 0],       // black
        [255, 255, 255], // white
        [255, 191, 0],   // amber
    ];

    /// Palette as a flat RGB table zero-padded to 256 entries
    pub fn table() -> [u8; PALETTE_TABLE_LEN] {
        let mut table = [0u8; PALETTE_TABLE_LEN];
        for (i, rgb) in Self::ENTRIES.iter().enumerate() {
            table[i * 3..i * 3 + 3].copy_from_slice(rgb);
        }
        table
    }
}

/// Row-major indexed bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Allocate a canvas filled with `background`
    pub fn new(width: u32, height: u32, background: InkColor) -> Self {
        Self {
            width,
            height,
            pixels: vec![background.index(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Palette index at `(x, y)`, or `None` outside the canvas
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        self.offset(x, y).map(|i| self.pixels[i])
    }

    /// Set a pixel; writes outside the canvas are dropped
    pub fn put_pixel(&mut self, x: u32, y: u32, color: InkColor) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = color.index();
        }
    }

    #[cfg(test)]
    pub fn count(&self, color: InkColor) -> usize {
        self.pixels.iter().filter(|&&p| p == color.index()).count()
    }

    /// Rotate 90° counter-clockwise.
    ///
    /// The result is `height × width`; pixel `(x, y)` moves to
    /// `(y, width - 1 - x)`. A quarter turn covers the whole new canvas, so
    /// no border needs filling.
    pub fn rotate_90(&self) -> Bitmap {
        let mut rotated = Bitmap {
            width: self.height,
            height: self.width,
            pixels: vec![0; self.pixels.len()],
        };

        for y in 0..self.height {
            for x in 0..self.width {
                let src = y as usize * self.width as usize + x as usize;
                let dst_x = y as usize;
                let dst_y = (self.width - 1 - x) as usize;
                rotated.pixels[dst_y * rotated.width as usize + dst_x] = self.pixels[src];
            }
        }

        rotated
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Bitmap {
    type Color = InkColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.put_pixel(point.x as u32, point.y as u32, color);
            }
        }
        Ok(())
    }
}
