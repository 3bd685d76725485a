use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_8X13};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use tracing::debug;

use crate::models::{DisplayConfig, PriceEntry};
use crate::utils::{Bitmap, InkColor};

/// Prices above `mean * HIGH_PRICE_FACTOR` are drawn in the highlight ink
pub const HIGH_PRICE_FACTOR: f64 = 1.1;

pub const BACKGROUND: InkColor = InkColor::White;
pub const TEXT_COLOR: InkColor = InkColor::Black;
pub const HIGH_COLOR: InkColor = InkColor::Amber;

const LEFT_MARGIN: i32 = 6;
const TOP_MARGIN: i32 = 8;
const BOTTOM_MARGIN: i32 = 8;
const LINE_SPACING: f32 = 4.0;

/// Values computed outside the price window that the panel also shows
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub expected_odometer: i64,
    pub unit: String,
}

/// Text placement on the portrait canvas
#[derive(Clone, Copy)]
pub struct Layout {
    pub font: &'static MonoFont<'static>,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub left: i32,
    pub top: i32,
    pub line_height: i32,
    /// y of the bottom edge of the odometer line
    pub bottom: i32,
}

impl Layout {
    pub fn for_display(display: &DisplayConfig) -> Self {
        let font = font_for_scale(display.scale);
        // portrait: the panel's height runs across, its width runs down
        let canvas_width = display.height;
        let canvas_height = display.width;
        let margin = |base: i32| (base + display.padding).max(0);

        Self {
            font,
            canvas_width,
            canvas_height,
            left: LEFT_MARGIN,
            top: margin(TOP_MARGIN),
            line_height: font.character_size.height as i32 + (LINE_SPACING * display.scale).round() as i32,
            bottom: canvas_height as i32 - margin(BOTTOM_MARGIN),
        }
    }
}

fn font_for_scale(scale: f32) -> &'static MonoFont<'static> {
    if scale < 1.2 {
        &FONT_6X10
    } else if scale < 2.0 {
        &FONT_8X13
    } else {
        &FONT_10X20
    }
}

/// `mean * 1.1`, or `None` for an empty window
pub fn high_threshold(entries: &[PriceEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let mean = entries.iter().map(|e| e.total_price).sum::<f64>() / entries.len() as f64;
    Some(mean * HIGH_PRICE_FACTOR)
}

pub fn line_color(price: f64, threshold: Option<f64>) -> InkColor {
    match threshold {
        Some(limit) if price > limit => HIGH_COLOR,
        _ => TEXT_COLOR,
    }
}

/// `"HH:MM P.PP"`
pub fn format_line(entry: &PriceEntry) -> String {
    format!("{} {:.2}", entry.local_timestamp.format("%H:%M"), entry.total_price)
}

pub fn format_readout(readout: &Readout) -> String {
    format!("Odo: {} {}", readout.expected_odometer, readout.unit)
}

fn draw_text(canvas: &mut Bitmap, text: &str, origin: Point, color: InkColor, font: &MonoFont<'_>, baseline: Baseline) {
    let style = MonoTextStyle::new(font, color);
    if let Err(never) = Text::with_baseline(text, origin, style, baseline).draw(canvas) {
        match never {}
    }
}

/// Draw the price window and readout, returning a landscape bitmap of
/// `display.width × display.height`.
///
/// Text that overflows the canvas is cut off at the edge.
pub fn render(entries: &[PriceEntry], display: &DisplayConfig, readout: &Readout) -> Bitmap {
    let layout = Layout::for_display(display);
    let mut canvas = Bitmap::new(layout.canvas_width, layout.canvas_height, BACKGROUND);

    let threshold = high_threshold(entries);
    debug!("High price threshold: {:?}", threshold);

    let mut y = layout.top;
    for entry in entries {
        let color = line_color(entry.total_price, threshold);
        draw_text(
            &mut canvas,
            &format_line(entry),
            Point::new(layout.left, y),
            color,
            layout.font,
            Baseline::Top,
        );
        y += layout.line_height;
    }

    draw_text(
        &mut canvas,
        &format_readout(readout),
        Point::new(layout.left, layout.bottom),
        TEXT_COLOR,
        layout.font,
        Baseline::Bottom,
    );

    canvas.rotate_90()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(hour: u32, price: f64) -> PriceEntry {
        PriceEntry {
            local_timestamp: NaiveDate::from_ymd_opt(2025, 10, 4)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            total_price: price,
            unit: "kr/kWh".to_string(),
        }
    }

    fn readout() -> Readout {
        Readout {
            expected_odometer: 4931,
            unit: "km".to_string(),
        }
    }

    /// Vertical band `[start, end)` occupied by the price line at `index`
    fn line_band(layout: &Layout, index: usize) -> (i32, i32) {
        let start = layout.top + index as i32 * layout.line_height;
        (start, start + layout.font.character_size.height as i32)
    }

    /// Columns holding at least one highlight pixel
    fn amber_columns(bitmap: &Bitmap) -> Vec<u32> {
        let mut columns = Vec::new();
        for y in 0..bitmap.height() {
            for x in 0..bitmap.width() {
                if bitmap.get_pixel(x, y) == Some(HIGH_COLOR.index()) {
                    columns.push(x);
                }
            }
        }
        columns
    }

    #[test]
    fn test_threshold_example() {
        let entries = vec![entry(12, 2.0), entry(13, 1.0), entry(14, 3.0)];
        let threshold = high_threshold(&entries).unwrap();
        assert!((threshold - 2.2).abs() < 1e-9);

        let colors: Vec<InkColor> = entries
            .iter()
            .map(|e| line_color(e.total_price, Some(threshold)))
            .collect();
        assert_eq!(colors, vec![TEXT_COLOR, TEXT_COLOR, HIGH_COLOR]);
    }

    #[test]
    fn test_equal_to_threshold_is_not_high() {
        assert_eq!(line_color(2.2, Some(2.2)), TEXT_COLOR);
        assert_eq!(line_color(5.0, None), TEXT_COLOR);
        assert_eq!(high_threshold(&[]), None);
    }

    #[test]
    fn test_line_formatting() {
        assert_eq!(format_line(&entry(9, 1.8734)), "09:00 1.87");
        assert_eq!(format_line(&entry(23, 0.456)), "23:00 0.46");
        assert_eq!(format_readout(&readout()), "Odo: 4931 km");
    }

    #[test]
    fn test_render_outputs_landscape_at_display_size() {
        let display = DisplayConfig::default();
        let bitmap = render(&[entry(12, 1.0)], &display, &readout());

        assert_eq!((bitmap.width(), bitmap.height()), (250, 122));
        assert!(bitmap.count(TEXT_COLOR) > 0);
        assert!(bitmap.count(BACKGROUND) > bitmap.count(TEXT_COLOR));
    }

    #[test]
    fn test_only_high_line_is_amber() {
        let display = DisplayConfig::default();
        let layout = Layout::for_display(&display);
        let entries = vec![entry(12, 2.0), entry(13, 1.0), entry(14, 3.0)];

        let bitmap = render(&entries, &display, &readout());
        let columns = amber_columns(&bitmap);
        assert!(!columns.is_empty());

        // a counter-clockwise turn maps portrait row y to landscape column y
        let (start, end) = line_band(&layout, 2);
        assert!(columns.iter().all(|&x| (x as i32) >= start && (x as i32) < end));
    }

    #[test]
    fn test_flat_prices_have_no_highlight() {
        let display = DisplayConfig::for_resolution((400, 300));
        let entries: Vec<PriceEntry> = (0..5).map(|h| entry(h, 1.5)).collect();

        let bitmap = render(&entries, &display, &readout());
        assert_eq!((bitmap.width(), bitmap.height()), (400, 300));
        assert_eq!(bitmap.count(HIGH_COLOR), 0);
    }

    #[test]
    fn test_empty_window_still_draws_readout() {
        let display = DisplayConfig::default();
        let bitmap = render(&[], &display, &readout());
        assert!(bitmap.count(TEXT_COLOR) > 0);
        assert_eq!(bitmap.count(HIGH_COLOR), 0);
    }

    #[test]
    fn test_font_grows_with_scale() {
        let small = Layout::for_display(&DisplayConfig::for_resolution((212, 104)));
        let phat = Layout::for_display(&DisplayConfig::default());
        let large = Layout::for_display(&DisplayConfig::for_resolution((600, 448)));

        assert!(small.line_height < phat.line_height);
        assert!(phat.line_height < large.line_height);
        assert_eq!(phat.top, 3);
        assert_eq!(large.top, 38);
    }
}
