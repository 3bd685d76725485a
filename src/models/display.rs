//! Display geometry models

/// Layout parameters for one run, derived from the panel resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub scale: f32,
    pub padding: i32,
}

impl DisplayConfig {
    /// Resolution assumed when no panel is attached
    pub const FILE_RESOLUTION: (u32, u32) = (250, 122);

    /// Scale and padding for the known Inky panel sizes
    pub fn for_resolution(resolution: (u32, u32)) -> Self {
        let (scale, padding) = match resolution {
            (400, 300) => (2.20, 15),
            (600, 448) => (2.20, 30),
            (250, 122) => (1.30, -5),
            _ => (1.0, 0),
        };
        Self {
            width: resolution.0,
            height: resolution.1,
            scale,
            padding,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::for_resolution(Self::FILE_RESOLUTION)
    }
}
