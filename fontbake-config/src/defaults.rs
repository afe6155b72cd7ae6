//! Default values for style settings.

use std::path::PathBuf;

/// Point to pixel conversion applied to `size` before rasterizing.
pub const POINTS_TO_PIXELS: f32 = 1.333;

/// Suffix appended to the atlas path to name its placement descriptor.
pub const DESCRIPTOR_SUFFIX: &str = ".fontdef.xml";

pub fn font_family() -> String {
    "DejaVu Sans".to_string()
}

pub fn size() -> f32 {
    8.0 // points
}

pub fn symbols() -> String {
    crate::symbols::DEFAULT_SYMBOLS.to_string()
}

pub fn output() -> PathBuf {
    PathBuf::from("outfont.png")
}
