//! Painting a packed layout into an RGBA atlas.

use fontbake_atlas::{AtlasLayout, GlyphMetrics};
use image::RgbaImage;

use crate::{FontError, GlyphSource};

/// Measure every symbol, in order.
pub fn measure_glyphs<S: GlyphSource + ?Sized>(
    source: &mut S,
    symbols: &[char],
) -> Result<Vec<GlyphMetrics>, FontError> {
    symbols
        .iter()
        .map(|&symbol| source.glyph_metrics(symbol))
        .collect()
}

/// Render a layout onto a transparent canvas of the layout's size.
///
/// Each glyph's ink box lands at its atlas position: the pen origin passed
/// to the source is `(atlas_x - bearing_x, atlas_y - bearing_y)`.
pub fn paint_atlas<S: GlyphSource + ?Sized>(
    source: &mut S,
    layout: &AtlasLayout,
) -> Result<RgbaImage, FontError> {
    let mut canvas = RgbaImage::new(layout.width, layout.height);
    let mut painted = 0usize;
    for placed in &layout.glyphs {
        let m = &placed.metrics;
        if m.width == 0 || m.height == 0 {
            continue;
        }
        let pen_x = placed.atlas_x as i32 - m.bearing_x;
        let pen_y = placed.atlas_y as i32 - m.bearing_y;
        source.paint_glyph(m.symbol, &mut canvas, pen_x, pen_y)?;
        painted += 1;
    }
    log::debug!(
        "Painted {} of {} glyphs into {}x{} atlas",
        painted,
        layout.glyphs.len(),
        layout.width,
        layout.height
    );
    Ok(canvas)
}
