//! Shared integration test helpers for fontbake.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` attribute suppresses warnings when a test file
//! uses only some of the helpers.

#![allow(dead_code)]

use std::collections::HashMap;

use fontbake::GeneratedAtlas;
use fontbake_atlas::{FontMetrics, GlyphMetrics};
use fontbake_fonts::{FontError, GlyphSource, blit_coverage};
use image::RgbaImage;
use tempfile::TempDir;

/// A glyph source with fixed box-shaped glyphs, so tests run without any
/// installed fonts.
///
/// Every glyph sits on the baseline (`bearing_y = -height`); unknown
/// symbols get a 4x6 box, space gets an empty box.
pub struct FakeGlyphSource {
    pub boxes: HashMap<char, (u32, u32)>,
    pub metrics: FontMetrics,
}

impl FakeGlyphSource {
    pub fn new() -> Self {
        Self {
            boxes: HashMap::new(),
            metrics: FontMetrics {
                ascent: 10.0,
                descent: 3.0,
                line_height: 14.0,
            },
        }
    }

    pub fn with_box(mut self, symbol: char, width: u32, height: u32) -> Self {
        self.boxes.insert(symbol, (width, height));
        self
    }

    fn size_of(&self, symbol: char) -> (u32, u32) {
        match self.boxes.get(&symbol) {
            Some(&size) => size,
            None if symbol == ' ' => (0, 0),
            None => (4, 6),
        }
    }
}

impl GlyphSource for FakeGlyphSource {
    fn font_metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn glyph_metrics(&mut self, symbol: char) -> Result<GlyphMetrics, FontError> {
        let (width, height) = self.size_of(symbol);
        let mut m = GlyphMetrics::new(symbol, width, height);
        m.bearing_y = -(height as i32);
        m.advance_x = width + 1;
        Ok(m)
    }

    fn paint_glyph(
        &mut self,
        symbol: char,
        canvas: &mut RgbaImage,
        pen_x: i32,
        pen_y: i32,
    ) -> Result<(), FontError> {
        let (width, height) = self.size_of(symbol);
        let coverage = vec![255; (width * height) as usize];
        blit_coverage(canvas, pen_x, pen_y - height as i32, width, height, &coverage);
        Ok(())
    }
}

/// Generate an atlas for `symbols` with the default fake source.
pub fn fake_atlas(symbols: &str) -> GeneratedAtlas {
    let chars: Vec<char> = symbols.chars().collect();
    fontbake::generate_with(&mut FakeGlyphSource::new(), &chars).expect("generate fake atlas")
}

/// A fresh temporary directory; keep it alive for the whole test.
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}
