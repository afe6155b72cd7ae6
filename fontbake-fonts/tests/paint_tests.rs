//! Atlas painting against a synthetic glyph source, plus face loading
//! failures that need no installed fonts.

use std::collections::HashMap;

use fontbake_atlas::{FontMetrics, GlyphMetrics, pack};
use fontbake_fonts::{FontError, FontFace, GlyphSource, blit_coverage, measure_glyphs, paint_atlas};
use image::RgbaImage;

/// Solid boxes with per-symbol alpha, bearings chosen to sit on a baseline.
struct BoxSource {
    boxes: HashMap<char, GlyphMetrics>,
    painted: Vec<(char, i32, i32)>,
}

impl BoxSource {
    fn new(specs: &[(char, u32, u32, i32)]) -> Self {
        let boxes = specs
            .iter()
            .map(|&(symbol, width, height, bearing_x)| {
                let mut m = GlyphMetrics::new(symbol, width, height);
                m.bearing_x = bearing_x;
                m.bearing_y = -(height as i32);
                m.advance_x = width + 1;
                (symbol, m)
            })
            .collect();
        Self {
            boxes,
            painted: Vec::new(),
        }
    }

    fn alpha(symbol: char) -> u8 {
        (symbol as u32 % 200) as u8 + 50
    }
}

impl GlyphSource for BoxSource {
    fn font_metrics(&self) -> FontMetrics {
        FontMetrics {
            ascent: 10.0,
            descent: 3.0,
            line_height: 13.0,
        }
    }

    fn glyph_metrics(&mut self, symbol: char) -> Result<GlyphMetrics, FontError> {
        Ok(self.boxes[&symbol])
    }

    fn paint_glyph(
        &mut self,
        symbol: char,
        canvas: &mut RgbaImage,
        pen_x: i32,
        pen_y: i32,
    ) -> Result<(), FontError> {
        let m = self.boxes[&symbol];
        self.painted.push((symbol, pen_x, pen_y));
        let coverage = vec![Self::alpha(symbol); (m.width * m.height) as usize];
        blit_coverage(
            canvas,
            pen_x + m.bearing_x,
            pen_y + m.bearing_y,
            m.width,
            m.height,
            &coverage,
        );
        Ok(())
    }
}

#[test]
fn test_paint_places_ink_at_atlas_positions() {
    let mut source = BoxSource::new(&[('A', 8, 10, 1), ('g', 6, 7, -1), ('.', 2, 2, 0)]);
    let metrics = measure_glyphs(&mut source, &['A', 'g', '.']).unwrap();
    let layout = pack(&metrics).unwrap();
    let canvas = paint_atlas(&mut source, &layout).unwrap();

    assert_eq!(canvas.dimensions(), (layout.width, layout.height));
    for placed in &layout.glyphs {
        let alpha = BoxSource::alpha(placed.symbol());
        for dy in 0..placed.metrics.height {
            for dx in 0..placed.metrics.width {
                let px = canvas.get_pixel(placed.atlas_x + dx, placed.atlas_y + dy);
                assert_eq!(px.0, [255, 255, 255, alpha], "{:?} at +{dx},+{dy}", placed.symbol());
            }
        }
    }

    let inked: u32 = layout
        .glyphs
        .iter()
        .map(|g| g.metrics.width * g.metrics.height)
        .sum();
    let opaque = canvas.pixels().filter(|p| p.0[3] != 0).count() as u32;
    assert_eq!(opaque, inked, "nothing painted outside the ink boxes");
}

#[test]
fn test_pen_origin_accounts_for_bearings() {
    let mut source = BoxSource::new(&[('j', 4, 9, -2)]);
    let metrics = measure_glyphs(&mut source, &['j']).unwrap();
    let layout = pack(&metrics).unwrap();
    paint_atlas(&mut source, &layout).unwrap();

    let placed = &layout.glyphs[0];
    assert_eq!(
        source.painted,
        vec![('j', placed.atlas_x as i32 + 2, placed.atlas_y as i32 + 9)]
    );
}

#[test]
fn test_empty_glyphs_are_not_painted() {
    let mut source = BoxSource::new(&[(' ', 0, 0, 0), ('A', 3, 3, 0)]);
    let metrics = measure_glyphs(&mut source, &[' ', 'A']).unwrap();
    let layout = pack(&metrics).unwrap();
    paint_atlas(&mut source, &layout).unwrap();
    assert_eq!(source.painted.len(), 1);
    assert_eq!(source.painted[0].0, 'A');
}

#[test]
fn test_empty_layout_paints_one_transparent_pixel() {
    let mut source = BoxSource::new(&[]);
    let layout = pack(&[]).unwrap();
    let canvas = paint_atlas(&mut source, &layout).unwrap();
    assert_eq!(canvas.dimensions(), (1, 1));
    assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0, 0]);
}

#[test]
fn test_missing_font_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = FontFace::load_file(&dir.path().join("absent.ttf")).unwrap_err();
    assert!(matches!(err, FontError::FontFile { .. }));
}

#[test]
fn test_font_file_with_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.ttf");
    std::fs::write(&path, b"definitely not an sfnt").unwrap();
    let err = FontFace::load_file(&path).unwrap_err();
    assert!(matches!(err, FontError::InvalidFontData { .. }));
}
