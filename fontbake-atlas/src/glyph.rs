/// Ink metrics for one symbol, as reported by the glyph source.
///
/// Offsets use a y-down convention relative to the pen origin on the
/// baseline: `bearing_y` is negative when the top of the ink box lies above
/// the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphMetrics {
    pub symbol: char,
    pub bearing_x: i32,
    pub bearing_y: i32,
    /// Ink box width in pixels
    pub width: u32,
    /// Ink box height in pixels
    pub height: u32,
    pub advance_x: u32,
    pub advance_y: i32,
}

impl GlyphMetrics {
    /// Metrics for a glyph with the given ink box and no bearing.
    pub fn new(symbol: char, width: u32, height: u32) -> Self {
        Self {
            symbol,
            bearing_x: 0,
            bearing_y: 0,
            width,
            height,
            advance_x: width,
            advance_y: 0,
        }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// A glyph with its position in the atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub metrics: GlyphMetrics,
    /// Left edge of the ink box in the canvas
    pub atlas_x: u32,
    /// Top edge of the ink box in the canvas
    pub atlas_y: u32,
    /// Normalized texture rectangle, each in `[0, 1]`
    pub tx: f32,
    pub ty: f32,
    pub tx2: f32,
    pub ty2: f32,
}

impl PlacedGlyph {
    pub(crate) fn new(metrics: GlyphMetrics, atlas_x: u32, atlas_y: u32, width: u32, height: u32) -> Self {
        let w = f64::from(width);
        let h = f64::from(height);
        Self {
            metrics,
            atlas_x,
            atlas_y,
            tx: (f64::from(atlas_x) / w) as f32,
            ty: (f64::from(atlas_y) / h) as f32,
            tx2: (f64::from(atlas_x + metrics.width) / w) as f32,
            ty2: (f64::from(atlas_y + metrics.height) / h) as f32,
        }
    }

    pub fn symbol(&self) -> char {
        self.metrics.symbol
    }

    /// Exclusive right edge in pixels
    pub fn right(&self) -> u32 {
        self.atlas_x + self.metrics.width
    }

    /// Exclusive bottom edge in pixels
    pub fn bottom(&self) -> u32 {
        self.atlas_y + self.metrics.height
    }

    /// Whether the pixel rectangles of two glyphs share any pixel.
    ///
    /// Zero-area glyphs cover no pixels and never intersect.
    pub fn intersects(&self, other: &PlacedGlyph) -> bool {
        if self.metrics.area() == 0 || other.metrics.area() == 0 {
            return false;
        }
        self.atlas_x < other.right()
            && other.atlas_x < self.right()
            && self.atlas_y < other.bottom()
            && other.atlas_y < self.bottom()
    }
}

/// Font-wide vertical metrics in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the line box
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line box
    pub descent: f32,
    /// Baseline-to-baseline distance
    pub line_height: f32,
}
