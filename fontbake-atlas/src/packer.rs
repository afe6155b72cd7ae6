//! Shelf packing with a bounded power-of-two sizing search.

use crate::{GlyphMetrics, PackError, PlacedGlyph};

/// Empty pixels kept between neighbouring glyphs and between shelves.
pub const GLYPH_PADDING: u32 = 1;

/// Canvas dimensions plus every glyph's placement.
///
/// `glyphs` is in placement order (tallest first), which is also the order
/// the descriptor lists them in.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasLayout {
    pub width: u32,
    pub height: u32,
    pub glyphs: Vec<PlacedGlyph>,
}

impl AtlasLayout {
    /// Whether every glyph's ink box lies inside the canvas.
    pub fn is_contained(&self) -> bool {
        self.glyphs
            .iter()
            .all(|g| g.right() <= self.width && g.bottom() <= self.height)
    }

    /// Whether any two glyphs share a pixel.
    pub fn has_overlap(&self) -> bool {
        self.glyphs
            .iter()
            .enumerate()
            .any(|(i, a)| self.glyphs[i + 1..].iter().any(|b| a.intersects(b)))
    }
}

/// Left-to-right shelf cursor over a fixed canvas.
///
/// Positions are tracked in `u64` so wide glyphs near `u32::MAX` cannot
/// wrap the cursor around.
struct ShelfCursor {
    width: u64,
    height: u64,
    next_x: u64,
    next_y: u64,
    row_height: u64,
}

impl ShelfCursor {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width: u64::from(width),
            height: u64::from(height),
            next_x: 0,
            next_y: 0,
            row_height: 0,
        }
    }

    /// Reserve space for a `width` x `height` box, or `None` if the canvas is full.
    fn place(&mut self, width: u32, height: u32) -> Option<(u32, u32)> {
        let (width, height) = (u64::from(width), u64::from(height));
        // Wrapping would not help a glyph wider than the whole canvas.
        if width > self.width {
            return None;
        }
        let padding = u64::from(GLYPH_PADDING);
        if self.next_x + width > self.width {
            self.next_x = 0;
            self.next_y += self.row_height + padding;
            self.row_height = 0;
        }
        self.row_height = self.row_height.max(height);
        if self.next_y + self.row_height > self.height {
            return None;
        }
        let position = (self.next_x, self.next_y);
        self.next_x += width + padding;
        // Both coordinates are bounded by the u32 canvas at this point.
        Some((position.0 as u32, position.1 as u32))
    }
}

/// Whether `glyphs`, in the given order, can be shelf-packed into a
/// `width` x `height` canvas.
pub fn fits(glyphs: &[GlyphMetrics], width: u32, height: u32) -> bool {
    let mut cursor = ShelfCursor::new(width, height);
    glyphs
        .iter()
        .all(|g| cursor.place(g.width, g.height).is_some())
}

/// Smallest power of two not below the square root of the total glyph area.
///
/// Never less than 1, so a set of zero-area glyphs still gets a canvas.
pub fn initial_size(glyphs: &[GlyphMetrics]) -> Result<u32, PackError> {
    let total_area: u64 = glyphs.iter().map(GlyphMetrics::area).sum();
    let root = total_area.isqrt();
    let root = if root * root < total_area { root + 1 } else { root };
    u32::try_from(root.max(1).next_power_of_two()).map_err(|_| PackError::Oversized {
        glyph_count: glyphs.len(),
    })
}

/// Choose the canvas size for glyphs already in placement order.
///
/// The initial square either shrinks greedily while the glyphs still fit,
/// or grows once in width and then once in height. No canvas larger than
/// twice the initial square on either axis is ever considered.
pub fn canvas_size(glyphs: &[GlyphMetrics]) -> Result<(u32, u32), PackError> {
    let size = initial_size(glyphs)?;
    log::debug!("Initial atlas estimate {}x{} for {} glyphs", size, size, glyphs.len());

    if fits(glyphs, size, size) {
        return Ok(shrink(glyphs, size, size));
    }

    let oversized = || PackError::Oversized {
        glyph_count: glyphs.len(),
    };
    let width = size.checked_mul(2).ok_or_else(oversized)?;
    log::debug!("Atlas does not fit at {}x{}, widening to {}x{}", size, size, width, size);
    if fits(glyphs, width, size) {
        return Ok((width, size));
    }

    let height = size.checked_mul(2).ok_or_else(oversized)?;
    log::debug!("Atlas does not fit at {}x{}, growing to {}x{}", width, size, width, height);
    if fits(glyphs, width, height) {
        return Ok((width, height));
    }

    Err(PackError::SizingFailure {
        width,
        height,
        glyph_count: glyphs.len(),
    })
}

/// Halve width, then height, alternating, until the next halving stops fitting.
fn shrink(glyphs: &[GlyphMetrics], mut width: u32, mut height: u32) -> (u32, u32) {
    let mut halve_width = true;
    loop {
        let (next_width, next_height) = if halve_width {
            (width / 2, height)
        } else {
            (width, height / 2)
        };
        if next_width == 0 || next_height == 0 || !fits(glyphs, next_width, next_height) {
            return (width, height);
        }
        log::debug!("Atlas still fits at {}x{}", next_width, next_height);
        width = next_width;
        height = next_height;
        halve_width = !halve_width;
    }
}

/// Size an atlas for `glyphs` and place every glyph in it.
///
/// Glyphs are placed tallest first; glyphs of equal height keep their input
/// order. An empty input yields a 1x1 canvas with no placements.
pub fn pack(glyphs: &[GlyphMetrics]) -> Result<AtlasLayout, PackError> {
    if glyphs.is_empty() {
        return Ok(AtlasLayout {
            width: 1,
            height: 1,
            glyphs: Vec::new(),
        });
    }

    let mut sorted = glyphs.to_vec();
    // `sort_by` is stable, so ties keep the requested order.
    sorted.sort_by(|a, b| b.height.cmp(&a.height));

    let (width, height) = canvas_size(&sorted)?;

    let mut cursor = ShelfCursor::new(width, height);
    let mut placed = Vec::with_capacity(sorted.len());
    for metrics in sorted {
        let (x, y) = cursor
            .place(metrics.width, metrics.height)
            .ok_or(PackError::SizingFailure {
                width,
                height,
                glyph_count: glyphs.len(),
            })?;
        placed.push(PlacedGlyph::new(metrics, x, y, width, height));
    }

    log::info!(
        "Packed {} glyphs into a {}x{} atlas",
        placed.len(),
        width,
        height
    );

    Ok(AtlasLayout {
        width,
        height,
        glyphs: placed,
    })
}
