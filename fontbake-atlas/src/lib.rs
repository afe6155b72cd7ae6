//! Glyph atlas packing for fontbake.
//!
//! Given the ink boxes of a set of glyphs, [`pack`] picks the canvas size
//! and assigns every glyph a non-overlapping pixel position inside it.
//!
//! # Algorithm
//!
//! Glyphs are sorted tallest first and laid out on shelves, left to right,
//! with a one pixel gap between neighbours and between shelves so texture
//! filtering never samples a neighbour. The canvas starts as the smallest
//! power-of-two square whose area covers the glyphs; it grows at most once
//! per axis when that is too small, or is greedily halved (width, then
//! height, alternating) while the glyphs still fit.

mod error;
mod glyph;
pub mod packer;

pub use error::PackError;
pub use glyph::{FontMetrics, GlyphMetrics, PlacedGlyph};
pub use packer::{AtlasLayout, GLYPH_PADDING, canvas_size, fits, initial_size, pack};
