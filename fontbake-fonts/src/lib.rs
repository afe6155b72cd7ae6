//! Font handling for fontbake.
//!
//! - [`FontFace`]: a face resolved from a font file or the system font
//!   database (fontdb)
//! - [`GlyphSource`]: metrics and coverage per symbol, implemented with
//!   swash by [`SwashGlyphSource`]
//! - [`paint_atlas`]: renders a packed layout into an RGBA image

mod error;
mod face;
mod paint;
mod source;

pub use error::FontError;
pub use face::FontFace;
pub use paint::{measure_glyphs, paint_atlas};
pub use source::{GlyphSource, SwashGlyphSource, blit_coverage, mask_alpha, subpixel_alpha};
