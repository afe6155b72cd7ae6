use thiserror::Error;

/// Errors produced while sizing an atlas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    /// The glyphs did not fit even after the bounded growth search.
    ///
    /// `width` and `height` are the largest canvas that was tried.
    #[error(
        "{glyph_count} glyphs do not fit in a {width}x{height} atlas, the largest size considered"
    )]
    SizingFailure {
        width: u32,
        height: u32,
        glyph_count: usize,
    },

    /// The total glyph area is too large for a 32-bit texture dimension.
    #[error("{glyph_count} glyphs need an atlas larger than the maximum texture dimension")]
    Oversized { glyph_count: usize },
}
