//! Typed error variants for font discovery and rasterization.

use std::path::PathBuf;

use fontbake_config::{Slant, Weight};
use thiserror::Error;

/// Errors raised while locating a face or rendering glyphs from it.
#[derive(Debug, Error)]
pub enum FontError {
    /// No installed face matches the requested family and style.
    #[error("No installed font matches family '{family}' ({slant}, {weight})")]
    FontNotFound {
        family: String,
        slant: Slant,
        weight: Weight,
    },

    /// A font file named on the command line could not be read.
    #[error("Failed to read font file '{}'", .path.display())]
    FontFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a font swash can open.
    #[error("Invalid font data in {origin} (face index {index})")]
    InvalidFontData { origin: String, index: u32 },

    /// The font database lists a face whose data can no longer be loaded.
    #[error("Font '{family}' was found but its data could not be loaded")]
    FaceDataUnavailable { family: String },
}
