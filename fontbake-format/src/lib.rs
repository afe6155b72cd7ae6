//! File formats shared by the fontbake packing and compiling stages.
//!
//! - [`FontDescriptor`]: the XML placement descriptor written next to the
//!   atlas image (`<fontdef>` with one `<glyph>` per symbol)
//! - [`CompiledFont`]: the self-contained binary font loaded at runtime,
//!   holding glyph records, a sorted codepoint index and the atlas image
//!
//! # Compiled layout
//!
//! All integers are little-endian.
//!
//! | Offset | Field | Type |
//! |---|---|---|
//! | 0 | magic `MFNT` | 4 bytes |
//! | 4 | glyph count | `u32` |
//! | 8 | line height | `u32` |
//! | 12 | glyph records | `count x 36` bytes |
//! | .. | codepoint index | `count x 8` bytes |
//! | .. | atlas image | remaining bytes |

pub mod compiled;
pub mod descriptor;
mod error;

pub use compiled::{CodepointEntry, CompiledFont, GlyphRecord, HEADER_SIZE, MAGIC};
pub use descriptor::{DescriptorGlyph, FontDescriptor};
pub use error::FormatError;

/// Compile a descriptor and atlas image into the binary font format.
///
/// The image bytes are embedded verbatim.
pub fn compile(descriptor: &FontDescriptor, image: &[u8]) -> Result<Vec<u8>, FormatError> {
    CompiledFont::from_descriptor(descriptor, image.to_vec())?.to_bytes()
}
