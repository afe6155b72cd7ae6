//! Typed error variants for the descriptor and compiled font formats.

use thiserror::Error;

/// Errors raised while reading, validating or writing font files.
#[derive(Debug, Error)]
pub enum FormatError {
    // -----------------------------------------------------------------------
    // Descriptor (XML)
    // -----------------------------------------------------------------------
    /// The descriptor is not well-formed XML.
    #[error("Malformed descriptor")]
    Xml(#[from] roxmltree::Error),

    /// The document root is not `<fontdef>`.
    #[error("Descriptor root element is <{found}>, expected <fontdef>")]
    UnexpectedRoot { found: String },

    /// A required attribute is absent.
    #[error("Line {line}: <{element}> is missing the '{attribute}' attribute")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
        line: u32,
    },

    /// An attribute value does not parse as the expected type.
    #[error("Line {line}: attribute '{attribute}' has invalid value '{value}'")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
        line: u32,
    },

    /// A symbol contains a character the XML descriptor cannot carry.
    #[error("Glyph {glyph_index} symbol U+{codepoint:04X} cannot be written to the XML descriptor")]
    UnrepresentableSymbol { glyph_index: u32, codepoint: u32 },

    // -----------------------------------------------------------------------
    // Compilation
    // -----------------------------------------------------------------------
    /// A glyph symbol is empty or spans more than one Unicode scalar value.
    #[error(
        "Glyph {glyph_index} symbol {symbol:?} must be exactly one Unicode scalar value, found {scalars}"
    )]
    InvalidSymbol {
        glyph_index: u32,
        symbol: String,
        scalars: usize,
    },

    /// Two glyphs map the same code point.
    #[error(
        "Code point U+{codepoint:04X} is mapped by glyph {first_index} and glyph {second_index}"
    )]
    DuplicateCodepoint {
        codepoint: u32,
        first_index: u32,
        second_index: u32,
    },

    /// More glyphs than a `u32` count can describe.
    #[error("{0} glyphs exceed the format's 32-bit glyph count")]
    TooManyGlyphs(usize),

    // -----------------------------------------------------------------------
    // Compiled font reader
    // -----------------------------------------------------------------------
    /// The data does not start with the `MFNT` tag.
    #[error("Not a compiled font: bad magic {found:?}")]
    BadMagic { found: [u8; 4] },

    /// The data ends before the declared tables do.
    #[error("Compiled font truncated: need at least {expected} bytes, have {actual}")]
    Truncated { expected: usize, actual: usize },

    /// The number of index entries differs from the number of glyph records.
    #[error("Glyph count mismatch: {glyphs} glyph records but {entries} index entries")]
    GlyphCountMismatch { glyphs: usize, entries: usize },

    /// Index entries are not in ascending code point order.
    #[error("Codepoint index is not sorted at entry {position}")]
    UnsortedIndex { position: usize },

    /// An index entry refers to a glyph record that does not exist.
    #[error(
        "Code point U+{codepoint:04X} refers to glyph {glyph_index}, but the font has {glyph_count} glyphs"
    )]
    GlyphIndexOutOfRange {
        codepoint: u32,
        glyph_index: u32,
        glyph_count: usize,
    },

    /// An index entry is not a Unicode scalar value.
    #[error("Codepoint index contains invalid code point 0x{0:X}")]
    InvalidCodepoint(u32),

    /// Two index entries refer to the same glyph record.
    #[error("Glyph {0} is referenced by more than one code point")]
    DuplicateGlyphIndex(u32),

    #[error("I/O error while encoding compiled font")]
    Io(#[from] std::io::Error),
}
