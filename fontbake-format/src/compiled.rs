//! The compiled binary font: fixed-width records, a sorted codepoint index
//! and the embedded atlas image.

use std::io::{self, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::{FontDescriptor, FormatError};

/// File tag at offset 0.
pub const MAGIC: [u8; 4] = *b"MFNT";

/// Magic, glyph count and line height.
pub const HEADER_SIZE: usize = 12;

/// Per-glyph drawing record, 36 bytes on disk.
///
/// Field order on disk: `offset_x` i32, `offset_y` i32, `width` u32,
/// `height` u32, `tx` f32, `ty` f32, `tx2` f32, `ty2` f32, `advance_x` u32.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphRecord {
    pub offset_x: i32,
    pub offset_y: i32,
    pub width: u32,
    pub height: u32,
    pub tx: f32,
    pub ty: f32,
    pub tx2: f32,
    pub ty2: f32,
    pub advance_x: u32,
}

impl GlyphRecord {
    pub const SIZE: usize = 36;

    fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_i32::<LittleEndian>(self.offset_x)?;
        out.write_i32::<LittleEndian>(self.offset_y)?;
        out.write_u32::<LittleEndian>(self.width)?;
        out.write_u32::<LittleEndian>(self.height)?;
        out.write_f32::<LittleEndian>(self.tx)?;
        out.write_f32::<LittleEndian>(self.ty)?;
        out.write_f32::<LittleEndian>(self.tx2)?;
        out.write_f32::<LittleEndian>(self.ty2)?;
        out.write_u32::<LittleEndian>(self.advance_x)
    }

    fn read_from(reader: &mut &[u8]) -> io::Result<Self> {
        Ok(Self {
            offset_x: reader.read_i32::<LittleEndian>()?,
            offset_y: reader.read_i32::<LittleEndian>()?,
            width: reader.read_u32::<LittleEndian>()?,
            height: reader.read_u32::<LittleEndian>()?,
            tx: reader.read_f32::<LittleEndian>()?,
            ty: reader.read_f32::<LittleEndian>()?,
            tx2: reader.read_f32::<LittleEndian>()?,
            ty2: reader.read_f32::<LittleEndian>()?,
            advance_x: reader.read_u32::<LittleEndian>()?,
        })
    }
}

/// Maps a code point to a 1-based glyph record index, 8 bytes on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CodepointEntry {
    pub codepoint: u32,
    /// 1-based; 0 would mean "no glyph" and never appears in a valid index
    pub glyph_index: u32,
}

impl CodepointEntry {
    pub const SIZE: usize = 8;

    fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_u32::<LittleEndian>(self.codepoint)?;
        out.write_u32::<LittleEndian>(self.glyph_index)
    }

    fn read_from(reader: &mut &[u8]) -> io::Result<Self> {
        Ok(Self {
            codepoint: reader.read_u32::<LittleEndian>()?,
            glyph_index: reader.read_u32::<LittleEndian>()?,
        })
    }
}

/// An in-memory compiled font.
///
/// Construct with [`CompiledFont::from_descriptor`] (compiling) or
/// [`CompiledFont::parse`] (loading); both validate the index before
/// returning, so every `CompiledFont` satisfies:
/// - one index entry per glyph record
/// - strictly increasing code points
/// - every glyph index in `1..=glyphs.len()`, each used once
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFont {
    pub line_height: u32,
    pub glyphs: Vec<GlyphRecord>,
    pub index: Vec<CodepointEntry>,
    /// Encoded atlas image, opaque to this crate
    pub image: Vec<u8>,
}

impl CompiledFont {
    /// Build the binary representation of a descriptor.
    ///
    /// Glyph records keep descriptor order (glyph `i` gets index `i + 1`);
    /// the index is sorted by code point. Multi-scalar symbols and repeated
    /// code points are rejected.
    pub fn from_descriptor(descriptor: &FontDescriptor, image: Vec<u8>) -> Result<Self, FormatError> {
        let glyph_count = u32::try_from(descriptor.glyphs.len())
            .map_err(|_| FormatError::TooManyGlyphs(descriptor.glyphs.len()))?;

        let mut glyphs = Vec::with_capacity(descriptor.glyphs.len());
        let mut index = Vec::with_capacity(descriptor.glyphs.len());
        for (glyph_index, g) in (1..=glyph_count).zip(&descriptor.glyphs) {
            let symbol = single_scalar(&g.symbol, glyph_index)?;
            index.push(CodepointEntry {
                codepoint: u32::from(symbol),
                glyph_index,
            });
            glyphs.push(GlyphRecord {
                offset_x: g.offset_x,
                offset_y: g.offset_y,
                width: g.width,
                height: g.height,
                tx: g.tx,
                ty: g.ty,
                tx2: g.tx2,
                ty2: g.ty2,
                advance_x: g.x_advance,
            });
        }

        // Stable, so the lower glyph index comes first among duplicates.
        index.sort_by_key(|entry| entry.codepoint);

        let font = Self {
            line_height: descriptor.line_height,
            glyphs,
            index,
            image,
        };
        font.validate()?;
        log::debug!(
            "Compiled {} glyphs, line height {}, {} image bytes",
            font.glyphs.len(),
            font.line_height,
            font.image.len()
        );
        Ok(font)
    }

    /// Load a compiled font, validating its header and index.
    pub fn parse(data: &[u8]) -> Result<Self, FormatError> {
        if data.len() < HEADER_SIZE {
            return Err(FormatError::Truncated {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }
        let mut found = [0u8; 4];
        found.copy_from_slice(&data[..4]);
        if found != MAGIC {
            return Err(FormatError::BadMagic { found });
        }

        let mut reader = &data[4..];
        let glyph_count = reader.read_u32::<LittleEndian>()? as usize;
        let line_height = reader.read_u32::<LittleEndian>()?;

        let expected = glyph_count
            .checked_mul(GlyphRecord::SIZE + CodepointEntry::SIZE)
            .and_then(|tables| tables.checked_add(HEADER_SIZE))
            .ok_or(FormatError::Truncated {
                expected: usize::MAX,
                actual: data.len(),
            })?;
        if data.len() < expected {
            return Err(FormatError::Truncated {
                expected,
                actual: data.len(),
            });
        }

        let glyphs = (0..glyph_count)
            .map(|_| GlyphRecord::read_from(&mut reader))
            .collect::<io::Result<Vec<_>>>()?;
        let index = (0..glyph_count)
            .map(|_| CodepointEntry::read_from(&mut reader))
            .collect::<io::Result<Vec<_>>>()?;

        let font = Self {
            line_height,
            glyphs,
            index,
            image: reader.to_vec(),
        };
        font.validate()?;
        Ok(font)
    }

    /// Check the index invariants listed on the type.
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.index.len() != self.glyphs.len() {
            return Err(FormatError::GlyphCountMismatch {
                glyphs: self.glyphs.len(),
                entries: self.index.len(),
            });
        }

        let mut referenced = vec![false; self.glyphs.len()];
        for (position, entry) in self.index.iter().enumerate() {
            if char::from_u32(entry.codepoint).is_none() {
                return Err(FormatError::InvalidCodepoint(entry.codepoint));
            }
            let slot = (entry.glyph_index as usize)
                .checked_sub(1)
                .filter(|slot| *slot < self.glyphs.len())
                .ok_or(FormatError::GlyphIndexOutOfRange {
                    codepoint: entry.codepoint,
                    glyph_index: entry.glyph_index,
                    glyph_count: self.glyphs.len(),
                })?;
            if std::mem::replace(&mut referenced[slot], true) {
                return Err(FormatError::DuplicateGlyphIndex(entry.glyph_index));
            }

            if position > 0 {
                let previous = self.index[position - 1];
                if previous.codepoint == entry.codepoint {
                    return Err(FormatError::DuplicateCodepoint {
                        codepoint: entry.codepoint,
                        first_index: previous.glyph_index,
                        second_index: entry.glyph_index,
                    });
                }
                if previous.codepoint > entry.codepoint {
                    return Err(FormatError::UnsortedIndex { position });
                }
            }
        }
        Ok(())
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Size of the encoded font in bytes.
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE
            + self.glyphs.len() * (GlyphRecord::SIZE + CodepointEntry::SIZE)
            + self.image.len()
    }

    /// Write the binary layout.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<(), FormatError> {
        let glyph_count = u32::try_from(self.glyphs.len())
            .map_err(|_| FormatError::TooManyGlyphs(self.glyphs.len()))?;
        out.write_all(&MAGIC)?;
        out.write_u32::<LittleEndian>(glyph_count)?;
        out.write_u32::<LittleEndian>(self.line_height)?;
        for glyph in &self.glyphs {
            glyph.write_to(out)?;
        }
        for entry in &self.index {
            entry.write_to(out)?;
        }
        out.write_all(&self.image)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, FormatError> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// 1-based glyph index for `c`, found by binary search of the index.
    pub fn lookup(&self, c: char) -> Option<u32> {
        self.index
            .binary_search_by_key(&u32::from(c), |entry| entry.codepoint)
            .ok()
            .map(|position| self.index[position].glyph_index)
    }

    /// Drawing record for `c`, if the font has one.
    pub fn glyph(&self, c: char) -> Option<&GlyphRecord> {
        let index = self.lookup(c)?;
        self.glyphs.get(index as usize - 1)
    }

    /// Horizontal advance of `text` in pixels; unmapped characters are skipped.
    pub fn text_width(&self, text: &str) -> u32 {
        text.chars()
            .filter_map(|c| self.glyph(c))
            .fold(0u32, |width, glyph| width.saturating_add(glyph.advance_x))
    }
}

fn single_scalar(symbol: &str, glyph_index: u32) -> Result<char, FormatError> {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(FormatError::InvalidSymbol {
            glyph_index,
            symbol: symbol.to_string(),
            scalars: symbol.chars().count(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DescriptorGlyph;

    fn descriptor(symbols: &[&str]) -> FontDescriptor {
        FontDescriptor {
            line_height: 14,
            glyphs: symbols
                .iter()
                .enumerate()
                .map(|(i, s)| DescriptorGlyph {
                    symbol: s.to_string(),
                    offset_x: i as i32 - 1,
                    offset_y: 2,
                    width: 6,
                    height: 9,
                    tx: 0.0,
                    ty: 0.0,
                    tx2: 0.5,
                    ty2: 0.5,
                    x_advance: 7 + i as u32,
                })
                .collect(),
        }
    }

    #[test]
    fn test_index_is_sorted_and_points_at_descriptor_order() {
        let font = CompiledFont::from_descriptor(&descriptor(&["z", "a", "m"]), vec![]).unwrap();
        let index: Vec<(u32, u32)> = font
            .index
            .iter()
            .map(|e| (e.codepoint, e.glyph_index))
            .collect();
        assert_eq!(index, vec![('a' as u32, 2), ('m' as u32, 3), ('z' as u32, 1)]);
    }

    #[test]
    fn test_rejects_multi_scalar_symbol() {
        // "e" + combining acute accent is one grapheme but two scalars.
        let err = CompiledFont::from_descriptor(&descriptor(&["a", "e\u{301}"]), vec![]).unwrap_err();
        match err {
            FormatError::InvalidSymbol {
                glyph_index,
                scalars,
                ..
            } => {
                assert_eq!(glyph_index, 2);
                assert_eq!(scalars, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_empty_symbol() {
        let err = CompiledFont::from_descriptor(&descriptor(&[""]), vec![]).unwrap_err();
        assert!(matches!(err, FormatError::InvalidSymbol { scalars: 0, .. }));
    }

    #[test]
    fn test_rejects_duplicate_codepoint() {
        let err = CompiledFont::from_descriptor(&descriptor(&["q", "x", "q"]), vec![]).unwrap_err();
        match err {
            FormatError::DuplicateCodepoint {
                codepoint,
                first_index,
                second_index,
            } => {
                assert_eq!(codepoint, 'q' as u32);
                assert_eq!((first_index, second_index), (1, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_layout() {
        let bytes = crate::compile(&descriptor(&["A"]), b"PNG").unwrap();
        assert_eq!(&bytes[0..4], b"MFNT");
        assert_eq!(&bytes[4..8], &1u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &14u32.to_le_bytes());
        assert_eq!(bytes.len(), HEADER_SIZE + GlyphRecord::SIZE + CodepointEntry::SIZE + 3);
        // offset_x of the first record is -1.
        assert_eq!(&bytes[12..16], &(-1i32).to_le_bytes());
        // Index entry follows the record: codepoint then glyph index.
        let entry = HEADER_SIZE + GlyphRecord::SIZE;
        assert_eq!(&bytes[entry..entry + 4], &('A' as u32).to_le_bytes());
        assert_eq!(&bytes[entry + 4..entry + 8], &1u32.to_le_bytes());
        assert_eq!(&bytes[bytes.len() - 3..], b"PNG");
    }

    #[test]
    fn test_parse_rejects_bad_magic_and_truncation() {
        assert!(matches!(
            CompiledFont::parse(b"XFNT\0\0\0\0\0\0\0\0"),
            Err(FormatError::BadMagic { .. })
        ));
        assert!(matches!(
            CompiledFont::parse(b"MFNT"),
            Err(FormatError::Truncated { .. })
        ));

        let bytes = crate::compile(&descriptor(&["A", "B"]), b"").unwrap();
        let err = CompiledFont::parse(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, FormatError::Truncated { .. }));
    }

    #[test]
    fn test_parse_rejects_unsorted_index() {
        let mut font = CompiledFont::from_descriptor(&descriptor(&["A", "B"]), vec![]).unwrap();
        font.index.swap(0, 1);
        let bytes = font.to_bytes().unwrap();
        assert!(matches!(
            CompiledFont::parse(&bytes),
            Err(FormatError::UnsortedIndex { position: 1 })
        ));
    }

    #[test]
    fn test_parse_rejects_out_of_range_glyph_index() {
        let mut font = CompiledFont::from_descriptor(&descriptor(&["A"]), vec![]).unwrap();
        font.index[0].glyph_index = 0;
        let bytes = font.to_bytes().unwrap();
        assert!(matches!(
            CompiledFont::parse(&bytes),
            Err(FormatError::GlyphIndexOutOfRange { glyph_index: 0, .. })
        ));
    }

    #[test]
    fn test_text_width_skips_unmapped() {
        let font = CompiledFont::from_descriptor(&descriptor(&["a", "b"]), vec![]).unwrap();
        assert_eq!(font.text_width("ab"), 7 + 8);
        assert_eq!(font.text_width("a?b"), 15);
        assert_eq!(font.text_width(""), 0);
    }
}
