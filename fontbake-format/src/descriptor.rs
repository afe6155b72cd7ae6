//! The XML placement descriptor passed from the packing stage to the compiler.
//!
//! ```xml
//! <fontdef height="11">
//!     <glyph symbol="A" offset_x="0" offset_y="2" width="7" height="8"
//!            tx="0" ty="0" tx2="0.4375" ty2="0.5" x_advance="7"/>
//! </fontdef>
//! ```
//!
//! Glyph elements keep their document order; the compiler numbers glyph
//! records in that order.

use std::fmt::Write as _;
use std::str::FromStr;

use fontbake_atlas::{AtlasLayout, FontMetrics};
use roxmltree::Node;

use crate::FormatError;

/// One `<glyph>` element.
///
/// `symbol` is kept as text; the compiler checks that it is a single
/// scalar value.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorGlyph {
    pub symbol: String,
    /// Horizontal ink offset from the pen position
    pub offset_x: i32,
    /// Vertical ink offset from the top of the line box (y-down)
    pub offset_y: i32,
    pub width: u32,
    pub height: u32,
    pub tx: f32,
    pub ty: f32,
    pub tx2: f32,
    pub ty2: f32,
    pub x_advance: u32,
}

/// Font-wide line height plus the glyphs in placement order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FontDescriptor {
    pub line_height: u32,
    pub glyphs: Vec<DescriptorGlyph>,
}

impl FontDescriptor {
    /// Describe a packed atlas.
    ///
    /// Vertical offsets are rebased from the baseline to the top of the line
    /// box, so a renderer can draw a line of text from its top edge.
    pub fn from_layout(layout: &AtlasLayout, font: &FontMetrics) -> Self {
        let ascent = font.ascent.round() as i32;
        let glyphs = layout
            .glyphs
            .iter()
            .map(|placed| {
                let m = &placed.metrics;
                DescriptorGlyph {
                    symbol: m.symbol.to_string(),
                    offset_x: m.bearing_x,
                    offset_y: ascent + m.bearing_y,
                    width: m.width,
                    height: m.height,
                    tx: placed.tx,
                    ty: placed.ty,
                    tx2: placed.tx2,
                    ty2: placed.ty2,
                    x_advance: m.advance_x,
                }
            })
            .collect();

        Self {
            line_height: font.line_height.round().max(0.0) as u32,
            glyphs,
        }
    }

    /// Serialize to the descriptor XML document.
    ///
    /// Fails on a symbol XML 1.0 cannot represent, such as most C0 controls.
    pub fn to_xml(&self) -> Result<String, FormatError> {
        let mut out = String::with_capacity(64 + self.glyphs.len() * 128);
        // Writing into a String cannot fail.
        let _ = writeln!(out, "<fontdef height=\"{}\">", self.line_height);
        for (glyph_index, g) in (1u32..).zip(&self.glyphs) {
            if let Some(c) = g.symbol.chars().find(|c| !is_xml_char(*c)) {
                return Err(FormatError::UnrepresentableSymbol {
                    glyph_index,
                    codepoint: u32::from(c),
                });
            }
            let _ = writeln!(
                out,
                "\t<glyph symbol=\"{}\" offset_x=\"{}\" offset_y=\"{}\" width=\"{}\" height=\"{}\" \
                 tx=\"{}\" ty=\"{}\" tx2=\"{}\" ty2=\"{}\" x_advance=\"{}\"/>",
                escape_attribute(&g.symbol),
                g.offset_x,
                g.offset_y,
                g.width,
                g.height,
                g.tx,
                g.ty,
                g.tx2,
                g.ty2,
                g.x_advance
            );
        }
        out.push_str("</fontdef>\n");
        Ok(out)
    }

    /// Parse a descriptor document.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let doc = roxmltree::Document::parse(text)?;
        let root = doc.root_element();
        if root.tag_name().name() != "fontdef" {
            return Err(FormatError::UnexpectedRoot {
                found: root.tag_name().name().to_string(),
            });
        }

        let line_height = attribute(root, "height")?;
        let mut glyphs = Vec::new();
        for node in root.children().filter(Node::is_element) {
            if node.tag_name().name() != "glyph" {
                log::debug!(
                    "Ignoring <{}> element on line {}",
                    node.tag_name().name(),
                    line_of(node)
                );
                continue;
            }
            glyphs.push(DescriptorGlyph {
                symbol: required(node, "symbol")?.to_string(),
                offset_x: attribute(node, "offset_x")?,
                offset_y: attribute(node, "offset_y")?,
                width: attribute(node, "width")?,
                height: attribute(node, "height")?,
                tx: attribute(node, "tx")?,
                ty: attribute(node, "ty")?,
                tx2: attribute(node, "tx2")?,
                ty2: attribute(node, "ty2")?,
                x_advance: attribute(node, "x_advance")?,
            });
        }

        log::debug!("Parsed descriptor with {} glyphs", glyphs.len());
        Ok(Self {
            line_height,
            glyphs,
        })
    }
}

fn line_of(node: Node<'_, '_>) -> u32 {
    node.document().text_pos_at(node.range().start).row
}

fn required<'a>(node: Node<'a, '_>, name: &'static str) -> Result<&'a str, FormatError> {
    node.attribute(name)
        .ok_or_else(|| FormatError::MissingAttribute {
            element: node.tag_name().name().to_string(),
            attribute: name,
            line: line_of(node),
        })
}

fn attribute<T: FromStr>(node: Node<'_, '_>, name: &'static str) -> Result<T, FormatError> {
    let value = required(node, name)?;
    value
        .trim()
        .parse()
        .map_err(|_| FormatError::InvalidAttribute {
            attribute: name,
            value: value.to_string(),
            line: line_of(node),
        })
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..)
}

/// Escape a value for a double-quoted attribute.
///
/// Tabs and line breaks become character references because XML attribute
/// normalization would otherwise turn them into spaces.
fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            c => out.push(c),
        }
    }
    out
}
