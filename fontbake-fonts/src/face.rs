//! Font face selection.
//!
//! A face comes either from an explicit font file or from the system font
//! database, queried by family name, slant and weight. Generic CSS-style
//! family names (`sans-serif`, `monospace`, ...) map to fontdb's generic
//! families so they resolve through the platform's own defaults.

use std::fs;
use std::path::Path;

use fontbake_config::{BakeConfig, Slant, Weight};
use fontdb::{Database, Family, Query};
use swash::{CacheKey, FontRef};

use crate::FontError;

/// An owned font face.
///
/// Holds the whole font file plus the offset of the selected face within
/// it, so collections (`.ttc`) work the same as single fonts.
pub struct FontFace {
    data: Vec<u8>,
    offset: u32,
    key: CacheKey,
    name: String,
}

impl FontFace {
    /// Wrap font bytes, selecting face `index` of a collection.
    pub fn from_bytes(data: Vec<u8>, index: u32, name: impl Into<String>) -> Result<Self, FontError> {
        let name = name.into();
        let (offset, key) = match FontRef::from_index(&data, index as usize) {
            Some(font) => (font.offset, font.key),
            None => {
                return Err(FontError::InvalidFontData {
                    origin: name,
                    index,
                });
            }
        };
        Ok(Self {
            data,
            offset,
            key,
            name,
        })
    }

    /// Load the first face of a font file.
    pub fn load_file(path: &Path) -> Result<Self, FontError> {
        let data = fs::read(path).map_err(|source| FontError::FontFile {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded font file {} ({} bytes)", path.display(), data.len());
        Self::from_bytes(data, 0, path.display().to_string())
    }

    /// Find an installed face by family, slant and weight.
    pub fn from_system(family: &str, slant: Slant, weight: Weight) -> Result<Self, FontError> {
        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("Font database holds {} faces", db.len());
        Self::query(&db, family, slant, weight)
    }

    /// Find a face in an already populated database.
    pub fn query(db: &Database, family: &str, slant: Slant, weight: Weight) -> Result<Self, FontError> {
        let families = [family_for(family)];
        let query = Query {
            families: &families,
            weight: fontdb::Weight(weight.value()),
            style: style_for(slant),
            ..Query::default()
        };

        let not_found = || FontError::FontNotFound {
            family: family.to_string(),
            slant,
            weight,
        };
        let id = db.query(&query).ok_or_else(not_found)?;

        let name = db
            .face(id)
            .map(|info| {
                info.families
                    .first()
                    .map(|(name, _)| name.clone())
                    .unwrap_or_else(|| info.post_script_name.clone())
            })
            .unwrap_or_else(|| family.to_string());
        log::info!("Resolved font '{}' ({}, {}) to '{}'", family, slant, weight, name);

        db.with_face_data(id, |data, index| Self::from_bytes(data.to_vec(), index, name.clone()))
            .ok_or_else(|| FontError::FaceDataUnavailable {
                family: family.to_string(),
            })?
    }

    /// Resolve the face a configuration asks for.
    ///
    /// An explicit font file wins over the family name; slant and weight
    /// only take part in system lookups.
    pub fn resolve(config: &BakeConfig) -> Result<Self, FontError> {
        match &config.font_file {
            Some(path) => {
                if config.slant != Slant::Normal || config.weight != Weight::Normal {
                    log::warn!(
                        "Slant and weight are ignored when a font file is given ({})",
                        path.display()
                    );
                }
                Self::load_file(path)
            }
            None => Self::from_system(&config.font_family, config.slant, config.weight),
        }
    }

    /// Borrow the face for swash.
    pub fn as_font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        }
    }

    /// Family or file name the face was loaded from
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("name", &self.name)
            .field("offset", &self.offset)
            .field("bytes", &self.data.len())
            .finish()
    }
}

fn family_for(name: &str) -> Family<'_> {
    match name.trim().to_ascii_lowercase().as_str() {
        "serif" => Family::Serif,
        "sans" | "sans-serif" | "sans serif" => Family::SansSerif,
        "mono" | "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name),
    }
}

fn style_for(slant: Slant) -> fontdb::Style {
    match slant {
        Slant::Normal => fontdb::Style::Normal,
        Slant::Italic => fontdb::Style::Italic,
        Slant::Oblique => fontdb::Style::Oblique,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_family_names() {
        assert!(matches!(family_for("sans-serif"), Family::SansSerif));
        assert!(matches!(family_for("Monospace"), Family::Monospace));
        assert!(matches!(family_for("serif"), Family::Serif));
        assert!(matches!(family_for("DejaVu Sans"), Family::Name("DejaVu Sans")));
    }

    #[test]
    fn test_style_mapping() {
        assert_eq!(style_for(Slant::Normal), fontdb::Style::Normal);
        assert_eq!(style_for(Slant::Italic), fontdb::Style::Italic);
        assert_eq!(style_for(Slant::Oblique), fontdb::Style::Oblique);
    }

    #[test]
    fn test_invalid_bytes_are_rejected() {
        let err = FontFace::from_bytes(b"not a font".to_vec(), 0, "junk").unwrap_err();
        assert!(matches!(err, FontError::InvalidFontData { index: 0, .. }));
    }

    #[test]
    fn test_empty_database_reports_not_found() {
        let db = Database::new();
        let err = FontFace::query(&db, "DejaVu Sans", Slant::Italic, Weight::Bold).unwrap_err();
        match err {
            FontError::FontNotFound {
                family,
                slant,
                weight,
            } => {
                assert_eq!(family, "DejaVu Sans");
                assert_eq!(slant, Slant::Italic);
                assert_eq!(weight, Weight::Bold);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
