//! The `BakeConfig` struct: style parameters for one font generation run.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{defaults, symbols};
use crate::{Antialias, ConfigError, HintStyle, Slant, Weight};

/// Style parameters and output location for one atlas generation.
///
/// Missing fields in a config file take their documented default, so a file
/// only needs to list what differs:
///
/// ```yaml
/// font_family: "DejaVu Sans Mono"
/// size: 12
/// weight: bold
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakeConfig {
    /// Font family name to look up in the system font database.
    /// `serif`, `sans-serif` and `monospace` select the generic families.
    #[serde(default = "defaults::font_family")]
    pub font_family: String,

    /// Explicit font file (TTF/OTF/TTC); bypasses the system lookup
    #[serde(default)]
    pub font_file: Option<PathBuf>,

    /// Font size in points
    #[serde(default = "defaults::size")]
    pub size: f32,

    #[serde(default)]
    pub slant: Slant,

    #[serde(default)]
    pub weight: Weight,

    #[serde(default)]
    pub hint_style: HintStyle,

    #[serde(default)]
    pub antialias: Antialias,

    /// Symbols to put in the atlas, one glyph per character
    #[serde(default = "defaults::symbols")]
    pub symbols: String,

    /// Atlas image path; the descriptor is written next to it
    #[serde(default = "defaults::output")]
    pub output: PathBuf,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            font_family: defaults::font_family(),
            font_file: None,
            size: defaults::size(),
            slant: Slant::default(),
            weight: Weight::default(),
            hint_style: HintStyle::default(),
            antialias: Antialias::default(),
            symbols: defaults::symbols(),
            output: defaults::output(),
        }
    }
}

impl BakeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config file, filling unspecified fields with defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, &path.display().to_string())
    }

    /// Parse a config document held in memory.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Self::parse(contents, "<string>")
    }

    fn parse(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty mapping.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml_ng::from_str(contents).map_err(|source| ConfigError::Parse {
                origin: origin.to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check field values that serde cannot express as types.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "size must be a positive number of points, got {}",
                self.size
            )));
        }
        if self.symbols.is_empty() {
            return Err(ConfigError::Validation(
                "symbol set is empty".to_string(),
            ));
        }
        if let Some(c) = self.symbols.chars().find(|c| !symbols::is_representable(*c)) {
            return Err(ConfigError::Validation(format!(
                "symbol U+{:04X} cannot be written to the XML descriptor",
                u32::from(c)
            )));
        }
        if self.font_family.trim().is_empty() && self.font_file.is_none() {
            return Err(ConfigError::Validation(
                "either font_family or font_file must be set".to_string(),
            ));
        }
        Ok(())
    }

    /// Font size in pixels handed to the rasterizer
    pub fn pixel_size(&self) -> f32 {
        self.size * defaults::POINTS_TO_PIXELS
    }

    /// Path of the placement descriptor written alongside the atlas image
    pub fn descriptor_path(&self) -> PathBuf {
        descriptor_path_for(&self.output)
    }

    /// The requested characters in order, each at most once.
    ///
    /// A repeated symbol would produce two glyphs for one code point, which
    /// the compiler rejects; the later occurrences are dropped here instead.
    pub fn symbol_chars(&self) -> Vec<char> {
        let mut seen = HashSet::new();
        let mut chars = Vec::new();
        for c in self.symbols.chars() {
            if seen.insert(c) {
                chars.push(c);
            } else {
                log::warn!("Dropping repeated symbol {:?} (U+{:04X})", c, c as u32);
            }
        }
        chars
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_symbols(mut self, symbols: impl Into<String>) -> Self {
        self.symbols = symbols.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}

/// `atlas.png` -> `atlas.png.fontdef.xml`
pub fn descriptor_path_for(image_path: &Path) -> PathBuf {
    let mut name = image_path.as_os_str().to_os_string();
    name.push(defaults::DESCRIPTOR_SUFFIX);
    PathBuf::from(name)
}
