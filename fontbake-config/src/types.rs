//! Closed style enumerations.
//!
//! Each enum is parsed from its lowercase name at the boundary (command line
//! or config file); unknown names are rejected there with
//! [`ConfigError::UnknownValue`] instead of surfacing deep inside the
//! rendering call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn parse_named<T: Copy>(
    field: &'static str,
    value: &str,
    all: &[T],
    name: fn(T) -> &'static str,
) -> Result<T, ConfigError> {
    let wanted = value.trim().to_ascii_lowercase();
    all.iter()
        .copied()
        .find(|variant| name(*variant) == wanted)
        .ok_or_else(|| ConfigError::UnknownValue {
            field,
            value: value.to_string(),
            expected: all
                .iter()
                .map(|variant| name(*variant))
                .collect::<Vec<_>>()
                .join(", "),
        })
}

// ============================================================================
// Slant
// ============================================================================

/// Font slant used when selecting a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Slant {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl Slant {
    /// Lowercase name accepted on the command line and in config files
    pub fn name(self) -> &'static str {
        match self {
            Slant::Normal => "normal",
            Slant::Italic => "italic",
            Slant::Oblique => "oblique",
        }
    }

    pub fn all() -> &'static [Slant] {
        &[Slant::Normal, Slant::Italic, Slant::Oblique]
    }
}

impl FromStr for Slant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("slant", s, Self::all(), Self::name)
    }
}

impl fmt::Display for Slant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Weight
// ============================================================================

/// Font weight used when selecting a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Weight {
    #[default]
    Normal,
    Bold,
}

impl Weight {
    /// Lowercase name accepted on the command line and in config files
    pub fn name(self) -> &'static str {
        match self {
            Weight::Normal => "normal",
            Weight::Bold => "bold",
        }
    }

    pub fn all() -> &'static [Weight] {
        &[Weight::Normal, Weight::Bold]
    }

    /// CSS-style numeric weight (400 / 700)
    pub fn value(self) -> u16 {
        match self {
            Weight::Normal => 400,
            Weight::Bold => 700,
        }
    }
}

impl FromStr for Weight {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("weight", s, Self::all(), Self::name)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Hint style
// ============================================================================

/// Outline hinting strength.
///
/// The rasterizer only distinguishes hinting on or off: [`HintStyle::None`]
/// disables it, every other style enables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HintStyle {
    #[default]
    Default,
    None,
    Slight,
    Medium,
    Full,
}

impl HintStyle {
    /// Lowercase name accepted on the command line and in config files
    pub fn name(self) -> &'static str {
        match self {
            HintStyle::Default => "default",
            HintStyle::None => "none",
            HintStyle::Slight => "slight",
            HintStyle::Medium => "medium",
            HintStyle::Full => "full",
        }
    }

    pub fn all() -> &'static [HintStyle] {
        &[
            HintStyle::Default,
            HintStyle::None,
            HintStyle::Slight,
            HintStyle::Medium,
            HintStyle::Full,
        ]
    }

    /// Whether outlines should be grid-fitted at all
    pub fn is_hinted(self) -> bool {
        self != HintStyle::None
    }
}

impl FromStr for HintStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("hint style", s, Self::all(), Self::name)
    }
}

impl fmt::Display for HintStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Antialiasing
// ============================================================================

/// Coverage mode used when painting glyphs into the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Antialias {
    /// Grayscale coverage
    #[default]
    Default,
    /// Hard edges: coverage is thresholded to fully on or off
    None,
    /// Grayscale coverage
    Gray,
    /// Subpixel (LCD) coverage folded into a single alpha channel
    Subpixel,
}

impl Antialias {
    /// Lowercase name accepted on the command line and in config files
    pub fn name(self) -> &'static str {
        match self {
            Antialias::Default => "default",
            Antialias::None => "none",
            Antialias::Gray => "gray",
            Antialias::Subpixel => "subpixel",
        }
    }

    pub fn all() -> &'static [Antialias] {
        &[
            Antialias::Default,
            Antialias::None,
            Antialias::Gray,
            Antialias::Subpixel,
        ]
    }
}

impl FromStr for Antialias {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("antialias", s, Self::all(), Self::name)
    }
}

impl fmt::Display for Antialias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Log level
// ============================================================================

/// Log verbosity selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    pub fn all() -> &'static [LogLevel] {
        &[
            LogLevel::Off,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
    }

    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("log level", s, Self::all(), Self::name)
    }
}
