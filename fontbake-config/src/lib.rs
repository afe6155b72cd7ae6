//! Configuration system for the fontbake bitmap font tools.
//!
//! This crate provides:
//! - [`BakeConfig`], the typed style configuration with documented defaults
//! - Closed enumerations for slant, weight, hint style and antialiasing,
//!   each with a validating `FromStr`
//! - YAML config file loading and symbol-set file reading
//!
//! A `BakeConfig` is constructed once per invocation (defaults, then an
//! optional config file, then command-line overrides) and passed by
//! reference into the font source and the packer.

pub mod config;
pub mod defaults;
mod error;
pub mod symbols;
mod types;

pub use config::{BakeConfig, descriptor_path_for};
pub use error::ConfigError;
pub use symbols::{DEFAULT_SYMBOLS, is_representable, read_symbols_file};
pub use types::{Antialias, HintStyle, LogLevel, Slant, Weight};
