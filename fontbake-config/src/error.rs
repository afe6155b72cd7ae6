//! Typed error variants for the fontbake-config crate.
//!
//! Callers at the crate boundary can match on specific failure modes
//! instead of relying on opaque `anyhow` strings.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating a [`crate::BakeConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config or symbol file could not be read.
    #[error("I/O error reading '{}'", .path.display())]
    Io {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config document contained invalid YAML, or a field had the wrong type.
    #[error("YAML parse error in {origin}")]
    Parse {
        /// Where the document came from (a path, or `<string>`).
        origin: String,
        /// Underlying parser error.
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// A style name did not match any known variant.
    #[error("Unknown {field} '{value}' (expected one of: {expected})")]
    UnknownValue {
        /// Name of the option being parsed, e.g. `slant`.
        field: &'static str,
        /// The rejected input.
        value: String,
        /// Comma-separated list of accepted names.
        expected: String,
    },

    /// A symbol file was not valid UTF-8.
    #[error("Symbol file '{}' is not valid UTF-8", .path.display())]
    InvalidSymbolFile {
        /// Path of the offending file.
        path: PathBuf,
    },

    /// A field value failed semantic validation.
    #[error("Config validation error: {0}")]
    Validation(String),
}
