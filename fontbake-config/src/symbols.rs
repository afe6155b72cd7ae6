//! Symbol sets: the built-in default and UTF-8 symbol files.

use std::fs;
use std::path::Path;

use crate::ConfigError;

/// Printable ASCII in keyboard order, used when no symbol set is given.
pub const DEFAULT_SYMBOLS: &str = r#" `1234567890-=\~!@#$%^&*()_+|qwertyuiop[]QWERTYUIOP{}asdfghjkl;'ASDFGHJKL:"zxcvbnm,./ZXCVBNM<>?"#;

/// Whether `c` can be stored in the XML placement descriptor.
///
/// XML 1.0 has no encoding, escaped or not, for C0 controls other than tab,
/// line feed and carriage return, nor for U+FFFE and U+FFFF.
pub fn is_representable(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..)
}

/// Read a symbol set from a UTF-8 file.
///
/// Trailing line terminators are stripped so a file saved by an editor with
/// a final newline does not request a glyph for `\n`. Any other whitespace,
/// including a leading space, is kept as a requested symbol.
pub fn read_symbols_file(path: &Path) -> Result<String, ConfigError> {
    let bytes = fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| ConfigError::InvalidSymbolFile {
        path: path.to_path_buf(),
    })?;
    let trimmed = text.trim_end_matches(['\n', '\r']);
    log::debug!(
        "Read {} symbols from {}",
        trimmed.chars().count(),
        path.display()
    );
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_representable_symbols() {
        for c in ['a', ' ', '\t', '\n', '\r', '€', '\u{FFFD}', '\u{1F600}'] {
            assert!(is_representable(c), "{c:?}");
        }
        for c in ['\0', '\u{1}', '\u{1F}', '\u{FFFE}', '\u{FFFF}'] {
            assert!(!is_representable(c), "{c:?}");
        }
    }

    #[test]
    fn test_default_symbols_are_unique() {
        let mut seen = HashSet::new();
        for c in DEFAULT_SYMBOLS.chars() {
            assert!(seen.insert(c), "duplicate default symbol {c:?}");
        }
        assert!(seen.contains(&' '));
        assert!(seen.contains(&'\\'));
        assert!(seen.contains(&'"'));
    }

    #[test]
    fn test_read_symbols_strips_trailing_newlines_only() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("symbols.txt");
        fs::write(&path, " aé€\r\n\n").expect("write symbols");
        let symbols = read_symbols_file(&path).expect("read symbols");
        assert_eq!(symbols, " aé€");
    }

    #[test]
    fn test_read_symbols_rejects_invalid_utf8() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("bad.txt");
        fs::write(&path, [0x61, 0xff, 0xfe]).expect("write symbols");
        let err = read_symbols_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSymbolFile { .. }));
    }

    #[test]
    fn test_read_symbols_missing_file() {
        let err = read_symbols_file(Path::new("/nonexistent/fontbake/symbols.txt")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
