use fontbake_config::config::descriptor_path_for;
use fontbake_config::{Antialias, BakeConfig, ConfigError, DEFAULT_SYMBOLS, HintStyle, Slant, Weight};
use std::fs;
use std::path::{Path, PathBuf};

#[test]
fn test_config_defaults() {
    let config = BakeConfig::default();
    assert_eq!(config.font_family, "DejaVu Sans");
    assert_eq!(config.size, 8.0);
    assert_eq!(config.slant, Slant::Normal);
    assert_eq!(config.weight, Weight::Normal);
    assert_eq!(config.hint_style, HintStyle::Default);
    assert_eq!(config.antialias, Antialias::Default);
    assert_eq!(config.symbols, DEFAULT_SYMBOLS);
    assert_eq!(config.output, PathBuf::from("outfont.png"));
    assert!(config.font_file.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let yaml = r#"
font_family: "DejaVu Sans Mono"
size: 12
weight: bold
hint_style: none
"#;
    let config = BakeConfig::from_yaml_str(yaml).expect("parse config");
    assert_eq!(config.font_family, "DejaVu Sans Mono");
    assert_eq!(config.size, 12.0);
    assert_eq!(config.weight, Weight::Bold);
    assert_eq!(config.hint_style, HintStyle::None);
    assert_eq!(config.slant, Slant::Normal);
    assert_eq!(config.symbols, DEFAULT_SYMBOLS);
}

#[test]
fn test_config_empty_yaml_is_default() {
    let config = BakeConfig::from_yaml_str("\n").expect("parse empty config");
    assert_eq!(config, BakeConfig::default());
}

#[test]
fn test_config_rejects_unknown_slant() {
    let err = BakeConfig::from_yaml_str("slant: sideways\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
}

#[test]
fn test_config_rejects_non_positive_size() {
    let err = BakeConfig::from_yaml_str("size: 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)), "{err}");
}

#[test]
fn test_config_rejects_empty_symbols() {
    let err = BakeConfig::new().with_symbols("").validate().unwrap_err();
    assert!(err.to_string().contains("symbol set is empty"));
}

#[test]
fn test_config_load_from_file() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("style.yaml");
    fs::write(&path, "slant: italic\nantialias: subpixel\nsymbols: \"ab\"\n").expect("write");
    let config = BakeConfig::load(&path).expect("load config");
    assert_eq!(config.slant, Slant::Italic);
    assert_eq!(config.antialias, Antialias::Subpixel);
    assert_eq!(config.symbols, "ab");
}

#[test]
fn test_config_load_missing_file() {
    let err = BakeConfig::load(Path::new("/nonexistent/fontbake.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_symbol_chars_drops_repeats_in_order() {
    let config = BakeConfig::new().with_symbols("abcab d");
    assert_eq!(config.symbol_chars(), vec!['a', 'b', 'c', ' ', 'd']);
}

#[test]
fn test_pixel_size() {
    let config = BakeConfig::new().with_size(12.0);
    assert!((config.pixel_size() - 15.996).abs() < 1e-4);
}

#[test]
fn test_descriptor_path() {
    let config = BakeConfig::new().with_output("fonts/ui.png");
    assert_eq!(
        config.descriptor_path(),
        PathBuf::from("fonts/ui.png.fontdef.xml")
    );
    assert_eq!(
        descriptor_path_for(Path::new("a.png")),
        PathBuf::from("a.png.fontdef.xml")
    );
}

#[test]
fn test_config_rejects_symbols_xml_cannot_hold() {
    for symbols in ["A\u{1}", "\u{FFFE}", "ok\u{1B}"] {
        let err = BakeConfig::new().with_symbols(symbols).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "{err}");
    }
    assert!(BakeConfig::new().with_symbols("a\tb").validate().is_ok());
}

#[test]
fn test_io_error_message_names_path_once() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let err = BakeConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("absent.yaml"), "{msg}");
    assert!(std::error::Error::source(&err).is_some());
    let cause = std::error::Error::source(&err).unwrap().to_string();
    assert!(!msg.contains(&cause), "{msg}");
}
