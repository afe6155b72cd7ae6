//! fontbake: bitmap font atlas packer and binary font compiler.
//!
//! The work is split across the workspace crates:
//! - `fontbake-config`: style options and symbol sets
//! - `fontbake-fonts`: face lookup, glyph metrics and rasterization
//! - `fontbake-atlas`: canvas sizing and glyph placement
//! - `fontbake-format`: the XML descriptor and the compiled binary font
//!
//! This crate wires them into the `generate`, `compile` and `inspect`
//! commands.

pub mod cli;
pub mod logging;
pub mod pipeline;

pub use pipeline::{
    GeneratedAtlas, compile_files, default_compiled_path, encode_png, generate, generate_with,
    inspect, write_atomic, write_generated,
};
