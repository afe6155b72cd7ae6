//! Command-line interface for fontbake.
//!
//! `generate` renders an atlas and descriptor from a font, `compile` turns
//! that pair into a binary font, `inspect` summarizes a compiled font.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use fontbake_config::{
    Antialias, BakeConfig, HintStyle, LogLevel, Slant, Weight, descriptor_path_for,
    read_symbols_file,
};

use crate::pipeline;

/// fontbake - Bitmap font atlas packer and binary font compiler
#[derive(Parser, Debug)]
#[command(name = "fontbake")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (off, error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render glyphs into an atlas image and write its placement descriptor
    Generate(GenerateArgs),

    /// Compile an atlas image and its descriptor into a binary font
    Compile {
        /// Atlas image produced by `generate`
        #[arg(value_name = "ATLAS")]
        image: PathBuf,

        /// Placement descriptor (default: <ATLAS>.fontdef.xml)
        #[arg(long, value_name = "FILE")]
        descriptor: Option<PathBuf>,

        /// Output file (default: <ATLAS> with extension .font)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print a summary of a compiled font
    Inspect {
        /// Compiled font file
        #[arg(value_name = "FILE")]
        font: PathBuf,

        /// Also report the pixel width of this text
        #[arg(long, value_name = "STRING")]
        text: Option<String>,
    },
}

/// Style options for `generate`. Anything not given here comes from the
/// config file, then from the built-in defaults.
#[derive(clap::Args, Debug, Default)]
pub struct GenerateArgs {
    /// YAML config file with style defaults
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Atlas image to write; the descriptor goes to <OUTPUT>.fontdef.xml
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Font family name, or a generic family such as sans-serif
    #[arg(long, value_name = "FACE")]
    pub font: Option<String>,

    /// Render from this font file instead of an installed family
    #[arg(long, value_name = "PATH")]
    pub font_file: Option<PathBuf>,

    /// Font size in points
    #[arg(long, value_name = "N")]
    pub size: Option<f32>,

    /// normal, italic or oblique
    #[arg(long, value_name = "SLANT")]
    pub slant: Option<Slant>,

    /// normal or bold
    #[arg(long, value_name = "WEIGHT")]
    pub weight: Option<Weight>,

    /// default, none, slight, medium or full
    #[arg(long, value_name = "STYLE")]
    pub hint_style: Option<HintStyle>,

    /// default, none, gray or subpixel
    #[arg(long, value_name = "MODE")]
    pub antialias: Option<Antialias>,

    /// File whose contents are the symbols to render
    #[arg(long, value_name = "FILE")]
    pub symbols: Option<PathBuf>,
}

impl GenerateArgs {
    /// Merge these options over the config file (if any) and defaults.
    pub fn to_config(&self) -> Result<BakeConfig> {
        let mut config = match &self.config {
            Some(path) => BakeConfig::load(path)?,
            None => BakeConfig::default(),
        };

        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(font) = &self.font {
            config.font_family = font.clone();
        }
        if let Some(font_file) = &self.font_file {
            config.font_file = Some(font_file.clone());
        }
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(slant) = self.slant {
            config.slant = slant;
        }
        if let Some(weight) = self.weight {
            config.weight = weight;
        }
        if let Some(hint_style) = self.hint_style {
            config.hint_style = hint_style;
        }
        if let Some(antialias) = self.antialias {
            config.antialias = antialias;
        }
        if let Some(path) = &self.symbols {
            config.symbols = read_symbols_file(path)?;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate(args) => {
            let config = args.to_config()?;
            let atlas = pipeline::generate(&config)?;
            pipeline::write_generated(&atlas, &config.output, &config.descriptor_path())?;
            println!(
                "{}: {}x{} atlas, {} glyphs",
                config.output.display(),
                atlas.layout.width,
                atlas.layout.height,
                atlas.layout.glyphs.len()
            );
        }
        Commands::Compile {
            image,
            descriptor,
            output,
        } => {
            let descriptor = descriptor.unwrap_or_else(|| descriptor_path_for(&image));
            let output = output.unwrap_or_else(|| pipeline::default_compiled_path(&image));
            let font = pipeline::compile_files(&image, &descriptor, &output)?;
            println!(
                "{}: {} glyphs, {} bytes",
                output.display(),
                font.glyph_count(),
                font.encoded_len()
            );
        }
        Commands::Inspect { font, text } => print_summary(&font, text.as_deref())?,
    }
    Ok(())
}

fn print_summary(path: &Path, text: Option<&str>) -> Result<()> {
    let font = pipeline::inspect(path)?;
    println!("File:        {}", path.display());
    println!("Glyphs:      {}", font.glyph_count());
    println!("Line height: {}", font.line_height);
    println!("Image bytes: {}", font.image.len());
    if let Some(text) = text {
        let missing: String = text.chars().filter(|c| font.lookup(*c).is_none()).collect();
        println!("Text width:  {} ({:?})", font.text_width(text), text);
        if !missing.is_empty() {
            println!("Unmapped:    {:?}", missing);
        }
    }
    Ok(())
}
