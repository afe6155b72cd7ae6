//! The generate, compile and inspect stages, wired to the file system.
//!
//! Every output is fully encoded in memory first and then written with
//! [`write_atomic`], so a failed run never leaves a half-written file at
//! the destination path.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fontbake_atlas::{AtlasLayout, pack};
use fontbake_config::BakeConfig;
use fontbake_fonts::{GlyphSource, SwashGlyphSource, measure_glyphs, paint_atlas};
use fontbake_format::{CompiledFont, FontDescriptor};
use image::{ImageFormat, RgbaImage};

/// Atlas image plus its placement descriptor, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct GeneratedAtlas {
    pub image: RgbaImage,
    pub descriptor: FontDescriptor,
    pub layout: AtlasLayout,
}

/// Measure, pack and paint `symbols` from any glyph source.
pub fn generate_with<S: GlyphSource + ?Sized>(
    source: &mut S,
    symbols: &[char],
) -> Result<GeneratedAtlas> {
    let metrics = measure_glyphs(source, symbols).context("Failed to measure glyphs")?;
    let layout = pack(&metrics)?;
    let image = paint_atlas(source, &layout).context("Failed to paint atlas")?;
    let descriptor = FontDescriptor::from_layout(&layout, &source.font_metrics());
    log::info!(
        "Generated {}x{} atlas with {} glyphs, line height {}",
        layout.width,
        layout.height,
        layout.glyphs.len(),
        descriptor.line_height
    );
    Ok(GeneratedAtlas {
        image,
        descriptor,
        layout,
    })
}

/// Generate an atlas for a configuration using the system's fonts.
pub fn generate(config: &BakeConfig) -> Result<GeneratedAtlas> {
    config.validate()?;
    let mut source = SwashGlyphSource::new(config)?;
    generate_with(&mut source, &config.symbol_chars())
}

/// Encode both outputs, then write the image and the descriptor.
///
/// Both files are staged before either is moved into place. If any step
/// fails, neither output is left at its destination.
pub fn write_generated(
    atlas: &GeneratedAtlas,
    image_path: &Path,
    descriptor_path: &Path,
) -> Result<()> {
    let png = encode_png(&atlas.image)?;
    let xml = atlas.descriptor.to_xml()?;

    let image_temp = stage(image_path, &png)?;
    let descriptor_temp = match stage(descriptor_path, xml.as_bytes()) {
        Ok(temp) => temp,
        Err(e) => {
            discard(&image_temp);
            return Err(e);
        }
    };
    if let Err(e) = commit(&image_temp, image_path) {
        discard(&descriptor_temp);
        return Err(e);
    }
    if let Err(e) = commit(&descriptor_temp, descriptor_path) {
        discard(image_path);
        return Err(e);
    }

    log::info!(
        "Wrote {} and {}",
        image_path.display(),
        descriptor_path.display()
    );
    Ok(())
}

/// PNG bytes for an atlas image.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .context("Failed to encode atlas as PNG")?;
    Ok(out.into_inner())
}

/// Where `compile` writes when no output path is given: the atlas path
/// with its extension replaced by `font`.
pub fn default_compiled_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("font")
}

/// Compile an atlas image and its descriptor into a binary font at `output`.
pub fn compile_files(image_path: &Path, descriptor_path: &Path, output: &Path) -> Result<CompiledFont> {
    let image = fs::read(image_path)
        .with_context(|| format!("Failed to read atlas image {}", image_path.display()))?;
    let xml = fs::read_to_string(descriptor_path)
        .with_context(|| format!("Failed to read descriptor {}", descriptor_path.display()))?;

    match image::guess_format(&image) {
        Ok(format) => log::debug!("Atlas image looks like {:?}", format),
        Err(_) => log::warn!(
            "{} is not a recognized image format, embedding it anyway",
            image_path.display()
        ),
    }

    let descriptor = FontDescriptor::parse(&xml)
        .with_context(|| format!("Invalid descriptor {}", descriptor_path.display()))?;
    let font = CompiledFont::from_descriptor(&descriptor, image)
        .with_context(|| format!("Cannot compile {}", descriptor_path.display()))?;
    write_atomic(output, &font.to_bytes()?)?;

    log::info!(
        "Compiled {} glyphs into {} ({} bytes)",
        font.glyph_count(),
        output.display(),
        font.encoded_len()
    );
    Ok(font)
}

/// Load and validate a compiled font.
pub fn inspect(path: &Path) -> Result<CompiledFont> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    CompiledFont::parse(&data).with_context(|| format!("Invalid compiled font {}", path.display()))
}

/// Write `bytes` to `<path>.tmp`, then rename it over `path`.
///
/// The temporary file is removed if either step fails.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp = stage(path, bytes)?;
    commit(&temp, path)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    PathBuf::from(temp_name)
}

/// Write `bytes` next to `path` and return the temporary file's path.
fn stage(path: &Path, bytes: &[u8]) -> Result<PathBuf> {
    let temp = temp_path_for(path);
    if let Err(e) = fs::write(&temp, bytes) {
        discard(&temp);
        return Err(e).with_context(|| format!("Failed to write {}", path.display()));
    }
    Ok(temp)
}

/// Move a staged file into place, removing it if the rename fails.
fn commit(temp: &Path, path: &Path) -> Result<()> {
    if let Err(e) = fs::rename(temp, path) {
        discard(temp);
        return Err(e).with_context(|| format!("Failed to write {}", path.display()));
    }
    Ok(())
}

/// Best-effort removal of a file this run created.
fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        log::warn!("Failed to remove {}: {}", path.display(), e);
    }
}
