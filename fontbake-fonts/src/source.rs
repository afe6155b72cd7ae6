//! Glyph metrics and coverage from a font face.

use std::collections::HashMap;

use fontbake_atlas::{FontMetrics, GlyphMetrics};
use fontbake_config::{Antialias, BakeConfig};
use image::{Rgba, RgbaImage};
use swash::scale::image::{Content, Image};
use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::Format;

use crate::{FontError, FontFace};

/// Supplies metrics and pixels for symbols at one configured style.
///
/// `bearing_y` in [`GlyphMetrics`] is y-down: the offset from the baseline
/// to the top edge of the ink box, negative above the baseline.
pub trait GlyphSource {
    /// Font-wide vertical metrics in pixels
    fn font_metrics(&self) -> FontMetrics;

    /// Ink box and advance of `symbol`.
    fn glyph_metrics(&mut self, symbol: char) -> Result<GlyphMetrics, FontError>;

    /// Draw `symbol` white with coverage alpha, pen origin (baseline) at
    /// `(pen_x, pen_y)`. Pixels outside the canvas are clipped.
    fn paint_glyph(
        &mut self,
        symbol: char,
        canvas: &mut RgbaImage,
        pen_x: i32,
        pen_y: i32,
    ) -> Result<(), FontError>;
}

/// Coverage for one glyph: a single alpha byte per pixel.
#[derive(Debug, Clone, Default)]
struct RasterizedGlyph {
    left: i32,
    top: i32,
    width: u32,
    height: u32,
    coverage: Vec<u8>,
}

/// [`GlyphSource`] backed by swash outline rendering.
///
/// Each symbol is rasterized once; the coverage is reused when painting.
pub struct SwashGlyphSource {
    face: FontFace,
    context: ScaleContext,
    pixel_size: f32,
    hint: bool,
    antialias: Antialias,
    rasterized: HashMap<char, RasterizedGlyph>,
}

impl SwashGlyphSource {
    /// Resolve the configured face and prepare to render at its pixel size.
    pub fn new(config: &BakeConfig) -> Result<Self, FontError> {
        let face = FontFace::resolve(config)?;
        Ok(Self::with_face(
            face,
            config.pixel_size(),
            config.hint_style.is_hinted(),
            config.antialias,
        ))
    }

    pub fn with_face(face: FontFace, pixel_size: f32, hint: bool, antialias: Antialias) -> Self {
        log::debug!(
            "Rendering '{}' at {:.2}px (hinting {}, antialias {})",
            face.name(),
            pixel_size,
            if hint { "on" } else { "off" },
            antialias
        );
        Self {
            face,
            context: ScaleContext::new(),
            pixel_size,
            hint,
            antialias,
            rasterized: HashMap::new(),
        }
    }

    /// Pixels per font unit.
    fn scale(&self) -> f32 {
        let units_per_em = self.face.as_font_ref().metrics(&[]).units_per_em;
        if units_per_em == 0 {
            return 0.0;
        }
        self.pixel_size / units_per_em as f32
    }

    fn glyph_id(&self, symbol: char) -> u16 {
        let id = self.face.as_font_ref().charmap().map(symbol);
        if id == 0 {
            log::warn!(
                "Font '{}' has no glyph for {:?} (U+{:04X}), using .notdef",
                self.face.name(),
                symbol,
                u32::from(symbol)
            );
        }
        id
    }

    fn rasterize(&mut self, symbol: char) -> &RasterizedGlyph {
        if !self.rasterized.contains_key(&symbol) {
            let glyph_id = self.glyph_id(symbol);
            let font = self.face.as_font_ref();
            let mut scaler = self
                .context
                .builder(font)
                .size(self.pixel_size)
                .hint(self.hint)
                .build();

            let format = match self.antialias {
                Antialias::Subpixel => Format::Subpixel,
                Antialias::Default | Antialias::None | Antialias::Gray => Format::Alpha,
            };
            let raster = match Render::new(&[Source::Outline])
                .format(format)
                .render(&mut scaler, glyph_id)
            {
                Some(image) => to_coverage(&image, self.antialias),
                None => {
                    // Outline-less glyphs (space) still get metrics, just no ink.
                    log::debug!("No outline for {:?}, treating as empty", symbol);
                    RasterizedGlyph::default()
                }
            };
            self.rasterized.insert(symbol, raster);
        }
        &self.rasterized[&symbol]
    }
}

impl GlyphSource for SwashGlyphSource {
    fn font_metrics(&self) -> FontMetrics {
        let metrics = self.face.as_font_ref().metrics(&[]);
        let scale = self.scale();
        let ascent = metrics.ascent * scale;
        let descent = metrics.descent * scale;
        let leading = metrics.leading * scale;
        FontMetrics {
            ascent,
            descent,
            line_height: ascent + descent + leading,
        }
    }

    fn glyph_metrics(&mut self, symbol: char) -> Result<GlyphMetrics, FontError> {
        let glyph_id = self.glyph_id(symbol);
        let advance = self
            .face
            .as_font_ref()
            .glyph_metrics(&[])
            .advance_width(glyph_id)
            * self.scale();

        let raster = self.rasterize(symbol);
        Ok(GlyphMetrics {
            symbol,
            bearing_x: raster.left,
            bearing_y: -raster.top,
            width: raster.width,
            height: raster.height,
            advance_x: advance.round().max(0.0) as u32,
            advance_y: 0,
        })
    }

    fn paint_glyph(
        &mut self,
        symbol: char,
        canvas: &mut RgbaImage,
        pen_x: i32,
        pen_y: i32,
    ) -> Result<(), FontError> {
        let raster = self.rasterize(symbol);
        blit_coverage(
            canvas,
            pen_x + raster.left,
            pen_y - raster.top,
            raster.width,
            raster.height,
            &raster.coverage,
        );
        Ok(())
    }
}

/// Write white pixels with the given coverage as alpha, top-left at `(x, y)`.
///
/// Pixels falling outside the canvas are skipped.
pub fn blit_coverage(canvas: &mut RgbaImage, x: i32, y: i32, width: u32, height: u32, coverage: &[u8]) {
    if width == 0 {
        return;
    }
    for (i, &alpha) in coverage.iter().enumerate().take((width * height) as usize) {
        let px = i64::from(x) + (i as u32 % width) as i64;
        let py = i64::from(y) + (i as u32 / width) as i64;
        if px < 0 || py < 0 || px >= i64::from(canvas.width()) || py >= i64::from(canvas.height()) {
            continue;
        }
        canvas.put_pixel(px as u32, py as u32, Rgba([255, 255, 255, alpha]));
    }
}

fn to_coverage(image: &Image, antialias: Antialias) -> RasterizedGlyph {
    let width = image.placement.width;
    let height = image.placement.height;
    let coverage = match image.content {
        Content::Mask => image
            .data
            .iter()
            .map(|&mask| mask_alpha(mask, antialias))
            .collect(),
        Content::SubpixelMask => subpixel_alpha(&image.data, width, height),
        // Only outlines are requested, but keep the alpha if a color image shows up.
        Content::Color => image.data.chunks_exact(4).map(|px| px[3]).collect(),
    };
    RasterizedGlyph {
        left: image.placement.left,
        top: image.placement.top,
        width,
        height,
        coverage,
    }
}

/// Alpha for one grayscale coverage sample.
///
/// Without antialiasing coverage is thresholded to crisp edges.
pub fn mask_alpha(mask: u8, antialias: Antialias) -> u8 {
    match antialias {
        Antialias::None => {
            if mask > 127 {
                255
            } else {
                0
            }
        }
        Antialias::Default | Antialias::Gray | Antialias::Subpixel => mask,
    }
}

/// Fold a subpixel mask into one alpha byte per pixel.
///
/// swash emits 3 or 4 bytes per pixel depending on the build; alpha comes
/// from the luminance of the RGB channels, ignoring any packed alpha.
pub fn subpixel_alpha(data: &[u8], width: u32, height: u32) -> Vec<u8> {
    let pixels = width as usize * height as usize;
    let stride = if pixels > 0 { data.len() / pixels } else { 0 };

    match stride {
        3 | 4 => data
            .chunks_exact(stride)
            .map(|px| {
                let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
                ((r * 299 + g * 587 + b * 114) / 1000) as u8
            })
            .collect(),
        _ => vec![255; pixels],
    }
}
