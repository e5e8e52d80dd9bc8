//! Font access: turn codepoints into full-width monochrome glyph bitmaps.
//!
//! Two sources are supported. [`StrikeFont`] reads the embedded bitmap
//! strikes of fonts such as MS Gothic through ttf-parser. [`OutlineFont`]
//! rasterizes outlines with fontdue and thresholds the coverage, for fonts
//! that ship no strikes.

use crate::bitmap::MonoBitmap;
use crate::config::{FontConfig, RasterMode};
use crate::{GlyphError, Result, FONT_WIDTH};
use fontdue::{Font, FontSettings};
use ttf_parser::{Face, GlyphId, RasterImageFormat};

/// Produces the glyph bitmap for a codepoint.
///
/// Per-glyph failures are reported as [`GlyphError::GlyphNotFound`],
/// [`GlyphError::NotBitmap`] or [`GlyphError::NotFullWidth`].
pub trait GlyphRasterizer {
    fn rasterize(&self, codepoint: u32) -> Result<MonoBitmap>;
}

impl<R: GlyphRasterizer + ?Sized> GlyphRasterizer for Box<R> {
    fn rasterize(&self, codepoint: u32) -> Result<MonoBitmap> {
        (**self).rasterize(codepoint)
    }
}

/// Embedded bitmap strike of a TrueType/OpenType face.
pub struct StrikeFont<'a> {
    face: Face<'a>,
    pixels_per_em: u16,
}

impl<'a> StrikeFont<'a> {
    /// Parse face `index` of a font or collection and select its
    /// `pixel_height` strike.
    pub fn load(data: &'a [u8], index: u32, pixel_height: u16) -> Result<Self> {
        let face = Face::parse(data, index).map_err(|e| GlyphError::Font(e.to_string()))?;
        let font = Self { face, pixels_per_em: pixel_height };
        font.select_strike()?;
        log::info!("Selected {pixel_height}px strike ({} glyphs)", font.face.number_of_glyphs());
        Ok(font)
    }

    /// A strike exists if any glyph carries a monochrome bitmap at exactly
    /// this size.
    fn select_strike(&self) -> Result<()> {
        let found = (0..self.face.number_of_glyphs()).any(|id| {
            self.face
                .glyph_raster_image(GlyphId(id), self.pixels_per_em)
                .is_some_and(|img| img.pixels_per_em == self.pixels_per_em && is_mono(img.format))
        });
        if found {
            Ok(())
        } else {
            Err(GlyphError::StrikeNotFound(self.pixels_per_em))
        }
    }
}

fn is_mono(format: RasterImageFormat) -> bool {
    matches!(format, RasterImageFormat::BitmapMono | RasterImageFormat::BitmapMonoPacked)
}

impl GlyphRasterizer for StrikeFont<'_> {
    fn rasterize(&self, codepoint: u32) -> Result<MonoBitmap> {
        let glyph = char::from_u32(codepoint)
            .and_then(|ch| self.face.glyph_index(ch))
            .filter(|id| id.0 != 0)
            .ok_or(GlyphError::GlyphNotFound(codepoint))?;
        let image = self
            .face
            .glyph_raster_image(glyph, self.pixels_per_em)
            .filter(|img| img.pixels_per_em == self.pixels_per_em)
            .ok_or(GlyphError::NotBitmap(codepoint))?;

        let (width, rows) = (image.width as usize, image.height as usize);
        if width != FONT_WIDTH {
            return Err(GlyphError::NotFullWidth { codepoint, width });
        }
        decode_strike(image.format, width, rows, image.data).ok_or(GlyphError::NotBitmap(codepoint))
    }
}

/// Unpack a monochrome strike image. `BitmapMono` rows are byte aligned;
/// `BitmapMonoPacked` rows run on with no padding.
fn decode_strike(
    format: RasterImageFormat,
    width: usize,
    rows: usize,
    data: &[u8],
) -> Option<MonoBitmap> {
    match format {
        RasterImageFormat::BitmapMono => {
            Some(MonoBitmap { width, rows, pitch: width.div_ceil(8), buffer: data.to_vec() })
        }
        RasterImageFormat::BitmapMonoPacked => Some(MonoBitmap::from_packed(width, rows, data)),
        _ => None,
    }
}

/// Outline font rasterized at a fixed pixel height and thresholded to one
/// bit, placed in a `FONT_WIDTH` square em box on the font's baseline.
pub struct OutlineFont {
    font: Font,
    px: f32,
    baseline: i32,
    threshold: u8,
}

impl OutlineFont {
    pub fn load(data: &[u8], index: u32, pixel_height: u16, threshold: u8) -> Result<Self> {
        let px = pixel_height as f32;
        let settings =
            FontSettings { collection_index: index, scale: px, ..FontSettings::default() };
        let font = Font::from_bytes(data, settings).map_err(|e| GlyphError::Font(e.to_string()))?;
        let metrics = font
            .horizontal_line_metrics(px)
            .ok_or(GlyphError::StrikeNotFound(pixel_height))?;
        log::info!("Rasterizing outlines at {pixel_height}px ({} glyphs)", font.glyph_count());
        Ok(Self { font, px, baseline: metrics.ascent.round() as i32, threshold: threshold.max(1) })
    }
}

impl GlyphRasterizer for OutlineFont {
    fn rasterize(&self, codepoint: u32) -> Result<MonoBitmap> {
        let ch = char::from_u32(codepoint).ok_or(GlyphError::GlyphNotFound(codepoint))?;
        if self.font.lookup_glyph_index(ch) == 0 {
            return Err(GlyphError::GlyphNotFound(codepoint));
        }
        let (metrics, coverage) = self.font.rasterize(ch, self.px);
        let advance = metrics.advance_width.round() as usize;
        if advance != FONT_WIDTH {
            return Err(GlyphError::NotFullWidth { codepoint, width: advance });
        }

        let mut bitmap = MonoBitmap::new(FONT_WIDTH, FONT_WIDTH);
        let top = self.baseline - metrics.ymin - metrics.height as i32;
        for (i, &c) in coverage.iter().enumerate() {
            if c < self.threshold {
                continue;
            }
            let x = metrics.xmin + (i % metrics.width) as i32;
            let y = top + (i / metrics.width) as i32;
            if x >= 0 && y >= 0 {
                bitmap.set_ink(x as usize, y as usize);
            }
        }
        Ok(bitmap)
    }
}

/// Open the rasterizer described by `config` over already-read font bytes.
pub fn open<'a>(data: &'a [u8], config: &FontConfig) -> Result<Box<dyn GlyphRasterizer + 'a>> {
    Ok(match config.raster {
        RasterMode::Strike => {
            Box::new(StrikeFont::load(data, config.face_index, config.pixel_height)?)
        }
        RasterMode::Outline => Box::new(OutlineFont::load(
            data,
            config.face_index,
            config.pixel_height,
            config.threshold,
        )?),
    })
}

/// Read the font file named by `config`.
pub fn read(config: &FontConfig) -> Result<Vec<u8>> {
    let data = std::fs::read(&config.path).map_err(|e| {
        GlyphError::Font(format!("cannot read {}: {e}", config.path.display()))
    })?;
    log::info!("Loaded font {}", config.path.display());
    Ok(data)
}
