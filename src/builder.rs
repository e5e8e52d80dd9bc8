//! Code book construction: sweep a codepoint range through a rasterizer
//! and keep every glyph that comes back as a full-width bitmap.

use crate::codebook::{CodeBook, CodeCell};
use crate::config::{BuildConfig, FontConfig};
use crate::font::{self, GlyphRasterizer};
use crate::signature::Signature;
use crate::Result;
use std::ops::RangeInclusive;

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub range: RangeInclusive<u32>,
    pub exclude: Vec<u32>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { range: 0x80..=0xFFFF, exclude: Vec::new() }
    }
}

impl From<&BuildConfig> for BuildOptions {
    fn from(config: &BuildConfig) -> Self {
        Self { range: config.range(), exclude: config.excluded().to_vec() }
    }
}

/// Build a sorted code book. Unusable glyphs are skipped; any other error
/// aborts the sweep.
pub fn build<R: GlyphRasterizer + ?Sized>(
    rasterizer: &R,
    options: &BuildOptions,
) -> Result<CodeBook> {
    let mut book = CodeBook::new();
    let mut skipped = 0usize;
    for codepoint in options.range.clone() {
        if options.exclude.contains(&codepoint) {
            continue;
        }
        match rasterizer.rasterize(codepoint) {
            Ok(bitmap) => book.push(CodeCell::new(Signature::from_bitmap(&bitmap), codepoint)),
            Err(e) if e.is_glyph_unavailable() => skipped += 1,
            Err(e) => return Err(e),
        }
    }
    book.sort();
    log::debug!("Skipped {skipped} codepoints without a usable glyph");
    log::info!("Built code book with {} cells in {} groups", book.len(), book.groups().count());
    Ok(book)
}

/// Load the configured font and build its code book.
pub fn build_from_font(font: &FontConfig, options: &BuildOptions) -> Result<CodeBook> {
    let data = font::read(font)?;
    let rasterizer = font::open(&data, font)?;
    build(&*rasterizer, options)
}
