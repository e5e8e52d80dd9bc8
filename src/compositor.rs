//! Reverse direction: paint an AA grid back into a bilevel image using the
//! glyph bitmaps themselves.

use crate::aa::AaGrid;
use crate::bitmap::MonoBitmap;
use crate::font::GlyphRasterizer;
use crate::{GlyphError, Result, FONT_WIDTH};
use image::{GrayImage, Luma};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Sample value for ink.
pub const INK: u8 = 0;
/// Sample value for paper.
pub const PAPER: u8 = 1;

/// Render `grid` at `FONT_WIDTH` pixels per cell. The result holds 0 for
/// ink and 1 for paper, ready for [`crate::imageio::encode_bilevel`].
///
/// A codepoint without a usable full-width glyph is an error.
pub fn render<R: GlyphRasterizer + ?Sized>(grid: &AaGrid, rasterizer: &R) -> Result<GrayImage> {
    let width = pixels(grid.width())?;
    let height = pixels(grid.height())?;
    let mut image = GrayImage::from_pixel(width, height, Luma([PAPER]));
    let mut glyphs: HashMap<u32, MonoBitmap> = HashMap::new();

    for (y, row) in grid.rows().enumerate() {
        for (x, &codepoint) in row.iter().enumerate() {
            let bitmap = match glyphs.entry(codepoint) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => e.insert(glyph(rasterizer, codepoint)?),
            };
            blit(&mut image, bitmap, x * FONT_WIDTH, y * FONT_WIDTH);
        }
    }
    log::info!("Rendered {} distinct glyphs into {width}x{height}", glyphs.len());
    Ok(image)
}

fn pixels(cells: usize) -> Result<u32> {
    cells
        .checked_mul(FONT_WIDTH)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| GlyphError::Format(format!("{cells} cells do not fit in an image")))
}

fn glyph<R: GlyphRasterizer + ?Sized>(rasterizer: &R, codepoint: u32) -> Result<MonoBitmap> {
    let bitmap = rasterizer.rasterize(codepoint)?;
    if bitmap.width != FONT_WIDTH {
        return Err(GlyphError::NotFullWidth { codepoint, width: bitmap.width });
    }
    Ok(bitmap)
}

fn blit(image: &mut GrayImage, bitmap: &MonoBitmap, x0: usize, y0: usize) {
    for fy in 0..bitmap.rows.min(FONT_WIDTH) {
        for fx in 0..FONT_WIDTH {
            if bitmap.pixel(fx, fy) == Some(true) {
                image.put_pixel((x0 + fx) as u32, (y0 + fy) as u32, Luma([INK]));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Glyph `n` inks column `n % 16`; 'A' is half-width; 'B' is missing.
    struct Columns;

    impl GlyphRasterizer for Columns {
        fn rasterize(&self, codepoint: u32) -> Result<MonoBitmap> {
            match codepoint {
                0x41 => Ok(MonoBitmap::new(8, FONT_WIDTH)),
                0x42 => Err(GlyphError::GlyphNotFound(codepoint)),
                _ => {
                    let mut bitmap = MonoBitmap::new(FONT_WIDTH, FONT_WIDTH);
                    for y in 0..FONT_WIDTH {
                        bitmap.set_ink(codepoint as usize % FONT_WIDTH, y);
                    }
                    Ok(bitmap)
                }
            }
        }
    }

    #[test]
    fn test_render_size() {
        let grid = AaGrid::parse("2 1\nあい\n").unwrap();
        let image = render(&grid, &Columns).unwrap();
        assert_eq!(image.dimensions(), (32, 16));
    }

    #[test]
    fn test_render_places_glyphs() {
        // 0x3042 % 16 = 2, 0x3044 % 16 = 4
        let grid = AaGrid::parse("1 2\nあ\nい\n").unwrap();
        let image = render(&grid, &Columns).unwrap();
        assert_eq!(image.get_pixel(2, 0).0[0], INK);
        assert_eq!(image.get_pixel(2, 15).0[0], INK);
        assert_eq!(image.get_pixel(3, 0).0[0], PAPER);
        assert_eq!(image.get_pixel(4, 16).0[0], INK);
        assert_eq!(image.get_pixel(2, 16).0[0], PAPER);
        let ink = image.pixels().filter(|p| p.0[0] == INK).count();
        assert_eq!(ink, 32);
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let grid = AaGrid::new(1 << 28, 0, Vec::new()).unwrap();
        assert!(matches!(render(&grid, &Columns), Err(GlyphError::Format(_))));
    }

    #[test]
    fn test_missing_glyph_is_fatal() {
        let grid = AaGrid::parse("2 1\nあB\n").unwrap();
        assert!(matches!(render(&grid, &Columns), Err(GlyphError::GlyphNotFound(0x42))));
    }

    #[test]
    fn test_half_width_glyph_is_fatal() {
        let grid = AaGrid::parse("1 1\nA\n").unwrap();
        assert!(matches!(
            render(&grid, &Columns),
            Err(GlyphError::NotFullWidth { codepoint: 0x41, width: 8 })
        ));
    }
}
