//! End-to-end tests for the forward and reverse pipelines, driven by a
//! synthetic font so no font files are needed.

use glyphaa::builder::{self, BuildOptions};
use glyphaa::font::GlyphRasterizer;
use glyphaa::{
    compositor, driver, imageio, AaGrid, Calibration, CodeBook, GlyphError, Mapper, MonoBitmap,
    Signature, CODE_SIZE, FONT_WIDTH,
};
use image::{GrayImage, Luma};
use std::collections::HashSet;

/// Glyph for codepoint `0x4E00 + n` inks the pixels whose bit is set in
/// `n` when the 15×15 sampled area is split into nine 5×5 cells; cell `i`
/// is fully inked when bit `i` is set. Everything else is missing.
struct CellFont;

const BASE: u32 = 0x4E00;

impl GlyphRasterizer for CellFont {
    fn rasterize(&self, codepoint: u32) -> Result<MonoBitmap, GlyphError> {
        let n = codepoint
            .checked_sub(BASE)
            .filter(|&n| n < 512)
            .ok_or(GlyphError::GlyphNotFound(codepoint))?;
        let mut bitmap = MonoBitmap::new(FONT_WIDTH, FONT_WIDTH);
        for y in 0..15 {
            for x in 0..15 {
                let cell = (y / 5) * 3 + x / 5;
                if n & (1 << cell) != 0 {
                    bitmap.set_ink(x, y);
                }
            }
        }
        Ok(bitmap)
    }
}

fn cell_book() -> CodeBook {
    let options = BuildOptions { range: 0x4E00..=0x4FFF, exclude: Vec::new() };
    builder::build(&CellFont, &options).unwrap()
}

/// Tile the signatures of `codepoints` (row-major, `cols` per row) as 3×3
/// sample blocks.
fn tile(book: &CodeBook, codepoints: &[u32], cols: usize) -> GrayImage {
    let rows = codepoints.len() / cols;
    GrayImage::from_fn((cols * 3) as u32, (rows * 3) as u32, |x, y| {
        let cp = codepoints[(y / 3) as usize * cols + (x / 3) as usize];
        let cell = book.iter().find(|c| c.codepoint == cp).unwrap();
        Luma([cell.signature.0[((y % 3) * 3 + x % 3) as usize]])
    })
}

#[test]
fn test_book_has_one_cell_per_pattern() {
    let book = cell_book();
    assert_eq!(book.len(), 512);
    let distinct: HashSet<Signature> = book.iter().map(|c| c.signature).collect();
    assert_eq!(distinct.len(), 512);
    assert_eq!(book.floor(), Some(0));
    // the blank glyph is the lightest entry
    assert_eq!(book.cells().last().unwrap().codepoint, BASE);
}

#[test]
fn test_tiled_glyphs_are_recovered() {
    let book = cell_book();
    let codepoints: Vec<u32> = (0..48).map(|i| BASE + (i * 37 % 512)).collect();
    let image = tile(&book, &codepoints, 8);
    for workers in [1, 2, 5, 17] {
        let grid = driver::map_image(&book, &image, workers).unwrap();
        assert_eq!((grid.width(), grid.height()), (8, 6));
        assert_eq!(grid.cells(), codepoints.as_slice(), "workers={workers}");
    }
}

#[test]
fn test_partition_invariance_on_photo_like_input() {
    let book = cell_book();
    let image = GrayImage::from_fn(90, 51, |x, y| {
        let d = ((x as i32 - 45).pow(2) + (y as i32 - 25).pow(2)) as f32;
        Luma([(255.0 * (1.0 - (d / 3000.0).min(1.0))) as u8])
    });
    let mapper = Mapper::new(book);
    let reference = mapper.convert(image.clone()).unwrap();
    for workers in [1, 2, 5, 17] {
        let mapper = Mapper::new(mapper.code_book().clone()).with_workers(workers);
        assert_eq!(mapper.convert(image.clone()).unwrap(), reference);
    }
}

#[test]
fn test_code_book_text_round_trip() {
    let book = cell_book();
    let text = book.to_text().unwrap();
    assert_eq!(text.lines().count(), 512);
    let parsed = CodeBook::parse(&text).unwrap();
    let pairs = |b: &CodeBook| -> HashSet<(Signature, u32)> {
        b.iter().map(|c| (c.signature, c.codepoint)).collect()
    };
    assert_eq!(pairs(&book), pairs(&parsed));
    assert_eq!(parsed.len(), book.len());
}

#[test]
fn test_scenario_dark_block_prefers_black_glyph() {
    let text = "00,00,00,00,00,00,00,00,00,Ａ\nff,ff,ff,ff,ff,ff,ff,ff,ff,Ｂ\n";
    let book = CodeBook::parse(text).unwrap();
    let image = GrayImage::from_pixel(3, 3, Luma([10]));
    let grid = Mapper::new(book).with_calibration(Calibration::None).convert(image).unwrap();
    assert_eq!(grid.cells(), &['Ａ' as u32]);
}

#[test]
fn test_forward_then_reverse_sizes() {
    let book = cell_book();
    let image = GrayImage::from_fn(6, 3, |x, _| Luma([if x < 3 { 0 } else { 255 }]));
    let grid = Mapper::new(book).convert(image).unwrap();
    let text = grid.to_text().unwrap();
    assert!(text.starts_with("2 1\n"));

    let reread = AaGrid::parse(&text).unwrap();
    let rendered = compositor::render(&reread, &CellFont).unwrap();
    assert_eq!(rendered.dimensions(), (2 * FONT_WIDTH as u32, FONT_WIDTH as u32));
    // left glyph is solid ink over its sampled area, right glyph is blank
    assert_eq!(rendered.get_pixel(7, 7).0[0], compositor::INK);
    assert_eq!(rendered.get_pixel(16 + 7, 7).0[0], compositor::PAPER);
}

#[test]
fn test_reverse_rejects_unknown_glyph() {
    let grid = AaGrid::parse("2 1\n一あ\n").unwrap();
    assert!(matches!(
        compositor::render(&grid, &CellFont),
        Err(GlyphError::GlyphNotFound(0x3042))
    ));
}

#[test]
fn test_files_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let book = cell_book();

    let book_path = dir.path().join("book.txt");
    let mut file = std::fs::File::create(&book_path).unwrap();
    book.write_to(&mut file).unwrap();
    drop(file);
    assert_eq!(CodeBook::open(&book_path).unwrap(), book);

    let image_path = dir.path().join("in.png");
    GrayImage::from_fn(12, 9, |x, y| Luma([((x * 20 + y * 7) % 256) as u8]))
        .save(&image_path)
        .unwrap();
    let grid = Mapper::new(book).convert(imageio::open(&image_path).unwrap()).unwrap();

    let aa_path = dir.path().join("out.txt");
    std::fs::write(&aa_path, grid.to_text().unwrap()).unwrap();
    let reread = AaGrid::open(&aa_path).unwrap();
    assert_eq!(reread, grid);

    let png_path = dir.path().join("out.png");
    let rendered = compositor::render(&reread, &CellFont).unwrap();
    imageio::save_bilevel(&rendered, &png_path).unwrap();
    let decoded = imageio::open(&png_path).unwrap();
    assert_eq!(decoded.dimensions(), (4 * 16, 3 * 16));
    assert!(decoded.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
}

#[test]
fn test_missing_inputs_report_path() {
    let err = CodeBook::open("/nonexistent/book.txt").unwrap_err();
    assert!(matches!(err, GlyphError::InputOpen { .. }));
    assert!(err.to_string().contains("/nonexistent/book.txt"));
    assert!(matches!(imageio::open("/nonexistent/in.png"), Err(GlyphError::InputOpen { .. })));
    assert!(matches!(AaGrid::open("/nonexistent/aa.txt"), Err(GlyphError::InputOpen { .. })));
}

#[test]
fn test_all_zero_signature_constant() {
    let black = Signature::new([0; CODE_SIZE]);
    let book = cell_book();
    assert_eq!(book.cells()[0].signature, black);
    assert_eq!(book.cells()[0].codepoint, BASE + 511);
}
