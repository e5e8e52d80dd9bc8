//! Signature codec: reduces a glyph bitmap or an image block to a 3×3 grid
//! of quantized luminance.

use crate::bitmap::MonoBitmap;
use crate::{CELL_WIDTH, CODE_SIZE, CODE_WIDTH};
use image::GrayImage;
use std::cmp::Ordering;

/// Nine luminance samples, row-major, 0 = darkest, 255 = lightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Signature(pub [u8; CODE_SIZE]);

impl Signature {
    pub const fn new(samples: [u8; CODE_SIZE]) -> Self {
        Self(samples)
    }

    pub fn samples(&self) -> &[u8; CODE_SIZE] {
        &self.0
    }

    /// Encode a glyph bitmap.
    ///
    /// Each cell covers `CELL_WIDTH`² glyph pixels and scores the paper
    /// pixels in it, scaled to 0..=255. Pixels beyond the signature grid are
    /// not sampled; cells the bitmap does not reach stay 0.
    pub fn from_bitmap(bitmap: &MonoBitmap) -> Self {
        let span = CODE_WIDTH * CELL_WIDTH;
        let mut paper = [0u32; CODE_SIZE];
        for y in 0..bitmap.rows.min(span) {
            for x in 0..bitmap.width.min(span) {
                if bitmap.pixel(x, y) == Some(false) {
                    paper[(y / CELL_WIDTH) * CODE_WIDTH + x / CELL_WIDTH] += 1;
                }
            }
        }
        Self(paper.map(|n| scale(n, CELL_WIDTH * CELL_WIDTH)))
    }

    /// Encode the `cell`²-sample cells of a grayscale region whose top-left
    /// corner is `(x0, y0)`. Samples outside the image count as 0.
    pub fn from_region(image: &GrayImage, x0: u32, y0: u32, cell: u32) -> Self {
        let (width, height) = image.dimensions();
        let mut sums = [0u32; CODE_SIZE];
        for (i, sum) in sums.iter_mut().enumerate() {
            let cx = x0 + (i % CODE_WIDTH) as u32 * cell;
            let cy = y0 + (i / CODE_WIDTH) as u32 * cell;
            for y in cy..(cy + cell).min(height) {
                for x in cx..(cx + cell).min(width) {
                    *sum += image.get_pixel(x, y).0[0] as u32;
                }
            }
        }
        let capacity = (cell * cell).max(1);
        Self(sums.map(|s| (s / capacity).min(255) as u8))
    }

    /// Encode block `(bx, by)` of the block grid, one sample per cell.
    pub fn from_block(image: &GrayImage, bx: u32, by: u32) -> Self {
        let edge = CODE_WIDTH as u32;
        Self::from_region(image, bx * edge, by * edge, 1)
    }

    /// L1 distance.
    pub fn distance(&self, other: &Signature) -> u32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(&a, &b)| a.abs_diff(b) as u32)
            .sum()
    }

    /// Distance from the all-zero signature.
    pub fn total(&self) -> u32 {
        self.0.iter().map(|&s| s as u32).sum()
    }
}

fn scale(count: u32, capacity: usize) -> u8 {
    (count * 255 / capacity as u32).min(255) as u8
}

/// Code book order: total luminance first, then samples lexicographically.
impl Ord for Signature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total().cmp(&other.total()).then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Signature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
