//! Nearest-neighbor search over a code book.

use crate::codebook::{CodeBook, CodeCell};
use crate::signature::Signature;

/// Index of the cell nearest to `sample` in L1 distance.
///
/// Ties go to the earliest cell in book order. `None` for an empty slice.
pub fn nearest_index(cells: &[CodeCell], sample: &Signature) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (i, cell) in cells.iter().enumerate() {
        let d = sample.distance(&cell.signature);
        if best.map_or(true, |(_, min)| d < min) {
            best = Some((i, d));
            // nothing can beat an exact match under strict comparison
            if d == 0 {
                break;
            }
        }
    }
    best.map(|(i, _)| i)
}

pub fn nearest_cell<'a>(book: &'a CodeBook, sample: &Signature) -> Option<&'a CodeCell> {
    nearest_index(book.cells(), sample).map(|i| &book.cells()[i])
}

pub fn find_nearest(book: &CodeBook, sample: &Signature) -> Option<u32> {
    nearest_cell(book, sample).map(|c| c.codepoint)
}
