//! Partitioned search: cut the block grid into contiguous row bands and map
//! each band on its own worker.
//!
//! Every worker owns a disjoint slice of the output grid, so the result does
//! not depend on how many workers ran.

use crate::aa::AaGrid;
use crate::codebook::CodeBook;
use crate::matcher::nearest_index;
use crate::signature::Signature;
use crate::{GlyphError, Result, CODE_WIDTH};
use image::GrayImage;
use std::ops::Range;

/// Split `rows` block rows into at most `workers` contiguous bands.
///
/// The first `rows % workers` bands get one extra row. A worker count above
/// the row count is clamped so no band is empty.
pub fn bands(rows: usize, workers: usize) -> Vec<Range<usize>> {
    if rows == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, rows);
    let (base, extra) = (rows / workers, rows % workers);
    let mut start = 0;
    (0..workers)
        .map(|i| {
            let len = base + usize::from(i < extra);
            let band = start..start + len;
            start += len;
            band
        })
        .collect()
}

/// Map every 3×3 block of `image` to its nearest code book entry.
pub fn map_image(book: &CodeBook, image: &GrayImage, workers: usize) -> Result<AaGrid> {
    if book.is_empty() {
        return Err(GlyphError::EmptyCodeBook);
    }
    let width = image.width() as usize / CODE_WIDTH;
    let height = image.height() as usize / CODE_WIDTH;
    let bands = bands(height, workers);
    if bands.len() < workers {
        log::warn!("Clamping {workers} workers to {} block rows", bands.len());
    }
    log::info!(
        "Mapping {}x{} image to {width}x{height} cells on {} workers",
        image.width(),
        image.height(),
        bands.len()
    );

    let mut cells = vec![0u32; width * height];
    let slices = split_bands(&mut cells, &bands, width);
    run_bands(book, image, width, bands.into_iter().zip(slices).collect())?;
    AaGrid::new(width, height, cells)
}

fn split_bands<'a>(
    mut cells: &'a mut [u32],
    bands: &[Range<usize>],
    width: usize,
) -> Vec<&'a mut [u32]> {
    let mut slices = Vec::with_capacity(bands.len());
    for band in bands {
        let (head, tail) = cells.split_at_mut(band.len() * width);
        slices.push(head);
        cells = tail;
    }
    slices
}

#[cfg(not(target_arch = "wasm32"))]
fn run_bands(
    book: &CodeBook,
    image: &GrayImage,
    width: usize,
    work: Vec<(Range<usize>, &mut [u32])>,
) -> Result<()> {
    if work.len() <= 1 {
        for (rows, out) in work {
            map_band(book, image, width, rows, out);
        }
        return Ok(());
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(work.len())
        .thread_name(|i| format!("glyphaa-band-{i}"))
        .build()?;
    pool.scope(|s| {
        for (rows, out) in work {
            s.spawn(move |_| map_band(book, image, width, rows, out));
        }
    });
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn run_bands(
    book: &CodeBook,
    image: &GrayImage,
    width: usize,
    work: Vec<(Range<usize>, &mut [u32])>,
) -> Result<()> {
    for (rows, out) in work {
        map_band(book, image, width, rows, out);
    }
    Ok(())
}

fn map_band(book: &CodeBook, image: &GrayImage, width: usize, rows: Range<usize>, out: &mut [u32]) {
    log::debug!("Mapping block rows {rows:?}");
    let cells = book.cells();
    for (i, by) in rows.enumerate() {
        for bx in 0..width {
            let sample = Signature::from_block(image, bx as u32, by as u32);
            let best = nearest_index(cells, &sample).unwrap_or_default();
            out[i * width + bx] = cells[best].codepoint;
        }
    }
}
