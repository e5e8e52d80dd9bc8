//! Image to text art converter using a glyph luminance code book.
//!
//! Every full-width glyph of a bitmap font is reduced to a 3×3 luminance
//! [`Signature`]. Images are cut into 3×3 sample blocks and each block is
//! replaced by the glyph whose signature is nearest in L1 distance.

pub mod aa;
pub mod bitmap;
pub mod calibrate;
pub mod codebook;
pub mod driver;
pub mod imageio;
pub mod matcher;
pub mod signature;
pub mod utf8;

#[cfg(not(target_arch = "wasm32"))]
pub mod builder;
#[cfg(not(target_arch = "wasm32"))]
pub mod compositor;
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod font;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use aa::AaGrid;
pub use bitmap::MonoBitmap;
pub use calibrate::Calibration;
pub use codebook::{CodeBook, CodeCell};
pub use signature::Signature;

use image::GrayImage;
use std::path::PathBuf;
use thiserror::Error;

/// Strike pixel height, and the width of a full-width glyph.
pub const FONT_WIDTH: usize = 16;
/// Edge of the signature grid.
pub const CODE_WIDTH: usize = 3;
/// Number of samples in a signature.
pub const CODE_SIZE: usize = CODE_WIDTH * CODE_WIDTH;
/// Glyph pixels per signature cell edge.
pub const CELL_WIDTH: usize = 5;
/// Worker count used when none is configured.
pub const DEFAULT_WORKERS: usize = 4;

#[derive(Error, Debug)]
pub enum GlyphError {
    #[error("cannot open {}: {source}", path.display())]
    InputOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("format error: {0}")]
    Format(String),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("png encode error: {0}")]
    Png(#[from] png::EncodingError),
    #[error("font error: {0}")]
    Font(String),
    #[error("no {0}px bitmap strike in font")]
    StrikeNotFound(u16),
    #[error("no glyph for U+{0:04X}")]
    GlyphNotFound(u32),
    #[error("glyph for U+{0:04X} is not a monochrome bitmap")]
    NotBitmap(u32),
    #[error("glyph for U+{codepoint:04X} is {width}px wide, not full-width")]
    NotFullWidth { codepoint: u32, width: usize },
    #[cfg(not(target_arch = "wasm32"))]
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[cfg(not(target_arch = "wasm32"))]
    #[error("worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
    #[error("code book is empty")]
    EmptyCodeBook,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GlyphError {
    /// True for per-glyph failures that a code book sweep skips over.
    pub fn is_glyph_unavailable(&self) -> bool {
        matches!(
            self,
            GlyphError::GlyphNotFound(_)
                | GlyphError::NotBitmap(_)
                | GlyphError::NotFullWidth { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GlyphError>;

/// Forward converter: calibrates an image against a code book and maps it
/// to an [`AaGrid`].
pub struct Mapper {
    book: CodeBook,
    workers: usize,
    calibration: Calibration,
}

impl Mapper {
    pub fn new(book: CodeBook) -> Self {
        Self { book, workers: DEFAULT_WORKERS, calibration: Calibration::default() }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }

    pub fn code_book(&self) -> &CodeBook {
        &self.book
    }

    pub fn convert(&self, mut image: GrayImage) -> Result<AaGrid> {
        if self.book.is_empty() {
            return Err(GlyphError::EmptyCodeBook);
        }
        calibrate::calibrate(&self.book, &mut image, self.calibration);
        driver::map_image(&self.book, &image, self.workers)
    }
}
