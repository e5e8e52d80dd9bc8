//! Luminance calibration: squeeze an image into the range the code book
//! can actually reproduce before matching.

use crate::codebook::CodeBook;
use image::GrayImage;
use serde::Deserialize;

/// Floor used by the single-sample scalar mapping of the same font.
pub const SCALAR_FLOOR: u8 = 71;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Calibration {
    /// Use the darkest sample found in the code book.
    #[default]
    CodeBook,
    /// Use a hand-tuned floor.
    Fixed(u8),
    /// Leave the image untouched.
    None,
}

impl Calibration {
    pub fn floor(self, book: &CodeBook) -> Option<u8> {
        match self {
            Calibration::CodeBook => book.floor(),
            Calibration::Fixed(floor) => Some(floor),
            Calibration::None => None,
        }
    }
}

/// Remap every sample `s` to `s * (255 - floor) / 255 + floor`.
pub fn compress(image: &mut GrayImage, floor: u8) {
    let floor = floor as u32;
    for px in image.pixels_mut() {
        px.0[0] = (px.0[0] as u32 * (255 - floor) / 255 + floor) as u8;
    }
}

/// Calibrate `image` in place. Returns the floor applied, if any.
pub fn calibrate(book: &CodeBook, image: &mut GrayImage, mode: Calibration) -> Option<u8> {
    let floor = mode.floor(book)?;
    log::info!("Calibrating luminance to floor {floor}");
    compress(image, floor);
    Some(floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CodeCell, Signature, CODE_SIZE};
    use image::Luma;
    use std::collections::HashMap;

    fn ramp() -> GrayImage {
        GrayImage::from_fn(16, 16, |x, y| Luma([(y * 16 + x) as u8]))
    }

    #[test]
    fn test_compress_endpoints() {
        let mut image = ramp();
        compress(&mut image, 71);
        assert_eq!(image.get_pixel(0, 0).0[0], 71);
        assert_eq!(image.get_pixel(15, 15).0[0], 255);
        // 128 * 184 / 255 + 71 = 92 + 71
        assert_eq!(image.get_pixel(0, 8).0[0], 163);
    }

    #[test]
    fn test_second_calibration_maps_consistently() {
        let mut image = ramp();
        compress(&mut image, 40);
        assert!(image.pixels().all(|p| p.0[0] >= 40));
        let once = image.clone();

        compress(&mut image, 0);
        assert_eq!(image, once);

        compress(&mut image, 40);
        let mut seen = HashMap::new();
        for (a, b) in once.pixels().zip(image.pixels()) {
            assert!(b.0[0] >= a.0[0]);
            assert_eq!(*seen.entry(a.0[0]).or_insert(b.0[0]), b.0[0]);
        }
        assert_eq!(image.get_pixel(15, 15).0[0], 255);
    }

    #[test]
    fn test_zero_floor_is_identity() {
        let mut image = ramp();
        compress(&mut image, 0);
        assert_eq!(image, ramp());
    }

    #[test]
    fn test_calibrate_uses_book_floor() {
        let mut book = CodeBook::new();
        book.push(CodeCell::new(Signature::new([90; CODE_SIZE]), 0x3042));
        book.push(CodeCell::new(Signature::new([255; CODE_SIZE]), 0x3000));
        let mut image = ramp();
        assert_eq!(calibrate(&book, &mut image, Calibration::CodeBook), Some(90));
        assert_eq!(image.get_pixel(0, 0).0[0], 90);
    }

    #[test]
    fn test_calibrate_modes() {
        let book = CodeBook::new();
        let mut image = ramp();
        assert_eq!(calibrate(&book, &mut image, Calibration::CodeBook), None);
        assert_eq!(calibrate(&book, &mut image, Calibration::None), None);
        assert_eq!(image, ramp());
        assert_eq!(calibrate(&book, &mut image, Calibration::Fixed(SCALAR_FLOOR)), Some(71));
        assert_eq!(image.get_pixel(0, 0).0[0], 71);
    }
}
