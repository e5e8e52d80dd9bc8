//! Image codec glue: decode anything to grayscale, encode bilevel PNG.

use crate::{GlyphError, Result};
use image::{GrayImage, Luma, RgbaImage};
use std::path::Path;

/// BT.601 luma, rounded, alpha-composited over white.
pub fn luma(r: u8, g: u8, b: u8, a: u8) -> u8 {
    let gray = (0.299f32 * r as f32 + 0.587f32 * g as f32 + 0.114f32 * b as f32 + 0.5) as u32;
    let a = a as u32;
    (gray * a / 255 + 255 - a) as u8
}

/// Flatten RGBA pixels to grayscale.
pub fn to_gray(rgba: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        Luma([luma(r, g, b, a)])
    })
}

/// Decode an encoded image of any supported format to grayscale.
pub fn decode(bytes: &[u8]) -> Result<GrayImage> {
    let image = image::load_from_memory(bytes)?;
    Ok(to_gray(&image.to_rgba8()))
}

pub fn open(path: impl AsRef<Path>) -> Result<GrayImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|source| GlyphError::InputOpen { path: path.to_path_buf(), source })?;
    let image = decode(&bytes)?;
    log::info!("Decoded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image)
}

/// Write a 0/1 sample image as a 1-bit indexed PNG with palette
/// `[black, white]`. Any non-zero sample is white.
#[cfg(not(target_arch = "wasm32"))]
pub fn encode_bilevel<W: std::io::Write>(image: &GrayImage, writer: W) -> Result<()> {
    let (width, height) = image.dimensions();
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::One);
    encoder.set_palette(vec![0, 0, 0, 255, 255, 255]);
    let mut writer = encoder.write_header()?;

    let pitch = (width as usize).div_ceil(8);
    let mut data = vec![0u8; pitch * height as usize];
    for (x, y, px) in image.enumerate_pixels() {
        if px.0[0] != 0 {
            data[y as usize * pitch + x as usize / 8] |= 0x80 >> (x % 8);
        }
    }
    writer.write_image_data(&data)?;
    writer.finish()?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_bilevel(image: &GrayImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    encode_bilevel(image, std::io::BufWriter::new(file))?;
    log::info!("Wrote {} ({}x{})", path.display(), image.width(), image.height());
    Ok(())
}
