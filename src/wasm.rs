//! WebAssembly bindings for glyphaa

use crate::calibrate::Calibration;
use crate::codebook::CodeBook;
use crate::{calibrate, driver, imageio};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmMapper {
    book: CodeBook,
    calibration: Calibration,
}

#[wasm_bindgen]
impl WasmMapper {
    /// Create a mapper from the text form of a code book.
    #[wasm_bindgen(constructor)]
    pub fn new(code_book: &str) -> Result<WasmMapper, JsValue> {
        let book = CodeBook::parse(code_book).map_err(|e| JsValue::from_str(&e.to_string()))?;
        if book.is_empty() {
            return Err(JsValue::from_str("Code book is empty"));
        }
        Ok(WasmMapper { book, calibration: Calibration::CodeBook })
    }

    #[wasm_bindgen]
    pub fn set_fixed_floor(&mut self, floor: u8) {
        self.calibration = Calibration::Fixed(floor);
    }

    #[wasm_bindgen]
    pub fn set_calibration_enabled(&mut self, enabled: bool) {
        self.calibration = if enabled { Calibration::CodeBook } else { Calibration::None };
    }

    /// Map RGBA pixels to text art, returned in the AA text format.
    #[wasm_bindgen]
    pub fn convert(&self, image_data: &[u8], width: u32, height: u32) -> Result<String, JsValue> {
        let rgba = image::RgbaImage::from_raw(width, height, image_data.to_vec())
            .ok_or_else(|| JsValue::from_str("Invalid image dimensions"))?;
        let mut gray = imageio::to_gray(&rgba);

        calibrate::calibrate(&self.book, &mut gray, self.calibration);
        let grid = driver::map_image(&self.book, &gray, 1)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        grid.to_text().map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
