//! Bit-packed monochrome glyph bitmaps.

/// A monochrome bitmap, MSB-first, one row every `pitch` bytes.
///
/// A set bit is an ink pixel; a clear bit is paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoBitmap {
    pub width: usize,
    pub rows: usize,
    pub pitch: usize,
    pub buffer: Vec<u8>,
}

impl MonoBitmap {
    /// Blank (all paper) bitmap with byte-aligned rows.
    pub fn new(width: usize, rows: usize) -> Self {
        let pitch = width.div_ceil(8);
        Self { width, rows, pitch, buffer: vec![0; pitch * rows] }
    }

    /// Re-align a bitmap whose rows are packed back to back with no padding.
    pub fn from_packed(width: usize, rows: usize, data: &[u8]) -> Self {
        let mut bitmap = Self::new(width, rows);
        for y in 0..rows {
            for x in 0..width {
                let bit = y * width + x;
                let ink = data.get(bit / 8).is_some_and(|b| b & (0x80 >> (bit % 8)) != 0);
                if ink {
                    bitmap.set_ink(x, y);
                }
            }
        }
        bitmap
    }

    /// `Some(true)` for ink, `Some(false)` for paper, `None` outside the
    /// bitmap or past the end of a short buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        if x >= self.width || y >= self.rows {
            return None;
        }
        let byte = self.buffer.get(y * self.pitch + x / 8)?;
        Some(byte & (0x80 >> (x % 8)) != 0)
    }

    pub fn set_ink(&mut self, x: usize, y: usize) {
        if x >= self.width || y >= self.rows {
            return;
        }
        if let Some(byte) = self.buffer.get_mut(y * self.pitch + x / 8) {
            *byte |= 0x80 >> (x % 8);
        }
    }
}
