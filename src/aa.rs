//! AA grid: the row-major codepoint grid produced by mapping, and its text
//! form (a `"<width> <height>"` header followed by `height` rows of `width`
//! codepoints).

use crate::utf8::{decode_char, push_codepoint};
use crate::{GlyphError, Result};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AaGrid {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl AaGrid {
    pub fn new(width: usize, height: usize, cells: Vec<u32>) -> Result<Self> {
        if width.checked_mul(height) != Some(cells.len()) {
            return Err(GlyphError::Format(format!(
                "{} cells do not fill a {width}x{height} grid",
                cells.len()
            )));
        }
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        (0..self.height).map(move |y| &self.cells[y * self.width..(y + 1) * self.width])
    }

    pub fn to_text(&self) -> Result<String> {
        let mut out = format!("{} {}\n", self.width, self.height);
        for row in self.rows() {
            for &codepoint in row {
                push_codepoint(&mut out, codepoint)?;
            }
            out.push('\n');
        }
        Ok(out)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self.to_text()?.as_bytes())?;
        Ok(())
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.split('\n');
        let header = lines.next().unwrap_or_default().trim();
        let (width, height) = parse_header(header)
            .ok_or_else(|| GlyphError::Format(format!("bad AA header {header:?}")))?;

        // Rows are checked as they are read; the header alone sizes nothing.
        let mut cells = Vec::new();
        for y in 0..height {
            let line = lines
                .next()
                .ok_or_else(|| GlyphError::Format(format!("AA row {y} missing")))?;
            let line = line.strip_suffix('\r').unwrap_or(line);
            let before = cells.len();
            for ch in line.chars() {
                if cells.len() - before == width {
                    return Err(GlyphError::Format(format!(
                        "AA row {y} has more than {width} codepoints"
                    )));
                }
                cells.push(decode_char(ch)?);
            }
            if cells.len() - before != width {
                return Err(GlyphError::Format(format!(
                    "AA row {y} has {} codepoints, expected {width}",
                    cells.len() - before
                )));
            }
        }
        Self::new(width, height, cells)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| GlyphError::InputOpen { path: path.to_path_buf(), source })?;
        Self::parse(&text)
    }
}

fn parse_header(header: &str) -> Option<(usize, usize)> {
    let mut fields = header.split_ascii_whitespace();
    let width: usize = fields.next()?.parse().ok()?;
    let height = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    width.checked_mul(height)?;
    Some((width, height))
}
