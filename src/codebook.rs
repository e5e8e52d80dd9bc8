//! Code book: the searchable set of (signature, codepoint) cells, and its
//! flat text form.
//!
//! The text form has one line per group of cells sharing a signature:
//! nine two-digit hex samples, each followed by a comma, then every
//! codepoint of the group as UTF-8. Groups are separated by ASCII
//! whitespace, so several may share a line; U+3000 is a codepoint.
//!
//! ```text
//! 5a,cc,e5,b3,cc,cc,e5,cc,e5,あぁ
//! ```

use crate::signature::Signature;
use crate::utf8::{decode_char, push_codepoint, MIN_CODEPOINT};
use crate::{GlyphError, Result, CODE_SIZE};
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeCell {
    pub signature: Signature,
    pub codepoint: u32,
}

impl CodeCell {
    pub fn new(signature: Signature, codepoint: u32) -> Self {
        Self { signature, codepoint }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBook {
    cells: Vec<CodeCell>,
}

impl CodeBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cell: CodeCell) {
        self.cells.push(cell);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[CodeCell] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CodeCell> {
        self.cells.iter()
    }

    /// Stable sort by signature order; equal signatures keep insertion order.
    pub fn sort(&mut self) {
        self.cells.sort_by(|a, b| a.signature.cmp(&b.signature));
    }

    /// Runs of adjacent cells with identical signatures.
    pub fn groups(&self) -> impl Iterator<Item = &[CodeCell]> {
        self.cells.chunk_by(|a, b| a.signature == b.signature)
    }

    /// Darkest sample across the whole book.
    pub fn floor(&self) -> Option<u8> {
        self.cells.iter().flat_map(|c| c.signature.0).min()
    }

    /// Render the text form. Sort first so equal signatures share a line.
    pub fn to_text(&self) -> Result<String> {
        let mut out = String::new();
        for group in self.groups() {
            for sample in group[0].signature.samples() {
                let _ = write!(out, "{sample:02x},");
            }
            for cell in group {
                push_codepoint(&mut out, cell.codepoint)?;
            }
            out.push('\n');
        }
        Ok(out)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self.to_text()?.as_bytes())?;
        Ok(())
    }

    /// Parse the text form. Every codepoint of a group becomes its own cell;
    /// the result is sorted.
    pub fn parse(text: &str) -> Result<Self> {
        let mut book = CodeBook::new();
        for (n, line) in text.lines().enumerate() {
            for group in line.split_ascii_whitespace() {
                let (signature, glyphs) = parse_group(group).map_err(|msg| {
                    GlyphError::Format(format!("code book line {}: {msg}", n + 1))
                })?;
                for ch in glyphs.chars() {
                    book.push(CodeCell::new(signature, decode_char(ch)?));
                }
            }
        }
        book.sort();
        Ok(book)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| GlyphError::InputOpen { path: path.to_path_buf(), source })?;
        let book = Self::parse(&text)?;
        log::info!("Loaded {} code cells from {}", book.len(), path.display());
        Ok(book)
    }
}

fn parse_group(group: &str) -> std::result::Result<(Signature, &str), String> {
    let mut samples = [0u8; CODE_SIZE];
    let mut rest = group;
    for (i, sample) in samples.iter_mut().enumerate() {
        let (field, tail) = rest
            .split_once(',')
            .ok_or_else(|| format!("expected {CODE_SIZE} samples in {group:?}, found {i}"))?;
        *sample = u8::from_str_radix(field, 16).map_err(|_| format!("bad sample {field:?}"))?;
        rest = tail;
    }
    if rest.is_empty() {
        return Err(format!("no codepoints in {group:?}"));
    }
    if let Some(ch) = rest.chars().find(|&ch| (ch as u32) < MIN_CODEPOINT) {
        return Err(format!("{ch:?} is not a glyph codepoint"));
    }
    Ok((Signature::new(samples), rest))
}

impl FromIterator<CodeCell> for CodeBook {
    fn from_iter<I: IntoIterator<Item = CodeCell>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a CodeBook {
    type Item = &'a CodeCell;
    type IntoIter = std::slice::Iter<'a, CodeCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
