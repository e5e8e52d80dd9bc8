//! Codepoint text codec. Only the one to three byte UTF-8 forms are used;
//! codepoints at or above U+10000 are rejected.

use crate::{GlyphError, Result};

/// Lowest codepoint a code book may carry; ASCII is never a glyph.
pub const MIN_CODEPOINT: u32 = 0x80;
/// Highest codepoint a code book or AA file may carry.
pub const MAX_CODEPOINT: u32 = 0xFFFF;

/// Append `codepoint` to `out` as UTF-8.
pub fn push_codepoint(out: &mut String, codepoint: u32) -> Result<()> {
    if codepoint > MAX_CODEPOINT {
        return Err(GlyphError::Format(format!(
            "U+{codepoint:X} is outside the basic multilingual plane"
        )));
    }
    let ch = char::from_u32(codepoint)
        .ok_or_else(|| GlyphError::Format(format!("U+{codepoint:04X} is not a scalar value")))?;
    out.push(ch);
    Ok(())
}

/// Codepoint of a decoded character.
pub fn decode_char(ch: char) -> Result<u32> {
    let codepoint = ch as u32;
    if codepoint > MAX_CODEPOINT {
        return Err(GlyphError::Format(format!(
            "U+{codepoint:X} is outside the basic multilingual plane"
        )));
    }
    Ok(codepoint)
}
