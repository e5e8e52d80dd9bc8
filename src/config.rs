//! Configuration file handling.
//!
//! Loaded from the path given with `--config`, or from `glyphaa.toml` in the
//! working directory when present. Command-line flags override it.

use crate::calibrate::Calibration;
use crate::utf8::MIN_CODEPOINT;
use crate::{GlyphError, Result, DEFAULT_WORKERS, FONT_WIDTH};
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG: &str = "glyphaa.toml";

/// Decorative glyphs (filled shapes, stars, the geta mark) whose solid ink
/// reads as noise in photographic output.
pub const DECORATIVE_DENYLIST: [u32; 7] =
    [0x25A0, 0x25CF, 0x25C6, 0x25BC, 0x25B2, 0x2605, 0x3013];

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub font: FontConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub mapping: MappingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterMode {
    /// Embedded bitmap strikes.
    #[default]
    Strike,
    /// Thresholded outlines.
    Outline,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    pub path: PathBuf,
    pub face_index: u32,
    pub pixel_height: u16,
    pub raster: RasterMode,
    pub threshold: u8,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("msgothic.ttc"),
            face_index: 0,
            pixel_height: FONT_WIDTH as u16,
            raster: RasterMode::Strike,
            threshold: 128,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BuildConfig {
    pub first: u32,
    pub last: u32,
    pub exclude_decorative: bool,
    pub denylist: Vec<u32>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            first: MIN_CODEPOINT,
            last: 0xFFFF,
            exclude_decorative: false,
            denylist: DECORATIVE_DENYLIST.to_vec(),
        }
    }
}

impl BuildConfig {
    /// Codepoints to sweep. ASCII is never swept.
    pub fn range(&self) -> RangeInclusive<u32> {
        self.first.max(MIN_CODEPOINT)..=self.last
    }

    /// Codepoints to skip during the sweep.
    pub fn excluded(&self) -> &[u32] {
        if self.exclude_decorative {
            &self.denylist
        } else {
            &[]
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MappingConfig {
    pub workers: usize,
    pub calibration: Calibration,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self { workers: DEFAULT_WORKERS, calibration: Calibration::CodeBook }
    }
}

impl Config {
    /// Load configuration. An explicit path must exist; otherwise the
    /// default file is used when present, else built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG);
                if !path.exists() {
                    return Ok(Config::default());
                }
                path
            }
        };
        let content = std::fs::read_to_string(&path)
            .map_err(|source| GlyphError::InputOpen { path: path.clone(), source })?;
        let config = Self::parse(&content)
            .map_err(|source| GlyphError::Config { path: path.clone(), source })?;
        log::info!("Loaded config {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
