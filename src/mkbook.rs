//! mkbook - Build a glyph code book from a bitmap font

use clap::Parser;
use glyphaa::builder::{self, BuildOptions};
use glyphaa::config::{Config, RasterMode};
use glyphaa::GlyphError;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mkbook", about = "Build a glyph code book from a font")]
struct Args {
    /// Font file (defaults to msgothic.ttc)
    #[arg(short, long)]
    font: Option<PathBuf>,
    /// Face index within a font collection
    #[arg(long)]
    face_index: Option<u32>,
    /// Rasterize outlines instead of reading embedded bitmap strikes
    #[arg(long)]
    outline: bool,
    /// Leave out decorative glyphs that read as noise
    #[arg(long)]
    exclude_decorative: bool,
    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), GlyphError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;

    if let Some(font) = args.font {
        config.font.path = font;
    }
    if let Some(index) = args.face_index {
        config.font.face_index = index;
    }
    if args.outline {
        config.font.raster = RasterMode::Outline;
    }
    if args.exclude_decorative {
        config.build.exclude_decorative = true;
    }

    let book = builder::build_from_font(&config.font, &BuildOptions::from(&config.build))?;

    let mut out = std::io::BufWriter::new(std::io::stdout().lock());
    book.write_to(&mut out)?;
    out.flush()?;
    Ok(())
}
