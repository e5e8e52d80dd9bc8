//! txt2png - Render glyph text art back into a bilevel PNG

use clap::Parser;
use glyphaa::config::{Config, RasterMode};
use glyphaa::{compositor, font, imageio, AaGrid, GlyphError};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "txt2png", about = "Render glyph text art as a PNG")]
struct Args {
    /// Text art produced by glyphaa
    #[arg(short, long)]
    input: PathBuf,
    /// Output PNG file
    #[arg(short, long)]
    output: PathBuf,
    /// Font file (defaults to msgothic.ttc)
    #[arg(short, long)]
    font: Option<PathBuf>,
    /// Face index within a font collection
    #[arg(long)]
    face_index: Option<u32>,
    /// Rasterize outlines instead of reading embedded bitmap strikes
    #[arg(long)]
    outline: bool,
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

    let grid = AaGrid::open(&args.input)?;

    let data = font::read(&config.font)?;
    let rasterizer = font::open(&data, &config.font)?;
    let image = compositor::render(&grid, &*rasterizer)?;

    imageio::save_bilevel(&image, &args.output)
}
