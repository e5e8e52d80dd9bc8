//! glyphaa CLI - Convert an image to text art against a glyph code book

use clap::Parser;
use glyphaa::config::Config;
use glyphaa::{imageio, Calibration, CodeBook, GlyphError, Mapper};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "glyphaa", about = "Convert images to glyph text art")]
struct Args {
    /// Code book file produced by mkbook
    #[arg(short, long)]
    code_book: PathBuf,
    /// Input image file
    #[arg(short, long)]
    image: PathBuf,
    /// Number of worker threads
    #[arg(short = 'j', long)]
    workers: Option<usize>,
    /// Calibrate against a fixed floor instead of the code book minimum
    #[arg(long, conflicts_with = "no_calibration")]
    fixed_floor: Option<u8>,
    /// Match raw image luminance
    #[arg(long)]
    no_calibration: bool,
    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), GlyphError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let calibration = match (args.fixed_floor, args.no_calibration) {
        (Some(floor), _) => Calibration::Fixed(floor),
        (None, true) => Calibration::None,
        (None, false) => config.mapping.calibration,
    };

    let mapper = Mapper::new(CodeBook::open(&args.code_book)?)
        .with_workers(args.workers.unwrap_or(config.mapping.workers))
        .with_calibration(calibration);

    let grid = mapper.convert(imageio::open(&args.image)?)?;

    let mut out = std::io::BufWriter::new(std::io::stdout().lock());
    grid.write_to(&mut out)?;
    out.flush()?;
    Ok(())
}
