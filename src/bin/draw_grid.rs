//! Overlays a pixel coordinate grid on a TIFF image

use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use clap::Parser;
use focal_plane_adjuster_rs::image_pipeline::{draw_grid, TiffTransformPipeline, WriteConfig};
use focal_plane_adjuster_rs::logger;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Draws a coordinate grid over a TIFF image", long_about = None)]
struct Args {
    /// Input TIFF file
    input: PathBuf,

    /// Grid spacing in pixels
    #[arg(short, long, default_value_t = 100)]
    grid: usize,

    /// Output TIFF file
    #[arg(short, long, default_value = "grid.tif")]
    output: PathBuf,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    if !args.input.exists() {
        bail!("input does not exist: {}", args.input.display());
    }

    let pipeline = TiffTransformPipeline::new(WriteConfig::default());
    pipeline
        .transform_file(&args.input, &args.output, |image| draw_grid(image, args.grid))
        .with_context(|| format!("failed to draw grid on {}", args.input.display()))?;

    info!(output = %args.output.display(), spacing = args.grid, "Grid image written");
    Ok(())
}
