//! Adjusts brightness and contrast of a TIFF image
//!
//! Usage:
//! ```
//! adjust_contrast input.tif output.tif -b 20 -c 1.5
//! ```

use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use clap::Parser;
use focal_plane_adjuster_rs::image_pipeline::{adjust_brightness_contrast, TiffTransformPipeline, WriteConfig};
use focal_plane_adjuster_rs::logger;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Adjusts brightness and contrast of a TIFF image", long_about = None)]
struct Args {
    /// Input TIFF file
    input: PathBuf,

    /// Output TIFF file
    output: PathBuf,

    /// Brightness offset in 8-bit units (-255 to 255), scaled for 16-bit images
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    brightness: i32,

    /// Contrast factor around mid-scale (at least 0.1)
    #[arg(short, long, default_value_t = 1.0)]
    contrast: f32,

    /// Debug logging
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
        .transform_file(&args.input, &args.output, |image| {
            adjust_brightness_contrast(image, args.brightness, args.contrast)
        })
        .with_context(|| format!("failed to adjust {}", args.input.display()))?;

    info!(
        output = %args.output.display(),
        brightness = args.brightness,
        contrast = args.contrast,
        "Adjusted image written"
    );
    Ok(())
}
