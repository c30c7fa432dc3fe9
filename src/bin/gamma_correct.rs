//! Applies gamma correction to a TIFF image

use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use clap::Parser;
use focal_plane_adjuster_rs::image_pipeline::{apply_gamma, TiffTransformPipeline, WriteConfig};
use focal_plane_adjuster_rs::logger;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Applies gamma correction to a TIFF image", long_about = None)]
struct Args {
    /// Input TIFF file
    input: PathBuf,

    /// Output TIFF file
    output: PathBuf,

    /// Gamma; values above 1 brighten mid-tones
    #[arg(short, long, default_value_t = 2.2)]
    gamma: f32,

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
        .transform_file(&args.input, &args.output, |image| apply_gamma(image, args.gamma))
        .with_context(|| format!("failed to gamma-correct {}", args.input.display()))?;

    info!(output = %args.output.display(), gamma = args.gamma, "Gamma-corrected image written");
    Ok(())
}
