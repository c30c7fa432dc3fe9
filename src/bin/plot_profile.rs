//! Samples a developed RAW image along a line and writes per-channel CSVs and a chart
//!
//! Usage:
//! ```
//! plot_profile frame.nef 100 1200 3900 1200 -o profile.png
//! ```

use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use clap::Parser;
use focal_plane_adjuster_rs::image_pipeline::{
    sample_line, ChannelOrder, DevelopConfig, LineSegment, Point, ProfileSamples, RawDevelopPipeline,
};
use focal_plane_adjuster_rs::logger;
use focal_plane_adjuster_rs::report::{plot_profile, write_channel_profile};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    about = "Writes the RGB intensity profile along a pixel line",
    long_about = "Develops a RAW file, samples every pixel on the line from (x1, y1) to \
                  (x2, y2) and writes one CSV per channel plus a PNG chart. Endpoints \
                  outside the image are clamped to the nearest edge pixel.",
    allow_negative_numbers = true
)]
struct Args {
    /// Input RAW file
    rawfile: PathBuf,

    /// Starting x coordinate
    x1: i64,

    /// Starting y coordinate
    y1: i64,

    /// Ending x coordinate
    x2: i64,

    /// Ending y coordinate
    y2: i64,

    /// Output CSV for the red channel
    #[arg(short = 'r', long, default_value = "profile_red.csv")]
    red_csv: PathBuf,

    /// Output CSV for the green channel
    #[arg(short = 'g', long, default_value = "profile_green.csv")]
    green_csv: PathBuf,

    /// Output CSV for the blue channel
    #[arg(short = 'b', long, default_value = "profile_blue.csv")]
    blue_csv: PathBuf,

    /// Output chart (PNG)
    #[arg(short, long, default_value = "profile.png")]
    output: PathBuf,

    /// Channel storage order of the developed image
    #[arg(long, default_value_t = ChannelOrder::Rgb)]
    channel_order: ChannelOrder,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    if !args.rawfile.exists() {
        bail!("input does not exist: {}", args.rawfile.display());
    }

    let developer = RawDevelopPipeline::new(DevelopConfig::default());
    let image = developer
        .develop_file(&args.rawfile)
        .with_context(|| format!("failed to develop {}", args.rawfile.display()))?;

    let segment = LineSegment::new(Point::new(args.x1, args.y1), Point::new(args.x2, args.y2));
    let profile = sample_line(&image, &segment, args.channel_order)
        .with_context(|| format!("failed to sample {segment:?}"))?;

    let ProfileSamples::Rgb { red, green, blue } = &profile.samples else {
        bail!("{} did not develop to a colour image", args.rawfile.display());
    };
    for (path, name, values) in [
        (&args.red_csv, "Red", red),
        (&args.green_csv, "Green", green),
        (&args.blue_csv, "Blue", blue),
    ] {
        write_channel_profile(path, name, values)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    plot_profile(&args.output, &profile)
        .with_context(|| format!("failed to plot {}", args.output.display()))?;

    info!(samples = profile.len(), chart = %args.output.display(), "Profile written");
    Ok(())
}
