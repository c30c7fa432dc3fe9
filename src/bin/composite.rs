//! Develops every RAW exposure in a directory and composites them into one TIFF
//!
//! Usage:
//! ```
//! composite captures/ -m max -o stacked.tif --depth 16
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use clap::Parser;
use focal_plane_adjuster_rs::image_pipeline::{
    composite, requantize, BitDepth, CompositeMethod, DevelopConfig, RawDevelopPipeline,
    TiffTransformPipeline, WriteConfig,
};
use focal_plane_adjuster_rs::logger;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Composites the RAW exposures in a directory into one TIFF", long_about = None)]
struct Args {
    /// Directory holding the RAW files
    indir: PathBuf,

    /// Output TIFF file
    #[arg(short, long, default_value = "composite_out.tif")]
    output: PathBuf,

    /// Reduction: mean, max, min (or 0, 1, 2)
    #[arg(short, long, default_value_t = CompositeMethod::Mean)]
    method: CompositeMethod,

    /// Output bit depth, 8 or 16
    #[arg(long, default_value = "8", value_parser = parse_depth)]
    depth: BitDepth,

    /// RAW file extension, matched case-insensitively
    #[arg(long, default_value = "nef")]
    ext: String,

    #[arg(short, long)]
    verbose: bool,
}

fn parse_depth(s: &str) -> std::result::Result<BitDepth, String> {
    match s {
        "8" => Ok(BitDepth::Eight),
        "16" => Ok(BitDepth::Sixteen),
        other => Err(format!("depth must be 8 or 16 (got '{other}')")),
    }
}

/// Files in `dir` with extension `ext`, sorted by path.
fn raw_files(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("cannot list {}", dir.display()))? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ext));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    if !args.indir.is_dir() {
        bail!("input does not exist: {}", args.indir.display());
    }

    let files = raw_files(&args.indir, &args.ext)?;
    if files.is_empty() {
        bail!("no .{} files in {}", args.ext, args.indir.display());
    }

    let developer = RawDevelopPipeline::new(DevelopConfig::default());
    let mut images = Vec::with_capacity(files.len());
    for file in &files {
        let image = developer
            .develop_file(file)
            .with_context(|| format!("failed to develop {}", file.display()))?;
        info!(file = %file.display(), "Read");
        images.push(image);
    }

    let stacked = composite(&images, args.method).context("composite failed")?;
    let stacked = requantize(&stacked, args.depth)?;

    let writer = TiffTransformPipeline::new(WriteConfig::default());
    writer
        .write_file(&stacked, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(
        output = %args.output.display(),
        frames = images.len(),
        method = %args.method,
        bits = args.depth.bits(),
        "Composite written"
    );
    Ok(())
}
