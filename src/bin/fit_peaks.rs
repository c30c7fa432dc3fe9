//! Fits three Lorentzian peaks and one Gaussian to a two-column CSV
//!
//! Usage:
//! ```
//! fit_peaks profile_green.csv --lc1 1180 --ln1 9000 --lc2 1210 --ln2 12000 \
//!     --lc3 1240 --ln3 8000 --gc 1210 --gn 2000
//! ```

use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use clap::Parser;
use focal_plane_adjuster_rs::fitting::{
    fit_peaks, FitConfig, Gaussian, Lorentzian, PeakParameters,
};
use focal_plane_adjuster_rs::logger;
use focal_plane_adjuster_rs::report::{plot_fit, read_xy_columns, write_fit_parameters};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    about = "Fits 3 Lorentzians + 1 Gaussian to the first two columns of a CSV",
    long_about = None,
    allow_negative_numbers = true
)]
struct Args {
    /// Input CSV; first column x, second column y, one header row
    csv: PathBuf,

    /// Output chart (PNG)
    #[arg(short, long, default_value = "fit_result.png")]
    output: PathBuf,

    /// Output CSV of fitted parameters
    #[arg(short, long, default_value = "fit_parameters.csv")]
    param: PathBuf,

    /// Lorentzian 1 center
    #[arg(long)]
    lc1: f64,
    /// Lorentzian 1 height
    #[arg(long)]
    ln1: f64,
    /// Lorentzian 1 half-width
    #[arg(long, default_value_t = 2.0)]
    lw1: f64,

    /// Lorentzian 2 center
    #[arg(long)]
    lc2: f64,
    /// Lorentzian 2 height
    #[arg(long)]
    ln2: f64,
    /// Lorentzian 2 half-width
    #[arg(long, default_value_t = 2.0)]
    lw2: f64,

    /// Lorentzian 3 center
    #[arg(long)]
    lc3: f64,
    /// Lorentzian 3 height
    #[arg(long)]
    ln3: f64,
    /// Lorentzian 3 half-width
    #[arg(long, default_value_t = 2.0)]
    lw3: f64,

    /// Gaussian center
    #[arg(long)]
    gc: f64,
    /// Gaussian height
    #[arg(long)]
    gn: f64,
    /// Gaussian sigma
    #[arg(long, default_value_t = 100.0)]
    gw: f64,

    /// Solver step budget
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Also estimate and print one-sigma parameter uncertainties
    #[arg(long)]
    covariance: bool,

    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn initial_guess(&self) -> PeakParameters {
        PeakParameters {
            lorentzians: [
                Lorentzian { amplitude: self.ln1, center: self.lc1, width: self.lw1 },
                Lorentzian { amplitude: self.ln2, center: self.lc2, width: self.lw2 },
                Lorentzian { amplitude: self.ln3, center: self.lc3, width: self.lw3 },
            ],
            gaussian: Gaussian { amplitude: self.gn, center: self.gc, sigma: self.gw },
        }
    }

    fn fit_config(&self) -> FitConfig {
        let mut builder = FitConfig::builder().compute_covariance(self.covariance);
        if let Some(max_iterations) = self.max_iterations {
            builder = builder.max_iterations(max_iterations);
        }
        builder.build()
    }
}

fn print_parameters(params: &PeakParameters, errors: Option<&PeakParameters>) {
    let labels = ["Lorentzian1", "Lorentzian2", "Lorentzian3"];
    for (i, (label, peak)) in labels.iter().zip(&params.lorentzians).enumerate() {
        println!(
            "{label} : LC = {:.3}, LN = {:.3}, LW = {:.3}",
            peak.center, peak.amplitude, peak.width
        );
        if let Some(errors) = errors {
            let e = &errors.lorentzians[i];
            println!("              +/- {:.3},      {:.3},      {:.3}", e.center, e.amplitude, e.width);
        }
    }
    let g = &params.gaussian;
    println!("Gaussian    : GC = {:.3}, GN = {:.3}, GW = {:.3}", g.center, g.amplitude, g.sigma);
    if let Some(errors) = errors {
        let e = &errors.gaussian;
        println!("              +/- {:.3},      {:.3},      {:.3}", e.center, e.amplitude, e.sigma);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    if !args.csv.exists() {
        bail!("input does not exist: {}", args.csv.display());
    }

    let dataset = read_xy_columns(&args.csv)
        .with_context(|| format!("failed to read {}", args.csv.display()))?;

    let result = fit_peaks(&dataset, &args.initial_guess(), &args.fit_config())
        .context("peak fit failed")?;

    let errors = result.standard_errors();
    if args.covariance && errors.is_none() {
        info!("Covariance could not be estimated for this dataset");
    }
    print_parameters(&result.parameters, errors.as_ref());

    plot_fit(&args.output, &dataset, &result.parameters)
        .with_context(|| format!("failed to plot {}", args.output.display()))?;
    write_fit_parameters(&args.param, &result.parameters)
        .with_context(|| format!("failed to write {}", args.param.display()))?;

    info!(
        iterations = result.iterations,
        ssr = result.residual_sum_of_squares,
        chart = %args.output.display(),
        parameters = %args.param.display(),
        "Fit written"
    );
    Ok(())
}
