//! Multi-peak curve fitting
//!
//! Fits three Lorentzian peaks plus one Gaussian peak to an (x, y) curve by
//! Levenberg-Marquardt nonlinear least squares, starting from a caller
//! supplied guess.

pub mod error;
mod levenberg_marquardt;
mod model;
pub mod types;


pub use error::{FitError, NonConvergence, Result};
pub use levenberg_marquardt::{levenberg_marquardt, FitModel, Solution};
pub use model::{combined_function, gaussian, lorentzian, PeakModel};
pub use types::{
    FitConfig, FitConfigBuilder, FitDataset, FitResult, Gaussian, Lorentzian, PeakParameters,
    PARAMETER_COUNT,
};

use tracing::{info, instrument};

/// Fits the 3-Lorentzian + 1-Gaussian model to `dataset`.
///
/// A single attempt is made from `initial_guess`. Failure to converge is
/// reported as [`FitError::DidNotConverge`]; the guess is never returned in
/// place of a fit.
#[instrument(skip(dataset, initial_guess, config), fields(points = dataset.len()))]
pub fn fit_peaks(
    dataset: &FitDataset,
    initial_guess: &PeakParameters,
    config: &FitConfig,
) -> Result<FitResult> {
    let solution = levenberg_marquardt(&PeakModel, dataset, &initial_guess.to_array(), config)?;

    let parameters = PeakParameters::from_slice(&solution.parameters)
        .ok_or_else(|| FitError::InvalidConfig("solver returned wrong parameter count".to_string()))?;

    info!(
        iterations = solution.iterations,
        ssr = solution.residual_sum_of_squares,
        "Peak fit converged"
    );

    Ok(FitResult {
        parameters,
        covariance: solution.covariance,
        iterations: solution.iterations,
        residual_sum_of_squares: solution.residual_sum_of_squares,
    })
}
