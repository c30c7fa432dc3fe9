//! Levenberg-Marquardt nonlinear least squares
//!
//! Marquardt's variant: the damping term is scaled by the diagonal of
//! `J^T J`, which makes steps invariant to the units of each parameter.
//! Damping is updated with Nielsen's gain-ratio rule. Termination follows
//! the MINPACK tests (`ftol` on the sum of squares, `xtol` on the step,
//! `gtol` on the gradient cosine).
//!
//! # References
//! * D. W. Marquardt (1963). "An Algorithm for Least-Squares Estimation of
//!   Nonlinear Parameters." SIAM J. Appl. Math. 11(2).
//! * H. B. Nielsen (1999). "Damping Parameter in Marquardt's Method."
//!   IMM-REP-1999-05, DTU.

use nalgebra::{DMatrix, DVector};
use tracing::{debug, trace, warn};
use crate::fitting::error::{FitError, NonConvergence, Result};
use crate::fitting::types::{FitConfig, FitDataset};

/// Damping beyond this means the normal equations are numerically degenerate.
const MAX_DAMPING: f64 = 1e32;

/// Smallest eigenvalue of the unit-diagonal scaling of `J^T J` below which
/// the Jacobian columns count as linearly dependent.
const RANK_TOLERANCE: f64 = 1e-10;

/// A model `f(x; p)` with an analytic gradient in `p`.
pub trait FitModel {
    fn parameter_count(&self) -> usize;

    fn evaluate(&self, x: f64, params: &[f64]) -> f64;

    /// Writes `df/dp_j` at `x` into `out[j]`.
    fn gradient(&self, x: f64, params: &[f64], out: &mut [f64]);
}

/// Converged solver state.
#[derive(Debug, Clone)]
pub struct Solution {
    pub parameters: Vec<f64>,
    pub covariance: Option<DMatrix<f64>>,
    pub iterations: usize,
    pub residual_sum_of_squares: f64,
}

/// `J^T J`, `J^T r` and the sum of squared residuals at one parameter vector.
struct NormalEquations {
    jtj: DMatrix<f64>,
    jtr: DVector<f64>,
    ssr: f64,
}

/// Minimizes `sum (y_i - f(x_i; p))^2` starting from `initial`.
pub fn levenberg_marquardt<M: FitModel>(
    model: &M,
    dataset: &FitDataset,
    initial: &[f64],
    config: &FitConfig,
) -> Result<Solution> {
    config.validate()?;

    let n_params = model.parameter_count();
    if initial.len() != n_params {
        return Err(FitError::InvalidConfig(format!(
            "initial guess has {} values, model takes {}",
            initial.len(),
            n_params
        )));
    }
    if dataset.len() < n_params {
        return Err(NonConvergence::UnderDetermined {
            points: dataset.len(),
            parameters: n_params,
        }
        .into());
    }

    let mut params = DVector::from_column_slice(initial);
    let mut normal = normal_equations(model, dataset, &params, 0)?;

    debug!(
        points = dataset.len(),
        parameters = n_params,
        ssr = normal.ssr,
        "Starting Levenberg-Marquardt"
    );

    if gradient_converged(&normal, config.gtol) {
        return Ok(finish(model, dataset, params, normal, 0, config));
    }

    let max_diag = normal.jtj.diagonal().max();
    let mut damping = config.initial_damping * max_diag;
    let mut nu = 2.0;
    let mut iteration = 0;

    loop {
        if iteration >= config.max_iterations {
            return Err(NonConvergence::IterationBudgetExhausted { iterations: iteration }.into());
        }
        iteration += 1;

        if damping > MAX_DAMPING {
            return Err(NonConvergence::SingularJacobian {
                iteration,
                parameter: weakest_parameter(&normal.jtj),
            }
            .into());
        }

        let diag = normal.jtj.diagonal();
        let mut damped = normal.jtj.clone();
        for j in 0..n_params {
            damped[(j, j)] += damping * diag[j];
        }

        let step = match damped.cholesky() {
            Some(chol) => chol.solve(&normal.jtr),
            None => {
                trace!(iteration, damping, "Damped normal matrix not positive definite");
                damping *= nu;
                nu *= 2.0;
                continue;
            }
        };

        if step.norm() <= config.xtol * (params.norm() + config.xtol) {
            debug!(iteration, "Converged on step size");
            return Ok(finish(model, dataset, params, normal, iteration, config));
        }

        let candidate = &params + &step;
        let candidate_ssr = sum_of_squares(model, dataset, candidate.as_slice());

        // step^T (lambda * D * step + J^T r)
        let predicted = step
            .iter()
            .zip(diag.iter())
            .zip(normal.jtr.iter())
            .map(|((s, d), g)| s * (damping * d * s + g))
            .sum::<f64>();
        let actual = normal.ssr - candidate_ssr;

        trace!(iteration, damping, ssr = candidate_ssr, actual, predicted, "Trial step");

        if candidate_ssr.is_finite() && predicted > 0.0 && actual > 0.0 {
            let rho = actual / predicted;
            let small_reduction =
                actual <= config.ftol * normal.ssr && predicted <= config.ftol * normal.ssr;

            params = candidate;
            normal = normal_equations(model, dataset, &params, iteration)?;
            damping *= (1.0 - (2.0 * rho - 1.0).powi(3)).max(1.0 / 3.0);
            nu = 2.0;

            if gradient_converged(&normal, config.gtol) {
                debug!(iteration, "Converged on gradient");
                return Ok(finish(model, dataset, params, normal, iteration, config));
            }
            if small_reduction {
                debug!(iteration, "Converged on sum of squares");
                return Ok(finish(model, dataset, params, normal, iteration, config));
            }
        } else {
            damping *= nu;
            nu *= 2.0;
        }
    }
}

fn sum_of_squares<M: FitModel>(model: &M, dataset: &FitDataset, params: &[f64]) -> f64 {
    dataset
        .x()
        .iter()
        .zip(dataset.y())
        .map(|(&x, &y)| {
            let r = y - model.evaluate(x, params);
            r * r
        })
        .sum()
}

fn normal_equations<M: FitModel>(
    model: &M,
    dataset: &FitDataset,
    params: &DVector<f64>,
    iteration: usize,
) -> Result<NormalEquations> {
    let n_params = params.len();
    let p = params.as_slice();
    let mut jtj = DMatrix::<f64>::zeros(n_params, n_params);
    let mut jtr = DVector::<f64>::zeros(n_params);
    let mut ssr = 0.0;
    let mut grad = vec![0.0; n_params];

    for (&x, &y) in dataset.x().iter().zip(dataset.y()) {
        let r = y - model.evaluate(x, p);
        model.gradient(x, p, &mut grad);
        if !r.is_finite() || grad.iter().any(|g| !g.is_finite()) {
            return Err(NonConvergence::NonFiniteModel { iteration }.into());
        }
        ssr += r * r;
        for a in 0..n_params {
            jtr[a] += grad[a] * r;
            for b in a..n_params {
                jtj[(a, b)] += grad[a] * grad[b];
            }
        }
    }
    for a in 0..n_params {
        for b in 0..a {
            jtj[(a, b)] = jtj[(b, a)];
        }
    }

    if let Some(parameter) = (0..n_params).find(|&j| jtj[(j, j)] <= 0.0) {
        return Err(NonConvergence::SingularJacobian { iteration, parameter }.into());
    }
    if let Some(parameter) = dependent_parameter(&jtj) {
        return Err(NonConvergence::SingularJacobian { iteration, parameter }.into());
    }

    Ok(NormalEquations { jtj, jtr, ssr })
}

/// Detects rank deficiency of `J^T J` with a strictly positive diagonal.
///
/// The matrix is scaled to unit diagonal first so the test does not depend on
/// parameter units. Returns the parameter contributing most to the null
/// direction.
fn dependent_parameter(jtj: &DMatrix<f64>) -> Option<usize> {
    let n = jtj.nrows();
    let scale = jtj.diagonal().map(|d| d.sqrt().recip());
    let scaled = DMatrix::from_fn(n, n, |a, b| jtj[(a, b)] * scale[a] * scale[b]);

    let eigen = scaled.symmetric_eigen();
    let smallest = eigen.eigenvalues.imin();
    let eigenvalue = eigen.eigenvalues[smallest];
    if eigenvalue.is_finite() && eigenvalue > RANK_TOLERANCE {
        return None;
    }

    let parameter = eigen.eigenvectors.column(smallest).iamax();
    trace!(eigenvalue, parameter, "Scaled J^T J is rank deficient");
    Some(parameter)
}

/// Largest cosine between the residual vector and any Jacobian column.
fn gradient_converged(normal: &NormalEquations, gtol: f64) -> bool {
    if normal.ssr == 0.0 {
        return true;
    }
    let residual_norm = normal.ssr.sqrt();
    let cosine = normal
        .jtr
        .iter()
        .zip(normal.jtj.diagonal().iter())
        .map(|(g, d)| g.abs() / (d.sqrt() * residual_norm))
        .fold(0.0, f64::max);
    cosine <= gtol
}

fn weakest_parameter(jtj: &DMatrix<f64>) -> usize {
    jtj.diagonal().imin()
}

fn finish<M: FitModel>(
    model: &M,
    dataset: &FitDataset,
    params: DVector<f64>,
    normal: NormalEquations,
    iterations: usize,
    config: &FitConfig,
) -> Solution {
    let covariance = if config.compute_covariance {
        estimate_covariance(&normal, dataset.len(), model.parameter_count())
    } else {
        None
    };

    Solution {
        parameters: params.iter().copied().collect(),
        covariance,
        iterations,
        residual_sum_of_squares: normal.ssr,
    }
}

fn estimate_covariance(normal: &NormalEquations, points: usize, parameters: usize) -> Option<DMatrix<f64>> {
    if points <= parameters {
        warn!(points, parameters, "No degrees of freedom left, covariance not estimated");
        return None;
    }
    match normal.jtj.clone().try_inverse() {
        Some(inverse) => Some(inverse * (normal.ssr / (points - parameters) as f64)),
        None => {
            warn!("J^T J is not invertible, covariance not estimated");
            None
        }
    }
}
