//! Peak fit data, parameters and solver configuration

use nalgebra::DMatrix;
use crate::fitting::error::{FitError, Result};

/// Number of free parameters in the 3-Lorentzian + 1-Gaussian model.
pub const PARAMETER_COUNT: usize = 12;

/// Default step budget, 200 * (parameters + 1).
pub const DEFAULT_MAX_ITERATIONS: usize = 200 * (PARAMETER_COUNT + 1);

/// Default relative tolerance, roughly the square root of f64 epsilon.
pub const DEFAULT_TOLERANCE: f64 = 1.49012e-8;

/// `A * w^2 / ((x - center)^2 + w^2)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lorentzian {
    pub amplitude: f64,
    pub center: f64,
    /// Half-width at half-maximum
    pub width: f64,
}

/// `A * exp(-(x - center)^2 / (2 sigma^2))`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaussian {
    pub amplitude: f64,
    pub center: f64,
    /// Standard deviation
    pub sigma: f64,
}

/// The twelve model parameters.
///
/// Flattened order is `(A1, x01, w1, A2, x02, w2, A3, x03, w3, A4, x04, sigma4)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakParameters {
    pub lorentzians: [Lorentzian; 3],
    pub gaussian: Gaussian,
}

impl PeakParameters {
    pub fn to_array(&self) -> [f64; PARAMETER_COUNT] {
        let [l1, l2, l3] = self.lorentzians;
        let g = self.gaussian;
        [
            l1.amplitude, l1.center, l1.width,
            l2.amplitude, l2.center, l2.width,
            l3.amplitude, l3.center, l3.width,
            g.amplitude, g.center, g.sigma,
        ]
    }

    /// Inverse of [`to_array`](Self::to_array); `None` unless exactly twelve values.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        if values.len() != PARAMETER_COUNT {
            return None;
        }
        let lorentzian = |i: usize| Lorentzian {
            amplitude: values[3 * i],
            center: values[3 * i + 1],
            width: values[3 * i + 2],
        };
        Some(Self {
            lorentzians: [lorentzian(0), lorentzian(1), lorentzian(2)],
            gaussian: Gaussian {
                amplitude: values[9],
                center: values[10],
                sigma: values[11],
            },
        })
    }
}

/// Paired x/y observations.
#[derive(Debug, Clone, PartialEq)]
pub struct FitDataset {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl FitDataset {
    /// Fails on unequal lengths or NaN / infinite values.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(FitError::LengthMismatch { x: x.len(), y: y.len() });
        }
        if let Some(row) = x.iter().position(|v| !v.is_finite()) {
            return Err(FitError::NonFiniteData { column: "x", row });
        }
        if let Some(row) = y.iter().position(|v| !v.is_finite()) {
            return Err(FitError::NonFiniteData { column: "y", row });
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Smallest and largest x, or `None` for an empty dataset.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        let first = *self.x.first()?;
        Some(self.x.iter().fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))))
    }
}

/// Solver configuration
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Maximum number of attempted steps, accepted or rejected
    pub max_iterations: usize,
    /// Converged when both actual and predicted relative reduction of the
    /// sum of squares fall below this
    pub ftol: f64,
    /// Converged when the step is this small relative to the parameter norm
    pub xtol: f64,
    /// Converged when the cosine between residuals and every Jacobian column
    /// falls to this
    pub gtol: f64,
    /// Initial damping relative to the largest diagonal entry of `J^T J`
    pub initial_damping: f64,
    /// Whether to estimate the parameter covariance after convergence
    pub compute_covariance: bool,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            ftol: DEFAULT_TOLERANCE,
            xtol: DEFAULT_TOLERANCE,
            gtol: 0.0,
            initial_damping: 1e-3,
            compute_covariance: true,
        }
    }
}

impl FitConfig {
    pub fn builder() -> FitConfigBuilder {
        FitConfigBuilder::default()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(FitError::InvalidConfig("max_iterations must be at least 1".to_string()));
        }
        for (name, value) in [
            ("ftol", self.ftol),
            ("xtol", self.xtol),
            ("gtol", self.gtol),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FitError::InvalidConfig(format!("{name} must be finite and non-negative")));
            }
        }
        if !self.initial_damping.is_finite() || self.initial_damping <= 0.0 {
            return Err(FitError::InvalidConfig("initial_damping must be positive".to_string()));
        }
        Ok(())
    }
}

/// Builder for FitConfig
#[derive(Default)]
pub struct FitConfigBuilder {
    max_iterations: Option<usize>,
    ftol: Option<f64>,
    xtol: Option<f64>,
    gtol: Option<f64>,
    initial_damping: Option<f64>,
    compute_covariance: Option<bool>,
}

impl FitConfigBuilder {
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn ftol(mut self, ftol: f64) -> Self {
        self.ftol = Some(ftol);
        self
    }

    pub fn xtol(mut self, xtol: f64) -> Self {
        self.xtol = Some(xtol);
        self
    }

    pub fn gtol(mut self, gtol: f64) -> Self {
        self.gtol = Some(gtol);
        self
    }

    pub fn initial_damping(mut self, damping: f64) -> Self {
        self.initial_damping = Some(damping);
        self
    }

    pub fn compute_covariance(mut self, enable: bool) -> Self {
        self.compute_covariance = Some(enable);
        self
    }

    pub fn build(self) -> FitConfig {
        let default = FitConfig::default();
        FitConfig {
            max_iterations: self.max_iterations.unwrap_or(default.max_iterations),
            ftol: self.ftol.unwrap_or(default.ftol),
            xtol: self.xtol.unwrap_or(default.xtol),
            gtol: self.gtol.unwrap_or(default.gtol),
            initial_damping: self.initial_damping.unwrap_or(default.initial_damping),
            compute_covariance: self.compute_covariance.unwrap_or(default.compute_covariance),
        }
    }
}

/// Converged fit.
#[derive(Debug, Clone)]
pub struct FitResult {
    pub parameters: PeakParameters,
    /// `inv(J^T J) * SSR / (n - p)` in flattened parameter order; `None` when
    /// not requested or not estimable
    pub covariance: Option<DMatrix<f64>>,
    pub iterations: usize,
    pub residual_sum_of_squares: f64,
}

impl FitResult {
    /// One-sigma uncertainties from the covariance diagonal.
    pub fn standard_errors(&self) -> Option<PeakParameters> {
        let cov = self.covariance.as_ref()?;
        let errors: Vec<f64> = cov.diagonal().iter().map(|v| v.max(0.0).sqrt()).collect();
        PeakParameters::from_slice(&errors)
    }
}
