use crate::fitting::levenberg_marquardt::FitModel;
use crate::fitting::types::{PeakParameters, PARAMETER_COUNT};

/// `amplitude * width^2 / ((x - center)^2 + width^2)`
pub fn lorentzian(x: f64, amplitude: f64, center: f64, width: f64) -> f64 {
    let w2 = width * width;
    let d = x - center;
    amplitude * w2 / (d * d + w2)
}

/// `amplitude * exp(-(x - center)^2 / (2 sigma^2))`
pub fn gaussian(x: f64, amplitude: f64, center: f64, sigma: f64) -> f64 {
    let d = x - center;
    amplitude * (-(d * d) / (2.0 * sigma * sigma)).exp()
}

/// Sum of the three Lorentzians and the Gaussian at `x`.
pub fn combined_function(x: f64, params: &PeakParameters) -> f64 {
    let [l1, l2, l3] = params.lorentzians;
    let g = params.gaussian;
    lorentzian(x, l1.amplitude, l1.center, l1.width)
        + lorentzian(x, l2.amplitude, l2.center, l2.width)
        + lorentzian(x, l3.amplitude, l3.center, l3.width)
        + gaussian(x, g.amplitude, g.center, g.sigma)
}

/// The 3-Lorentzian + 1-Gaussian model over a flattened parameter vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeakModel;

impl FitModel for PeakModel {
    fn parameter_count(&self) -> usize {
        PARAMETER_COUNT
    }

    fn evaluate(&self, x: f64, p: &[f64]) -> f64 {
        lorentzian(x, p[0], p[1], p[2])
            + lorentzian(x, p[3], p[4], p[5])
            + lorentzian(x, p[6], p[7], p[8])
            + gaussian(x, p[9], p[10], p[11])
    }

    fn gradient(&self, x: f64, p: &[f64], out: &mut [f64]) {
        for k in 0..3 {
            let (a, center, w) = (p[3 * k], p[3 * k + 1], p[3 * k + 2]);
            let d = x - center;
            let w2 = w * w;
            let denom = d * d + w2;
            let denom2 = denom * denom;
            out[3 * k] = w2 / denom;
            out[3 * k + 1] = 2.0 * a * w2 * d / denom2;
            out[3 * k + 2] = 2.0 * a * w * d * d / denom2;
        }

        let (a, center, sigma) = (p[9], p[10], p[11]);
        let d = x - center;
        let s2 = sigma * sigma;
        let e = (-(d * d) / (2.0 * s2)).exp();
        out[9] = e;
        out[10] = a * e * d / s2;
        out[11] = a * e * d * d / (s2 * sigma);
    }
}
