use tracing::debug;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::common::image::Image;
use crate::image_pipeline::transforms::clip_to_depth;

/// Applies `v' = max * (v / max)^(1 / gamma)`.
pub fn apply_gamma(image: &Image, gamma: f32) -> Result<Image> {
    if !gamma.is_finite() || gamma <= 0.0 {
        return Err(PipelineError::InvalidParameter {
            name: "gamma",
            reason: format!("{gamma} must be positive and finite"),
        });
    }

    let max = image.max_value();
    let max_f = max as f32;
    let exponent = 1.0 / gamma;

    debug!(gamma, max, "Applying gamma correction");

    // indexed by input sample
    let lut: Vec<u16> = (0..=max)
        .map(|v| clip_to_depth((v as f32 / max_f).powf(exponent) * max_f, max))
        .collect();

    Ok(image.map_samples(|v| lut[v as usize]))
}
