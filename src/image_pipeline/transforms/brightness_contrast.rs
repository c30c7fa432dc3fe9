use tracing::debug;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::common::image::Image;
use crate::image_pipeline::transforms::clip_to_depth;

/// Scales contrast about mid-grey, then shifts brightness.
///
/// `brightness` is expressed on the 8-bit scale (-255..=255) and is scaled by
/// `max / 255` for 16-bit images. `contrast` is a multiplier of at least 0.1.
pub fn adjust_brightness_contrast(image: &Image, brightness: i32, contrast: f32) -> Result<Image> {
    if !(-255..=255).contains(&brightness) {
        return Err(PipelineError::InvalidParameter {
            name: "brightness",
            reason: format!("{brightness} is outside -255..=255"),
        });
    }
    if !contrast.is_finite() || contrast < 0.1 {
        return Err(PipelineError::InvalidParameter {
            name: "contrast",
            reason: format!("{contrast} must be a finite value of at least 0.1"),
        });
    }

    let max = image.max_value();
    let mid = max as f32 / 2.0;
    let offset = brightness as f32 * (max as f32 / 255.0);

    debug!(brightness, contrast, max, "Adjusting brightness and contrast");

    Ok(image.map_samples(|v| clip_to_depth((v as f32 - mid) * contrast + mid + offset, max)))
}
