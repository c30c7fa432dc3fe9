//! Pixel-wise and stack-wise image transforms
//!
//! Every transform returns a new image with the input's depth unless it says
//! otherwise. Samples are clipped to the depth's range and truncated toward
//! zero.

mod brightness_contrast;
mod composite;
mod gamma;
mod grid;
mod requantize;

#[cfg(test)]
mod tests;

pub use brightness_contrast::adjust_brightness_contrast;
pub use composite::{composite, CompositeMethod};
pub use gamma::apply_gamma;
pub use grid::draw_grid;
pub use requantize::requantize;

/// Clips a float sample to `[0, max]` and truncates it.
pub(crate) fn clip_to_depth(value: f32, max: u16) -> u16 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, max as f32) as u16
}
