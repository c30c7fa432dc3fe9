//! Line profile sampling module
//!
//! Rasterizes a segment between two integer points and samples an image
//! along it, one value per channel per rasterized point.

mod line;
mod sampler;
pub mod types;

#[cfg(test)]
mod tests;

pub use line::{rasterize_line, MAX_LINE_LENGTH};
pub use sampler::sample_line;
pub use types::{ChannelOrder, IntensityProfile, LineSegment, Point, ProfileSamples};
