//! Pipeline conversions module
//!
//! This module contains orchestration logic tying readers, transforms and
//! writers together for the command-line tools.

mod raw_develop;
mod tiff_transform;


pub use raw_develop::RawDevelopPipeline;
pub use tiff_transform::TiffTransformPipeline;
