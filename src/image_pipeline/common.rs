//! Common utilities module
//!
//! This module contains the image type and error type shared across the image pipeline.

pub mod error;
pub mod image;

pub use error::{PipelineError, Result};
pub use image::{BitDepth, Image};
