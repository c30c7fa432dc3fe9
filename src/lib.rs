//! Focal-plane calibration tools
//!
//! RAW development and TIFF adjustment utilities, intensity profiles along
//! pixel lines, and multi-peak curve fitting of those profiles.

pub mod fitting;
pub mod image_pipeline;
pub mod logger;
pub mod report;
