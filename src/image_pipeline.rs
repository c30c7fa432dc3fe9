//! Image processing pipeline module
//!
//! This module provides a structured approach to the calibration image tools,
//! with separate modules for RAW reading, debayering, TIFF I/O, pixel
//! transforms, line profiles and conversion orchestration.

pub mod raw;
pub mod debayer;
pub mod tiff;
pub mod transforms;
pub mod profile;
pub mod conversions;
pub mod common;

pub use common::{
    BitDepth,
    Image,
    PipelineError,
    Result,
};

pub use raw::{
    RawImageData,
    RawImageReader,
    RawLoaderReader,
};

pub use debayer::{
    CpuDebayer,
    DebayerAlgorithm,
    DevelopConfig,
    DevelopConfigBuilder,
};

pub use self::tiff::{
    TiffCompression,
    WriteConfig,
    WriteConfigBuilder,
    TiffReader,
    StandardTiffReader,
    TiffWriter,
    StandardTiffWriter,
};

pub use transforms::{
    adjust_brightness_contrast,
    apply_gamma,
    composite,
    draw_grid,
    requantize,
    CompositeMethod,
};

pub use profile::{
    rasterize_line,
    sample_line,
    MAX_LINE_LENGTH,
    ChannelOrder,
    IntensityProfile,
    LineSegment,
    Point,
    ProfileSamples,
};

pub use conversions::{
    RawDevelopPipeline,
    TiffTransformPipeline,
};
