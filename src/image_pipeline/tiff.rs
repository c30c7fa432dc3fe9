//! TIFF reading and writing module
//!
//! This module provides TIFF file decoding into [`Image`](crate::image_pipeline::Image)
//! and encoding with various compression options.

mod reader;
mod standard_tiff_reader;
mod writer;
mod standard_tiff_writer;
pub mod types;


pub use reader::{ReadSeek, TiffReader};
pub use standard_tiff_reader::StandardTiffReader;
pub use writer::TiffWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{TiffCompression, WriteConfig, WriteConfigBuilder};
