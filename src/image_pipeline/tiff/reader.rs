use std::io::{Read, Seek};
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::image::Image;

pub trait TiffReader {
    fn read_tiff(&self, input: &mut dyn ReadSeek) -> Result<Image>;
}

/// Object-safe combination of `Read` and `Seek`, which the TIFF decoder needs.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}
