use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::image::Image;
use crate::image_pipeline::tiff::types::WriteConfig;

pub trait TiffWriter {
    fn write_tiff(&self, image: &Image, output: &mut dyn Write, config: &WriteConfig) -> Result<()>;
}
