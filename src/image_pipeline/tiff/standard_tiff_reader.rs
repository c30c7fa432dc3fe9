use tracing::debug;
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use crate::image_pipeline::common::error::{Result, PipelineError};
use crate::image_pipeline::common::image::{BitDepth, Image};
use crate::image_pipeline::tiff::reader::{ReadSeek, TiffReader};

/// Decodes 8- and 16-bit grayscale, RGB and RGBA TIFF files.
pub struct StandardTiffReader;

impl TiffReader for StandardTiffReader {
    fn read_tiff(&self, input: &mut dyn ReadSeek) -> Result<Image> {
        let mut decoder = Decoder::new(input).map_err(|e| PipelineError::DecodeError(e.to_string()))?;

        let (width, height) = decoder
            .dimensions()
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;
        let color = decoder
            .colortype()
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;

        debug!("Decoding TIFF image: {}x{} {:?}", width, height, color);

        let channels = match color {
            ColorType::Gray(_) => 1,
            ColorType::RGB(_) => 3,
            ColorType::RGBA(_) => 4,
            other => return Err(PipelineError::UnsupportedFormat(format!("{other:?}"))),
        };

        let decoded = decoder
            .read_image()
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;

        let (depth, data) = match decoded {
            DecodingResult::U8(values) => (BitDepth::Eight, values.into_iter().map(u16::from).collect()),
            DecodingResult::U16(values) => (BitDepth::Sixteen, values),
            _ => {
                return Err(PipelineError::UnsupportedFormat(
                    "only 8-bit and 16-bit unsigned samples are supported".to_string(),
                ))
            }
        };

        Image::from_vec(width as usize, height as usize, channels, depth, data)
    }
}
