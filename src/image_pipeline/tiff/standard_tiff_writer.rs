use std::io::Write;
use tracing::debug;
use tiff::encoder::colortype;
use crate::image_pipeline::common::error::{Result, PipelineError};
use crate::image_pipeline::common::image::{BitDepth, Image};
use crate::image_pipeline::tiff::types::{WriteConfig, TiffCompression};
use crate::image_pipeline::tiff::writer::TiffWriter;

pub struct StandardTiffWriter;

impl TiffWriter for StandardTiffWriter {
    fn write_tiff(&self, image: &Image, output: &mut dyn Write, config: &WriteConfig) -> Result<()> {
        debug!(
            "Encoding TIFF image: {}x{}x{} at {} bits",
            image.width(),
            image.height(),
            image.channels(),
            image.depth().bits()
        );

        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
        };

        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| PipelineError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => tiff::tags::Predictor::Horizontal,
                _ => tiff::tags::Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        let width = image.width() as u32;
        let height = image.height() as u32;
        let narrow: Vec<u8>;

        let written = match (image.depth(), image.channels()) {
            (BitDepth::Sixteen, 1) => encoder.write_image::<colortype::Gray16>(width, height, image.data()),
            (BitDepth::Sixteen, 3) => encoder.write_image::<colortype::RGB16>(width, height, image.data()),
            (BitDepth::Sixteen, 4) => encoder.write_image::<colortype::RGBA16>(width, height, image.data()),
            (BitDepth::Eight, channels @ (1 | 3 | 4)) => {
                narrow = image.data().iter().map(|&v| v as u8).collect();
                match channels {
                    1 => encoder.write_image::<colortype::Gray8>(width, height, &narrow),
                    3 => encoder.write_image::<colortype::RGB8>(width, height, &narrow),
                    _ => encoder.write_image::<colortype::RGBA8>(width, height, &narrow),
                }
            }
            (_, channels) => {
                return Err(PipelineError::UnsupportedFormat(format!(
                    "cannot encode {channels}-channel TIFF"
                )))
            }
        };
        written.map_err(|e| PipelineError::EncodeError(e.to_string()))?;
        drop(encoder);

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}
