use tracing::{info, instrument};
use std::path::Path;

use crate::image_pipeline::{
    common::error::{PipelineError, Result},
    common::image::Image,
    debayer::{CpuDebayer, DevelopConfig},
    raw::{RawImageReader, RawLoaderReader},
};

/// Reads a camera RAW file and develops it into a 16-bit RGB image.
pub struct RawDevelopPipeline<R: RawImageReader> {
    reader: R,
    debayer: CpuDebayer,
}

impl RawDevelopPipeline<RawLoaderReader> {
    pub fn new(config: DevelopConfig) -> Self {
        Self {
            reader: RawLoaderReader,
            debayer: CpuDebayer::new(config),
        }
    }
}

impl<R: RawImageReader> RawDevelopPipeline<R> {
    pub fn with_custom(reader: R, config: DevelopConfig) -> Self {
        Self {
            reader,
            debayer: CpuDebayer::new(config),
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize, samples: usize, components: usize) -> Result<()> {
        if !self.config().validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }

        let expected = width * height * components;
        if samples != expected {
            return Err(PipelineError::BufferSizeMismatch {
                expected,
                actual: samples,
            });
        }

        Ok(())
    }

    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn develop(&self, input_data: &[u8]) -> Result<Image> {
        let raw_image = {
            let _span = tracing::info_span!("decode_raw").entered();
            self.reader.read_raw(input_data)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = raw_image.width,
                height = raw_image.height
            ).entered();
            self.validate_dimensions(
                raw_image.width,
                raw_image.height,
                raw_image.data.len(),
                raw_image.components,
            )?;
        }

        let image = {
            let _span = tracing::info_span!("debayer").entered();
            self.debayer.process(&raw_image)?
        };

        info!(
            width = image.width(),
            height = image.height(),
            bits = raw_image.bits_per_sample,
            "RAW developed"
        );
        Ok(image)
    }

    #[instrument(skip(self, input_path))]
    pub fn develop_file<P: AsRef<Path>>(&self, input_path: P) -> Result<Image> {
        let input_path = input_path.as_ref();

        info!(input = %input_path.display(), "Developing file");

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                PipelineError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        self.develop(&input_data)
    }

    pub fn config(&self) -> &DevelopConfig {
        self.debayer.config()
    }
}
