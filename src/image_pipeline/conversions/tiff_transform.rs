use tracing::{info, instrument};
use std::io::{Cursor, Write};
use std::path::Path;

use crate::image_pipeline::{
    common::error::{PipelineError, Result},
    common::image::Image,
    tiff::{StandardTiffReader, StandardTiffWriter, TiffReader, TiffWriter, WriteConfig},
};

/// Reads a TIFF, applies one transform, writes the result as TIFF.
pub struct TiffTransformPipeline<R: TiffReader, W: TiffWriter> {
    reader: R,
    writer: W,
    config: WriteConfig,
}

impl TiffTransformPipeline<StandardTiffReader, StandardTiffWriter> {
    pub fn new(config: WriteConfig) -> Self {
        Self {
            reader: StandardTiffReader,
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl<R: TiffReader, W: TiffWriter> TiffTransformPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: WriteConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    /// Decodes only; used by tools that render something other than a TIFF.
    pub fn read(&self, input_data: &[u8]) -> Result<Image> {
        let _span = tracing::info_span!("decode_tiff").entered();
        self.reader.read_tiff(&mut Cursor::new(input_data))
    }

    #[instrument(skip(self, input_data, output, transform), fields(input_size = input_data.len()))]
    pub fn transform<F>(&self, input_data: &[u8], output: &mut dyn Write, transform: F) -> Result<()>
    where
        F: FnOnce(&Image) -> Result<Image>,
    {
        let image = self.read(input_data)?;

        let result = {
            let _span = tracing::info_span!("apply_transform",
                width = image.width(),
                height = image.height(),
                channels = image.channels()
            ).entered();
            transform(&image)?
        };

        {
            let _span = tracing::info_span!("encode_tiff").entered();
            self.writer.write_tiff(&result, output, &self.config)?;
        }

        info!(
            width = result.width(),
            height = result.height(),
            bits = result.depth().bits(),
            "Transform complete"
        );
        Ok(())
    }

    #[instrument(skip(self, input_path, output_path, transform))]
    pub fn transform_file<P, Q, F>(&self, input_path: P, output_path: Q, transform: F) -> Result<()>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        F: FnOnce(&Image) -> Result<Image>,
    {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Transforming file"
        );

        let input_data = read_input(input_path)?;

        // encode fully before touching the output path
        let mut encoded = Vec::new();
        self.transform(&input_data, &mut encoded, transform)?;

        write_output(output_path, &encoded)
    }

    pub fn read_file<P: AsRef<Path>>(&self, input_path: P) -> Result<Image> {
        let input_data = read_input(input_path.as_ref())?;
        self.read(&input_data)
    }

    /// Encodes `image` to `output_path` with this pipeline's writer and config.
    pub fn write_file<Q: AsRef<Path>>(&self, image: &Image, output_path: Q) -> Result<()> {
        let mut encoded = Vec::new();
        self.writer.write_tiff(image, &mut encoded, &self.config)?;
        write_output(output_path.as_ref(), &encoded)
    }
}

fn read_input(input_path: &Path) -> Result<Vec<u8>> {
    let _span = tracing::info_span!("read_input_file").entered();
    std::fs::read(input_path)
        .map_err(|e| PipelineError::InputReadError(format!("{}: {}", input_path.display(), e)))
}

fn write_output(output_path: &Path, encoded: &[u8]) -> Result<()> {
    let _span = tracing::info_span!("write_output_file").entered();
    let mut output_file = std::fs::File::create(output_path).map_err(|e| {
        PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e))
    })?;
    output_file.write_all(encoded)?;
    Ok(())
}
