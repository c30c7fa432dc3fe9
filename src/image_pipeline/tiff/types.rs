//! Settings for the TIFF files the tools write

/// Compression applied to written strips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// Uncompressed (default)
    None,
    Lzw,
    DeflateFast,
    DeflateBest,
    DeflateBalanced,
}

/// How adjusted images are encoded
#[derive(Debug, Clone)]
pub struct WriteConfig {
    pub compression: TiffCompression,
    /// TIFF predictor tag; `Some(2)` selects horizontal differencing, any
    /// other value writes no predictor
    pub predictor: Option<u16>,
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::None,
            predictor: None,
        }
    }
}

impl WriteConfig {
    pub fn builder() -> WriteConfigBuilder {
        WriteConfigBuilder::default()
    }
}

/// Builder for WriteConfig
#[derive(Default)]
pub struct WriteConfigBuilder {
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
}

impl WriteConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn build(self) -> WriteConfig {
        let default = WriteConfig::default();
        WriteConfig {
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
        }
    }
}
