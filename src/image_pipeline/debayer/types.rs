//! Types for debayering operations

/// Interpolation used to fill in the missing colour samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebayerAlgorithm {
    /// Copy the nearest sample of each colour
    NearestNeighbour,
    /// Bilinear interpolation (default)
    Linear,
    /// Bicubic interpolation
    Cubic,
}

impl DebayerAlgorithm {
    pub(crate) fn to_bayer(self) -> bayer::Demosaic {
        match self {
            DebayerAlgorithm::NearestNeighbour => bayer::Demosaic::NearestNeighbour,
            DebayerAlgorithm::Linear => bayer::Demosaic::Linear,
            DebayerAlgorithm::Cubic => bayer::Demosaic::Cubic,
        }
    }
}

/// Configuration for developing a RAW mosaic into an RGB image
#[derive(Debug, Clone)]
pub struct DevelopConfig {
    /// Demosaic interpolation
    pub algorithm: DebayerAlgorithm,
    /// Display gamma applied after white balance; None keeps the data linear
    pub output_gamma: Option<f32>,
    /// Whether to validate image dimensions before debayering
    pub validate_dimensions: bool,
}

impl Default for DevelopConfig {
    fn default() -> Self {
        Self {
            algorithm: DebayerAlgorithm::Linear,
            output_gamma: Some(2.2),
            validate_dimensions: true,
        }
    }
}

impl DevelopConfig {
    pub fn builder() -> DevelopConfigBuilder {
        DevelopConfigBuilder::default()
    }
}

/// Builder for DevelopConfig
#[derive(Default)]
pub struct DevelopConfigBuilder {
    algorithm: Option<DebayerAlgorithm>,
    output_gamma: Option<Option<f32>>,
    validate_dimensions: Option<bool>,
}

impl DevelopConfigBuilder {
    pub fn algorithm(mut self, algorithm: DebayerAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn output_gamma(mut self, gamma: Option<f32>) -> Self {
        self.output_gamma = Some(gamma);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn build(self) -> DevelopConfig {
        let default = DevelopConfig::default();
        DevelopConfig {
            algorithm: self.algorithm.unwrap_or(default.algorithm),
            output_gamma: self.output_gamma.unwrap_or(default.output_gamma),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
        }
    }
}
