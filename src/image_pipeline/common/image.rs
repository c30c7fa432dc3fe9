//! In-memory raster image shared by every tool.

use crate::image_pipeline::common::error::{PipelineError, Result};

/// Sample depth of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    Eight,
    Sixteen,
}

impl BitDepth {
    /// Largest representable sample value.
    pub fn max_value(self) -> u16 {
        match self {
            BitDepth::Eight => u8::MAX as u16,
            BitDepth::Sixteen => u16::MAX,
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            BitDepth::Eight => 8,
            BitDepth::Sixteen => 16,
        }
    }
}

/// Rectangular image with interleaved channels.
///
/// Samples are stored as `u16` for both depths; an 8-bit image simply never
/// holds values above 255. Row-major, `channels` samples per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    channels: usize,
    depth: BitDepth,
    data: Vec<u16>,
}

impl Image {
    /// Builds an image from an interleaved sample buffer.
    ///
    /// Fails if either dimension or the channel count is zero, if the buffer
    /// length does not match, or if a sample exceeds the depth's maximum.
    pub fn from_vec(
        width: usize,
        height: usize,
        channels: usize,
        depth: BitDepth,
        data: Vec<u16>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }
        if channels == 0 {
            return Err(PipelineError::InvalidParameter {
                name: "channels",
                reason: "image must have at least one channel".to_string(),
            });
        }

        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(PipelineError::InvalidDimensions(width, height))?;
        if data.len() != expected {
            return Err(PipelineError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let max = depth.max_value();
        if let Some(v) = data.iter().find(|&&v| v > max) {
            return Err(PipelineError::InvalidParameter {
                name: "data",
                reason: format!("sample {} exceeds {}-bit maximum {}", v, depth.bits(), max),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            depth,
            data,
        })
    }

    /// Image with every sample set to `value` (clamped to the depth).
    pub fn filled(
        width: usize,
        height: usize,
        channels: usize,
        depth: BitDepth,
        value: u16,
    ) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(PipelineError::InvalidDimensions(width, height))?;
        Self::from_vec(
            width,
            height,
            channels,
            depth,
            vec![value.min(depth.max_value()); len],
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    pub fn max_value(&self) -> u16 {
        self.depth.max_value()
    }

    pub fn data(&self) -> &[u16] {
        &self.data
    }

    /// Sample at column `x`, row `y`, channel `c`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of range.
    pub fn get(&self, x: usize, y: usize, c: usize) -> u16 {
        self.data[self.index(x, y, c)]
    }

    /// Writes a sample, clamping it to the image depth.
    pub fn set(&mut self, x: usize, y: usize, c: usize, value: u16) {
        let idx = self.index(x, y, c);
        self.data[idx] = value.min(self.depth.max_value());
    }

    /// Rebuilds the image with every sample passed through `f`.
    ///
    /// Results are clamped to the image depth, so the depth invariant holds
    /// whatever `f` returns.
    pub fn map_samples<F: Fn(u16) -> u16>(&self, f: F) -> Image {
        let max = self.depth.max_value();
        Image {
            width: self.width,
            height: self.height,
            channels: self.channels,
            depth: self.depth,
            data: self.data.iter().map(|&v| f(v).min(max)).collect(),
        }
    }

    /// True when both images have the same width, height, channels and depth.
    pub fn same_layout(&self, other: &Image) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.channels == other.channels
            && self.depth == other.depth
    }

    fn index(&self, x: usize, y: usize, c: usize) -> usize {
        assert!(
            x < self.width && y < self.height && c < self.channels,
            "pixel ({x}, {y}, {c}) outside {}x{}x{} image",
            self.width,
            self.height,
            self.channels
        );
        (y * self.width + x) * self.channels + c
    }
}
