//! RAW image reader implementation using the rawloader library.
//!
//! Handles any RAW format rawloader can decode (NEF, ARW, CR2, DNG, ...). The
//! sensor data is converted to `u16` and the levels, white balance and CFA
//! layout are kept so the debayer stage can develop it.

use std::io::Cursor;

use tracing::{debug, warn};
use rawloader::RawImageData as RawloaderImageData;
use crate::image_pipeline::common::error::{Result, PipelineError};
use crate::image_pipeline::raw::types::RawImageData;
use crate::image_pipeline::raw::reader::RawImageReader;

/// RAW image reader that uses the rawloader library for decoding.
pub struct RawLoaderReader;

/// Default bit depth when no white level information is available from the RAW file.
const DEFAULT_BITS_PER_SAMPLE: u32 = 16;

/// The bit width of the u16 data type, used for calculating actual bits per sample.
const U16_BITS: u32 = 16;

impl RawImageReader for RawLoaderReader {
    /// Reads and decodes RAW image data from a byte array.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use focal_plane_adjuster_rs::image_pipeline::{RawImageReader, RawLoaderReader};
    ///
    /// let reader = RawLoaderReader;
    /// let raw_bytes = std::fs::read("image.nef").unwrap();
    /// let image_data = reader.read_raw(&raw_bytes).unwrap();
    /// ```
    fn read_raw(&self, data: &[u8]) -> Result<RawImageData> {
        debug!("Decoding RAW image, {} bytes", data.len());

        let decoded = rawloader::decode(&mut Cursor::new(data))
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;

        let width = decoded.width;
        let height = decoded.height;
        let components = decoded.cpp;

        debug!("Decoded image: {}x{} ({} component(s))", width, height, components);

        // Float data is normalized to 0.0-1.0, so scale it into the u16 range
        let data: Vec<u16> = match decoded.data {
            RawloaderImageData::Integer(values) => values,
            RawloaderImageData::Float(values) => values
                .iter()
                .map(|&v| (v.clamp(0.0, 1.0) * u16::MAX as f32) as u16)
                .collect(),
        };

        let white_level = decoded.whitelevels.iter().max().copied().unwrap_or(u16::MAX);
        let bits_per_sample = if white_level == 0 {
            DEFAULT_BITS_PER_SAMPLE
        } else {
            // e.g. 4095 -> 12 bits, 16383 -> 14 bits
            U16_BITS - white_level.leading_zeros()
        };
        let white_level = if white_level == 0 { u16::MAX } else { white_level };
        let black_level = decoded.blacklevels.iter().min().copied().unwrap_or(0);

        debug!(
            "Calculated bits_per_sample: {} (white level: {}, black level: {})",
            bits_per_sample, white_level, black_level
        );

        let wb_coeffs = normalize_white_balance([
            decoded.wb_coeffs[0],
            decoded.wb_coeffs[1],
            decoded.wb_coeffs[2],
        ]);

        Ok(RawImageData {
            width,
            height,
            components,
            data,
            bits_per_sample,
            black_level,
            white_level,
            wb_coeffs,
            cfa_pattern: decoded.cfa.name.clone(),
        })
    }
}

/// Scales white balance so that green is 1.0.
///
/// Some cameras report NaN or zero coefficients; those fall back to neutral.
fn normalize_white_balance(coeffs: [f32; 3]) -> [f32; 3] {
    let valid = coeffs.iter().all(|c| c.is_finite() && *c > 0.0);
    if !valid {
        warn!("White balance coefficients {:?} unusable, using neutral", coeffs);
        return [1.0, 1.0, 1.0];
    }
    let green = coeffs[1];
    [coeffs[0] / green, 1.0, coeffs[2] / green]
}
