use tracing::{info, warn};
use std::io::Cursor;
use bayer::{BayerDepth, CFA, RasterDepth, RasterMut};
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::common::image::{BitDepth, Image};
use crate::image_pipeline::debayer::types::DevelopConfig;
use crate::image_pipeline::raw::types::RawImageData;

/// Develops RAW sensor data into a 16-bit RGB image on the CPU.
pub struct CpuDebayer {
    config: DevelopConfig,
}

impl CpuDebayer {
    pub fn new(config: DevelopConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DevelopConfig {
        &self.config
    }

    /// Demosaics, black-level corrects and white balances `raw_image`.
    ///
    /// The result is interleaved R, G, B in natural order at 16-bit depth.
    pub fn process(&self, raw_image: &RawImageData) -> Result<Image> {
        let width = raw_image.width;
        let height = raw_image.height;
        info!("Starting CPU debayering for image {}x{}", width, height);

        let rgb_linear = match raw_image.components {
            1 => self.demosaic(raw_image)?,
            3 => raw_image.data.clone(),
            n => {
                return Err(PipelineError::UnsupportedFormat(format!(
                    "{n} components per pixel"
                )))
            }
        };

        let black_level = raw_image.black_level as f32;
        let white_level = raw_image.white_level as f32;
        let range = (white_level - black_level).max(1.0);
        let wb = raw_image.wb_coeffs;
        let inv_gamma = self.config.output_gamma.filter(|g| *g > 0.0).map(|g| 1.0 / g);

        let data: Vec<u16> = rgb_linear
            .chunks_exact(3)
            .flat_map(|px| {
                let mut out = [0u16; 3];
                for (c, value) in out.iter_mut().enumerate() {
                    let lin = ((px[c] as f32 - black_level).max(0.0) / range * wb[c]).min(1.0);
                    let v = match inv_gamma {
                        Some(inv) => lin.powf(inv),
                        None => lin,
                    };
                    *value = (v * 65535.0).clamp(0.0, 65535.0) as u16;
                }
                out
            })
            .collect();

        Image::from_vec(width, height, 3, BitDepth::Sixteen, data)
    }

    /// Runs the bayer crate on a single-plane mosaic; returns interleaved RGB.
    fn demosaic(&self, raw_image: &RawImageData) -> Result<Vec<u16>> {
        let width = raw_image.width;
        let height = raw_image.height;

        // bayer crate only supports 8 and 16 bit
        let (bayer_depth, raster_depth, bytes_per_pixel) = if raw_image.bits_per_sample <= 8 {
            (BayerDepth::Depth8, RasterDepth::Depth8, 1)
        } else {
            (BayerDepth::Depth16LE, RasterDepth::Depth16, 2)
        };

        let bayer_bytes: Vec<u8> = if bytes_per_pixel == 1 {
            raw_image.data.iter().map(|&val| val.min(255) as u8).collect()
        } else {
            raw_image.data.iter().flat_map(|&val| val.to_le_bytes()).collect()
        };

        let mut output_buf = vec![0u8; width * height * 3 * bytes_per_pixel];
        let mut cursor = Cursor::new(&bayer_bytes[..]);
        let cfa = cfa_from_pattern(&raw_image.cfa_pattern);

        info!(
            "Running demosaic with depth={:?}, CFA={:?}, algo={:?}",
            bayer_depth, cfa, self.config.algorithm
        );

        let mut output_raster = RasterMut::new(width, height, raster_depth, &mut output_buf);
        bayer::run_demosaic(
            &mut cursor,
            bayer_depth,
            cfa,
            self.config.algorithm.to_bayer(),
            &mut output_raster,
        )
        .map_err(|e| PipelineError::DebayerError(format!("{:?}", e)))?;

        let rgb = if bytes_per_pixel == 1 {
            output_buf.iter().map(|&b| b as u16).collect()
        } else {
            output_buf
                .chunks_exact(2)
                .map(|b| u16::from_le_bytes([b[0], b[1]]))
                .collect()
        };
        Ok(rgb)
    }
}

/// Maps the decoder's CFA name onto the 2x2 patterns the bayer crate knows.
fn cfa_from_pattern(pattern: &str) -> CFA {
    let head: String = pattern
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(4)
        .collect::<String>()
        .to_ascii_uppercase();
    match head.as_str() {
        "RGGB" => CFA::RGGB,
        "BGGR" => CFA::BGGR,
        "GRBG" => CFA::GRBG,
        "GBRG" => CFA::GBRG,
        _ => {
            warn!("Unknown CFA pattern {:?}, assuming RGGB", pattern);
            CFA::RGGB
        }
    }
}
