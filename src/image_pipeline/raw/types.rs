//! RAW image data types

/// Decoded RAW sensor data plus the metadata needed to develop it.
#[derive(Debug, Clone)]
pub struct RawImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Samples per pixel: 1 for a CFA mosaic, 3 for already-demosaiced data
    pub components: usize,
    /// Raw pixel data, row-major, `components` samples per pixel
    pub data: Vec<u16>,
    /// Actual bits per sample from the sensor (e.g., 12, 14, or 16)
    pub bits_per_sample: u32,
    /// Sensor black level
    pub black_level: u16,
    /// Sensor white (saturation) level
    pub white_level: u16,
    /// White balance multipliers in R, G, B order
    pub wb_coeffs: [f32; 3],
    /// Colour filter array pattern name as reported by the decoder, e.g. "RGGB"
    pub cfa_pattern: String,
}
