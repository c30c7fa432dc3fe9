use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::image::{BitDepth, Image};

/// Rescales samples to `depth`, rounding to the nearest level.
pub fn requantize(image: &Image, depth: BitDepth) -> Result<Image> {
    if image.depth() == depth {
        return Ok(image.clone());
    }

    let from = image.max_value() as u32;
    let to = depth.max_value() as u32;
    let data = image
        .data()
        .iter()
        .map(|&v| ((v as u32 * to + from / 2) / from) as u16)
        .collect();

    Image::from_vec(image.width(), image.height(), image.channels(), depth, data)
}
