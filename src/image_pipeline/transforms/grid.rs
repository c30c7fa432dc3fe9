use tracing::debug;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::common::image::{BitDepth, Image};

/// Overlays a pixel-coordinate grid every `spacing` pixels.
///
/// Lines start at row/column 0 and run across the whole image at full
/// intensity. Grayscale images get the value in their only channel; colour
/// images get a pure green line (red and blue zeroed). Lines are one pixel
/// wide on 8-bit images and two pixels wide on 16-bit images.
pub fn draw_grid(image: &Image, spacing: usize) -> Result<Image> {
    if spacing == 0 {
        return Err(PipelineError::InvalidParameter {
            name: "spacing",
            reason: "grid spacing must be at least one pixel".to_string(),
        });
    }

    let thickness = match image.depth() {
        BitDepth::Eight => 1,
        BitDepth::Sixteen => 2,
    };
    let width = image.width();
    let height = image.height();

    debug!(spacing, thickness, "Drawing {}x{} grid", width, height);

    let mut out = image.clone();
    for start in (0..width).step_by(spacing) {
        for x in start..(start + thickness).min(width) {
            for y in 0..height {
                paint(&mut out, x, y);
            }
        }
    }
    for start in (0..height).step_by(spacing) {
        for y in start..(start + thickness).min(height) {
            for x in 0..width {
                paint(&mut out, x, y);
            }
        }
    }
    Ok(out)
}

fn paint(image: &mut Image, x: usize, y: usize) {
    let max = image.max_value();
    match image.channels() {
        1 | 2 => image.set(x, y, 0, max),
        channels => {
            for c in 0..channels.min(3) {
                image.set(x, y, c, if c == 1 { max } else { 0 });
            }
        }
    }
}
