use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::profile::types::{LineSegment, Point};

/// Longest segment, in Chebyshev distance, that will be rasterized.
pub const MAX_LINE_LENGTH: u64 = 1 << 24;

/// 8-connected digital line from `segment.start` to `segment.end`.
///
/// Integer Bresenham: exactly one point per unit step along the dominant
/// axis, so the result has `max(|dx|, |dy|) + 1` points with no gaps and no
/// repeats. Both endpoints are included. Segments longer than
/// [`MAX_LINE_LENGTH`] are rejected before anything is allocated.
pub fn rasterize_line(segment: &LineSegment) -> Result<Vec<Point>> {
    let length = segment.chebyshev_length();
    if length > MAX_LINE_LENGTH {
        return Err(PipelineError::LineTooLong {
            length,
            limit: MAX_LINE_LENGTH,
        });
    }

    let Point { x: x0, y: y0 } = segment.start;
    let Point { x: x1, y: y1 } = segment.end;

    // both bounded by MAX_LINE_LENGTH, so the error terms below stay small
    let dx = x1.abs_diff(x0) as i64;
    let dy = -(y1.abs_diff(y0) as i64);
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut points = Vec::with_capacity(length as usize + 1);
    let (mut x, mut y) = (x0, y0);
    let mut err = dx + dy;

    loop {
        points.push(Point::new(x, y));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }

    Ok(points)
}
