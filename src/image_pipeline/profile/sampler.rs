use tracing::{debug, instrument};
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::image::Image;
use crate::image_pipeline::profile::line::rasterize_line;
use crate::image_pipeline::profile::types::{
    ChannelOrder, IntensityProfile, LineSegment, Point, ProfileSamples,
};

/// Samples `image` along `segment`.
///
/// Every rasterized point is clamped to the image on each axis before it is
/// read, so endpoints outside the image repeat edge pixels rather than
/// failing. Images with three or more channels produce red, green and blue
/// series picked through `order`; anything narrower produces one grayscale
/// series from channel 0.
///
/// Fails only when the segment is too long to rasterize.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn sample_line(
    image: &Image,
    segment: &LineSegment,
    order: ChannelOrder,
) -> Result<IntensityProfile> {
    let points: Vec<Point> = rasterize_line(segment)?
        .into_iter()
        .map(|p| clamp_to_image(p, image))
        .collect();

    let samples = if image.channels() >= 3 {
        let [r, g, b] = order.indices();
        let read = |c: usize| -> Vec<u16> {
            points
                .iter()
                .map(|p| image.get(p.x as usize, p.y as usize, c))
                .collect()
        };
        ProfileSamples::Rgb {
            red: read(r),
            green: read(g),
            blue: read(b),
        }
    } else {
        ProfileSamples::Gray(
            points
                .iter()
                .map(|p| image.get(p.x as usize, p.y as usize, 0))
                .collect(),
        )
    };

    debug!("Sampled {} points along {:?}", points.len(), segment);

    Ok(IntensityProfile { points, samples })
}

fn clamp_to_image(p: Point, image: &Image) -> Point {
    let max_x = image.width() as i64 - 1;
    let max_y = image.height() as i64 - 1;
    Point::new(p.x.clamp(0, max_x), p.y.clamp(0, max_y))
}
