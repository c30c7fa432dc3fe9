use crate::image_pipeline::common::error::PipelineError;
use crate::image_pipeline::common::image::{BitDepth, Image};
use crate::image_pipeline::profile::{
    rasterize_line, sample_line, ChannelOrder, LineSegment, Point, ProfileSamples,
    MAX_LINE_LENGTH,
};

/// 10x10 grayscale image whose value encodes the coordinate: `10 * y + x`.
fn coordinate_image() -> Image {
    let data = (0..10u16)
        .flat_map(|y| (0..10u16).map(move |x| 10 * y + x))
        .collect();
    Image::from_vec(10, 10, 1, BitDepth::Eight, data).unwrap()
}

/// 4x3 RGB image with channel `c` of pixel (x, y) set to `100 * c + 10 * y + x`.
fn rgb_image() -> Image {
    let mut data = Vec::new();
    for y in 0..3u16 {
        for x in 0..4u16 {
            for c in 0..3u16 {
                data.push(100 * c + 10 * y + x);
            }
        }
    }
    Image::from_vec(4, 3, 3, BitDepth::Sixteen, data).unwrap()
}

fn segment(x1: i64, y1: i64, x2: i64, y2: i64) -> LineSegment {
    LineSegment::new(Point::new(x1, y1), Point::new(x2, y2))
}

fn gray(samples: &ProfileSamples) -> &[u16] {
    match samples {
        ProfileSamples::Gray(values) => values,
        other => panic!("expected grayscale samples, got {other:?}"),
    }
}

#[test]
fn test_length_is_chebyshev_distance_plus_one() {
    let cases = [
        segment(0, 0, 9, 0),
        segment(0, 0, 0, 9),
        segment(0, 0, 9, 9),
        segment(2, 7, 8, 1),
        segment(9, 3, 1, 5),
        segment(-4, 12, 30, -2),
    ];
    for seg in cases {
        let points = rasterize_line(&seg).unwrap();
        assert_eq!(points.len() as u64, seg.chebyshev_length() + 1, "{seg:?}");
    }
}

#[test]
fn test_rasterized_points_are_eight_connected_without_repeats() {
    let points = rasterize_line(&segment(1, 2, 17, -5)).unwrap();
    for pair in points.windows(2) {
        let step_x = (pair[1].x - pair[0].x).abs();
        let step_y = (pair[1].y - pair[0].y).abs();
        assert_eq!(step_x.max(step_y), 1, "gap or repeat between {:?}", pair);
    }
}

#[test]
fn test_endpoints_are_first_and_last_points() {
    let seg = segment(2, 7, 8, 1);
    let points = rasterize_line(&seg).unwrap();
    assert_eq!(points.first(), Some(&seg.start));
    assert_eq!(points.last(), Some(&seg.end));

    let image = coordinate_image();
    let profile = sample_line(&image, &seg, ChannelOrder::Rgb).unwrap();
    assert_eq!(profile.points.first(), Some(&Point::new(2, 7)));
    assert_eq!(profile.points.last(), Some(&Point::new(8, 1)));
    let values = gray(&profile.samples);
    assert_eq!(values[0], 72);
    assert_eq!(values[values.len() - 1], 18);
}

#[test]
fn test_traversal_runs_from_first_endpoint() {
    let image = coordinate_image();
    let forward = sample_line(&image, &segment(0, 4, 9, 4), ChannelOrder::Rgb).unwrap();
    let backward = sample_line(&image, &segment(9, 4, 0, 4), ChannelOrder::Rgb).unwrap();

    assert_eq!(gray(&forward.samples), &[40, 41, 42, 43, 44, 45, 46, 47, 48, 49]);
    let mut reversed = gray(&backward.samples).to_vec();
    reversed.reverse();
    assert_eq!(gray(&forward.samples), reversed.as_slice());
}

#[test]
fn test_out_of_bounds_endpoint_is_clamped() {
    let image = coordinate_image();
    let outside = sample_line(&image, &segment(-5, 3, 5, 3), ChannelOrder::Rgb).unwrap();
    let inside = sample_line(&image, &segment(0, 3, 5, 3), ChannelOrder::Rgb).unwrap();

    assert_eq!(gray(&outside.samples)[0], gray(&inside.samples)[0]);
    assert_eq!(outside.points[0], Point::new(0, 3));
    // The clamped prefix repeats the edge pixel instead of being dropped.
    assert_eq!(outside.len(), 11);
    assert_eq!(&gray(&outside.samples)[..6], &[30, 30, 30, 30, 30, 30]);
}

#[test]
fn test_segment_entirely_outside_samples_edges() {
    let image = coordinate_image();
    let profile = sample_line(&image, &segment(20, 15, 25, 15), ChannelOrder::Rgb).unwrap();
    assert_eq!(profile.len(), 6);
    assert!(gray(&profile.samples).iter().all(|&v| v == 99));
}

#[test]
fn test_degenerate_segment_yields_single_pixel() {
    let image = coordinate_image();
    let profile = sample_line(&image, &segment(6, 2, 6, 2), ChannelOrder::Rgb).unwrap();
    assert_eq!(profile.len(), 1);
    assert_eq!(gray(&profile.samples), &[26]);
    assert_eq!(profile.indices(), 0..1);
}

#[test]
fn test_rgb_channels_follow_channel_order() {
    let image = rgb_image();
    let seg = segment(0, 1, 3, 1);

    let natural = sample_line(&image, &seg, ChannelOrder::Rgb).unwrap();
    match &natural.samples {
        ProfileSamples::Rgb { red, green, blue } => {
            assert_eq!(red, &vec![10, 11, 12, 13]);
            assert_eq!(green, &vec![110, 111, 112, 113]);
            assert_eq!(blue, &vec![210, 211, 212, 213]);
        }
        other => panic!("expected rgb samples, got {other:?}"),
    }

    let reversed = sample_line(&image, &seg, ChannelOrder::Bgr).unwrap();
    match &reversed.samples {
        ProfileSamples::Rgb { red, green, blue } => {
            assert_eq!(red, &vec![210, 211, 212, 213]);
            assert_eq!(green, &vec![110, 111, 112, 113]);
            assert_eq!(blue, &vec![10, 11, 12, 13]);
        }
        other => panic!("expected rgb samples, got {other:?}"),
    }
}

#[test]
fn test_channel_names() {
    let profile = sample_line(&rgb_image(), &segment(0, 0, 1, 0), ChannelOrder::Rgb).unwrap();
    let names: Vec<&str> = profile.channels().iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec!["Red", "Green", "Blue"]);

    let image = coordinate_image();
    let profile = sample_line(&image, &segment(0, 0, 1, 0), ChannelOrder::Rgb).unwrap();
    let names: Vec<&str> = profile.channels().iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec!["Gray"]);
}

#[test]
fn test_channel_order_parsing() {
    assert_eq!("RGB".parse::<ChannelOrder>(), Ok(ChannelOrder::Rgb));
    assert_eq!("bgr".parse::<ChannelOrder>(), Ok(ChannelOrder::Bgr));
    assert!("grb".parse::<ChannelOrder>().is_err());
}

#[test]
fn test_input_image_is_untouched() {
    let image = coordinate_image();
    let before = image.clone();
    let _ = sample_line(&image, &segment(-3, -3, 12, 12), ChannelOrder::Bgr);
    assert_eq!(image, before);
}

#[test]
fn test_extreme_coordinates_fail_without_overflow() {
    let image = coordinate_image();
    let cases = [
        segment(0, 0, i64::MAX, 0),
        segment(i64::MIN, 0, i64::MAX, 0),
        segment(0, i64::MAX, 0, i64::MIN),
        segment(i64::MIN, i64::MIN, i64::MAX, i64::MAX),
    ];
    for seg in cases {
        assert!(
            matches!(rasterize_line(&seg), Err(PipelineError::LineTooLong { .. })),
            "{seg:?}"
        );
        assert!(matches!(
            sample_line(&image, &seg, ChannelOrder::Rgb),
            Err(PipelineError::LineTooLong { limit: MAX_LINE_LENGTH, .. })
        ));
    }
}

#[test]
fn test_short_segment_near_coordinate_limits() {
    let near_max = segment(i64::MAX - 3, i64::MAX, i64::MAX, i64::MAX - 2);
    let points = rasterize_line(&near_max).unwrap();
    assert_eq!(points.len(), 4);
    assert_eq!(points.last(), Some(&Point::new(i64::MAX, i64::MAX - 2)));

    let near_min = segment(i64::MIN + 2, i64::MIN, i64::MIN, i64::MIN + 1);
    let points = rasterize_line(&near_min).unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points.last(), Some(&Point::new(i64::MIN, i64::MIN + 1)));

    let image = coordinate_image();
    let profile = sample_line(&image, &near_max, ChannelOrder::Rgb).unwrap();
    assert!(gray(&profile.samples).iter().all(|&v| v == 99));
}

#[test]
fn test_over_long_segment_reports_length_and_limit() {
    let limit = MAX_LINE_LENGTH as i64;
    let just_over = segment(0, 0, limit + 1, -limit);
    assert_eq!(
        rasterize_line(&just_over).unwrap_err().to_string(),
        format!("Line of length {} exceeds the limit of {}", MAX_LINE_LENGTH + 1, MAX_LINE_LENGTH)
    );
    assert_eq!(segment(0, 0, limit, -limit).chebyshev_length(), MAX_LINE_LENGTH);
}
