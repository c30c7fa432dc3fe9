use crate::image_pipeline::common::error::PipelineError;
use crate::image_pipeline::common::image::{BitDepth, Image};
use crate::image_pipeline::transforms::{
    adjust_brightness_contrast, apply_gamma, composite, draw_grid, requantize, CompositeMethod,
};

fn gray8(values: &[u16]) -> Image {
    Image::from_vec(values.len(), 1, 1, BitDepth::Eight, values.to_vec()).unwrap()
}

fn gray16(values: &[u16]) -> Image {
    Image::from_vec(values.len(), 1, 1, BitDepth::Sixteen, values.to_vec()).unwrap()
}

#[test]
fn test_neutral_adjustment_is_identity() {
    let image = gray16(&[0, 1, 1000, 32767, 32768, 65535]);
    let adjusted = adjust_brightness_contrast(&image, 0, 1.0).unwrap();
    assert_eq!(adjusted, image);
}

#[test]
fn test_brightness_scales_with_depth() {
    let eight = adjust_brightness_contrast(&gray8(&[100]), 10, 1.0).unwrap();
    assert_eq!(eight.data(), &[110]);

    // 10 steps on the 8-bit scale is 10 * 257 on the 16-bit scale
    let sixteen = adjust_brightness_contrast(&gray16(&[1000]), 10, 1.0).unwrap();
    assert_eq!(sixteen.data(), &[3570]);
}

#[test]
fn test_contrast_pivots_on_mid_grey_and_clips() {
    let image = gray8(&[0, 64, 128, 200, 255]);
    let adjusted = adjust_brightness_contrast(&image, 0, 2.0).unwrap();
    // (v - 127.5) * 2 + 127.5, clipped to 0..=255 and truncated
    assert_eq!(adjusted.data(), &[0, 0, 128, 255, 255]);
    assert_eq!(adjusted.depth(), BitDepth::Eight);
}

#[test]
fn test_negative_brightness_clips_at_zero() {
    let adjusted = adjust_brightness_contrast(&gray8(&[5, 100]), -50, 1.0).unwrap();
    assert_eq!(adjusted.data(), &[0, 50]);
}

#[test]
fn test_adjustment_parameter_validation() {
    let image = gray8(&[1]);
    assert!(matches!(
        adjust_brightness_contrast(&image, 300, 1.0),
        Err(PipelineError::InvalidParameter { name: "brightness", .. })
    ));
    assert!(matches!(
        adjust_brightness_contrast(&image, 0, 0.05),
        Err(PipelineError::InvalidParameter { name: "contrast", .. })
    ));
}

#[test]
fn test_gamma_keeps_extremes_and_brightens_midtones() {
    let corrected = apply_gamma(&gray8(&[0, 64, 255]), 2.0).unwrap();
    // sqrt(64 / 255) * 255 = 127.75
    assert_eq!(corrected.data(), &[0, 127, 255]);

    let corrected = apply_gamma(&gray16(&[0, 65535]), 2.2).unwrap();
    assert_eq!(corrected.data(), &[0, 65535]);
    assert_eq!(corrected.depth(), BitDepth::Sixteen);
}

#[test]
fn test_gamma_rejects_non_positive() {
    assert!(apply_gamma(&gray8(&[1]), 0.0).is_err());
    assert!(apply_gamma(&gray8(&[1]), -1.0).is_err());
    assert!(apply_gamma(&gray8(&[1]), f32::NAN).is_err());
}

#[test]
fn test_composite_methods() {
    let stack = vec![gray8(&[10, 200, 3]), gray8(&[20, 100, 4]), gray8(&[31, 0, 4])];

    let mean = composite(&stack, CompositeMethod::Mean).unwrap();
    assert_eq!(mean.data(), &[20, 100, 3]);

    let max = composite(&stack, CompositeMethod::Max).unwrap();
    assert_eq!(max.data(), &[31, 200, 4]);

    let min = composite(&stack, CompositeMethod::Min).unwrap();
    assert_eq!(min.data(), &[10, 0, 3]);
}

#[test]
fn test_composite_rejects_empty_and_mismatched_stacks() {
    assert!(matches!(
        composite(&[], CompositeMethod::Mean),
        Err(PipelineError::InvalidParameter { name: "images", .. })
    ));

    let stack = vec![gray8(&[1, 2]), gray16(&[1, 2])];
    assert!(matches!(
        composite(&stack, CompositeMethod::Max),
        Err(PipelineError::ShapeMismatch(_))
    ));
}

#[test]
fn test_composite_method_parsing() {
    assert_eq!("mean".parse::<CompositeMethod>(), Ok(CompositeMethod::Mean));
    assert_eq!("1".parse::<CompositeMethod>(), Ok(CompositeMethod::Max));
    assert_eq!("MIN".parse::<CompositeMethod>(), Ok(CompositeMethod::Min));
    assert_eq!("2".parse::<CompositeMethod>(), Ok(CompositeMethod::Min));
    assert!("3".parse::<CompositeMethod>().is_err());
}

#[test]
fn test_requantize_between_depths() {
    let down = requantize(&gray16(&[0, 257, 32768, 65535]), BitDepth::Eight).unwrap();
    assert_eq!(down.depth(), BitDepth::Eight);
    assert_eq!(down.data(), &[0, 1, 128, 255]);

    let up = requantize(&gray8(&[0, 1, 255]), BitDepth::Sixteen).unwrap();
    assert_eq!(up.data(), &[0, 257, 65535]);
}

#[test]
fn test_grid_on_grayscale() {
    let image = Image::filled(5, 5, 1, BitDepth::Eight, 7).unwrap();
    let gridded = draw_grid(&image, 3).unwrap();

    for y in 0..5 {
        for x in 0..5 {
            let on_line = x % 3 == 0 || y % 3 == 0;
            let expected = if on_line { 255 } else { 7 };
            assert_eq!(gridded.get(x, y, 0), expected, "pixel ({x}, {y})");
        }
    }
    // input untouched
    assert!(image.data().iter().all(|&v| v == 7));
}

#[test]
fn test_grid_on_sixteen_bit_colour_is_green_and_two_wide() {
    let image = Image::filled(6, 6, 3, BitDepth::Sixteen, 100).unwrap();
    let gridded = draw_grid(&image, 4).unwrap();

    // columns 0, 1, 4, 5 and rows 0, 1, 4, 5 carry the line
    for x in [0, 1, 4, 5] {
        assert_eq!(gridded.get(x, 2, 0), 0);
        assert_eq!(gridded.get(x, 2, 1), 65535);
        assert_eq!(gridded.get(x, 2, 2), 0);
    }
    assert_eq!(gridded.get(2, 3, 1), 100);
    assert_eq!(gridded.get(3, 2, 0), 100);
    assert_eq!(gridded.get(2, 5, 1), 65535);
}

#[test]
fn test_grid_rejects_zero_spacing() {
    let image = Image::filled(2, 2, 1, BitDepth::Eight, 0).unwrap();
    assert!(matches!(
        draw_grid(&image, 0),
        Err(PipelineError::InvalidParameter { name: "spacing", .. })
    ));
}
