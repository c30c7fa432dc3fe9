use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::common::image::Image;

/// How a stack of exposures is reduced to one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMethod {
    /// Per-sample arithmetic mean, truncated
    #[default]
    Mean,
    /// Per-sample maximum
    Max,
    /// Per-sample minimum
    Min,
}

impl FromStr for CompositeMethod {
    type Err = String;

    /// Accepts the names or the numeric codes `0`, `1`, `2`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mean" | "0" => Ok(CompositeMethod::Mean),
            "max" | "1" => Ok(CompositeMethod::Max),
            "min" | "2" => Ok(CompositeMethod::Min),
            other => Err(format!("method must be mean, max, min or 0, 1, 2 (got '{other}')")),
        }
    }
}

impl fmt::Display for CompositeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositeMethod::Mean => write!(f, "mean"),
            CompositeMethod::Max => write!(f, "max"),
            CompositeMethod::Min => write!(f, "min"),
        }
    }
}

/// Reduces same-shape, same-depth images sample by sample.
#[instrument(skip(images), fields(count = images.len()))]
pub fn composite(images: &[Image], method: CompositeMethod) -> Result<Image> {
    let first = images.first().ok_or_else(|| PipelineError::InvalidParameter {
        name: "images",
        reason: "no images to composite".to_string(),
    })?;

    if let Some((i, odd)) = images.iter().enumerate().find(|(_, img)| !img.same_layout(first)) {
        return Err(PipelineError::ShapeMismatch(format!(
            "image {} is {}x{}x{} at {} bits, image 0 is {}x{}x{} at {} bits",
            i,
            odd.width(),
            odd.height(),
            odd.channels(),
            odd.depth().bits(),
            first.width(),
            first.height(),
            first.channels(),
            first.depth().bits()
        )));
    }

    debug!("Compositing {} images with {}", images.len(), method);

    let len = first.data().len();
    let data: Vec<u16> = match method {
        CompositeMethod::Mean => {
            let mut sums = vec![0u64; len];
            for image in images {
                for (sum, &v) in sums.iter_mut().zip(image.data()) {
                    *sum += v as u64;
                }
            }
            let count = images.len() as u64;
            sums.into_iter().map(|s| (s / count) as u16).collect()
        }
        CompositeMethod::Max => reduce(images, u16::max),
        CompositeMethod::Min => reduce(images, u16::min),
    };

    Image::from_vec(first.width(), first.height(), first.channels(), first.depth(), data)
}

fn reduce(images: &[Image], pick: fn(u16, u16) -> u16) -> Vec<u16> {
    let mut acc = images[0].data().to_vec();
    for image in &images[1..] {
        for (a, &v) in acc.iter_mut().zip(image.data()) {
            *a = pick(*a, v);
        }
    }
    acc
}
