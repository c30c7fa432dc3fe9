//! Profile sampling types

use std::fmt;
use std::str::FromStr;

/// Integer pixel coordinate; may lie outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Segment from `start` to `end`, traversed in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Chebyshev distance between the endpoints.
    pub fn chebyshev_length(&self) -> u64 {
        let dx = self.end.x.abs_diff(self.start.x);
        let dy = self.end.y.abs_diff(self.start.y);
        dx.max(dy)
    }
}

/// Storage order of colour channels in a multi-channel image.
///
/// Decoders disagree on this (the RAW developer and TIFF produce R, G, B;
/// some imaging libraries hand out B, G, R), so the sampler takes it
/// explicitly instead of guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    /// Channel 0 is red, 1 green, 2 blue
    #[default]
    Rgb,
    /// Channel 0 is blue, 1 green, 2 red
    Bgr,
}

impl ChannelOrder {
    /// Channel indices of red, green and blue.
    pub fn indices(self) -> [usize; 3] {
        match self {
            ChannelOrder::Rgb => [0, 1, 2],
            ChannelOrder::Bgr => [2, 1, 0],
        }
    }
}

impl FromStr for ChannelOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" => Ok(ChannelOrder::Rgb),
            "bgr" => Ok(ChannelOrder::Bgr),
            other => Err(format!("unknown channel order '{other}', expected rgb or bgr")),
        }
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelOrder::Rgb => write!(f, "rgb"),
            ChannelOrder::Bgr => write!(f, "bgr"),
        }
    }
}

/// Sampled values, either one grayscale series or three colour series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSamples {
    Gray(Vec<u16>),
    Rgb {
        red: Vec<u16>,
        green: Vec<u16>,
        blue: Vec<u16>,
    },
}

/// Samples along a rasterized segment, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityProfile {
    /// Clamped coordinate each sample was taken from
    pub points: Vec<Point>,
    pub samples: ProfileSamples,
}

impl IntensityProfile {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sequential sample index, `0..len`.
    pub fn indices(&self) -> std::ops::Range<usize> {
        0..self.points.len()
    }

    /// Named channel series; grayscale profiles yield a single "Gray" series.
    pub fn channels(&self) -> Vec<(&'static str, &[u16])> {
        match &self.samples {
            ProfileSamples::Gray(values) => vec![("Gray", values.as_slice())],
            ProfileSamples::Rgb { red, green, blue } => vec![
                ("Red", red.as_slice()),
                ("Green", green.as_slice()),
                ("Blue", blue.as_slice()),
            ],
        }
    }
}
