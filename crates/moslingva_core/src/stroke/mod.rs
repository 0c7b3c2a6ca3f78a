//! Hand-drawn stroke capture and vector serialization.
//!
//! # Responsibility
//! - Turn pointer samples of one gesture into a raw polyline.
//! - Serialize polylines into self-contained SVG glyph documents.
//!
//! # Invariants
//! - A polyline always has at least two finite points.
//! - Serialization is a pure function of polyline and canvas size.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod path;
pub mod svg;

pub use path::{Point, Polyline, StrokeCapture};
pub use svg::{serialize_polyline, CanvasSize};

#[derive(Debug, Clone, PartialEq)]
pub enum StrokeError {
    /// Gesture produced fewer than two samples.
    TooFewPoints(usize),
    /// Sample carried NaN or infinity.
    NonFiniteCoordinate { index: usize },
    /// Canvas width or height is zero.
    InvalidCanvas { width: u32, height: u32 },
}

impl Display for StrokeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewPoints(count) => {
                write!(f, "stroke needs at least 2 points, got {count}")
            }
            Self::NonFiniteCoordinate { index } => {
                write!(f, "stroke point {index} has a non-finite coordinate")
            }
            Self::InvalidCanvas { width, height } => {
                write!(f, "canvas size {width}x{height} must be positive")
            }
        }
    }
}

impl Error for StrokeError {}
