//! Stroke capture into an ordered polyline.
//!
//! No smoothing, simplification or multi-stroke composition is applied.

use super::StrokeError;
use serde::{Deserialize, Serialize};

/// One pointer sample in drawing-surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Ordered points of one continuous stroke; holds at least two points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Result<Self, StrokeError> {
        if points.len() < 2 {
            return Err(StrokeError::TooFewPoints(points.len()));
        }
        if let Some(index) = points.iter().position(|point| !point.is_finite()) {
            return Err(StrokeError::NonFiniteCoordinate { index });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Accumulates samples between pointer-down and pointer-up.
#[derive(Debug, Clone, Default)]
pub struct StrokeCapture {
    samples: Vec<Point>,
}

impl StrokeCapture {
    /// Starts an empty gesture.
    pub fn begin() -> Self {
        Self::default()
    }

    /// Appends one sample in temporal order.
    pub fn push(&mut self, point: impl Into<Point>) {
        self.samples.push(point.into());
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Discards every sample, e.g. when the user clears the canvas.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Ends the gesture. Fewer than two samples is an empty stroke.
    pub fn finish(self) -> Result<Polyline, StrokeError> {
        Polyline::new(self.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Polyline, StrokeCapture};
    use crate::stroke::StrokeError;

    #[test]
    fn capture_keeps_samples_in_order() {
        let mut capture = StrokeCapture::begin();
        capture.push((10.0, 20.0));
        capture.push((30.0, 20.0));
        capture.push(Point::new(30.0, 45.5));

        let polyline = capture.finish().unwrap();
        assert_eq!(
            polyline.points(),
            &[
                Point::new(10.0, 20.0),
                Point::new(30.0, 20.0),
                Point::new(30.0, 45.5)
            ]
        );
    }

    #[test]
    fn single_tap_is_an_empty_stroke() {
        let mut capture = StrokeCapture::begin();
        capture.push((5.0, 5.0));
        assert_eq!(capture.finish().unwrap_err(), StrokeError::TooFewPoints(1));
        assert_eq!(
            StrokeCapture::begin().finish().unwrap_err(),
            StrokeError::TooFewPoints(0)
        );
    }

    #[test]
    fn non_finite_samples_are_rejected() {
        let err = Polyline::new(vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)])
            .unwrap_err();
        assert_eq!(err, StrokeError::NonFiniteCoordinate { index: 1 });
    }
}
