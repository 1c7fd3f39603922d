//! Stroke preprocessing: normalize, resample, smooth.
//!
//! Isolates the scoring algorithms from raw-input noise and density
//! variance. Each step is exposed standalone; [`StrokePreprocessor`] chains
//! them per the pipeline contract.

use crate::float_types::{EPSILON, Real};
use crate::geometry;
use crate::stroke::Stroke;
use nalgebra::Point2;

/// Default resample target: strokes longer than this are thinned to exactly
/// this many points.
pub const DEFAULT_TARGET_COUNT: usize = 200;

/// Translate and scale the points into the unit bounding box, dividing by
/// `max(width, height)`. Degenerate input (no usable extent in either axis,
/// such as a single repeated point) is returned unchanged.
pub fn normalize(points: &[Point2<Real>]) -> Vec<Point2<Real>> {
    let Some(bbox) = geometry::bounding_rect(points) else {
        return Vec::new();
    };
    let scale = bbox.max_extent();
    if scale < EPSILON {
        return points.to_vec();
    }
    points
        .iter()
        .map(|p| Point2::new((p.x - bbox.mins.x) / scale, (p.y - bbox.mins.y) / scale))
        .collect()
}

/// Thin the point sequence to exactly `target_count` points by linear
/// interpolation evenly spaced over the *original index range*, not arc
/// length.
///
/// Sequences already at or below `target_count` are returned unchanged.
/// First and last points are preserved exactly.
pub fn resample(points: &[Point2<Real>], target_count: usize) -> Vec<Point2<Real>> {
    if points.len() <= target_count || target_count < 2 {
        return points.to_vec();
    }
    let last = points.len() - 1;
    (0..target_count)
        .map(|i| {
            let t = i as Real * last as Real / (target_count - 1) as Real;
            let lower = t.floor() as usize;
            let upper = lower.min(last - 1) + 1;
            let frac = t - lower as Real;
            if frac < EPSILON {
                points[lower]
            } else {
                geometry::lerp(&points[lower], &points[upper], frac)
            }
        })
        .collect()
}

/// 3-point moving average over interior points; the endpoints pass through
/// unchanged.
pub fn smooth(points: &[Point2<Real>]) -> Vec<Point2<Real>> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);
    for w in points.windows(3) {
        out.push(Point2::new(
            (w[0].x + w[1].x + w[2].x) / 3.0,
            (w[0].y + w[1].y + w[2].y) / 3.0,
        ));
    }
    out.push(points[points.len() - 1]);
    out
}

/// Preprocessing stage configuration.
#[derive(Clone, Copy, Debug)]
pub struct StrokePreprocessor {
    target_count: usize,
}

impl Default for StrokePreprocessor {
    fn default() -> Self {
        Self {
            target_count: DEFAULT_TARGET_COUNT,
        }
    }
}

impl StrokePreprocessor {
    pub fn new(target_count: usize) -> Self {
        Self {
            target_count: target_count.max(2),
        }
    }

    #[inline]
    pub const fn target_count(&self) -> usize {
        self.target_count
    }

    /// Full preprocessing chain: normalize, resample, smooth. Output is in
    /// unit-box space; pressure/velocity arrays are truncated to the
    /// resampled count.
    pub fn preprocess(&self, stroke: &Stroke) -> Stroke {
        let points = smooth(&resample(&normalize(stroke.points()), self.target_count));
        stroke.with_points(points)
    }

    /// Resample and smooth without normalizing, keeping the stroke in guide
    /// (pixel) space for classification and scoring against a guide shape.
    pub fn preprocess_spatial(&self, stroke: &Stroke) -> Stroke {
        let points = smooth(&resample(stroke.points(), self.target_count));
        stroke.with_points(points)
    }
}
