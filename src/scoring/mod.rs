//! Accuracy scoring: how closely a classified stroke matches its guide
//! shape.
//!
//! One pure scoring function per shape type, dispatched by an exhaustive
//! match on [`ShapeType`]. Every scorer returns a value in `[0, 1]` and
//! mutates neither the stroke nor the guide.

mod circle;
mod curve;
mod line;
mod oval;
mod polygon;
mod rectangle;

use crate::float_types::{EPSILON, Real};
use crate::geometry;
use crate::guide::{DrawingGuide, GuideShape, ShapeType};
use nalgebra::Point2;

/// Pixel radius used by corner-proximity scoring: a stroke point within this
/// distance of an expected corner scores proportionally.
pub(crate) const CORNER_PROXIMITY_RADIUS: Real = 50.0;

/// Score a stroke's points against a guide shape. Empty or single-point
/// strokes score 0.
pub fn score(points: &[Point2<Real>], shape: &GuideShape) -> Real {
    if points.len() < 2 {
        return 0.0;
    }
    let accuracy = match shape.shape_type() {
        ShapeType::Circle => circle::score(points, shape),
        ShapeType::Rectangle => rectangle::score(points, shape),
        ShapeType::Line => line::score(points, shape),
        ShapeType::Oval => oval::score(points, shape),
        ShapeType::Curve => curve::score(points, shape),
        ShapeType::Polygon => polygon::score(points, shape),
    };
    accuracy.clamp(0.0, 1.0)
}

/// Closure score: 1 for coincident endpoints, falling off linearly with the
/// start/end separation relative to half the stroke's bounding-box diagonal.
/// Scale-free, so it behaves the same for thumbnail and full-screen strokes.
pub(crate) fn closure_score(points: &[Point2<Real>]) -> Real {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return 0.0;
    };
    let gap = geometry::distance(first, last);
    let Some(bbox) = geometry::bounding_rect(points) else {
        return 0.0;
    };
    let half_diagonal = bbox.diagonal() / 2.0;
    if half_diagonal < EPSILON {
        return if gap < EPSILON { 1.0 } else { 0.0 };
    }
    (1.0 - (gap / half_diagonal).min(1.0)).max(0.0)
}

/// Position accuracy: mean landmark proximity over the guide's target
/// points. Each landmark contributes `1 - d/tolerance` (clamped to `[0, 1]`)
/// for its nearest stroke point. Zero when either side is empty or the
/// tolerance is degenerate.
pub fn position_accuracy(points: &[Point2<Real>], guide: &DrawingGuide) -> Real {
    let targets = guide.target_points();
    let tolerance = guide.tolerance();
    if points.is_empty() || targets.is_empty() || tolerance < EPSILON {
        return 0.0;
    }
    let sum: Real = targets
        .iter()
        .map(|target| {
            let nearest = nearest_distance(points, target);
            (1.0 - (nearest / tolerance).min(1.0)).max(0.0)
        })
        .sum();
    sum / targets.len() as Real
}

/// Distance from `target` to the closest point of the stroke.
pub(crate) fn nearest_distance(points: &[Point2<Real>], target: &Point2<Real>) -> Real {
    points
        .iter()
        .map(|p| geometry::distance(p, target))
        .fold(Real::MAX, Real::min)
}
