//! Polygon accuracy: corner-count match, corner placement, closure.

use crate::float_types::{FRAC_PI_4, Real};
use crate::geometry;
use crate::guide::GuideShape;
use crate::scoring::{CORNER_PROXIMITY_RADIUS, closure_score};
use nalgebra::Point2;

const COUNT_WEIGHT: Real = 0.4;
const PLACEMENT_WEIGHT: Real = 0.4;
const CLOSURE_WEIGHT: Real = 0.2;

/// Score against a polygon guide.
///
/// Corners detected in the stroke are compared against the guide's vertices
/// on two axes: how many there are, and how close each expected vertex is to
/// its nearest detected corner.
pub(crate) fn score(points: &[Point2<Real>], shape: &GuideShape) -> Real {
    let vertices = shape.points();
    if vertices.len() < 3 {
        return 0.0;
    }
    let corners = geometry::detect_corners(points, FRAC_PI_4);

    let expected = vertices.len() as Real;
    let count_accuracy =
        (1.0 - ((corners.len() as Real - expected).abs() / expected).min(1.0)).max(0.0);

    let placement = if corners.is_empty() {
        0.0
    } else {
        let sum: Real = vertices
            .iter()
            .map(|vertex| {
                let nearest = corners
                    .iter()
                    .map(|c| geometry::distance(&c.position, vertex))
                    .fold(Real::MAX, Real::min);
                (1.0 - nearest / CORNER_PROXIMITY_RADIUS).max(0.0)
            })
            .sum();
        sum / expected
    };

    COUNT_WEIGHT * count_accuracy
        + PLACEMENT_WEIGHT * placement
        + CLOSURE_WEIGHT * closure_score(points)
}
