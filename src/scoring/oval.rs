//! Oval accuracy: normalized ellipse-equation deviation plus closure.

use crate::float_types::{EPSILON, Real};
use crate::geometry;
use crate::guide::GuideShape;
use crate::scoring::closure_score;
use nalgebra::Point2;

const DEVIATION_WEIGHT: Real = 0.8;
const CLOSURE_WEIGHT: Real = 0.2;

/// Score against an oval guide.
///
/// Each stroke point is un-rotated into the ellipse frame and evaluated
/// against the normalized ellipse equation; the per-point deviation
/// `|((dx/rx)² + (dy/ry)²) - 1|` is clamped to 1 and averaged.
pub(crate) fn score(points: &[Point2<Real>], shape: &GuideShape) -> Real {
    let (width, height) = shape.dimensions();
    let rx = width / 2.0;
    let ry = height / 2.0;
    if rx < EPSILON || ry < EPSILON {
        return 0.0;
    }
    let center = shape.center();

    let deviation_sum: Real = points
        .iter()
        .map(|p| {
            let local = geometry::rotate(p, &center, -shape.rotation());
            let dx = (local.x - center.x) / rx;
            let dy = (local.y - center.y) / ry;
            ((dx * dx + dy * dy) - 1.0).abs().min(1.0)
        })
        .sum();
    let deviation = deviation_sum / points.len() as Real;

    DEVIATION_WEIGHT * (1.0 - deviation) + CLOSURE_WEIGHT * closure_score(points)
}
