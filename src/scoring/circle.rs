//! Circle accuracy: radius fit, radial consistency, closure.

use crate::float_types::{EPSILON, Real};
use crate::geometry;
use crate::guide::GuideShape;
use crate::scoring::closure_score;
use nalgebra::Point2;

const RADIUS_WEIGHT: Real = 0.4;
const CONSISTENCY_WEIGHT: Real = 0.4;
const CLOSURE_WEIGHT: Real = 0.2;

/// Score against a circle guide.
///
/// Radius accuracy penalizes the mean point-to-center distance differing
/// from the target radius; consistency penalizes the spread (standard
/// deviation) of those distances; closure rewards a closed figure.
pub(crate) fn score(points: &[Point2<Real>], shape: &GuideShape) -> Real {
    let target_radius = shape.radius();
    if target_radius < EPSILON {
        return 0.0;
    }
    let center = shape.center();
    let distances: Vec<Real> = points
        .iter()
        .map(|p| geometry::distance(p, &center))
        .collect();
    let mean = distances.iter().sum::<Real>() / distances.len() as Real;
    let variance = distances
        .iter()
        .map(|d| {
            let diff = d - mean;
            diff * diff
        })
        .sum::<Real>()
        / distances.len() as Real;
    let stddev = variance.sqrt();

    let radius_accuracy = (1.0 - (mean - target_radius).abs() / target_radius).max(0.0);
    let consistency = (1.0 - stddev / target_radius).max(0.0);

    RADIUS_WEIGHT * radius_accuracy
        + CONSISTENCY_WEIGHT * consistency
        + CLOSURE_WEIGHT * closure_score(points)
}
