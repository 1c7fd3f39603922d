//! Line accuracy: straightness, endpoint proximity, direction.

use crate::float_types::{EPSILON, PI, Real};
use crate::geometry;
use crate::guide::GuideShape;
use nalgebra::{Point2, Vector2};

const STRAIGHTNESS_WEIGHT: Real = 0.4;
const ENDPOINT_WEIGHT: Real = 0.4;
const DIRECTION_WEIGHT: Real = 0.2;

/// Minimum endpoint tolerance in pixels; grows with line length.
const MIN_ENDPOINT_TOLERANCE: Real = 20.0;

pub(crate) fn score(points: &[Point2<Real>], shape: &GuideShape) -> Real {
    let Some((expected_start, expected_end)) = shape.endpoints() else {
        return 0.0;
    };
    let expected: Vector2<Real> = expected_end - expected_start;
    let line_length = expected.norm();
    if line_length < EPSILON {
        return 0.0;
    }
    let expected_dir = expected / line_length;

    // Straightness: mean angular deviation of consecutive stroke segments
    // from the expected chord direction, normalized by π.
    let mut deviation_sum = 0.0;
    let mut segments = 0usize;
    for w in points.windows(2) {
        let seg: Vector2<Real> = w[1] - w[0];
        let norm = seg.norm();
        if norm < EPSILON {
            continue;
        }
        let cos = (seg.dot(&expected_dir) / norm).clamp(-1.0, 1.0);
        deviation_sum += cos.acos();
        segments += 1;
    }
    let straightness = if segments == 0 {
        0.0
    } else {
        1.0 - (deviation_sum / segments as Real) / PI
    };

    // Endpoints: stroke start/end near the expected start/end, with a
    // tolerance that scales with line length.
    let tolerance = MIN_ENDPOINT_TOLERANCE.max(0.1 * line_length);
    let start_accuracy =
        (1.0 - (geometry::distance(&points[0], &expected_start) / tolerance).min(1.0)).max(0.0);
    let end_accuracy = (1.0
        - (geometry::distance(&points[points.len() - 1], &expected_end) / tolerance).min(1.0))
    .max(0.0);
    let endpoints = (start_accuracy + end_accuracy) / 2.0;

    // Direction: overall stroke direction against the expected direction.
    let actual: Vector2<Real> = points[points.len() - 1] - points[0];
    let direction = if actual.norm() < EPSILON {
        0.0
    } else {
        (actual / actual.norm()).dot(&expected_dir).abs()
    };

    STRAIGHTNESS_WEIGHT * straightness + ENDPOINT_WEIGHT * endpoints + DIRECTION_WEIGHT * direction
}
