//! Rectangle accuracy: edge alignment, corner proximity, closure.

use crate::float_types::{EPSILON, Real};
use crate::guide::GuideShape;
use crate::scoring::{CORNER_PROXIMITY_RADIUS, closure_score, nearest_distance};
use nalgebra::{Point2, Vector2};

const EDGE_WEIGHT: Real = 0.5;
const CORNER_WEIGHT: Real = 0.3;
const CLOSURE_WEIGHT: Real = 0.2;

/// Score against a rectangle guide.
///
/// The stroke is split into 4 index-equal segments mapped onto the 4
/// expected edges; within each segment every consecutive point step is
/// compared against the edge direction. Corner proximity takes the nearest
/// stroke point per expected corner.
pub(crate) fn score(points: &[Point2<Real>], shape: &GuideShape) -> Real {
    let corners = shape.corners();

    let edge_accuracy = edge_alignment(points, &corners);
    let corner_accuracy = corner_proximity(points, &corners);

    EDGE_WEIGHT * edge_accuracy
        + CORNER_WEIGHT * corner_accuracy
        + CLOSURE_WEIGHT * closure_score(points)
}

/// Mean per-step direction agreement with the expected edge, computed as
/// `1 - |1 - |dot||` over the consecutive point steps of each index segment.
fn edge_alignment(points: &[Point2<Real>], corners: &[Point2<Real>; 4]) -> Real {
    if points.len() < 5 {
        return 0.0;
    }
    let segment_len = points.len() / 4;
    let mut edge_sum = 0.0;
    let mut scored_edges = 0usize;
    for edge_index in 0..4 {
        let edge: Vector2<Real> = corners[(edge_index + 1) % 4] - corners[edge_index];
        let edge_norm = edge.norm();
        if edge_norm < EPSILON {
            continue;
        }
        let edge_dir = edge / edge_norm;

        let start = edge_index * segment_len;
        let end = if edge_index == 3 {
            points.len()
        } else {
            (edge_index + 1) * segment_len + 1
        };
        let segment = &points[start..end.min(points.len())];

        let mut step_sum = 0.0;
        let mut steps = 0usize;
        for w in segment.windows(2) {
            let step: Vector2<Real> = w[1] - w[0];
            let norm = step.norm();
            if norm < EPSILON {
                continue;
            }
            let dot = (step.dot(&edge_dir) / norm).abs();
            step_sum += 1.0 - (1.0 - dot).abs();
            steps += 1;
        }
        if steps > 0 {
            edge_sum += step_sum / steps as Real;
            scored_edges += 1;
        }
    }
    if scored_edges == 0 {
        0.0
    } else {
        edge_sum / scored_edges as Real
    }
}

/// Mean over expected corners of `1 - d/50px` (clamped) for the nearest
/// stroke point.
fn corner_proximity(points: &[Point2<Real>], corners: &[Point2<Real>; 4]) -> Real {
    let sum: Real = corners
        .iter()
        .map(|corner| {
            let d = nearest_distance(points, corner);
            (1.0 - d / CORNER_PROXIMITY_RADIUS).max(0.0)
        })
        .sum();
    sum / 4.0
}
