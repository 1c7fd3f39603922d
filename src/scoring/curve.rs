//! Curve accuracy: curvature-profile matching plus point proximity.

use crate::float_types::{EPSILON, Real};
use crate::geometry;
use crate::guide::GuideShape;
use crate::preprocess;
use nalgebra::Point2;

const PROFILE_WEIGHT: Real = 0.6;
const PROXIMITY_WEIGHT: Real = 0.4;

/// Common sample count for profile comparison.
const PROFILE_SAMPLES: usize = 64;

/// Score against a freeform curve guide.
///
/// Both the stroke and the guide polyline are resampled to a common count,
/// then compared on two axes: the discrete-curvature profile (how the bend
/// evolves along the path) and pointwise proximity normalized by the guide's
/// bounding-box diagonal.
pub(crate) fn score(points: &[Point2<Real>], shape: &GuideShape) -> Real {
    let guide_points = shape.points();
    if guide_points.len() < 3 || points.len() < 3 {
        return 0.0;
    }
    let stroke_samples = preprocess::resample(points, PROFILE_SAMPLES);
    let guide_samples = preprocess::resample(guide_points, PROFILE_SAMPLES);

    PROFILE_WEIGHT * profile_match(&stroke_samples, &guide_samples)
        + PROXIMITY_WEIGHT * proximity(&stroke_samples, &guide_samples)
}

/// Mean absolute curvature difference along the paired samples, normalized
/// by the guide's own mean curvature so gentle and tight curves are graded
/// on their own scale.
fn profile_match(stroke: &[Point2<Real>], guide: &[Point2<Real>]) -> Real {
    let stroke_profile = curvature_profile(stroke);
    let guide_profile = curvature_profile(guide);
    let pairs = stroke_profile.len().min(guide_profile.len());
    if pairs == 0 {
        return 0.0;
    }
    let mean_diff = stroke_profile
        .iter()
        .zip(&guide_profile)
        .map(|(s, g)| (s - g).abs())
        .sum::<Real>()
        / pairs as Real;
    let guide_mean = guide_profile.iter().sum::<Real>() / guide_profile.len() as Real;
    let scale = guide_mean.max(EPSILON.sqrt());
    (1.0 - (mean_diff / scale).min(1.0)).max(0.0)
}

fn curvature_profile(points: &[Point2<Real>]) -> Vec<Real> {
    points
        .windows(3)
        .map(|w| geometry::point_curvature(&w[0], &w[1], &w[2]))
        .collect()
}

/// Pointwise distance between paired samples, normalized by half the guide's
/// bounding-box diagonal.
fn proximity(stroke: &[Point2<Real>], guide: &[Point2<Real>]) -> Real {
    let Some(bbox) = geometry::bounding_rect(guide) else {
        return 0.0;
    };
    let half_diagonal = bbox.diagonal() / 2.0;
    if half_diagonal < EPSILON {
        return 0.0;
    }
    let pairs = stroke.len().min(guide.len());
    let mean_distance = stroke
        .iter()
        .zip(guide)
        .map(|(s, g)| geometry::distance(s, g))
        .sum::<Real>()
        / pairs as Real;
    (1.0 - (mean_distance / half_diagonal).min(1.0)).max(0.0)
}
