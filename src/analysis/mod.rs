//! Shape analysis: geometric properties, rule-based classification, and
//! confidence.
//!
//! The analyzer consumes a preprocessed point sequence in guide (pixel)
//! space and never fails: degenerate input degrades to the fallback
//! classification with zero confidence. Classification thresholds (closure
//! tolerance, the 0.1 curvature threshold) are calibrated for pixel
//! coordinates.

use crate::float_types::{EPSILON, FRAC_PI_4, Real, distance_tolerance};
use crate::geometry::{self, Aabb};
use crate::guide::ShapeType;
use crate::stroke::Stroke;
use nalgebra::{Point2, Vector2};
use serde::Serialize;
use std::sync::Arc;

/// Minimum points before the circle rule applies.
const CIRCLE_MIN_POINTS: usize = 8;
/// Circle rule: `(max - min) / min` of the point-to-centroid distances.
const CIRCLE_MAX_RADIAL_VARIATION: Real = 0.3;
const CIRCLE_MIN_SYMMETRY: Real = 0.7;
/// Line rule: mean perpendicular deviation as a fraction of chord length.
const LINE_MAX_DEVIATION_RATIO: Real = 0.1;
const RECT_MIN_POINTS: usize = 4;
const RECT_MIN_EDGES: usize = 3;
/// Edge-direction dot-product magnitude below this counts as perpendicular.
const RECT_PERPENDICULAR_DOT: Real = 0.2;
const RECT_MIN_PERPENDICULAR_PAIRS: usize = 2;
/// Curve rule: mean absolute curvature, in reciprocal pixels.
const CURVE_MIN_CURVATURE: Real = 0.1;
const OVAL_MIN_POINTS: usize = 6;
const OVAL_RADIAL_VARIATION: (Real, Real) = (0.2, 0.8);
const OVAL_MIN_SYMMETRY: Real = 0.6;
/// Stroke length above which the confidence gains its length bonus.
const MIN_CONFIDENT_LENGTH: Real = 50.0;

/// Derived, ephemeral per-analysis snapshot of a stroke's geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometricProperties {
    /// Polyline arc length.
    pub length: Real,
    /// Direction of start → end, radians.
    pub angle: Real,
    /// Mean absolute discrete curvature.
    pub curvature: Real,
    pub bounding_box: Aabb,
    /// Point-set centroid.
    pub center: Point2<Real>,
    /// Start and end within the distance tolerance.
    pub is_closed: bool,
    /// Fraction of points whose reflection through the centroid has a
    /// near-neighbor in the stroke.
    pub symmetry: Real,
}

impl Default for GeometricProperties {
    fn default() -> Self {
        Self {
            length: 0.0,
            angle: 0.0,
            curvature: 0.0,
            bounding_box: Aabb::default(),
            center: Point2::origin(),
            is_closed: false,
            symmetry: 0.0,
        }
    }
}

impl GeometricProperties {
    /// Compute the full property snapshot. Empty input yields the default.
    pub fn compute(points: &[Point2<Real>]) -> Self {
        let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
            return Self::default();
        };
        let bounding_box = geometry::bounding_rect(points).unwrap_or_default();
        let center = geometry::centroid(points).unwrap_or_else(|| bounding_box.center());
        let tolerance = distance_tolerance();
        Self {
            length: geometry::polyline_length(points),
            angle: geometry::angle(&first, &last),
            curvature: geometry::mean_curvature(points),
            bounding_box,
            center,
            is_closed: points.len() >= 3 && geometry::distance(&first, &last) < tolerance,
            symmetry: symmetry_score(points, &center, tolerance),
        }
    }
}

/// Fraction of points whose point-reflection through `center` lands within
/// `tolerance` of some other stroke point.
fn symmetry_score(points: &[Point2<Real>], center: &Point2<Real>, tolerance: Real) -> Real {
    if points.len() < 2 {
        return 0.0;
    }
    let matched = points
        .iter()
        .filter(|p| {
            let reflected = Point2::new(2.0 * center.x - p.x, 2.0 * center.y - p.y);
            points
                .iter()
                .any(|q| geometry::distance(q, &reflected) < tolerance)
        })
        .count();
    matched as Real / points.len() as Real
}

/// One completed classification pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeAnalysis {
    pub properties: GeometricProperties,
    pub shape_type: ShapeType,
    /// Certainty of the classification itself, in `[0, 1]`.
    pub confidence: Real,
}

/// Rule-based shape classifier.
#[derive(Clone, Copy, Debug)]
pub struct ShapeAnalyzer {
    corner_angle_threshold: Real,
}

impl Default for ShapeAnalyzer {
    fn default() -> Self {
        Self {
            corner_angle_threshold: FRAC_PI_4,
        }
    }
}

impl ShapeAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the corner-detection turn threshold (radians).
    pub fn with_corner_angle_threshold(mut self, threshold: Real) -> Self {
        self.corner_angle_threshold = threshold;
        self
    }

    /// Classify a point sequence. Never panics: fewer than two points return
    /// the fallback `Line` with zero confidence.
    pub fn analyze(&self, points: &[Point2<Real>]) -> ShapeAnalysis {
        if points.len() < 2 {
            return ShapeAnalysis {
                properties: GeometricProperties::compute(points),
                shape_type: ShapeType::Line,
                confidence: 0.0,
            };
        }
        let properties = GeometricProperties::compute(points);
        let shape_type = self.classify(points, &properties);
        let confidence = confidence(&properties, shape_type);
        ShapeAnalysis {
            properties,
            shape_type,
            confidence,
        }
    }

    /// Ordered rule checks; first match wins. The order resolves overlaps:
    /// the circle rule is stricter than the oval rule, so ovals are only
    /// reachable once the circle check has failed.
    fn classify(&self, points: &[Point2<Real>], props: &GeometricProperties) -> ShapeType {
        let radial_variation = radial_variation(points, &props.center);

        if props.is_closed
            && points.len() >= CIRCLE_MIN_POINTS
            && radial_variation < CIRCLE_MAX_RADIAL_VARIATION
            && props.symmetry > CIRCLE_MIN_SYMMETRY
        {
            return ShapeType::Circle;
        }

        if is_straight_line(points) {
            return ShapeType::Line;
        }

        let corners = geometry::detect_corners(points, self.corner_angle_threshold);
        if points.len() >= RECT_MIN_POINTS && is_rectangular(&corners, props.is_closed) {
            return ShapeType::Rectangle;
        }

        if (3..=4).contains(&corners.len()) {
            return ShapeType::Polygon;
        }

        if props.curvature > CURVE_MIN_CURVATURE {
            return ShapeType::Curve;
        }

        if props.is_closed
            && points.len() >= OVAL_MIN_POINTS
            && radial_variation > OVAL_RADIAL_VARIATION.0
            && radial_variation < OVAL_RADIAL_VARIATION.1
            && props.symmetry > OVAL_MIN_SYMMETRY
        {
            return ShapeType::Oval;
        }

        // Lowest-information default.
        ShapeType::Line
    }
}

/// `(max - min) / min` of the point-to-center distances. Degenerate input
/// (center on the stroke) reads as infinitely varied.
fn radial_variation(points: &[Point2<Real>], center: &Point2<Real>) -> Real {
    let mut min = Real::MAX;
    let mut max: Real = 0.0;
    for p in points {
        let d = geometry::distance(p, center);
        min = min.min(d);
        max = max.max(d);
    }
    if min < EPSILON {
        return Real::MAX;
    }
    (max - min) / min
}

/// Line rule: mean perpendicular deviation from the start→end chord below
/// 10% of the chord length. Near-zero chords (closed strokes) never read as
/// lines.
fn is_straight_line(points: &[Point2<Real>]) -> bool {
    let (first, last) = (points[0], points[points.len() - 1]);
    let chord = geometry::distance(&first, &last);
    if chord < EPSILON {
        return false;
    }
    let mean_deviation = points
        .iter()
        .map(|p| geometry::distance_to_segment(p, &first, &last))
        .sum::<Real>()
        / points.len() as Real;
    mean_deviation < chord * LINE_MAX_DEVIATION_RATIO
}

/// Rectangle rule: enough long edges between detected corners, and enough
/// consecutive edge pairs that are near-perpendicular.
fn is_rectangular(corners: &[geometry::Corner], closed: bool) -> bool {
    if corners.len() < RECT_MIN_EDGES {
        return false;
    }
    let min_edge = distance_tolerance();
    let mut edges: Vec<Vector2<Real>> = Vec::with_capacity(corners.len());
    for pair in corners.windows(2) {
        edges.push(pair[1].position - pair[0].position);
    }
    if closed && corners.len() >= 3 {
        edges.push(corners[0].position - corners[corners.len() - 1].position);
    }

    let long_edges = edges.iter().filter(|e| e.norm() > min_edge).count();
    if long_edges < RECT_MIN_EDGES {
        return false;
    }

    let mut perpendicular_pairs = 0;
    for i in 0..edges.len() {
        let a = edges[i];
        let b = edges[(i + 1) % edges.len()];
        if a.norm() < EPSILON || b.norm() < EPSILON {
            continue;
        }
        let dot = (a.dot(&b) / (a.norm() * b.norm())).abs();
        if dot < RECT_PERPENDICULAR_DOT {
            perpendicular_pairs += 1;
        }
    }
    perpendicular_pairs >= RECT_MIN_PERPENDICULAR_PAIRS
}

/// Base 0.5, +0.2 for strokes of meaningful length, plus a shape-specific
/// bonus: symmetry for the closed shapes, inverse curvature for the straight
/// ones, curvature itself for curves. Clamped to `[0, 1]`.
fn confidence(props: &GeometricProperties, shape_type: ShapeType) -> Real {
    let mut confidence: Real = 0.5;
    if props.length > MIN_CONFIDENT_LENGTH {
        confidence += 0.2;
    }
    confidence += match shape_type {
        ShapeType::Circle | ShapeType::Oval => 0.3 * props.symmetry,
        ShapeType::Line | ShapeType::Rectangle | ShapeType::Polygon => {
            0.3 / (1.0 + 10.0 * props.curvature)
        },
        ShapeType::Curve => 0.3 * (props.curvature / (props.curvature + CURVE_MIN_CURVATURE)),
    };
    confidence.clamp(0.0, 1.0)
}

/// Output of one analysis pass, consumed by the feedback-text generator and
/// step-completion logic. Immutable.
#[derive(Clone, Debug, Serialize)]
pub struct AnalysisResult {
    /// Similarity to the guide shape, `[0, 1]`.
    pub accuracy: Real,
    /// Classification certainty, `[0, 1]`, independent of guide matching.
    pub confidence: Real,
    pub shape_type: ShapeType,
    /// Whether the classified type equals the guide's target type.
    pub shape_match: bool,
    /// Landmark-proximity score against the guide's target points, `[0, 1]`.
    pub position_accuracy: Real,
    /// The originating stroke.
    #[serde(skip)]
    pub stroke: Arc<Stroke>,
}

impl AnalysisResult {
    /// Degraded/neutral result: the fallback classification with all scores
    /// zeroed. Returned instead of an error for empty input, timeouts, and
    /// severe memory pressure.
    pub fn neutral(stroke: Arc<Stroke>) -> Self {
        Self {
            accuracy: 0.0,
            confidence: 0.0,
            shape_type: ShapeType::Line,
            shape_match: false,
            position_accuracy: 0.0,
            stroke,
        }
    }
}
