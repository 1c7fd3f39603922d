//! Stateless geometric primitives for stroke analysis.
//!
//! Everything in this module is a pure function over [`Point2`] slices; the
//! analyzer, scorer, and preprocessor are all built on top of these. Bounding
//! boxes, centroids, and path simplification delegate to [`geo`], with
//! conversion helpers bridging nalgebra and geo types.

pub mod aabb;

pub use aabb::Aabb;

use crate::float_types::{EPSILON, Real, distance_tolerance};
use geo::{BoundingRect, Centroid, LineString, MultiPoint, Simplify, coord, point};
use nalgebra::{Point2, Rotation2, Vector2};

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: &Point2<Real>, b: &Point2<Real>) -> Real {
    (b - a).norm()
}

/// Midpoint of the segment `ab`.
#[inline]
pub fn midpoint(a: &Point2<Real>, b: &Point2<Real>) -> Point2<Real> {
    Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Angle of the direction `a -> b`, in radians in `(-π, π]`.
#[inline]
pub fn angle(a: &Point2<Real>, b: &Point2<Real>) -> Real {
    let d = b - a;
    d.y.atan2(d.x)
}

/// Rotate `p` around `around` by `theta` radians (counter-clockwise).
#[inline]
pub fn rotate(p: &Point2<Real>, around: &Point2<Real>, theta: Real) -> Point2<Real> {
    around + Rotation2::new(theta) * (p - around)
}

/// Linear interpolation between `a` and `b` at parameter `t`.
#[inline]
pub fn lerp(a: &Point2<Real>, b: &Point2<Real>, t: Real) -> Point2<Real> {
    a + (b - a) * t
}

/// Total arc length of the polyline.
pub fn polyline_length(points: &[Point2<Real>]) -> Real {
    points.windows(2).map(|w| distance(&w[0], &w[1])).sum()
}

/// Convert a point slice into a geo [`LineString`].
pub fn to_line_string(points: &[Point2<Real>]) -> LineString<Real> {
    LineString::from(
        points
            .iter()
            .map(|p| coord! { x: p.x, y: p.y })
            .collect::<Vec<_>>(),
    )
}

/// Axis-aligned bounding box of the points, or `None` for an empty slice.
pub fn bounding_rect(points: &[Point2<Real>]) -> Option<Aabb> {
    let rect = to_line_string(points).bounding_rect()?;
    Some(Aabb::new(
        Point2::new(rect.min().x, rect.min().y),
        Point2::new(rect.max().x, rect.max().y),
    ))
}

/// Mean of the points (point-set centroid, not arc-length weighted), or
/// `None` for an empty slice.
pub fn centroid(points: &[Point2<Real>]) -> Option<Point2<Real>> {
    let mp = MultiPoint::new(
        points
            .iter()
            .map(|p| point! { x: p.x, y: p.y })
            .collect::<Vec<_>>(),
    );
    let c = mp.centroid()?;
    Some(Point2::new(c.x(), c.y()))
}

/// Discrete curvature at `p2` from the triple `(p1, p2, p3)`:
/// `4·area / (|p1p2|·|p2p3|·|p1p3|)`, the reciprocal of the circumcircle
/// radius. Returns 0 for degenerate triangles (any side below [`EPSILON`]).
pub fn point_curvature(p1: &Point2<Real>, p2: &Point2<Real>, p3: &Point2<Real>) -> Real {
    let a = distance(p1, p2);
    let b = distance(p2, p3);
    let c = distance(p1, p3);
    if a < EPSILON || b < EPSILON || c < EPSILON {
        return 0.0;
    }
    // Cross product of (p2-p1, p3-p1) is twice the triangle area.
    let area2 = ((p2.x - p1.x) * (p3.y - p1.y) - (p3.x - p1.x) * (p2.y - p1.y)).abs();
    (2.0 * area2) / (a * b * c)
}

/// Mean absolute discrete curvature over all interior triples.
pub fn mean_curvature(points: &[Point2<Real>]) -> Real {
    if points.len() < 3 {
        return 0.0;
    }
    let sum: Real = points
        .windows(3)
        .map(|w| point_curvature(&w[0], &w[1], &w[2]))
        .sum();
    sum / (points.len() - 2) as Real
}

/// Distance from `p` to the segment `ab` (projection clamped to the segment).
pub fn distance_to_segment(p: &Point2<Real>, a: &Point2<Real>, b: &Point2<Real>) -> Real {
    let ab: Vector2<Real> = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < EPSILON {
        return distance(p, a);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    distance(p, &(a + ab * t))
}

/// A detected corner: the point where the path turns sharply.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corner {
    /// Index of the corner point in the input slice.
    pub index: usize,
    pub position: Point2<Real>,
    /// Turn angle between the incoming and outgoing directions, in radians.
    pub turn: Real,
}

/// Fraction of the total arc length below which two detected corners are
/// considered one noisy corner and merged, keeping the sharper turn.
const MIN_CORNER_SEPARATION_FRACTION: Real = 0.05;

/// Scan consecutive point triples and flag every point whose turn angle
/// exceeds `angle_threshold` (radians). For closed paths the seam between the
/// last and first point is scanned as well, so a square traced corner-to-corner
/// yields all four corners.
///
/// Adjacent detections closer than a small fraction of the path length are
/// merged, keeping the sharpest; noisy hand input otherwise produces corner
/// clusters. Corners are returned in stroke order.
pub fn detect_corners(points: &[Point2<Real>], angle_threshold: Real) -> Vec<Corner> {
    if points.len() < 3 {
        return Vec::new();
    }
    let n = points.len();
    let closed = distance(&points[0], &points[n - 1]) < distance_tolerance();

    let mut candidates = Vec::new();
    if closed && n > 3 {
        // Seam turn: incoming from the penultimate point, outgoing to the
        // second point, evaluated at the shared start/end position.
        if let Some(turn) = turn_angle(&points[n - 2], &points[0], &points[1]) {
            if turn > angle_threshold {
                candidates.push(Corner {
                    index: 0,
                    position: points[0],
                    turn,
                });
            }
        }
    }
    for i in 1..n - 1 {
        if let Some(turn) = turn_angle(&points[i - 1], &points[i], &points[i + 1]) {
            if turn > angle_threshold {
                candidates.push(Corner {
                    index: i,
                    position: points[i],
                    turn,
                });
            }
        }
    }

    suppress_corner_clusters(points, candidates, closed)
}

/// Turn angle at `at` between the incoming and outgoing segment directions.
/// `None` when either segment is degenerate.
fn turn_angle(prev: &Point2<Real>, at: &Point2<Real>, next: &Point2<Real>) -> Option<Real> {
    let incoming: Vector2<Real> = at - prev;
    let outgoing: Vector2<Real> = next - at;
    if incoming.norm() < EPSILON || outgoing.norm() < EPSILON {
        return None;
    }
    let cos = (incoming.dot(&outgoing) / (incoming.norm() * outgoing.norm())).clamp(-1.0, 1.0);
    Some(cos.acos())
}

/// Non-maximum suppression by arc-length separation: candidates within the
/// minimum separation collapse to the sharpest of the cluster.
fn suppress_corner_clusters(
    points: &[Point2<Real>],
    candidates: Vec<Corner>,
    closed: bool,
) -> Vec<Corner> {
    if candidates.len() < 2 {
        return candidates;
    }
    let mut cumulative = Vec::with_capacity(points.len());
    let mut total = 0.0;
    cumulative.push(0.0);
    for w in points.windows(2) {
        total += distance(&w[0], &w[1]);
        cumulative.push(total);
    }
    let min_separation = total * MIN_CORNER_SEPARATION_FRACTION;

    let mut kept: Vec<Corner> = Vec::with_capacity(candidates.len());
    for corner in candidates {
        match kept.last_mut() {
            Some(last) if cumulative[corner.index] - cumulative[last.index] < min_separation => {
                if corner.turn > last.turn {
                    *last = corner;
                }
            },
            _ => kept.push(corner),
        }
    }
    // Wraparound cluster: on a closed path the final corner may duplicate the
    // seam corner at index 0.
    if closed && kept.len() >= 2 {
        let first = kept[0];
        let last = kept[kept.len() - 1];
        if total - cumulative[last.index] + cumulative[first.index] < min_separation {
            if last.turn > first.turn {
                kept[0] = last;
            }
            kept.pop();
        }
    }
    kept
}

/// Douglas–Peucker path simplification via [`geo::Simplify`]: drops points
/// deviating less than `epsilon` from the simplified path. First and last
/// points are always preserved.
pub fn simplify(points: &[Point2<Real>], epsilon: Real) -> Vec<Point2<Real>> {
    if points.len() < 3 {
        return points.to_vec();
    }
    to_line_string(points)
        .simplify(&epsilon)
        .coords()
        .map(|c| Point2::new(c.x, c.y))
        .collect()
}
