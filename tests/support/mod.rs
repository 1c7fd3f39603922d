//! Test support library
//! Synthetic stroke generators shared by the integration tests.
#![allow(dead_code)]

use nalgebra::Point2;
use sketchscore::float_types::{Real, TAU};

/// `count` points sampled at uniform angles on a circle; the path does not
/// repeat the start point.
pub fn circle_points(center: Point2<Real>, radius: Real, count: usize) -> Vec<Point2<Real>> {
    (0..count)
        .map(|i| {
            let theta = TAU * i as Real / count as Real;
            Point2::new(
                center.x + radius * theta.cos(),
                center.y + radius * theta.sin(),
            )
        })
        .collect()
}

/// `count` points on an axis-aligned ellipse with radii `rx`/`ry`.
pub fn oval_points(center: Point2<Real>, rx: Real, ry: Real, count: usize) -> Vec<Point2<Real>> {
    (0..count)
        .map(|i| {
            let theta = TAU * i as Real / count as Real;
            Point2::new(center.x + rx * theta.cos(), center.y + ry * theta.sin())
        })
        .collect()
}

/// `count` evenly spaced points from `start` to `end` inclusive.
pub fn line_points(start: Point2<Real>, end: Point2<Real>, count: usize) -> Vec<Point2<Real>> {
    let count = count.max(2);
    (0..count)
        .map(|i| {
            let t = i as Real / (count - 1) as Real;
            Point2::new(
                start.x + (end.x - start.x) * t,
                start.y + (end.y - start.y) * t,
            )
        })
        .collect()
}

/// Closed square path from `origin`, side length `side`, `per_edge` points
/// per edge; the final point repeats the origin. Corners land at indices
/// `0`, `per_edge`, `2·per_edge`, `3·per_edge`.
pub fn square_points(origin: Point2<Real>, side: Real, per_edge: usize) -> Vec<Point2<Real>> {
    let corners = [
        origin,
        Point2::new(origin.x + side, origin.y),
        Point2::new(origin.x + side, origin.y + side),
        Point2::new(origin.x, origin.y + side),
    ];
    let mut out = Vec::with_capacity(4 * per_edge + 1);
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        for t in 0..per_edge {
            let t = t as Real / per_edge as Real;
            out.push(Point2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t));
        }
    }
    out.push(origin);
    out
}

/// Closed triangle path through the three vertices, `per_edge` points per
/// edge, final point repeating the first vertex.
pub fn triangle_points(
    a: Point2<Real>,
    b: Point2<Real>,
    c: Point2<Real>,
    per_edge: usize,
) -> Vec<Point2<Real>> {
    let corners = [a, b, c];
    let mut out = Vec::with_capacity(3 * per_edge + 1);
    for i in 0..3 {
        let from = corners[i];
        let to = corners[(i + 1) % 3];
        for t in 0..per_edge {
            let t = t as Real / per_edge as Real;
            out.push(Point2::new(
                from.x + (to.x - from.x) * t,
                from.y + (to.y - from.y) * t,
            ));
        }
    }
    out.push(a);
    out
}

/// A tight sine squiggle: high mean curvature, clearly not a line.
pub fn squiggle_points(count: usize) -> Vec<Point2<Real>> {
    (0..count)
        .map(|i| {
            let x = i as Real * 2.0;
            let y = 100.0 + 8.0 * (x * TAU / 20.0).sin();
            Point2::new(x, y)
        })
        .collect()
}

/// Deterministic pseudo-noise: displaces each point by at most `magnitude`
/// in each axis. No RNG, so test runs are reproducible.
pub fn jitter(points: &[Point2<Real>], magnitude: Real) -> Vec<Point2<Real>> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let phase = i as Real * 12.9898;
            Point2::new(
                p.x + magnitude * (phase.sin()),
                p.y + magnitude * ((phase * 1.7).cos()),
            )
        })
        .collect()
}
