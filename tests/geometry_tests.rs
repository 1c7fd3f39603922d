//! Geometric primitive tests: distances, angles, curvature, corners, and
//! the geo-backed bounding box / centroid / simplify helpers.

mod support;

use nalgebra::Point2;
use sketchscore::float_types::{EPSILON, FRAC_PI_2, FRAC_PI_4, Real};
use sketchscore::geometry::{
    self, Aabb, bounding_rect, centroid, detect_corners, distance, distance_to_segment, lerp,
    mean_curvature, midpoint, point_curvature, polyline_length, rotate, simplify,
};
use support::{circle_points, line_points, square_points};

fn approx(a: Real, b: Real, tol: Real) -> bool {
    (a - b).abs() < tol
}

#[test]
fn distance_and_midpoint() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(3.0, 4.0);
    assert!(approx(distance(&a, &b), 5.0, 1e-6));
    assert_eq!(midpoint(&a, &b), Point2::new(1.5, 2.0));
}

#[test]
fn angle_quadrants() {
    let o = Point2::new(0.0, 0.0);
    assert!(approx(geometry::angle(&o, &Point2::new(1.0, 0.0)), 0.0, 1e-6));
    assert!(approx(
        geometry::angle(&o, &Point2::new(0.0, 1.0)),
        FRAC_PI_2,
        1e-6
    ));
    assert!(approx(
        geometry::angle(&o, &Point2::new(-1.0, -1.0)),
        -3.0 * FRAC_PI_4,
        1e-6
    ));
}

#[test]
fn rotate_quarter_turn() {
    let p = rotate(
        &Point2::new(1.0, 0.0),
        &Point2::new(0.0, 0.0),
        FRAC_PI_2,
    );
    assert!(approx(p.x, 0.0, 1e-6));
    assert!(approx(p.y, 1.0, 1e-6));
}

#[test]
fn lerp_endpoints_and_middle() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(10.0, 20.0);
    assert_eq!(lerp(&a, &b, 0.0), a);
    assert_eq!(lerp(&a, &b, 1.0), b);
    assert_eq!(lerp(&a, &b, 0.5), Point2::new(5.0, 10.0));
}

#[test]
fn polyline_length_of_square() {
    let square = square_points(Point2::new(0.0, 0.0), 10.0, 5);
    assert!(approx(polyline_length(&square), 40.0, 1e-6));
}

#[test]
fn bounding_rect_of_points() {
    let points = vec![
        Point2::new(1.0, 2.0),
        Point2::new(-3.0, 5.0),
        Point2::new(4.0, -1.0),
    ];
    let bb = bounding_rect(&points).unwrap();
    assert_eq!(bb.mins, Point2::new(-3.0, -1.0));
    assert_eq!(bb.maxs, Point2::new(4.0, 5.0));
    assert!(bounding_rect(&[]).is_none());
}

#[test]
fn aabb_queries() {
    let bb = Aabb::new(Point2::new(0.0, 0.0), Point2::new(4.0, 3.0));
    assert!(approx(bb.width(), 4.0, 1e-9));
    assert!(approx(bb.height(), 3.0, 1e-9));
    assert!(approx(bb.diagonal(), 5.0, 1e-6));
    assert!(approx(bb.max_extent(), 4.0, 1e-9));
    assert_eq!(bb.center(), Point2::new(2.0, 1.5));
    assert!(bb.contains(&Point2::new(1.0, 1.0)));
    assert!(!bb.contains(&Point2::new(5.0, 1.0)));
    assert!(!bb.is_degenerate());
    assert!(Aabb::new(Point2::new(1.0, 1.0), Point2::new(1.0, 1.0)).is_degenerate());
}

#[test]
fn centroid_is_point_mean() {
    // Unevenly spaced points along a line: the point-set mean must not be
    // arc-length weighted.
    let points = vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(8.0, 0.0),
    ];
    let c = centroid(&points).unwrap();
    assert!(approx(c.x, 3.0, 1e-6));
    assert!(approx(c.y, 0.0, 1e-6));
    assert!(centroid(&[]).is_none());
}

#[test]
fn curvature_of_circle_is_inverse_radius() {
    let circle = circle_points(Point2::new(0.0, 0.0), 50.0, 64);
    let kappa = point_curvature(&circle[0], &circle[1], &circle[2]);
    assert!(approx(kappa, 1.0 / 50.0, 1e-4));
    assert!(approx(mean_curvature(&circle), 1.0 / 50.0, 1e-4));
}

#[test]
fn curvature_of_collinear_points_is_zero() {
    let line = line_points(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0), 11);
    assert!(mean_curvature(&line) < EPSILON);
    assert_eq!(
        point_curvature(&line[0], &line[0], &line[1]),
        0.0,
        "degenerate triple must not divide by zero"
    );
}

#[test]
fn distance_to_segment_clamps_to_endpoints() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(10.0, 0.0);
    assert!(approx(
        distance_to_segment(&Point2::new(5.0, 3.0), &a, &b),
        3.0,
        1e-6
    ));
    assert!(approx(
        distance_to_segment(&Point2::new(-4.0, 3.0), &a, &b),
        5.0,
        1e-6
    ));
    // Degenerate segment falls back to point distance.
    assert!(approx(
        distance_to_segment(&Point2::new(3.0, 4.0), &a, &a),
        5.0,
        1e-6
    ));
}

#[test]
fn square_yields_four_corners_including_seam() {
    let square = square_points(Point2::new(0.0, 0.0), 100.0, 10);
    let corners = detect_corners(&square, FRAC_PI_4);
    assert_eq!(corners.len(), 4);
    // The seam corner at the shared start/end point is detected too.
    assert_eq!(corners[0].index, 0);
    for corner in &corners {
        assert!(approx(corner.turn, FRAC_PI_2, 1e-6));
    }
    let positions: Vec<_> = corners.iter().map(|c| c.position).collect();
    assert!(positions.contains(&Point2::new(100.0, 100.0)));
}

#[test]
fn straight_line_yields_no_corners() {
    let line = line_points(Point2::new(0.0, 0.0), Point2::new(200.0, 50.0), 20);
    assert!(detect_corners(&line, FRAC_PI_4).is_empty());
}

#[test]
fn corner_clusters_collapse_to_sharpest() {
    // An L-shape whose corner is rounded over two nearby points: both turns
    // exceed the threshold, but they must merge into a single detection.
    let mut points = line_points(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0), 11);
    points.push(Point2::new(104.0, 6.0));
    points.push(Point2::new(102.0, 14.0));
    points.extend(line_points(
        Point2::new(102.0, 22.0),
        Point2::new(102.0, 100.0),
        10,
    ));
    let corners = detect_corners(&points, FRAC_PI_4);
    assert_eq!(corners.len(), 1);
    assert_eq!(corners[0].position, Point2::new(100.0, 0.0));
}

#[test]
fn simplify_drops_collinear_interior_points() {
    let line = line_points(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0), 50);
    let simplified = simplify(&line, 1.0);
    assert_eq!(simplified.len(), 2);
    assert_eq!(simplified[0], line[0]);
    assert_eq!(simplified[1], line[49]);
    // Short inputs pass through untouched.
    let two = line_points(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), 2);
    assert_eq!(simplify(&two, 1.0), two);
}
