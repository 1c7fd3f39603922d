//! Accuracy-scoring tests: each per-shape scorer on strokes that should
//! score high, strokes that should score low, and the range invariant over
//! mismatched stroke/guide pairings.

mod support;

use nalgebra::Point2;
use sketchscore::float_types::Real;
use sketchscore::guide::{DrawingGuide, GuideShape};
use sketchscore::scoring::{position_accuracy, score};
use support::{circle_points, jitter, line_points, oval_points, square_points, triangle_points};

#[test]
fn perfect_circle_scores_near_one() {
    let guide = GuideShape::circle(Point2::new(200.0, 200.0), 50.0);
    let stroke = circle_points(Point2::new(200.0, 200.0), 50.0, 64);
    assert!(score(&stroke, &guide) >= 0.95);
}

#[test]
fn sparse_circle_still_scores_high() {
    let guide = GuideShape::circle(Point2::new(200.0, 200.0), 50.0);
    let stroke = circle_points(Point2::new(200.0, 200.0), 50.0, 32);
    assert!(score(&stroke, &guide) >= 0.9);
}

#[test]
fn wrong_radius_circle_scores_lower() {
    let guide = GuideShape::circle(Point2::new(200.0, 200.0), 50.0);
    let good = score(&circle_points(Point2::new(200.0, 200.0), 50.0, 64), &guide);
    let small = score(&circle_points(Point2::new(200.0, 200.0), 25.0, 64), &guide);
    assert!(small < good);
    assert!(small < 0.8);
}

#[test]
fn open_arc_loses_closure_credit_against_circle() {
    let guide = GuideShape::circle(Point2::new(0.0, 0.0), 50.0);
    let full = circle_points(Point2::new(0.0, 0.0), 50.0, 64);
    let half = full[..32].to_vec();
    assert!(score(&half, &guide) < score(&full, &guide));
}

#[test]
fn exact_line_scores_one() {
    let guide = GuideShape::line(Point2::new(0.0, 0.0), Point2::new(300.0, 100.0));
    let stroke = line_points(Point2::new(0.0, 0.0), Point2::new(300.0, 100.0), 2);
    assert!(score(&stroke, &guide) > 0.95);
}

#[test]
fn offset_line_scores_lower_than_exact() {
    let guide = GuideShape::line(Point2::new(0.0, 0.0), Point2::new(300.0, 0.0));
    let exact = line_points(Point2::new(0.0, 0.0), Point2::new(300.0, 0.0), 20);
    let offset = line_points(Point2::new(0.0, 60.0), Point2::new(300.0, 60.0), 20);
    assert!(score(&offset, &guide) < score(&exact, &guide));
}

#[test]
fn traced_square_scores_high_against_rectangle() {
    let guide = GuideShape::rectangle(Point2::new(100.0, 100.0), 100.0, 100.0, 0.0);
    let stroke = square_points(Point2::new(50.0, 50.0), 100.0, 10);
    assert!(score(&stroke, &guide) > 0.85);
}

#[test]
fn circle_scores_poorly_against_rectangle() {
    let guide = GuideShape::rectangle(Point2::new(100.0, 100.0), 100.0, 100.0, 0.0);
    let circle = circle_points(Point2::new(100.0, 100.0), 50.0, 64);
    let square = square_points(Point2::new(50.0, 50.0), 100.0, 10);
    assert!(score(&circle, &guide) < score(&square, &guide));
}

#[test]
fn traced_ellipse_scores_high_against_oval() {
    let guide = GuideShape::oval(Point2::new(300.0, 200.0), 150.0, 100.0, 0.0);
    let stroke = oval_points(Point2::new(300.0, 200.0), 75.0, 50.0, 64);
    assert!(score(&stroke, &guide) > 0.9);
}

#[test]
fn traced_curve_scores_high_against_itself() {
    let samples: Vec<_> = (0..40)
        .map(|i| {
            let x = i as Real * 10.0;
            Point2::new(x, 200.0 + 80.0 * (x / 120.0).sin())
        })
        .collect();
    let guide = GuideShape::curve(samples.clone());
    assert!(score(&samples, &guide) > 0.9);
}

#[test]
fn straight_stroke_scores_low_against_curve() {
    let samples: Vec<_> = (0..40)
        .map(|i| {
            let x = i as Real * 10.0;
            Point2::new(x, 200.0 + 80.0 * (x / 120.0).sin())
        })
        .collect();
    let guide = GuideShape::curve(samples.clone());
    let straight = line_points(Point2::new(0.0, 200.0), Point2::new(390.0, 200.0), 40);
    assert!(score(&straight, &guide) < score(&samples, &guide));
}

#[test]
fn traced_triangle_scores_high_against_polygon() {
    let (a, b, c) = (
        Point2::new(0.0, 0.0),
        Point2::new(200.0, 0.0),
        Point2::new(100.0, 160.0),
    );
    let guide = GuideShape::polygon(vec![a, b, c]);
    let stroke = triangle_points(a, b, c, 12);
    assert!(score(&stroke, &guide) > 0.85);
}

#[test]
fn wrong_corner_count_scores_lower_against_polygon() {
    let (a, b, c) = (
        Point2::new(0.0, 0.0),
        Point2::new(200.0, 0.0),
        Point2::new(100.0, 160.0),
    );
    let guide = GuideShape::polygon(vec![a, b, c]);
    let triangle = triangle_points(a, b, c, 12);
    let square = square_points(Point2::new(0.0, 0.0), 200.0, 12);
    assert!(score(&square, &guide) < score(&triangle, &guide));
}

#[test]
fn score_is_always_in_unit_range() {
    let guides = [
        GuideShape::circle(Point2::new(100.0, 100.0), 50.0),
        GuideShape::rectangle(Point2::new(100.0, 100.0), 120.0, 80.0, 0.3),
        GuideShape::line(Point2::new(0.0, 0.0), Point2::new(200.0, 50.0)),
        GuideShape::oval(Point2::new(100.0, 100.0), 150.0, 100.0, 0.0),
        GuideShape::curve(line_points(Point2::new(0.0, 0.0), Point2::new(100.0, 100.0), 10)),
        GuideShape::polygon(vec![
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(50.0, 80.0),
        ]),
    ];
    let strokes = [
        circle_points(Point2::new(100.0, 100.0), 50.0, 64),
        square_points(Point2::new(40.0, 60.0), 120.0, 10),
        line_points(Point2::new(0.0, 0.0), Point2::new(200.0, 50.0), 20),
        support::squiggle_points(80),
        jitter(&circle_points(Point2::new(500.0, 500.0), 10.0, 16), 5.0),
    ];
    for guide in &guides {
        for stroke in &strokes {
            let s = score(stroke, guide);
            assert!((0.0..=1.0).contains(&s), "score {s} out of range");
        }
    }
}

#[test]
fn empty_or_single_point_strokes_score_zero() {
    let guide = GuideShape::circle(Point2::new(0.0, 0.0), 50.0);
    assert_eq!(score(&[], &guide), 0.0);
    assert_eq!(score(&[Point2::new(1.0, 1.0)], &guide), 0.0);
}

#[test]
fn position_accuracy_rewards_landmark_proximity() {
    let shape = GuideShape::line(Point2::new(0.0, 0.0), Point2::new(200.0, 0.0));
    let guide = DrawingGuide::single(shape, 20.0);

    let exact = line_points(Point2::new(0.0, 0.0), Point2::new(200.0, 0.0), 20);
    assert!(position_accuracy(&exact, &guide) > 0.99);

    let far = line_points(Point2::new(0.0, 500.0), Point2::new(200.0, 500.0), 20);
    assert_eq!(position_accuracy(&far, &guide), 0.0);

    assert_eq!(position_accuracy(&[], &guide), 0.0);
}

#[test]
fn position_accuracy_scales_with_tolerance() {
    let shape = GuideShape::line(Point2::new(0.0, 0.0), Point2::new(200.0, 0.0));
    let mut guide = DrawingGuide::single(shape, 20.0);
    let near = line_points(Point2::new(0.0, 10.0), Point2::new(200.0, 10.0), 20);

    let tight = position_accuracy(&near, &guide);
    guide.rescale_tolerance(4.0);
    let loose = position_accuracy(&near, &guide);
    assert!(loose > tight);

    // Degenerate tolerance scores zero instead of dividing by it.
    guide.set_tolerance(0.0);
    assert_eq!(position_accuracy(&near, &guide), 0.0);
}
