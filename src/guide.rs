//! Target guide shapes for a tutorial step.

use crate::float_types::{Real, TAU};
use crate::geometry;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The shape classes the analyzer can produce and a guide can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeType {
    Circle,
    Rectangle,
    Line,
    Oval,
    Curve,
    Polygon,
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeType::Circle => "circle",
            ShapeType::Rectangle => "rectangle",
            ShapeType::Line => "line",
            ShapeType::Oval => "oval",
            ShapeType::Curve => "curve",
            ShapeType::Polygon => "polygon",
        };
        f.write_str(name)
    }
}

/// A target shape descriptor. Immutable; constructed by the guide generator.
///
/// `points` are the defining vertices/samples in guide (pixel) space,
/// `dimensions` is `(width, height)`, and `rotation` is radians
/// counter-clockwise around `center`. Presentation styling lives in the
/// rendering layer, not here.
#[derive(Clone, Debug, PartialEq)]
pub struct GuideShape {
    shape_type: ShapeType,
    points: Vec<Point2<Real>>,
    center: Point2<Real>,
    dimensions: (Real, Real),
    rotation: Real,
}

/// Segment count for sampled circle/oval outlines.
const OUTLINE_SEGMENTS: usize = 32;

impl GuideShape {
    /// Circle of `radius` around `center`, outline sampled parametrically at
    /// uniform angles.
    pub fn circle(center: Point2<Real>, radius: Real) -> Self {
        let points = (0..OUTLINE_SEGMENTS)
            .map(|i| {
                let theta = TAU * i as Real / OUTLINE_SEGMENTS as Real;
                Point2::new(
                    center.x + radius * theta.cos(),
                    center.y + radius * theta.sin(),
                )
            })
            .collect();
        Self {
            shape_type: ShapeType::Circle,
            points,
            center,
            dimensions: (radius * 2.0, radius * 2.0),
            rotation: 0.0,
        }
    }

    /// Axis-aligned rectangle around `center`, rotated by `rotation` radians.
    pub fn rectangle(center: Point2<Real>, width: Real, height: Real, rotation: Real) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        let points = [
            Point2::new(center.x - half_w, center.y - half_h),
            Point2::new(center.x + half_w, center.y - half_h),
            Point2::new(center.x + half_w, center.y + half_h),
            Point2::new(center.x - half_w, center.y + half_h),
        ]
        .iter()
        .map(|p| geometry::rotate(p, &center, rotation))
        .collect();
        Self {
            shape_type: ShapeType::Rectangle,
            points,
            center,
            dimensions: (width, height),
            rotation,
        }
    }

    /// Straight line from `start` to `end`.
    pub fn line(start: Point2<Real>, end: Point2<Real>) -> Self {
        let center = geometry::midpoint(&start, &end);
        let dimensions = ((end.x - start.x).abs(), (end.y - start.y).abs());
        let rotation = geometry::angle(&start, &end);
        Self {
            shape_type: ShapeType::Line,
            points: vec![start, end],
            center,
            dimensions,
            rotation,
        }
    }

    /// Oval with radii `width/2` and `height/2`, rotated by `rotation`.
    pub fn oval(center: Point2<Real>, width: Real, height: Real, rotation: Real) -> Self {
        let rx = width / 2.0;
        let ry = height / 2.0;
        let points = (0..OUTLINE_SEGMENTS)
            .map(|i| {
                let theta = TAU * i as Real / OUTLINE_SEGMENTS as Real;
                let p = Point2::new(center.x + rx * theta.cos(), center.y + ry * theta.sin());
                geometry::rotate(&p, &center, rotation)
            })
            .collect();
        Self {
            shape_type: ShapeType::Oval,
            points,
            center,
            dimensions: (width, height),
            rotation,
        }
    }

    /// Closed polygon from its vertices (not repeated at the end).
    /// Falls back to a degenerate empty shape when fewer than 3 vertices are
    /// given.
    pub fn polygon(vertices: Vec<Point2<Real>>) -> Self {
        let center = geometry::centroid(&vertices).unwrap_or_else(Point2::origin);
        let bbox = geometry::bounding_rect(&vertices).unwrap_or_default();
        Self {
            shape_type: ShapeType::Polygon,
            points: vertices,
            center,
            dimensions: (bbox.width(), bbox.height()),
            rotation: 0.0,
        }
    }

    /// Freeform curve from its sample points.
    pub fn curve(samples: Vec<Point2<Real>>) -> Self {
        let center = geometry::centroid(&samples).unwrap_or_else(Point2::origin);
        let bbox = geometry::bounding_rect(&samples).unwrap_or_default();
        Self {
            shape_type: ShapeType::Curve,
            points: samples,
            center,
            dimensions: (bbox.width(), bbox.height()),
            rotation: 0.0,
        }
    }

    #[inline]
    pub const fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    #[inline]
    pub fn points(&self) -> &[Point2<Real>] {
        &self.points
    }

    #[inline]
    pub const fn center(&self) -> Point2<Real> {
        self.center
    }

    /// `(width, height)` extents.
    #[inline]
    pub const fn dimensions(&self) -> (Real, Real) {
        self.dimensions
    }

    #[inline]
    pub const fn rotation(&self) -> Real {
        self.rotation
    }

    /// Nominal radius: mean of the half-extents.
    #[inline]
    pub fn radius(&self) -> Real {
        (self.dimensions.0 + self.dimensions.1) / 4.0
    }

    /// The four corners of a rectangle guide, in order. Computed from
    /// center/dimensions/rotation for any shape type; only meaningful for
    /// rectangles.
    pub fn corners(&self) -> [Point2<Real>; 4] {
        let half_w = self.dimensions.0 / 2.0;
        let half_h = self.dimensions.1 / 2.0;
        let c = self.center;
        [
            Point2::new(c.x - half_w, c.y - half_h),
            Point2::new(c.x + half_w, c.y - half_h),
            Point2::new(c.x + half_w, c.y + half_h),
            Point2::new(c.x - half_w, c.y + half_h),
        ]
        .map(|p| geometry::rotate(&p, &c, self.rotation))
    }

    /// First and last defining points, i.e. the endpoints of a line guide.
    pub fn endpoints(&self) -> Option<(Point2<Real>, Point2<Real>)> {
        Some((*self.points.first()?, *self.points.last()?))
    }
}

/// One tutorial step: the shapes to trace, key landmark positions, and the
/// pixel radius defining "close enough".
///
/// `tolerance` is the one mutable field; the adaptive-difficulty layer
/// rescales it at runtime. Everything else is immutable per step.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawingGuide {
    shapes: Vec<GuideShape>,
    target_points: Vec<Point2<Real>>,
    tolerance: Real,
}

impl DrawingGuide {
    pub fn new(shapes: Vec<GuideShape>, target_points: Vec<Point2<Real>>, tolerance: Real) -> Self {
        Self {
            shapes,
            target_points,
            tolerance: tolerance.max(0.0),
        }
    }

    /// Single-shape step with the shape's defining points as landmarks.
    pub fn single(shape: GuideShape, tolerance: Real) -> Self {
        let target_points = shape.points().to_vec();
        Self::new(vec![shape], target_points, tolerance)
    }

    #[inline]
    pub fn shapes(&self) -> &[GuideShape] {
        &self.shapes
    }

    #[inline]
    pub fn target_points(&self) -> &[Point2<Real>] {
        &self.target_points
    }

    #[inline]
    pub const fn tolerance(&self) -> Real {
        self.tolerance
    }

    /// Replace the tolerance (adaptive difficulty).
    pub fn set_tolerance(&mut self, tolerance: Real) {
        self.tolerance = tolerance.max(0.0);
    }

    /// Rescale the tolerance by a positive factor (adaptive difficulty).
    pub fn rescale_tolerance(&mut self, factor: Real) {
        if factor > 0.0 {
            self.tolerance *= factor;
        }
    }

    /// The shape whose center lies nearest to `point`, i.e. the one an
    /// in-progress stroke is most plausibly tracing.
    pub fn nearest_shape(&self, point: &Point2<Real>) -> Option<&GuideShape> {
        self.shapes.iter().min_by(|a, b| {
            let da = geometry::distance(&a.center(), point);
            let db = geometry::distance(&b.center(), point);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}
