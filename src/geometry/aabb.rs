use crate::float_types::{EPSILON, Real};
use nalgebra::Point2;

/// 2D axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub mins: Point2<Real>,
    pub maxs: Point2<Real>,
}

impl Aabb {
    #[inline]
    pub const fn new(mins: Point2<Real>, maxs: Point2<Real>) -> Self {
        Self { mins, maxs }
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    pub fn from_points(points: &[Point2<Real>]) -> Option<Self> {
        let first = points.first()?;
        let mut mins = *first;
        let mut maxs = *first;
        for p in &points[1..] {
            if p.x < mins.x {
                mins.x = p.x;
            }
            if p.y < mins.y {
                mins.y = p.y;
            }
            if p.x > maxs.x {
                maxs.x = p.x;
            }
            if p.y > maxs.y {
                maxs.y = p.y;
            }
        }
        Some(Self { mins, maxs })
    }

    #[inline]
    pub fn width(&self) -> Real {
        self.maxs.x - self.mins.x
    }

    #[inline]
    pub fn height(&self) -> Real {
        self.maxs.y - self.mins.y
    }

    #[inline]
    pub fn area(&self) -> Real {
        self.width() * self.height()
    }

    #[inline]
    pub fn diagonal(&self) -> Real {
        self.width().hypot(self.height())
    }

    /// Larger of width and height; the scale factor used for unit-box
    /// normalization.
    #[inline]
    pub fn max_extent(&self) -> Real {
        self.width().max(self.height())
    }

    /// True when the box has no usable extent in either axis.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.max_extent() < EPSILON
    }

    #[inline]
    pub fn center(&self) -> Point2<Real> {
        Point2::new(
            (self.mins.x + self.maxs.x) / 2.0,
            (self.mins.y + self.maxs.y) / 2.0,
        )
    }

    #[inline]
    pub fn contains(&self, p: &Point2<Real>) -> bool {
        p.x >= self.mins.x && p.x <= self.maxs.x && p.y >= self.mins.y && p.y <= self.maxs.y
    }

    /// Grow this box to cover `other`.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            mins: Point2::new(self.mins.x.min(other.mins.x), self.mins.y.min(other.mins.y)),
            maxs: Point2::new(self.maxs.x.max(other.maxs.x), self.maxs.y.max(other.maxs.y)),
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new(Point2::origin(), Point2::origin())
    }
}
