//! Stroke input model: one pen-down-to-pen-up gesture.

use crate::float_types::Real;
use nalgebra::Point2;
use std::time::Instant;

/// One live input sample: a position plus the pressure/velocity readings
/// taken with it. Ring-buffer element for incremental analysis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeSample {
    pub point: Point2<Real>,
    /// Pen pressure in `[0, 1]`.
    pub pressure: Real,
    /// Pen speed, `>= 0`, in input units per second.
    pub velocity: Real,
}

impl StrokeSample {
    pub const fn new(point: Point2<Real>, pressure: Real, velocity: Real) -> Self {
        Self {
            point,
            pressure,
            velocity,
        }
    }

    /// Sample from a bare position, for surfaces that report no pressure or
    /// velocity.
    pub const fn from_point(point: Point2<Real>) -> Self {
        Self {
            point,
            pressure: 1.0,
            velocity: 0.0,
        }
    }
}

/// An immutable, time-ordered point sequence with optional parallel
/// pressure/velocity arrays.
///
/// Invariant: `pressure.len() == points.len()` or `pressure` is empty
/// (no pressure data); likewise for `velocity`. The constructor asserts this
/// in debug builds and degrades to "no data" in release builds rather than
/// risking out-of-bounds indexing later.
#[derive(Clone, Debug)]
pub struct Stroke {
    points: Vec<Point2<Real>>,
    pressure: Vec<Real>,
    velocity: Vec<Real>,
    created_at: Instant,
}

impl Stroke {
    pub fn new(points: Vec<Point2<Real>>, pressure: Vec<Real>, velocity: Vec<Real>) -> Self {
        debug_assert!(
            pressure.is_empty() || pressure.len() == points.len(),
            "pressure array length {} does not match {} points",
            pressure.len(),
            points.len()
        );
        debug_assert!(
            velocity.is_empty() || velocity.len() == points.len(),
            "velocity array length {} does not match {} points",
            velocity.len(),
            points.len()
        );
        let pressure = if pressure.len() == points.len() {
            pressure
        } else {
            Vec::new()
        };
        let velocity = if velocity.len() == points.len() {
            velocity
        } else {
            Vec::new()
        };
        Self {
            points,
            pressure,
            velocity,
            created_at: Instant::now(),
        }
    }

    /// Stroke with positions only.
    pub fn from_points(points: Vec<Point2<Real>>) -> Self {
        Self::new(points, Vec::new(), Vec::new())
    }

    /// Stroke from a buffered sample snapshot.
    pub fn from_samples(samples: &[StrokeSample]) -> Self {
        Self::new(
            samples.iter().map(|s| s.point).collect(),
            samples.iter().map(|s| s.pressure).collect(),
            samples.iter().map(|s| s.velocity).collect(),
        )
    }

    #[inline]
    pub fn points(&self) -> &[Point2<Real>] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub const fn created_at(&self) -> Instant {
        self.created_at
    }

    /// True when this stroke carries pressure data.
    #[inline]
    pub fn has_pressure(&self) -> bool {
        !self.pressure.is_empty()
    }

    /// True when this stroke carries velocity data.
    #[inline]
    pub fn has_velocity(&self) -> bool {
        !self.velocity.is_empty()
    }

    #[inline]
    pub fn pressure(&self) -> &[Real] {
        &self.pressure
    }

    #[inline]
    pub fn velocity(&self) -> &[Real] {
        &self.velocity
    }

    /// Pressure at a point index, `None` when no pressure data is present.
    pub fn pressure_at(&self, index: usize) -> Option<Real> {
        self.pressure.get(index).copied()
    }

    /// Velocity at a point index, `None` when no velocity data is present.
    pub fn velocity_at(&self, index: usize) -> Option<Real> {
        self.velocity.get(index).copied()
    }

    /// Rebuild this stroke with a replaced point sequence, truncating the
    /// pressure/velocity arrays to the new point count. The arrays are not
    /// re-interpolated; minor temporal misalignment after resampling is an
    /// accepted approximation.
    pub(crate) fn with_points(&self, points: Vec<Point2<Real>>) -> Self {
        let count = points.len();
        let mut pressure = self.pressure.clone();
        let mut velocity = self.velocity.clone();
        if !pressure.is_empty() {
            pressure.truncate(count);
        }
        if !velocity.is_empty() {
            velocity.truncate(count);
        }
        // Truncation may break the parallel-array invariant when the point
        // count grew; degrade to "no data" in that case.
        if pressure.len() != count {
            pressure = Vec::new();
        }
        if velocity.len() != count {
            velocity = Vec::new();
        }
        Self {
            points,
            pressure,
            velocity,
            created_at: self.created_at,
        }
    }
}
