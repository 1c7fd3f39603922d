// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized distance tolerance used across the crate, in input
/// (pixel) units. Start/end separations below this count as "closed" and
/// near-neighbor searches use it as their radius.
/// Defaults to 20.0, but can be overridden:
///  1) **Build-time**: set env var `SKETCHSCORE_TOLERANCE` (e.g. `SKETCHSCORE_TOLERANCE=12.5 cargo build`)
///  2) **Runtime**: call [`set_distance_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

const DEFAULT_DISTANCE_TOLERANCE: Real = 20.0;

/// Returns the current distance tolerance.
/// If not set yet, it tries `SKETCHSCORE_TOLERANCE` (parsed as the active
/// `Real`) and falls back to the default.
pub fn distance_tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided, inherited by dependencies
        if let Some(environment_variable) = option_env!("SKETCHSCORE_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        DEFAULT_DISTANCE_TOLERANCE
    })
}

/// Set the distance tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `sketchscore::float_types::set_distance_tolerance(12.5);`
pub fn set_distance_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Epsilon for degenerate-geometry guards (zero-length sides, zero-area boxes).
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-5;
/// Epsilon for degenerate-geometry guards (zero-length sides, zero-area boxes).
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-9;

// Pi
/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

// Frac Pi 2
/// π/2
#[cfg(feature = "f32")]
pub const FRAC_PI_2: Real = core::f32::consts::FRAC_PI_2;
/// π/2
#[cfg(feature = "f64")]
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

// Frac Pi 4
/// π/4
#[cfg(feature = "f32")]
pub const FRAC_PI_4: Real = core::f32::consts::FRAC_PI_4;
/// π/4
#[cfg(feature = "f64")]
pub const FRAC_PI_4: Real = core::f64::consts::FRAC_PI_4;

// Tau
/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// The full circle constant (τ)
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;
