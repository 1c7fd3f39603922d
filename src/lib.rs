//! Real-time **stroke analysis and accuracy scoring** for guided drawing:
//! classify a freehand stroke geometrically, score it against a target guide
//! shape, and schedule that work incrementally against a live drawing
//! surface without blocking it.
//!
//! The pipeline is synchronous and pure: raw points flow through the
//! [preprocessor](preprocess), the [analyzer](analysis), and the
//! [scorer](scoring). The [scheduler] is the concurrency skin around it:
//! ring buffering, frame-rate-aware throttling, chunked cooperative
//! yielding, cancellation, and memory-pressure-adaptive degradation.
//!
//! # Features
//! - **f64**: use f64 as Real (default)
//! - **f32**: use f32 as Real, conflicts with f64
//!
//! ```
//! use nalgebra::Point2;
//! use sketchscore::analysis::ShapeAnalyzer;
//! use sketchscore::float_types::TAU;
//! use sketchscore::guide::{DrawingGuide, GuideShape, ShapeType};
//! use sketchscore::scoring;
//!
//! let circle: Vec<Point2<f64>> = (0..64)
//!     .map(|i| {
//!         let theta = TAU * i as f64 / 64.0;
//!         Point2::new(100.0 + 50.0 * theta.cos(), 100.0 + 50.0 * theta.sin())
//!     })
//!     .collect();
//!
//! let analysis = ShapeAnalyzer::new().analyze(&circle);
//! assert_eq!(analysis.shape_type, ShapeType::Circle);
//!
//! let guide = DrawingGuide::single(GuideShape::circle(Point2::new(100.0, 100.0), 50.0), 20.0);
//! let accuracy = scoring::score(&circle, &guide.shapes()[0]);
//! assert!(accuracy > 0.9);
//! ```

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod analysis;
pub mod buffer;
pub mod errors;
pub mod float_types;
pub mod geometry;
pub mod guide;
pub mod metrics;
pub mod preprocess;
pub mod scheduler;
pub mod scoring;
pub mod stroke;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use analysis::{AnalysisResult, GeometricProperties, ShapeAnalysis, ShapeAnalyzer};
pub use buffer::CircularBuffer;
pub use errors::{AnalysisError, Result};
pub use guide::{DrawingGuide, GuideShape, ShapeType};
pub use metrics::AnalysisMetrics;
pub use scheduler::{AnalysisScheduler, DeviceProfile, MemoryPressure, SchedulerConfig};
pub use stroke::{Stroke, StrokeSample};
