//! Incremental analysis scheduling: throttling, buffering, chunked full
//! analysis, cancellation, and memory-pressure adaptation.
//!
//! The scheduler is the concurrency skin around the otherwise synchronous
//! preprocess → analyze → score pipeline. It owns the point ring buffer and
//! the stroke history exclusively; all mutation happens from the single
//! scheduling context, and consumers only ever see immutable snapshots.

mod chunk;
pub mod device;
pub mod memory;

pub use device::DeviceProfile;
pub use memory::{MemoryMonitor, MemoryPressure, SharedMemoryMonitor};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use nalgebra::Point2;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::analysis::{AnalysisResult, ShapeAnalyzer};
use crate::buffer::CircularBuffer;
use crate::errors::{AnalysisError, Result};
use crate::float_types::Real;
use crate::guide::DrawingGuide;
use crate::metrics::AnalysisMetrics;
use crate::preprocess::{self, StrokePreprocessor};
use crate::scoring;
use crate::stroke::{Stroke, StrokeSample};

/// Hard cap on the ring buffer; incremental analysis never looks further
/// back than this within one stroke.
pub const MAX_BUFFER_CAPACITY: usize = 200;

/// Memory pressure never shrinks the ring below this.
const MIN_BUFFER_CAPACITY: usize = 32;

/// Fraction of history kept when critical pressure trims it: a majority,
/// never all.
const HISTORY_RETAIN_FRACTION: f64 = 0.6;

/// Scheduler tuning knobs.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Ring buffer capacity; clamped to [`MAX_BUFFER_CAPACITY`].
    pub buffer_capacity: usize,
    /// Minimum buffered points before an incremental pass runs.
    pub min_points: usize,
    /// Wall-clock budget for one analysis pass.
    pub analysis_timeout: Duration,
    /// Completed strokes retained for diagnostics.
    pub history_limit: usize,
    /// Sane cap on completed-stroke size; beyond it the stroke is truncated.
    pub max_stroke_points: usize,
    /// Override the device-derived throttle interval.
    pub throttle: Option<Duration>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: MAX_BUFFER_CAPACITY,
            min_points: 8,
            analysis_timeout: Duration::from_millis(120),
            history_limit: 32,
            max_stroke_points: 10_000,
            throttle: None,
        }
    }
}

impl SchedulerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity.clamp(1, MAX_BUFFER_CAPACITY);
        self
    }

    pub fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points.max(2);
        self
    }

    pub fn with_analysis_timeout(mut self, timeout: Duration) -> Self {
        self.analysis_timeout = timeout;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    pub fn with_max_stroke_points(mut self, max: usize) -> Self {
        self.max_stroke_points = max.max(2);
        self
    }

    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = Some(throttle);
        self
    }
}

/// One spawned incremental pass. Setting `cancel` makes the task abort at
/// its next checkpoint and deliver nothing.
struct InFlight {
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Owns the ring buffer and stroke history; schedules analysis passes
/// against a live drawing surface.
///
/// Must live on a tokio runtime: incremental passes are spawned tasks.
/// Results are delivered in submission order through the receiver returned
/// by [`AnalysisScheduler::new`]; at most one incremental pass per stroke is
/// in flight at a time.
pub struct AnalysisScheduler {
    config: SchedulerConfig,
    profile: DeviceProfile,
    buffer: CircularBuffer<StrokeSample>,
    guide: Option<DrawingGuide>,
    history: Vec<Arc<Stroke>>,
    in_flight: Option<InFlight>,
    last_analysis: Option<Instant>,
    pressure: MemoryPressure,
    monitor: Box<dyn MemoryMonitor>,
    preprocessor: StrokePreprocessor,
    analyzer: ShapeAnalyzer,
    tx: UnboundedSender<AnalysisResult>,
    metrics: Arc<Mutex<AnalysisMetrics>>,
}

impl AnalysisScheduler {
    /// Create a scheduler with the default (embedder-fed) memory monitor.
    pub fn new(
        profile: DeviceProfile,
        config: SchedulerConfig,
    ) -> (Self, UnboundedReceiver<AnalysisResult>) {
        Self::with_monitor(profile, config, Box::new(SharedMemoryMonitor::new()))
    }

    /// Create a scheduler with a custom memory signal source.
    pub fn with_monitor(
        profile: DeviceProfile,
        config: SchedulerConfig,
        monitor: Box<dyn MemoryMonitor>,
    ) -> (Self, UnboundedReceiver<AnalysisResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let capacity = config.buffer_capacity.clamp(1, MAX_BUFFER_CAPACITY);
        let scheduler = Self {
            buffer: CircularBuffer::new(capacity),
            guide: None,
            history: Vec::new(),
            in_flight: None,
            last_analysis: None,
            pressure: MemoryPressure::Nominal,
            monitor,
            preprocessor: StrokePreprocessor::default(),
            analyzer: ShapeAnalyzer::default(),
            tx,
            metrics: Arc::new(Mutex::new(AnalysisMetrics::new())),
            config,
            profile,
        };
        (scheduler, rx)
    }

    pub fn set_guide(&mut self, guide: DrawingGuide) {
        self.guide = Some(guide);
    }

    pub fn guide(&self) -> Option<&DrawingGuide> {
        self.guide.as_ref()
    }

    /// Adaptive difficulty: rescale the current guide's tolerance.
    pub fn rescale_tolerance(&mut self, factor: Real) {
        if let Some(guide) = self.guide.as_mut() {
            guide.rescale_tolerance(factor);
        }
    }

    /// Snapshot of the pass metrics.
    pub fn metrics(&self) -> AnalysisMetrics {
        self.metrics
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Most recently observed pressure level.
    pub const fn pressure(&self) -> MemoryPressure {
        self.pressure
    }

    /// Retained completed strokes, oldest first.
    pub fn history(&self) -> &[Arc<Stroke>] {
        &self.history
    }

    /// Points currently buffered for the in-progress stroke.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Current ring capacity (shrinks under memory pressure).
    pub fn buffer_capacity(&self) -> usize {
        self.buffer.capacity()
    }

    fn throttle_interval(&self) -> Duration {
        self.config
            .throttle
            .unwrap_or_else(|| self.profile.throttle_interval())
    }

    /// Buffer a live input point without pressure/velocity data.
    pub fn push_point(&mut self, point: Point2<Real>) {
        self.push_sample(StrokeSample::from_point(point));
    }

    /// Buffer a live input sample. When the throttle interval has elapsed
    /// and enough points are buffered, an incremental analysis pass is
    /// started; the previous in-flight pass (if any) is cancelled first.
    pub fn push_sample(&mut self, sample: StrokeSample) {
        self.buffer.push(sample);
        let pressure = self.adapt_to_pressure();

        if self.buffer.len() < self.config.min_points {
            return;
        }
        if let Some(last) = self.last_analysis {
            if last.elapsed() < self.throttle_interval() {
                return;
            }
        }

        if pressure == MemoryPressure::Severe {
            // Skip the pass entirely; the consumer still gets a (neutral)
            // result so the UI never stalls waiting for one.
            warn!("severe memory pressure: skipping incremental analysis");
            self.cancel_in_flight();
            let stroke = Arc::new(Stroke::from_samples(&self.buffer.to_vec()));
            if let Ok(mut metrics) = self.metrics.lock() {
                metrics.record_degraded();
            }
            let _ = self.tx.send(AnalysisResult::neutral(stroke));
            self.last_analysis = Some(Instant::now());
            return;
        }

        self.start_incremental();
    }

    /// Cancel the in-flight pass, if any. Its result is discarded, never
    /// delivered.
    pub fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel.store(true, Ordering::SeqCst);
            drop(in_flight.handle);
        }
    }

    /// Wait for the in-flight pass (if any) to finish or observe its
    /// cancellation. Useful at pen-lift and in tests.
    pub async fn flush(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            let _ = in_flight.handle.await;
        }
    }

    fn start_incremental(&mut self) {
        self.cancel_in_flight();

        let stroke = Arc::new(Stroke::from_samples(&self.buffer.to_vec()));
        let cancel = Arc::new(AtomicBool::new(false));
        let pass = IncrementalPass {
            stroke,
            guide: self.guide.clone(),
            cancel: Arc::clone(&cancel),
            preprocessor: self.preprocessor,
            analyzer: self.analyzer,
            timeout: self.config.analysis_timeout,
            tx: self.tx.clone(),
            metrics: Arc::clone(&self.metrics),
        };
        let handle = tokio::spawn(pass.run());
        self.in_flight = Some(InFlight { cancel, handle });
        self.last_analysis = Some(Instant::now());
    }

    /// Analyze a completed stroke (pen lift). The raw point passes run
    /// chunked with yields between chunks; the wall-clock budget converts a
    /// runaway pass into a neutral result rather than blocking the caller.
    ///
    /// Cancels any in-flight incremental pass and clears the ring buffer.
    /// The result is returned directly (not sent through the incremental
    /// result channel) and the stroke is retained in history.
    pub async fn finish_stroke(&mut self, stroke: Stroke) -> AnalysisResult {
        self.cancel_in_flight();
        self.buffer.clear();
        let pressure = self.adapt_to_pressure();

        let stroke = if stroke.len() > self.config.max_stroke_points {
            warn!(
                len = stroke.len(),
                max = self.config.max_stroke_points,
                "oversized stroke truncated before analysis"
            );
            let truncated: Vec<_> = stroke.points()[..self.config.max_stroke_points].to_vec();
            stroke.with_points(truncated)
        } else {
            stroke
        };
        let stroke = Arc::new(stroke);
        self.remember(&stroke);
        self.last_analysis = Some(Instant::now());

        if pressure == MemoryPressure::Severe {
            warn!("severe memory pressure: skipping completed-stroke analysis");
            if let Ok(mut metrics) = self.metrics.lock() {
                metrics.record_degraded();
            }
            return AnalysisResult::neutral(stroke);
        }

        let cancel = Arc::new(AtomicBool::new(false));
        let started = Instant::now();
        let outcome = tokio::time::timeout(
            self.config.analysis_timeout,
            run_full(
                Arc::clone(&stroke),
                self.guide.as_ref(),
                &cancel,
                self.preprocessor,
                self.analyzer,
                self.profile.chunk_size(),
            ),
        )
        .await;

        match outcome {
            Ok(Ok(result)) => {
                if let Ok(mut metrics) = self.metrics.lock() {
                    metrics.record_completed(started.elapsed());
                }
                result
            },
            Ok(Err(err)) => {
                warn!(error = %err, "completed-stroke analysis degraded");
                if let Ok(mut metrics) = self.metrics.lock() {
                    metrics.record_degraded();
                }
                AnalysisResult::neutral(stroke)
            },
            Err(_) => {
                warn!(
                    budget_ms = self.config.analysis_timeout.as_millis() as u64,
                    "completed-stroke analysis timed out"
                );
                if let Ok(mut metrics) = self.metrics.lock() {
                    metrics.record_timed_out();
                }
                AnalysisResult::neutral(stroke)
            },
        }
    }

    fn remember(&mut self, stroke: &Arc<Stroke>) {
        self.history.push(Arc::clone(stroke));
        if self.history.len() > self.config.history_limit {
            let excess = self.history.len() - self.config.history_limit;
            self.history.drain(..excess);
        }
    }

    /// Sample the memory signal and apply graduated responses on upward
    /// transitions: shrink the ring at warning, trim history at critical.
    /// Recovery keeps the shrunk sizes; they regrow naturally per stroke.
    fn adapt_to_pressure(&mut self) -> MemoryPressure {
        let level = memory::pressure_level(
            self.monitor.resident_bytes(),
            self.profile.memory_budget,
        );
        if level > self.pressure {
            info!(from = ?self.pressure, to = ?level, "memory pressure rising");
            if level >= MemoryPressure::Warning && self.buffer.capacity() > MIN_BUFFER_CAPACITY {
                let new_capacity = (self.buffer.capacity() / 2).max(MIN_BUFFER_CAPACITY);
                debug!(new_capacity, "shrinking point buffer");
                self.buffer.resize(new_capacity);
            }
            if level >= MemoryPressure::Critical && self.history.len() > 1 {
                let keep = ((self.history.len() as f64 * HISTORY_RETAIN_FRACTION).ceil() as usize)
                    .max(1);
                let excess = self.history.len() - keep;
                if excess > 0 {
                    debug!(dropped = excess, kept = keep, "trimming stroke history");
                    self.history.drain(..excess);
                }
            }
        }
        self.pressure = level;
        level
    }
}

/// Everything one spawned incremental pass needs, detached from the
/// scheduler so the scheduling context is never blocked on it.
struct IncrementalPass {
    stroke: Arc<Stroke>,
    guide: Option<DrawingGuide>,
    cancel: Arc<AtomicBool>,
    preprocessor: StrokePreprocessor,
    analyzer: ShapeAnalyzer,
    timeout: Duration,
    tx: UnboundedSender<AnalysisResult>,
    metrics: Arc<Mutex<AnalysisMetrics>>,
}

impl IncrementalPass {
    async fn run(self) {
        // The guard settles the metrics on every exit path, including task
        // drop mid-await.
        let mut guard = PassGuard::new(Arc::clone(&self.metrics));
        let outcome = tokio::time::timeout(
            self.timeout,
            run_incremental(
                Arc::clone(&self.stroke),
                self.guide.as_ref(),
                &self.cancel,
                self.preprocessor,
                self.analyzer,
            ),
        )
        .await;

        match outcome {
            Ok(Ok(result)) => {
                if self.cancel.load(Ordering::SeqCst) {
                    return;
                }
                guard.settle(PassOutcome::Completed);
                let _ = self.tx.send(result);
            },
            Ok(Err(AnalysisError::Cancelled)) => {},
            Ok(Err(err)) => {
                warn!(error = %err, "incremental analysis degraded");
                guard.settle(PassOutcome::Degraded);
                if !self.cancel.load(Ordering::SeqCst) {
                    let _ = self.tx.send(AnalysisResult::neutral(self.stroke));
                }
            },
            Err(_) => {
                guard.settle(PassOutcome::TimedOut);
                if !self.cancel.load(Ordering::SeqCst) {
                    let _ = self.tx.send(AnalysisResult::neutral(self.stroke));
                }
            },
        }
    }
}

/// Incremental passes work on small ring snapshots; a single yield point
/// between preprocessing and scoring is enough to observe cancellation.
async fn run_incremental(
    stroke: Arc<Stroke>,
    guide: Option<&DrawingGuide>,
    cancel: &Arc<AtomicBool>,
    preprocessor: StrokePreprocessor,
    analyzer: ShapeAnalyzer,
) -> Result<AnalysisResult> {
    if cancel.load(Ordering::SeqCst) {
        return Err(AnalysisError::Cancelled);
    }
    let spatial = preprocessor.preprocess_spatial(&stroke);
    tokio::task::yield_now().await;
    if cancel.load(Ordering::SeqCst) {
        return Err(AnalysisError::Cancelled);
    }
    Ok(score_points(spatial.points(), stroke, guide, analyzer))
}

/// Full chunked pass over a completed stroke: bounding box and resampling
/// fold chunk by chunk with yields; classification and scoring then run on
/// the (bounded-size) resampled points.
async fn run_full(
    stroke: Arc<Stroke>,
    guide: Option<&DrawingGuide>,
    cancel: &Arc<AtomicBool>,
    preprocessor: StrokePreprocessor,
    analyzer: ShapeAnalyzer,
    chunk_size: usize,
) -> Result<AnalysisResult> {
    let bbox = chunk::chunked_bounding_rect(stroke.points(), chunk_size, cancel)
        .await?
        .ok_or(AnalysisError::EmptyStroke)?;
    if stroke.len() > 1 && bbox.is_degenerate() {
        return Err(AnalysisError::DegenerateStroke);
    }

    let resampled = chunk::chunked_resample(
        stroke.points(),
        preprocessor.target_count(),
        chunk_size,
        cancel,
    )
    .await?;
    let smoothed = preprocess::smooth(&resampled);
    if cancel.load(Ordering::SeqCst) {
        return Err(AnalysisError::Cancelled);
    }
    Ok(score_points(&smoothed, stroke, guide, analyzer))
}

/// Synchronous tail of the pipeline: classify, then score against the guide
/// shape nearest the stroke's centroid.
fn score_points(
    points: &[Point2<Real>],
    original: Arc<Stroke>,
    guide: Option<&DrawingGuide>,
    analyzer: ShapeAnalyzer,
) -> AnalysisResult {
    let analysis = analyzer.analyze(points);
    let (accuracy, shape_match, position_accuracy) = match guide {
        Some(guide) => match guide.nearest_shape(&analysis.properties.center) {
            Some(shape) => (
                scoring::score(points, shape),
                analysis.shape_type == shape.shape_type(),
                scoring::position_accuracy(points, guide),
            ),
            None => (0.0, false, 0.0),
        },
        None => (0.0, false, 0.0),
    };
    AnalysisResult {
        accuracy,
        confidence: analysis.confidence,
        shape_type: analysis.shape_type,
        shape_match,
        position_accuracy,
        stroke: original,
    }
}

/// Outcome of a pass as far as the metrics are concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PassOutcome {
    Cancelled,
    Completed,
    TimedOut,
    Degraded,
}

/// RAII bookkeeping for one pass: whatever exit path the task takes
/// (completion, cancellation checkpoint, timeout, or being dropped
/// mid-await), exactly one outcome is recorded.
struct PassGuard {
    metrics: Arc<Mutex<AnalysisMetrics>>,
    started: Instant,
    outcome: PassOutcome,
}

impl PassGuard {
    fn new(metrics: Arc<Mutex<AnalysisMetrics>>) -> Self {
        Self {
            metrics,
            started: Instant::now(),
            outcome: PassOutcome::Cancelled,
        }
    }

    fn settle(&mut self, outcome: PassOutcome) {
        self.outcome = outcome;
    }
}

impl Drop for PassGuard {
    fn drop(&mut self) {
        if let Ok(mut metrics) = self.metrics.lock() {
            match self.outcome {
                PassOutcome::Cancelled => metrics.record_cancelled(),
                PassOutcome::Completed => metrics.record_completed(self.started.elapsed()),
                PassOutcome::TimedOut => metrics.record_timed_out(),
                PassOutcome::Degraded => metrics.record_degraded(),
            }
        }
    }
}
