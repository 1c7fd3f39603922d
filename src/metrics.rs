//! Timing and outcome metrics for analysis passes.
//!
//! Exposed for diagnostics; the feedback layer reads average analysis time
//! and success rate, nothing here feeds back into scoring.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Counters and timing for analysis passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisMetrics {
    /// Passes that completed and delivered a scored result.
    pub completed: u64,
    /// Passes cancelled by a newer submission.
    pub cancelled: u64,
    /// Passes that hit the wall-clock budget.
    pub timed_out: u64,
    /// Passes degraded to a neutral result (memory pressure, bad input).
    pub degraded: u64,
    /// Total time spent in completed passes.
    pub total_analysis_time: Duration,
    /// Duration of the most recent completed pass.
    pub last_analysis_time: Option<Duration>,
}

impl AnalysisMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_completed(&mut self, elapsed: Duration) {
        self.completed += 1;
        self.total_analysis_time += elapsed;
        self.last_analysis_time = Some(elapsed);
    }

    pub fn record_cancelled(&mut self) {
        self.cancelled += 1;
    }

    pub fn record_timed_out(&mut self) {
        self.timed_out += 1;
    }

    pub fn record_degraded(&mut self) {
        self.degraded += 1;
    }

    /// Mean duration of completed passes, `None` before the first one.
    pub fn average_analysis_time(&self) -> Option<Duration> {
        if self.completed == 0 {
            None
        } else {
            Some(self.total_analysis_time / self.completed as u32)
        }
    }

    /// Completed passes over all passes that ran to a verdict (cancellations
    /// are normal flow and excluded). 1.0 before any pass has run.
    pub fn success_rate(&self) -> f64 {
        let attempts = self.completed + self.timed_out + self.degraded;
        if attempts == 0 {
            1.0
        } else {
            self.completed as f64 / attempts as f64
        }
    }
}
