//! Device capability profile.
//!
//! Chunk sizing and throttle intervals are tuned from an explicit value
//! passed into the scheduler, never from ambient global reads inside
//! algorithmic code.

use std::time::Duration;

/// Conservative floor between incremental analyses so the interaction
/// context is never starved, even on high-refresh displays.
const THROTTLE_FLOOR: Duration = Duration::from_millis(50);

const DEFAULT_FRAME_RATE: f64 = 60.0;
/// 512 MiB: assumed budget when the host gives no better signal.
const DEFAULT_MEMORY_BUDGET: usize = 512 * 1024 * 1024;

/// Host device capabilities, sampled once (or refreshed periodically by the
/// embedder) and handed to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceProfile {
    /// Display refresh rate in Hz.
    pub frame_rate: f64,
    /// Available CPU cores.
    pub core_count: usize,
    /// Memory budget for this process, in bytes.
    pub memory_budget: usize,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            core_count: 2,
            memory_budget: DEFAULT_MEMORY_BUDGET,
        }
    }
}

impl DeviceProfile {
    /// Sample the host once: core count from the runtime, defaults for the
    /// signals std cannot portably read.
    pub fn detect() -> Self {
        let core_count = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(2);
        Self {
            core_count,
            ..Self::default()
        }
    }

    pub fn with_frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = frame_rate.max(1.0);
        self
    }

    pub fn with_core_count(mut self, core_count: usize) -> Self {
        self.core_count = core_count.max(1);
        self
    }

    pub fn with_memory_budget(mut self, memory_budget: usize) -> Self {
        self.memory_budget = memory_budget.max(1);
        self
    }

    /// Minimum spacing between incremental analysis passes: one frame
    /// interval, but never below the 50ms floor.
    pub fn throttle_interval(&self) -> Duration {
        let frame = Duration::from_secs_f64(1.0 / self.frame_rate.max(1.0));
        frame.max(THROTTLE_FLOOR)
    }

    /// Points processed between yields during full-stroke analysis. Smaller
    /// on low core-count and memory-constrained devices so no single slice
    /// of work blocks the interaction context for long.
    pub fn chunk_size(&self) -> usize {
        let base = 128 * self.core_count.max(1);
        let scaled = if self.memory_budget < 256 * 1024 * 1024 {
            base / 2
        } else {
            base
        };
        scaled.clamp(64, 2048)
    }
}
