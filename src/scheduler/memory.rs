//! Memory-pressure monitoring and graceful degradation levels.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Resident-memory fraction thresholds for the pressure levels.
const WARNING_RATIO: f64 = 0.70;
const CRITICAL_RATIO: f64 = 0.85;
const SEVERE_RATIO: f64 = 0.95;

/// Graduated memory-pressure levels with graduated responses: shrink the
/// ring buffer, then trim history, then skip analysis entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MemoryPressure {
    Nominal,
    /// Ring buffer capacity is halved.
    Warning,
    /// History is trimmed to a majority fraction as well.
    Critical,
    /// Analysis is skipped; a neutral result is emitted instead.
    Severe,
}

/// Classify resident usage against a budget.
pub fn pressure_level(resident: usize, budget: usize) -> MemoryPressure {
    if budget == 0 {
        return MemoryPressure::Nominal;
    }
    let ratio = resident as f64 / budget as f64;
    if ratio >= SEVERE_RATIO {
        MemoryPressure::Severe
    } else if ratio >= CRITICAL_RATIO {
        MemoryPressure::Critical
    } else if ratio >= WARNING_RATIO {
        MemoryPressure::Warning
    } else {
        MemoryPressure::Nominal
    }
}

/// Source of the resident-memory signal. The host platform wires its own
/// reading in; tests inject synthetic readings.
pub trait MemoryMonitor: Send {
    /// Current resident memory in bytes.
    fn resident_bytes(&self) -> usize;
}

/// Monitor backed by a shared counter the embedder (or a test) updates from
/// its platform memory callback.
#[derive(Debug, Clone, Default)]
pub struct SharedMemoryMonitor {
    resident: Arc<AtomicUsize>,
}

impl SharedMemoryMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for the embedder to publish readings through.
    pub fn handle(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.resident)
    }

    pub fn set_resident(&self, bytes: usize) {
        self.resident.store(bytes, Ordering::Relaxed);
    }
}

impl MemoryMonitor for SharedMemoryMonitor {
    fn resident_bytes(&self) -> usize {
        self.resident.load(Ordering::Relaxed)
    }
}
