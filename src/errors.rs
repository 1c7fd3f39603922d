//! Analysis errors.
//!
//! Every per-stroke failure here is recovered at the scheduler boundary and
//! converted into a neutral [`AnalysisResult`](crate::analysis::AnalysisResult);
//! nothing in this enum ever reaches the drawing surface as a panic.

use thiserror::Error;

/// Result alias for stroke-analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// All the ways a single analysis pass can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The stroke contains no points.
    #[error("empty stroke")]
    EmptyStroke,

    /// The stroke's bounding box has no extent (single repeated point).
    #[error("degenerate stroke: bounding box has zero extent")]
    DegenerateStroke,

    /// The stroke exceeds the sane point cap.
    #[error("oversized stroke: {len} points exceeds cap of {max}")]
    OversizedStroke { len: usize, max: usize },

    /// The pass exceeded its wall-clock budget.
    #[error("analysis timed out")]
    Timeout,

    /// A newer pass superseded this one before it finished.
    #[error("analysis cancelled")]
    Cancelled,

    /// Analysis was skipped under severe memory pressure.
    #[error("analysis skipped under memory pressure")]
    MemoryPressure,

    /// The result channel was closed by the consumer.
    #[error("result channel closed")]
    ChannelClosed,
}

impl AnalysisError {
    /// Returns true if the scheduler can recover from this error by emitting
    /// a neutral result and carrying on with the next pass.
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, AnalysisError::ChannelClosed)
    }
}
