//! Cooperative chunked processing for full-stroke analysis.
//!
//! Large raw point sequences are folded chunk by chunk with a yield and a
//! cancellation check between every chunk, so the interaction context is
//! never blocked for more than one chunk's processing time and cancellation
//! takes effect at the next boundary.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use nalgebra::Point2;

use crate::errors::{AnalysisError, Result};
use crate::float_types::{EPSILON, Real};
use crate::geometry::{self, Aabb};

/// Fold `items` in chunks, yielding to the runtime and observing `cancel`
/// between chunks. Partial accumulation is carried across chunks.
pub(crate) async fn chunked_fold<T, A, F>(
    items: &[T],
    chunk_size: usize,
    cancel: &Arc<AtomicBool>,
    init: A,
    mut fold: F,
) -> Result<A>
where
    F: FnMut(A, &[T]) -> A,
{
    let mut acc = init;
    for chunk in items.chunks(chunk_size.max(1)) {
        if cancel.load(Ordering::Relaxed) {
            return Err(AnalysisError::Cancelled);
        }
        acc = fold(acc, chunk);
        tokio::task::yield_now().await;
    }
    Ok(acc)
}

/// Bounding box of a raw point sequence, accumulated chunk by chunk.
pub(crate) async fn chunked_bounding_rect(
    points: &[Point2<Real>],
    chunk_size: usize,
    cancel: &Arc<AtomicBool>,
) -> Result<Option<Aabb>> {
    chunked_fold(points, chunk_size, cancel, None, |acc: Option<Aabb>, chunk| {
        let chunk_box = geometry::bounding_rect(chunk);
        match (acc, chunk_box) {
            (Some(a), Some(b)) => Some(a.merge(&b)),
            (a, b) => a.or(b),
        }
    })
    .await
}

/// Index-spaced resampling of a raw point sequence to `target_count`,
/// producing output chunk by chunk with a cancellation check and yield
/// between chunks. Matches [`crate::preprocess::resample`] exactly.
pub(crate) async fn chunked_resample(
    points: &[Point2<Real>],
    target_count: usize,
    chunk_size: usize,
    cancel: &Arc<AtomicBool>,
) -> Result<Vec<Point2<Real>>> {
    if points.len() <= target_count || target_count < 2 {
        return Ok(points.to_vec());
    }
    let last = points.len() - 1;
    let chunk_size = chunk_size.max(1);
    let mut out = Vec::with_capacity(target_count);
    let mut index = 0usize;
    while index < target_count {
        if cancel.load(Ordering::Relaxed) {
            return Err(AnalysisError::Cancelled);
        }
        let end = (index + chunk_size).min(target_count);
        for i in index..end {
            let t = i as Real * last as Real / (target_count - 1) as Real;
            let lower = t.floor() as usize;
            let upper = lower.min(last - 1) + 1;
            let frac = t - lower as Real;
            if frac < EPSILON {
                out.push(points[lower]);
            } else {
                out.push(geometry::lerp(&points[lower], &points[upper], frac));
            }
        }
        index = end;
        tokio::task::yield_now().await;
    }
    Ok(out)
}
