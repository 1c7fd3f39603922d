//! Fixed-capacity ring buffer for in-progress stroke points.
//!
//! Owned exclusively by the scheduler; once full, the oldest element is
//! overwritten. This is the core's only eviction policy and it is
//! intentionally lossy: within a single stroke, superseded points are no
//! longer needed once newer ones arrive.

/// Ring buffer holding the most recent `capacity` items in insertion order.
#[derive(Clone, Debug)]
pub struct CircularBuffer<T> {
    items: Vec<T>,
    capacity: usize,
    /// Index of the oldest element once the buffer has wrapped.
    head: usize,
}

impl<T: Clone> CircularBuffer<T> {
    /// Create a buffer holding at most `capacity` items (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item, evicting the oldest when full.
    pub fn push(&mut self, item: T) {
        if self.items.len() < self.capacity {
            self.items.push(item);
        } else {
            self.items[self.head] = item;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    /// Immutable in-order snapshot (oldest first). Never longer than
    /// `capacity`; always a copy, never a view into the ring.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.items.len());
        out.extend_from_slice(&self.items[self.head..]);
        out.extend_from_slice(&self.items[..self.head]);
        out
    }

    /// Iterate oldest to newest without copying.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items[self.head..].iter().chain(self.items[..self.head].iter())
    }

    /// Change the capacity, keeping only the most recent items when
    /// shrinking. Used by memory-pressure adaptation.
    pub fn resize(&mut self, new_capacity: usize) {
        let new_capacity = new_capacity.max(1);
        if new_capacity == self.capacity {
            return;
        }
        let mut ordered = self.to_vec();
        if ordered.len() > new_capacity {
            ordered.drain(..ordered.len() - new_capacity);
        }
        self.items = ordered;
        self.capacity = new_capacity;
        self.head = 0;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.head = 0;
    }
}
