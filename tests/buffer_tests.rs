//! Ring-buffer behavior through the public API: ordering, eviction,
//! resizing, and snapshot independence.

use sketchscore::CircularBuffer;

#[test]
fn snapshot_preserves_insertion_order() {
    let mut buf = CircularBuffer::new(8);
    for i in 0..5 {
        buf.push(i);
    }
    assert_eq!(buf.to_vec(), vec![0, 1, 2, 3, 4]);
    assert_eq!(buf.len(), 5);
    assert!(!buf.is_empty());
}

#[test]
fn eviction_drops_oldest_first() {
    let mut buf = CircularBuffer::new(4);
    for i in 0..10 {
        buf.push(i);
    }
    assert_eq!(buf.to_vec(), vec![6, 7, 8, 9]);
    assert_eq!(buf.len(), buf.capacity());
}

#[test]
fn snapshot_is_a_copy() {
    let mut buf = CircularBuffer::new(4);
    buf.push(1);
    let snapshot = buf.to_vec();
    buf.push(2);
    assert_eq!(snapshot, vec![1]);
    assert_eq!(buf.to_vec(), vec![1, 2]);
}

#[test]
fn iter_matches_snapshot_after_wrap() {
    let mut buf = CircularBuffer::new(3);
    for i in 0..7 {
        buf.push(i);
    }
    let iterated: Vec<i32> = buf.iter().copied().collect();
    assert_eq!(iterated, buf.to_vec());
    assert_eq!(iterated, vec![4, 5, 6]);
}

#[test]
fn grow_keeps_contents_and_new_headroom() {
    let mut buf = CircularBuffer::new(2);
    buf.push(1);
    buf.push(2);
    buf.push(3);
    buf.resize(4);
    assert_eq!(buf.to_vec(), vec![2, 3]);
    buf.push(4);
    buf.push(5);
    assert_eq!(buf.to_vec(), vec![2, 3, 4, 5]);
}

#[test]
fn shrink_keeps_most_recent() {
    let mut buf = CircularBuffer::new(6);
    for i in 0..6 {
        buf.push(i);
    }
    buf.resize(3);
    assert_eq!(buf.capacity(), 3);
    assert_eq!(buf.to_vec(), vec![3, 4, 5]);
}

#[test]
fn clear_empties_without_changing_capacity() {
    let mut buf = CircularBuffer::new(3);
    for i in 0..5 {
        buf.push(i);
    }
    buf.clear();
    assert!(buf.is_empty());
    assert_eq!(buf.capacity(), 3);
    buf.push(42);
    assert_eq!(buf.to_vec(), vec![42]);
}

#[test]
fn zero_capacity_is_clamped_to_one() {
    let mut buf = CircularBuffer::new(0);
    assert_eq!(buf.capacity(), 1);
    buf.push(1);
    buf.push(2);
    assert_eq!(buf.to_vec(), vec![2]);
}
