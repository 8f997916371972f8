//! Bounded newest-first history of an agent's recent positions.

use std::collections::VecDeque;

/// A fixed-capacity buffer that keeps the most recent items, newest first.
///
/// Once full, every push silently drops the oldest item.
#[derive(Debug, Clone)]
pub struct TrailBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> TrailBuffer<T> {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push_front(item);
        self.items.truncate(self.capacity);
    }

    /// Items from newest to oldest.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.items.iter()
    }

    #[must_use]
    pub fn newest(&self) -> Option<&T> {
        self.items.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Clone> TrailBuffer<T> {
    /// Newest-first snapshot of the buffer.
    #[must_use]
    pub fn contents(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize) -> TrailBuffer<&'static str> {
        let mut store = TrailBuffer::new(capacity);
        store.push("foo");
        store.push("bar");
        store.push("hey");
        store
    }

    #[test]
    fn keeps_newest_first_and_evicts_oldest() {
        assert_eq!(filled(1).contents(), vec!["hey"]);
        assert_eq!(filled(2).contents(), vec!["hey", "bar"]);
        assert_eq!(filled(5).contents(), vec!["hey", "bar", "foo"]);
    }

    #[test]
    fn len_never_exceeds_capacity() {
        let mut store = TrailBuffer::new(3);
        for i in 0..10 {
            store.push(i);
            assert!(store.len() <= store.capacity());
        }
        assert_eq!(store.newest(), Some(&9));
        assert_eq!(store.iter().copied().collect::<Vec<_>>(), vec![9, 8, 7]);
    }

    #[test]
    fn zero_capacity_stays_empty() {
        let mut store = TrailBuffer::new(0);
        store.push(1);
        assert!(store.is_empty());
        assert_eq!(store.newest(), None);
    }
}
