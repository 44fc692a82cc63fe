use std::collections::VecDeque;

/// Bounded, ordered log that keeps only the most recent entries.
///
/// Appending past capacity silently drops the oldest entry. Iteration is
/// oldest to newest.
#[derive(Debug, Clone)]
pub struct EventLog<T> {
    capacity: usize,
    entries: VecDeque<T>,
}

impl<T> EventLog<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity.min(1024)),
        }
    }

    /// Appends `entry`, returning the entry it displaced (if any).
    pub fn push(&mut self, entry: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(entry);
        }
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}
