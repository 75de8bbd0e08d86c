//! Fixed-capacity history of per-frame values.

use std::fmt;

use itertools::Itertools;

/// A ring buffer keeping the most recent `capacity` values pushed into it.
///
/// Once full, every [`History::push`] overwrites the oldest value. Values are addressed relative
/// to the most recent one: [`History::nth_latest`]`(0)` is the value pushed last.
#[derive(Clone)]
pub struct History<T> {
    buf: Vec<T>,
    capacity: usize,
    /// Index of the slot the next value will be written to (once `buf` is full).
    head: usize,
}

impl<T> History<T> {
    /// Creates an empty history holding up to `capacity` values.
    ///
    /// # Panics
    ///
    /// This method will panic if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be at least 1");
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        }
    }

    /// Appends a value, evicting the oldest one if the history is full.
    pub fn push(&mut self, value: T) {
        if self.buf.len() < self.capacity {
            self.buf.push(value);
        } else {
            self.buf[self.head] = value;
        }
        self.head = (self.head + 1) % self.capacity;
    }

    /// Returns the value pushed `n` pushes ago, or `None` if that slot was never filled (or has
    /// been overwritten).
    pub fn nth_latest(&self, n: usize) -> Option<&T> {
        self.slot(n).map(|i| &self.buf[i])
    }

    pub fn nth_latest_mut(&mut self, n: usize) -> Option<&mut T> {
        self.slot(n).map(|i| &mut self.buf[i])
    }

    /// Returns the most recently pushed value.
    #[inline]
    pub fn latest(&self) -> Option<&T> {
        self.nth_latest(0)
    }

    fn slot(&self, n: usize) -> Option<usize> {
        if n >= self.buf.len() {
            return None;
        }
        Some((self.head + self.capacity - 1 - n) % self.capacity)
    }

    /// Returns the number of values currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns whether every slot has been filled at least once.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity
    }

    /// Returns an iterator over the stored values, from oldest to most recent.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        let (newer, older) = if self.is_full() {
            self.buf.split_at(self.head)
        } else {
            self.buf.split_at(self.buf.len())
        };
        older.iter().chain(newer)
    }

    /// Returns an iterator over the `n` most recent values, most recent first.
    ///
    /// Yields fewer than `n` values if the history does not contain that many.
    pub fn latest_n(&self, n: usize) -> impl Iterator<Item = &T> + '_ {
        (0..n).map_while(move |i| self.nth_latest(i))
    }

    /// Removes every stored value.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.head = 0;
    }
}

impl<T: Copy> History<T> {
    /// Returns every pair of consecutive values, from oldest to most recent.
    ///
    /// This is meant for drawing fading trails.
    pub fn segments(&self) -> impl Iterator<Item = (T, T)> + '_ {
        self.iter().copied().tuple_windows()
    }
}

impl<T: fmt::Debug> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
