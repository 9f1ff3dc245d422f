//! Immutable ordered sequence with structural sharing
//!
//! `PersistentSequence` wraps an `rpds::Vector` backed by `ArcK` pointers so
//! that appending produces a new sequence which shares every untouched chunk
//! with the original. Cloning is O(1), indexed reads are O(log n).
//!
//! The info tree stores each node's children in one of these, and local
//! contexts use it to extend the set of local declarations without copying.

use std::fmt;

use archery::ArcK;
use rpds::Vector;

/// Append-optimized, read-mostly sequence shared between tree snapshots.
pub struct PersistentSequence<T> {
    inner: Vector<T, ArcK>,
}

impl<T> PersistentSequence<T> {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self {
            inner: Vector::new_with_ptr_kind(),
        }
    }

    /// Returns a new sequence with `value` appended. `self` is left untouched.
    #[must_use]
    pub fn push_back(&self, value: T) -> Self {
        Self {
            inner: self.inner.push_back(value),
        }
    }

    /// Append in place. Chunks still shared with other sequences are copied
    /// on write, so clones taken earlier never observe the new element.
    pub fn push_back_mut(&mut self, value: T) {
        self.inner.push_back_mut(value);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.inner.get(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.inner.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.inner.last()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> rpds::vector::Iter<'_, T, ArcK> {
        self.inner.iter()
    }

    /// Left fold in insertion order
    pub fn fold<B, F>(&self, init: B, f: F) -> B
    where
        F: FnMut(B, &T) -> B,
    {
        self.inner.iter().fold(init, f)
    }

    /// Build a new sequence by applying `f` to every element in order
    pub fn map<U, F>(&self, mut f: F) -> PersistentSequence<U>
    where
        F: FnMut(&T) -> U,
    {
        let mut out = PersistentSequence::new();
        for item in self.inner.iter() {
            out.push_back_mut(f(item));
        }
        out
    }
}

impl<T> Default for PersistentSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual impl: cloning shares the backing chunks and never requires `T: Clone`.
impl<T> Clone for PersistentSequence<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for PersistentSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: Eq> Eq for PersistentSequence<T> {}

impl<T> FromIterator<T> for PersistentSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Self::new();
        for item in iter {
            out.push_back_mut(item);
        }
        out
    }
}

impl<T> From<Vec<T>> for PersistentSequence<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a PersistentSequence<T> {
    type Item = &'a T;
    type IntoIter = rpds::vector::Iter<'a, T, ArcK>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
