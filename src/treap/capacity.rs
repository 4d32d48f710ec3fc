use alloc::collections::TryReserveError;

use super::Treap;
use crate::raw::RawTreap;

impl<T> Treap<T> {
    /// Creates an empty treap with room for at least `capacity` elements.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let treap: Treap<i32> = Treap::with_capacity(16);
    /// assert!(treap.is_empty());
    /// assert!(treap.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut treap = Treap::new();
        treap.raw = RawTreap::with_capacity(capacity);
        treap
    }
}

impl<T, R> Treap<T, R> {
    /// Returns how many elements the treap can hold without allocating.
    ///
    /// Erased slots are reused, so this never shrinks.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Reserves room for at least `additional` more elements.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let mut treap = Treap::from([1]);
    /// treap.reserve(10);
    /// assert!(treap.capacity() >= 11);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        self.raw.reserve(additional);
    }

    /// Tries to reserve room for at least `additional` more elements.
    ///
    /// # Errors
    ///
    /// Returns an error if the capacity overflows or the allocator reports a failure. The
    /// treap is unchanged in that case.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.raw.try_reserve(additional)
    }
}
