use core::fmt;
use core::ops::Index;

use super::Treap;
use crate::Position;
use crate::raw::RawTreap;

impl<T, R> Treap<T, R> {
    /// Returns the position following `position` in ascending order.
    ///
    /// The successor of the largest element is the end position, and the successor of the end
    /// position is the smallest element (or the end position again if the treap is empty).
    ///
    /// # Panics
    ///
    /// Panics if `position` denotes an element that was removed.
    ///
    /// # Complexity
    ///
    /// O(height) worst case, amortized O(1) over a full traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let treap = Treap::from([1, 2]);
    /// let second = treap.successor(treap.begin());
    /// assert_eq!(treap[second], 2);
    /// assert_eq!(treap.successor(second), treap.end());
    /// assert_eq!(treap.successor(treap.end()), treap.begin());
    /// ```
    #[must_use]
    pub fn successor(&self, position: Position) -> Position {
        match position.handle() {
            Some(handle) => Position::new(self.raw.successor(handle)),
            None => self.begin(),
        }
    }

    /// Returns the position preceding `position` in ascending order.
    ///
    /// The predecessor of the end position is the largest element, and the predecessor of the
    /// smallest element is the end position.
    ///
    /// # Panics
    ///
    /// Panics if `position` denotes an element that was removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let treap = Treap::from([1, 2]);
    /// let last = treap.predecessor(treap.end());
    /// assert_eq!(treap[last], 2);
    /// assert_eq!(treap.predecessor(treap.begin()), treap.end());
    /// ```
    #[must_use]
    pub fn predecessor(&self, position: Position) -> Position {
        match position.handle() {
            Some(handle) => Position::new(self.raw.predecessor(handle)),
            None => Position::new(self.raw.header().last),
        }
    }

    /// Returns the element at `position`, or `None` for the end position or a position
    /// whose element was removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let treap = Treap::from([1]);
    /// assert_eq!(treap.get_at(treap.begin()), Some(&1));
    /// assert_eq!(treap.get_at(treap.end()), None);
    /// ```
    #[must_use]
    pub fn get_at(&self, position: Position) -> Option<&T> {
        self.raw.try_value(position.handle()?)
    }

    /// Returns a cursor pointing at `position`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let treap = Treap::from([1, 2, 3]);
    /// let mut cursor = treap.cursor(treap.find(&2));
    /// cursor.move_prev();
    /// assert_eq!(cursor.get(), Some(&1));
    /// cursor.move_prev();
    /// assert!(cursor.position().is_end());
    /// cursor.move_prev();
    /// assert_eq!(cursor.get(), Some(&3));
    /// ```
    pub fn cursor(&self, position: Position) -> Cursor<'_, T> {
        Cursor {
            raw: &self.raw,
            position,
        }
    }

    /// Returns a cursor pointing at the smallest element.
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        self.cursor(self.begin())
    }

    /// Returns a cursor pointing at the largest element.
    pub fn cursor_back(&self) -> Cursor<'_, T> {
        self.cursor(self.predecessor(self.end()))
    }
}

impl<T, R> Index<Position> for Treap<T, R> {
    type Output = T;

    /// Returns a reference to the element at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end position or its element was removed.
    fn index(&self, position: Position) -> &T {
        self.get_at(position).expect("`Treap::index()` - `position` does not denote an element!")
    }
}

/// A read-only cursor over a `Treap`.
///
/// A cursor is a [`Position`] bound to the treap it walks. It moves in both directions and
/// passes through the end position between the last and the first element, like a C++
/// bidirectional iterator.
///
/// This `struct` is created by the [`cursor`](Treap::cursor),
/// [`cursor_front`](Treap::cursor_front) and [`cursor_back`](Treap::cursor_back) methods.
pub struct Cursor<'a, T> {
    raw: &'a RawTreap<T>,
    position: Position,
}

impl<'a, T> Cursor<'a, T> {
    /// Returns the element under the cursor, or `None` at the end position.
    #[must_use]
    pub fn get(&self) -> Option<&'a T> {
        self.raw.try_value(self.position.handle()?)
    }

    /// Returns the position the cursor points at.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Moves the cursor to the next element in ascending order.
    pub fn move_next(&mut self) {
        self.position = match self.position.handle() {
            Some(handle) => Position::new(self.raw.successor(handle)),
            None => Position::new(self.raw.header().first),
        };
    }

    /// Moves the cursor to the previous element in ascending order.
    pub fn move_prev(&mut self) {
        self.position = match self.position.handle() {
            Some(handle) => Position::new(self.raw.predecessor(handle)),
            None => Position::new(self.raw.header().last),
        };
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Cursor {
            raw: self.raw,
            position: self.position,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}
