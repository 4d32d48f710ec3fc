use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng, TryRngCore};

use crate::raw::{Handle, Located, RawTreap};
use crate::{Position, TreapError};

mod capacity;
mod positional;

pub use positional::Cursor;

/// The seed of the priority source used by [`Treap::new`].
pub const DEFAULT_SEED: u64 = 5489;

/// An ordered set based on a treap.
///
/// A treap is a binary search tree in which every node also carries a random priority, and
/// the tree is kept heap-ordered on those priorities. With priorities drawn uniformly at random
/// the tree has expected logarithmic height no matter in which order values arrive, without
/// any rebalancing metadata. The guarantees are expectations: an adversary who knows the
/// priority source can force linear height.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering
/// relative to any other item, as determined by the [`Ord`] trait, changes while it is in the
/// set. This is normally only possible through [`Cell`], [`RefCell`], global state, I/O, or
/// unsafe code. The behavior resulting from such a logic error is not specified, but will be
/// encapsulated to the `Treap` that observed the logic error and not result in undefined
/// behavior.
///
/// Besides the usual borrowing iterators, every element has a [`Position`]: a `Copy` handle
/// that survives inserts and erases of other elements as well as [`swap`]. Positions are what
/// [`find`](Treap::find), [`lower_bound`](Treap::lower_bound),
/// [`upper_bound`](Treap::upper_bound) and [`insert`](Treap::insert) return.
///
/// # Priority source
///
/// The second type parameter is the source of node priorities. By default it is a
/// [`SmallRng`] seeded with [`DEFAULT_SEED`], so a default-constructed treap is
/// deterministic. Any [`RngCore`] can be used with [`insert`](Treap::insert); a fallible
/// [`TryRngCore`] can be used with [`try_insert`](Treap::try_insert).
///
/// # Failure guarantees
///
/// Comparisons and clones happen before any link is changed, so a panic in [`Ord::cmp`] or
/// [`Clone::clone`] leaves the treap exactly as it was. The same holds when the priority
/// source or the allocation fails in [`try_insert`](Treap::try_insert). Erasing, clearing,
/// swapping and dropping never compare, never allocate and never fail.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use treap_set::Treap;
///
/// let mut deadlines = Treap::new();
/// for minute in [45, 5, 30, 5, 90] {
///     deadlines.insert(minute);
/// }
/// assert_eq!(deadlines.len(), 4);
///
/// // The next deadline at or after minute 20, and the one after it.
/// let next = deadlines.lower_bound(&20);
/// assert_eq!(deadlines[next], 30);
/// assert_eq!(deadlines[deadlines.successor(next)], 45);
///
/// // Positions stay put while other elements come and go.
/// deadlines.remove(&5);
/// deadlines.insert(40);
/// assert_eq!(deadlines[next], 30);
/// assert_eq!(deadlines[deadlines.successor(next)], 40);
/// ```
pub struct Treap<T, R = SmallRng> {
    raw: RawTreap<T>,
    rng: R,
}

/// An iterator over the items of a `Treap`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`Treap`]. Reverse iteration is
/// `iter().rev()`.
///
/// # Examples
///
/// ```
/// use treap_set::Treap;
///
/// let treap = Treap::from([3, 1, 2]);
/// let mut iter = treap.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: Treap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    raw: Option<&'a RawTreap<T>>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the items of a `Treap` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`Treap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: Treap#method.into_iter
pub struct IntoIter<T> {
    raw: RawTreap<T>,
}

impl<T> Treap<T> {
    /// Makes a new, empty `Treap` whose priorities come from a [`SmallRng`] seeded with
    /// [`DEFAULT_SEED`].
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let mut treap: Treap<i32> = Treap::new();
    /// assert!(treap.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Treap<T> {
        Treap::with_seed(DEFAULT_SEED)
    }

    /// Makes a new, empty `Treap` whose priorities come from a [`SmallRng`] seeded with `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Treap<T> {
        Treap::with_priority_source(SmallRng::seed_from_u64(seed))
    }
}

impl<T, R> Treap<T, R> {
    /// Makes a new, empty `Treap` drawing node priorities from `rng`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use rand::rngs::SmallRng;
    /// use treap_set::Treap;
    ///
    /// let mut treap = Treap::with_priority_source(SmallRng::seed_from_u64(42));
    /// treap.insert(1);
    /// assert_eq!(treap.len(), 1);
    /// ```
    #[must_use]
    pub const fn with_priority_source(rng: R) -> Treap<T, R> {
        Treap {
            raw: RawTreap::new(),
            rng,
        }
    }

    /// Returns the priority source.
    pub const fn priority_source(&self) -> &R {
        &self.rng
    }

    /// Clears the treap, removing all elements.
    ///
    /// Never fails. Positions of removed elements are invalidated; the end position is not.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let mut treap = Treap::from([1, 2, 3]);
    /// treap.clear();
    /// assert!(treap.is_empty());
    /// assert_eq!(treap.begin(), treap.end());
    /// ```
    pub fn clear(&mut self) {
        log::trace!("clearing treap of {} elements", self.raw.len());
        self.raw.clear();
    }

    /// Returns the number of elements in the treap.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the treap contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the position of the smallest element, or the end position if the treap is
    /// empty.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn begin(&self) -> Position {
        Position::new(self.raw.header().first)
    }

    /// Returns the end position.
    #[must_use]
    pub const fn end(&self) -> Position {
        Position::END
    }

    /// Returns a reference to the smallest element, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let mut treap = Treap::new();
    /// assert_eq!(treap.first(), None);
    /// treap.insert(1);
    /// treap.insert(0);
    /// assert_eq!(treap.first(), Some(&0));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.header().first.map(|h| self.raw.value(h))
    }

    /// Returns a reference to the largest element, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.header().last.map(|h| self.raw.value(h))
    }

    /// Removes the smallest element and returns it, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let mut treap = Treap::from([2, 1]);
    /// assert_eq!(treap.pop_first(), Some(1));
    /// assert_eq!(treap.pop_first(), Some(2));
    /// assert_eq!(treap.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        self.raw.pop_first()
    }

    /// Removes the largest element and returns it, if any.
    pub fn pop_last(&mut self) -> Option<T> {
        self.raw.pop_last()
    }

    /// Removes the element at `position` and returns the position of the element that
    /// followed it, or the end position if it was the largest.
    ///
    /// Never fails and never compares: the node is rotated down to a leaf and spliced out.
    /// Other positions stay valid.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end position or the element it denoted was already
    /// removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let mut treap = Treap::from([1, 2, 3]);
    /// let next = treap.erase(treap.find(&2));
    /// assert_eq!(treap[next], 3);
    /// assert!(treap.erase(next).is_end());
    /// assert_eq!(treap.len(), 1);
    /// ```
    pub fn erase(&mut self, position: Position) -> Position {
        let handle = position
            .handle()
            .expect("`Treap::erase()` - cannot erase the end position!");
        let (_, successor) = self.raw.unlink(handle);
        Position::new(successor)
    }

    /// Retains only the elements specified by the predicate, visiting them in ascending
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let mut treap: Treap<i32> = (0..8).collect();
    /// treap.retain(|&k| k % 2 == 0);
    /// assert!(treap.iter().eq([0, 2, 4, 6].iter()));
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut current = self.raw.header().first;
        while let Some(handle) = current {
            current = if f(self.raw.value(handle)) {
                self.raw.successor(handle)
            } else {
                self.raw.unlink(handle).1
            };
        }
    }

    /// Swaps the contents and priority sources of two treaps in O(1).
    ///
    /// Positions on both sides stay valid and follow their elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let mut a = Treap::from([1, 2]);
    /// let mut b = Treap::from([3]);
    /// let one = a.find(&1);
    ///
    /// a.swap(&mut b);
    /// assert_eq!(b[one], 1);
    /// assert!(a.iter().eq([3].iter()));
    /// ```
    pub fn swap(&mut self, other: &mut Treap<T, R>) {
        core::mem::swap(self, other);
    }

    /// Moves every element into a new treap, leaving `self` empty.
    ///
    /// The returned treap takes over the priority source; `self` keeps a copy of it.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let mut a = Treap::from([1, 2]);
    /// let two = a.find(&2);
    /// let b = a.take_all();
    /// assert!(a.is_empty());
    /// assert_eq!(b[two], 2);
    /// ```
    #[must_use = "the removed elements are dropped with the returned treap"]
    pub fn take_all(&mut self) -> Treap<T, R>
    where
        R: Clone,
    {
        let rng = self.rng.clone();
        core::mem::replace(self, Treap::with_priority_source(rng))
    }

    /// Gets an iterator that visits the elements in the `Treap` in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let treap = Treap::from([3, 1, 2]);
    /// let backward: Vec<_> = treap.iter().rev().copied().collect();
    /// assert_eq!(backward, [3, 2, 1]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) to create the iterator; amortized O(1) per step.
    pub fn iter(&self) -> Iter<'_, T> {
        let header = self.raw.header();
        Iter {
            raw: Some(&self.raw),
            front: header.first,
            back: header.last,
            remaining: self.raw.len(),
        }
    }
}

impl<T, R> Treap<T, R> {
    /// Returns the position of the element equal to `value`, or the end position.
    ///
    /// The value may be any borrowed form of the set's value type, but the ordering on the
    /// borrowed form *must* match the ordering on the value type.
    ///
    /// # Complexity
    ///
    /// Expected O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let treap = Treap::from([1, 2, 3]);
    /// assert_eq!(treap[treap.find(&2)], 2);
    /// assert_eq!(treap.find(&4), treap.end());
    /// ```
    pub fn find<Q>(&self, value: &Q) -> Position
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Position::new(self.raw.find(value))
    }

    /// Returns the position of the first element not less than `value`, or the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let treap = Treap::from([10, 20, 30]);
    /// assert_eq!(treap[treap.lower_bound(&15)], 20);
    /// assert_eq!(treap[treap.lower_bound(&20)], 20);
    /// assert!(treap.lower_bound(&31).is_end());
    /// ```
    pub fn lower_bound<Q>(&self, value: &Q) -> Position
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Position::new(self.raw.lower_bound(value))
    }

    /// Returns the position of the first element greater than `value`, or the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let treap = Treap::from([10, 20, 30]);
    /// assert_eq!(treap[treap.upper_bound(&15)], 20);
    /// assert_eq!(treap[treap.upper_bound(&20)], 30);
    /// assert!(treap.upper_bound(&30).is_end());
    /// ```
    pub fn upper_bound<Q>(&self, value: &Q) -> Position
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Position::new(self.raw.upper_bound(value))
    }

    /// Returns `true` if the treap contains an element equal to the value.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(value).is_some()
    }

    /// Returns a reference to the element in the treap, if any, that is equal to the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let treap = Treap::from([1, 2, 3]);
    /// assert_eq!(treap.get(&2), Some(&2));
    /// assert_eq!(treap.get(&4), None);
    /// ```
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(value).map(|h| self.raw.value(h))
    }

    /// Removes the element equal to `value` and returns how many elements were removed
    /// (0 or 1).
    ///
    /// If the comparison panics the treap is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let mut treap = Treap::from([1, 2, 3]);
    /// assert_eq!(treap.erase_value(&2), 1);
    /// assert_eq!(treap.erase_value(&2), 0);
    /// ```
    pub fn erase_value<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        usize::from(self.take(value).is_some())
    }

    /// If the treap contains an element equal to the value, removes it and returns `true`.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.take(value).is_some()
    }

    /// Removes and returns the element in the treap, if any, that is equal to the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let mut treap = Treap::from([1, 2, 3]);
    /// assert_eq!(treap.take(&2), Some(2));
    /// assert_eq!(treap.take(&2), None);
    /// ```
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.find(value)?;
        Some(self.raw.unlink(handle).0)
    }
}

impl<T: Ord, R: TryRngCore> Treap<T, R> {
    /// Inserts `value` unless an equal element is present, reporting allocation and
    /// priority-source failures instead of aborting.
    ///
    /// Returns the position of the element equal to `value` and whether it was inserted. On
    /// error, `value` is dropped and the treap is unchanged.
    ///
    /// # Errors
    ///
    /// - [`TreapError::Full`] if the treap already holds `u32::MAX` elements
    /// - [`TreapError::Priority`] if the priority source fails
    /// - [`TreapError::Alloc`] if memory for the node cannot be reserved
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let mut treap = Treap::new();
    /// let (position, inserted) = treap.try_insert(7).unwrap();
    /// assert!(inserted);
    /// assert_eq!(treap[position], 7);
    /// assert_eq!(treap.try_insert(7).unwrap(), (position, false));
    /// ```
    pub fn try_insert(&mut self, value: T) -> Result<(Position, bool), TreapError<R::Error>> {
        let slot = match self.raw.locate(&value) {
            Located::Found(handle) => return Ok((Position::new(Some(handle)), false)),
            Located::Vacant(slot) => slot,
        };

        if self.raw.is_full() {
            log::trace!("treap is full at {} elements, insert rejected", self.raw.len());
            return Err(TreapError::Full(self.raw.len()));
        }
        let priority = self.rng.try_next_u64().map_err(|error| {
            log::trace!("priority source failed, treap left unchanged: {error}");
            TreapError::Priority(error)
        })?;
        self.raw.try_reserve(1).inspect_err(|error| {
            log::trace!("node allocation failed, treap left unchanged: {error}");
        })?;

        let handle = self.raw.link(slot, value, priority);
        Ok((Position::new(Some(handle)), true))
    }
}

impl<T: Ord, R: RngCore> Treap<T, R> {
    /// Adds a value to the treap unless an equal element is present.
    ///
    /// Returns the position of the element equal to `value` and whether `value` was
    /// inserted. If an equal element exists the treap is not modified and `value` is dropped.
    ///
    /// # Panics
    ///
    /// Panics if the treap already holds `u32::MAX` elements; use
    /// [`try_insert`](Treap::try_insert) to get an error instead.
    ///
    /// # Complexity
    ///
    /// Expected O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let mut treap = Treap::new();
    /// let (two, inserted) = treap.insert(2);
    /// assert!(inserted);
    /// assert_eq!(treap.insert(2), (two, false));
    /// assert_eq!(treap.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> (Position, bool) {
        match self.raw.locate(&value) {
            Located::Found(handle) => (Position::new(Some(handle)), false),
            Located::Vacant(slot) => {
                let priority = self.rng.next_u64();
                (Position::new(Some(self.raw.link(slot, value, priority))), true)
            }
        }
    }

    /// Adds a clone of `value` unless an equal element is present.
    ///
    /// `value` is cloned only when it is actually inserted. If the clone panics, the treap is
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let mut treap = Treap::new();
    /// let name = String::from("treap");
    /// treap.insert_cloned(&name);
    /// assert!(treap.contains("treap"));
    /// ```
    pub fn insert_cloned(&mut self, value: &T) -> (Position, bool)
    where
        T: Clone,
    {
        match self.raw.locate(value) {
            Located::Found(handle) => (Position::new(Some(handle)), false),
            Located::Vacant(slot) => {
                let priority = self.rng.next_u64();
                self.raw.reserve(1);
                let value = value.clone();
                (Position::new(Some(self.raw.link(slot, value, priority))), true)
            }
        }
    }
}

/// Swaps the contents of two treaps in O(1). See [`Treap::swap`].
pub fn swap<T, R>(a: &mut Treap<T, R>, b: &mut Treap<T, R>) {
    a.swap(b);
}

impl<T: Clone, R: Clone> Clone for Treap<T, R> {
    /// Copies the tree node for node, keeping its shape and priorities.
    ///
    /// If a clone panics, the partial copy is dropped and the source is untouched.
    fn clone(&self) -> Self {
        Treap {
            raw: self.raw.clone(),
            rng: self.rng.clone(),
        }
    }

    /// Builds the copy first and only then replaces `self`, so a panicking clone leaves
    /// `self` unchanged.
    fn clone_from(&mut self, source: &Self) {
        let replacement = source.clone();
        *self = replacement;
    }
}

impl<T: Hash, R> Hash for Treap<T, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T: PartialEq, R> PartialEq for Treap<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, R> Eq for Treap<T, R> {}

impl<T: PartialOrd, R> PartialOrd for Treap<T, R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, R> Ord for Treap<T, R> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: fmt::Debug, R> fmt::Debug for Treap<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for Treap<T> {
    fn default() -> Self {
        Treap::new()
    }
}

impl<T: Ord> FromIterator<T> for Treap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut treap = Treap::new();
        treap.extend(iter);
        treap
    }
}

impl<T: Ord, R: RngCore> Extend<T> for Treap<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.insert(elem);
        }
    }
}

impl<'a, T: 'a + Ord + Copy, R: RngCore> Extend<&'a T> for Treap<T, R> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for Treap<T> {
    /// Converts a `[T; N]` into a `Treap<T>`.
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let treap1 = Treap::from([1, 2, 3, 4]);
    /// let treap2: Treap<_> = [1, 2, 3, 4].into();
    /// assert_eq!(treap1, treap2);
    /// ```
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T, R> IntoIterator for Treap<T, R> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `Treap`'s contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::Treap;
    ///
    /// let treap = Treap::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = treap.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { raw: self.raw }
    }
}

impl<'a, T, R> IntoIterator for &'a Treap<T, R> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let raw = self.raw?;
        let handle = self.front?;
        self.remaining -= 1;
        self.front = raw.successor(handle);
        Some(raw.value(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }

    fn min(mut self) -> Option<&'a T>
    where
        &'a T: Ord,
    {
        self.next()
    }

    fn max(mut self) -> Option<&'a T>
    where
        &'a T: Ord,
    {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let raw = self.raw?;
        let handle = self.back?;
        self.remaining -= 1;
        self.back = raw.predecessor(handle);
        Some(raw.value(handle))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Default for Iter<'_, T> {
    /// Creates an empty `treap::Iter`.
    ///
    /// ```
    /// # use treap_set::treap;
    /// let iter: treap::Iter<'_, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            raw: None,
            front: None,
            back: None,
            remaining: 0,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.raw.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.raw.len(), Some(self.raw.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.raw.pop_last()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.raw.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("remaining", &self.raw.len()).finish()
    }
}

impl<T> Default for IntoIter<T> {
    /// Creates an empty `treap::IntoIter`.
    ///
    /// ```
    /// # use treap_set::treap;
    /// let iter: treap::IntoIter<u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter { raw: RawTreap::new() }
    }
}
