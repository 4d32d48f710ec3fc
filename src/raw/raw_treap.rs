use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::collections::TryReserveError;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};

/// The sentinel record of a tree.
///
/// It is not a node and holds no value. The root hangs from it, and it caches both ends of the
/// in-order sequence so that the first element and the predecessor of the end position are
/// found in O(1).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Header {
    pub(crate) root: Option<Handle>,
    pub(crate) first: Option<Handle>,
    pub(crate) last: Option<Handle>,
}

impl Header {
    const EMPTY: Self = Self {
        root: None,
        first: None,
        last: None,
    };
}

/// Where a value that is not in the tree would be linked as a new leaf.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Slot {
    parent: Option<Handle>,
    side: Side,
}

/// Result of locating a value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Located {
    /// An equal value is stored at this node.
    Found(Handle),
    /// No equal value exists; a new leaf belongs here.
    Vacant(Slot),
}

/// The treap engine backing `Treap`.
///
/// All structural change goes through [`link`](Self::link) and [`unlink`](Self::unlink).
/// Both only relink handles after their fallible steps are done.
pub(crate) struct RawTreap<T> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    header: Header,
    /// Number of linked nodes.
    len: usize,
}

impl<T> RawTreap<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            header: Header::EMPTY,
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            header: Header::EMPTY,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.nodes.try_reserve(additional)
    }

    /// Returns true if no further node can be linked until one is unlinked.
    pub(crate) fn is_full(&self) -> bool {
        self.nodes.is_full()
    }

    pub(crate) const fn header(&self) -> &Header {
        &self.header
    }

    /// Drops every node. Never allocates.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.header = Header::EMPTY;
        self.len = 0;
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    /// Returns the value at `handle`, or `None` if the slot is vacant.
    #[inline]
    pub(crate) fn try_value(&self, handle: Handle) -> Option<&T> {
        self.nodes.try_get(handle).map(Node::value)
    }

    #[inline]
    pub(crate) fn value(&self, handle: Handle) -> &T {
        self.nodes.get(handle).value()
    }

    fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.node(handle).left() {
            handle = left;
        }
        handle
    }

    fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.node(handle).right() {
            handle = right;
        }
        handle
    }

    /// Returns the in-order successor of `handle`, or `None` if it is the maximum.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Right)
    }

    /// Returns the in-order predecessor of `handle`, or `None` if it is the minimum.
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Left)
    }

    // Stepping towards `side`: descend once towards `side` and then all the way the other way,
    // or climb until we arrive from the opposite side. Running off the root means the header.
    fn step(&self, handle: Handle, side: Side) -> Option<Handle> {
        let node = self.node(handle);
        if let Some(child) = node.child(side) {
            return Some(match side {
                Side::Right => self.leftmost(child),
                Side::Left => self.rightmost(child),
            });
        }

        let mut current = handle;
        let mut parent = node.parent();
        while let Some(p) = parent {
            let parent_node = self.node(p);
            if parent_node.child(side.opposite()) == Some(current) {
                return Some(p);
            }
            current = p;
            parent = parent_node.parent();
        }
        None
    }

    /// Removes and returns the minimum value.
    pub(crate) fn pop_first(&mut self) -> Option<T> {
        let first = self.header.first?;
        Some(self.unlink(first).0)
    }

    /// Removes and returns the maximum value.
    pub(crate) fn pop_last(&mut self) -> Option<T> {
        let last = self.header.last?;
        Some(self.unlink(last).0)
    }

    /// Links `value` as a new leaf at `slot` and restores the heap order.
    ///
    /// `slot` must come from [`locate`](Self::locate) with no structural change since. Only
    /// the arena allocation can fail, and it happens before any link is touched; call
    /// [`try_reserve`](Self::try_reserve) first to make this infallible.
    pub(crate) fn link(&mut self, slot: Slot, value: T, priority: u64) -> Handle {
        let mut node = Node::new(value, priority);
        node.set_parent(slot.parent);
        let handle = self.nodes.alloc(node);

        match slot.parent {
            None => {
                debug_assert!(self.header.root.is_none());
                self.header = Header {
                    root: Some(handle),
                    first: Some(handle),
                    last: Some(handle),
                };
            }
            Some(parent) => {
                self.nodes.get_mut(parent).set_child(slot.side, Some(handle));
                // A new leaf is a new end only if it hangs off the outer side of the old end.
                match slot.side {
                    Side::Left if self.header.first == Some(parent) => self.header.first = Some(handle),
                    Side::Right if self.header.last == Some(parent) => self.header.last = Some(handle),
                    _ => {}
                }
            }
        }

        self.sift_up(handle);
        self.len += 1;
        debug_assert_eq!(self.nodes.len(), self.len);
        handle
    }

    // Rotate `handle` up past every ancestor with a lower priority. Ties stay put.
    fn sift_up(&mut self, handle: Handle) {
        while let Some(parent) = self.node(handle).parent() {
            if self.node(handle).priority() <= self.node(parent).priority() {
                break;
            }
            self.rotate_up(handle);
        }
    }

    /// Unlinks the node at `handle`, returning its value and its in-order successor.
    ///
    /// The node is rotated down until it has at most one child and then spliced out. No
    /// comparison and no allocation is performed.
    pub(crate) fn unlink(&mut self, handle: Handle) -> (T, Option<Handle>) {
        let successor = self.successor(handle);
        let predecessor = if self.header.last == Some(handle) {
            self.predecessor(handle)
        } else {
            None
        };

        loop {
            let node = self.node(handle);
            let promoted = match (node.left(), node.right()) {
                (Some(left), Some(right)) => {
                    // Ties promote the left child.
                    if self.node(right).priority() > self.node(left).priority() {
                        right
                    } else {
                        left
                    }
                }
                _ => break,
            };
            self.rotate_up(promoted);
        }

        let node = self.node(handle);
        debug_assert!(node.is_spliceable());
        let child = node.left().or(node.right());
        let parent = node.parent();
        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(parent);
        }
        self.replace_child(parent, handle, child);

        if self.header.first == Some(handle) {
            self.header.first = successor;
        }
        if self.header.last == Some(handle) {
            self.header.last = predecessor;
        }
        self.len -= 1;

        (self.nodes.take(handle).into_value(), successor)
    }

    // Swap `handle` with its parent, keeping the in-order sequence.
    fn rotate_up(&mut self, handle: Handle) {
        let parent = self.node(handle).parent().expect("`RawTreap::rotate_up()` - `handle` is the root!");
        let grandparent = self.node(parent).parent();
        let side = self
            .node(parent)
            .side_of(handle)
            .expect("`RawTreap::rotate_up()` - broken parent link!");

        let inner = self.node(handle).child(side.opposite());
        self.nodes.get_mut(parent).set_child(side, inner);
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).set_parent(Some(parent));
        }

        self.nodes.get_mut(handle).set_child(side.opposite(), Some(parent));
        self.nodes.get_mut(parent).set_parent(Some(handle));
        self.nodes.get_mut(handle).set_parent(grandparent);
        self.replace_child(grandparent, parent, Some(handle));
    }

    // Point the link that referenced `old` (in `parent`, or the header) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.header.root = new,
            Some(parent) => {
                let node = self.nodes.get_mut(parent);
                let side = node.side_of(old).expect("`RawTreap::replace_child()` - broken parent link!");
                node.set_child(side, new);
            }
        }
    }
}

impl<T> RawTreap<T> {
    /// Finds the node equal to `key`, or the slot where it would be linked.
    pub(crate) fn locate<Q>(&self, key: &Q) -> Located
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(mut current) = self.header.root else {
            return Located::Vacant(Slot {
                parent: None,
                side: Side::Left,
            });
        };

        loop {
            let node = self.node(current);
            let side = match key.cmp(node.value().borrow()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Located::Found(current),
            };
            match node.child(side) {
                Some(child) => current = child,
                None => {
                    return Located::Vacant(Slot {
                        parent: Some(current),
                        side,
                    });
                }
            }
        }
    }

    pub(crate) fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.locate(key) {
            Located::Found(handle) => Some(handle),
            Located::Vacant(_) => None,
        }
    }

    /// Returns the first node not less than `key`.
    pub(crate) fn lower_bound<Q>(&self, key: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.bound(|value| {
            let value: &Q = value.borrow();
            value < key
        })
    }

    /// Returns the first node greater than `key`.
    pub(crate) fn upper_bound<Q>(&self, key: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.bound(|value| {
            let value: &Q = value.borrow();
            value <= key
        })
    }

    // First node for which `goes_right` is false; `goes_right` must be monotone in order.
    fn bound(&self, mut goes_right: impl FnMut(&T) -> bool) -> Option<Handle> {
        let mut candidate = None;
        let mut current = self.header.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            if goes_right(node.value()) {
                current = node.right();
            } else {
                candidate = Some(handle);
                current = node.left();
            }
        }
        candidate
    }
}

impl<T: Clone> Clone for RawTreap<T> {
    // Copies the arena slot for slot, so the copy has the same shape and priorities.
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            header: self.header,
            len: self.len,
        }
    }
}

#[cfg(test)]
impl<T: Ord + core::fmt::Debug> RawTreap<T> {
    /// Checks every structural invariant and returns the height of the tree.
    pub(crate) fn validate(&self) -> usize {
        let mut count = 0;
        let height = self.validate_subtree(self.header.root, None, &mut count);
        assert_eq!(count, self.len, "node count does not match `len`");
        assert_eq!(self.nodes.len(), self.len, "arena holds unlinked nodes");
        assert_eq!(self.header.first, self.header.root.map(|r| self.leftmost(r)), "stale `first`");
        assert_eq!(self.header.last, self.header.root.map(|r| self.rightmost(r)), "stale `last`");

        let mut previous: Option<&T> = None;
        let mut current = self.header.first;
        while let Some(handle) = current {
            let value = self.value(handle);
            if let Some(previous) = previous {
                assert!(previous < value, "in-order walk is not strictly ascending");
            }
            previous = Some(value);
            current = self.successor(handle);
        }
        height
    }

    fn validate_subtree(&self, handle: Option<Handle>, parent: Option<Handle>, count: &mut usize) -> usize {
        let Some(handle) = handle else {
            return 0;
        };
        *count += 1;
        let node = self.node(handle);
        assert_eq!(node.parent(), parent, "broken parent link at {:?}", node.value());
        for child in [node.left(), node.right()].into_iter().flatten() {
            assert!(
                self.node(child).priority() <= node.priority(),
                "heap order violated below {:?}",
                node.value()
            );
        }
        if let Some(left) = node.left() {
            assert!(self.node(left).value() < node.value());
        }
        if let Some(right) = node.right() {
            assert!(self.node(right).value() > node.value());
        }
        let left = self.validate_subtree(node.left(), Some(handle), count);
        let right = self.validate_subtree(node.right(), Some(handle), count);
        1 + left.max(right)
    }
}
