use super::handle::Handle;

/// Which child link of a parent a node hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A treap node: a value, its heap priority and its links.
///
/// `left`/`right` are owning in the sense that a handle appears as a child of exactly one
/// node (or of the header). `parent` is a back-reference; `None` means the node is the root
/// and its parent is the header.
#[derive(Clone)]
pub(crate) struct Node<T> {
    value: T,
    priority: u64,
    left: Option<Handle>,
    right: Option<Handle>,
    parent: Option<Handle>,
}

impl<T> Node<T> {
    /// Creates a detached leaf.
    pub(crate) const fn new(value: T, priority: u64) -> Self {
        Self {
            value,
            priority,
            left: None,
            right: None,
            parent: None,
        }
    }

    #[inline]
    pub(crate) const fn value(&self) -> &T {
        &self.value
    }

    pub(crate) fn into_value(self) -> T {
        self.value
    }

    #[inline]
    pub(crate) const fn priority(&self) -> u64 {
        self.priority
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    /// Returns true if the node has at most one child.
    pub(crate) const fn is_spliceable(&self) -> bool {
        self.left.is_none() || self.right.is_none()
    }

    /// Returns which side `child` hangs from, or `None` if it is not a child of this node.
    pub(crate) fn side_of(&self, child: Handle) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }
}
