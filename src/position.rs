use crate::raw::Handle;

/// A stable reference to one element of a [`Treap`](crate::Treap), or to its end.
///
/// A `Position` does not borrow the treap. It keeps denoting the same element across inserts
/// and erases of *other* elements, across [`swap`](crate::swap) and across moves of the
/// treap; it follows its element into whichever treap now holds it. It is invalidated only
/// when its own element is erased or the treap is cleared or dropped. Using an invalidated
/// position is a logic error: lookups through it may panic or return an unrelated element,
/// but never cause undefined behavior.
///
/// The end position sits between the last and the first element: stepping forward from the
/// last element reaches it, and stepping backward from it reaches the last element.
/// `Position::default()` is the end position.
///
/// # Examples
///
/// ```
/// use treap_set::{Position, Treap};
///
/// let mut treap = Treap::from([1, 3]);
/// let three = treap.find(&3);
/// treap.insert(2);
///
/// assert_eq!(treap[three], 3);
/// assert_eq!(treap[treap.predecessor(three)], 2);
/// assert_eq!(treap.successor(three), Position::END);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Position(Option<Handle>);

impl Position {
    /// The end position, shared by every treap.
    pub const END: Position = Position(None);

    pub(crate) const fn new(handle: Option<Handle>) -> Self {
        Position(handle)
    }

    pub(crate) const fn handle(self) -> Option<Handle> {
        self.0
    }

    /// Returns true if this is the end position.
    #[must_use]
    pub const fn is_end(self) -> bool {
        self.0.is_none()
    }
}
