use alloc::collections::TryReserveError;

use thiserror::Error;

/// The reasons a [`Treap::try_insert`](crate::Treap::try_insert) can fail.
///
/// In every case the treap is left exactly as it was before the call.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TreapError<E> {
    /// Memory for the new node could not be reserved.
    #[error("failed to allocate a tree node")]
    Alloc(#[from] TryReserveError),
    /// The treap already holds the largest number of elements it can address.
    #[error("treap is full ({0} elements)")]
    Full(usize),
    /// The priority source failed to produce a priority.
    #[error("priority source failed: {0}")]
    Priority(E),
}
