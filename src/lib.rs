//! An ordered set backed by a treap, with stable positions.
//!
//! This crate provides [`Treap`], a duplicate-free ordered collection that mirrors the
//! standard library's `BTreeSet` and adds stable, non-borrowing [`Position`]s in the style of
//! C++ set iterators:
//!
//! - [`find`](Treap::find), [`lower_bound`](Treap::lower_bound) and
//!   [`upper_bound`](Treap::upper_bound) return a [`Position`]
//! - [`successor`](Treap::successor) and [`predecessor`](Treap::predecessor) step through the
//!   in-order sequence, with a single end position between the last and first element
//! - [`erase`](Treap::erase) removes the element at a position and returns the next one
//! - Positions stay valid across unrelated inserts and erases, and across [`swap`]
//!
//! # Example
//!
//! ```
//! use treap_set::Treap;
//!
//! let mut treap = Treap::new();
//! for value in [5, 3, 8, 1, 2, 6, 7, 10] {
//!     treap.insert(value);
//! }
//!
//! let forward: Vec<_> = treap.iter().copied().collect();
//! assert_eq!(forward, [1, 2, 3, 5, 6, 7, 8, 10]);
//!
//! // Erasing returns the position of the following element.
//! let next = treap.erase(treap.find(&8));
//! assert_eq!(treap[next], 10);
//!
//! // Bounds bracket the element equal to the key, if any.
//! assert_eq!(treap[treap.lower_bound(&4)], 5);
//! assert_eq!(treap[treap.upper_bound(&5)], 6);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Expected O(log n)** search, insert and erase; O(1) `len`, `swap`, `first` and `last`
//! - **Pluggable priorities** - Any [`rand::TryRngCore`] can drive the balancing
//! - **Strong failure guarantee** - A panicking comparison or clone, a failing priority
//!   source or a failed allocation leaves the treap exactly as it was
//!
//! # Implementation
//!
//! Nodes live in an index arena. Each node carries a random priority and the tree is kept a
//! max-heap on priorities, which gives an expected logarithmic height without rebalancing
//! metadata. A header record outside the arena anchors the root and caches both ends of the
//! sequence.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod error;
mod position;
mod raw;

pub mod treap;

pub use error::TreapError;
pub use position::Position;
pub use treap::{DEFAULT_SEED, Treap, swap};
