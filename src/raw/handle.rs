use core::num::NonZero;

// Narrow in unit tests so the slot limit is reachable.
#[cfg(test)]
type Repr = u16;
#[cfg(not(test))]
type Repr = u32;

/// Names one slot of an [`Arena`](super::arena::Arena).
///
/// The slot number is stored plus one, so `Option<Handle>` (every tree link) is no larger
/// than the handle itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<Repr>);

impl Handle {
    /// Number of addressable slots.
    pub(crate) const SLOTS: usize = Repr::MAX as usize;

    /// Returns the handle of `slot`, or `None` past the last addressable slot.
    #[inline]
    pub(crate) const fn try_new(slot: usize) -> Option<Self> {
        if slot >= Self::SLOTS {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        match NonZero::new(slot as Repr + 1) {
            Some(repr) => Some(Self(repr)),
            None => None,
        }
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
