use alloc::collections::TryReserveError;
use alloc::vec::Vec;

use super::handle::Handle;

// Invariant: `free.capacity() >= slots.len()`, so `take()` never allocates.
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
        }
    }

    /// Returns how many elements fit without growing either vector.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity().min(self.free.capacity())
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    /// Returns true if the next `alloc()` is guaranteed not to allocate.
    fn has_vacancy(&self) -> bool {
        !self.free.is_empty() || self.slots.len() < self.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        let fresh = additional.saturating_sub(self.free.len());
        // On overflow `free.reserve` panics with "capacity overflow" before anything changes.
        self.free.reserve(self.slots.len().saturating_add(fresh) - self.free.len());
        self.slots.reserve(fresh);
    }

    /// Reserves room for `additional` more elements.
    ///
    /// `free` grows first: if growing `slots` then fails, the arena only holds some unused
    /// capacity and the invariant still holds.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let fresh = additional.saturating_sub(self.free.len());
        if fresh == 0 {
            return Ok(());
        }
        let Some(target) = self.slots.len().checked_add(fresh) else {
            // Reports `CapacityOverflow` without touching either vector.
            return self.slots.try_reserve(fresh);
        };
        self.free.try_reserve(target - self.free.len())?;
        self.slots.try_reserve(fresh)
    }

    /// Returns true if every handle is in use, so `alloc()` would panic.
    pub(crate) fn is_full(&self) -> bool {
        self.free.is_empty() && Handle::try_new(self.slots.len()).is_none()
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(handle) = self.free.pop() {
            self.slots[handle.slot()] = Some(element);
            return handle;
        }

        let Some(handle) = Handle::try_new(self.slots.len()) else {
            panic!("`Arena::alloc()` - arena is at maximum capacity ({})", Handle::SLOTS);
        };
        if !self.has_vacancy() {
            self.reserve(1);
        }
        self.slots.push(Some(element));
        handle
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.slot()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    /// Like `get()`, but returns `None` for a handle whose slot is out of range or vacant.
    #[inline]
    pub(crate) fn try_get(&self, handle: Handle) -> Option<&T> {
        self.slots.get(handle.slot()).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.slot()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.slot()].take().expect("`Arena::take()` - `handle` is invalid!");
        debug_assert!(self.free.len() < self.free.capacity());
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<T: Clone> Clone for Arena<T> {
    fn clone(&self) -> Self {
        let slots = self.slots.clone();
        let mut free = Vec::with_capacity(slots.len());
        free.extend_from_slice(&self.free);
        Self { slots, free }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn with_capacity_covers_both_vectors() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert!(arena.capacity() >= 10);
        assert!(arena.free.capacity() >= 10);
    }

    #[test]
    fn try_reserve_makes_alloc_free_of_growth() {
        let mut arena: Arena<u32> = Arena::new();
        arena.try_reserve(1).unwrap();
        let capacity = arena.capacity();
        assert!(arena.has_vacancy());
        arena.alloc(7);
        assert_eq!(arena.capacity(), capacity);
    }

    #[test]
    fn take_reuses_slot() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.alloc(1);
        let _b = arena.alloc(2);
        assert_eq!(arena.take(a), 1);
        assert!(arena.try_get(a).is_none());
        let c = arena.alloc(3);
        assert_eq!(a, c);
        assert_eq!(*arena.get(c), 3);
    }

    #[test]
    #[should_panic(expected = "`Arena::alloc()` - arena is at maximum capacity")]
    fn alloc_past_last_handle_panics() {
        let mut arena: Arena<u8> = Arena::with_capacity(Handle::SLOTS);
        for _ in 0..Handle::SLOTS {
            arena.alloc(0);
        }
        arena.alloc(0);
    }

    #[test]
    fn try_reserve_reports_overflow_untouched() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.alloc(1);
        arena.alloc(2);
        arena.take(a);
        let (slots, free) = (arena.slots.capacity(), arena.free.capacity());

        assert!(arena.try_reserve(usize::MAX).is_err());
        assert!(arena.try_reserve(usize::MAX - 1).is_err());
        assert_eq!(arena.slots.capacity(), slots);
        assert_eq!(arena.free.capacity(), free);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn reserve_overflow_panics() {
        let mut arena: Arena<u32> = Arena::new();
        arena.alloc(1);
        arena.reserve(usize::MAX);
    }

    #[test]
    fn full_arena_frees_up_on_take() {
        let mut arena: Arena<u8> = Arena::with_capacity(Handle::SLOTS);
        let first = arena.alloc(0);
        for _ in 1..Handle::SLOTS {
            assert!(!arena.is_full());
            arena.alloc(0);
        }
        assert!(arena.is_full());
        arena.take(first);
        assert!(!arena.is_full());
        assert_eq!(arena.alloc(1), first);
        assert!(arena.is_full());
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn get_after_take_panics() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.alloc(1);
        arena.take(a);
        let _ = arena.get(a);
    }

    #[test]
    fn clone_keeps_free_list_headroom() {
        let mut arena: Arena<u32> = Arena::new();
        let handles: Vec<Handle> = (0..8).map(|v| arena.alloc(v)).collect();
        arena.take(handles[3]);

        let mut copy = arena.clone();
        assert_eq!(copy.len(), 7);
        assert!(copy.free.capacity() >= copy.slots.len());
        for &h in handles.iter().filter(|&&h| h != handles[3]) {
            copy.take(h);
        }
        assert_eq!(copy.len(), 0);
    }

    #[derive(Clone, Debug)]
    enum Step {
        Alloc(u32),
        Overwrite(usize, u32),
        Take(usize),
        Reserve(usize),
        Clear,
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            8 => any::<u32>().prop_map(Step::Alloc),
            2 => (any::<usize>(), any::<u32>()).prop_map(|(pick, value)| Step::Overwrite(pick, value)),
            4 => any::<usize>().prop_map(Step::Take),
            1 => (0usize..8).prop_map(Step::Reserve),
            1 => Just(Step::Clear),
        ]
    }

    proptest! {
        // `slots` mirrors the arena slot by slot; `None` marks a vacant slot.
        #[test]
        fn arena_tracks_slot_model(steps in prop::collection::vec(step(), 0..256)) {
            let mut arena: Arena<u32> = Arena::new();
            let mut slots: Vec<Option<u32>> = Vec::new();
            let occupied = |slots: &[Option<u32>]| -> Vec<usize> {
                slots.iter().enumerate().filter_map(|(i, s)| s.map(|_| i)).collect()
            };

            for step in steps {
                match step {
                    Step::Alloc(value) => {
                        let reused = arena.free.last().copied();
                        let handle = arena.alloc(value);
                        if let Some(reused) = reused {
                            prop_assert_eq!(handle, reused);
                        } else {
                            prop_assert_eq!(handle.slot(), slots.len());
                            slots.push(None);
                        }
                        slots[handle.slot()] = Some(value);
                    }
                    Step::Overwrite(pick, value) => {
                        let live = occupied(&slots);
                        if let Some(&slot) = live.get(pick % live.len().max(1)) {
                            let handle = Handle::try_new(slot).unwrap();
                            *arena.get_mut(handle) = value;
                            slots[slot] = Some(value);
                        }
                    }
                    Step::Take(pick) => {
                        let live = occupied(&slots);
                        if let Some(&slot) = live.get(pick % live.len().max(1)) {
                            let capacity = arena.free.capacity();
                            let taken = arena.take(Handle::try_new(slot).unwrap());
                            prop_assert_eq!(Some(taken), slots[slot].take());
                            prop_assert_eq!(arena.free.capacity(), capacity);
                        }
                    }
                    Step::Reserve(additional) => {
                        arena.try_reserve(additional).unwrap();
                        prop_assert!(arena.has_vacancy() || additional == 0);
                        prop_assert!(arena.capacity() >= arena.len() + additional);
                    }
                    Step::Clear => {
                        arena.clear();
                        slots.clear();
                    }
                }

                prop_assert!(arena.free.capacity() >= arena.slots.len());
                prop_assert_eq!(arena.len(), occupied(&slots).len());
                for (slot, expected) in slots.iter().enumerate() {
                    let handle = Handle::try_new(slot).unwrap();
                    prop_assert_eq!(arena.try_get(handle), expected.as_ref());
                }
            }
        }
    }
}
