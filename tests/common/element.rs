//! A value type that tracks its own liveness.
//!
//! Every `Element` is registered in a thread-local set while alive. Using an element after it
//! was dropped, or dropping it twice, panics; [`NoNewInstancesGuard`] catches leaks. Creating,
//! cloning and comparing elements are fault points.

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use super::fault_injection::fault_injection_point;

thread_local! {
    static INSTANCES: RefCell<HashSet<u64>> = RefCell::new(HashSet::new());
    static NEXT_ID: Cell<u64> = const { Cell::new(0) };
}

pub struct Element {
    data: i32,
    id: u64,
}

impl Element {
    pub fn new(data: i32) -> Element {
        fault_injection_point();
        Element::register(data)
    }

    fn register(data: i32) -> Element {
        let id = NEXT_ID.get();
        NEXT_ID.set(id + 1);
        INSTANCES.with_borrow_mut(|instances| instances.insert(id));
        Element { data, id }
    }

    fn assert_exists(&self) {
        assert!(
            INSTANCES.with_borrow(|instances| instances.contains(&self.id)),
            "element {} used after it was dropped",
            self.data
        );
    }

    /// Reads the payload; a fault point like every other access.
    pub fn value(&self) -> i32 {
        self.assert_exists();
        fault_injection_point();
        self.data
    }

    pub fn live_instances() -> usize {
        INSTANCES.with_borrow(HashSet::len)
    }
}

impl From<i32> for Element {
    fn from(data: i32) -> Element {
        Element::new(data)
    }
}

impl Clone for Element {
    fn clone(&self) -> Element {
        self.assert_exists();
        fault_injection_point();
        Element::register(self.data)
    }
}

impl Drop for Element {
    fn drop(&mut self) {
        let removed = INSTANCES
            .try_with(|instances| instances.borrow_mut().remove(&self.id))
            .unwrap_or(true);
        if !removed && !std::thread::panicking() {
            panic!("element {} dropped twice", self.data);
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Element) -> bool {
        self.assert_exists();
        other.assert_exists();
        fault_injection_point();
        self.data == other.data
    }
}

impl Eq for Element {}

impl PartialEq<i32> for Element {
    fn eq(&self, other: &i32) -> bool {
        self.value() == *other
    }
}

impl PartialOrd for Element {
    fn partial_cmp(&self, other: &Element) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Element {
    fn cmp(&self, other: &Element) -> Ordering {
        self.assert_exists();
        other.assert_exists();
        fault_injection_point();
        self.data.cmp(&other.data)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

/// Asserts on drop that every element created during its lifetime was dropped again.
pub struct NoNewInstancesGuard {
    live_before: usize,
}

impl NoNewInstancesGuard {
    #[must_use]
    pub fn new() -> Self {
        NoNewInstancesGuard {
            live_before: Element::live_instances(),
        }
    }

    pub fn expect_no_instances(&self) {
        assert_eq!(Element::live_instances(), self.live_before, "elements were leaked");
    }
}

impl Drop for NoNewInstancesGuard {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            self.expect_no_instances();
        }
    }
}
