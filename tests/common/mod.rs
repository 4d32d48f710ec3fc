//! Shared harness for the integration tests: fault injection, a liveness-tracking element
//! type, and priority sources that fail on demand.
#![allow(dead_code)]

pub mod element;
pub mod fault_injection;

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng, TryRngCore};
use treap_set::Treap;

use element::Element;
use fault_injection::{FaultInjectionDisable, fault_injection_point, should_inject_fault};

pub type Container = Treap<Element>;

/// Builds a treap from `values` with fault injection disabled.
pub fn mass_insert<R: RngCore>(treap: &mut Treap<Element, R>, values: &[i32]) {
    let _guard = FaultInjectionDisable::new();
    for &value in values {
        treap.insert(Element::new(value));
    }
}

pub fn container_from(values: &[i32]) -> Container {
    let mut treap = Container::new();
    mass_insert(&mut treap, values);
    treap
}

/// Reads the contents in ascending order with fault injection disabled.
pub fn values<R>(treap: &Treap<Element, R>) -> Vec<i32> {
    let _guard = FaultInjectionDisable::new();
    treap.iter().map(Element::value).collect()
}

/// Asserts the contents walking forward, walking backward and through positions.
pub fn expect_eq<R>(treap: &Treap<Element, R>, expected: &[i32]) {
    let _guard = FaultInjectionDisable::new();
    assert_eq!(treap.len(), expected.len());
    assert_eq!(values(treap), expected);

    let mut backward: Vec<i32> = treap.iter().rev().map(Element::value).collect();
    backward.reverse();
    assert_eq!(backward, expected);

    let mut walked = Vec::new();
    let mut position = treap.begin();
    while position != treap.end() {
        walked.push(treap[position].value());
        position = treap.successor(position);
    }
    assert_eq!(walked, expected);
}

/// Runs `op` and, if it fails, asserts that `treap` still holds exactly what it held before.
/// The failure is then propagated so [`fault_injection::faulty_run`] sees it.
pub fn strong_exception_safety<R>(treap: &mut Treap<Element, R>, op: impl FnOnce(&mut Treap<Element, R>)) {
    let before = values(treap);
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| op(&mut *treap))) {
        expect_eq(treap, &before);
        panic::resume_unwind(payload);
    }
}

/// A priority source whose every draw is a fault point.
#[derive(Clone, Debug)]
pub struct PanickingRng(SmallRng);

impl PanickingRng {
    pub fn new() -> Self {
        PanickingRng(SmallRng::seed_from_u64(treap_set::DEFAULT_SEED))
    }
}

impl RngCore for PanickingRng {
    fn next_u32(&mut self) -> u32 {
        fault_injection_point();
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        fault_injection_point();
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        fault_injection_point();
        self.0.fill_bytes(dst);
    }
}

/// The error reported by [`FailingRng`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RngFault;

impl fmt::Display for RngFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("injected priority source failure")
    }
}

impl std::error::Error for RngFault {}

/// A fallible priority source that reports an error at each armed fault point.
#[derive(Clone, Debug)]
pub struct FailingRng(SmallRng);

impl FailingRng {
    pub fn new() -> Self {
        FailingRng(SmallRng::seed_from_u64(treap_set::DEFAULT_SEED))
    }
}

impl TryRngCore for FailingRng {
    type Error = RngFault;

    fn try_next_u32(&mut self) -> Result<u32, RngFault> {
        if should_inject_fault() {
            return Err(RngFault);
        }
        Ok(self.0.next_u32())
    }

    fn try_next_u64(&mut self) -> Result<u64, RngFault> {
        if should_inject_fault() {
            return Err(RngFault);
        }
        Ok(self.0.next_u64())
    }

    fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<(), RngFault> {
        if should_inject_fault() {
            return Err(RngFault);
        }
        self.0.fill_bytes(dst);
        Ok(())
    }
}
