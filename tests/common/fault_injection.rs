//! Thread-local fault injection.
//!
//! Code under test calls [`fault_injection_point`] wherever a real failure could happen
//! (cloning or comparing an [`Element`](super::element::Element), drawing a priority).
//! [`faulty_run`] executes a closure over and over, failing at the first point, then the
//! second, and so on, until a run completes without reaching the armed point.

use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

/// Panic payload of an injected failure.
#[derive(Debug)]
pub struct InjectedFault;

#[derive(Debug)]
struct Context {
    fail_at: usize,
    seen: usize,
    fault_registered: bool,
}

thread_local! {
    static CONTEXT: RefCell<Option<Context>> = const { RefCell::new(None) };
    static DISABLED: Cell<bool> = const { Cell::new(false) };
}

// Injected faults are expected; keep them out of the test output.
fn install_quiet_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !info.payload().is::<InjectedFault>() {
                default(info);
            }
        }));
    });
}

/// Returns true if the caller should fail now.
pub fn should_inject_fault() -> bool {
    if DISABLED.get() {
        return false;
    }
    CONTEXT.with_borrow_mut(|context| {
        let Some(context) = context.as_mut() else {
            return false;
        };
        let hit = context.seen == context.fail_at;
        context.seen += 1;
        if hit {
            context.fault_registered = true;
        }
        hit
    })
}

/// Panics with [`InjectedFault`] if this is the armed fault point.
pub fn fault_injection_point() {
    if should_inject_fault() {
        panic::panic_any(InjectedFault);
    }
}

/// Runs `f` once per reachable fault point, failing at a different point each time.
///
/// Every injected fault must surface as an [`InjectedFault`] panic out of `f`. Any other panic
/// fails the test, and so does a run that completes although a fault was injected.
pub fn faulty_run<F: Fn()>(f: F) {
    install_quiet_hook();
    assert!(CONTEXT.with_borrow(Option::is_none), "`faulty_run` cannot be nested");

    for fail_at in 0.. {
        CONTEXT.set(Some(Context {
            fail_at,
            seen: 0,
            fault_registered: false,
        }));
        let result = panic::catch_unwind(AssertUnwindSafe(&f));
        let context = CONTEXT.take().expect("fault injection context vanished");

        match result {
            Ok(()) => {
                assert!(
                    !context.fault_registered,
                    "a fault was injected at point {fail_at} but the run completed: the failure was swallowed"
                );
                return;
            }
            Err(payload) => {
                if !payload.is::<InjectedFault>() || !context.fault_registered {
                    panic::resume_unwind(payload);
                }
            }
        }
    }
}

/// Runs `f`, turning any failure inside it into a test failure rather than an injected one.
pub fn assert_nothrow<R>(f: impl FnOnce() -> R) -> R {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            let _guard = FaultInjectionDisable::new();
            panic!("operation failed while no failure was expected");
        }
    }
}

/// Suspends fault injection on this thread until dropped.
pub struct FaultInjectionDisable {
    was_disabled: bool,
}

impl FaultInjectionDisable {
    #[must_use]
    pub fn new() -> Self {
        FaultInjectionDisable {
            was_disabled: DISABLED.replace(true),
        }
    }
}

impl Drop for FaultInjectionDisable {
    fn drop(&mut self) {
        DISABLED.set(self.was_disabled);
    }
}
