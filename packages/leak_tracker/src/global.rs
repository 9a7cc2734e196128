//! The process-wide registry used by the tracking entry points.

use std::mem;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::{LeakReport, Registry, RegistryBuilder};

enum GlobalState {
    // Nothing has been tracked yet. The registry is created on first use, with the
    // configured builder if there is one.
    Pending(Option<RegistryBuilder>),
    Live(Registry),
    ShutDown,
}

static GLOBAL: Mutex<GlobalState> = Mutex::new(GlobalState::Pending(None));

// A panic inside a `with_global` closure poisons the lock. Every registry operation leaves
// the map consistent even when unwinding, so tracking carries on with the state as it is.
fn lock_global() -> MutexGuard<'static, GlobalState> {
    GLOBAL.lock().unwrap_or_else(|poisoned| {
        debug!("process-wide allocation registry lock was poisoned, continuing");
        GLOBAL.clear_poison();
        PoisonError::into_inner(poisoned)
    })
}

/// Runs `f` with the process-wide registry, creating the registry on first use.
///
/// The first call creates the registry using the builder passed to [`configure_global()`]
/// or, if none was configured, the default builder (report written to
/// [`DEFAULT_REPORT_PATH`](crate::DEFAULT_REPORT_PATH)). If the report file cannot be
/// created, a warning is logged and the registry works without writing a report.
///
/// Returns `None` without calling `f` once [`shutdown_global()`] has run.
///
/// The registry is locked for the duration of `f`, so `f` must not call back into
/// any function that accesses the process-wide registry.
///
/// # Examples
///
/// ```
/// use leak_tracker::{Registry, configure_global, shutdown_global, with_global};
///
/// configure_global(Registry::builder().without_report());
///
/// let tracked = with_global(|registry| registry.len());
/// assert_eq!(tracked, Some(0));
///
/// shutdown_global();
/// assert_eq!(with_global(|registry| registry.len()), None);
/// ```
pub fn with_global<R>(f: impl FnOnce(&mut Registry) -> R) -> Option<R> {
    let mut state = lock_global();

    if let GlobalState::Pending(builder) = &mut *state {
        let registry = builder
            .take()
            .unwrap_or_else(Registry::builder)
            .build_or_without_report();
        *state = GlobalState::Live(registry);
    }

    let GlobalState::Live(registry) = &mut *state else {
        debug!("process-wide allocation registry already shut down, call ignored");
        return None;
    };

    Some(f(registry))
}

/// Sets the configuration used when the process-wide registry is created.
///
/// Returns `false` and leaves the registry untouched if it has already been created or
/// shut down. Calling this again before first use replaces the earlier configuration.
pub fn configure_global(builder: RegistryBuilder) -> bool {
    let mut state = lock_global();

    match &mut *state {
        GlobalState::Pending(configured) => {
            *configured = Some(builder);
            true
        }
        GlobalState::Live(_) | GlobalState::ShutDown => false,
    }
}

/// Tears down the process-wide registry, writing its leak report.
///
/// Only the first call has an effect. Returns the leak report if the registry had been
/// created; if nothing was ever tracked, no report is written and `None` is returned.
/// Failure to write the report is logged, the returned report is still complete.
///
/// Rust does not run destructors of statics, so this must be called explicitly (or via
/// [`shutdown_guard()`]) for the report to be written.
pub fn shutdown_global() -> Option<LeakReport> {
    let previous = {
        let mut state = lock_global();
        mem::replace(&mut *state, GlobalState::ShutDown)
    };

    match previous {
        GlobalState::Live(mut registry) => {
            let (report, written) = registry.teardown();

            if let Err(error) = written {
                warn!(%error, "leak report could not be written");
            }

            Some(report)
        }
        GlobalState::Pending(_) | GlobalState::ShutDown => None,
    }
}

/// Returns a guard that shuts down the process-wide registry when dropped.
///
/// Hold it in a local variable at the top of `main` so the leak report is written when
/// `main` returns.
///
/// # Examples
///
/// ```no_run
/// fn main() {
///     let _leak_report = leak_tracker::shutdown_guard();
///
///     let value = leak_tracker::track_new!(42_u32);
///     leak_tracker::track_delete!(value);
/// }
/// ```
#[must_use = "the registry is shut down as soon as the guard is dropped"]
pub fn shutdown_guard() -> ShutdownGuard {
    ShutdownGuard { _private: () }
}

/// Shuts down the process-wide registry when dropped. Created by [`shutdown_guard()`].
#[derive(Debug)]
pub struct ShutdownGuard {
    _private: (),
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        shutdown_global();
    }
}
