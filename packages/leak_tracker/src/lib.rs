#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Debug-time tracking of explicitly instrumented allocations.
//!
//! Allocation sites that should be watched for leaks create their values with
//! [`track_new!`] instead of `Box::new`, and free them with [`track_delete!`] instead of
//! dropping the box. Every tracked allocation is recorded in a process-wide [`Registry`],
//! together with its type, size and the file, line and function that requested it. When the
//! registry is shut down, everything still recorded is written to a plain-text leak report.
//!
//! Only allocations routed through these entry points are tracked. This is not a global
//! allocator and it does not observe any other allocation in the process.
//!
//! This package is not meant for use in production, serving only as a development tool.
//!
//! # Usage
//!
//! ```
//! use leak_tracker::{track_delete, track_new};
//!
//! fn main() {
//!     # let dir = tempfile::tempdir().unwrap();
//!     # leak_tracker::configure_global(
//!     #     leak_tracker::Registry::builder().report_path(dir.path().join("MemoryTracker.txt")),
//!     # );
//!     // Writes the report when `main` returns.
//!     let _leak_report = leak_tracker::shutdown_guard();
//!
//!     let released = track_new!(String::from("released"));
//!     let _leaked = Box::leak(track_new!(String::from("leaked")));
//!
//!     track_delete!(released);
//! }
//! ```
//!
//! By default the report is written to `MemoryTracker.txt` in the current working
//! directory:
//!
//! ```text
//! Initialize MemoryTracker
//! 1 memory leak occurence detected
//! Leak in 'my_app::main' when allocating 'alloc::string::String' on line 12 in file src/main.rs
//! Shutdown MemoryTracker
//! ```
//!
//! # Disabling tracking
//!
//! All bookkeeping is controlled by the `tracking` feature, enabled by default. Without it,
//! [`track_new!`] is `Box::new` and [`track_delete!`] is `drop`: there is no registry
//! interaction, no report file and no overhead.
//!
//! # Standalone registries
//!
//! A [`Registry`] can also be owned directly, for example to track handles that are not
//! Rust allocations at all. See [`Registry::builder()`].
//!
//! # Misuse
//!
//! Recording an address that is already tracked replaces its metadata, and releasing an
//! address that is not tracked does nothing. Neither is an error; both emit diagnostic
//! events through `tracing`.

mod address;
mod builder;
mod error;
mod global;
mod macros;
mod record;
mod registry;
mod report;
mod sink;
#[cfg(test)]
mod test_support;
mod tracking;

pub use address::*;
pub use builder::*;
pub use error::*;
pub use global::*;
pub use record::*;
pub use registry::*;
pub use report::*;
pub use tracking::{record, release, track_delete, track_new};

#[doc(hidden)]
pub mod __private {
    pub use crate::tracking::track_new_with;

    /// Turns the type name of a marker function into the path of the function enclosing it.
    #[must_use]
    pub fn enclosing_function(marker: &'static str) -> &'static str {
        let mut name = marker.strip_suffix("::__leak_tracker_marker").unwrap_or(marker);

        while let Some(outer) = name.strip_suffix("::{{closure}}") {
            name = outer;
        }

        name
    }
}
