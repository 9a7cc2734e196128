//! Bookkeeping of allocations that are currently considered live.

use std::collections::BTreeMap;

use tracing::{debug, trace, warn};

use crate::sink::ReportSink;
use crate::{Address, AllocationRecord, LeakReport, RegistryBuilder, Result};

/// Authoritative record of the allocations routed through the tracking entry points that
/// have not been released yet.
///
/// An entry exists for an address if and only if that address has been recorded and not
/// released since. Whatever is left when the registry is torn down is reported as leaked.
///
/// The registry performs no synchronization of its own; it is mutated through `&mut self`.
/// The process-wide instance used by [`track_new!`](crate::track_new) and
/// [`track_delete!`](crate::track_delete) lives behind a lock, see
/// [`with_global()`](crate::with_global).
///
/// # Teardown
///
/// Teardown happens exactly once: either explicitly via [`shutdown()`](Self::shutdown),
/// which surfaces I/O errors, or implicitly when the registry is dropped, in which case
/// I/O errors are only logged.
///
/// # Examples
///
/// ```
/// use leak_tracker::{Address, AllocationRecord, CallSite, Registry};
///
/// let mut registry = Registry::builder().without_report().build().unwrap();
///
/// let foo = Address::from_raw(0x1);
/// let bar = Address::from_raw(0x2);
///
/// registry.record(foo, AllocationRecord::new("Foo", 8, CallSite::new("a.rs", 10, "f")));
/// registry.record(bar, AllocationRecord::new("Bar", 16, CallSite::new("a.rs", 12, "g")));
/// registry.release(foo);
///
/// let report = registry.shutdown().unwrap();
/// assert_eq!(report.len(), 1);
/// ```
#[derive(Debug)]
pub struct Registry {
    entries: BTreeMap<Address, AllocationRecord>,

    // Taken on teardown, so `None` means the report has already been written.
    sink: Option<ReportSink>,
}

impl Registry {
    /// Starts configuring a new registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub(crate) fn with_sink(sink: ReportSink) -> Self {
        Self {
            entries: BTreeMap::new(),
            sink: Some(sink),
        }
    }

    /// Starts tracking the allocation at `address`, returning the address unchanged.
    ///
    /// If the address is already tracked, its previous metadata is replaced. This is not
    /// treated as an error; it only emits a warning-level diagnostic event.
    pub fn record(&mut self, address: Address, record: AllocationRecord) -> Address {
        trace!(%address, size = record.size_bytes(), type_name = record.type_name(), "record");

        if let Some(previous) = self.entries.insert(address, record) {
            warn!(
                %address,
                previous_function = previous.allocating_function(),
                previous_line = previous.source_line(),
                "address recorded again while still tracked, previous metadata overwritten"
            );
        }

        address
    }

    /// Stops tracking the allocation at `address`.
    ///
    /// Addresses that are not tracked (never recorded, or already released) are ignored.
    pub fn release(&mut self, address: Address) {
        if self.entries.remove(&address).is_some() {
            trace!(%address, "release");
        } else {
            debug!(%address, "release of untracked address ignored");
        }
    }

    /// Number of allocations currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no allocations are currently tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the allocation at `address` is currently tracked.
    #[must_use]
    pub fn contains(&self, address: Address) -> bool {
        self.entries.contains_key(&address)
    }

    /// The metadata of the allocation at `address`, if tracked.
    #[must_use]
    pub fn get(&self, address: Address) -> Option<&AllocationRecord> {
        self.entries.get(&address)
    }

    /// The allocations currently tracked, ordered by address.
    pub fn leaks(&self) -> impl Iterator<Item = (Address, &AllocationRecord)> {
        self.entries.iter().map(|(address, record)| (*address, record))
    }

    /// Describes what would be reported as leaked if the registry were torn down now.
    #[must_use]
    pub fn to_report(&self) -> LeakReport {
        LeakReport::from_entries(&self.entries)
    }

    /// Tears down the registry, writing the leak report to its sink.
    ///
    /// Returns the report that was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the report could not be written. The registry is torn down
    /// regardless.
    pub fn shutdown(mut self) -> Result<LeakReport> {
        let (report, written) = self.teardown();
        written.map(|()| report)
    }

    /// Writes the report, closes the sink and discards all entries. The returned report is
    /// valid even if writing it failed.
    pub(crate) fn teardown(&mut self) -> (LeakReport, Result<()>) {
        let report = self.to_report();
        debug!(leaks = report.len(), "allocation registry shutting down");

        let written = match self.sink.take() {
            Some(sink) => sink.finish(&report),
            None => Ok(()),
        };

        self.entries.clear();

        (report, written)
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        if self.sink.is_none() {
            return;
        }

        if let (_, Err(error)) = self.teardown() {
            warn!(%error, "leak report could not be written");
        }
    }
}
