//! Leak reports describing allocations that were never released.

use std::fmt;

use crate::{Address, AllocationRecord};

/// Snapshot of the allocations still outstanding in a [`Registry`](crate::Registry).
///
/// A report is what the registry writes to its sink at shutdown, but it can also be taken
/// at any earlier point via [`Registry::to_report()`](crate::Registry::to_report) to inspect
/// what would be reported as leaked right now. Taking a report never changes the registry.
///
/// The `Display` implementation produces the text written to the report file:
///
/// ```text
/// 2 memory leak occurences detected
/// Leak in 'f' when allocating 'Foo' on line 10 in file a.rs
/// Leak in 'g' when allocating 'Bar' on line 12 in file a.rs
/// ```
///
/// # Examples
///
/// ```
/// use leak_tracker::{Address, AllocationRecord, CallSite, Registry};
///
/// let mut registry = Registry::builder().without_report().build().unwrap();
/// registry.record(
///     Address::from_raw(0x10),
///     AllocationRecord::new("Foo", 8, CallSite::new("a.rs", 10, "f")),
/// );
///
/// let report = registry.to_report();
/// assert_eq!(report.len(), 1);
/// println!("{report}");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LeakReport {
    leaks: Vec<Leak>,
}

/// One allocation that is still outstanding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Leak {
    address: Address,
    record: AllocationRecord,
}

impl LeakReport {
    pub(crate) fn from_entries<'a>(
        entries: impl IntoIterator<Item = (&'a Address, &'a AllocationRecord)>,
    ) -> Self {
        Self {
            leaks: entries
                .into_iter()
                .map(|(address, record)| Leak {
                    address: *address,
                    record: record.clone(),
                })
                .collect(),
        }
    }

    /// Number of leaked allocations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.leaks.len()
    }

    /// Whether nothing leaked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaks.is_empty()
    }

    /// The leaked allocations, ordered by address.
    pub fn leaks(&self) -> impl Iterator<Item = &Leak> {
        self.leaks.iter()
    }

    /// Sum of the sizes of all leaked allocations.
    #[must_use]
    pub fn total_leaked_bytes(&self) -> u64 {
        self.leaks
            .iter()
            .map(|leak| {
                u64::try_from(leak.record.size_bytes()).expect("usize always fits into u64")
            })
            .fold(0_u64, u64::saturating_add)
    }

    /// Prints the report to stdout.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        print!("{self}");
    }
}

impl Leak {
    /// The identity of the leaked allocation.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// The metadata recorded for the leaked allocation.
    #[must_use]
    pub fn record(&self) -> &AllocationRecord {
        &self.record
    }
}

impl fmt::Display for Leak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Leak in '{}' when allocating '{}' on line {} in file {}",
            self.record.allocating_function(),
            self.record.type_name(),
            self.record.source_line(),
            self.record.source_file()
        )
    }
}

impl fmt::Display for LeakReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.leaks.len() {
            0 => writeln!(f, "No memory leaks")?,
            1 => writeln!(f, "1 memory leak occurence detected")?,
            count => writeln!(f, "{count} memory leak occurences detected")?,
        }

        for leak in &self.leaks {
            writeln!(f, "{leak}")?;
        }

        Ok(())
    }
}
