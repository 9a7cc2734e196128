//! Configuration of a new registry.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use tracing::warn;

use crate::sink::ReportSink;
use crate::{Registry, Result};

/// Relative path of the report file used when no other destination is configured.
pub const DEFAULT_REPORT_PATH: &str = "MemoryTracker.txt";

enum ReportTarget {
    File(PathBuf),
    Writer(Box<dyn Write + Send>),
    Nowhere,
}

/// Builder for a [`Registry`], selecting where its leak report is written.
///
/// By default the report goes to [`DEFAULT_REPORT_PATH`], relative to the current
/// working directory.
///
/// # Examples
///
/// ```
/// use leak_tracker::Registry;
///
/// let dir = tempfile::tempdir().unwrap();
///
/// let registry = Registry::builder()
///     .report_path(dir.path().join("leaks.txt"))
///     .build()
///     .unwrap();
///
/// let report = registry.shutdown().unwrap();
/// assert!(report.is_empty());
/// ```
#[must_use]
pub struct RegistryBuilder {
    target: ReportTarget,
}

impl RegistryBuilder {
    pub(crate) fn new() -> Self {
        Self {
            target: ReportTarget::File(PathBuf::from(DEFAULT_REPORT_PATH)),
        }
    }

    /// Writes the report to a file at `path`, creating or truncating it.
    pub fn report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.target = ReportTarget::File(path.into());
        self
    }

    /// Writes the report to the given writer instead of a file.
    pub fn report_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.target = ReportTarget::Writer(Box::new(writer));
        self
    }

    /// Keeps track of allocations but does not write a report anywhere.
    ///
    /// The leak report is still returned from [`Registry::shutdown()`].
    pub fn without_report(mut self) -> Self {
        self.target = ReportTarget::Nowhere;
        self
    }

    /// Opens the report destination and creates the registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the report file cannot be created or the initialization marker
    /// cannot be written.
    pub fn build(self) -> Result<Registry> {
        let sink = match self.target {
            ReportTarget::File(path) => ReportSink::create_file(&path)?,
            ReportTarget::Writer(writer) => ReportSink::from_writer(writer)?,
            ReportTarget::Nowhere => ReportSink::disabled(),
        };

        Ok(Registry::with_sink(sink))
    }

    /// Creates the registry even if the report destination is unusable, in which case the
    /// registry continues without a report sink.
    pub(crate) fn build_or_without_report(self) -> Registry {
        match self.build() {
            Ok(registry) => registry,
            Err(error) => {
                warn!(%error, "leak report unavailable, allocations are tracked without a report");
                Registry::with_sink(ReportSink::disabled())
            }
        }
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match &self.target {
            ReportTarget::File(path) => format!("file {}", path.display()),
            ReportTarget::Writer(_) => "writer".to_owned(),
            ReportTarget::Nowhere => "nowhere".to_owned(),
        };

        f.debug_struct("RegistryBuilder")
            .field("target", &target)
            .finish()
    }
}
