//! Errors surfaced when opening or writing the leak report.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when opening or writing the leak report.
///
/// Recording and releasing allocations never fails; only the explicit construction and
/// teardown of a [`Registry`](crate::Registry) surface these.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The report file could not be created.
    #[error("failed to open leak report file '{}'", .path.display())]
    OpenReport {
        /// Path of the report file we attempted to create.
        path: PathBuf,

        /// The underlying I/O failure.
        source: io::Error,
    },

    /// The report could not be written to its sink.
    #[error("failed to write leak report")]
    WriteReport {
        /// The underlying I/O failure.
        source: io::Error,
    },
}

/// A specialized `Result` type for leak tracker operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
