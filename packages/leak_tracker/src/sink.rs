//! Destination of the leak report.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{Error, LeakReport, Result};

const INITIALIZE_LINE: &str = "Initialize MemoryTracker\n";
const SHUTDOWN_LINE: &str = "Shutdown MemoryTracker\n";

/// Exclusively owned output of a single registry.
///
/// The sink is written exactly twice: the initialization marker when it is opened and the
/// leak report (followed by the shutdown marker) when the owning registry is torn down.
pub(crate) struct ReportSink {
    writer: Option<Box<dyn Write + Send>>,
}

impl ReportSink {
    /// Creates (or truncates) the report file at `path` and writes the initialization marker.
    pub(crate) fn create_file(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| Error::OpenReport {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_writer(Box::new(BufWriter::new(file)))
    }

    /// Uses a caller-supplied writer as the report destination and writes the
    /// initialization marker to it. The marker is flushed immediately so it is visible even
    /// if the registry is never torn down.
    pub(crate) fn from_writer(mut writer: Box<dyn Write + Send>) -> Result<Self> {
        writer
            .write_all(INITIALIZE_LINE.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|source| Error::WriteReport { source })?;

        Ok(Self {
            writer: Some(writer),
        })
    }

    /// A sink that discards everything.
    pub(crate) const fn disabled() -> Self {
        Self { writer: None }
    }

    /// Writes the final report and the shutdown marker, then closes the sink.
    pub(crate) fn finish(self, report: &LeakReport) -> Result<()> {
        let Some(mut writer) = self.writer else {
            return Ok(());
        };

        write!(writer, "{report}")
            .and_then(|()| writer.write_all(SHUTDOWN_LINE.as_bytes()))
            .and_then(|()| writer.flush())
            .map_err(|source| Error::WriteReport { source })
    }
}

impl fmt::Debug for ReportSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportSink")
            .field("enabled", &self.writer.is_some())
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fs;
    use std::io;

    use super::*;
    use crate::test_support::{FailAfterFirstWrite, SharedBuffer};

    #[test]
    fn writer_receives_initialize_and_shutdown_lines() {
        let buffer = SharedBuffer::default();
        let sink = ReportSink::from_writer(Box::new(buffer.clone())).unwrap();

        assert_eq!(buffer.contents(), "Initialize MemoryTracker\n");

        sink.finish(&LeakReport::default()).unwrap();

        assert_eq!(
            buffer.contents(),
            "Initialize MemoryTracker\nNo memory leaks\nShutdown MemoryTracker\n"
        );
    }

    #[test]
    fn file_sink_writes_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");

        let sink = ReportSink::create_file(&path).unwrap();
        sink.finish(&LeakReport::default()).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Initialize MemoryTracker\nNo memory leaks\nShutdown MemoryTracker\n"
        );
    }

    #[test]
    fn initialize_line_is_in_file_before_teardown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");

        let sink = ReportSink::create_file(&path).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Initialize MemoryTracker\n"
        );
        drop(sink);
    }

    #[test]
    fn failure_after_initialize_is_reported_on_finish() {
        let writer = FailAfterFirstWrite::default();
        let sink = ReportSink::from_writer(Box::new(writer.clone())).unwrap();

        let result = sink.finish(&LeakReport::default());

        assert!(matches!(result, Err(Error::WriteReport { .. })));
        assert_eq!(writer.contents(), "Initialize MemoryTracker\n");
    }

    #[test]
    fn file_sink_in_missing_directory_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does_not_exist").join("report.txt");

        let result = ReportSink::create_file(&path);

        assert!(matches!(result, Err(Error::OpenReport { .. })));
    }

    #[test]
    fn disabled_sink_accepts_report() {
        ReportSink::disabled()
            .finish(&LeakReport::default())
            .unwrap();
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failing_writer_is_reported() {
        let result = ReportSink::from_writer(Box::new(FailingWriter));

        assert!(matches!(result, Err(Error::WriteReport { .. })));
    }
}
