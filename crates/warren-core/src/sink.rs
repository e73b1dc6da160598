//! Output boundary for serialized statistic records.
//!
//! A [`Sink`] accepts records one at a time through [`Sink::buffer`] and may
//! hold them back; [`Sink::flush`] is the only point at which output is
//! guaranteed to be visible. Producers never assume a buffered record has
//! been written.
//!
//! | Sink            | Buffering policy                                     |
//! |-----------------|------------------------------------------------------|
//! | [`ConsoleSink`] | holds everything until an explicit flush             |
//! | [`FileSink`]    | appends to a file once `capacity` records are held   |
//! | [`MemorySink`]  | moves records to an in-memory log on flush           |

use std::fs::OpenOptions;
use std::io::{Stdout, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

/// Errors that can occur while buffering or flushing records.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Writing to the underlying output failed.
    #[error("sink I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A file sink was configured to hold zero records.
    #[error("file sink capacity must be at least 1")]
    ZeroCapacity,
}

/// A buffering destination for serialized records.
pub trait Sink {
    /// Accept one record. May defer the actual output.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if accepting the record triggered a write that
    /// failed. The records stay buffered in that case.
    fn buffer(&mut self, record: String) -> Result<(), SinkError>;

    /// Write every buffered record and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the write fails. The records stay buffered.
    fn flush(&mut self) -> Result<(), SinkError>;

    /// Number of records accepted but not yet written.
    fn buffered(&self) -> usize;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn buffer(&mut self, record: String) -> Result<(), SinkError> {
        (**self).buffer(record)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }

    fn buffered(&self) -> usize {
        (**self).buffered()
    }
}

// ---------------------------------------------------------------------------
// ConsoleSink
// ---------------------------------------------------------------------------

/// Holds records until flushed, then prints them newline-joined.
#[derive(Debug)]
pub struct ConsoleSink<W: Write = Stdout> {
    /// Where flushed records go.
    writer: W,
    /// Records waiting for the next flush.
    pending: Vec<String>,
}

impl ConsoleSink<Stdout> {
    /// A console sink printing to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    /// A console sink printing to `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            pending: Vec::new(),
        }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for ConsoleSink<W> {
    fn buffer(&mut self, record: String) -> Result<(), SinkError> {
        self.pending.push(record);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "{}", self.pending.join("\n"))?;
        self.writer.flush()?;
        self.pending.clear();
        Ok(())
    }

    fn buffered(&self) -> usize {
        self.pending.len()
    }
}

// ---------------------------------------------------------------------------
// FileSink
// ---------------------------------------------------------------------------

/// Appends records to a file, one per line, whenever `capacity` of them
/// have been buffered.
#[derive(Debug)]
pub struct FileSink {
    /// File the records are appended to. Created on first write.
    path: PathBuf,
    /// Number of buffered records that triggers a write.
    capacity: usize,
    /// Records waiting to be written.
    pending: Vec<String>,
}

impl FileSink {
    /// Default number of records held before an automatic write.
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Create a sink appending to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::ZeroCapacity`] if `capacity` is 0.
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Result<Self, SinkError> {
        if capacity == 0 {
            return Err(SinkError::ZeroCapacity);
        }
        Ok(Self {
            path: path.into(),
            capacity,
            pending: Vec::with_capacity(capacity),
        })
    }

    /// The file records are appended to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of buffered records that triggers a write.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append every pending record to the file and clear the buffer.
    fn write_pending(&mut self) -> Result<(), SinkError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let records = append_records(&mut file, &mut self.pending)?;

        debug!(
            path = %self.path.display(),
            records,
            "Appended records to file sink"
        );
        Ok(())
    }
}

/// Write `pending` one line per record, removing each record once it is
/// written. On error only the unwritten tail stays in `pending`, so a retry
/// never repeats a line.
fn append_records<W: Write>(writer: &mut W, pending: &mut Vec<String>) -> Result<usize, SinkError> {
    let mut written: usize = 0;
    let result = pending
        .iter()
        .try_for_each(|record| {
            writer.write_all(format!("{record}\n").as_bytes())?;
            written = written.saturating_add(1);
            Ok::<(), std::io::Error>(())
        })
        .and_then(|()| writer.flush());
    pending.drain(..written);
    result?;
    Ok(written)
}

impl Sink for FileSink {
    fn buffer(&mut self, record: String) -> Result<(), SinkError> {
        self.pending.push(record);
        if self.pending.len() >= self.capacity {
            self.write_pending()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.write_pending()
    }

    fn buffered(&self) -> usize {
        self.pending.len()
    }
}

// ---------------------------------------------------------------------------
// MemorySink
// ---------------------------------------------------------------------------

/// Keeps flushed records in memory. Useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Records waiting for the next flush.
    pending: Vec<String>,
    /// Records already flushed, in order.
    flushed: Vec<String>,
}

impl MemorySink {
    /// An empty memory sink.
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
            flushed: Vec::new(),
        }
    }

    /// Records flushed so far, oldest first.
    pub fn records(&self) -> &[String] {
        &self.flushed
    }
}

impl Sink for MemorySink {
    fn buffer(&mut self, record: String) -> Result<(), SinkError> {
        self.pending.push(record);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.flushed.append(&mut self.pending);
        Ok(())
    }

    fn buffered(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .map(|s| s.lines().map(str::to_owned).collect())
            .unwrap_or_default()
    }

    #[test]
    fn console_sink_holds_until_flush() {
        let mut sink = ConsoleSink::new(Vec::new());
        sink.buffer("a".to_owned()).unwrap();
        sink.buffer("b".to_owned()).unwrap();
        assert_eq!(sink.buffered(), 2);

        sink.flush().unwrap();
        assert_eq!(sink.buffered(), 0);
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "a\nb\n");
    }

    #[test]
    fn console_sink_empty_flush_writes_nothing() {
        let mut sink = ConsoleSink::new(Vec::new());
        sink.flush().unwrap();
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn file_sink_rejects_zero_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileSink::new(dir.path().join("out.jsonl"), 0);
        assert!(matches!(result, Err(SinkError::ZeroCapacity)));
    }

    #[test]
    fn file_sink_writes_at_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jsonl");
        let mut sink = FileSink::new(&path, 2).unwrap();

        sink.buffer("one".to_owned()).unwrap();
        assert_eq!(sink.buffered(), 1);
        assert!(!path.exists());

        sink.buffer("two".to_owned()).unwrap();
        assert_eq!(sink.buffered(), 0);
        assert_eq!(read_lines(&path), vec!["one", "two"]);

        sink.buffer("three".to_owned()).unwrap();
        assert_eq!(sink.buffered(), 1);
        assert_eq!(read_lines(&path), vec!["one", "two"]);

        sink.flush().unwrap();
        assert_eq!(sink.buffered(), 0);
        assert_eq!(read_lines(&path), vec!["one", "two", "three"]);
    }

    #[test]
    fn file_sink_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jsonl");
        std::fs::write(&path, "earlier\n").unwrap();

        let mut sink = FileSink::new(&path, 1).unwrap();
        sink.buffer("later".to_owned()).unwrap();
        assert_eq!(read_lines(&path), vec!["earlier", "later"]);
    }

    #[test]
    fn file_sink_keeps_records_when_open_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.jsonl");
        let mut sink = FileSink::new(&path, 5).unwrap();
        sink.buffer("kept".to_owned()).unwrap();

        assert!(matches!(sink.flush(), Err(SinkError::Io { .. })));
        assert_eq!(sink.buffered(), 1);
    }

    /// Accepts a fixed number of writes, then fails every one after.
    struct FlakyWriter {
        out: Vec<u8>,
        writes_left: usize,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let Some(left) = self.writes_left.checked_sub(1) else {
                return Err(std::io::Error::other("disk full"));
            };
            self.writes_left = left;
            self.out.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn partial_write_drops_only_written_records() {
        let mut writer = FlakyWriter {
            out: Vec::new(),
            writes_left: 2,
        };
        let mut pending = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];

        let result = append_records(&mut writer, &mut pending);
        assert!(matches!(result, Err(SinkError::Io { .. })));
        assert_eq!(pending, vec!["c".to_owned()]);
        assert_eq!(writer.out, b"a\nb\n");

        writer.writes_left = 1;
        assert_eq!(append_records(&mut writer, &mut pending).unwrap(), 1);
        assert!(pending.is_empty());
        assert_eq!(writer.out, b"a\nb\nc\n");
    }

    #[test]
    fn memory_sink_moves_records_on_flush() {
        let mut sink = MemorySink::new();
        sink.buffer("x".to_owned()).unwrap();
        assert!(sink.records().is_empty());
        sink.flush().unwrap();
        assert_eq!(sink.records(), ["x".to_owned()]);
        assert_eq!(sink.buffered(), 0);
    }

    #[test]
    fn boxed_sink_forwards() {
        let mut sink: Box<dyn Sink> = Box::new(MemorySink::new());
        sink.buffer("y".to_owned()).unwrap();
        assert_eq!(sink.buffered(), 1);
        sink.flush().unwrap();
        assert_eq!(sink.buffered(), 0);
    }
}
