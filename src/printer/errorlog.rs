// src/printer/errorlog.rs

//! The exceptions log.
//!
//! Every container, page, and record failure becomes one
//! [`ErrorLogEntry`]. An [`ErrorLog`] never returns an error to the
//! pipeline; a failed write must not stop decoding.

use std::fmt;
use std::io::{BufWriter, Result, Write};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{Count, FPath, File, FileOffset, FileOpenOptions, FseError};
use crate::e_err;

/// Default file name of the exceptions log.
pub const FILENAME_EXCEPTIONS: &str = "FSEvents-EXCEPTIONS_LOG.txt";

/// One failure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ErrorLogEntry {
    /// The source fsevents file.
    pub source: FPath,
    /// Container offset, if known.
    pub offset: Option<FileOffset>,
    /// Short, stable name of the failure kind, e.g. `"TruncatedHeader"`.
    pub kind: &'static str,
    pub reason: String,
}

impl ErrorLogEntry {
    pub fn new(
        source: FPath,
        offset: Option<FileOffset>,
        kind: &'static str,
        reason: String,
    ) -> ErrorLogEntry {
        ErrorLogEntry {
            source,
            offset,
            kind,
            reason,
        }
    }

    pub fn from_error(
        source: &str,
        error: &FseError,
    ) -> ErrorLogEntry {
        ErrorLogEntry::new(FPath::from(source), error.offset(), error.kind_str(), error.to_string())
    }
}

impl fmt::Display for ErrorLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\tError: {}", self.source, self.reason)
    }
}

/// Accepts failures. Implementations must not panic and must not block
/// for long.
pub trait ErrorLog {
    fn log(&mut self, entry: ErrorLogEntry);

    /// Shorthand for logging an [`FseError`] for `source`.
    fn log_error(&mut self, source: &str, error: &FseError) {
        self.log(ErrorLogEntry::from_error(source, error));
    }
}

/// Writes one line per entry.
pub struct FileErrorLog<W: Write> {
    writer: W,
    entries_written: Count,
    /// Set after the first write failure; later failures are not reported.
    write_failed: bool,
}

impl FileErrorLog<BufWriter<File>> {
    /// Create (truncate) the file at `path`.
    pub fn create(path: &FPath) -> Result<FileErrorLog<BufWriter<File>>> {
        defñ!("({:?})", path);
        let file: File = FileOpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        Ok(FileErrorLog::new(BufWriter::new(file)))
    }
}

impl<W: Write> FileErrorLog<W> {
    pub fn new(writer: W) -> FileErrorLog<W> {
        FileErrorLog {
            writer,
            entries_written: 0,
            write_failed: false,
        }
    }

    pub const fn entries_written(&self) -> Count {
        self.entries_written
    }

    pub fn flush(&mut self) {
        if let Err(err) = self.writer.flush() {
            e_err!("exceptions log flush failed: {}", err);
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ErrorLog for FileErrorLog<W> {
    fn log(&mut self, entry: ErrorLogEntry) {
        match writeln!(self.writer, "{}", entry) {
            Ok(_) => {
                self.entries_written += 1;
            }
            Err(err) => {
                if !self.write_failed {
                    e_err!("exceptions log write failed: {}", err);
                }
                self.write_failed = true;
            }
        }
    }
}

/// Keeps every entry in memory.
#[derive(Debug, Default)]
pub struct VecErrorLog {
    pub entries: Vec<ErrorLogEntry>,
}

impl VecErrorLog {
    pub fn new() -> VecErrorLog {
        VecErrorLog::default()
    }

    /// Count of entries of `kind`, e.g. `"NoPagesFound"`.
    pub fn count_kind(&self, kind: &str) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .count()
    }
}

impl ErrorLog for VecErrorLog {
    fn log(&mut self, entry: ErrorLogEntry) {
        self.entries.push(entry);
    }
}
