// src/readers/summary.rs

//! Implements the statistics tracking structs [`ContainerStats`] and
//! [`RunSummary`].

use std::fmt;
use std::ops::AddAssign;

use ::more_asserts::debug_assert_ge;

use crate::common::{Count, FPath, FileSz};

/// Counts for one container, returned by
/// [`ContainerProcessor::process`].
///
/// [`ContainerProcessor::process`]: crate::readers::containerprocessor::ContainerProcessor::process
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ContainerStats {
    /// Pages located.
    pub pages_found: Count,
    /// Pages skipped because the header was truncated.
    pub pages_skipped: Count,
    /// NUL-terminated paths found, valid or not.
    pub records_attempted: Count,
    /// Valid records written to the sink.
    pub records_emitted: Count,
    /// Records with watch descriptor `0`.
    pub records_rejected: Count,
    /// Records with a short trailer.
    pub records_errored: Count,
    /// Bytes at page ends that were not part of a record.
    pub bytes_dropped: Count,
}

impl ContainerStats {
    /// Every attempted record is exactly one of emitted, rejected, errored.
    pub fn is_consistent(&self) -> bool {
        self.records_attempted == self.records_emitted + self.records_rejected + self.records_errored
    }
}

impl AddAssign for ContainerStats {
    fn add_assign(&mut self, other: ContainerStats) {
        self.pages_found += other.pages_found;
        self.pages_skipped += other.pages_skipped;
        self.records_attempted += other.records_attempted;
        self.records_emitted += other.records_emitted;
        self.records_rejected += other.records_rejected;
        self.records_errored += other.records_errored;
        self.bytes_dropped += other.bytes_dropped;
    }
}

impl fmt::Display for ContainerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pages {} (skipped {}), records attempted {}, emitted {}, rejected {}, errors {}",
            self.pages_found,
            self.pages_skipped,
            self.records_attempted,
            self.records_emitted,
            self.records_rejected,
            self.records_errored,
        )
    }
}

/// Outcome of one input file, for `--summary`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContainerSummary {
    pub path: FPath,
    /// Size of the decompressed container, if it was acquired.
    pub file_sz: Option<FileSz>,
    pub stats: ContainerStats,
    /// The container-level failure, if any.
    pub error: Option<String>,
}

impl ContainerSummary {
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Counts for an entire run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    /// Input files attempted.
    pub files_attempted: Count,
    /// Input files whose records were parsed.
    pub files_parsed: Count,
    /// Input files that failed acquisition or held no pages.
    pub files_errored: Count,
    /// Sum of every file's [`ContainerStats`].
    pub stats: ContainerStats,
}

impl RunSummary {
    pub fn new() -> RunSummary {
        RunSummary::default()
    }

    /// Account for one finished container.
    pub fn update(&mut self, summary: &ContainerSummary) {
        self.files_attempted += 1;
        if summary.is_ok() {
            self.files_parsed += 1;
        } else {
            self.files_errored += 1;
        }
        self.stats += summary.stats;
        debug_assert_ge!(self.files_attempted, self.files_parsed + self.files_errored);
    }

    /// Total valid records.
    pub const fn records_total(&self) -> Count {
        self.stats.records_emitted
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "All Files Attempted: {}", self.files_attempted)?;
        writeln!(f, "All Parsed Files: {}", self.files_parsed)?;
        writeln!(f, "Files with Errors: {}", self.files_errored)?;
        write!(f, "Total Records Parsed: {}", self.records_total())
    }
}
