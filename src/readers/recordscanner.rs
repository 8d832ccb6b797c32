// src/readers/recordscanner.rs

//! Implements a [`RecordScanner`], an [`Iterator`] over the records of one
//! page.
//!
//! Records are found by searching for the NUL that terminates each path.
//! The 12 bytes after the NUL are the record [`Trailer`]. The scan then
//! resumes after the trailer.
//!
//! The first record is at page offset 12, which is one byte before the end
//! of the 13 bytes read as the [`PageHeader`]. Moving the start to offset 13
//! would drop the first byte of the first path of every page.
//!
//! [`Trailer`]: crate::data::record::Trailer
//! [`PageHeader`]: crate::data::pageheader::PageHeader

use std::fmt;
use std::iter::FusedIterator;

use ::memchr::memchr;
#[allow(unused_imports)]
use ::more_asserts::{debug_assert_le, debug_assert_lt};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{Count, FileOffset, FseError};
use crate::data::container::ContainerInfoP;
use crate::data::datehint::DateHintP;
use crate::data::pageheader::PageHeader;
use crate::data::record::{
    path_bytes_to_string,
    FseRecord,
    Trailer,
    RECORD_SZ_MIN,
};
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::{buffer_to_String_noraw, buffer_to_hex};

/// Page-relative offset of the first record.
pub const RECORD_SCAN_START: usize = 12;

/// Items yielded by a [`RecordScanner`].
#[derive(Debug)]
pub enum ScanResult {
    /// A valid record.
    Found(FseRecord),
    /// A record that could not be decoded, i.e. [`FseError::RecordDecode`],
    /// or was decoded but rejected, i.e.
    /// [`FseError::InvalidWatchDescriptor`].
    Err(FseError),
}

impl ScanResult {
    pub const fn is_found(&self) -> bool {
        matches!(self, ScanResult::Found(_))
    }

    pub fn ok(self) -> Option<FseRecord> {
        match self {
            ScanResult::Found(record) => Some(record),
            ScanResult::Err(_) => None,
        }
    }
}

/// Walks one page yielding a [`ScanResult`] per NUL-terminated path.
///
/// Finite and not restartable; a new `RecordScanner` must be created to
/// scan the page again.
pub struct RecordScanner<'a> {
    /// The entire page, beginning with the magic.
    page: &'a [u8],
    /// Container offset of `page`.
    page_start: FileOffset,
    /// Page-relative offset of the next unscanned byte.
    cursor: usize,
    header: PageHeader,
    date_hint: DateHintP,
    container: ContainerInfoP,
    /// `parse_order` of the last valid record.
    parse_order: Count,
    /// Count of NUL-terminated paths found.
    records_attempted: Count,
    /// Count of bytes after the last NUL that were not a record.
    bytes_dropped: usize,
}

impl fmt::Debug for RecordScanner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RecordScanner")
            .field("page_start", &self.page_start)
            .field("page_len", &self.page.len())
            .field("cursor", &self.cursor)
            .field("parse_order", &self.parse_order)
            .field("records_attempted", &self.records_attempted)
            .finish()
    }
}

impl<'a> RecordScanner<'a> {
    /// Create a `RecordScanner` for `page` at container offset
    /// `page_start`.
    ///
    /// `parse_order` is the parse order of the last valid record of any
    /// prior page of the same container, or `0`.
    pub fn new(
        page: &'a [u8],
        page_start: FileOffset,
        header: PageHeader,
        date_hint: DateHintP,
        container: ContainerInfoP,
        parse_order: Count,
    ) -> RecordScanner<'a> {
        defñ!("(page len {}, page_start {}, parse_order {})", page.len(), page_start, parse_order);

        RecordScanner {
            page,
            page_start,
            cursor: RECORD_SCAN_START,
            header,
            date_hint,
            container,
            parse_order,
            records_attempted: 0,
            bytes_dropped: 0,
        }
    }

    /// `parse_order` of the last valid record yielded (or the value passed
    /// to `new` if none).
    #[inline(always)]
    pub const fn parse_order(&self) -> Count {
        self.parse_order
    }

    #[inline(always)]
    pub const fn records_attempted(&self) -> Count {
        self.records_attempted
    }

    #[inline(always)]
    pub const fn bytes_dropped(&self) -> usize {
        self.bytes_dropped
    }
}

impl Iterator for RecordScanner<'_> {
    type Item = ScanResult;

    fn next(&mut self) -> Option<ScanResult> {
        let page_len: usize = self.page.len();
        if self.cursor >= page_len {
            return None;
        }
        let path_beg: usize = self.cursor;
        let nul_at: usize = match memchr(0, &self.page[path_beg..]) {
            Some(at) => path_beg + at,
            None => {
                // unterminated path; not a record
                self.bytes_dropped = page_len - path_beg;
                defo!(
                    "page_start {} dropped {} trailing bytes {:?}",
                    self.page_start, self.bytes_dropped,
                    buffer_to_String_noraw(&self.page[path_beg..]),
                );
                self.cursor = page_len;
                return None;
            }
        };
        debug_assert_lt!(nul_at, page_len);
        let path_b: &[u8] = &self.page[path_beg..nul_at];
        let trailer_beg: usize = nul_at + 1;
        self.cursor = nul_at + RECORD_SZ_MIN;
        self.records_attempted += 1;

        let trailer: Trailer = match Trailer::from_bytes(&self.page[trailer_beg..]) {
            Some(val) => val,
            None => {
                defo!(
                    "short trailer at page offset {} [{}]",
                    trailer_beg,
                    buffer_to_hex(&self.page[trailer_beg..]),
                );
                return Some(ScanResult::Err(FseError::RecordDecode {
                    offset: self.page_start + nul_at as FileOffset,
                    page_offset: self.page_start,
                    available: page_len - trailer_beg,
                }));
            }
        };
        let path: String = path_bytes_to_string(path_b);
        let fileoffset_end: FileOffset = self.page_start + self.cursor as FileOffset;
        if !trailer.is_valid() {
            defo!("wd 0 for path {:?} ending at {}", path, fileoffset_end);
            return Some(ScanResult::Err(FseError::InvalidWatchDescriptor {
                offset: fileoffset_end,
                path,
            }));
        }
        self.parse_order += 1;
        let record = FseRecord {
            path,
            path_raw: path_b.to_vec(),
            trailer,
            parse_order: self.parse_order,
            length: path_b.len() + RECORD_SZ_MIN,
            fileoffset_end,
            date_hint: self.date_hint.clone(),
            page_header: self.header.clone(),
            container: self.container.clone(),
        };
        defo!("{:?}", record);

        Some(ScanResult::Found(record))
    }
}

impl FusedIterator for RecordScanner<'_> {}
