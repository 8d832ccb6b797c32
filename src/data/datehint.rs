// src/data/datehint.rs

//! Implements [`DateHint`], a best-effort calendar date for a whole
//! container.
//!
//! FSEvents records carry no timestamps. However, a container often holds
//! records for the daily Apple System Log files, e.g.
//! `private/var/log/asl/2017.02.18.G80.asl`, and those file names embed the
//! date the records were written. The event flags of the record must show
//! the log file was created or modified for the date to count.
//!
//! The date(s) found are attached to every record of the container.

use std::fmt;
use std::sync::Arc;

use ::itertools::Itertools; // for `dedup`
use ::lazy_static::lazy_static;
use ::regex::bytes::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Written when no date was found.
pub const DATE_UNKNOWN: &str = "UNKNOWN";

/// Separator between distinct dates.
pub const DATE_SEPARATOR: &str = ",";

/// Offset of the `YYYY.MM.DD` date from the start of a match, i.e.
/// `"private/var/log/asl/".len()`.
const DATE_MATCH_OFFSET: usize = 20;

/// Length of `YYYY.MM.DD`.
const DATE_LEN: usize = 10;

lazy_static! {
    /// An ASL log path, the NUL and watch descriptor of its record trailer
    /// (9 bytes), then the first mask byte (most significant, the mask is
    /// big-endian). The mask byte must be `ItemCreated` (`0x01`),
    /// `ItemModified` (`0x10`) or one of those combined with another item
    /// flag. `|` is also accepted.
    static ref ASL_PATH_REGEX: Regex = Regex::new(
        r"(?-u)private/var/log/asl/[0-9]{4}\.[0-9]{2}\.[0-9]{2}\.[\x30-\x7a]{2,5}\.asl[\x00-\xFF]{9}[\x10|\x01\x11\x21\x41\x81]"
    ).unwrap();
}

/// Dates, `YYYY.MM.DD`, found in one container, in order of discovery.
/// Consecutive repeats are collapsed.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct DateHint {
    dates: Vec<String>,
}

/// Thread-safe [Atomic Reference Counting Pointer] to a [`DateHint`].
///
/// [Atomic Reference Counting Pointer]: std::sync::Arc
pub type DateHintP = Arc<DateHint>;

impl DateHint {
    /// Search all of `buffer` for ASL log paths and collect their dates.
    pub fn extract(buffer: &[u8]) -> DateHint {
        defn!("(buffer len {})", buffer.len());
        let dates: Vec<String> = ASL_PATH_REGEX
            .find_iter(buffer)
            .filter_map(|match_| {
                let _beg: usize = match_.start() + DATE_MATCH_OFFSET;
                let date_b: &[u8] = &match_.as_bytes()[DATE_MATCH_OFFSET..DATE_MATCH_OFFSET + DATE_LEN];
                defo!("match at {}, date {:?}", _beg, date_b);
                // the regex only admits ASCII digits and '.' here
                std::str::from_utf8(date_b)
                    .ok()
                    .map(String::from)
            })
            .dedup()
            .collect();
        defx!("dates {:?}", dates);

        DateHint { dates }
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn is_unknown(&self) -> bool {
        self.dates.is_empty()
    }
}

impl fmt::Display for DateHint {
    /// `UNKNOWN`, or the dates joined by `,`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dates.is_empty() {
            return write!(f, "{}", DATE_UNKNOWN);
        }
        write!(f, "{}", self.dates.join(DATE_SEPARATOR))
    }
}
