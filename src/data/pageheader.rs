// src/data/pageheader.rs

//! Implements [`PageHeader`], the fixed header at the start of every
//! FSEvents page, and [`MaxWd`], the maximum watch descriptor inferred from
//! an allocated fsevents file name.
//!
//! A page header is read as 13 bytes:
//!
//! ```text
//! offset  size  field
//!      0     4  magic "1SLD"
//!      4     4  unknown, little-endian
//!      8     4  page size, little-endian
//!     12     1  (first byte of the first record)
//! ```
//!
//! The thirteenth byte is required to be present but is not part of any
//! header field; record scanning begins at offset 12.

use std::fmt;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{FileOffset, FseError};

/// The page magic, `"1SLD"`.
pub const PAGE_MAGIC: [u8; 4] = [0x31, 0x53, 0x4C, 0x44];

/// Bytes required at the start of a page to read a [`PageHeader`].
pub const PAGE_HEADER_SZ: usize = 13;

/// Number of trailing hexadecimal characters of an allocated fsevents
/// file name.
pub const MAX_WD_NAME_HEX_LEN: usize = 16;

/// The maximum watch descriptor (event id) of an fsevents file, taken from
/// the file name.
///
/// macOS names allocated fsevents files after the highest event id they
/// hold, e.g. `00000000000003e8`. Carved files have arbitrary names so the
/// value is [`Unknown`].
///
/// The output column `max_wd_record_number` writes `Unknown` as `0`, the
/// same as a file literally named `0000000000000000`. Readers of that column
/// cannot tell the two apart.
///
/// [`Unknown`]: MaxWd::Unknown
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum MaxWd {
    Known(u64),
    #[default]
    Unknown,
}

impl MaxWd {
    /// Infer from a file name (not a path). The last
    /// [`MAX_WD_NAME_HEX_LEN`] characters must all be hexadecimal digits.
    pub fn from_file_name(name: &str) -> MaxWd {
        defn!("({:?})", name);
        let name_b: &[u8] = name.as_bytes();
        if name_b.len() < MAX_WD_NAME_HEX_LEN {
            defx!("too short; return Unknown");
            return MaxWd::Unknown;
        }
        let suffix: &[u8] = &name_b[name_b.len() - MAX_WD_NAME_HEX_LEN..];
        if !suffix.iter().all(u8::is_ascii_hexdigit) {
            defx!("not hex; return Unknown");
            return MaxWd::Unknown;
        }
        // all ASCII so the `str` slice is on a char boundary
        let suffix_s: &str = &name[name.len() - MAX_WD_NAME_HEX_LEN..];
        let maxwd = match u64::from_str_radix(suffix_s, 16) {
            Ok(val) => MaxWd::Known(val),
            Err(_err) => {
                defo!("from_str_radix({:?}) failed {}", suffix_s, _err);
                MaxWd::Unknown
            }
        };
        defx!("return {:?}", maxwd);

        maxwd
    }

    /// Value written to output; `Unknown` becomes `0`.
    pub const fn as_u64(&self) -> u64 {
        match self {
            MaxWd::Known(val) => *val,
            MaxWd::Unknown => 0,
        }
    }
}

impl fmt::Display for MaxWd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u64())
    }
}

/// The decoded header of one page.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageHeader {
    /// Bytes 0 to 4, the page magic.
    pub signature: [u8; 4],
    /// Bytes 4 to 8 as found in the file.
    pub unknown_raw: [u8; 4],
    /// Bytes 4 to 8 as a little-endian integer.
    pub unknown_int: u32,
    /// Bytes 8 to 12, the declared page size.
    pub page_size: u32,
    /// Container-level maximum watch descriptor.
    pub max_wd: MaxWd,
}

impl PageHeader {
    /// Parse the header at the start of `page`.
    ///
    /// `page_offset` is the container offset of `page`, used only for
    /// error reporting.
    pub fn parse(
        page: &[u8],
        page_offset: FileOffset,
        max_wd: MaxWd,
    ) -> Result<PageHeader, FseError> {
        defn!("(page len {}, page_offset {}, {:?})", page.len(), page_offset, max_wd);
        if page.len() < PAGE_HEADER_SZ {
            defx!("return Err(TruncatedHeader)");
            return Err(FseError::TruncatedHeader {
                page_offset,
                available: page.len(),
            });
        }
        let mut signature: [u8; 4] = [0; 4];
        signature.copy_from_slice(&page[0..4]);
        let mut unknown_raw: [u8; 4] = [0; 4];
        unknown_raw.copy_from_slice(&page[4..8]);
        let mut page_size_raw: [u8; 4] = [0; 4];
        page_size_raw.copy_from_slice(&page[8..12]);

        let header = PageHeader {
            signature,
            unknown_raw,
            unknown_int: u32::from_le_bytes(unknown_raw),
            page_size: u32::from_le_bytes(page_size_raw),
            max_wd,
        };
        defx!("return {:?}", header);

        Ok(header)
    }

    /// The unknown field as hex of the raw bytes in file order,
    /// e.g. `"0x00000000"`.
    pub fn unknown_hex(&self) -> String {
        format!(
            "0x{:02x}{:02x}{:02x}{:02x}",
            self.unknown_raw[0], self.unknown_raw[1], self.unknown_raw[2], self.unknown_raw[3],
        )
    }

    pub fn has_magic(&self) -> bool {
        self.signature == PAGE_MAGIC
    }
}
