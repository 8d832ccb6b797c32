// src/data/record.rs

//! Implements [`Trailer`], the fixed 12 bytes closing every FSEvents record,
//! and [`FseRecord`], one decoded record with the container and page facts
//! attached to it.
//!
//! A record within a page:
//!
//! ```text
//! +----------------------+-----+----------------------+-----------------+
//! | path (0 or more)     | NUL | watch descriptor     | event mask      |
//! |                      | 1   | 8, little-endian u64 | 4, big-endian   |
//! +----------------------+-----+----------------------+-----------------+
//!                              |<-------------- Trailer --------------->|
//! ```

use std::fmt;

use ::bstr::ByteSlice; // for `to_str_lossy`

use crate::common::{Bytes, Count, FileOffset};
use crate::data::container::ContainerInfoP;
use crate::data::datehint::DateHintP;
use crate::data::eventflags::{mask_to_hex, mask_to_names, EventMask};
use crate::data::pageheader::{MaxWd, PageHeader};

/// Size of a record [`Trailer`] in bytes.
pub const TRAILER_SZ: usize = 12;

/// Size of a record with an empty path: the NUL plus the trailer.
pub const RECORD_SZ_MIN: usize = TRAILER_SZ + 1;

/// Written in place of an empty path.
pub const NULL_PATH: &str = "NULL VALUE";

/// Watch descriptor, a.k.a. event id.
pub type WatchDescriptor = u64;

/// The fixed-size tail of a record.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Trailer {
    pub wd: WatchDescriptor,
    pub mask: EventMask,
}

impl Trailer {
    /// Decode the first [`TRAILER_SZ`] bytes of `bytes`.
    ///
    /// Returns `None` if `bytes` is too short.
    pub fn from_bytes(bytes: &[u8]) -> Option<Trailer> {
        if bytes.len() < TRAILER_SZ {
            return None;
        }
        let mut wd_raw: [u8; 8] = [0; 8];
        wd_raw.copy_from_slice(&bytes[0..8]);
        let mut mask_raw: [u8; 4] = [0; 4];
        mask_raw.copy_from_slice(&bytes[8..TRAILER_SZ]);

        Some(Trailer {
            wd: WatchDescriptor::from_le_bytes(wd_raw),
            mask: EventMask::from_be_bytes(mask_raw),
        })
    }

    /// Encode to the on-disk layout.
    pub fn to_bytes(&self) -> [u8; TRAILER_SZ] {
        let mut bytes: [u8; TRAILER_SZ] = [0; TRAILER_SZ];
        bytes[0..8].copy_from_slice(&self.wd.to_le_bytes());
        bytes[8..TRAILER_SZ].copy_from_slice(&self.mask.to_be_bytes());

        bytes
    }

    /// A record with watch descriptor `0` is not a real record.
    pub const fn is_valid(&self) -> bool {
        self.wd != 0
    }
}

/// Convert raw path bytes to the path written to output.
///
/// Invalid UTF-8 is replaced. An empty path becomes [`NULL_PATH`].
pub fn path_bytes_to_string(path: &[u8]) -> String {
    if path.is_empty() {
        return String::from(NULL_PATH);
    }

    path.to_str_lossy().into_owned()
}

/// One decoded, valid FSEvents record.
#[derive(Clone, Eq, PartialEq)]
pub struct FseRecord {
    /// Decoded path or [`NULL_PATH`], for display.
    pub path: String,
    /// Path bytes exactly as found in the page, may be empty.
    pub path_raw: Bytes,
    pub trailer: Trailer,
    /// 1-based order among the valid records of the container.
    pub parse_order: Count,
    /// Path length plus [`RECORD_SZ_MIN`].
    pub length: usize,
    /// Container offset of the first byte after the record.
    pub fileoffset_end: FileOffset,
    pub date_hint: DateHintP,
    pub page_header: PageHeader,
    pub container: ContainerInfoP,
}

impl fmt::Debug for FseRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FseRecord")
            .field("path", &self.path)
            .field("wd", &self.trailer.wd)
            .field("mask", &self.mask_hex())
            .field("parse_order", &self.parse_order)
            .field("length", &self.length)
            .field("fileoffset_end", &self.fileoffset_end)
            .finish()
    }
}

impl FseRecord {
    /// Path bytes to write as-is; [`NULL_PATH`] for an empty path.
    pub fn path_bytes(&self) -> &[u8] {
        if self.path_raw.is_empty() {
            return NULL_PATH.as_bytes();
        }

        self.path_raw.as_slice()
    }

    #[inline(always)]
    pub const fn wd(&self) -> WatchDescriptor {
        self.trailer.wd
    }

    /// e.g. `"0x3e8"`
    pub fn wd_hex(&self) -> String {
        format!("{:#x}", self.trailer.wd)
    }

    #[inline(always)]
    pub const fn mask(&self) -> EventMask {
        self.trailer.mask
    }

    /// e.g. `"0x01000000"`
    pub fn mask_hex(&self) -> String {
        mask_to_hex(self.trailer.mask)
    }

    /// e.g. `"ItemIsFile;ItemCreated;"`
    pub fn flags(&self) -> String {
        mask_to_names(self.trailer.mask)
    }

    #[inline(always)]
    pub const fn max_wd(&self) -> MaxWd {
        self.page_header.max_wd
    }

    /// Container offset of the first byte of the record.
    pub const fn fileoffset_begin(&self) -> FileOffset {
        self.fileoffset_end - self.length as FileOffset
    }
}
