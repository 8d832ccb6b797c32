// src/tests/common.rs

//! Common data and functions for tests: synthetic pages and containers
//! assembled byte by byte.

#![allow(non_upper_case_globals)]

use ::lazy_static::lazy_static;

use crate::common::{Bytes, FPath};
use crate::data::container::Container;
use crate::data::eventflags::EventMask;
use crate::data::pageheader::PAGE_MAGIC;
use crate::data::record::{Trailer, WatchDescriptor};

/// A record to assemble: path, watch descriptor, mask.
pub type RecordTuple<'a> = (&'a [u8], WatchDescriptor, EventMask);

pub const MASK_ITEMCREATED: EventMask = 0x0100_0000;
pub const MASK_ITEMREMOVED: EventMask = 0x0200_0000;
pub const MASK_ITEMMODIFIED: EventMask = 0x1000_0000;
pub const MASK_ITEMISFILE: EventMask = 0x0001_0000;

/// Allocated fsevents file name for max watch descriptor 1000.
pub const FILE_NAME_3E8: &str = "00000000000003E8";
/// Carved file name, no max watch descriptor.
pub const FILE_NAME_CARVED: &str = "carved-0001.bin";
/// Directory given to synthetic containers.
pub const DIR_PATH: &str = "/Volumes/evidence/.fseventsd";

/// The `(path, wd, mask)` records of [`PAGE_TWO_RECORDS`].
pub const RECORDS_TWO: [RecordTuple; 2] = [
    (b"/a/b", 5, MASK_ITEMCREATED),
    (b"", 7, MASK_ITEMREMOVED),
];

/// Path of a daily ASL log file; its date is `2017.02.18`.
pub const ASL_PATH_20170218: &[u8] = b"private/var/log/asl/2017.02.18.G80.asl";
/// Path of a daily ASL log file; its date is `2017.02.19`.
pub const ASL_PATH_20170219: &[u8] = b"private/var/log/asl/2017.02.19.G80.asl";

/// Bytes of one record: `path`, NUL, [`Trailer`].
pub fn record_bytes(
    path: &[u8],
    wd: WatchDescriptor,
    mask: EventMask,
) -> Bytes {
    let mut bytes: Bytes = Bytes::with_capacity(path.len() + 13);
    bytes.extend_from_slice(path);
    bytes.push(0);
    bytes.extend_from_slice(&Trailer { wd, mask }.to_bytes());

    bytes
}

/// Bytes of one page: magic, `unknown` and `page_size` (both
/// little-endian), then each of `records`.
pub fn page_bytes(
    unknown: u32,
    page_size: u32,
    records: &[RecordTuple],
) -> Bytes {
    let mut bytes: Bytes = Bytes::with_capacity(128);
    bytes.extend_from_slice(&PAGE_MAGIC);
    bytes.extend_from_slice(&unknown.to_le_bytes());
    bytes.extend_from_slice(&page_size.to_le_bytes());
    for (path, wd, mask) in records.iter() {
        bytes.extend_from_slice(&record_bytes(path, *wd, *mask));
    }

    bytes
}

/// Concatenate `parts` into one buffer.
pub fn concat_bytes(parts: &[&[u8]]) -> Bytes {
    parts.iter().flat_map(|part| part.iter().copied()).collect()
}

/// A [`Container`] of `bytes` named `file_name` in [`DIR_PATH`].
pub fn container_from(
    bytes: &[u8],
    file_name: &str,
) -> Container {
    Container::new(bytes.to_vec(), String::from(file_name), FPath::from(DIR_PATH))
}

lazy_static! {
    /// One page, page size 100, the records of [`RECORDS_TWO`].
    pub static ref PAGE_TWO_RECORDS: Bytes = page_bytes(0, 100, &RECORDS_TWO);

    /// Two pages; the first has two valid records, the second one valid and
    /// one with watch descriptor `0`.
    pub static ref CONTAINER_TWO_PAGES: Bytes = concat_bytes(&[
        &page_bytes(0x0000_0001, 0x1000, &[
            (&b"/Users/u/file1.txt"[..], 0x10, MASK_ITEMCREATED | MASK_ITEMISFILE),
            (&b"/Users/u/file2.txt"[..], 0x11, MASK_ITEMMODIFIED | MASK_ITEMISFILE),
        ])[..],
        &page_bytes(0x0000_0001, 0x1000, &[
            (&b"/Users/u/file3.txt"[..], 0x12, MASK_ITEMREMOVED | MASK_ITEMISFILE),
            (&b"/Users/u/zero"[..], 0, MASK_ITEMCREATED),
        ])[..],
    ]);

    /// One page holding two ASL log paths of different dates, each repeated.
    pub static ref PAGE_ASL_DATES: Bytes = page_bytes(0, 0x200, &[
        (ASL_PATH_20170218, 0x20, MASK_ITEMCREATED | MASK_ITEMISFILE),
        (ASL_PATH_20170218, 0x21, MASK_ITEMMODIFIED | MASK_ITEMISFILE),
        (ASL_PATH_20170219, 0x22, MASK_ITEMCREATED | MASK_ITEMISFILE),
        (ASL_PATH_20170219, 0x23, MASK_ITEMMODIFIED | MASK_ITEMISFILE),
    ]);
}
