// src/data/mod.rs

//! The `data` module is specialized data containers for
//! [`Container`]s, [`PageHeader`]s, [`FseRecord`]s, and the
//! container-wide [`DateHint`].
//!
//! ## Definitions of data
//!
//! ### Container
//!
//! A "container" is the fully decompressed content of one fsevents file.
//! Allocated fsevents files are found at `/.fseventsd/` and are gzip
//! compressed. Carved files are whatever was recovered from unallocated
//! storage.
//!
//! ### Page
//!
//! A "page" is a sequence of contiguous bytes in a container that:
//!
//! * begins with the magic `1SLD`.
//! * ends at the next magic or the end of the container.
//!
//! A page starts with a [`PageHeader`].
//!
//! ### Record
//!
//! A "record" is a sequence of bytes in a page that:
//!
//! * begins after a prior record or at page offset 12.
//! * is a NUL-terminated path followed by a 12 byte [`Trailer`].
//!
//! A record is represented by a [`FseRecord`] and found by a
//! [`RecordScanner`].
//!
//! [`Container`]: crate::data::container::Container
//! [`PageHeader`]: crate::data::pageheader::PageHeader
//! [`FseRecord`]: crate::data::record::FseRecord
//! [`Trailer`]: crate::data::record::Trailer
//! [`DateHint`]: crate::data::datehint::DateHint
//! [`RecordScanner`]: crate::readers::recordscanner::RecordScanner

pub mod container;
pub mod datehint;
pub mod eventflags;
pub mod pageheader;
pub mod record;
