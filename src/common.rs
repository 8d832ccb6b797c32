// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

//! Common imports, type aliases, the error taxonomy, and other globals
//! shared by the _fseplib_ modules.

use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub use std::fs::File;
pub use std::path::Path;

// TODO: use `std::path::PathBuf` for `FPath`
/// `F`ake `Path` or `F`ile `Path`
pub type FPath = String;
pub type FPaths = Vec<FPath>;
pub type FileOpenOptions = std::fs::OpenOptions;

/// File size in bytes
pub type FileSz = u64;

/// Offset into a file (or a decompressed container) in bytes
pub type FileOffset = u64;

/// Sequence of Bytes
pub type Bytes = Vec<u8>;

/// General purpose counter
pub type Count = u64;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// panics only in debug builds
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `panic!` in debug builds, do nothing in release builds.
#[macro_export]
macro_rules! debug_panic {
    (
        $($args:tt)*
    ) => {
        {
            #[cfg(any(debug_assertions, test))]
            panic!($($args)*);
        }
    }
}
pub use debug_panic;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// error taxonomy
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Failures of the decoding pipeline.
///
/// Each variant is recovered at its own granularity:
///
/// | variant                    | fails        |
/// |----------------------------|--------------|
/// | [`Acquisition`]            | a container  |
/// | [`NoPagesFound`]           | a container  |
/// | [`TruncatedHeader`]        | a page       |
/// | [`RecordDecode`]           | a record     |
/// | [`InvalidWatchDescriptor`] | a record     |
/// | [`Output`]                 | a container  |
///
/// None of these are fatal to a run.
///
/// [`Acquisition`]: FseError::Acquisition
/// [`NoPagesFound`]: FseError::NoPagesFound
/// [`TruncatedHeader`]: FseError::TruncatedHeader
/// [`RecordDecode`]: FseError::RecordDecode
/// [`InvalidWatchDescriptor`]: FseError::InvalidWatchDescriptor
/// [`Output`]: FseError::Output
#[derive(Debug)]
pub enum FseError {
    /// The container bytes could not be read or decompressed.
    Acquisition {
        path: FPath,
        source: std::io::Error,
    },
    /// The container holds no page magic.
    NoPagesFound,
    /// The page is shorter than the page header.
    TruncatedHeader {
        page_offset: FileOffset,
        available: usize,
    },
    /// The record trailer is short or malformed.
    RecordDecode {
        /// absolute offset of the path-terminating NUL
        offset: FileOffset,
        /// absolute offset of the page holding the record
        page_offset: FileOffset,
        available: usize,
    },
    /// The record trailer decoded to watch descriptor `0`.
    InvalidWatchDescriptor {
        /// absolute offset of the end of the record
        offset: FileOffset,
        path: String,
    },
    /// The record sink failed to store a record. Stops the container.
    Output {
        source: std::io::Error,
    },
}

impl FseError {
    /// The container offset associated with this error, if any.
    pub const fn offset(&self) -> Option<FileOffset> {
        match self {
            FseError::Acquisition { .. }
            | FseError::NoPagesFound
            | FseError::Output { .. } => None,
            FseError::TruncatedHeader { page_offset, .. } => Some(*page_offset),
            FseError::RecordDecode { offset, .. } => Some(*offset),
            FseError::InvalidWatchDescriptor { offset, .. } => Some(*offset),
        }
    }

    /// Short, stable name of the variant.
    pub const fn kind_str(&self) -> &'static str {
        match self {
            FseError::Acquisition { .. } => "AcquisitionFailure",
            FseError::NoPagesFound => "NoPagesFound",
            FseError::TruncatedHeader { .. } => "TruncatedHeader",
            FseError::RecordDecode { .. } => "RecordDecodeError",
            FseError::InvalidWatchDescriptor { .. } => "InvalidWatchDescriptor",
            FseError::Output { .. } => "OutputFailure",
        }
    }
}

impl fmt::Display for FseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FseError::Acquisition { path, source } => {
                write!(f, "unable to read or un-compress file {:?}: {}", path, source)
            }
            FseError::NoPagesFound => {
                write!(f, "Unable to find a SLD1 header.")
            }
            FseError::TruncatedHeader { page_offset, available } => {
                write!(
                    f,
                    "Unable to parse file header at offset {}, only {} bytes available",
                    page_offset, available,
                )
            }
            FseError::RecordDecode { offset, page_offset, available } => {
                write!(
                    f,
                    "Unable to parse event record at offset {} in page at offset {}, only {} trailer bytes available",
                    offset, page_offset, available,
                )
            }
            FseError::InvalidWatchDescriptor { offset, path } => {
                write!(
                    f,
                    "Unable to parse record entry for record filename '{}' at offset {}",
                    path, offset,
                )
            }
            FseError::Output { source } => {
                write!(f, "unable to write record: {}", source)
            }
        }
    }
}

impl std::error::Error for FseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FseError::Acquisition { source, .. } => Some(source),
            FseError::Output { source } => Some(source),
            _ => None,
        }
    }
}
