// src/data/container.rs

//! Implements [`Container`], the fully decompressed bytes of one fsevents
//! file, and [`ContainerInfo`], the facts about its source file shared by
//! every record decoded from it.

use std::fmt;
use std::sync::Arc;

use crate::common::{Bytes, FPath, FileSz};
use crate::data::pageheader::MaxWd;

/// Facts about the source file of a [`Container`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ContainerInfo {
    /// File name without directory, e.g. `00000000000003e8`.
    pub file_name: String,
    /// Directory holding the file.
    pub dir_path: FPath,
    /// Size of the decompressed container in bytes.
    pub file_sz: FileSz,
    /// Inferred from `file_name`.
    pub max_wd: MaxWd,
}

/// Thread-safe [Atomic Reference Counting Pointer] to a [`ContainerInfo`].
///
/// [Atomic Reference Counting Pointer]: std::sync::Arc
pub type ContainerInfoP = Arc<ContainerInfo>;

impl ContainerInfo {
    pub fn new(
        file_name: String,
        dir_path: FPath,
        file_sz: FileSz,
    ) -> ContainerInfo {
        let max_wd = MaxWd::from_file_name(&file_name);

        ContainerInfo {
            file_name,
            dir_path,
            file_sz,
            max_wd,
        }
    }
}

/// The decompressed bytes of one fsevents file.
pub struct Container {
    bytes: Bytes,
    info: ContainerInfoP,
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Container")
            .field("file_name", &self.info.file_name)
            .field("dir_path", &self.info.dir_path)
            .field("len", &self.bytes.len())
            .field("max_wd", &self.info.max_wd)
            .finish()
    }
}

impl Container {
    /// Create a `Container` from already decompressed `bytes`.
    pub fn new(
        bytes: Bytes,
        file_name: String,
        dir_path: FPath,
    ) -> Container {
        let file_sz = bytes.len() as FileSz;
        let info = ContainerInfo::new(file_name, dir_path, file_sz);

        Container {
            bytes,
            info: ContainerInfoP::new(info),
        }
    }

    #[inline(always)]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline(always)]
    pub fn info(&self) -> &ContainerInfoP {
        &self.info
    }

    #[inline(always)]
    pub fn file_name(&self) -> &str {
        &self.info.file_name
    }

    #[inline(always)]
    pub fn max_wd(&self) -> MaxWd {
        self.info.max_wd
    }
}
