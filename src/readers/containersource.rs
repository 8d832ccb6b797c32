// src/readers/containersource.rs

//! Find fsevents files and acquire their decompressed bytes as a
//! [`Container`].
//!
//! Allocated fsevents files are gzip compressed. Carved files may be gzip
//! compressed or may already be decompressed. A file beginning with the
//! gzip magic is decompressed, any other file is used as-is.
//!
//! [`Container`]: crate::data::container::Container

use std::fmt;
use std::io::{Error, ErrorKind, Read};
use std::path::Path;

use ::flate2::read::MultiGzDecoder;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::walkdir::WalkDir;

use crate::common::{Bytes, FPath, FPaths, FseError};
use crate::data::container::Container;
use crate::readers::helpers::{basename, dirname, path_to_fpath};

/// First two bytes of a gzip file, see RFC 1952.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Result of examining one user-passed path or directory entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProcessPathResult {
    /// Regular file, may be an fsevents file.
    FileValid(FPath),
    /// Path exists and is not a file or directory.
    FileErrNotAFile(FPath),
    /// Path does not exist.
    FileErrNotExist(FPath),
    /// Directory could not be read.
    FileErrIo(FPath, String),
}

impl fmt::Display for ProcessPathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessPathResult::FileValid(path) => write!(f, "{}", path),
            ProcessPathResult::FileErrNotAFile(path) => write!(f, "not a file {:?}", path),
            ProcessPathResult::FileErrNotExist(path) => write!(f, "path does not exist {:?}", path),
            ProcessPathResult::FileErrIo(path, err) => write!(f, "{} for {:?}", err, path),
        }
    }
}

pub type ProcessPathResults = Vec<ProcessPathResult>;

/// Examine `path`. A file is returned as-is. A directory is enumerated one
/// level deep, entries sorted by name; sub-directories are ignored.
pub fn process_path(path: &FPath) -> ProcessPathResults {
    defn!("({:?})", path);
    let std_path: &Path = Path::new(path);
    if !std_path.exists() {
        defx!("does not exist");
        return vec![ProcessPathResult::FileErrNotExist(path.clone())];
    }
    if std_path.is_file() {
        defx!("is a file");
        return vec![ProcessPathResult::FileValid(path.clone())];
    }
    if !std_path.is_dir() {
        defx!("not a file or dir");
        return vec![ProcessPathResult::FileErrNotAFile(path.clone())];
    }

    let mut results = ProcessPathResults::new();
    for entry in WalkDir::new(std_path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(val) => val,
            Err(err) => {
                defo!("Err({:?})", err);
                let errpath: FPath = match err.path() {
                    Some(p) => path_to_fpath(p),
                    None => path.clone(),
                };
                results.push(ProcessPathResult::FileErrIo(errpath, err.to_string()));
                continue;
            }
        };
        if entry.file_type().is_file() {
            results.push(ProcessPathResult::FileValid(path_to_fpath(entry.path())));
        } else {
            defo!("skip {:?}", entry.path());
        }
    }
    defx!("return {} results", results.len());

    results
}

/// [`process_path`] each of `paths`; return the files, and separately the
/// paths that could not be used.
pub fn enumerate_paths(paths: &[FPath]) -> (FPaths, ProcessPathResults) {
    let mut files = FPaths::new();
    let mut errs = ProcessPathResults::new();
    for path in paths.iter() {
        for result in process_path(path).into_iter() {
            match result {
                ProcessPathResult::FileValid(fpath) => files.push(fpath),
                _ => errs.push(result),
            }
        }
    }

    (files, errs)
}

/// Decompress gzip `bytes`. Concatenated gzip members are all read.
pub fn gunzip(bytes: &[u8]) -> std::io::Result<Bytes> {
    let mut decoder = MultiGzDecoder::new(bytes);
    let mut buffer = Bytes::with_capacity(bytes.len() * 4);
    decoder.read_to_end(&mut buffer)?;

    Ok(buffer)
}

/// Read the file at `path` into a [`Container`], decompressing if needed.
pub fn load_container(path: &FPath) -> Result<Container, FseError> {
    defn!("({:?})", path);
    let raw: Bytes = match std::fs::read(path) {
        Ok(val) => val,
        Err(err) => {
            defx!("read failed {}", err);
            return Err(FseError::Acquisition {
                path: path.clone(),
                source: err,
            });
        }
    };
    defo!("read {} bytes", raw.len());
    let bytes: Bytes = if raw.starts_with(&GZIP_MAGIC) {
        match gunzip(&raw) {
            Ok(val) => val,
            Err(err) => {
                defx!("gunzip failed {}", err);
                return Err(FseError::Acquisition {
                    path: path.clone(),
                    source: Error::new(
                        ErrorKind::InvalidData,
                        format!("unable to un-compress gzip file: {}", err),
                    ),
                });
            }
        }
    } else {
        raw
    };
    let container = Container::new(bytes, basename(path), dirname(path));
    defx!("return {:?}", container);

    Ok(container)
}
