// src/readers/helpers.rs

//! Miscellaneous helper functions for _Readers_.

use std::path::Path;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::FPath;

/// Return the basename of an `FPath`.
pub fn basename(path: &FPath) -> FPath {
    match Path::new(path).file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => FPath::new(),
    }
}

/// Return the directory of an `FPath`, or `""`.
pub fn dirname(path: &FPath) -> FPath {
    match Path::new(path).parent() {
        Some(parent) => path_to_fpath(parent),
        None => FPath::new(),
    }
}

/// Join a directory and a file name; an empty directory returns the file
/// name alone.
pub fn join_dir_file(
    dir: &str,
    file_name: &str,
) -> FPath {
    if dir.is_empty() {
        return FPath::from(file_name);
    }

    path_to_fpath(&Path::new(dir).join(file_name))
}

/// Helper function for a slightly annoying set of calls.
pub fn path_to_fpath(path: &Path) -> FPath {
    // `PathBuf` to `String` https://stackoverflow.com/q/37388107/471376
    (*(path.to_string_lossy())).to_string()
}
