// src/debug/helpers.rs

//! Miscellaneous helper functions for testing; temporary files and
//! directories holding synthetic fsevents files.

use std::io::Write; // for `NamedTempFile.write_all`
use std::path::PathBuf;

use ::flate2::write::GzEncoder;
use ::flate2::Compression;
use ::lazy_static::lazy_static;
use ::si_trace_print::{defn, defx};

use crate::common::FPath;
use crate::readers::helpers::path_to_fpath;

#[doc(hidden)]
pub use ::tempfile::NamedTempFile;
#[doc(hidden)]
pub use ::tempfile::TempDir;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// temporary file helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// NamedTempFile instances default to this file name prefix.
pub const STR_TEMPFILE_PREFIX: &str = "tmp-fsep-test-";

lazy_static! {
    pub static ref STRING_TEMPFILE_PREFIX: String = String::from(STR_TEMPFILE_PREFIX);
}

/// Small helper function for copying `NamedTempFile` path to a `FPath`.
pub fn ntf_fpath(ntf: &NamedTempFile) -> FPath {
    path_to_fpath(ntf.path())
}

/// Testing helper function to write a `[u8]` to a temporary file.
pub fn create_temp_file_bytes(data: &[u8]) -> NamedTempFile {
    let mut ntf = match ::tempfile::Builder::new()
        // use known prefix for easier cleanup
        .prefix::<str>(&STRING_TEMPFILE_PREFIX)
        .tempfile()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("tempfile::Builder::new()..tempfile() return Err {}", err);
        }
    };
    match ntf.write_all(data) {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::write_all() return Err {}", err);
        }
    }

    ntf
}

/// gzip `data` in memory.
pub fn gzip_bytes(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::<u8>::new(), Compression::default());
    encoder.write_all(data).unwrap();

    encoder.finish().unwrap()
}

/// Create a temporary directory
pub fn create_temp_dir() -> TempDir {
    ::tempfile::Builder::new()
        .prefix::<str>(&STRING_TEMPFILE_PREFIX)
        .tempdir()
        .unwrap()
}

/// Write `data` to the exactly-named file `name` within `tempdir`.
/// Return the path of the new file.
pub fn create_file_in_tmpdir(
    tempdir: &TempDir,
    name: &str,
    data: &[u8],
) -> PathBuf {
    defn!("({:?}, {:?}, {} bytes)", tempdir.path(), name, data.len());
    let path: PathBuf = tempdir.path().join(name);
    std::fs::write(&path, data).unwrap();
    defx!("return {:?}", path);

    path
}
