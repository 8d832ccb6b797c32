// src/tests/helpers_tests.rs

//! tests for `helpers.rs` functions

use std::path::Path;

use ::test_case::test_case;

use crate::common::FPath;
use crate::readers::helpers::{basename, dirname, join_dir_file, path_to_fpath};

#[test_case("/a/b/00000000000003e8", "00000000000003e8")]
#[test_case("00000000000003e8", "00000000000003e8"; "no dir")]
#[test_case("/a/b/", "b"; "trailing slash")]
#[test_case("", ""; "empty")]
fn test_basename(path: &str, expect: &str) {
    assert_eq!(basename(&FPath::from(path)), expect);
}

#[test_case("/a/b/00000000000003e8", "/a/b")]
#[test_case("00000000000003e8", ""; "no dir")]
#[test_case("/", ""; "root")]
fn test_dirname(path: &str, expect: &str) {
    assert_eq!(dirname(&FPath::from(path)), expect);
}

#[test_case("/a/b", "f", "/a/b/f")]
#[test_case("/a/b/", "f", "/a/b/f"; "trailing slash")]
#[test_case("", "f", "f"; "empty dir")]
fn test_join_dir_file(dir: &str, file_name: &str, expect: &str) {
    assert_eq!(join_dir_file(dir, file_name), expect);
}

#[test]
fn test_path_to_fpath() {
    assert_eq!(path_to_fpath(Path::new("/a/b")), FPath::from("/a/b"));
}
