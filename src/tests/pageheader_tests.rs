// src/tests/pageheader_tests.rs

//! tests for `pageheader.rs`

use crate::common::FseError;
use crate::data::pageheader::{MaxWd, PageHeader, PAGE_HEADER_SZ, PAGE_MAGIC};
use crate::tests::common::{page_bytes, PAGE_TWO_RECORDS, RECORDS_TWO};

use ::test_case::test_case;

#[test_case("00000000000003E8", MaxWd::Known(1000); "upper")]
#[test_case("00000000000003e8", MaxWd::Known(1000); "lower")]
#[test_case("0000000000000000", MaxWd::Known(0); "zero")]
#[test_case("FFFFFFFFFFFFFFFF", MaxWd::Known(u64::MAX); "max")]
#[test_case("prefix-00000000000003e8", MaxWd::Known(1000); "prefixed")]
#[test_case("00000000000003G8", MaxWd::Unknown; "not hex")]
#[test_case("3e8", MaxWd::Unknown; "too short")]
#[test_case("", MaxWd::Unknown; "empty")]
#[test_case("carved-0001.bin", MaxWd::Unknown; "carved")]
#[test_case("ééééééééééééééééé", MaxWd::Unknown; "multibyte")]
fn test_maxwd_from_file_name(name: &str, expect: MaxWd) {
    assert_eq!(MaxWd::from_file_name(name), expect);
}

#[test]
fn test_maxwd_unknown_renders_zero() {
    assert_eq!(MaxWd::Unknown.as_u64(), 0);
    assert_eq!(MaxWd::Unknown.to_string(), "0");
    assert_eq!(MaxWd::Known(1000).to_string(), "1000");
}

#[test]
fn test_parse_two_record_page() {
    let header = PageHeader::parse(&PAGE_TWO_RECORDS, 0, MaxWd::Known(1000)).unwrap();
    assert!(header.has_magic());
    assert_eq!(header.signature, PAGE_MAGIC);
    assert_eq!(header.page_size, 100);
    assert_eq!(header.unknown_int, 0);
    assert_eq!(header.unknown_hex(), "0x00000000");
    assert_eq!(header.max_wd, MaxWd::Known(1000));
}

#[test]
fn test_parse_unknown_field() {
    let page = page_bytes(0x0403_0201, 0x1000, &RECORDS_TWO);
    let header = PageHeader::parse(&page, 0, MaxWd::Unknown).unwrap();
    assert_eq!(header.unknown_raw, [0x01, 0x02, 0x03, 0x04]);
    assert_eq!(header.unknown_int, 0x0403_0201);
    assert_eq!(header.unknown_hex(), "0x01020304");
    assert_eq!(header.page_size, 0x1000);
}

#[test_case(0; "empty")]
#[test_case(4; "magic only")]
#[test_case(12; "no first record byte")]
fn test_parse_truncated(len: usize) {
    let page = &PAGE_TWO_RECORDS[..len];
    match PageHeader::parse(page, 77, MaxWd::Unknown) {
        Err(FseError::TruncatedHeader { page_offset, available }) => {
            assert_eq!(page_offset, 77);
            assert_eq!(available, len);
        }
        result => panic!("expected TruncatedHeader, got {:?}", result),
    }
}

#[test]
fn test_parse_minimum() {
    let page = &PAGE_TWO_RECORDS[..PAGE_HEADER_SZ];
    let header = PageHeader::parse(page, 0, MaxWd::Unknown).unwrap();
    assert_eq!(header.page_size, 100);
}
