// tests/fsep_tests.rs

//! End-to-end tests of _fseplib_ and the _fsep_ binary using fsevents files
//! written to a temporary directory.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use ::flate2::write::GzEncoder;
use ::flate2::Compression;
use ::rusqlite::Connection;
use ::tempfile::TempDir;

use ::fseplib::common::FPath;
use ::fseplib::data::pageheader::PAGE_MAGIC;
use ::fseplib::data::record::Trailer;
use ::fseplib::printer::errorlog::{FileErrorLog, FILENAME_EXCEPTIONS};
use ::fseplib::printer::recordwriter::{RecordSink, TsvRecordWriter, COLUMNS, FILENAME_RECORDS};
use ::fseplib::printer::sqlitewriter::FILENAME_SQLITE;
use ::fseplib::readers::containerprocessor::ContainerProcessor;
use ::fseplib::readers::containersource::{enumerate_paths, load_container};
use ::fseplib::readers::helpers::path_to_fpath;
use ::fseplib::readers::summary::{ContainerStats, RunSummary};

fn page(records: &[(&[u8], u64, u32)]) -> Vec<u8> {
    let mut bytes: Vec<u8> = Vec::new();
    bytes.extend_from_slice(&PAGE_MAGIC);
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0x1000u32.to_le_bytes());
    for (path, wd, mask) in records.iter() {
        bytes.extend_from_slice(path);
        bytes.push(0);
        bytes.extend_from_slice(&Trailer { wd: *wd, mask: *mask }.to_bytes());
    }

    bytes
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::<u8>::new(), Compression::default());
    encoder.write_all(data).unwrap();

    encoder.finish().unwrap()
}

/// A directory like `.fseventsd`: two gzip files, one carved raw file, one
/// file with no pages.
fn create_fseventsd() -> TempDir {
    let tmpdir = tempfile::Builder::new()
        .prefix("tmp-fsep-itest-")
        .tempdir()
        .unwrap();
    let write = |name: &str, data: &[u8]| {
        std::fs::write(tmpdir.path().join(name), data).unwrap();
    };
    write(
        "0000000000000010",
        &gzip(&page(&[
            (&b"/Users/u/a.txt"[..], 0x0F, 0x0101_0000),
            (&b"/Users/u/b.txt"[..], 0x10, 0x1001_0000),
        ])),
    );
    write(
        "0000000000000020",
        &gzip(&page(&[
            (&b"/Users/u/c.txt"[..], 0x1F, 0x0201_0000),
            (&b"/Users/u/zero"[..], 0, 0x0100_0000),
        ])),
    );
    write("carved.bin", &page(&[(&b"/private/tmp/x"[..], 0x99, 0x0100_0000)]));
    write("junk.bin", b"nothing to see here");

    tmpdir
}

#[test]
fn test_library_pipeline() {
    let tmpdir = create_fseventsd();
    let (files, errs) = enumerate_paths(&[path_to_fpath(tmpdir.path())]);
    assert!(errs.is_empty(), "{:?}", errs);
    assert_eq!(files.len(), 4);

    let mut writer = TsvRecordWriter::new(Vec::<u8>::new()).unwrap();
    let mut errlog = FileErrorLog::new(Vec::<u8>::new());
    let mut run = RunSummary::new();
    for path in files.iter() {
        let container = load_container(path).unwrap();
        let (stats, error) = match ContainerProcessor::new(&container).process(&mut writer, &mut errlog) {
            Ok(stats) => (stats, None),
            Err(err) => (ContainerStats::default(), Some(err.to_string())),
        };
        run.update(&fseplib::readers::summary::ContainerSummary {
            path: path.clone(),
            file_sz: Some(container.len() as u64),
            stats,
            error,
        });
    }
    writer.flush().unwrap();

    assert_eq!(run.files_attempted, 4);
    assert_eq!(run.files_parsed, 3);
    assert_eq!(run.files_errored, 1);
    assert_eq!(run.records_total(), 4);
    assert_eq!(run.stats.records_rejected, 1);
    assert_eq!(writer.rows_written(), 4);

    let log = String::from_utf8(errlog.into_inner()).unwrap();
    assert_eq!(log.lines().count(), 2, "{}", log);
    assert!(log.contains("junk.bin\tError: Unable to find a SLD1 header."), "{}", log);
    assert!(log.contains("'/Users/u/zero'"), "{}", log);
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn test_fsep_binary() {
    let tmpdir = create_fseventsd();
    let outdir: PathBuf = tmpdir.path().join("out");
    let input: FPath = path_to_fpath(tmpdir.path());
    let output = Command::new(env!("CARGO_BIN_EXE_fsep"))
        .arg("--output-dir")
        .arg(&outdir)
        .arg("--jobs")
        .arg("1")
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("All Files Attempted: 4"), "{}", stdout);
    assert!(stdout.contains("Files with Errors: 1"), "{}", stdout);
    assert!(stdout.contains("Total Records Parsed: 4"), "{}", stdout);
    let trying: Vec<&str> = stdout.lines().filter(|line| line.starts_with("Trying\t")).collect();
    assert_eq!(trying.len(), 4, "{}", stdout);
    assert!(trying[0].ends_with("0000000000000010"), "{:?}", trying);
    assert!(trying[3].ends_with("junk.bin"), "{:?}", trying);
    let finished = stdout
        .find("FINISHED PARSING: See exceptions log for parsing errors.")
        .expect(&stdout);
    assert!(finished < stdout.find("All Files Attempted:").unwrap(), "{}", stdout);

    let records = read_lines(&outdir.join(FILENAME_RECORDS));
    assert_eq!(records.len(), 5);
    assert_eq!(records[0], COLUMNS.join("\t"));
    // one job processes files in file name order
    assert!(records[1].starts_with("/Users/u/a.txt\tItemIsFile;ItemCreated;\t"), "{}", records[1]);
    assert!(records[2].starts_with("/Users/u/b.txt\tItemIsFile;ItemModified;\t"), "{}", records[2]);
    assert!(records[3].starts_with("/Users/u/c.txt\t"), "{}", records[3]);
    assert!(records[4].starts_with("/private/tmp/x\t"), "{}", records[4]);
    let fields: Vec<&str> = records[1].split('\t').collect();
    assert_eq!(fields[7], "16", "max_wd_record_number");
    let fields: Vec<&str> = records[4].split('\t').collect();
    assert_eq!(fields[7], "0", "carved file has no max_wd");

    let exceptions = read_lines(&outdir.join(FILENAME_EXCEPTIONS));
    assert_eq!(exceptions.len(), 2, "{:?}", exceptions);

    let conn = Connection::open(outdir.join(FILENAME_SQLITE)).unwrap();
    let mut statement = conn
        .prepare("SELECT [record_filename], [max_wd_record_number] FROM [fsevents] ORDER BY rowid")
        .unwrap();
    let rows: Vec<(String, String)> = statement
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .map(|row| row.unwrap())
        .collect();
    assert_eq!(
        rows,
        vec![
            (String::from("/Users/u/a.txt"), String::from("16")),
            (String::from("/Users/u/b.txt"), String::from("16")),
            (String::from("/Users/u/c.txt"), String::from("32")),
            (String::from("/private/tmp/x"), String::from("0")),
        ]
    );
}

#[test]
fn test_fsep_binary_no_files() {
    let output = Command::new(env!("CARGO_BIN_EXE_fsep"))
        .arg("/this/path/does/not/exist")
        .output()
        .unwrap();
    assert!(!output.status.success());
}
