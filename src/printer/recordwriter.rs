// src/printer/recordwriter.rs

//! The output sink of decoded records.
//!
//! [`RecordSink`] is the seam between the decoding pipeline and storage.
//! [`TsvRecordWriter`] writes the tab-delimited record file, one row per
//! record, columns in [`COLUMNS`] order. [`VecRecordSink`] keeps records in
//! memory. The SQLite sink is in [`sqlitewriter`].
//!
//! [`sqlitewriter`]: crate::printer::sqlitewriter

use std::io::{BufWriter, Result, Write};

use ::memchr::memchr3;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{Bytes, Count, FPath, File, FileOpenOptions};
use crate::data::record::FseRecord;

/// Default file name of the tab-delimited record file.
pub const FILENAME_RECORDS: &str = "FSEvents-Parsed_Records-tab_delimited.txt";

/// Column names, in output order.
///
/// The first fifteen columns are the historic layout of FSEvents parser
/// output; `record_wd_hex` is appended after them.
pub const COLUMNS: [&str; 16] = [
    "record_filename",
    "record_mask",
    "record_mask_hex",
    "asl_name_date_stripped",
    "record_wd",
    "record_number_parse_order",
    "record_length",
    "max_wd_record_number",
    "record_end_relative_offset",
    "current_page_size",
    "source_fsevents_filesize",
    "source_fsevents_file",
    "source_fsevents_path",
    "file_header-unknown_hex",
    "file_header-unknown_int",
    "record_wd_hex",
];

const SEPARATOR: &str = "\t";

/// Accepts decoded records one at a time, in parse order.
pub trait RecordSink {
    fn write_record(&mut self, record: &FseRecord) -> Result<()>;

    /// Persist anything buffered.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Append `field` to `row`, escaping the bytes that would break a
/// tab-delimited row. Other bytes are copied as-is.
fn escape_field(field: &[u8], row: &mut Bytes) {
    if memchr3(b'\t', b'\n', b'\r', field).is_none() {
        row.extend_from_slice(field);
        return;
    }
    for byte_ in field.iter() {
        match byte_ {
            b'\t' => row.extend_from_slice(b"\\t"),
            b'\n' => row.extend_from_slice(b"\\n"),
            b'\r' => row.extend_from_slice(b"\\r"),
            _ => row.push(*byte_),
        }
    }
}

/// Return the fields of `record` in [`COLUMNS`] order, unescaped.
///
/// The first field is the display form of the path, see
/// [`FseRecord::path`]. Writers that keep the path bytes exactly use
/// [`FseRecord::path_bytes`] instead.
pub fn record_to_fields(record: &FseRecord) -> [String; 16] {
    [
        record.path.clone(),
        record.flags(),
        record.mask_hex(),
        record.date_hint.to_string(),
        record.wd().to_string(),
        record.parse_order.to_string(),
        record.length.to_string(),
        record.max_wd().to_string(),
        record.fileoffset_end.to_string(),
        record.page_header.page_size.to_string(),
        record.container.file_sz.to_string(),
        record.container.file_name.clone(),
        record.container.dir_path.clone(),
        record.page_header.unknown_hex(),
        record.page_header.unknown_int.to_string(),
        record.wd_hex(),
    ]
}

/// One escaped row of `record`, newline terminated. The path is written
/// from the raw path bytes.
pub fn record_to_row(record: &FseRecord) -> Bytes {
    let fields: [String; 16] = record_to_fields(record);
    let mut row: Bytes = Bytes::with_capacity(256);
    escape_field(record.path_bytes(), &mut row);
    for field in fields[1..].iter() {
        row.extend_from_slice(SEPARATOR.as_bytes());
        escape_field(field.as_bytes(), &mut row);
    }
    row.push(b'\n');

    row
}

/// Writes records as tab-delimited rows.
pub struct TsvRecordWriter<W: Write> {
    writer: W,
    rows_written: Count,
}

impl TsvRecordWriter<BufWriter<File>> {
    /// Create (truncate) the file at `path` and write the header row.
    pub fn create(path: &FPath) -> Result<TsvRecordWriter<BufWriter<File>>> {
        defn!("({:?})", path);
        let file: File = FileOpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        let writer = TsvRecordWriter::new(BufWriter::new(file))?;
        defx!();

        Ok(writer)
    }
}

impl<W: Write> TsvRecordWriter<W> {
    /// Wrap `writer` and write the header row.
    pub fn new(mut writer: W) -> Result<TsvRecordWriter<W>> {
        writer.write_all(COLUMNS.join(SEPARATOR).as_bytes())?;
        writer.write_all(b"\n")?;

        Ok(TsvRecordWriter {
            writer,
            rows_written: 0,
        })
    }

    /// Count of record rows written (excludes the header row).
    pub const fn rows_written(&self) -> Count {
        self.rows_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for TsvRecordWriter<W> {
    fn write_record(&mut self, record: &FseRecord) -> Result<()> {
        self.writer.write_all(&record_to_row(record))?;
        self.rows_written += 1;

        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct VecRecordSink {
    pub records: Vec<FseRecord>,
}

impl VecRecordSink {
    pub fn new() -> VecRecordSink {
        VecRecordSink::default()
    }
}

impl RecordSink for VecRecordSink {
    fn write_record(&mut self, record: &FseRecord) -> Result<()> {
        self.records.push(record.clone());

        Ok(())
    }
}
