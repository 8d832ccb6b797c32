// src/printer/sqlitewriter.rs

//! [`SqliteRecordSink`] stores records in the `fsevents` table of a SQLite
//! database, one row per record, one column per entry of [`COLUMNS`].
//!
//! Every column is `TEXT`. A path that is not valid UTF-8 is stored as a
//! `BLOB` of its raw bytes.
//!
//! Records written between two calls to [`RecordSink::flush`] share one
//! transaction.

use std::io::{Error, ErrorKind, Result};
use std::path::Path;

use ::itertools::Itertools; // for `join`
use ::rusqlite::types::Value;
use ::rusqlite::{params_from_iter, Connection};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{Count, FPath};
use crate::data::record::FseRecord;
use crate::printer::recordwriter::{record_to_fields, RecordSink, COLUMNS};

/// Default file name of the SQLite database.
pub const FILENAME_SQLITE: &str = "fsevents.sqlite";

/// Name of the table holding the records.
pub const TABLE: &str = "fsevents";

fn sql_error(err: rusqlite::Error) -> Error {
    Error::new(ErrorKind::Other, err)
}

/// `CREATE TABLE` statement of [`TABLE`]. Column names are bracket quoted,
/// some contain `-`.
pub fn create_table_sql() -> String {
    format!(
        "CREATE TABLE [{}] ({})",
        TABLE,
        COLUMNS.iter().map(|column| format!("[{}] TEXT NULL", column)).join(", "),
    )
}

/// `INSERT` statement of one row of [`TABLE`].
pub fn insert_sql() -> String {
    format!(
        "INSERT INTO [{}] ({}) VALUES ({})",
        TABLE,
        COLUMNS.iter().map(|column| format!("[{}]", column)).join(", "),
        COLUMNS.iter().map(|_| "?").join(", "),
    )
}

/// The path of `record` as stored: text if it is valid UTF-8, else the raw
/// bytes.
fn path_value(record: &FseRecord) -> Value {
    match std::str::from_utf8(record.path_bytes()) {
        Ok(path) => Value::Text(String::from(path)),
        Err(_) => Value::Blob(record.path_bytes().to_vec()),
    }
}

/// Writes records to a SQLite database.
pub struct SqliteRecordSink {
    conn: Connection,
    insert: String,
    in_transaction: bool,
    rows_written: Count,
}

impl SqliteRecordSink {
    /// Create the database at `path` with an empty [`TABLE`]. A file already
    /// at `path` is removed first.
    pub fn create(path: &FPath) -> Result<SqliteRecordSink> {
        defn!("({:?})", path);
        if Path::new(path).exists() {
            defo!("remove existing {:?}", path);
            std::fs::remove_file(path)?;
        }
        let conn: Connection = Connection::open(path).map_err(sql_error)?;
        let sink = SqliteRecordSink::new(conn)?;
        defx!();

        Ok(sink)
    }

    /// Create [`TABLE`] in `conn`.
    pub fn new(conn: Connection) -> Result<SqliteRecordSink> {
        conn.execute_batch(&create_table_sql()).map_err(sql_error)?;

        Ok(SqliteRecordSink {
            conn,
            insert: insert_sql(),
            in_transaction: false,
            rows_written: 0,
        })
    }

    /// Count of rows inserted, committed or not.
    pub const fn rows_written(&self) -> Count {
        self.rows_written
    }
}

impl RecordSink for SqliteRecordSink {
    fn write_record(&mut self, record: &FseRecord) -> Result<()> {
        if !self.in_transaction {
            defo!("BEGIN");
            self.conn.execute_batch("BEGIN").map_err(sql_error)?;
            self.in_transaction = true;
        }
        let fields: [String; 16] = record_to_fields(record);
        let values = std::iter::once(path_value(record))
            .chain(fields.into_iter().skip(1).map(Value::Text));
        let mut statement = self.conn.prepare_cached(&self.insert).map_err(sql_error)?;
        statement.execute(params_from_iter(values)).map_err(sql_error)?;
        self.rows_written += 1;

        Ok(())
    }

    /// Commit the open transaction, if any.
    fn flush(&mut self) -> Result<()> {
        if !self.in_transaction {
            return Ok(());
        }
        defo!("COMMIT {} rows", self.rows_written);
        self.conn.execute_batch("COMMIT").map_err(sql_error)?;
        self.in_transaction = false;

        Ok(())
    }
}
