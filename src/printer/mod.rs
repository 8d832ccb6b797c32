// src/printer/mod.rs

//! The `printer` module is the output side of _fseplib_: the record file,
//! the SQLite database, the exceptions log, and stdout helpers.

pub mod errorlog;
pub mod printers;
pub mod recordwriter;
pub mod sqlitewriter;
