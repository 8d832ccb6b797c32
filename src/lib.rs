// src/lib.rs

//! _fseplib_ recovers macOS FSEvents records from allocated or carved
//! `.fseventsd` files.
//!
//! The _fsep_ binary program is in `src/bin/fsep.rs`.

pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;
