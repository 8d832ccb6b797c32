// src/readers/mod.rs

//! "Readers" for _fseplib_.
//!
//! ## Overview of readers
//!
//! * [`containersource`] finds fsevents files and acquires each as a
//!   decompressed [`Container`].
//! * A [`ContainerProcessor`] drives decoding of one `Container`.
//! * [`locate_pages`] splits a `Container` into [`Page`s].
//! * A [`RecordScanner`] derives [`FseRecord`s] from one `Page`.
//!
//! <br/>
//!
//! The _fsep_ binary program uses a [`ContainerProcessor`] instance, one per
//! file, to drive processing for a file.
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [`Read`]: std::io::Read
//! [`containersource`]: crate::readers::containersource
//! [`Container`]: crate::data::container::Container
//! [`ContainerProcessor`]: crate::readers::containerprocessor::ContainerProcessor
//! [`locate_pages`]: crate::readers::pagelocator::locate_pages
//! [`Page`s]: crate::readers::pagelocator::Page
//! [`RecordScanner`]: crate::readers::recordscanner::RecordScanner
//! [`FseRecord`s]: crate::data::record::FseRecord

pub mod containerprocessor;
pub mod containersource;
pub mod helpers;
pub mod pagelocator;
pub mod recordscanner;
pub mod summary;
