// src/readers/containerprocessor.rs

//! Implements a [`ContainerProcessor`], the driver of decoding all
//! [`FseRecord`s] from one [`Container`].
//!
//! Processing stages, strictly in order:
//!
//! 1. extract the container-wide [`DateHint`]
//! 2. [`locate_pages`]; no pages fails the container
//! 3. for each page, parse the [`PageHeader`]; a truncated header skips
//!    the page
//! 4. for each page, drive a [`RecordScanner`]; each valid record is
//!    written to the [`RecordSink`], each failed record to the [`ErrorLog`]
//!
//! [`FseRecord`s]: crate::data::record::FseRecord
//! [`Container`]: crate::data::container::Container
//! [`DateHint`]: crate::data::datehint::DateHint
//! [`PageHeader`]: crate::data::pageheader::PageHeader
//! [`locate_pages`]: crate::readers::pagelocator::locate_pages
//! [`RecordScanner`]: crate::readers::recordscanner::RecordScanner
//! [`RecordSink`]: crate::printer::recordwriter::RecordSink
//! [`ErrorLog`]: crate::printer::errorlog::ErrorLog

use std::fmt;

#[allow(unused_imports)]
use ::si_trace_print::{def1n, def1o, def1x, defn, defo, defx, defñ};

use crate::common::{Count, FPath, FseError};
use crate::data::container::Container;
use crate::data::datehint::{DateHint, DateHintP};
use crate::data::pageheader::PageHeader;
use crate::printer::errorlog::ErrorLog;
use crate::printer::recordwriter::RecordSink;
use crate::readers::helpers::join_dir_file;
use crate::readers::pagelocator::{locate_pages, Page, Pages};
use crate::readers::recordscanner::{RecordScanner, ScanResult};
use crate::readers::summary::ContainerStats;

/// Decodes every record of one [`Container`].
pub struct ContainerProcessor<'a> {
    container: &'a Container,
    /// Identifies the container in error log entries.
    source: FPath,
    stats: ContainerStats,
    /// parse order of the last valid record
    parse_order: Count,
}

impl fmt::Debug for ContainerProcessor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ContainerProcessor")
            .field("source", &self.source)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a> ContainerProcessor<'a> {
    pub fn new(container: &'a Container) -> ContainerProcessor<'a> {
        let info = container.info();
        let source: FPath = join_dir_file(&info.dir_path, &info.file_name);

        ContainerProcessor {
            container,
            source,
            stats: ContainerStats::default(),
            parse_order: 0,
        }
    }

    /// The `source` used in error log entries.
    pub fn source(&self) -> &FPath {
        &self.source
    }

    /// Decode the container. Valid records go to `sink`, failures go to
    /// `errlog`.
    ///
    /// Returns `Err` only for failures of the whole container, i.e.
    /// [`FseError::NoPagesFound`] and [`FseError::Output`]; those are also
    /// logged to `errlog`. Page and record failures are logged and
    /// counted in the returned [`ContainerStats`].
    pub fn process(
        mut self,
        sink: &mut dyn RecordSink,
        errlog: &mut dyn ErrorLog,
    ) -> Result<ContainerStats, FseError> {
        def1n!("({:?})", self.container);
        let buffer: &[u8] = self.container.bytes();

        let date_hint: DateHintP = DateHintP::new(DateHint::extract(buffer));
        def1o!("date_hint {}", date_hint);

        let pages: Pages = match locate_pages(buffer) {
            Ok(pages) => pages,
            Err(err) => {
                errlog.log_error(&self.source, &err);
                def1x!("return Err({})", err);
                return Err(err);
            }
        };
        self.stats.pages_found = pages.len() as Count;

        for page in pages.iter() {
            if let Err(err) = self.process_page(page, &date_hint, sink, errlog) {
                errlog.log_error(&self.source, &err);
                def1x!("return Err({})", err);
                return Err(err);
            }
        }
        debug_assert!(self.stats.is_consistent(), "inconsistent {:?}", self.stats);
        def1x!("return Ok({:?})", self.stats);

        Ok(self.stats)
    }

    /// Decode one page. Returns `Err` only if `sink` fails.
    fn process_page(
        &mut self,
        page: &Page,
        date_hint: &DateHintP,
        sink: &mut dyn RecordSink,
        errlog: &mut dyn ErrorLog,
    ) -> Result<(), FseError> {
        defn!("({:?})", page);
        let page_b: &[u8] = page.slice(self.container.bytes());
        let header: PageHeader = match PageHeader::parse(
            page_b,
            page.fileoffset(),
            self.container.max_wd(),
        ) {
            Ok(val) => val,
            Err(err) => {
                errlog.log_error(&self.source, &err);
                self.stats.pages_skipped += 1;
                defx!("skip page, {}", err);
                return Ok(());
            }
        };
        if !header.has_magic() {
            crate::debug_panic!("page {:?} does not begin with the magic", page);
        }

        let mut scanner = RecordScanner::new(
            page_b,
            page.fileoffset(),
            header,
            date_hint.clone(),
            self.container.info().clone(),
            self.parse_order,
        );
        for result in scanner.by_ref() {
            match result {
                ScanResult::Found(record) => {
                    if let Err(err) = sink.write_record(&record) {
                        defx!("sink.write_record() failed {}", err);
                        return Err(FseError::Output { source: err });
                    }
                    self.stats.records_emitted += 1;
                }
                ScanResult::Err(err) => {
                    match err {
                        FseError::InvalidWatchDescriptor { .. } => {
                            self.stats.records_rejected += 1;
                        }
                        _ => {
                            self.stats.records_errored += 1;
                        }
                    }
                    errlog.log_error(&self.source, &err);
                }
            }
        }
        self.stats.records_attempted += scanner.records_attempted();
        self.stats.bytes_dropped += scanner.bytes_dropped() as Count;
        self.parse_order = scanner.parse_order();
        defx!("parse_order {}", self.parse_order);

        Ok(())
    }
}
