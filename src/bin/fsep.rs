// src/bin/fsep.rs

//! Driver program _fsep_ drives the [_fseplib_].
//!
//! Processes user-passed command-line arguments.
//! Then processes paths passed; directories are enumerated one level deep
//! for files, other paths are tested for suitability (does it exist? is it
//! a file?).
//!
//! A pool of file processing threads pulls file paths from a job
//! [channel]. Each file processing thread loads one file as a
//! [`Container`] and drives a [`ContainerProcessor`] over it. Each decoded
//! [`FseRecord`] and each [`ErrorLogEntry`] is sent in a [`ChanDatum`] to
//! the main thread. When a file is done, a [`ContainerSummary`] is sent.
//!
//! The main thread is the only writer of the record file, the SQLite
//! database, the exceptions log, and STDOUT.
//!
//! [_fseplib_]: fseplib
//! [channel]: crossbeam_channel
//! [`Container`]: fseplib::data::container::Container
//! [`ContainerProcessor`]: fseplib::readers::containerprocessor::ContainerProcessor
//! [`FseRecord`]: fseplib::data::record::FseRecord
//! [`ErrorLogEntry`]: fseplib::printer::errorlog::ErrorLogEntry
//! [`ContainerSummary`]: fseplib::readers::summary::ContainerSummary

#![allow(non_camel_case_types)]

use std::fmt;
use std::io::{Error, ErrorKind, Result as IoResult};
use std::process::ExitCode;
use std::thread;
use std::time::Instant;

use ::anyhow::Context;
use ::clap::Parser;
use ::const_format::concatcp;
use ::crossbeam_channel;
#[allow(unused_imports)]
use ::si_trace_print::{def1n, def1o, def1x, def1ñ, defn, defo, defx, defñ};

use ::fseplib::common::{Count, FPath, FPaths, FileSz};
use ::fseplib::data::container::Container;
use ::fseplib::data::record::FseRecord;
use ::fseplib::debug::printers::{de_err, e_err, e_wrn};
use ::fseplib::printer::errorlog::{ErrorLog, ErrorLogEntry, FileErrorLog, FILENAME_EXCEPTIONS};
use ::fseplib::printer::printers::write_stdout_line;
use ::fseplib::printer::recordwriter::{RecordSink, TsvRecordWriter, FILENAME_RECORDS};
use ::fseplib::printer::sqlitewriter::{SqliteRecordSink, FILENAME_SQLITE};
use ::fseplib::readers::containerprocessor::ContainerProcessor;
use ::fseplib::readers::containersource::{enumerate_paths, load_container, ProcessPathResults};
use ::fseplib::readers::helpers::{basename, join_dir_file};
use ::fseplib::readers::summary::{ContainerStats, ContainerSummary, RunSummary};

// --------------------
// command-line parsing

const CLI_HELP_AFTER: &str = concatcp!(
    "Output files written to OUTPUT_DIR:
  ", FILENAME_RECORDS, "
  ", FILENAME_SQLITE, "
  ", FILENAME_EXCEPTIONS, "

Directories are enumerated one level deep. Each file may be gzip compressed
(allocated fsevents files) or not (carved fsevents files).

Records of one file are written in parse order. With more than one job, the
records of different files may interleave; pass \"--jobs 1\" for output
ordered by file name."
);

#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "fsep",
    // write expanded information for the `--version` output
    version = concatcp!(
        "(FSEvents Parser)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Author: ", env!("CARGO_PKG_AUTHORS"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Path(s) of fsevents files or directories of fsevents files.
    /// Directories are not recursed. Symlinks will be followed.
    #[clap(required = true, verbatim_doc_comment)]
    paths: Vec<String>,

    /// Directory where output files are written. Created if needed.
    #[clap(short = 'o', long, default_value = ".", verbatim_doc_comment)]
    output_dir: String,

    /// Count of file processing threads.
    /// Default is the available parallelism of this system.
    #[clap(
        short = 'j',
        long,
        verbatim_doc_comment,
        value_parser = clap::value_parser!(u16).range(1..),
    )]
    jobs: Option<u16>,

    /// Print a summary of each file processed and timing.
    #[clap(short = 's', long)]
    summary: bool,
}

/// Return the count of file processing threads to create.
fn cli_jobs(jobs: Option<u16>, file_count: usize) -> usize {
    let jobs: usize = match jobs {
        Some(val) => val as usize,
        None => match thread::available_parallelism() {
            Ok(val) => val.get(),
            Err(_err) => {
                de_err!("available_parallelism() failed {}", _err);
                1
            }
        },
    };

    jobs.min(file_count).max(1)
}

/// Process the user-passed command-line arguments.
/// Start function `processing_loop`.
/// Determine a process return code.
pub fn main() -> ExitCode {
    let start_time = Instant::now();
    defn!();

    let args = CLI_Args::parse();
    defo!("args {:?}", args);

    let (files, errs): (FPaths, ProcessPathResults) = enumerate_paths(&args.paths);
    for err in errs.iter() {
        e_err!("{}", err);
    }
    if files.is_empty() {
        e_err!("no usable files found");
        defx!("no files");
        return ExitCode::FAILURE;
    }

    let exitcode = match processing_loop(files, &args.output_dir, args.jobs, args.summary, start_time) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            e_err!("{:#}", err);
            ExitCode::FAILURE
        }
    };
    defx!("exitcode {:?}", exitcode);

    exitcode
}

// -------------------------------------------
// file processing threads and their channels

/// Data sent from a file processing thread to the main thread.
#[derive(Debug)]
enum ChanDatum {
    /// First data sent for a file. Exactly one is sent per file.
    ContainerStart(FPath),
    /// A decoded record, in parse order of its file.
    /// Zero or more of these are sent per file.
    Record(FseRecord),
    /// A failure for the exceptions log.
    /// Zero or more of these are sent per file.
    ErrorEntry(ErrorLogEntry),
    /// Last data sent for a file. Exactly one is sent per file.
    ContainerDone(ContainerSummary),
}

impl fmt::Display for ChanDatum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChanDatum::ContainerStart(path) => write!(f, "ContainerStart({:?})", path),
            ChanDatum::Record(record) => write!(f, "Record({})", record.parse_order),
            ChanDatum::ErrorEntry(entry) => write!(f, "ErrorEntry({})", entry.kind),
            ChanDatum::ContainerDone(summary) => write!(f, "ContainerDone({:?})", summary.path),
        }
    }
}

/// Sender channel (used by each file processing thread).
type ChanSendDatum = crossbeam_channel::Sender<ChanDatum>;

/// Receiver channel (used by the main thread).
type ChanRecvDatum = crossbeam_channel::Receiver<ChanDatum>;

/// Capacity of the data channel. Bounded so fast file processing threads
/// wait on a slow writer.
const CHANNEL_CAPACITY: usize = 1024;

/// Helper to send a [`ChanDatum`] to the main thread.
/// Returns `false` if the main thread hung up.
#[inline(always)]
fn chan_send(
    chan_send_dt: &ChanSendDatum,
    chan_datum: ChanDatum,
    _path: &FPath,
) -> bool {
    def1ñ!("chan_send(…, chan_datum={}, _path={:?})", chan_datum, _path);
    match chan_send_dt.send(chan_datum) {
        Ok(_) => true,
        Err(_err) => {
            de_err!("chan_send_dt.send(…) failed {} for {:?}", _err, _path);
            false
        }
    }
}

/// A [`RecordSink`] that sends each record to the main thread.
struct ChanRecordSink<'a> {
    chan_send_dt: &'a ChanSendDatum,
    path: &'a FPath,
}

impl RecordSink for ChanRecordSink<'_> {
    fn write_record(&mut self, record: &FseRecord) -> IoResult<()> {
        if chan_send(self.chan_send_dt, ChanDatum::Record(record.clone()), self.path) {
            return Ok(());
        }

        Err(Error::new(ErrorKind::BrokenPipe, "record receiver hung up"))
    }
}

/// An [`ErrorLog`] that sends each entry to the main thread.
struct ChanErrorLog<'a> {
    chan_send_dt: &'a ChanSendDatum,
    path: &'a FPath,
}

impl ErrorLog for ChanErrorLog<'_> {
    fn log(&mut self, entry: ErrorLogEntry) {
        chan_send(self.chan_send_dt, ChanDatum::ErrorEntry(entry), self.path);
    }
}

/// Load and decode the file at `path`, sending everything found to the
/// main thread. Always begins by sending [`ChanDatum::ContainerStart`] and
/// ends by sending [`ChanDatum::ContainerDone`].
fn exec_container(
    path: &FPath,
    chan_send_dt: &ChanSendDatum,
) {
    def1n!("({:?})", path);
    if !chan_send(chan_send_dt, ChanDatum::ContainerStart(path.clone()), path) {
        def1x!("main thread hung up");
        return;
    }
    let mut errlog = ChanErrorLog { chan_send_dt, path };

    let container: Container = match load_container(path) {
        Ok(val) => val,
        Err(err) => {
            errlog.log_error(path, &err);
            let summary = ContainerSummary {
                path: path.clone(),
                file_sz: None,
                stats: ContainerStats::default(),
                error: Some(err.to_string()),
            };
            chan_send(chan_send_dt, ChanDatum::ContainerDone(summary), path);
            def1x!("load_container failed {}", err);
            return;
        }
    };
    let file_sz: FileSz = container.len() as FileSz;

    let mut sink = ChanRecordSink { chan_send_dt, path };
    let processor = ContainerProcessor::new(&container);
    let (stats, error): (ContainerStats, Option<String>) = match processor.process(&mut sink, &mut errlog) {
        Ok(stats) => (stats, None),
        Err(err) => (ContainerStats::default(), Some(err.to_string())),
    };
    let summary = ContainerSummary {
        path: path.clone(),
        file_sz: Some(file_sz),
        stats,
        error,
    };
    chan_send(chan_send_dt, ChanDatum::ContainerDone(summary), path);
    def1x!("({:?})", path);
}

/// Thread entry point. Process files from `recv_job` until it is empty.
fn exec_container_thread(
    recv_job: crossbeam_channel::Receiver<FPath>,
    chan_send_dt: ChanSendDatum,
) {
    def1n!();
    for path in recv_job.iter() {
        exec_container(&path, &chan_send_dt);
    }
    def1x!();
}

// -----------------
// main thread loop

/// Print the summary of each file, then the run totals.
fn print_summary(
    summaries: &[ContainerSummary],
    run_summary: &RunSummary,
    start_time: Instant,
) {
    write_stdout_line("");
    write_stdout_line("Files:");
    for summary in summaries.iter() {
        write_stdout_line(&format!("  File: {}", summary.path));
        match summary.file_sz {
            Some(file_sz) => write_stdout_line(&format!("    decompressed size: {}", file_sz)),
            None => write_stdout_line("    decompressed size: unknown"),
        }
        write_stdout_line(&format!("    {}", summary.stats));
        if let Some(error) = &summary.error {
            write_stdout_line(&format!("    Error: {}", error));
        }
    }
    write_stdout_line("");
    write_stdout_line(&format!("Pages Found: {}", run_summary.stats.pages_found));
    write_stdout_line(&format!("Pages Skipped: {}", run_summary.stats.pages_skipped));
    write_stdout_line(&format!("Records Rejected: {}", run_summary.stats.records_rejected));
    write_stdout_line(&format!("Records with Errors: {}", run_summary.stats.records_errored));
    write_stdout_line(&format!("Bytes Dropped: {}", run_summary.stats.bytes_dropped));
    write_stdout_line(&format!("Duration: {:?}", start_time.elapsed()));
}

/// Create the output files, start the file processing threads, and write
/// everything they send.
fn processing_loop(
    files: FPaths,
    output_dir: &str,
    jobs: Option<u16>,
    cli_opt_summary: bool,
    start_time: Instant,
) -> anyhow::Result<RunSummary> {
    defn!("({} files, {:?}, {:?}, {})", files.len(), output_dir, jobs, cli_opt_summary);

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("unable to create output directory {:?}", output_dir))?;
    let path_records: FPath = join_dir_file(output_dir, FILENAME_RECORDS);
    let mut writer = TsvRecordWriter::create(&path_records)
        .with_context(|| format!("unable to create record file {:?}", path_records))?;
    let path_sqlite: FPath = join_dir_file(output_dir, FILENAME_SQLITE);
    let mut sqlite = SqliteRecordSink::create(&path_sqlite)
        .with_context(|| format!("unable to create SQLite database {:?}", path_sqlite))?;
    let path_exceptions: FPath = join_dir_file(output_dir, FILENAME_EXCEPTIONS);
    let mut errlog = FileErrorLog::create(&path_exceptions)
        .with_context(|| format!("unable to create exceptions log {:?}", path_exceptions))?;

    let file_count: usize = files.len();
    let thread_count: usize = cli_jobs(jobs, file_count);
    defo!("thread_count {}", thread_count);

    let (send_job, recv_job) = crossbeam_channel::unbounded::<FPath>();
    for path in files.into_iter() {
        send_job
            .send(path)
            .context("unable to queue file")?;
    }
    drop(send_job);

    let (chan_send_dt, chan_recv_dt): (ChanSendDatum, ChanRecvDatum) = crossbeam_channel::bounded(CHANNEL_CAPACITY);
    let mut threads_started: Count = 0;
    for index in 0..thread_count {
        let recv_job = recv_job.clone();
        let chan_send_dt = chan_send_dt.clone();
        match thread::Builder::new()
            .name(format!("fsep-worker-{}", index))
            .spawn(move || exec_container_thread(recv_job, chan_send_dt))
        {
            Ok(_joinhandle) => {
                threads_started += 1;
            }
            Err(err) => {
                e_err!("thread {} spawn() failed {:?}", index, err);
            }
        }
    }
    // only the file processing threads hold senders; the receive loop ends
    // when all have exited
    drop(chan_send_dt);
    drop(recv_job);
    if threads_started == 0 {
        anyhow::bail!("unable to start any file processing thread");
    }

    let mut run_summary = RunSummary::new();
    let mut summaries: Vec<ContainerSummary> = Vec::with_capacity(file_count);
    let mut write_err: Option<(FPath, Error)> = None;
    for chan_datum in chan_recv_dt.iter() {
        match chan_datum {
            ChanDatum::ContainerStart(path) => {
                write_stdout_line(&format!("Trying\t{}", path));
            }
            ChanDatum::Record(record) => {
                if write_err.is_some() {
                    continue;
                }
                if let Err(err) = writer.write_record(&record) {
                    e_err!("writing to {:?} failed: {}", path_records, err);
                    write_err = Some((path_records.clone(), err));
                    continue;
                }
                if let Err(err) = sqlite.write_record(&record) {
                    e_err!("writing to {:?} failed: {}", path_sqlite, err);
                    write_err = Some((path_sqlite.clone(), err));
                }
            }
            ChanDatum::ErrorEntry(entry) => {
                errlog.log(entry);
            }
            ChanDatum::ContainerDone(summary) => {
                defo!("ContainerDone {:?}", summary.path);
                if let Some(error) = &summary.error {
                    e_wrn!("{}: {}", basename(&summary.path), error);
                }
                run_summary.update(&summary);
                if cli_opt_summary {
                    summaries.push(summary);
                }
            }
        }
    }

    errlog.flush();
    writer
        .flush()
        .with_context(|| format!("unable to flush record file {:?}", path_records))?;
    sqlite
        .flush()
        .with_context(|| format!("unable to commit SQLite database {:?}", path_sqlite))?;
    if let Some((path, err)) = write_err {
        return Err(err).with_context(|| format!("unable to write {:?}", path));
    }

    if cli_opt_summary {
        print_summary(&summaries, &run_summary, start_time);
    }
    write_stdout_line("FINISHED PARSING: See exceptions log for parsing errors.");
    write_stdout_line(&run_summary.to_string());
    defx!("{:?}", run_summary);

    Ok(run_summary)
}
