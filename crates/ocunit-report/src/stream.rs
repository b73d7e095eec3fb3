// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Single-pass conversion of a test log
//!
//! [`convert`] reads the log line by line, echoes each line unchanged, and
//! feeds it through classification and the [`Accumulator`]. Finished suites
//! are handed to a [`ReportSink`] as soon as their finish line is read.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::accumulator::Accumulator;
use crate::error::ReportError;
use crate::event::classify;
use crate::junit::SuiteReport;

/// Destination for finished suite reports
pub trait ReportSink {
    /// Store one report
    ///
    /// # Errors
    ///
    /// Returns `ReportError::WriteReport` if the report cannot be stored.
    fn write_report(&mut self, report: &SuiteReport) -> Result<(), ReportError>;
}

/// Collects reports in memory
impl ReportSink for Vec<SuiteReport> {
    fn write_report(&mut self, report: &SuiteReport) -> Result<(), ReportError> {
        self.push(report.clone());
        Ok(())
    }
}

/// Totals for one conversion run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Lines read from the input
    pub lines: usize,
    /// Reports handed to the sink
    pub reports: usize,
    /// Exit code reported by the build
    pub exit_code: i32,
}

/// Convert a whole test log
///
/// Every input line, terminator included, is written to `echo` and flushed
/// before it is interpreted. Input that is not valid UTF-8 is echoed as-is
/// and decoded lossily for classification.
///
/// # Errors
///
/// Returns an error if reading the input, echoing a line, or storing a
/// report fails. Nothing is retried.
pub fn convert<R, W, S>(
    mut input: R,
    mut echo: W,
    accumulator: &mut Accumulator,
    sink: &mut S,
) -> Result<RunSummary, ReportError>
where
    R: BufRead,
    W: Write,
    S: ReportSink + ?Sized,
{
    let mut summary = RunSummary::default();
    let mut raw = Vec::new();

    loop {
        raw.clear();
        if input.read_until(b'\n', &mut raw).map_err(ReportError::Read)? == 0 {
            break;
        }
        summary.lines += 1;

        echo.write_all(&raw).map_err(ReportError::Echo)?;
        echo.flush().map_err(ReportError::Echo)?;

        let line = String::from_utf8_lossy(strip_terminator(&raw));
        if let Some(report) = accumulator.apply(classify(&line)) {
            sink.write_report(&report)?;
            info!(
                suite = %report.name,
                tests = report.tests,
                failures = report.failures,
                "wrote test suite report"
            );
            summary.reports += 1;
        }
    }

    summary.exit_code = accumulator.exit_code();
    debug!(
        lines = summary.lines,
        reports = summary.reports,
        exit_code = summary.exit_code,
        "finished reading test log"
    );
    Ok(summary)
}

fn strip_terminator(raw: &[u8]) -> &[u8] {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    line.strip_suffix(b"\r").unwrap_or(line)
}
