// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! ocunit-report: OCUnit/XCTest log conversion to JUnit XML
//!
//! This library crate turns the textual output of an Objective-C unit-test
//! run into one JUnit XML report per test suite, in a single forward pass
//! over the log.
//!
//! # Example
//!
//! ```
//! use ocunit_report::prelude::*;
//!
//! let log = "\
//! Test Suite 'MathTests' started at 2012-03-21 10:25:54 +0000
//! Test Case '-[MathTests testAdd]' started.
//! Test Case '-[MathTests testAdd]' passed (0.001 seconds).
//! Test Suite 'MathTests' finished at 2012-03-21 10:25:55 +0000.
//! ";
//!
//! let mut accumulator = Accumulator::new("ci-mac");
//! let mut reports: Vec<SuiteReport> = Vec::new();
//! let summary = convert(log.as_bytes(), std::io::sink(), &mut accumulator, &mut reports)?;
//!
//! assert_eq!(summary.reports, 1);
//! assert_eq!(reports[0].file_name(), "TEST-MathTests.xml");
//! # Ok::<(), ReportError>(())
//! ```

#![warn(missing_docs)]

pub mod accumulator;
pub mod error;
pub mod event;
pub mod junit;
pub mod stream;
pub mod suite;
pub mod timestamp;

#[cfg(test)]
mod test_support;

pub use accumulator::Accumulator;
pub use error::ReportError;
pub use event::{Event, classify};
pub use junit::{SuiteReport, TestCaseReport};
pub use stream::{ReportSink, RunSummary, convert};
pub use suite::{SuiteState, TestError};
pub use timestamp::Timestamp;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::accumulator::Accumulator;
    pub use crate::error::ReportError;
    pub use crate::junit::SuiteReport;
    pub use crate::stream::{ReportSink, RunSummary, convert};
}
