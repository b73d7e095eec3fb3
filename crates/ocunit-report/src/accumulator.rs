// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Suite accumulator
//!
//! The [`Accumulator`] applies classified events, in log order, to the state
//! of the suite currently running. When a suite finishes it hands back a
//! [`SuiteReport`]; writing it anywhere is up to the caller.
//!
//! ```
//! use ocunit_report::accumulator::Accumulator;
//! use ocunit_report::event::classify;
//!
//! let mut acc = Accumulator::new("ci-mac");
//! let log = [
//!     "Test Suite 'MathTests' started at 2012-03-21 10:25:54 +0000",
//!     "Test Case '-[MathTests testAdd]' started.",
//!     "Test Case '-[MathTests testAdd]' passed (0.001 seconds).",
//!     "Test Suite 'MathTests' finished at 2012-03-21 10:25:55 +0000.",
//! ];
//! let reports: Vec<_> = log.iter().filter_map(|line| acc.apply(classify(line))).collect();
//! assert_eq!(reports.len(), 1);
//! assert_eq!(reports[0].tests, 1);
//! ```

use tracing::{debug, warn};

use crate::event::Event;
use crate::junit::SuiteReport;
use crate::suite::SuiteState;

/// Exit code reported for a `BUILD FAILED` line
pub const BUILD_FAILED_EXIT_CODE: i32 = -1;

/// Applies events to the running suite and tracks the build's exit code
#[derive(Debug, Clone)]
pub struct Accumulator {
    hostname: String,
    suite: Option<SuiteState>,
    exit_code: i32,
}

impl Accumulator {
    /// Create an accumulator whose reports carry `hostname`
    #[must_use]
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            suite: None,
            exit_code: 0,
        }
    }

    /// Host name written into every report
    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Exit code the build reported, `0` if it reported none
    ///
    /// The last `exit code N` or `BUILD FAILED` line wins.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// The suite that is currently collecting events, if any
    #[must_use]
    pub fn active_suite(&self) -> Option<&SuiteState> {
        self.suite.as_ref().filter(|suite| !suite.has_ended())
    }

    fn active_suite_mut(&mut self, kind: &'static str) -> Option<&mut SuiteState> {
        let suite = self.suite.as_mut().filter(|suite| !suite.has_ended());
        if suite.is_none() {
            warn!(event = kind, "no active test suite, ignoring event");
        }
        suite
    }

    /// Apply one event
    ///
    /// Returns the finished suite's report the first time that suite's
    /// finish line is seen.
    pub fn apply(&mut self, event: Event) -> Option<SuiteReport> {
        let kind = event.kind();
        match event {
            Event::SuiteStarted { started_at } => {
                match self.active_suite() {
                    Some(live) if live.passed() + live.failed() > 0 => {
                        warn!(
                            tests = live.passed() + live.failed(),
                            "test suite started before the previous one finished, discarding it"
                        );
                    }
                    // An enclosing bundle suite is still open when its first inner suite starts
                    Some(_) => debug!("nested test suite started, discarding the empty outer one"),
                    None => {}
                }
                debug!(started_at = started_at.as_str(), "test suite started");
                self.suite = Some(SuiteState::new(started_at));
                None
            }
            Event::SuiteFinished { name, finished_at } => {
                let Some(suite) = self.suite.as_mut() else {
                    debug!(suite = %name, "finish without a started suite, ignoring");
                    return None;
                };
                let report = suite.finish(&name, &finished_at, &self.hostname);
                if report.is_none() {
                    debug!(suite = %name, "suite already finished, ignoring duplicate");
                }
                report
            }
            Event::TestStarted { method } => {
                let name = self.active_suite_mut(kind)?.start_test(&method);
                debug!(test = %name, "test started");
                None
            }
            Event::TestPassed { method, duration } => {
                let name = self.active_suite_mut(kind)?.record_pass(&method, duration);
                debug!(test = %name, duration, "test passed");
                None
            }
            Event::TestFailed { method, duration } => {
                let name = self
                    .active_suite_mut(kind)?
                    .record_failure(&method, duration);
                debug!(test = %name, duration, "test failed");
                None
            }
            Event::ErrorReported {
                location,
                method,
                message,
            } => {
                let name = self
                    .active_suite_mut(kind)?
                    .record_error(&method, message, location);
                debug!(test = %name, "test reported an error");
                None
            }
            Event::Unclassified { text } => {
                let suite = self.suite.as_mut().filter(|suite| !suite.has_ended())?;
                if let Some(name) = suite.append_continuation(&text) {
                    debug!(test = name, "continuation of error message");
                }
                None
            }
            Event::ExitCodeReported { code } => {
                debug!(code, "build reported exit code");
                self.exit_code = code;
                None
            }
            Event::BuildFailed => {
                debug!("build failed");
                self.exit_code = BUILD_FAILED_EXIT_CODE;
                None
            }
        }
    }
}
