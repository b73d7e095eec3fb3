// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-suite working state
//!
//! A [`SuiteState`] is created when a suite starts and collects everything
//! the report needs: which tests ran and for how long, which of them raised
//! errors, and the pass/fail counters.
//!
//! Parameterized tests run the same method several times within one suite.
//! Each start of a method bumps its occurrence count, and the report name is
//! the bare method name for the first run and `method[N]` for the Nth.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::junit::{SuiteReport, TestCaseReport};
use crate::timestamp::Timestamp;

/// An error raised by a test, possibly spanning several log lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestError {
    /// Error message, including any continuation lines
    pub message: String,
    /// Source location the error was reported at
    pub location: String,
}

/// Report name for the `count`th occurrence of `method`
///
/// Only a count of exactly one yields the bare name. A method that was never
/// started in this suite has a count of zero and resolves to `method[0]`.
#[must_use]
pub fn display_name(method: &str, count: u32) -> String {
    if count == 1 {
        method.to_string()
    } else {
        format!("{method}[{count}]")
    }
}

/// Accumulated state of the suite currently being run
#[derive(Debug, Clone)]
pub struct SuiteState {
    started_at: Timestamp,
    occurrences: HashMap<String, u32>,
    results: IndexMap<String, f64>,
    errors: HashMap<String, TestError>,
    passed: usize,
    failed: usize,
    ended: bool,
    failing_test: Option<String>,
}

impl SuiteState {
    /// Create a fresh state for a suite that started at `started_at`
    #[must_use]
    pub fn new(started_at: Timestamp) -> Self {
        Self {
            started_at,
            occurrences: HashMap::new(),
            results: IndexMap::new(),
            errors: HashMap::new(),
            passed: 0,
            failed: 0,
            ended: false,
            failing_test: None,
        }
    }

    /// Record the start of `method` and return its report name
    pub fn start_test(&mut self, method: &str) -> String {
        let count = self.occurrences.entry(method.to_string()).or_insert(0);
        *count += 1;
        display_name(method, *count)
    }

    /// Report name of the most recent occurrence of `method`
    #[must_use]
    pub fn resolve(&self, method: &str) -> String {
        display_name(method, self.occurrences.get(method).copied().unwrap_or(0))
    }

    /// Record a passing run of `method`
    pub fn record_pass(&mut self, method: &str, duration: f64) -> String {
        let name = self.resolve(method);
        self.results.insert(name.clone(), duration);
        self.passed += 1;
        self.failing_test = None;
        name
    }

    /// Record a failing run of `method`
    pub fn record_failure(&mut self, method: &str, duration: f64) -> String {
        let name = self.resolve(method);
        self.results.insert(name.clone(), duration);
        self.failed += 1;
        self.failing_test = None;
        name
    }

    /// Record an error raised by `method`
    ///
    /// The test becomes the target of subsequent continuation lines until
    /// its pass/fail line is seen.
    pub fn record_error(&mut self, method: &str, message: String, location: String) -> String {
        let name = self.resolve(method);
        self.errors
            .insert(name.clone(), TestError { message, location });
        self.failing_test = Some(name.clone());
        name
    }

    /// Append an unrecognised line to the message of the failing test
    ///
    /// Returns the test's report name, or `None` if no error is pending.
    pub fn append_continuation(&mut self, text: &str) -> Option<&str> {
        let name = self.failing_test.as_deref()?;
        let error = self.errors.get_mut(name)?;
        error.message.push_str(text);
        Some(name)
    }

    /// Report name of the test whose error is collecting continuation lines
    #[must_use]
    pub fn failing_test(&self) -> Option<&str> {
        self.failing_test.as_deref()
    }

    /// Number of passed tests
    #[must_use]
    pub fn passed(&self) -> usize {
        self.passed
    }

    /// Number of failed tests
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Whether the suite's report has already been produced
    #[must_use]
    pub fn has_ended(&self) -> bool {
        self.ended
    }

    /// Error recorded for a report name, if any
    #[must_use]
    pub fn error(&self, name: &str) -> Option<&TestError> {
        self.errors.get(name)
    }

    /// Duration recorded for a report name, if the test finished
    #[must_use]
    pub fn result(&self, name: &str) -> Option<f64> {
        self.results.get(name).copied()
    }

    /// Close the suite and build its report
    ///
    /// Returns `None` if the suite was already closed. Errors recorded for
    /// tests that never passed or failed are not reported.
    pub fn finish(
        &mut self,
        name: &str,
        finished_at: &Timestamp,
        hostname: &str,
    ) -> Option<SuiteReport> {
        if self.ended {
            return None;
        }
        self.ended = true;

        let cases = self
            .results
            .iter()
            .map(|(case_name, &time)| TestCaseReport {
                name: case_name.clone(),
                time,
                failure: self.errors.get(case_name).cloned(),
            })
            .collect();

        Some(SuiteReport {
            name: name.to_string(),
            hostname: hostname.to_string(),
            failures: self.failed,
            tests: self.passed + self.failed,
            time: finished_at.seconds_since(&self.started_at),
            timestamp: finished_at.as_str().to_string(),
            cases,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SuiteState {
        SuiteState::new(Timestamp::parse("2012-03-21 10:25:54 +0000").expect("timestamp"))
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("testFoo", 1), "testFoo");
        assert_eq!(display_name("testFoo", 2), "testFoo[2]");
        assert_eq!(display_name("testFoo", 10), "testFoo[10]");
    }

    #[test]
    fn test_display_name_for_unstarted_method() {
        // Never-started methods have a zero count and are not the first run
        assert_eq!(display_name("testFoo", 0), "testFoo[0]");
        assert_eq!(state().resolve("testFoo"), "testFoo[0]");
    }

    #[test]
    fn test_start_test_numbers_occurrences() {
        let mut suite = state();
        assert_eq!(suite.start_test("testX"), "testX");
        assert_eq!(suite.start_test("testY"), "testY");
        assert_eq!(suite.start_test("testX"), "testX[2]");
        assert_eq!(suite.start_test("testX"), "testX[3]");
        assert_eq!(suite.resolve("testX"), "testX[3]");
        assert_eq!(suite.resolve("testY"), "testY");
    }

    #[test]
    fn test_pass_and_fail_use_latest_occurrence() {
        let mut suite = state();
        suite.start_test("testX");
        assert_eq!(suite.record_pass("testX", 0.1), "testX");
        suite.start_test("testX");
        assert_eq!(suite.record_failure("testX", 0.2), "testX[2]");

        assert_eq!(suite.passed(), 1);
        assert_eq!(suite.failed(), 1);
        assert_eq!(suite.result("testX"), Some(0.1));
        assert_eq!(suite.result("testX[2]"), Some(0.2));
    }

    #[test]
    fn test_continuation_lines_extend_message() {
        let mut suite = state();
        suite.start_test("testY");
        suite.record_error("testY", "boom".to_string(), "Foo.m:1".to_string());
        assert_eq!(suite.failing_test(), Some("testY"));

        assert_eq!(suite.append_continuation(" more"), Some("testY"));
        assert_eq!(suite.append_continuation(" detail"), Some("testY"));

        let error = suite.error("testY").expect("error recorded");
        assert_eq!(error.message, "boom more detail");
        assert_eq!(error.location, "Foo.m:1");
    }

    #[test]
    fn test_failure_clears_failing_test() {
        let mut suite = state();
        suite.start_test("testY");
        suite.record_error("testY", "boom".to_string(), "Foo.m:1".to_string());
        suite.record_failure("testY", 0.01);

        assert_eq!(suite.failing_test(), None);
        assert_eq!(suite.append_continuation("ignored"), None);
        assert_eq!(suite.error("testY").map(|e| e.message.as_str()), Some("boom"));
    }

    #[test]
    fn test_pass_clears_failing_test() {
        let mut suite = state();
        suite.start_test("testY");
        suite.record_error("testY", "boom".to_string(), "Foo.m:1".to_string());
        suite.record_pass("testY", 0.01);

        assert_eq!(suite.failing_test(), None);
        assert_eq!(suite.append_continuation("trace"), None);
        assert_eq!(suite.error("testY").map(|e| e.message.as_str()), Some("boom"));
    }

    #[test]
    fn test_second_error_replaces_first() {
        let mut suite = state();
        suite.start_test("testY");
        suite.record_error("testY", "first".to_string(), "Foo.m:1".to_string());
        suite.append_continuation(" detail");
        suite.record_error("testY", "second".to_string(), "Foo.m:7".to_string());

        let error = suite.error("testY").expect("error recorded");
        assert_eq!(error.message, "second");
        assert_eq!(error.location, "Foo.m:7");
        assert_eq!(suite.failing_test(), Some("testY"));
    }

    #[test]
    fn test_continuation_without_error_is_dropped() {
        let mut suite = state();
        assert_eq!(suite.append_continuation("noise"), None);
    }

    #[test]
    fn test_finish_builds_report_once() {
        let mut suite = state();
        suite.start_test("testA");
        suite.record_pass("testA", 0.2);
        let end = Timestamp::parse("2012-03-21 10:25:56 +0000").expect("timestamp");

        let report = suite
            .finish("MathTests", &end, "build-host")
            .expect("first finish produces a report");
        assert_eq!(report.name, "MathTests");
        assert_eq!(report.hostname, "build-host");
        assert_eq!(report.tests, 1);
        assert_eq!(report.failures, 0);
        assert_eq!(report.time, 2.0);
        assert_eq!(report.timestamp, "2012-03-21 10:25:56 +0000");
        assert_eq!(report.cases.len(), 1);
        assert!(suite.has_ended());

        assert!(suite.finish("MathTests", &end, "build-host").is_none());
    }

    #[test]
    fn test_finish_drops_errors_without_result() {
        let mut suite = state();
        suite.start_test("testOrphan");
        suite.record_error("testOrphan", "lost".to_string(), "Foo.m:9".to_string());
        let end = Timestamp::parse("2012-03-21 10:25:54 +0000").expect("timestamp");

        let report = suite.finish("MathTests", &end, "host").expect("report");
        assert!(report.cases.is_empty());
        assert_eq!(report.tests, 0);
    }
}
