// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Line classification for OCUnit/XCTest output
//!
//! Every line of a test log is mapped to exactly one [`Event`]. The rules are
//! tried in a fixed priority order and the first one that matches (and whose
//! fields parse) wins; anything else is [`Event::Unclassified`].
//!
//! Classification is stateless. Method names are returned as they appear in
//! the log; turning them into report names depends on per-suite state and is
//! done by the [`Accumulator`](crate::accumulator::Accumulator).
//!
//! # Example
//!
//! ```
//! use ocunit_report::event::{Event, classify};
//!
//! let event = classify("Test Case '-[MathTests testAdd]' passed (0.004 seconds).");
//! assert_eq!(
//!     event,
//!     Event::TestPassed { method: "testAdd".to_string(), duration: 0.004 }
//! );
//! ```

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::timestamp::Timestamp;

/// A classified log line
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// `Test Suite '<name>' started at <timestamp>`
    SuiteStarted {
        /// When the suite started
        started_at: Timestamp,
    },
    /// `Test Suite '<name>' finished at <timestamp>.`
    SuiteFinished {
        /// Raw suite name
        name: String,
        /// When the suite finished
        finished_at: Timestamp,
    },
    /// `Test Case '-[<class> <method>]' started.`
    TestStarted {
        /// Raw method name
        method: String,
    },
    /// `Test Case '-[<class> <method>]' passed (<duration> seconds)`
    TestPassed {
        /// Raw method name
        method: String,
        /// Duration in seconds
        duration: f64,
    },
    /// `Test Case '-[<class> <method>]' failed (<duration> seconds)`
    TestFailed {
        /// Raw method name
        method: String,
        /// Duration in seconds
        duration: f64,
    },
    /// `<location>: error: -[<class> <method>] : <message>`
    ErrorReported {
        /// Source location, usually `file:line`
        location: String,
        /// Raw method name
        method: String,
        /// First line of the error message
        message: String,
    },
    /// `... failed with exit code <N>`
    ExitCodeReported {
        /// Exit code reported by the build
        code: i32,
    },
    /// `BUILD FAILED` anywhere in the line
    BuildFailed,
    /// None of the rules matched
    Unclassified {
        /// The line as given
        text: String,
    },
}

impl Event {
    /// Short name of the event kind, used in log output
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SuiteStarted { .. } => "suite-started",
            Self::SuiteFinished { .. } => "suite-finished",
            Self::TestStarted { .. } => "test-started",
            Self::TestPassed { .. } => "test-passed",
            Self::TestFailed { .. } => "test-failed",
            Self::ErrorReported { .. } => "error-reported",
            Self::ExitCodeReported { .. } => "exit-code-reported",
            Self::BuildFailed => "build-failed",
            Self::Unclassified { .. } => "unclassified",
        }
    }
}

// ============================================================================
// Rules
// ============================================================================

/// Builds an event from a rule's captures; `None` lets the next rule try
type Build = fn(&Captures<'_>) -> Option<Event>;

struct Rule {
    pattern: Regex,
    build: Build,
}

impl Rule {
    fn new(pattern: &str, build: Build) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("valid regex"),
            build,
        }
    }
}

/// Classification rules in priority order
static RULES: LazyLock<[Rule; 8]> = LazyLock::new(|| {
    [
        Rule::new(r"Test Suite '(\S+)'.*started at\s+(.*)", |caps| {
            let started_at = parse_timestamp(&caps[2])?;
            Some(Event::SuiteStarted { started_at })
        }),
        // The finish timestamp is followed by a sentence-ending period
        Rule::new(r"Test Suite '(\S+)'.*finished at\s+(.+?)\.?\s*$", |caps| {
            let finished_at = parse_timestamp(&caps[2])?;
            Some(Event::SuiteFinished {
                name: caps[1].to_string(),
                finished_at,
            })
        }),
        Rule::new(r"Test Case '-\[\S+\s+(\S+)\]' started.", |caps| {
            Some(Event::TestStarted {
                method: caps[1].to_string(),
            })
        }),
        Rule::new(
            r"Test Case '-\[\S+\s+(\S+)\]' passed \((.*) seconds\)",
            |caps| {
                Some(Event::TestPassed {
                    method: caps[1].to_string(),
                    duration: parse_duration(&caps[2]),
                })
            },
        ),
        Rule::new(
            r"Test Case '-\[\S+\s+(\S+)\]' failed \((\S+) seconds\)",
            |caps| {
                Some(Event::TestFailed {
                    method: caps[1].to_string(),
                    duration: parse_duration(&caps[2]),
                })
            },
        ),
        Rule::new(r"(.*): error: -\[(\S+) (\S+)\] : (.*)", |caps| {
            Some(Event::ErrorReported {
                location: caps[1].to_string(),
                method: caps[3].to_string(),
                message: caps[4].to_string(),
            })
        }),
        Rule::new(r"failed with exit code (\d+)", |caps| {
            let code = caps[1].parse().ok()?;
            Some(Event::ExitCodeReported { code })
        }),
        Rule::new(r"BUILD FAILED", |_| Some(Event::BuildFailed)),
    ]
});

fn parse_timestamp(text: &str) -> Option<Timestamp> {
    let timestamp = Timestamp::parse(text);
    if timestamp.is_none() {
        warn!(text, "unrecognised suite timestamp, line ignored");
    }
    timestamp
}

/// Durations that are not finite numbers count as zero seconds
fn parse_duration(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|duration| duration.is_finite())
        .unwrap_or_else(|| {
            debug!(text, "unrecognised test duration");
            0.0
        })
}

/// Classify a single log line
///
/// The line should not include its line terminator.
#[must_use]
pub fn classify(line: &str) -> Event {
    RULES
        .iter()
        .filter_map(|rule| rule.pattern.captures(line).map(|caps| (rule, caps)))
        .find_map(|(rule, caps)| (rule.build)(&caps))
        .unwrap_or_else(|| Event::Unclassified {
            text: line.to_string(),
        })
}
