// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Suite timestamps and duration formatting
//!
//! OCUnit and XCTest print suite boundaries as local wall-clock times, e.g.
//! `2012-03-21 10:25:54 +0000` or `2013-05-15 18:39:06.283`. A [`Timestamp`]
//! keeps both the parsed instant (for computing suite durations) and the
//! text exactly as it appeared (for the report's `timestamp` attribute).

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// Formats tried, in order, for timestamps carrying a UTC offset
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f %z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Formats tried, in order, for timestamps without an offset (read as UTC)
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// A point in time as printed by the test runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    instant: DateTime<FixedOffset>,
    text: String,
}

impl Timestamp {
    /// Parse a timestamp as printed in a suite start/finish line
    ///
    /// Surrounding whitespace is ignored. Returns `None` when the text is
    /// not in any recognised form.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let instant = parse_instant(text)?;
        Some(Self {
            instant,
            text: text.to_string(),
        })
    }

    /// The parsed instant
    #[must_use]
    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.instant
    }

    /// The timestamp text as it appeared in the log
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Fractional seconds elapsed from `earlier` to `self`
    ///
    /// Negative when `earlier` is actually later.
    #[must_use]
    pub fn seconds_since(&self, earlier: &Timestamp) -> f64 {
        let delta = self.instant - earlier.instant;
        match delta.num_nanoseconds() {
            Some(nanos) => nanos as f64 / 1_000_000_000.0,
            None => delta.num_milliseconds() as f64 / 1_000.0,
        }
    }
}

fn parse_instant(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant);
    }
    for format in OFFSET_FORMATS {
        if let Ok(instant) = DateTime::parse_from_str(text, format) {
            return Some(instant);
        }
    }
    NAIVE_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(text, format)
            .ok()
            .map(|naive| naive.and_utc().fixed_offset())
    })
}

/// Render a number of seconds the way JUnit consumers expect it
///
/// Uses the shortest decimal form that round-trips, and always keeps a
/// fractional part: `0.2` stays `0.2`, `1` becomes `1.0`.
#[must_use]
pub fn format_seconds(seconds: f64) -> String {
    if seconds.is_finite() && seconds.fract() == 0.0 {
        format!("{seconds:.1}")
    } else {
        seconds.to_string()
    }
}
