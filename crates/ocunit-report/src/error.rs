// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for ocunit-report

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting a test log into reports
///
/// Test failures in the log are data, not errors. Only failures of the
/// converter itself end up here, and none of them are retried.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Error reading the input stream
    #[error("IO error reading test log: {0}")]
    Read(#[source] std::io::Error),

    /// Error echoing a line to the transcript
    #[error("IO error echoing test log: {0}")]
    Echo(#[source] std::io::Error),

    /// The output directory could not be wiped or created
    #[error("Failed to prepare output directory {}: {source}", path.display())]
    OutputDir {
        /// Directory that was being prepared
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A report file could not be written
    #[error("Failed to write report {}: {source}", path.display())]
    WriteReport {
        /// File that was being written
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}
