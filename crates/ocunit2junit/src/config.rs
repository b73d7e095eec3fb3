//! Configuration for the ocunit2junit command
//!
//! Every setting has a default, so a bare `ocunit2junit` reads stdin, writes
//! reports to `test-reports`, and takes the host name from the system.

use std::path::PathBuf;

use clap::Parser;

/// Directory reports are written to when `--output-dir` is not given
pub const DEFAULT_OUTPUT_DIR: &str = "test-reports";

/// ocunit2junit - turn OCUnit/XCTest output into JUnit XML reports
///
/// Pipe xcodebuild through this command. Every line is passed through to
/// stdout unchanged, and one TEST-<suite>.xml report is written per suite.
///
/// Example:
///   xcodebuild test -scheme App | ocunit2junit
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "ocunit2junit")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Log files to read, in order
    ///
    /// Reads stdin when no files are given. Several files are read as one
    /// continuous log.
    pub inputs: Vec<PathBuf>,

    /// Directory to write reports to
    ///
    /// The directory is deleted and recreated empty before the log is read.
    /// Defaults to ./test-reports.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Host name to record in reports
    ///
    /// Defaults to the name of this machine.
    #[arg(long)]
    pub hostname: Option<String>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so stdout stays an exact copy of the input.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Get the report directory, using the default if not specified
    #[must_use]
    pub fn reports_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    /// Whether the log is read from stdin
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an input path doesn't exist or isn't a file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for input in &self.inputs {
            if !input.exists() {
                return Err(ConfigError::InputNotFound(input.clone()));
            }
            if !input.is_file() {
                return Err(ConfigError::InputNotFile(input.clone()));
            }
        }
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input path not found
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Input path is not a regular file
    #[error("Input path is not a file: {0}")]
    InputNotFile(PathBuf),
}
