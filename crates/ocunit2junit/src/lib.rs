//! ocunit2junit library
//!
//! This module exports the command's building blocks for use in
//! integration tests and as a library.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use ocunit_report::{Accumulator, RunSummary, convert};
use tracing::info;

pub mod config;
pub mod output;

use config::Config;
use output::{DirectorySink, prepare_output_dir, resolve_hostname};

/// Run the command with the given configuration
///
/// Returns the exit code reported by the build in the log.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, an input file cannot
/// be opened, or the conversion fails.
pub fn run(config: &Config) -> anyhow::Result<i32> {
    config.validate()?;

    let hostname = config.hostname.clone().unwrap_or_else(resolve_hostname);
    let reports_dir = config.reports_dir();
    let stdout = io::stdout().lock();

    let summary = if config.reads_stdin() {
        convert_log(io::stdin().lock(), stdout, &reports_dir, &hostname)?
    } else {
        let input = open_inputs(&config.inputs)?;
        convert_log(BufReader::new(input), stdout, &reports_dir, &hostname)?
    };

    info!(
        reports = summary.reports,
        dir = %reports_dir.display(),
        exit_code = summary.exit_code,
        "conversion complete"
    );
    Ok(summary.exit_code)
}

/// Convert a log, writing reports into a freshly emptied `reports_dir`
///
/// # Errors
///
/// Returns an error if the report directory cannot be prepared or any
/// step of the conversion fails.
pub fn convert_log<R, W>(
    input: R,
    echo: W,
    reports_dir: &Path,
    hostname: &str,
) -> anyhow::Result<RunSummary>
where
    R: BufRead,
    W: Write,
{
    prepare_output_dir(reports_dir)?;

    let mut accumulator = Accumulator::new(hostname);
    let mut sink = DirectorySink::new(reports_dir);
    let summary = convert(input, echo, &mut accumulator, &mut sink)
        .context("Failed to convert test log")?;
    Ok(summary)
}

/// Open log files as one continuous stream, read in the order given
///
/// # Errors
///
/// Returns an error naming the first file that cannot be opened.
pub fn open_inputs(paths: &[PathBuf]) -> anyhow::Result<Box<dyn Read>> {
    let mut stream: Box<dyn Read> = Box::new(io::empty());
    for path in paths {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        stream = Box::new(stream.chain(file));
    }
    Ok(stream)
}
