//! Report output
//!
//! Preparing the report directory, writing report files into it, and
//! working out which host name to put in them.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ocunit_report::{ReportError, ReportSink, SuiteReport};
use tracing::{debug, warn};

/// Host name used when the system one cannot be determined
pub const FALLBACK_HOSTNAME: &str = "localhost";

/// Delete `dir` with everything in it, then recreate it empty
///
/// A missing directory is not an error. Parent directories are created as
/// needed.
///
/// # Errors
///
/// Returns `ReportError::OutputDir` if the directory cannot be removed or
/// created.
pub fn prepare_output_dir(dir: &Path) -> Result<(), ReportError> {
    let output_dir_error = |source| ReportError::OutputDir {
        path: dir.to_path_buf(),
        source,
    };

    match fs::remove_dir_all(dir) {
        Ok(()) => debug!(dir = %dir.display(), "removed previous reports"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(output_dir_error(e)),
    }
    fs::create_dir_all(dir).map_err(output_dir_error)
}

/// Writes each report to `<dir>/TEST-<suite>.xml`
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create a sink writing into `dir`, which must already exist
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path a report will be written to
    #[must_use]
    pub fn report_path(&self, report: &SuiteReport) -> PathBuf {
        self.dir.join(report.file_name())
    }
}

impl ReportSink for DirectorySink {
    fn write_report(&mut self, report: &SuiteReport) -> Result<(), ReportError> {
        let path = self.report_path(report);

        for case in &report.cases {
            if let Some(failure) = &case.failure {
                debug!(
                    suite = %report.name,
                    test = %case.name,
                    message = %failure.message,
                    location = %failure.location,
                    "recording test failure"
                );
            }
        }

        fs::write(&path, report.to_xml()).map_err(|source| ReportError::WriteReport {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "report written");
        Ok(())
    }
}

/// Name of this machine, as recorded in reports
pub fn resolve_hostname() -> String {
    match whoami::hostname() {
        Ok(name) if !name.is_empty() => name,
        Ok(_) => {
            warn!("system host name is empty, using {FALLBACK_HOSTNAME}");
            FALLBACK_HOSTNAME.to_string()
        }
        Err(e) => {
            warn!(error = %e, "could not determine host name, using {FALLBACK_HOSTNAME}");
            FALLBACK_HOSTNAME.to_string()
        }
    }
}
