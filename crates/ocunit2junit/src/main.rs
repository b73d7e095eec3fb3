//! ocunit2junit: JUnit XML reports from OCUnit/XCTest output
//!
//! Reads an xcodebuild log from stdin (or files), echoes it unchanged, and
//! writes one JUnit report per test suite. The process exits with the code
//! the build itself reported.

use clap::Parser;
use ocunit2junit::config::Config;
use tracing::error;

fn main() {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the echoed log
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    match ocunit2junit::run(&config) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("{e:#}");
            std::process::exit(1);
        }
    }
}
