// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for log conversion
//!
//! Arbitrary bytes are converted end to end. Conversion should never panic,
//! every byte should be echoed, and every report should render.

#![no_main]

use libfuzzer_sys::fuzz_target;

use ocunit_report::prelude::*;

fuzz_target!(|data: &[u8]| {
    let mut accumulator = Accumulator::new("fuzz");
    let mut reports: Vec<SuiteReport> = Vec::new();
    let mut echo = Vec::new();

    if convert(data, &mut echo, &mut accumulator, &mut reports).is_ok() {
        assert_eq!(echo, data);
    }
    for report in &reports {
        let _ = report.to_xml();
    }
});
