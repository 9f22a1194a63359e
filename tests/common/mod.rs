// Shared test helpers for integration tests
#![allow(dead_code)]

use chrono::{Local, TimeZone};
use std::path::PathBuf;
use testdox_report::reporting::ReportContext;

/// Realistic `--testdox` output with three controllers, schema warnings and
/// missing templates.
pub const SAMPLE_LOG: &str = include_str!("../fixtures/testdox_sample.log");

/// Minimal output matching the end-to-end scenario: one controller with two
/// failing tests and one passing test.
pub const PRODUCTS_LOG: &str = "\
Tests: 10, Assertions: 40, Errors: 1, Failures: 2
ProductsController
 ✘ testAdd
 ✔ testIndex
 ✘ testDelete
";

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A report context with a fixed timestamp, so rendered output is comparable.
pub fn fixed_context() -> ReportContext {
    let generated_at = Local
        .with_ymd_and_hms(2025, 6, 15, 10, 30, 0)
        .single()
        .expect("fixed timestamp is unambiguous");
    ReportContext::new("Controller Test Report", generated_at)
}
