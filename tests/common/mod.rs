//! Common test utilities for integration and scenario tests.
//!
//! Provides a fake cleartool runner and builders for lshistory output.
//!
//! Note: Each integration test file compiles as a separate crate,
//! so not all helpers are used in every test file. We suppress
//! dead_code warnings at the module level.

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fake_cleartool;

pub use fake_cleartool::{FailingClearTool, FakeClearTool, LshistoryCall};

use chrono::{NaiveDate, NaiveDateTime};

/// Build one lshistory header line (with trailing newline).
pub fn header(
    date: &str,
    user: &str,
    event_kind: &str,
    path: &str,
    version: &str,
    operation: &str,
) -> String {
    format!(
        "\"{date}\" \"{user}\" \"{event_kind}\" \"{path}\" \"{version}\" \"{operation}\"\n"
    )
}

/// Any point in time; the fake runner ignores it.
pub fn since() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2007, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid date")
}

pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|date| date.and_hms_opt(h, mi, s))
        .expect("valid date")
}
