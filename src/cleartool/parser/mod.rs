//! lshistory output parser
//!
//! Turns the text written by `cleartool lshistory -fmt` into [`RawEvent`]s.
//! Each event starts with a header line of six quoted fields; every following
//! line up to the next header is comment text.
//!
//! [`RawEvent`]: crate::model::RawEvent

mod comment;
mod reader;
mod record;

pub use reader::{HistoryReader, HistoryStats};


use regex::Regex;
use std::sync::LazyLock;

use super::HistoryError;
use crate::model::RawEvent;

/// Regex for the start of a header line: the quoted `%Nd` date token
///
/// Example: `"20070906.091701"   "egsperi"    "create version" ...`
///
/// Groups:
/// 1. date token (YYYYMMDD.HHMMSS)
static HEADER_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*"(\d{8}\.\d{6})""#).expect("Invalid header date regex")
});

/// Regex for the boundary between two quoted fields (`"`, whitespace, `"`)
///
/// Event kinds may contain quotes (`destroy sub-branch "x" of branch`), but
/// never a quote followed by whitespace and another quote.
static FIELD_BOUNDARY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""\s+""#).expect("Invalid field boundary regex"));

/// Classification of one line of lshistory output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Starts a new event
    Header,
    /// Error or warning banner written by cleartool itself
    Diagnostic,
    /// Comment text of the current event
    Continuation,
}

/// Parser for lshistory output
pub struct Parser;

impl Parser {
    /// Parse a complete lshistory output into events
    ///
    /// Malformed headers are skipped; the result is only an error if the
    /// underlying read fails.
    pub fn parse_history(output: &str) -> Result<Vec<RawEvent>, HistoryError> {
        HistoryReader::new(output.as_bytes()).collect()
    }
}
