//! Header line classification and field parsing

use chrono::NaiveDateTime;

use super::super::constants::{dates, diagnostics};
use super::super::format::{FIELD_COUNT, FIELD_DELIMITER};
use super::{FIELD_BOUNDARY_REGEX, HEADER_DATE_REGEX, LineKind, Parser};
use crate::model::RawEvent;

impl Parser {
    /// Decide whether `line` starts an event, is a tool diagnostic, or is
    /// comment text.
    ///
    /// A header is any line starting with a quoted, parseable date token.
    /// Field count is checked later by [`Parser::parse_header`].
    pub fn classify_line(line: &str) -> LineKind {
        if line.starts_with(diagnostics::ERROR_PREFIX)
            || line.starts_with(diagnostics::WARNING_PREFIX)
        {
            return LineKind::Diagnostic;
        }

        match HEADER_DATE_REGEX.captures(line) {
            Some(caps) if Self::parse_timestamp(&caps[1]).is_some() => LineKind::Header,
            _ => LineKind::Continuation,
        }
    }

    /// Parse a header line into an event with an empty comment
    ///
    /// Format:
    /// ```text
    /// "<date>" "<user>" "<event kind>" "<path>" "<version>" "<operation>"
    /// ```
    ///
    /// Returns `None` unless the line has exactly six fields and a valid date.
    pub fn parse_header(line: &str) -> Option<RawEvent> {
        let inner = line
            .trim()
            .strip_prefix(FIELD_DELIMITER)?
            .strip_suffix(FIELD_DELIMITER)?;

        let fields: Vec<&str> = FIELD_BOUNDARY_REGEX.split(inner).collect();
        if fields.len() != FIELD_COUNT {
            return None;
        }

        Some(RawEvent {
            timestamp: Self::parse_timestamp(fields[0])?,
            user: fields[1].to_string(),
            event_kind: fields[2].to_string(),
            file_path: fields[3].to_string(),
            version_label: fields[4].to_string(),
            operation: fields[5].to_string(),
            comment: String::new(),
        })
    }

    /// Parse a `%Nd` date token (`YYYYMMDD.HHMMSS`)
    pub(super) fn parse_timestamp(token: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(token, dates::HISTORY_TIMESTAMP).ok()
    }
}
