//! cleartool boundary
//!
//! This module covers everything that touches the raw output of
//! `cleartool lshistory`: the format string, the command runner and the parser.

pub mod constants;
mod executor;
mod format;
/// Parser module (public for integration testing)
pub mod parser;

pub use executor::{ClearTool, ClearToolExec, PathStyle};
pub use format::Formats;
pub use parser::HistoryReader;

use std::io;
use thiserror::Error;

/// Errors that can occur while extracting history
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("I/O error while reading history: {0}")]
    Io(io::Error),

    #[error("history extraction was interrupted")]
    Interrupted,

    #[error("invalid filter pattern `{pattern}`: {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("cleartool command failed (exit code {exit_code}): {stderr}")]
    CommandFailed { stderr: String, exit_code: i32 },

    #[error("cleartool is not installed or not in PATH")]
    ClearToolNotFound,
}

impl From<io::Error> for HistoryError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::Interrupted {
            HistoryError::Interrupted
        } else {
            HistoryError::Io(err)
        }
    }
}
