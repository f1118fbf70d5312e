//! cleartool command runner
//!
//! The history engine only needs a readable stream of `lshistory` output.
//! [`ClearTool`] is that seam; [`ClearToolExec`] backs it with a real process.

use std::io::{BufRead, Cursor};
use std::path::PathBuf;
use std::process::Command;

use chrono::NaiveDateTime;

use super::HistoryError;
use super::constants::{self, commands, dates, flags};

/// Source of raw `cleartool lshistory` output
pub trait ClearTool {
    /// List history events on `branch` since `since` for the given vob paths,
    /// running inside `view_path`.
    ///
    /// The returned stream is owned by the caller and released when dropped.
    fn lshistory(
        &self,
        format: &str,
        since: NaiveDateTime,
        view_path: &str,
        branch: &str,
        vob_paths: &[&str],
    ) -> Result<Box<dyn BufRead + '_>, HistoryError>;
}

impl<T: ClearTool + ?Sized> ClearTool for &T {
    fn lshistory(
        &self,
        format: &str,
        since: NaiveDateTime,
        view_path: &str,
        branch: &str,
        vob_paths: &[&str],
    ) -> Result<Box<dyn BufRead + '_>, HistoryError> {
        (**self).lshistory(format, since, view_path, branch, vob_paths)
    }
}

/// Path and line-ending convention of the host running cleartool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    Unix,
    Windows,
}

impl PathStyle {
    /// Style of the machine this process runs on
    pub fn host() -> Self {
        if cfg!(windows) {
            PathStyle::Windows
        } else {
            PathStyle::Unix
        }
    }

    /// Convert separators and line endings in `text` to this style
    pub fn convert(self, text: &str) -> String {
        let unix = text.replace("\r\n", "\n");
        match self {
            PathStyle::Unix => unix.replace('\\', "/"),
            PathStyle::Windows => unix.replace('/', "\\").replace('\n', "\r\n"),
        }
    }
}

/// Runs cleartool as a child process
#[derive(Debug, Clone)]
pub struct ClearToolExec {
    program: PathBuf,
    style: PathStyle,
}

impl Default for ClearToolExec {
    fn default() -> Self {
        Self::new()
    }
}

impl ClearToolExec {
    /// Runner for `cleartool` found on PATH
    pub fn new() -> Self {
        Self {
            program: PathBuf::from(constants::CLEARTOOL_COMMAND),
            style: PathStyle::host(),
        }
    }

    /// Runner for a cleartool binary at an explicit location
    pub fn with_program(program: PathBuf) -> Self {
        Self {
            program,
            ..Self::new()
        }
    }

    /// Build the `lshistory` argument list
    fn lshistory_args(
        &self,
        format: &str,
        since: NaiveDateTime,
        branch: &str,
        vob_paths: &[&str],
    ) -> Vec<String> {
        let mut args = vec![
            commands::LSHISTORY.to_string(),
            flags::RECURSE.to_string(),
            flags::SINCE.to_string(),
            since.format(dates::SINCE).to_string().to_lowercase(),
            flags::FORMAT.to_string(),
            format.to_string(),
        ];

        if !branch.is_empty() {
            args.push(flags::BRANCH.to_string());
            args.push(format!("{}{}", flags::BRANCH_TYPE_PREFIX, branch));
        }

        args.push(flags::NO_CHECKOUTS.to_string());
        args.extend(vob_paths.iter().map(|p| self.style.convert(p)));
        args
    }
}

impl ClearTool for ClearToolExec {
    fn lshistory(
        &self,
        format: &str,
        since: NaiveDateTime,
        view_path: &str,
        branch: &str,
        vob_paths: &[&str],
    ) -> Result<Box<dyn BufRead + '_>, HistoryError> {
        let args = self.lshistory_args(format, since, branch, vob_paths);
        tracing::debug!(program = %self.program.display(), ?args, view_path, "running cleartool");

        let output = Command::new(&self.program)
            .current_dir(view_path)
            .args(&args)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    HistoryError::ClearToolNotFound
                } else {
                    HistoryError::from(e)
                }
            })?;

        if !output.status.success() {
            return Err(HistoryError::CommandFailed {
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                exit_code: output.status.code().unwrap_or(-1),
            });
        }

        Ok(Box::new(Cursor::new(output.stdout)))
    }
}
