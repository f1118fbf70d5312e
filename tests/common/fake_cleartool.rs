//! FakeClearTool helper for integration tests.
//!
//! Serves canned lshistory output instead of running cleartool.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{BufRead, Cursor};

use cclog::cleartool::{ClearTool, HistoryError};
use chrono::NaiveDateTime;

/// Arguments of one recorded `lshistory` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LshistoryCall {
    pub format: String,
    pub since: NaiveDateTime,
    pub view_path: String,
    pub branch: String,
    pub vob_paths: Vec<String>,
}

/// A ClearTool that returns fixed output and records every call.
#[derive(Default)]
pub struct FakeClearTool {
    default_output: String,
    branch_outputs: HashMap<String, String>,
    calls: RefCell<Vec<LshistoryCall>>,
}

impl FakeClearTool {
    /// Return `output` for every branch.
    pub fn new(output: &str) -> Self {
        Self {
            default_output: output.to_string(),
            ..Self::default()
        }
    }

    /// Return `output` for `branch` only.
    pub fn with_branch(mut self, branch: &str, output: &str) -> Self {
        self.branch_outputs
            .insert(branch.to_string(), output.to_string());
        self
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<LshistoryCall> {
        self.calls.borrow().clone()
    }
}

impl ClearTool for FakeClearTool {
    fn lshistory(
        &self,
        format: &str,
        since: NaiveDateTime,
        view_path: &str,
        branch: &str,
        vob_paths: &[&str],
    ) -> Result<Box<dyn BufRead + '_>, HistoryError> {
        self.calls.borrow_mut().push(LshistoryCall {
            format: format.to_string(),
            since,
            view_path: view_path.to_string(),
            branch: branch.to_string(),
            vob_paths: vob_paths.iter().map(|p| p.to_string()).collect(),
        });

        let output = self
            .branch_outputs
            .get(branch)
            .unwrap_or(&self.default_output)
            .clone();
        Ok(Box::new(Cursor::new(output.into_bytes())))
    }
}

/// A ClearTool whose command always fails.
pub struct FailingClearTool;

impl ClearTool for FailingClearTool {
    fn lshistory(
        &self,
        _format: &str,
        _since: NaiveDateTime,
        _view_path: &str,
        _branch: &str,
        _vob_paths: &[&str],
    ) -> Result<Box<dyn BufRead + '_>, HistoryError> {
        Err(HistoryError::CommandFailed {
            stderr: "cleartool: Error: Unable to access view".to_string(),
            exit_code: 1,
        })
    }
}
