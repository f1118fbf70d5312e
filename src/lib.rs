//! cclog - ClearCase history extraction
//!
//! Turns the text written by `cleartool lshistory` into an ordered list of
//! changelog entries.
//!
//! This library provides:
//! - [`cleartool`]: command runner, format string and output parser
//! - [`history`]: filters, transaction merging and the extraction driver
//! - [`model`]: history events and changelog entries

pub mod cleartool;
pub mod history;
pub mod model;
