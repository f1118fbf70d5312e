//! History extraction engine
//!
//! Filters, path normalization, transaction merging and the driver that
//! runs a complete extraction.

mod action;
mod filter;
mod merge;
mod normalize;

pub use action::{ChangeLogAction, HistoryConfig, extract_changes};
pub use filter::{FileFilter, FileFilterMode, Filter, FilterChain, load_rules_pattern};
pub use merge::{MergeEngine, merge_events, sort_chronologically};
pub use normalize::PathNormalizer;
