//! Event filters
//!
//! Filters run after path normalization and before merging. An event
//! survives only if no filter in the chain rejects it.

use regex::Regex;

use crate::cleartool::HistoryError;
use crate::model::RawEvent;

/// How a [`FileFilter`] pattern is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFilterMode {
    /// Keep only events whose path matches the pattern
    ContainsRegxp,
    /// Keep only events whose path does not match the pattern
    DoesNotContainRegxp,
}

/// Path filter backed by a regular expression
#[derive(Debug, Clone)]
pub struct FileFilter {
    mode: FileFilterMode,
    pattern: Regex,
}

impl FileFilter {
    /// Compile a path filter; an invalid pattern fails here, before any
    /// history is read.
    pub fn new(mode: FileFilterMode, pattern: &str) -> Result<Self, HistoryError> {
        let pattern = Regex::new(pattern).map_err(|source| HistoryError::InvalidFilter {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { mode, pattern })
    }

    /// Filter keeping only paths inside one of the given load rules
    ///
    /// Returns `None` when there are no usable rules.
    pub fn for_load_rules<S: AsRef<str>>(rules: &[S]) -> Result<Option<Self>, HistoryError> {
        load_rules_pattern(rules)
            .map(|pattern| Self::new(FileFilterMode::ContainsRegxp, &pattern))
            .transpose()
    }

    pub fn mode(&self) -> FileFilterMode {
        self.mode
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn accepts(&self, event: &RawEvent) -> bool {
        let matched = self.pattern.is_match(&event.file_path);
        match self.mode {
            FileFilterMode::ContainsRegxp => matched,
            FileFilterMode::DoesNotContainRegxp => !matched,
        }
    }
}

/// Build a regex matching any path that lies inside one of `rules`
///
/// Each rule must match whole path segments: `vobs/inf` matches `/vobs/inf`
/// and `/vobs/inf/x.cc` but not `/vobs/inf_foo/x.cc`. Either separator is
/// accepted anywhere in the path.
pub fn load_rules_pattern<S: AsRef<str>>(rules: &[S]) -> Option<String> {
    let alternatives: Vec<String> = rules
        .iter()
        .map(|rule| {
            rule.as_ref()
                .split(['/', '\\'])
                .filter(|segment| !segment.is_empty())
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"[\\/]")
        })
        .filter(|alternative| !alternative.is_empty())
        .collect();

    if alternatives.is_empty() {
        return None;
    }

    Some(format!(
        r"(?:^|[\\/])(?:{})(?:[\\/]|$)",
        alternatives.join("|")
    ))
}

/// A single predicate over raw events
#[derive(Debug, Clone)]
pub enum Filter {
    /// Drops the `destroy sub-branch ... of branch` events emitted by the
    /// empty-branch removal trigger
    DestroySubBranch,
    /// Path-based filter
    File(FileFilter),
}

impl Filter {
    pub fn accepts(&self, event: &RawEvent) -> bool {
        match self {
            Filter::DestroySubBranch => !event.is_destroy_sub_branch(),
            Filter::File(filter) => filter.accepts(event),
        }
    }
}

impl From<FileFilter> for Filter {
    fn from(filter: FileFilter) -> Self {
        Filter::File(filter)
    }
}

/// Ordered set of filters
#[derive(Debug, Clone, Copy)]
pub struct FilterChain<'a> {
    filters: &'a [Filter],
}

impl<'a> FilterChain<'a> {
    pub fn new(filters: &'a [Filter]) -> Self {
        Self { filters }
    }

    /// True unless some filter rejects the event
    pub fn accepts(&self, event: &RawEvent) -> bool {
        self.filters.iter().all(|filter| filter.accepts(event))
    }
}
