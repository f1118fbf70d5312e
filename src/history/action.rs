//! History extraction driver
//!
//! Wires the stages together: stream → parser → path normalizer → filters
//! → merge engine → sorter.

use std::io::BufRead;

use chrono::NaiveDateTime;
use scopeguard::ScopeGuard;

use super::filter::{Filter, FilterChain};
use super::merge::MergeEngine;
use super::normalize::PathNormalizer;
use crate::cleartool::{ClearTool, Formats, HistoryError, HistoryReader};
use crate::model::ChangeLogEntry;

/// Settings for one history extraction
#[derive(Debug, Clone, Default)]
pub struct HistoryConfig {
    /// Largest gap (milliseconds) between events of one transaction
    pub merge_window_ms: u64,

    /// Filters applied to every event; empty means keep everything
    pub filters: Vec<Filter>,

    /// View root stripped from element paths
    pub view_root: Option<String>,
}

impl HistoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_merge_window_ms(mut self, merge_window_ms: u64) -> Self {
        self.merge_window_ms = merge_window_ms;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filters.push(filter.into());
        self
    }

    pub fn with_filters(mut self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.filters.extend(filters);
        self
    }

    pub fn with_view_root(mut self, view_root: impl Into<String>) -> Self {
        self.view_root = Some(view_root.into());
        self
    }
}

/// Take ownership of a history stream and log its release on every exit path
fn guarded<R>(stream: R, source: &str) -> ScopeGuard<R, impl FnOnce(R)> {
    let source = source.to_string();
    scopeguard::guard(stream, move |stream| {
        drop(stream);
        tracing::debug!(source = %source, "history stream released");
    })
}

/// One extraction in progress
struct Pipeline<'a> {
    filters: FilterChain<'a>,
    normalizer: PathNormalizer,
    merger: MergeEngine,
    read: usize,
    filtered: usize,
}

impl<'a> Pipeline<'a> {
    fn new(config: &'a HistoryConfig) -> Self {
        Self {
            filters: FilterChain::new(&config.filters),
            normalizer: PathNormalizer::new(config.view_root.as_deref()),
            merger: MergeEngine::new(config.merge_window_ms),
            read: 0,
            filtered: 0,
        }
    }

    /// Run every event of `stream` through normalization and filtering
    fn feed<R: BufRead>(&mut self, stream: R, source: &str) -> Result<(), HistoryError> {
        let mut stream = guarded(stream, source);
        let mut reader = HistoryReader::new(&mut *stream);

        for event in reader.by_ref() {
            let event = self.normalizer.apply(event?);
            self.read += 1;
            if self.filters.accepts(&event) {
                self.merger.push(event);
            } else {
                self.filtered += 1;
                tracing::debug!(
                    path = %event.file_path,
                    kind = %event.event_kind,
                    "history event filtered out"
                );
            }
        }

        let stats = reader.stats();
        if stats.malformed > 0 || stats.diagnostics > 0 {
            tracing::warn!(
                source,
                malformed = stats.malformed,
                diagnostics = stats.diagnostics,
                "history stream contained unusable lines"
            );
        }
        Ok(())
    }

    /// Does `stream` hold at least one event that survives the filters?
    fn any_accepted<R: BufRead>(&self, stream: R, source: &str) -> Result<bool, HistoryError> {
        let mut stream = guarded(stream, source);
        for event in HistoryReader::new(&mut *stream) {
            let event = self.normalizer.apply(event?);
            if self.filters.accepts(&event) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn finish(self) -> Vec<ChangeLogEntry> {
        let entries = self.merger.finish();
        tracing::info!(
            events = self.read,
            filtered = self.filtered,
            entries = entries.len(),
            "history extracted"
        );
        entries
    }
}

/// Extract changelog entries from one already-open lshistory stream
///
/// The stream is consumed and released before this returns, whether or not
/// reading succeeds.
pub fn extract_changes<R: BufRead>(
    stream: R,
    config: &HistoryConfig,
) -> Result<Vec<ChangeLogEntry>, HistoryError> {
    let mut pipeline = Pipeline::new(config);
    pipeline.feed(stream, "stream")?;
    Ok(pipeline.finish())
}

/// Extracts changelog entries for branches of a base ClearCase view
#[derive(Debug, Clone)]
pub struct ChangeLogAction<C> {
    cleartool: C,
    config: HistoryConfig,
}

impl<C: ClearTool> ChangeLogAction<C> {
    /// Action merging events up to `merge_window_ms` apart, with `filters`
    pub fn new(cleartool: C, merge_window_ms: u64, filters: Vec<Filter>) -> Self {
        Self::with_config(
            cleartool,
            HistoryConfig::new()
                .with_merge_window_ms(merge_window_ms)
                .with_filters(filters),
        )
    }

    pub fn with_config(cleartool: C, config: HistoryConfig) -> Self {
        Self { cleartool, config }
    }

    /// Strip `view_root` from element paths before filtering
    pub fn with_view_root(mut self, view_root: impl Into<String>) -> Self {
        self.config.view_root = Some(view_root.into());
        self
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Branches to query; no branch names means one query across all branches
    fn branches<'b>(branch_names: &'b [&'b str]) -> &'b [&'b str] {
        if branch_names.is_empty() {
            &[""]
        } else {
            branch_names
        }
    }

    /// All changes since `since` on the given branches, oldest first
    ///
    /// Events of all branches are merged together, in branch order.
    pub fn get_changes(
        &self,
        since: NaiveDateTime,
        view_path: &str,
        branch_names: &[&str],
        vob_paths: &[&str],
    ) -> Result<Vec<ChangeLogEntry>, HistoryError> {
        let mut pipeline = Pipeline::new(&self.config);

        for branch in Self::branches(branch_names) {
            let stream = self.cleartool.lshistory(
                Formats::lshistory(),
                since,
                view_path,
                branch,
                vob_paths,
            )?;
            pipeline.feed(stream, branch)?;
        }

        Ok(pipeline.finish())
    }

    /// Has anything that survives the filters changed since `since`?
    ///
    /// Stops reading at the first accepted event.
    pub fn has_changes(
        &self,
        since: NaiveDateTime,
        view_path: &str,
        branch_names: &[&str],
        vob_paths: &[&str],
    ) -> Result<bool, HistoryError> {
        let pipeline = Pipeline::new(&self.config);

        for branch in Self::branches(branch_names) {
            let stream = self.cleartool.lshistory(
                Formats::lshistory(),
                since,
                view_path,
                branch,
                vob_paths,
            )?;
            if pipeline.any_accepted(stream, branch)? {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{FileFilter, FileFilterMode};
    use std::cell::Cell;
    use std::io::{self, Read};
    use std::rc::Rc;

    const HEADER: &str = "\"20070827.085901\" \"user\" \"action\" \"/view/ralef_0.2_nightly/vobs/Tools/framework/util/QT.h\" \"/main/comain\"  \"mkelem\"\n";

    /// Serves `data`, then fails; records when it is dropped
    struct FlakyStream {
        data: io::Cursor<Vec<u8>>,
        fail_at_end: bool,
        dropped: Rc<Cell<bool>>,
    }

    impl Read for FlakyStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.data.read(buf)?;
            if n == 0 && self.fail_at_end {
                return Err(io::Error::other("connection reset"));
            }
            Ok(n)
        }
    }

    impl Drop for FlakyStream {
        fn drop(&mut self) {
            self.dropped.set(true);
        }
    }

    fn flaky(data: &str, fail_at_end: bool) -> (io::BufReader<FlakyStream>, Rc<Cell<bool>>) {
        let dropped = Rc::new(Cell::new(false));
        let stream = FlakyStream {
            data: io::Cursor::new(data.as_bytes().to_vec()),
            fail_at_end,
            dropped: Rc::clone(&dropped),
        };
        (io::BufReader::new(stream), dropped)
    }

    #[test]
    fn test_filters_see_normalized_paths() {
        let config = HistoryConfig::new()
            .with_view_root("/view/ralef_0.2_nightly")
            .with_filter(FileFilter::new(FileFilterMode::ContainsRegxp, "^/vobs/Tools/").unwrap());

        let entries = extract_changes(HEADER.as_bytes(), &config).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].elements()[0].file_path, "/vobs/Tools/framework/util/QT.h");
    }

    #[test]
    fn test_stream_released_after_success() {
        let (stream, dropped) = flaky(HEADER, false);
        let entries = extract_changes(stream, &HistoryConfig::new()).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(dropped.get());
    }

    #[test]
    fn test_stream_released_after_read_error() {
        let (stream, dropped) = flaky(HEADER, true);
        let result = extract_changes(stream, &HistoryConfig::new());
        assert!(matches!(result, Err(HistoryError::Io(_))));
        assert!(dropped.get());
    }

    #[test]
    fn test_config_builder() {
        let config = HistoryConfig::new()
            .with_merge_window_ms(1000)
            .with_filter(Filter::DestroySubBranch)
            .with_filters(vec![Filter::DestroySubBranch])
            .with_view_root("/view/x");
        assert_eq!(config.merge_window_ms, 1000);
        assert_eq!(config.filters.len(), 2);
        assert_eq!(config.view_root.as_deref(), Some("/view/x"));
    }
}
