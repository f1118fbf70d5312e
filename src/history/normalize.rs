//! View-root path normalization

use crate::model::RawEvent;

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Strips the view root from element paths so they become workspace-relative
#[derive(Debug, Clone, Default)]
pub struct PathNormalizer {
    view_root: Option<String>,
}

impl PathNormalizer {
    /// A blank root (or one made only of separators) disables normalization.
    pub fn new(view_root: Option<&str>) -> Self {
        let view_root = view_root
            .map(|root| root.trim_end_matches(is_separator))
            .filter(|root| !root.is_empty())
            .map(str::to_string);
        Self { view_root }
    }

    /// Strip the view root from `path`
    ///
    /// `/view/x/vobs/a.h` becomes `/vobs/a.h` for root `/view/x`. The root
    /// must end on a segment boundary, so `/view/xy/a.h` is left alone.
    pub fn normalize<'a>(&self, path: &'a str) -> &'a str {
        let Some(root) = self.view_root.as_deref() else {
            return path;
        };
        match path.strip_prefix(root) {
            Some(rest) if rest.is_empty() || rest.starts_with(is_separator) => rest,
            _ => path,
        }
    }

    /// Normalize the file path of an event
    pub fn apply(&self, mut event: RawEvent) -> RawEvent {
        let normalized = self.normalize(&event.file_path);
        if normalized.len() != event.file_path.len() {
            event.file_path = normalized.to_string();
        }
        event
    }
}
