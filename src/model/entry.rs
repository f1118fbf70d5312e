//! Changelog entry data model

use chrono::NaiveDateTime;

use super::RawEvent;
use crate::cleartool::constants::operations;

/// How an element was affected by an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditType {
    /// Element was created (`mkelem`)
    Added,

    /// Element was removed (`rmelem`)
    Deleted,

    /// A new version was checked in (`checkin`)
    Edited,
}

impl EditType {
    /// Classify an operation code; other operations have no edit type
    pub fn from_operation(operation: &str) -> Option<Self> {
        if operation.eq_ignore_ascii_case(operations::MKELEM) {
            Some(EditType::Added)
        } else if operation.eq_ignore_ascii_case(operations::RMELEM) {
            Some(EditType::Deleted)
        } else if operation.eq_ignore_ascii_case(operations::CHECKIN) {
            Some(EditType::Edited)
        } else {
            None
        }
    }

    /// Single-letter indicator, as used by status listings
    pub fn indicator(&self) -> char {
        match self {
            EditType::Added => 'A',
            EditType::Deleted => 'D',
            EditType::Edited => 'M',
        }
    }
}

/// One file's part in a changelog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileElement {
    /// Workspace-relative element path
    pub file_path: String,

    /// Event kind (e.g. "create version")
    pub action: String,

    /// Operation code (e.g. "mkelem")
    pub operation: String,

    /// Version label
    pub version_label: String,

    /// Classification derived from `operation`
    pub edit_type: Option<EditType>,
}

impl From<&RawEvent> for FileElement {
    fn from(event: &RawEvent) -> Self {
        Self {
            file_path: event.file_path.clone(),
            action: event.event_kind.clone(),
            operation: event.operation.clone(),
            version_label: event.version_label.clone(),
            edit_type: event.edit_type(),
        }
    }
}

/// One logical transaction: a user's change touching one or more files
///
/// Built by the merge engine and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLogEntry {
    timestamp: NaiveDateTime,
    user: String,
    comment: String,
    elements: Vec<FileElement>,
    /// Distinct comments of the merged events
    comments: Vec<String>,
    /// Timestamp of the most recently merged event
    last_timestamp: NaiveDateTime,
}

impl ChangeLogEntry {
    /// Start an entry from its first event
    pub(crate) fn from_event(event: RawEvent) -> Self {
        let element = FileElement::from(&event);
        Self {
            timestamp: event.timestamp,
            last_timestamp: event.timestamp,
            user: event.user,
            comments: if event.comment.is_empty() {
                Vec::new()
            } else {
                vec![event.comment.clone()]
            },
            comment: event.comment,
            elements: vec![element],
        }
    }

    /// Fold another event of the same transaction into this entry
    ///
    /// A non-empty comment not yet seen in this entry is appended on its own line.
    pub(crate) fn absorb(&mut self, event: RawEvent) {
        debug_assert_eq!(self.user, event.user);
        self.elements.push(FileElement::from(&event));
        self.last_timestamp = event.timestamp;

        if event.comment.is_empty() || self.comments.contains(&event.comment) {
            return;
        }
        if !self.comment.is_empty() {
            self.comment.push('\n');
        }
        self.comment.push_str(&event.comment);
        self.comments.push(event.comment);
    }

    pub(crate) fn last_timestamp(&self) -> NaiveDateTime {
        self.last_timestamp
    }

    /// Timestamp of the first event of the transaction
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Affected files, in parse order
    pub fn elements(&self) -> &[FileElement] {
        &self.elements
    }

    /// Paths of all affected files
    pub fn affected_paths(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|e| e.file_path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(path: &str, operation: &str, comment: &str) -> RawEvent {
        RawEvent {
            timestamp: NaiveDate::from_ymd_opt(2007, 8, 27)
                .and_then(|d| d.and_hms_opt(8, 59, 1))
                .unwrap(),
            user: "aname".to_string(),
            event_kind: "create version".to_string(),
            file_path: path.to_string(),
            version_label: "\\main\\sit_r5_maint\\2".to_string(),
            operation: operation.to_string(),
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_edit_type_from_operation() {
        assert_eq!(EditType::from_operation("mkelem"), Some(EditType::Added));
        assert_eq!(EditType::from_operation("MKELEM"), Some(EditType::Added));
        assert_eq!(EditType::from_operation("rmelem"), Some(EditType::Deleted));
        assert_eq!(EditType::from_operation("checkin"), Some(EditType::Edited));
        assert_eq!(EditType::from_operation("mkbranch"), None);
        assert_eq!(EditType::from_operation(""), None);
    }

    #[test]
    fn test_edit_type_indicator() {
        assert_eq!(EditType::Added.indicator(), 'A');
        assert_eq!(EditType::Deleted.indicator(), 'D');
        assert_eq!(EditType::Edited.indicator(), 'M');
    }

    #[test]
    fn test_entry_from_event() {
        let entry = ChangeLogEntry::from_event(event("Source\\FormMain.cs", "mkelem", "BUG8949"));
        assert_eq!(entry.user(), "aname");
        assert_eq!(entry.comment(), "BUG8949");
        assert_eq!(entry.elements().len(), 1);

        let element = &entry.elements()[0];
        assert_eq!(element.file_path, "Source\\FormMain.cs");
        assert_eq!(element.action, "create version");
        assert_eq!(element.operation, "mkelem");
        assert_eq!(element.edit_type, Some(EditType::Added));
    }

    #[test]
    fn test_absorb_keeps_parse_order() {
        let mut entry = ChangeLogEntry::from_event(event("a.cs", "checkin", ""));
        entry.absorb(event("b.cs", "rmelem", ""));
        entry.absorb(event("c.cs", "mkelem", ""));

        let paths: Vec<&str> = entry.affected_paths().collect();
        assert_eq!(paths, vec!["a.cs", "b.cs", "c.cs"]);
        assert_eq!(entry.comment(), "");
    }

    #[test]
    fn test_absorb_comment_policy() {
        let mut entry = ChangeLogEntry::from_event(event("a.cs", "checkin", ""));
        entry.absorb(event("b.cs", "checkin", "fix"));
        entry.absorb(event("c.cs", "checkin", "fix"));
        entry.absorb(event("d.cs", "checkin", "fixed again"));
        entry.absorb(event("e.cs", "checkin", ""));

        assert_eq!(entry.comment(), "fix\nfixed again");
        assert_eq!(entry.elements().len(), 5);
    }
}
