//! Raw history event data model

use chrono::NaiveDateTime;

use super::EditType;
use crate::cleartool::constants::events;

/// One parsed `lshistory` header plus its comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    /// When the event happened (second precision, backend local time)
    pub timestamp: NaiveDateTime,

    /// User who performed the event
    pub user: String,

    /// Free-text event description (e.g. "create version")
    pub event_kind: String,

    /// Element path, with separators as emitted by cleartool
    pub file_path: String,

    /// Version label (e.g. `\main\sit_r5_maint\1`)
    pub version_label: String,

    /// Operation code (e.g. "mkelem", "checkin")
    pub operation: String,

    /// Comment text, empty when the event carried none
    pub comment: String,
}

impl RawEvent {
    /// Edit classification derived from the operation code
    pub fn edit_type(&self) -> Option<EditType> {
        EditType::from_operation(&self.operation)
    }

    /// Is this the branch removal event emitted by the empty-branch trigger?
    ///
    /// Matches `destroy sub-branch "<name>" of branch` case-sensitively.
    pub fn is_destroy_sub_branch(&self) -> bool {
        self.event_kind
            .find(events::DESTROY_SUB_BRANCH)
            .is_some_and(|start| {
                self.event_kind[start + events::DESTROY_SUB_BRANCH.len()..]
                    .contains(events::OF_BRANCH)
            })
    }
}
