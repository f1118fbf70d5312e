//! Data models for cclog
//!
//! Backend-independent structures for history events and the changelog
//! entries built from them.

mod entry;
mod event;

pub use entry::{ChangeLogEntry, EditType, FileElement};
pub use event::RawEvent;
