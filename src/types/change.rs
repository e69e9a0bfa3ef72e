use serde::{Deserialize, Serialize};

use super::bookmark::Bookmark;

/// A row-level change on the bookmarks table, as pushed to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "UPPERCASE")]
pub enum ChangeEvent {
    Insert(Bookmark),
    Update(Bookmark),
    Delete { id: String, user_id: String },
}

impl ChangeEvent {
    /// Id of the bookmark the event refers to.
    pub fn bookmark_id(&self) -> &str {
        match self {
            ChangeEvent::Insert(b) | ChangeEvent::Update(b) => &b.id,
            ChangeEvent::Delete { id, .. } => id,
        }
    }

    /// Owner of the bookmark the event refers to.
    pub fn owner_id(&self) -> &str {
        match self {
            ChangeEvent::Insert(b) | ChangeEvent::Update(b) => &b.user_id,
            ChangeEvent::Delete { user_id, .. } => user_id,
        }
    }

    /// Event name used on the wire (`INSERT`, `UPDATE`, `DELETE`).
    pub fn kind(&self) -> &'static str {
        match self {
            ChangeEvent::Insert(_) => "INSERT",
            ChangeEvent::Update(_) => "UPDATE",
            ChangeEvent::Delete { .. } => "DELETE",
        }
    }
}
