use serde::{Deserialize, Serialize};

/// Maximum number of characters allowed in a bookmark title.
pub const MAX_TITLE_CHARS: usize = 200;

/// Represents a saved bookmark owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub created_at: i64,
}

/// Title and URL as submitted by a form, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookmarkForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}
