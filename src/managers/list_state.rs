//! Client-held bookmark list, kept current by the change feed.

use tracing::debug;

use crate::services::change_feed::Subscription;
use crate::types::bookmark::Bookmark;
use crate::types::change::ChangeEvent;

/// In-memory list of one owner's bookmarks.
///
/// Starts from a server snapshot and is then driven by change events. There is
/// no ordering or conflict resolution: the last event applied wins.
#[derive(Debug, Clone, Default)]
pub struct BookmarkList {
    bookmarks: Vec<Bookmark>,
}

impl BookmarkList {
    pub fn new(initial: Vec<Bookmark>) -> Self {
        Self { bookmarks: initial }
    }

    /// Replaces the held list with a fresh snapshot.
    pub fn reset(&mut self, initial: Vec<Bookmark>) {
        self.bookmarks = initial;
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn get(&self, id: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.bookmarks.iter().position(|b| b.id == id)
    }

    /// Merges one change event into the list.
    ///
    /// - insert: appended unless the id is already held
    /// - update: replaces the held entry with the same id, unknown ids are ignored
    /// - delete: removes the entry with that id, if any
    pub fn apply(&mut self, event: &ChangeEvent) {
        match event {
            ChangeEvent::Insert(bookmark) => {
                if self.position(&bookmark.id).is_none() {
                    self.bookmarks.push(bookmark.clone());
                } else {
                    debug!(id = %bookmark.id, "insert for held bookmark ignored");
                }
            }
            ChangeEvent::Update(bookmark) => match self.position(&bookmark.id) {
                Some(idx) => self.bookmarks[idx] = bookmark.clone(),
                None => debug!(id = %bookmark.id, "update for unknown bookmark ignored"),
            },
            ChangeEvent::Delete { id, .. } => {
                self.bookmarks.retain(|b| &b.id != id);
            }
        }
    }

    /// Applies events from `subscription` until the feed closes.
    pub async fn follow(&mut self, subscription: &mut Subscription) {
        while let Some(event) = subscription.recv().await {
            self.apply(&event);
        }
    }
}
