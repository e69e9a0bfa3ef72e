//! Bookmark Service for Smartmark.
//!
//! Owner-scoped CRUD over the bookmark store. Each operation checks the
//! caller, validates input, runs the store operation and then publishes the
//! resulting change on the [`ChangeFeed`].
//!
//! Changes are published while the connection lock is still held, so events
//! reach subscribers in the order the writes committed.

use std::sync::Arc;

use tracing::info;

use crate::database::Database;
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use crate::services::change_feed::ChangeFeed;
use crate::services::validation::{validate_title, validate_url};
use crate::types::bookmark::Bookmark;
use crate::types::change::ChangeEvent;
use crate::types::errors::{BookmarkError, ValidationError};
use crate::types::user::User;

/// Trait defining the bookmark use-cases exposed to the HTTP layer.
///
/// `caller` is `None` for an unauthenticated request; every method fails with
/// [`BookmarkError::Unauthorized`] in that case.
pub trait BookmarkServiceTrait {
    fn get_bookmarks(&self, caller: Option<&User>) -> Result<Vec<Bookmark>, BookmarkError>;
    fn create_bookmark(&self, caller: Option<&User>, title: &str, url: &str) -> Result<Bookmark, BookmarkError>;
    fn update_bookmark(&self, caller: Option<&User>, id: &str, title: &str, url: &str) -> Result<Bookmark, BookmarkError>;
    fn delete_bookmark(&self, caller: Option<&User>, id: &str) -> Result<(), BookmarkError>;
}

/// Bookmark service backed by SQLite and an in-process change feed.
#[derive(Clone)]
pub struct BookmarkService {
    db: Arc<Database>,
    feed: ChangeFeed,
}

impl BookmarkService {
    pub fn new(db: Arc<Database>, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    fn require_user(caller: Option<&User>) -> Result<&User, BookmarkError> {
        caller.ok_or(BookmarkError::Unauthorized)
    }
}

impl BookmarkServiceTrait for BookmarkService {
    /// Lists the caller's bookmarks, newest first.
    fn get_bookmarks(&self, caller: Option<&User>) -> Result<Vec<Bookmark>, BookmarkError> {
        let user = Self::require_user(caller)?;
        let conn = self.db.connection();
        BookmarkManager::new(&conn).list_bookmarks(&user.id)
    }

    /// Creates a bookmark after validating input and rejecting a URL the caller already saved.
    ///
    /// The duplicate check and the insert are separate statements, so two
    /// concurrent requests for the same URL can both pass the check.
    fn create_bookmark(
        &self,
        caller: Option<&User>,
        title: &str,
        url: &str,
    ) -> Result<Bookmark, BookmarkError> {
        let user = Self::require_user(caller)?;
        validate_title(title)?;
        validate_url(url)?;
        let (title, url) = (title.trim(), url.trim());

        let bookmark = {
            let conn = self.db.connection();
            let mut mgr = BookmarkManager::new(&conn);
            if mgr.find_by_url(&user.id, url)?.is_some() {
                return Err(ValidationError::DuplicateUrl.into());
            }
            let bookmark = mgr.insert_bookmark(&user.id, title, url)?;
            self.feed.publish(ChangeEvent::Insert(bookmark.clone()));
            bookmark
        };

        info!(user_id = %user.id, id = %bookmark.id, "bookmark created");
        Ok(bookmark)
    }

    /// Replaces the title and URL of one of the caller's bookmarks.
    fn update_bookmark(
        &self,
        caller: Option<&User>,
        id: &str,
        title: &str,
        url: &str,
    ) -> Result<Bookmark, BookmarkError> {
        let user = Self::require_user(caller)?;
        validate_title(title)?;
        validate_url(url)?;
        let (title, url) = (title.trim(), url.trim());

        let bookmark = {
            let conn = self.db.connection();
            let mut mgr = BookmarkManager::new(&conn);
            if mgr.get_bookmark(&user.id, id)?.is_none() {
                return Err(BookmarkError::NotFound(id.to_string()));
            }
            if let Some(existing) = mgr.find_by_url(&user.id, url)? {
                if existing != id {
                    return Err(ValidationError::DuplicateUrl.into());
                }
            }
            let bookmark = mgr.update_bookmark(&user.id, id, title, url)?;
            self.feed.publish(ChangeEvent::Update(bookmark.clone()));
            bookmark
        };

        info!(user_id = %user.id, id = %bookmark.id, "bookmark updated");
        Ok(bookmark)
    }

    fn delete_bookmark(&self, caller: Option<&User>, id: &str) -> Result<(), BookmarkError> {
        let user = Self::require_user(caller)?;

        {
            let conn = self.db.connection();
            let removed = BookmarkManager::new(&conn).delete_bookmark(&user.id, id)?;
            self.feed.publish(ChangeEvent::Delete {
                id: removed.id,
                user_id: removed.user_id,
            });
        }

        info!(user_id = %user.id, id = %id, "bookmark deleted");
        Ok(())
    }
}
