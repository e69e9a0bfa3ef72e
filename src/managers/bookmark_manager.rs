//! Bookmark Manager for Smartmark.
//!
//! Implements `BookmarkManagerTrait`: owner-scoped select/insert/update/delete
//! on the `bookmarks` table, backed by SQLite via `rusqlite`. Callers are
//! expected to have validated input already.

use rusqlite::{params, Connection, OptionalExtension};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::types::bookmark::Bookmark;
use crate::types::errors::BookmarkError;

/// Trait defining bookmark table operations. Every query is scoped by owner.
pub trait BookmarkManagerTrait {
    /// Lists the owner's bookmarks, newest first.
    fn list_bookmarks(&self, user_id: &str) -> Result<Vec<Bookmark>, BookmarkError>;
    fn get_bookmark(&self, user_id: &str, id: &str) -> Result<Option<Bookmark>, BookmarkError>;
    /// Returns the id of the owner's bookmark with exactly this URL, if any.
    fn find_by_url(&self, user_id: &str, url: &str) -> Result<Option<String>, BookmarkError>;
    fn insert_bookmark(&mut self, user_id: &str, title: &str, url: &str) -> Result<Bookmark, BookmarkError>;
    fn update_bookmark(&mut self, user_id: &str, id: &str, title: &str, url: &str) -> Result<Bookmark, BookmarkError>;
    /// Deletes a bookmark and returns the removed row.
    fn delete_bookmark(&mut self, user_id: &str, id: &str) -> Result<Bookmark, BookmarkError>;
}

/// Bookmark manager backed by a SQLite connection.
pub struct BookmarkManager<'a> {
    conn: &'a Connection,
}

impl<'a> BookmarkManager<'a> {
    /// Creates a new `BookmarkManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Reads a single `Bookmark` row into a struct.
    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            url: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

impl<'a> BookmarkManagerTrait for BookmarkManager<'a> {
    fn list_bookmarks(&self, user_id: &str) -> Result<Vec<Bookmark>, BookmarkError> {
        // rowid breaks ties between bookmarks created in the same second
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, title, url, created_at FROM bookmarks \
             WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
        )?;

        let rows = stmt.query_map(params![user_id], Self::row_to_bookmark)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    fn get_bookmark(&self, user_id: &str, id: &str) -> Result<Option<Bookmark>, BookmarkError> {
        let bookmark = self
            .conn
            .query_row(
                "SELECT id, user_id, title, url, created_at FROM bookmarks \
                 WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
                Self::row_to_bookmark,
            )
            .optional()?;
        Ok(bookmark)
    }

    fn find_by_url(&self, user_id: &str, url: &str) -> Result<Option<String>, BookmarkError> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM bookmarks WHERE user_id = ?1 AND url = ?2 LIMIT 1",
                params![user_id, url],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Inserts a new bookmark and returns the stored row.
    fn insert_bookmark(
        &mut self,
        user_id: &str,
        title: &str,
        url: &str,
    ) -> Result<Bookmark, BookmarkError> {
        let bookmark = Bookmark {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            created_at: Self::now(),
        };

        self.conn.execute(
            "INSERT INTO bookmarks (id, user_id, title, url, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                bookmark.id,
                bookmark.user_id,
                bookmark.title,
                bookmark.url,
                bookmark.created_at
            ],
        )?;

        Ok(bookmark)
    }

    /// Replaces the title and url of an existing bookmark.
    fn update_bookmark(
        &mut self,
        user_id: &str,
        id: &str,
        title: &str,
        url: &str,
    ) -> Result<Bookmark, BookmarkError> {
        let affected = self.conn.execute(
            "UPDATE bookmarks SET title = ?1, url = ?2 WHERE id = ?3 AND user_id = ?4",
            params![title, url, id, user_id],
        )?;

        if affected == 0 {
            return Err(BookmarkError::NotFound(id.to_string()));
        }
        self.get_bookmark(user_id, id)?
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))
    }

    fn delete_bookmark(&mut self, user_id: &str, id: &str) -> Result<Bookmark, BookmarkError> {
        let existing = self
            .get_bookmark(user_id, id)?
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))?;

        let affected = self.conn.execute(
            "DELETE FROM bookmarks WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;

        if affected == 0 {
            return Err(BookmarkError::NotFound(id.to_string()));
        }
        Ok(existing)
    }
}
