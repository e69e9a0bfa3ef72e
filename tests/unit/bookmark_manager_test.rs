//! Unit tests for the SQLite-backed bookmark store.

use rusqlite::Connection;
use smartmark::database::migrations::run_all;
use smartmark::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use smartmark::types::errors::BookmarkError;

fn setup_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    run_all(&conn).unwrap();
    conn
}

#[test]
fn test_insert_and_list() {
    let conn = setup_db();
    let mut mgr = BookmarkManager::new(&conn);

    let bookmark = mgr
        .insert_bookmark("alice", "Rust", "https://www.rust-lang.org")
        .unwrap();
    assert!(!bookmark.id.is_empty());
    assert_eq!(bookmark.user_id, "alice");
    assert_eq!(bookmark.title, "Rust");
    assert_eq!(bookmark.url, "https://www.rust-lang.org");
    assert!(bookmark.created_at > 0);

    let listed = mgr.list_bookmarks("alice").unwrap();
    assert_eq!(listed, vec![bookmark]);
}

#[test]
fn test_ids_are_unique() {
    let conn = setup_db();
    let mut mgr = BookmarkManager::new(&conn);
    let a = mgr.insert_bookmark("alice", "A", "https://a.example.com").unwrap();
    let b = mgr.insert_bookmark("alice", "B", "https://b.example.com").unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn test_list_is_newest_first() {
    let conn = setup_db();
    let mut mgr = BookmarkManager::new(&conn);
    let first = mgr.insert_bookmark("alice", "First", "https://one.example.com").unwrap();
    let second = mgr.insert_bookmark("alice", "Second", "https://two.example.com").unwrap();
    let third = mgr.insert_bookmark("alice", "Third", "https://three.example.com").unwrap();

    let ids: Vec<String> = mgr
        .list_bookmarks("alice")
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[test]
fn test_list_older_timestamp_sorts_last() {
    let conn = setup_db();
    let mut mgr = BookmarkManager::new(&conn);
    let old = mgr.insert_bookmark("alice", "Old", "https://old.example.com").unwrap();
    let new = mgr.insert_bookmark("alice", "New", "https://new.example.com").unwrap();
    conn.execute(
        "UPDATE bookmarks SET created_at = created_at + 100 WHERE id = ?1",
        [&old.id],
    )
    .unwrap();

    let listed = mgr.list_bookmarks("alice").unwrap();
    assert_eq!(listed[0].id, old.id);
    assert_eq!(listed[1].id, new.id);
}

#[test]
fn test_list_is_owner_scoped() {
    let conn = setup_db();
    let mut mgr = BookmarkManager::new(&conn);
    mgr.insert_bookmark("alice", "Mine", "https://a.example.com").unwrap();
    mgr.insert_bookmark("bob", "Theirs", "https://b.example.com").unwrap();

    let alice = mgr.list_bookmarks("alice").unwrap();
    assert_eq!(alice.len(), 1);
    assert_eq!(alice[0].title, "Mine");
    assert!(mgr.list_bookmarks("carol").unwrap().is_empty());
}

#[test]
fn test_get_bookmark_respects_owner() {
    let conn = setup_db();
    let mut mgr = BookmarkManager::new(&conn);
    let bookmark = mgr.insert_bookmark("alice", "Mine", "https://a.example.com").unwrap();

    assert_eq!(mgr.get_bookmark("alice", &bookmark.id).unwrap(), Some(bookmark.clone()));
    assert_eq!(mgr.get_bookmark("bob", &bookmark.id).unwrap(), None);
    assert_eq!(mgr.get_bookmark("alice", "missing").unwrap(), None);
}

#[test]
fn test_find_by_url_exact_and_scoped() {
    let conn = setup_db();
    let mut mgr = BookmarkManager::new(&conn);
    let bookmark = mgr.insert_bookmark("alice", "A", "https://a.example.com").unwrap();

    assert_eq!(
        mgr.find_by_url("alice", "https://a.example.com").unwrap(),
        Some(bookmark.id)
    );
    assert_eq!(mgr.find_by_url("alice", "https://a.example.com/").unwrap(), None);
    assert_eq!(mgr.find_by_url("bob", "https://a.example.com").unwrap(), None);
}

#[test]
fn test_store_does_not_enforce_url_uniqueness() {
    let conn = setup_db();
    let mut mgr = BookmarkManager::new(&conn);
    mgr.insert_bookmark("alice", "A", "https://a.example.com").unwrap();
    mgr.insert_bookmark("alice", "A again", "https://a.example.com").unwrap();
    assert_eq!(mgr.list_bookmarks("alice").unwrap().len(), 2);
}

#[test]
fn test_update_bookmark() {
    let conn = setup_db();
    let mut mgr = BookmarkManager::new(&conn);
    let original = mgr.insert_bookmark("alice", "Old", "https://old.example.com").unwrap();

    let updated = mgr
        .update_bookmark("alice", &original.id, "New", "https://new.example.com")
        .unwrap();
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.title, "New");
    assert_eq!(updated.url, "https://new.example.com");
    assert_eq!(updated.created_at, original.created_at);
}

#[test]
fn test_update_other_owner_is_not_found() {
    let conn = setup_db();
    let mut mgr = BookmarkManager::new(&conn);
    let original = mgr.insert_bookmark("alice", "Mine", "https://a.example.com").unwrap();

    let result = mgr.update_bookmark("bob", &original.id, "Stolen", "https://b.example.com");
    assert!(matches!(result, Err(BookmarkError::NotFound(_))));
    assert_eq!(
        mgr.get_bookmark("alice", &original.id).unwrap().unwrap().title,
        "Mine"
    );
}

#[test]
fn test_delete_bookmark_returns_removed_row() {
    let conn = setup_db();
    let mut mgr = BookmarkManager::new(&conn);
    let bookmark = mgr.insert_bookmark("alice", "A", "https://a.example.com").unwrap();

    let removed = mgr.delete_bookmark("alice", &bookmark.id).unwrap();
    assert_eq!(removed, bookmark);
    assert!(mgr.list_bookmarks("alice").unwrap().is_empty());
}

#[test]
fn test_delete_missing_or_foreign_is_not_found() {
    let conn = setup_db();
    let mut mgr = BookmarkManager::new(&conn);
    let bookmark = mgr.insert_bookmark("alice", "A", "https://a.example.com").unwrap();

    assert!(matches!(
        mgr.delete_bookmark("alice", "missing"),
        Err(BookmarkError::NotFound(_))
    ));
    assert!(matches!(
        mgr.delete_bookmark("bob", &bookmark.id),
        Err(BookmarkError::NotFound(_))
    ));
    assert_eq!(mgr.list_bookmarks("alice").unwrap().len(), 1);
}
