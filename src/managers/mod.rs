// Smartmark state managers
// Managers own table-level storage (bookmarks, sessions) and client-held list state.

pub mod bookmark_manager;
pub mod list_state;
pub mod session_manager;
