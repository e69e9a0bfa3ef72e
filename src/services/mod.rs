// Smartmark services
// Services hold the use-cases: validation, bookmark CRUD, actions, auth and the change feed.

pub mod actions;
pub mod auth;
pub mod bookmark_service;
pub mod change_feed;
pub mod validation;
