// Smartmark shared type definitions
// Each submodule defines types used across the application.

pub mod action;
pub mod bookmark;
pub mod change;
pub mod errors;
pub mod user;
