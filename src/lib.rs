//! Smartmark: a bookmark manager with OAuth sign-in and live sync across browser sessions.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod config;
pub mod database;
pub mod managers;
pub mod routes;
pub mod server;
pub mod services;
pub mod types;
pub mod ui;
