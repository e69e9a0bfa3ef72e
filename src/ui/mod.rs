//! Smartmark UI layer.
//!
//! Pages are rendered on the server as plain HTML strings; the dashboard adds
//! a script that talks to the JSON API and the change stream.

pub mod pages;
