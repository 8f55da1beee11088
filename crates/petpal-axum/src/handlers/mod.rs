//! HTTP request handlers for the Axum web server.
//!
//! Each submodule contains handlers for a specific API area.
//! Handlers are thin wrappers that delegate to `AppCore`.

pub mod catalog;
pub mod events;
pub mod health;
pub mod map;
pub mod pets;
