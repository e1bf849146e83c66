//! Functional core for folio.
//!
//! Pure types, key builders and policies shared by the server. Nothing in
//! this crate performs I/O; the `Cache` and repository traits describe the
//! seams the server implements.

pub mod analytics;
pub mod auth;
pub mod cache;
pub mod content;
pub mod storage;
