//! Content domain model.
//!
//! # Responsibility
//! - Define the records persisted in the business, image, application,
//!   settings and activity blobs.
//! - Keep JSON field names compatible with blobs written by the public site.
//!
//! # Invariants
//! - Every list record carries a stable `EntityId`.
//! - Records are plain data; persistence and id assignment live in `repo`.

pub mod activity;
pub mod application;
pub mod blob;
pub mod id;
pub mod image;
pub mod product;
pub mod service;
pub mod settings;
