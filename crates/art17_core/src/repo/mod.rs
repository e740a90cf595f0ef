//! Repository layer: generic entity contract and the blob-backed store.
//!
//! # Responsibility
//! - Keep one CRUD implementation for every list-shaped record type.
//! - Isolate JSON blob layout and key names from renderers and forms.
//!
//! # Invariants
//! - Write paths persist the whole owning blob after every mutation.
//! - Lookups by unknown id return `StoreError::NotFound`, never panic.

pub mod admin_store;
pub mod entity;
