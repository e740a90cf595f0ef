//! Use-case services on top of the store.
//!
//! # Responsibility
//! - Bind forms to records and validate required fields.
//! - Convert outcomes and errors into user-visible notices.
//! - Load public site content and move whole data sets in and out.
//!
//! # Invariants
//! - Services never write blobs directly; every write goes through
//!   `AdminStore`.

pub mod forms;
pub mod notice;
pub mod site;
pub mod transfer;
pub mod upload;
