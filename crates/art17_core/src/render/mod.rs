//! HTML fragment renderers for the admin panel and the public site.
//!
//! # Responsibility
//! - Turn record slices into complete HTML fragments.
//! - Produce a fixed empty-state fragment for every empty list.
//!
//! # Invariants
//! - Fragments are built with `maud::html!`, so every spliced value is escaped.
//! - Rendering is pure; callers re-render the whole fragment after a change.

pub mod admin;
mod html;
pub mod site;
