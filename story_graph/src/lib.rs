//! # Story Graph
//!
//! The "Story Bible" crate - the authored data model for Vellum stories:
//! scenes, options, conditional routes, and the validated graph a session
//! runs against. This crate defines what the author wrote; nothing in it
//! mutates at runtime.

pub mod document;
pub mod scene;

pub use document::*;
pub use scene::*;
