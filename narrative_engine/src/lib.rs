//! # Narrative Engine (The Vellum)
//!
//! The runtime of the branching story system. This crate consumes validated
//! graphs from `story_graph`, tracks playthrough state in tag pools, and
//! resolves every player action into the next beat of the story.
//!
//! ## Core Components
//!
//! - **tags**: Global and scene-local tag pools recording playthrough facts
//! - **resolver**: Ordered first-match route resolution against the pools
//! - **combat**: Round-based encounter state machine with terminal outcomes
//! - **session**: One playthrough, orchestrating options, combat, and routing
//!
//! ## Design Philosophy
//!
//! - **Author-Driven**: Scenes move only where a route says they move; the engine never invents a transition
//! - **Single-Actor**: One session processes one action at a time, so no locking is needed
//! - **Fail-Soft**: Authoring gaps at runtime surface as signals, not crashes or silent teleports

pub mod combat;
pub mod resolver;
pub mod session;
pub mod tags;

pub use combat::*;
pub use resolver::*;
pub use session::*;
pub use tags::*;
