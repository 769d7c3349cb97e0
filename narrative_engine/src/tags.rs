//! Tag pools - the story state a playthrough accumulates.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The two tag pools of a playthrough.
///
/// The global pool persists for the whole session; the scene pool is cleared
/// on every scene entry. Tags are opaque strings with set semantics: adds
/// are idempotent and membership is presence-only. Global tags have no
/// removal; scene tags go away only through the reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TagStore {
    global: HashSet<String>,
    scene: HashSet<String>,
}

impl TagStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag to the global pool. Idempotent.
    pub fn add_global(&mut self, tag: impl Into<String>) {
        self.global.insert(tag.into());
    }

    /// Add a tag to the scene pool. Idempotent.
    pub fn add_scene(&mut self, tag: impl Into<String>) {
        self.scene.insert(tag.into());
    }

    /// Whether the global pool holds the tag.
    pub fn has_global(&self, tag: &str) -> bool {
        self.global.contains(tag)
    }

    /// Whether the scene pool holds the tag.
    pub fn has_scene(&self, tag: &str) -> bool {
        self.scene.contains(tag)
    }

    /// Clear the scene pool, leaving the global pool untouched. Runs on
    /// every scene entry before any scene-local logic.
    pub fn reset_scene(&mut self) {
        self.scene.clear();
    }

    /// Read-only view of the global pool.
    pub fn global(&self) -> &HashSet<String> {
        &self.global
    }

    /// Read-only view of the scene pool.
    pub fn scene(&self) -> &HashSet<String> {
        &self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = TagStore::new();

        assert!(store.global().is_empty());
        assert!(store.scene().is_empty());
    }

    #[test]
    fn test_adds_are_idempotent() {
        let mut store = TagStore::new();

        store.add_global("sword");
        store.add_global("sword");
        store.add_scene("searched");
        store.add_scene("searched");

        assert_eq!(store.global().len(), 1);
        assert_eq!(store.scene().len(), 1);
    }

    #[test]
    fn test_pools_are_independent() {
        let mut store = TagStore::new();

        store.add_global("sword");
        store.add_scene("searched");

        assert!(store.has_global("sword"));
        assert!(!store.has_scene("sword"));
        assert!(store.has_scene("searched"));
        assert!(!store.has_global("searched"));
    }

    #[test]
    fn test_reset_scene_spares_global_pool() {
        let mut store = TagStore::new();

        store.add_global("sword");
        store.add_scene("searched");
        store.reset_scene();

        assert!(store.scene().is_empty());
        assert!(store.has_global("sword"));
    }
}
