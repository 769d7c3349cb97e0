//! Routes and conditions - the conditional edges of the story graph.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A boolean predicate over one tag pool.
///
/// All three clauses are optional and an absent clause is vacuously
/// satisfied, so a condition with no clauses at all is always true. A
/// present-but-empty `all` or `none` is also vacuously true; a
/// present-but-empty `any` is false, since no tag can satisfy "any of
/// nothing".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Condition {
    /// Every listed tag must be present.
    pub all: Option<Vec<String>>,

    /// At least one listed tag must be present.
    pub any: Option<Vec<String>>,

    /// No listed tag may be present.
    pub none: Option<Vec<String>>,
}

impl Condition {
    /// Condition met only when every given tag is present.
    pub fn all_of(tags: &[&str]) -> Self {
        Self {
            all: Some(tags.iter().map(|t| t.to_string()).collect()),
            ..Self::default()
        }
    }

    /// Condition met when at least one given tag is present.
    pub fn any_of(tags: &[&str]) -> Self {
        Self {
            any: Some(tags.iter().map(|t| t.to_string()).collect()),
            ..Self::default()
        }
    }

    /// Condition met only while none of the given tags are present.
    pub fn none_of(tags: &[&str]) -> Self {
        Self {
            none: Some(tags.iter().map(|t| t.to_string()).collect()),
            ..Self::default()
        }
    }

    /// Evaluate against a tag pool.
    ///
    /// Pure and infallible: every clause degrades to its vacuous value when
    /// absent, never to an error.
    pub fn is_met(&self, pool: &HashSet<String>) -> bool {
        let all_ok = self
            .all
            .as_ref()
            .map_or(true, |tags| tags.iter().all(|t| pool.contains(t)));
        let any_ok = self
            .any
            .as_ref()
            .map_or(true, |tags| tags.iter().any(|t| pool.contains(t)));
        let none_ok = self
            .none
            .as_ref()
            .map_or(true, |tags| !tags.iter().any(|t| pool.contains(t)));

        all_ok && any_ok && none_ok
    }
}

/// One conditional alternative for where an option leads.
///
/// Route lists are evaluated in author order and the first match wins. A
/// route with no conditions matches unconditionally and belongs last: an
/// earlier condition-free route shadows everything after it, and the
/// resolver will not repair that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Route {
    /// Condition checked against the global tag pool.
    pub if_global: Option<Condition>,

    /// Condition checked against the scene tag pool.
    pub if_scene: Option<Condition>,

    /// Target scene id; `None` means "no transition / resolve later".
    pub to: Option<String>,
}

impl Route {
    /// Unconditional route to the given scene.
    pub fn to_scene(id: impl Into<String>) -> Self {
        Self {
            to: Some(id.into()),
            ..Self::default()
        }
    }

    /// Route that deliberately goes nowhere (`to: null`).
    pub fn stay() -> Self {
        Self::default()
    }

    /// Gate this route on the global pool.
    pub fn with_global(mut self, condition: Condition) -> Self {
        self.if_global = Some(condition);
        self
    }

    /// Gate this route on the scene pool.
    pub fn with_scene(mut self, condition: Condition) -> Self {
        self.if_scene = Some(condition);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(tags: &[&str]) -> HashSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_empty_condition_always_true() {
        let condition = Condition::default();

        assert!(condition.is_met(&pool(&[])));
        assert!(condition.is_met(&pool(&["sword", "lantern"])));
    }

    #[test]
    fn test_all_requires_every_member() {
        let condition = Condition::all_of(&["sword", "lantern"]);

        assert!(condition.is_met(&pool(&["sword", "lantern", "rope"])));
        assert!(!condition.is_met(&pool(&["sword"])));
        assert!(!condition.is_met(&pool(&[])));
    }

    #[test]
    fn test_any_requires_at_least_one() {
        let condition = Condition::any_of(&["sword", "lantern"]);

        assert!(condition.is_met(&pool(&["lantern"])));
        assert!(condition.is_met(&pool(&["sword", "lantern"])));
        assert!(!condition.is_met(&pool(&["rope"])));
    }

    #[test]
    fn test_none_rejects_any_member() {
        let condition = Condition::none_of(&["cursed"]);

        assert!(condition.is_met(&pool(&["sword"])));
        assert!(condition.is_met(&pool(&[])));
        assert!(!condition.is_met(&pool(&["cursed", "sword"])));
    }

    #[test]
    fn test_present_empty_clauses() {
        // Empty all/none are vacuous truths; empty any can never be satisfied.
        let empty_all = Condition::all_of(&[]);
        let empty_none = Condition::none_of(&[]);
        let empty_any = Condition::any_of(&[]);

        assert!(empty_all.is_met(&pool(&["sword"])));
        assert!(empty_none.is_met(&pool(&["sword"])));
        assert!(!empty_any.is_met(&pool(&["sword"])));
        assert!(!empty_any.is_met(&pool(&[])));
    }

    #[test]
    fn test_clauses_combine_conjunctively() {
        let condition = Condition {
            none: Some(vec!["cursed".to_string()]),
            ..Condition::all_of(&["sword"])
        };

        assert!(condition.is_met(&pool(&["sword"])));
        assert!(!condition.is_met(&pool(&["sword", "cursed"])));
        assert!(!condition.is_met(&pool(&["lantern"])));
    }

    #[test]
    fn test_route_parses_camel_case_and_null_target() {
        let route: Route =
            serde_json::from_str(r#"{"ifGlobal": {"all": ["sword"]}, "to": null}"#).unwrap();

        assert_eq!(route.if_global, Some(Condition::all_of(&["sword"])));
        assert!(route.if_scene.is_none());
        assert!(route.to.is_none());
    }

    #[test]
    fn test_route_builders() {
        let route = Route::to_scene("armory_win").with_global(Condition::all_of(&["sword"]));

        assert_eq!(route.to.as_deref(), Some("armory_win"));
        assert!(route.if_global.is_some());
        assert!(Route::stay().to.is_none());
    }
}
