//! Player-facing options within a scene.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Route;

/// The combat action an option performs when its scene is combat-mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChoiceAction {
    /// Attack the enemy for the given damage; the enemy counters per its
    /// stats.
    Strike { damage: i32 },

    /// Attempt to retreat from the encounter.
    Run,
}

/// A player-facing choice within a scene.
///
/// Carries the ordered routes deciding where it leads, the tags it grants
/// when taken, and an availability list: the choice is withheld once any id
/// in `disabled_after` (possibly its own) has been taken during the current
/// scene visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub id: String,

    /// Display text shown to the player.
    pub text: String,

    /// Ordered routes; the first whose conditions hold decides the outcome.
    #[serde(default)]
    pub routes: Vec<Route>,

    /// Option ids whose taking withholds this choice for the rest of the
    /// visit.
    #[serde(default)]
    pub disabled_after: Vec<String>,

    /// Tags added to the global pool when this choice is taken.
    #[serde(default)]
    pub grant_global: Vec<String>,

    /// Tags added to the scene pool when this choice is taken.
    #[serde(default)]
    pub grant_scene: Vec<String>,

    /// Combat action; required on every option of a combat scene.
    #[serde(default)]
    pub action: Option<ChoiceAction>,
}

impl Choice {
    /// Create a choice with the given id and display text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            routes: Vec::new(),
            disabled_after: Vec::new(),
            grant_global: Vec::new(),
            grant_scene: Vec::new(),
            action: None,
        }
    }

    /// Append a route, preserving author order.
    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Withhold this choice after the given option id has been taken.
    pub fn with_disabled_after(mut self, id: impl Into<String>) -> Self {
        self.disabled_after.push(id.into());
        self
    }

    /// Grant a global tag when this choice is taken.
    pub fn with_global_grant(mut self, tag: impl Into<String>) -> Self {
        self.grant_global.push(tag.into());
        self
    }

    /// Grant a scene tag when this choice is taken.
    pub fn with_scene_grant(mut self, tag: impl Into<String>) -> Self {
        self.grant_scene.push(tag.into());
        self
    }

    /// Set the combat action this choice performs.
    pub fn with_action(mut self, action: ChoiceAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Whether this choice is offered, given the option ids already taken
    /// during the current scene visit.
    pub fn is_offered(&self, taken: &HashSet<String>) -> bool {
        !self.disabled_after.iter().any(|id| taken.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taken(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_new_choice() {
        let choice = Choice::new("go", "Go north");

        assert_eq!(choice.id, "go");
        assert_eq!(choice.text, "Go north");
        assert!(choice.routes.is_empty());
        assert!(choice.action.is_none());
    }

    #[test]
    fn test_offered_until_disabling_option_taken() {
        let choice = Choice::new("bribe", "Offer coin").with_disabled_after("threaten");

        assert!(choice.is_offered(&taken(&[])));
        assert!(choice.is_offered(&taken(&["bribe"])));
        assert!(!choice.is_offered(&taken(&["threaten"])));
    }

    #[test]
    fn test_self_disabling_choice() {
        let choice = Choice::new("search", "Search the room").with_disabled_after("search");

        assert!(choice.is_offered(&taken(&[])));
        assert!(!choice.is_offered(&taken(&["search"])));
    }

    #[test]
    fn test_action_parses_tagged_form() {
        let strike: ChoiceAction =
            serde_json::from_str(r#"{"type": "strike", "damage": 6}"#).unwrap();
        let run: ChoiceAction = serde_json::from_str(r#"{"type": "run"}"#).unwrap();

        assert!(matches!(strike, ChoiceAction::Strike { damage: 6 }));
        assert!(matches!(run, ChoiceAction::Run));
    }

    #[test]
    fn test_choice_parses_with_defaults() {
        let choice: Choice = serde_json::from_str(
            r#"{"id": "go", "text": "Go", "grantGlobal": ["left_home"]}"#,
        )
        .unwrap();

        assert_eq!(choice.grant_global, vec!["left_home".to_string()]);
        assert!(choice.grant_scene.is_empty());
        assert!(choice.disabled_after.is_empty());
    }
}
