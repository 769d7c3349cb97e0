//! Scene definitions - the nodes of the authored story graph.

pub mod choice;
pub mod route;

pub use choice::*;
pub use route::*;

use serde::{Deserialize, Serialize};

/// How a scene plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SceneMode {
    /// Plain narrative; options route directly.
    #[default]
    Story,

    /// Options are combat actions against the scene's enemy; routes wait for
    /// a terminal outcome.
    Combat,

    /// Story routing with a presentation timer attached.
    Timed,
}

/// Enemy and party setup for a combat-mode scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatSpec {
    /// Enemy display name.
    pub enemy: String,

    /// Enemy starting and maximum HP.
    pub enemy_hp: i32,

    /// Party starting and maximum HP.
    pub party_hp: i32,

    /// Damage the enemy deals back each round.
    #[serde(default)]
    pub attack: i32,

    /// Whether an escape action is honored.
    #[serde(default = "default_allow_run")]
    pub allow_run: bool,
}

fn default_allow_run() -> bool {
    true
}

impl CombatSpec {
    /// Create a combat setup with no counter damage and escape allowed.
    pub fn new(enemy: impl Into<String>, enemy_hp: i32, party_hp: i32) -> Self {
        Self {
            enemy: enemy.into(),
            enemy_hp,
            party_hp,
            attack: 0,
            allow_run: true,
        }
    }

    /// Set the enemy's per-round counter damage.
    pub fn with_attack(mut self, attack: i32) -> Self {
        self.attack = attack;
        self
    }

    /// Forbid escaping this encounter.
    pub fn without_escape(mut self) -> Self {
        self.allow_run = false;
        self
    }
}

/// Presentation timer for a timed-mode scene. Routing is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedSpec {
    /// Timer flavor, e.g. "countdown".
    pub kind: String,
    pub seconds: u32,
}

/// A node in the narrative graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    pub title: String,

    /// Narrative text shown on entry.
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub mode: SceneMode,

    /// An ending scene closes the session and offers no options.
    #[serde(default)]
    pub ending: bool,

    /// Seed tags added to the scene pool on every entry.
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub options: Vec<Choice>,

    /// Combat payload; required when mode is combat.
    #[serde(default)]
    pub combat: Option<CombatSpec>,

    /// Timer payload; required when mode is timed.
    #[serde(default)]
    pub timed: Option<TimedSpec>,
}

impl Scene {
    /// Create a story-mode scene with the given id and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: String::new(),
            mode: SceneMode::Story,
            ending: false,
            tags: Vec::new(),
            options: Vec::new(),
            combat: None,
            timed: None,
        }
    }

    /// Set the narrative text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Append an option, preserving author order.
    pub fn with_option(mut self, option: Choice) -> Self {
        self.options.push(option);
        self
    }

    /// Add a seed tag for the scene pool.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Mark this scene as an ending.
    pub fn with_ending(mut self) -> Self {
        self.ending = true;
        self
    }

    /// Attach a combat payload and switch the mode to combat.
    pub fn with_combat(mut self, combat: CombatSpec) -> Self {
        self.mode = SceneMode::Combat;
        self.combat = Some(combat);
        self
    }

    /// Attach a timer payload and switch the mode to timed.
    pub fn with_timed(mut self, timed: TimedSpec) -> Self {
        self.mode = SceneMode::Timed;
        self.timed = Some(timed);
        self
    }

    /// Look up an option by id.
    pub fn option(&self, id: &str) -> Option<&Choice> {
        self.options.iter().find(|option| option.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_scene_parses_with_defaults() {
        let scene: Scene = serde_json::from_str(r#"{"id": "start", "title": "Start"}"#).unwrap();

        assert_eq!(scene.mode, SceneMode::Story);
        assert!(!scene.ending);
        assert!(scene.options.is_empty());
        assert!(scene.combat.is_none());
    }

    #[test]
    fn test_mode_parses_lowercase() {
        let scene: Scene = serde_json::from_str(
            r#"{"id": "pit", "title": "The Pit", "mode": "combat",
                "combat": {"enemy": "Gravewolf", "enemyHp": 12, "partyHp": 10}}"#,
        )
        .unwrap();

        assert_eq!(scene.mode, SceneMode::Combat);
        let combat = scene.combat.unwrap();
        assert_eq!(combat.enemy, "Gravewolf");
        assert_eq!(combat.attack, 0);
        assert!(combat.allow_run);
    }

    #[test]
    fn test_combat_spec_builders() {
        let spec = CombatSpec::new("Warden", 20, 10)
            .with_attack(3)
            .without_escape();

        assert_eq!(spec.attack, 3);
        assert!(!spec.allow_run);
    }

    #[test]
    fn test_option_lookup() {
        let scene = Scene::new("gate", "The Gate")
            .with_option(Choice::new("knock", "Knock"))
            .with_option(Choice::new("wait", "Wait"));

        assert!(scene.option("knock").is_some());
        assert!(scene.option("wait").is_some());
        assert!(scene.option("shout").is_none());
    }

    #[test]
    fn test_timed_scene_builder() {
        let scene = Scene::new("fuse", "The Fuse").with_timed(TimedSpec {
            kind: "countdown".to_string(),
            seconds: 30,
        });

        assert_eq!(scene.mode, SceneMode::Timed);
        assert_eq!(scene.timed.unwrap().seconds, 30);
    }
}
