//! Story sessions - the orchestrator driving one playthrough.
//!
//! A session owns the validated graph, the tag pools, and the active
//! encounter. One accepted player action flows as follows:
//! 1. **Eligibility**: the option must exist in the current scene and still
//!    be offered
//! 2. **Combat**: on a combat scene the action resolves one round; routes
//!    wait until the encounter ends and the outcome tag is in the scene pool
//! 3. **Grants**: the option's tags land in their pools
//! 4. **Routing**: the first matching route decides the next scene
//! 5. **Entry**: entering a scene clears scene-local state before anything
//!    else runs
//!
//! Every mutating operation takes `&mut self`, so a session processes
//! strictly one action at a time and two sessions share no state.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

use story_graph::{Choice, Scene, SceneMode, StoryGraph};

use crate::combat::{CombatError, CombatSnapshot, Encounter};
use crate::resolver::{resolve, Destination};
use crate::tags::TagStore;

/// Unique identifier for a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a nil/empty session ID (useful for defaults).
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What to do when an option's route list matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapPolicy {
    /// Surface the gap and keep the session on the same scene with the same
    /// options.
    #[default]
    Stay,

    /// Surface the gap and end the session.
    End,
}

/// Session tuning knobs.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Behavior when no route matches.
    pub gap_policy: GapPolicy,
}

/// Whether a session still accepts actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Active,
    Ended,
}

/// What happened as a result of one accepted player action.
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    /// A combat round resolved and the encounter continues.
    Fighting(CombatSnapshot),

    /// The story moved to the named scene.
    Moved(String),

    /// A matched route declared no transition; the scene repeats.
    Stayed,

    /// The story entered the named ending scene.
    Ended(String),
}

/// Rejected or failed player actions. The session's scene never changes
/// when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No route of the selected option matched the current tag pools. The
    /// selection itself stands (its grants remain applied, idempotently),
    /// but the story did not move; re-offering the same options is safe.
    #[error("no route matched for option '{option}' in scene '{scene}'")]
    AuthoringGap { scene: String, option: String },

    /// The option does not exist in the current scene, or is withheld this
    /// visit.
    #[error("option '{option}' is not available in scene '{scene}'")]
    UnknownOption { scene: String, option: String },

    /// The story has ended; no further actions are accepted.
    #[error("the story has ended at scene '{0}'")]
    SessionEnded(String),

    /// A combat action was rejected by the encounter.
    #[error(transparent)]
    Combat(#[from] CombatError),
}

/// One playthrough of a story.
///
/// The session owns its graph, pools, and encounter outright; embedders
/// running several playthroughs hold several sessions.
pub struct StorySession {
    id: SessionId,
    graph: StoryGraph,
    config: SessionConfig,
    current: String,
    tags: TagStore,
    encounter: Option<Encounter>,
    taken: HashSet<String>,
    status: SessionStatus,
}

impl StorySession {
    /// Start a session at the graph's start scene.
    pub fn new(graph: StoryGraph, config: SessionConfig) -> Self {
        let start = graph.start().to_string();
        let mut session = Self {
            id: SessionId::new(),
            graph,
            config,
            current: String::new(),
            tags: TagStore::new(),
            encounter: None,
            taken: HashSet::new(),
            status: SessionStatus::Active,
        };
        session.enter_scene(&start);
        session
    }

    /// Start a session with the default configuration.
    pub fn with_defaults(graph: StoryGraph) -> Self {
        Self::new(graph, SessionConfig::default())
    }

    /// Apply one player action: select an option of the current scene by id.
    pub fn select_choice(&mut self, choice_id: &str) -> Result<Turn, EngineError> {
        if self.status == SessionStatus::Ended {
            return Err(EngineError::SessionEnded(self.current.clone()));
        }

        let looked_up = self.current_scene().and_then(|scene| {
            scene
                .option(choice_id)
                .filter(|choice| choice.is_offered(&self.taken))
                .map(|choice| (scene.mode, choice.clone()))
        });
        let (mode, choice) = looked_up.ok_or_else(|| EngineError::UnknownOption {
            scene: self.current.clone(),
            option: choice_id.to_string(),
        })?;

        // Combat scenes resolve a round before anything else; a rejected
        // round rejects the whole selection, untouched.
        let mut fighting: Option<Turn> = None;
        if mode == SceneMode::Combat {
            if let (Some(encounter), Some(action)) = (self.encounter.as_mut(), &choice.action) {
                if encounter.outcome().is_none() {
                    match encounter.resolve_round(action)? {
                        None => fighting = Some(Turn::Fighting(encounter.snapshot())),
                        Some(outcome) => self.tags.add_scene(outcome.tag()),
                    }
                }
            }
        }

        // The action was accepted: record the take and apply the grants.
        self.taken.insert(choice.id.clone());
        for tag in &choice.grant_global {
            self.tags.add_global(tag.clone());
        }
        for tag in &choice.grant_scene {
            self.tags.add_scene(tag.clone());
        }

        if let Some(turn) = fighting {
            return Ok(turn);
        }

        match resolve(&choice.routes, &self.tags) {
            Some(Destination::Scene(next)) => {
                self.enter_scene(&next);
                if self.is_ended() {
                    Ok(Turn::Ended(next))
                } else {
                    Ok(Turn::Moved(next))
                }
            }
            Some(Destination::Stay) => Ok(Turn::Stayed),
            None => {
                if self.config.gap_policy == GapPolicy::End {
                    self.status = SessionStatus::Ended;
                }
                Err(EngineError::AuthoringGap {
                    scene: self.current.clone(),
                    option: choice.id,
                })
            }
        }
    }

    /// Discard all playthrough state and re-enter the start scene.
    pub fn restart(&mut self) {
        self.tags = TagStore::new();
        self.status = SessionStatus::Active;
        let start = self.graph.start().to_string();
        self.enter_scene(&start);
    }

    /// Unique id of this session instance.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Id of the scene the session is on.
    pub fn current_scene_id(&self) -> &str {
        &self.current
    }

    /// The scene the session is on.
    pub fn current_scene(&self) -> Option<&Scene> {
        self.graph.scene(&self.current)
    }

    /// Read-only view of the tag pools.
    pub fn tags(&self) -> &TagStore {
        &self.tags
    }

    /// The active encounter, when the current scene is combat-mode.
    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    /// Display snapshot of the active encounter.
    pub fn combat_snapshot(&self) -> Option<CombatSnapshot> {
        self.encounter.as_ref().map(Encounter::snapshot)
    }

    /// Whether the session still accepts actions.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Whether the story has ended.
    pub fn is_ended(&self) -> bool {
        self.status == SessionStatus::Ended
    }

    /// The graph this session runs against.
    pub fn graph(&self) -> &StoryGraph {
        &self.graph
    }

    /// Options of the current scene that are offered right now, in authored
    /// order. Empty once the story has ended.
    pub fn offered_choices(&self) -> Vec<&Choice> {
        if self.is_ended() {
            return Vec::new();
        }
        self.current_scene()
            .map(|scene| {
                scene
                    .options
                    .iter()
                    .filter(|choice| choice.is_offered(&self.taken))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Enter a scene: reset scene-local state, seed the scene's tags, and
    /// start its encounter when the mode is combat.
    fn enter_scene(&mut self, id: &str) {
        self.current = id.to_string();
        self.tags.reset_scene();
        self.taken.clear();
        self.encounter = None;

        if let Some(scene) = self.graph.scene(id) {
            for tag in &scene.tags {
                self.tags.add_scene(tag.clone());
            }
            if scene.mode == SceneMode::Combat {
                if let Some(spec) = &scene.combat {
                    self.encounter = Some(Encounter::new(spec));
                }
            }
            if scene.ending {
                self.status = SessionStatus::Ended;
            }
        }
    }
}
