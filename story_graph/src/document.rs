//! Story documents and the compiled, validated graph.
//!
//! A loader hands over authored data as a [`StoryDocument`] (parsed from
//! JSON or TOML text; no file IO happens in this crate). Compiling the
//! document validates its structure eagerly, so structural defects are
//! rejected before a session ever starts rather than surfacing mid-play.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::scene::{Scene, SceneMode};

/// Failures parsing a story document, before any validation runs.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed JSON story document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed TOML story document: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Structural defects detected while compiling a document into a graph.
///
/// All of these are fatal to session start and can only arise from authored
/// data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("start scene '{0}' is not defined")]
    UnknownStartScene(String),

    #[error("duplicate scene id '{0}'")]
    DuplicateScene(String),

    #[error("duplicate option id '{option}' in scene '{scene}'")]
    DuplicateOption { scene: String, option: String },

    #[error("option '{option}' in scene '{scene}' routes to unknown scene '{target}'")]
    UnknownRouteTarget {
        scene: String,
        option: String,
        target: String,
    },

    #[error("option '{option}' in scene '{scene}' disables after unknown option '{target}'")]
    UnknownOptionRef {
        scene: String,
        option: String,
        target: String,
    },

    #[error("ending scene '{0}' must not offer options")]
    EndingWithOptions(String),

    #[error("combat scene '{0}' has no combat payload")]
    MissingCombatSpec(String),

    #[error("option '{option}' in combat scene '{scene}' has no combat action")]
    MissingCombatAction { scene: String, option: String },

    #[error("timed scene '{0}' has no timer payload")]
    MissingTimedSpec(String),
}

/// The authored story as handed over by a loader: a start scene id, the
/// scene list, and whatever metadata the authoring tool carries along.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDocument {
    pub start_scene_id: String,
    pub scenes: Vec<Scene>,

    /// Arbitrary author-tool metadata, passed through untouched.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl StoryDocument {
    /// Create a document with no scenes.
    pub fn new(start_scene_id: impl Into<String>) -> Self {
        Self {
            start_scene_id: start_scene_id.into(),
            scenes: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    /// Append a scene.
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scenes.push(scene);
        self
    }

    /// Parse a document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a document from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, DocumentError> {
        Ok(toml::from_str(text)?)
    }
}

/// The immutable, validated scene graph a session runs against.
///
/// Built only through [`StoryGraph::compile`], so holding one is proof the
/// structural checks passed; runtime code looks scenes up by id without
/// re-validating.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryGraph {
    start: String,
    scenes: HashMap<String, Scene>,
    metadata: HashMap<String, serde_json::Value>,
}

impl StoryGraph {
    /// Validate a document and index its scenes for runtime lookup.
    pub fn compile(document: StoryDocument) -> Result<Self, GraphError> {
        // Uniqueness first, so the remaining checks can trust the index.
        let mut scenes: HashMap<String, Scene> = HashMap::with_capacity(document.scenes.len());
        for scene in document.scenes {
            if scenes.contains_key(&scene.id) {
                return Err(GraphError::DuplicateScene(scene.id));
            }
            scenes.insert(scene.id.clone(), scene);
        }

        if !scenes.contains_key(&document.start_scene_id) {
            return Err(GraphError::UnknownStartScene(document.start_scene_id));
        }

        for scene in scenes.values() {
            validate_scene(scene, &scenes)?;
        }

        Ok(Self {
            start: document.start_scene_id,
            scenes,
            metadata: document.metadata,
        })
    }

    /// Id of the scene every session starts in.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Look up a scene by id.
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Number of scenes in the graph.
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Document metadata, carried through for the embedding layer.
    pub fn metadata(&self) -> &HashMap<String, serde_json::Value> {
        &self.metadata
    }
}

fn validate_scene(scene: &Scene, scenes: &HashMap<String, Scene>) -> Result<(), GraphError> {
    if scene.ending && !scene.options.is_empty() {
        return Err(GraphError::EndingWithOptions(scene.id.clone()));
    }

    match scene.mode {
        SceneMode::Combat if scene.combat.is_none() => {
            return Err(GraphError::MissingCombatSpec(scene.id.clone()));
        }
        SceneMode::Timed if scene.timed.is_none() => {
            return Err(GraphError::MissingTimedSpec(scene.id.clone()));
        }
        _ => {}
    }

    let mut seen = HashSet::new();
    for option in &scene.options {
        if !seen.insert(option.id.as_str()) {
            return Err(GraphError::DuplicateOption {
                scene: scene.id.clone(),
                option: option.id.clone(),
            });
        }

        if scene.mode == SceneMode::Combat && option.action.is_none() {
            return Err(GraphError::MissingCombatAction {
                scene: scene.id.clone(),
                option: option.id.clone(),
            });
        }

        for route in &option.routes {
            if let Some(target) = &route.to {
                if !scenes.contains_key(target) {
                    return Err(GraphError::UnknownRouteTarget {
                        scene: scene.id.clone(),
                        option: option.id.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        for target in &option.disabled_after {
            if !scene.options.iter().any(|other| &other.id == target) {
                return Err(GraphError::UnknownOptionRef {
                    scene: scene.id.clone(),
                    option: option.id.clone(),
                    target: target.clone(),
                });
            }
        }
    }

    Ok(())
}
