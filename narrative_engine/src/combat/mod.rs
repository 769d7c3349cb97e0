//! Combat encounters - the per-scene state machine behind combat-mode play.
//!
//! An encounter resolves one round per accepted action:
//! 1. **Strike**: the enemy takes the action's damage, the party takes the
//!    enemy's counter damage
//! 2. **Run**: the encounter ends as escaped, with no counter, when running
//!    is allowed
//! 3. **Clamp**: HP never leaves `[0, max]`
//! 4. **Outcome**: defeat is checked before victory, and once set the
//!    outcome is absorbing; later actions are rejected without mutating
//!    anything

pub mod log;

pub use log::*;

use serde::{Deserialize, Serialize};
use story_graph::{ChoiceAction, CombatSpec};
use thiserror::Error;

/// Terminal result of an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatOutcome {
    Victory,
    Defeat,
    Escaped,
}

impl CombatOutcome {
    /// The scene tag the session injects so routes can branch on how the
    /// encounter ended.
    pub fn tag(&self) -> String {
        format!("combat:{}", self)
    }
}

impl std::fmt::Display for CombatOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CombatOutcome::Victory => "victory",
            CombatOutcome::Defeat => "defeat",
            CombatOutcome::Escaped => "escaped",
        };
        write!(f, "{}", name)
    }
}

/// Rejected combat actions. State is unchanged whenever one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CombatError {
    /// The encounter already reached a terminal outcome.
    #[error("encounter already resolved: {0}")]
    AlreadyResolved(CombatOutcome),

    /// A retreat was attempted while the encounter forbids running.
    #[error("running from this encounter is not allowed")]
    RunBlocked,
}

/// Display snapshot of an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatSnapshot {
    pub enemy: String,
    pub party_hp: i32,
    pub party_hp_max: i32,
    pub enemy_hp: i32,
    pub enemy_hp_max: i32,
    pub round: u32,
    pub outcome: Option<CombatOutcome>,
    pub allow_run: bool,

    /// Most recent round summaries, oldest first.
    pub log: Vec<String>,
}

/// One combat encounter: HP on both sides, a round counter starting at 1,
/// and an outcome that is absorbing once set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    enemy: String,
    party_hp: i32,
    party_hp_max: i32,
    enemy_hp: i32,
    enemy_hp_max: i32,
    attack: i32,
    allow_run: bool,
    round: u32,
    outcome: Option<CombatOutcome>,
    log: RoundLog,
}

impl Encounter {
    /// Start an encounter from its authored setup.
    pub fn new(spec: &CombatSpec) -> Self {
        let party_hp = spec.party_hp.max(0);
        let enemy_hp = spec.enemy_hp.max(0);
        Self {
            enemy: spec.enemy.clone(),
            party_hp,
            party_hp_max: party_hp,
            enemy_hp,
            enemy_hp_max: enemy_hp,
            attack: spec.attack,
            allow_run: spec.allow_run,
            round: 1,
            outcome: None,
            log: RoundLog::new(),
        }
    }

    /// Resolve one round from the given action.
    ///
    /// A strike deals its damage to the enemy and takes the enemy's counter
    /// damage in return; a run ends the encounter as escaped with no
    /// counter. Every accepted action advances exactly one round and appends
    /// exactly one log entry. When both sides would drop in the same
    /// exchange, defeat wins.
    ///
    /// Returns the outcome when this round ended the encounter.
    pub fn resolve_round(
        &mut self,
        action: &ChoiceAction,
    ) -> Result<Option<CombatOutcome>, CombatError> {
        if let Some(outcome) = self.outcome {
            return Err(CombatError::AlreadyResolved(outcome));
        }

        let entry = match action {
            ChoiceAction::Run => {
                if !self.allow_run {
                    return Err(CombatError::RunBlocked);
                }
                self.outcome = Some(CombatOutcome::Escaped);
                RoundEntry::new(
                    self.round,
                    format!("You break away from the {}.", self.enemy),
                )
            }
            ChoiceAction::Strike { damage } => {
                self.enemy_hp =
                    clamp_hp(self.enemy_hp.saturating_sub(*damage), self.enemy_hp_max);
                self.party_hp =
                    clamp_hp(self.party_hp.saturating_sub(self.attack), self.party_hp_max);

                // Defeat first: a double knockout is a loss.
                if self.party_hp == 0 {
                    self.outcome = Some(CombatOutcome::Defeat);
                } else if self.enemy_hp == 0 {
                    self.outcome = Some(CombatOutcome::Victory);
                }

                RoundEntry::new(
                    self.round,
                    format!(
                        "You strike the {} for {}; it hits back for {}.",
                        self.enemy, damage, self.attack
                    ),
                )
            }
        };

        self.log.push(entry);
        self.round += 1;
        Ok(self.outcome)
    }

    /// Enemy display name.
    pub fn enemy(&self) -> &str {
        &self.enemy
    }

    /// Current party HP.
    pub fn party_hp(&self) -> i32 {
        self.party_hp
    }

    /// Current enemy HP.
    pub fn enemy_hp(&self) -> i32 {
        self.enemy_hp
    }

    /// The round the next action resolves.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Terminal outcome, or `None` while the encounter is in progress.
    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.outcome
    }

    /// Whether a retreat action is honored.
    pub fn allow_run(&self) -> bool {
        self.allow_run
    }

    /// Whether the encounter reached a terminal outcome.
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// The retained round summaries.
    pub fn log(&self) -> &RoundLog {
        &self.log
    }

    /// Snapshot for display.
    pub fn snapshot(&self) -> CombatSnapshot {
        CombatSnapshot {
            enemy: self.enemy.clone(),
            party_hp: self.party_hp,
            party_hp_max: self.party_hp_max,
            enemy_hp: self.enemy_hp,
            enemy_hp_max: self.enemy_hp_max,
            round: self.round,
            outcome: self.outcome,
            allow_run: self.allow_run,
            log: self.log.recent(),
        }
    }
}

fn clamp_hp(value: i32, max: i32) -> i32 {
    value.clamp(0, max)
}
