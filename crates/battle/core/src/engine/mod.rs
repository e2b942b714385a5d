//! Battle state machine and action resolution pipeline.
//!
//! The [`BattleEngine`] is the authoritative reducer for a [`BattleState`].
//! It walks each round through its phases:
//!
//! ```text
//! RoundStart → ActionCollection → ActionResolution → EffectTick → TerminalCheck
//!     ↑                                                                │
//!     └──────────────────────────── round + 1 ─────────────────────────┘
//! ```
//!
//! The only suspension point is collecting an action for a player-controlled
//! combatant: [`BattleEngine::advance`] returns [`Progress::AwaitingPlayer`]
//! and resumes after [`BattleEngine::submit_player_action`]. Tables and the
//! RNG are passed in on every call and never stored.

mod errors;
mod events;
mod resolution;
mod setup;
mod terminal;
mod tick;
mod turns;

pub use errors::{BattleError, DataIntegrityError, TerminalStateViolation};
pub use events::{BattleEvent, BattleObserver, HpChange, Rewards, SkipReason, StatusChange};
pub use setup::BattleSetup;
pub use terminal::{compute_rewards, round_limit_outcome};
pub use turns::compute_turn_order;

use crate::action::{ActionKind, BattleAction, validate_action};
use crate::ai::{Candidate, enumerate_candidates};
use crate::config::BattleConfig;
use crate::env::{Ability, AbilityId, BattleEnv, OracleError};
use crate::state::{BattlePhase, BattleState, CombatantId, Controller, Outcome, Side};

/// Where [`BattleEngine::advance`] stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Progress {
    /// Waiting for `submit_player_action` for this combatant.
    AwaitingPlayer { actor: CombatantId },
    Ended(Outcome),
}

/// Result of an accepted submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Submitted {
    /// Queued for resolution; call `advance` to continue.
    Queued,
    /// The submission ended the battle (a successful flee).
    Ended(Outcome),
}

/// Battle engine that owns the state of one battle.
pub struct BattleEngine {
    state: BattleState,
    config: BattleConfig,
    ally_controller: Controller,
    basic_attack: Ability,
    observers: Vec<Box<dyn BattleObserver>>,
    /// Number of log entries already handed out by `drain_events`.
    drained: usize,
}

impl std::fmt::Debug for BattleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleEngine")
            .field("round", &self.state.round)
            .field("phase", &self.state.phase)
            .field("outcome", &self.state.outcome)
            .field("ally_controller", &self.ally_controller)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Starts a battle. See [`BattleEngine::start`].
pub fn start_battle(
    env: &BattleEnv<'_>,
    config: BattleConfig,
    setup: &BattleSetup,
) -> Result<BattleEngine, DataIntegrityError> {
    BattleEngine::start(env, config, setup)
}

impl BattleEngine {
    /// Builds the battle state from the rosters in `setup`.
    ///
    /// Fails if any species, ability or status id cannot be resolved, or if a
    /// roster or loadout is empty or oversized.
    pub fn start(
        env: &BattleEnv<'_>,
        config: BattleConfig,
        setup: &BattleSetup,
    ) -> Result<Self, DataIntegrityError> {
        let state = setup::build_state(env, &config, setup)?;

        tracing::info!(
            mode = %setup.mode,
            seed = setup.seed,
            allies = setup.allies.len(),
            enemies = setup.enemies.len(),
            "battle started"
        );

        Ok(Self {
            state,
            basic_attack: Ability::basic_attack(&config),
            config,
            ally_controller: setup.ally_controller,
            observers: Vec::new(),
            drained: 0,
        })
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome
    }

    pub fn ally_controller(&self) -> Controller {
        self.ally_controller
    }

    /// Switches who drives the ally side; takes effect at the next collection step.
    pub fn set_ally_controller(&mut self, controller: Controller) {
        self.ally_controller = controller;
    }

    pub fn add_observer(&mut self, observer: Box<dyn BattleObserver>) {
        self.observers.push(observer);
    }

    /// Events emitted since the previous call.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        let fresh = self.state.log[self.drained..].to_vec();
        self.drained = self.state.log.len();
        fresh
    }

    /// The combatant awaiting a player action, if any.
    pub fn awaiting(&self) -> Option<CombatantId> {
        let actor = self.state.current_actor()?;
        self.is_player_controlled(actor).then_some(actor)
    }

    /// Legal ability options for `actor` this round (the basic attack excluded).
    pub fn options_for(&self, env: &BattleEnv<'_>, actor: CombatantId) -> Result<Vec<Candidate>, OracleError> {
        let abilities = env.abilities()?;
        Ok(self
            .state
            .combatant(actor)
            .map(|c| enumerate_candidates(&self.state, c, abilities))
            .unwrap_or_default())
    }

    /// Drives the battle until a player action is needed or the battle ends.
    pub fn advance(&mut self, env: &BattleEnv<'_>) -> Result<Progress, BattleError> {
        self.ensure_ongoing()?;

        loop {
            match self.state.phase {
                BattlePhase::RoundStart => self.start_round(),
                BattlePhase::ActionCollection => {
                    if let Some(actor) = self.collect_actions(env)? {
                        return Ok(Progress::AwaitingPlayer { actor });
                    }
                }
                BattlePhase::ActionResolution => self.resolve_round(env)?,
                BattlePhase::EffectTick => self.tick_round(),
                BattlePhase::TerminalCheck => {
                    if let Some(outcome) = self.check_terminal() {
                        self.finish(outcome);
                        return Ok(Progress::Ended(outcome));
                    }
                }
                BattlePhase::Ended => {
                    // `ensure_ongoing` guards this; an ended phase without an
                    // outcome would be an engine bug.
                    let outcome = self.state.outcome.unwrap_or(Outcome::EnemyVictory);
                    return Err(TerminalStateViolation { outcome }.into());
                }
            }
        }
    }

    /// Validates and records the awaited player's action.
    ///
    /// Rejections leave the state untouched. A valid flee ends the battle
    /// immediately.
    pub fn submit_player_action(
        &mut self,
        env: &BattleEnv<'_>,
        action: BattleAction,
    ) -> Result<Submitted, BattleError> {
        self.ensure_ongoing()?;

        if self.awaiting().is_none() {
            return Err(crate::action::RejectReason::NotAwaitingInput.into());
        }
        validate_action(&self.state, &action, env.abilities()?, &self.basic_attack)?;

        if action.kind == ActionKind::Flee {
            tracing::info!(actor = %action.actor, "allies fled");
            self.finish(Outcome::Fled);
            return Ok(Submitted::Ended(Outcome::Fled));
        }

        tracing::debug!(actor = %action.actor, ability = ?action.ability(), "player action queued");
        self.state.pending.push(action);
        self.state.cursor += 1;
        Ok(Submitted::Queued)
    }

    fn ensure_ongoing(&self) -> Result<(), TerminalStateViolation> {
        match self.state.outcome {
            Some(outcome) => Err(TerminalStateViolation { outcome }),
            None => Ok(()),
        }
    }

    fn is_player_controlled(&self, actor: CombatantId) -> bool {
        self.ally_controller == Controller::Player
            && self
                .state
                .combatant(actor)
                .is_some_and(|c| c.side == Side::Ally)
    }

    fn ability_definition<'e>(
        &'e self,
        env: &BattleEnv<'e>,
        id: AbilityId,
    ) -> Result<&'e Ability, BattleError> {
        crate::action::lookup_ability(id, env.abilities()?, &self.basic_attack)
            .ok_or_else(|| DataIntegrityError::UnknownAbility(id).into())
    }

    fn emit(&mut self, event: BattleEvent) {
        tracing::debug!(event = event.name(), ?event, "battle event");
        for observer in self.observers.iter_mut() {
            observer.on_event(&event);
        }
        self.state.log.push(event);
    }
}

#[cfg(test)]
mod tests;
