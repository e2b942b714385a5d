//! Opponent decision policy.
//!
//! The AI enumerates every legal `(ability, target)` pair for the acting
//! combatant, scores each with the weighted [`heuristics`], adds a bounded
//! jitter drawn from the injected RNG, and picks the best. Everything is a
//! pure function of the state snapshot and the battle seed, so a fixed seed
//! reproduces every decision.
//!
//! # Tie-breaking
//!
//! Equal scores go to the lower ability id, then the lower target id.
//!
//! # Fallback
//!
//! When nothing in the loadout is usable (cooldowns, stamina) the AI falls
//! back to the basic attack on the lowest-HP opponent.
pub mod heuristics;

pub use heuristics::{HeuristicScores, TurnContext, evaluate};

use std::cmp::Ordering;

use crate::action::{BattleAction, legal_targets};
use crate::config::{AiWeights, BattleConfig};
use crate::env::{
    Ability, AbilityId, AbilityOracle, BattleEnv, OracleError, RngOracle, RollContext,
    TargetSelector, compute_seed,
};
use crate::state::{BattleState, CombatantId, CombatantState, Side};

/// One `(ability, target)` option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub ability: AbilityId,
    pub target: Option<CombatantId>,
}

impl Candidate {
    pub fn into_action(self, actor: CombatantId) -> BattleAction {
        BattleAction::use_ability(actor, self.ability, self.target)
    }

    fn tie_key(&self) -> (AbilityId, Option<CombatantId>) {
        (self.ability, self.target)
    }
}

/// What the AI chose and why.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    pub action: BattleAction,
    /// Final score of the chosen candidate; `None` for the fallback.
    pub score: Option<i64>,
    pub fallback: bool,
}

/// Errors raised while deciding.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AiDecisionFailure {
    /// No ready, affordable ability with a legal target. Recovered by the fallback.
    #[error("{actor} has no legal candidate")]
    NoLegalCandidate { actor: CombatantId },

    #[error("{actor} has no living opponent to attack")]
    NoOpponent { actor: CombatantId },

    #[error("unknown combatant {0}")]
    UnknownActor(CombatantId),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Battle AI bound to a configuration.
#[derive(Clone, Copy, Debug)]
pub struct BattleAi<'c> {
    config: &'c BattleConfig,
}

impl<'c> BattleAi<'c> {
    pub fn new(config: &'c BattleConfig) -> Self {
        Self { config }
    }

    /// Weight table for `actor`: enemies follow the battle mode, AI-driven
    /// allies always play the standard table.
    pub fn weights_for(&self, state: &BattleState, actor: &CombatantState) -> AiWeights {
        match actor.side {
            Side::Enemy => self.config.ai.weights_for(state.mode),
            Side::Ally => self.config.ai.standard,
        }
    }

    /// Picks an action for `actor`.
    pub fn decide(
        &self,
        state: &BattleState,
        actor: CombatantId,
        env: &BattleEnv<'_>,
    ) -> Result<Decision, AiDecisionFailure> {
        self.decide_excluding(state, actor, env, &[])
    }

    /// Picks an action for `actor`, never choosing any of `excluded`.
    pub fn decide_excluding(
        &self,
        state: &BattleState,
        actor_id: CombatantId,
        env: &BattleEnv<'_>,
        excluded: &[Candidate],
    ) -> Result<Decision, AiDecisionFailure> {
        let actor = state
            .combatant(actor_id)
            .ok_or(AiDecisionFailure::UnknownActor(actor_id))?;
        let abilities = env.abilities()?;
        let chart = env.chart()?;
        let statuses = env.statuses()?;
        let rng = env.rng()?;

        let weights = self.weights_for(state, actor);
        let candidates = enumerate_candidates(state, actor, abilities);
        let threat = Ability::basic_attack(self.config);
        let turn = TurnContext::new(state, actor_id, &threat);

        tracing::debug!(
            actor = %actor_id,
            candidates = candidates.len(),
            aggressiveness = weights.aggressiveness(),
            "scoring candidates"
        );

        let mut best: Option<(Candidate, i64)> = None;
        for (index, candidate) in candidates.iter().enumerate() {
            if excluded.contains(candidate) {
                continue;
            }
            let Some(ability) = abilities.ability(candidate.ability) else {
                continue;
            };
            let targets = affected_targets(state, actor, ability.target, candidate.target);
            let scores = evaluate(ability, actor, &targets, &turn, self.config, chart, statuses);

            let jitter_seed = compute_seed(
                state.seed,
                state.nonce,
                u32::from(actor_id.0),
                RollContext::AiJitter.for_target(index as u32),
            );
            let jitter = i64::from(rng.range(jitter_seed, 0, weights.jitter));
            let score = scores.weighted(&weights) + jitter;

            tracing::debug!(
                ability = %candidate.ability,
                target = ?candidate.target,
                score,
                jitter,
                ?scores,
                "  candidate"
            );

            let better = match &best {
                None => true,
                Some((current, best_score)) => match score.cmp(best_score) {
                    Ordering::Greater => true,
                    Ordering::Equal => candidate.tie_key() < current.tie_key(),
                    Ordering::Less => false,
                },
            };
            if better {
                best = Some((*candidate, score));
            }
        }

        match best {
            Some((candidate, score)) => Ok(Decision {
                action: candidate.into_action(actor_id),
                score: Some(score),
                fallback: false,
            }),
            None => {
                tracing::warn!(
                    error = %AiDecisionFailure::NoLegalCandidate { actor: actor_id },
                    "falling back to basic attack"
                );
                Self::fallback(state, actor)
            }
        }
    }

    /// Basic attack on the lowest-HP opponent (lower id on ties).
    pub fn fallback(state: &BattleState, actor: &CombatantState) -> Result<Decision, AiDecisionFailure> {
        let target = state
            .alive_on(actor.side.opponent())
            .min_by_key(|c| (c.hp.current, c.id))
            .ok_or(AiDecisionFailure::NoOpponent { actor: actor.id })?;

        Ok(Decision {
            action: BattleAction::basic_attack(actor.id, target.id),
            score: None,
            fallback: true,
        })
    }
}

/// Every ready, affordable loadout ability paired with each legal target.
pub fn enumerate_candidates<A>(state: &BattleState, actor: &CombatantState, abilities: &A) -> Vec<Candidate>
where
    A: AbilityOracle + ?Sized,
{
    let mut candidates = Vec::new();
    for slot in actor.loadout.iter().filter(|slot| slot.is_ready(state.round)) {
        let Some(ability) = abilities.ability(slot.ability) else {
            continue;
        };
        if ability.cost > actor.stamina.current {
            continue;
        }
        if ability.target.needs_explicit_target() {
            candidates.extend(
                legal_targets(state, actor, ability.target)
                    .into_iter()
                    .map(|target| Candidate {
                        ability: slot.ability,
                        target: Some(target),
                    }),
            );
        } else if !affected_targets(state, actor, ability.target, None).is_empty() {
            candidates.push(Candidate {
                ability: slot.ability,
                target: None,
            });
        }
    }
    candidates
}

/// Combatants an ability would affect, given the selector and an optional explicit target.
pub fn affected_targets<'s>(
    state: &'s BattleState,
    actor: &'s CombatantState,
    selector: TargetSelector,
    target: Option<CombatantId>,
) -> Vec<&'s CombatantState> {
    match selector {
        TargetSelector::SelfOnly => vec![actor],
        TargetSelector::SingleEnemy | TargetSelector::SingleAlly => target
            .and_then(|id| state.combatant(id))
            .filter(|c| c.is_alive())
            .into_iter()
            .collect(),
        TargetSelector::AllEnemies => state.alive_on(actor.side.opponent()).collect(),
        TargetSelector::AllAllies => state.alive_on(actor.side).collect(),
    }
}
