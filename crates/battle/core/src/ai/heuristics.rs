//! Heuristic scoring of one candidate action.
//!
//! # Heuristics
//!
//! | heuristic            | range (per target)   | rewards                                         |
//! |----------------------|----------------------|-------------------------------------------------|
//! | expected_damage      | 0..=100              | expected damage as % of the target's HP         |
//! | knockout             | 0 or 100             | expected damage finishes the target             |
//! | type_advantage       | -50..=150            | elemental edge of a damaging ability            |
//! | self_preservation    | 0..=100              | healing, shielding, or incoming damage avoided  |
//! | status_disruption    | 0..=100              | new harmful statuses on opponents               |
//! | resource_efficiency  | <= 0                 | penalises stamina cost and cooldown             |
//!
//! Multi-target abilities sum their per-target values.
//!
//! Incoming damage avoided is measured against [`TurnContext::threat`]: a
//! stun that costs the opponent an action avoids all of it, an attack debuff
//! the debuffed share. It only counts as much as the actor is wounded.

use crate::combat::expected_damage;
use crate::config::{AiWeights, BattleConfig};
use crate::env::{
    Ability, AbilityEffect, Stat, StatusDefinition, StatusKind, StatusOracle, TypeChartOracle,
};
use crate::state::{BattleState, CombatantId, CombatantState};

/// Raw heuristic values of one candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeuristicScores {
    pub expected_damage: i64,
    pub knockout: i64,
    pub type_advantage: i64,
    pub self_preservation: i64,
    pub status_disruption: i64,
    pub resource_efficiency: i64,
}

impl HeuristicScores {
    /// Weighted sum, without jitter.
    pub fn weighted(&self, weights: &AiWeights) -> i64 {
        self.expected_damage * weights.expected_damage
            + self.knockout * weights.knockout
            + self.type_advantage * weights.type_advantage
            + self.self_preservation * weights.self_preservation
            + self.status_disruption * weights.status_disruption
            + self.resource_efficiency * weights.resource_efficiency
    }
}

/// Turn-order facts for one decision.
#[derive(Clone, Copy, Debug)]
pub struct TurnContext<'a> {
    /// Combatants that act after the decider this round.
    pub yet_to_act: &'a [CombatantId],
    /// Stand-in for what an opponent hits back with.
    pub threat: &'a Ability,
}

impl<'a> TurnContext<'a> {
    /// Context for `actor` deciding during the current collection step.
    pub fn new(state: &'a BattleState, actor: CombatantId, threat: &'a Ability) -> Self {
        let queue = state.queue.as_slice();
        let yet_to_act = match queue.iter().position(|&id| id == actor) {
            Some(position) => &queue[position + 1..],
            None => queue.get(state.cursor..).unwrap_or_default(),
        };
        Self { yet_to_act, threat }
    }

    pub fn acts_later(&self, id: CombatantId) -> bool {
        self.yet_to_act.contains(&id)
    }
}

/// `(status_disruption, self_preservation)` for landing `definition` on the
/// opponent `target`.
fn status_credit<C>(
    definition: &StatusDefinition,
    actor: &CombatantState,
    target: &CombatantState,
    turn: &TurnContext<'_>,
    config: &BattleConfig,
    chart: &C,
) -> (i64, i64)
where
    C: TypeChartOracle + ?Sized,
{
    let disruption = match definition.kind {
        StatusKind::Stun => {
            // Durations tick down at the end of the round the stun lands in;
            // only a target still to act loses this round's action.
            let denied = i64::from(definition.duration.saturating_sub(1))
                + i64::from(turn.acts_later(target.id));
            (denied * 50).min(100)
        }
        StatusKind::DamageOverTime => 60,
        StatusKind::StatDebuff(_) => 40,
        StatusKind::HealOverTime | StatusKind::StatBuff(_) => 0,
    };

    let incoming = u64::from(expected_damage(turn.threat, target, actor, config, chart));
    let avoided = match definition.kind {
        StatusKind::Stun if disruption > 0 => incoming,
        StatusKind::StatDebuff(Stat::Attack) => {
            let attack = u64::from(target.effective_attack());
            incoming * u64::from(definition.magnitude).min(attack) / attack
        }
        _ => 0,
    };
    let hp = u64::from(actor.hp.current.max(1));
    let missing = i64::from(100 - actor.hp.percent().min(100));
    let preservation = (avoided * 100 / hp).min(100) as i64 * missing / 100;

    (disruption, preservation)
}

/// Scores `ability` used by `actor` on `targets` (already resolved from the selector).
pub fn evaluate<C, S>(
    ability: &Ability,
    actor: &CombatantState,
    targets: &[&CombatantState],
    turn: &TurnContext<'_>,
    config: &BattleConfig,
    chart: &C,
    statuses: &S,
) -> HeuristicScores
where
    C: TypeChartOracle + ?Sized,
    S: StatusOracle + ?Sized,
{
    let mut scores = HeuristicScores::default();

    for target in targets {
        let opponent = target.side != actor.side;

        match ability.effect {
            AbilityEffect::Damage { inflicts } if opponent => {
                let damage = u64::from(expected_damage(ability, actor, target, config, chart));
                let hp = u64::from(target.hp.current.max(1));
                scores.expected_damage += (damage * 100 / hp).min(100) as i64;
                if damage >= hp {
                    scores.knockout += 100;
                }
                let multiplier = chart.multiplier_percent(ability.element, &target.elements);
                scores.type_advantage += (i64::from(multiplier) - 100) / 2;

                if let Some(rider) = inflicts
                    && multiplier > 0
                    && !target.statuses.contains(rider.status)
                    && let Some(definition) = statuses.status(rider.status)
                {
                    let (disruption, preservation) = status_credit(definition, actor, target, turn, config, chart);
                    scores.status_disruption += disruption * i64::from(rider.chance) / 100;
                    scores.self_preservation += preservation * i64::from(rider.chance) / 100;
                }
            }
            AbilityEffect::Status { status, chance } if opponent => {
                if !target.statuses.contains(status)
                    && let Some(definition) = statuses.status(status)
                {
                    let (disruption, preservation) = status_credit(definition, actor, target, turn, config, chart);
                    scores.status_disruption += disruption * i64::from(chance) / 100;
                    scores.self_preservation += preservation * i64::from(chance) / 100;
                }
            }
            AbilityEffect::BuffDebuff { status } => {
                let Some(definition) = statuses.status(status) else {
                    continue;
                };
                if target.statuses.contains(status) {
                    continue;
                }
                match (opponent, definition.kind) {
                    (true, kind) if kind.is_harmful() => {
                        let (disruption, preservation) = status_credit(definition, actor, target, turn, config, chart);
                        scores.status_disruption += disruption;
                        scores.self_preservation += preservation;
                    }
                    (false, StatusKind::StatBuff(_)) => {
                        scores.status_disruption += 30;
                        scores.self_preservation += i64::from(100 - actor.hp.percent().min(100)) / 2;
                    }
                    _ => {}
                }
            }
            AbilityEffect::Heal { cleanse, .. } if !opponent => {
                scores.self_preservation += i64::from(100 - target.hp.percent().min(100));
                if cleanse && target.statuses.iter().any(|e| e.kind.is_harmful()) {
                    scores.self_preservation += 50;
                }
            }
            _ => {}
        }
    }

    let stamina_max = u64::from(actor.stamina.maximum.max(1));
    scores.resource_efficiency = -((u64::from(ability.cost) * 100 / stamina_max) as i64)
        - i64::from(ability.cooldown) * 10;

    scores
}
