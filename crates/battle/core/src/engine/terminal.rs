//! Terminal detection, the round limit and rewards.

use super::{BattleEngine, BattleEvent, Rewards};
use crate::config::BattleConfig;
use crate::state::{BattlePhase, BattleState, Outcome, Side};

impl BattleEngine {
    /// Decides whether the battle is over; otherwise moves on to the next round.
    pub(super) fn check_terminal(&mut self) -> Option<Outcome> {
        if let Some(outcome) = decided_outcome(&self.state) {
            return Some(outcome);
        }

        if self.state.round >= self.config.max_rounds {
            let outcome = round_limit_outcome(&self.state);
            tracing::info!(
                rounds = self.state.round,
                %outcome,
                "round limit reached"
            );
            return Some(outcome);
        }

        self.state.round += 1;
        self.state.phase = BattlePhase::RoundStart;
        None
    }

    /// Records the outcome and emits `BattleEnded`.
    pub(super) fn finish(&mut self, outcome: Outcome) {
        self.state.outcome = Some(outcome);
        self.state.phase = BattlePhase::Ended;
        self.state.pending.clear();

        let rewards = (outcome == Outcome::AllyVictory).then(|| compute_rewards(&self.state, &self.config));

        tracing::info!(
            %outcome,
            rounds = self.state.round,
            experience = rewards.as_ref().map(|r| r.experience),
            "battle ended"
        );
        self.emit(BattleEvent::BattleEnded {
            outcome,
            rounds: self.state.round,
            rewards,
        });
    }
}

/// Outcome by elimination. Enemies wiped out is checked first, so if both
/// sides fall in the same tick the allies win.
pub fn decided_outcome(state: &BattleState) -> Option<Outcome> {
    if state.is_side_defeated(Side::Enemy) {
        Some(Outcome::AllyVictory)
    } else if state.is_side_defeated(Side::Ally) {
        Some(Outcome::EnemyVictory)
    } else {
        None
    }
}

/// Winner when the round limit is reached: the larger remaining HP fraction,
/// enemies on ties.
pub fn round_limit_outcome(state: &BattleState) -> Outcome {
    let (ally_hp, ally_max) = state.hp_totals(Side::Ally);
    let (enemy_hp, enemy_max) = state.hp_totals(Side::Enemy);

    // ally_hp / ally_max > enemy_hp / enemy_max, cross-multiplied
    if u128::from(ally_hp) * u128::from(enemy_max) > u128::from(enemy_hp) * u128::from(ally_max) {
        Outcome::AllyVictory
    } else {
        Outcome::EnemyVictory
    }
}

/// Experience for every fainted enemy, scaled by the mode multiplier.
pub fn compute_rewards(state: &BattleState, config: &BattleConfig) -> Rewards {
    let defeated: Vec<_> = state
        .side(Side::Enemy)
        .filter(|c| !c.is_alive())
        .collect();
    let base: u64 = defeated.iter().map(|c| u64::from(c.experience_yield)).sum();
    let experience = base * u64::from(config.reward_multiplier_pct(state.mode)) / 100;

    Rewards {
        experience: experience.min(u64::from(u32::MAX)) as u32,
        defeated: defeated.iter().map(|c| c.species).collect(),
    }
}
