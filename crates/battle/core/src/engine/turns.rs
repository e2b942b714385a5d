use std::cmp::Reverse;

use super::{BattleEngine, BattleError, BattleEvent, SkipReason};
use crate::action::{BattleAction, validate_action};
use crate::ai::{AiDecisionFailure, BattleAi, Candidate};
use crate::env::BattleEnv;
use crate::state::{BattlePhase, BattleState, CombatantId, TurnQueue};

/// Turn order for a round: living combatants by effective speed, fastest
/// first. Ties go to the ally side, then roster order, which is exactly
/// ascending [`CombatantId`].
pub fn compute_turn_order(state: &BattleState) -> TurnQueue {
    let mut order: Vec<_> = state
        .combatants
        .iter()
        .filter(|c| c.is_alive())
        .map(|c| (Reverse(c.effective_speed()), c.id))
        .collect();
    order.sort_unstable();
    order.into_iter().map(|(_, id)| id).collect()
}

/// Round bookkeeping and action collection for BattleEngine.
impl BattleEngine {
    pub(super) fn start_round(&mut self) {
        self.state.queue = compute_turn_order(&self.state);
        self.state.cursor = 0;
        self.state.pending.clear();
        self.state.phase = BattlePhase::ActionCollection;

        tracing::debug!(round = self.state.round, order = ?self.state.queue, "round started");
        self.emit(BattleEvent::RoundStarted {
            round: self.state.round,
            order: self.state.queue.to_vec(),
        });
    }

    /// Collects actions in queue order until a player-controlled combatant is
    /// up (returned) or every combatant has been handled.
    pub(super) fn collect_actions(&mut self, env: &BattleEnv<'_>) -> Result<Option<CombatantId>, BattleError> {
        while let Some(&actor_id) = self.state.queue.get(self.state.cursor) {
            let Some(actor) = self.state.combatant(actor_id) else {
                self.state.cursor += 1;
                continue;
            };

            if !actor.is_alive() {
                self.skip(actor_id, SkipReason::Fainted);
                self.state.cursor += 1;
                continue;
            }
            if actor.statuses.is_stunned() {
                self.skip(actor_id, SkipReason::Stunned);
                self.state.cursor += 1;
                continue;
            }
            if self.is_player_controlled(actor_id) {
                return Ok(Some(actor_id));
            }

            match self.decide_for(env, actor_id)? {
                Some(action) => self.state.pending.push(action),
                None => self.skip(actor_id, SkipReason::NoTarget),
            }
            self.state.cursor += 1;
        }

        self.state.phase = BattlePhase::ActionResolution;
        Ok(None)
    }

    /// Asks the AI for an action and validates it like a player submission.
    ///
    /// An invalid choice is excluded and the AI decides once more; if that
    /// fails too, the basic-attack fallback is used.
    fn decide_for(&self, env: &BattleEnv<'_>, actor_id: CombatantId) -> Result<Option<BattleAction>, BattleError> {
        let ai = BattleAi::new(&self.config);
        let abilities = env.abilities()?;
        let mut excluded: Vec<Candidate> = Vec::new();

        for _ in 0..2 {
            let decision = match ai.decide_excluding(&self.state, actor_id, env, &excluded) {
                Ok(decision) => decision,
                Err(AiDecisionFailure::Oracle(e)) => return Err(e.into()),
                Err(error) => {
                    tracing::warn!(actor = %actor_id, %error, "AI decision failed");
                    return Ok(None);
                }
            };

            match validate_action(&self.state, &decision.action, abilities, &self.basic_attack) {
                Ok(()) => return Ok(Some(decision.action)),
                Err(reason) => {
                    tracing::warn!(
                        actor = %actor_id,
                        action = ?decision.action,
                        %reason,
                        "AI chose an invalid action, re-deciding"
                    );
                    if let (Some(ability), target) = (decision.action.ability(), decision.action.target()) {
                        excluded.push(Candidate { ability, target });
                    }
                }
            }
        }

        let Some(actor) = self.state.combatant(actor_id) else {
            return Ok(None);
        };
        match BattleAi::fallback(&self.state, actor) {
            Ok(decision) => Ok(Some(decision.action)),
            Err(error) => {
                tracing::warn!(actor = %actor_id, %error, "AI fallback failed");
                Ok(None)
            }
        }
    }

    pub(super) fn skip(&mut self, actor: CombatantId, reason: SkipReason) {
        tracing::debug!(%actor, %reason, "action skipped");
        self.emit(BattleEvent::ActionSkipped {
            round: self.state.round,
            actor,
            reason,
        });
    }
}
