//! Resolving collected actions and applying their results.

use super::{BattleEngine, BattleError, BattleEvent, HpChange, SkipReason, StatusChange};
use crate::action::{ActionKind, BattleAction};
use crate::combat::{ResolutionResult, ResolveContext, resolve_ability};
use crate::env::{Ability, BattleEnv, StatusId, TargetSelector};
use crate::state::{BattlePhase, BattleState, CombatantId, Side};
use crate::status::StatusEffectTracker;

/// Outcome of picking targets at resolution time.
enum Targeting {
    Resolved {
        targets: Vec<CombatantId>,
        retargeted: bool,
    },
    Fizzled,
}

impl BattleEngine {
    /// Resolves pending actions in queue order.
    ///
    /// Stops early once a side is wiped out and goes straight to the terminal
    /// check; otherwise continues with the effect tick.
    pub(super) fn resolve_round(&mut self, env: &BattleEnv<'_>) -> Result<(), BattleError> {
        let pending = std::mem::take(&mut self.state.pending);

        for action in pending {
            self.resolve_action(env, action)?;
            if self.state.is_side_defeated(Side::Ally) || self.state.is_side_defeated(Side::Enemy) {
                self.state.phase = BattlePhase::TerminalCheck;
                return Ok(());
            }
        }

        self.state.phase = BattlePhase::EffectTick;
        Ok(())
    }

    fn resolve_action(&mut self, env: &BattleEnv<'_>, action: BattleAction) -> Result<(), BattleError> {
        let ActionKind::UseAbility { ability: ability_id, target } = action.kind else {
            return Ok(());
        };

        let Some(actor) = self.state.combatant(action.actor) else {
            return Ok(());
        };
        if !actor.is_alive() {
            self.skip(action.actor, SkipReason::Fainted);
            return Ok(());
        }
        if actor.statuses.is_stunned() {
            self.skip(action.actor, SkipReason::Stunned);
            return Ok(());
        }

        let ability = self.ability_definition(env, ability_id)?.clone();

        if !ability_id.is_basic_attack()
            && !actor
                .slot(ability_id)
                .is_some_and(|slot| slot.is_ready(self.state.round))
        {
            self.skip(action.actor, SkipReason::OnCooldown);
            return Ok(());
        }
        if ability.cost > actor.stamina.current {
            self.skip(action.actor, SkipReason::InsufficientStamina);
            return Ok(());
        }

        let (targets, retargeted) = match select_targets(&self.state, action.actor, &ability, target) {
            Targeting::Resolved { targets, retargeted } => (targets, retargeted),
            Targeting::Fizzled => {
                self.skip(action.actor, SkipReason::NoTarget);
                return Ok(());
            }
        };

        let result = {
            let ctx = ResolveContext {
                config: &self.config,
                chart: env.chart()?,
                statuses: env.statuses()?,
                rng: env.rng()?,
                seed: self.state.seed,
                nonce: self.state.nonce,
            };
            let attacker = &self.state.combatants[action.actor.index()];
            let defenders: Vec<_> = targets
                .iter()
                .map(|id| &self.state.combatants[id.index()])
                .collect();
            resolve_ability(&ability, attacker, &defenders, &ctx)?
        };

        self.state.nonce += 1;
        self.apply_resolution(result, retargeted);
        Ok(())
    }

    /// Applies a resolution atomically: stamina, cooldown, HP, statuses.
    fn apply_resolution(&mut self, result: ResolutionResult, retargeted: bool) {
        let round = self.state.round;

        if let Some(actor) = self.state.combatant_mut(result.actor) {
            let spent = actor.stamina.spend(result.stamina_cost);
            debug_assert!(spent, "stamina is checked before resolution");
            if let Some(slot) = actor.slot_mut(result.ability) {
                slot.trigger(round, result.cooldown);
            }
        }

        let mut hp_changes = Vec::new();
        let mut status_changes = Vec::new();
        let mut cleansed: Vec<(CombatantId, StatusId)> = Vec::new();
        let mut fainted = Vec::new();

        for outcome in &result.targets {
            let Some(target) = self.state.combatant_mut(outcome.target) else {
                continue;
            };
            if !target.is_alive() {
                continue;
            }

            if outcome.hp_delta != 0 {
                let amount = outcome.hp_delta.unsigned_abs().min(u64::from(u32::MAX)) as u32;
                let delta = if outcome.hp_delta < 0 {
                    -i64::from(target.hp.drain(amount))
                } else {
                    i64::from(target.hp.restore(amount))
                };
                hp_changes.push(HpChange {
                    target: target.id,
                    delta,
                    hp_after: target.hp.current,
                });
            }

            if !target.is_alive() {
                StatusEffectTracker::clear(target);
                fainted.push(target.id);
                continue;
            }

            if outcome.cleanse {
                cleansed.extend(
                    StatusEffectTracker::cleanse(target)
                        .into_iter()
                        .map(|status| (target.id, status)),
                );
            }
            for effect in &outcome.attach {
                status_changes.push(StatusChange {
                    target: target.id,
                    status: effect.id,
                    outcome: StatusEffectTracker::apply(target, *effect),
                });
            }
        }

        tracing::debug!(
            actor = %result.actor,
            ability = %result.ability,
            damage = result.total_damage(),
            "action resolved"
        );

        self.emit(BattleEvent::ActionResolved {
            round,
            result,
            retargeted,
            hp_changes,
            status_changes,
            cleansed,
        });
        for target in fainted {
            tracing::info!(%target, "combatant fainted");
            self.emit(BattleEvent::CombatantFainted { target });
        }
    }
}

/// Picks the combatants an ability affects at resolution time.
///
/// A fainted single target is replaced by the first living combatant on the
/// same side; with nobody left the action fizzles.
fn select_targets(
    state: &BattleState,
    actor_id: CombatantId,
    ability: &Ability,
    requested: Option<CombatantId>,
) -> Targeting {
    let Some(actor) = state.combatant(actor_id) else {
        return Targeting::Fizzled;
    };

    let (targets, retargeted) = match ability.target {
        TargetSelector::SelfOnly => (vec![actor_id], false),
        TargetSelector::SingleEnemy | TargetSelector::SingleAlly => {
            let side = if ability.target.is_offensive() {
                actor.side.opponent()
            } else {
                actor.side
            };
            match requested.and_then(|id| state.combatant(id)) {
                Some(target) if target.is_alive() && target.side == side => (vec![target.id], false),
                _ => match state.alive_on(side).next() {
                    Some(replacement) => (vec![replacement.id], true),
                    None => (Vec::new(), false),
                },
            }
        }
        TargetSelector::AllEnemies => (state.alive_on(actor.side.opponent()).map(|c| c.id).collect(), false),
        TargetSelector::AllAllies => (state.alive_on(actor.side).map(|c| c.id).collect(), false),
    };

    if targets.is_empty() {
        Targeting::Fizzled
    } else {
        Targeting::Resolved { targets, retargeted }
    }
}
