//! Submission-time validation.

use super::{ActionKind, BattleAction, RejectReason};
use crate::env::{Ability, AbilityId, AbilityOracle, TargetSelector};
use crate::state::{BattleState, CombatantId, CombatantState, Side};

/// Looks up an ability definition, mapping the reserved id to the basic attack.
pub fn lookup_ability<'a, A>(id: AbilityId, abilities: &'a A, basic_attack: &'a Ability) -> Option<&'a Ability>
where
    A: AbilityOracle + ?Sized,
{
    if id.is_basic_attack() {
        Some(basic_attack)
    } else {
        abilities.ability(id)
    }
}

/// Combatants `actor` may pick as an explicit target for `selector`.
///
/// Empty for selectors that do not take an explicit target.
pub fn legal_targets(state: &BattleState, actor: &CombatantState, selector: TargetSelector) -> Vec<CombatantId> {
    let side = match selector {
        TargetSelector::SingleEnemy => actor.side.opponent(),
        TargetSelector::SingleAlly => actor.side,
        _ => return Vec::new(),
    };
    state.alive_on(side).map(|c| c.id).collect()
}

/// Validates `action` against the current state without mutating it.
///
/// Checks, in order: the engine is collecting actions and `action.actor` is
/// the combatant up; the actor is alive; then either the flee rules or the
/// ability rules (in loadout, off cooldown, affordable, target legal).
pub fn validate_action<A>(
    state: &BattleState,
    action: &BattleAction,
    abilities: &A,
    basic_attack: &Ability,
) -> Result<(), RejectReason>
where
    A: AbilityOracle + ?Sized,
{
    let expected = state
        .current_actor()
        .ok_or(RejectReason::NotAwaitingInput)?;
    if action.actor != expected {
        return Err(RejectReason::NotActorsTurn {
            actor: action.actor,
            expected,
        });
    }

    let actor = state
        .combatant(action.actor)
        .ok_or(RejectReason::UnknownCombatant(action.actor))?;
    if !actor.is_alive() {
        return Err(RejectReason::ActorFainted(actor.id));
    }

    match action.kind {
        ActionKind::Flee => {
            if actor.side == Side::Ally && state.mode.allows_flee() {
                Ok(())
            } else {
                Err(RejectReason::FleeNotAllowed)
            }
        }
        ActionKind::UseAbility { ability, target } => {
            validate_ability_use(state, actor, ability, target, abilities, basic_attack)
        }
    }
}

fn validate_ability_use<A>(
    state: &BattleState,
    actor: &CombatantState,
    ability_id: AbilityId,
    target: Option<CombatantId>,
    abilities: &A,
    basic_attack: &Ability,
) -> Result<(), RejectReason>
where
    A: AbilityOracle + ?Sized,
{
    if !ability_id.is_basic_attack() {
        let slot = actor.slot(ability_id).ok_or(RejectReason::AbilityNotInLoadout {
            ability: ability_id,
        })?;
        if !slot.is_ready(state.round) {
            return Err(RejectReason::AbilityOnCooldown {
                ability: ability_id,
                ready_round: slot.ready_from_round,
            });
        }
    }

    let ability = lookup_ability(ability_id, abilities, basic_attack)
        .ok_or(RejectReason::UnknownAbility(ability_id))?;

    if ability.cost > actor.stamina.current {
        return Err(RejectReason::InsufficientStamina {
            required: ability.cost,
            available: actor.stamina.current,
        });
    }

    if !ability.target.needs_explicit_target() {
        return Ok(());
    }

    let target_id = target.ok_or(RejectReason::MissingTarget {
        ability: ability_id,
    })?;
    let target = state
        .combatant(target_id)
        .ok_or(RejectReason::UnknownTarget(target_id))?;

    let wanted_side = if ability.target.is_offensive() {
        actor.side.opponent()
    } else {
        actor.side
    };
    if target.side != wanted_side {
        return Err(RejectReason::WrongSide {
            ability: ability_id,
            target: target_id,
        });
    }
    if !target.is_alive() {
        return Err(RejectReason::TargetFainted(target_id));
    }

    Ok(())
}
