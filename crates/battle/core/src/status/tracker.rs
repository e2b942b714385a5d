//! End-of-round status bookkeeping.

use super::{ApplyOutcome, StatusEffect};
use crate::env::{StatusId, StatusKind};
use crate::state::CombatantState;

/// HP change caused by one periodic effect during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickEntry {
    pub status: StatusId,
    /// Negative for damage-over-time, positive for heal-over-time.
    pub hp_delta: i64,
}

/// Everything one tick did to a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub entries: Vec<TickEntry>,
    pub expired: Vec<StatusId>,
    /// The combatant was alive before the tick and is not anymore.
    pub fainted: bool,
}

/// Applies, ticks and expires status effects on a combatant.
///
/// The only mutator of a combatant's [`StatusEffects`](super::StatusEffects).
pub struct StatusEffectTracker;

impl StatusEffectTracker {
    /// Attaches `effect` following its stacking policy.
    pub fn apply(combatant: &mut CombatantState, effect: StatusEffect) -> ApplyOutcome {
        let outcome = combatant.statuses.apply(effect);
        if outcome == ApplyOutcome::Rejected {
            tracing::warn!(
                combatant = %combatant.id,
                status = %effect.id,
                "status capacity reached, effect dropped"
            );
        }
        outcome
    }

    /// Runs one end-of-round tick.
    ///
    /// Effects are processed in insertion order: periodic magnitude first,
    /// then every duration is decremented, then effects at zero are removed.
    pub fn tick(combatant: &mut CombatantState) -> TickReport {
        let was_alive = combatant.is_alive();
        let mut report = TickReport::default();

        let periodic: Vec<(StatusId, StatusKind, u32)> = combatant
            .statuses
            .iter()
            .map(|e| (e.id, e.kind, e.magnitude))
            .collect();

        for (status, kind, magnitude) in periodic {
            if !combatant.is_alive() {
                break;
            }
            let hp_delta = match kind {
                StatusKind::DamageOverTime => -i64::from(combatant.hp.drain(magnitude)),
                StatusKind::HealOverTime => i64::from(combatant.hp.restore(magnitude)),
                _ => continue,
            };
            report.entries.push(TickEntry { status, hp_delta });
        }

        for effect in combatant.statuses.iter_mut() {
            effect.remaining = effect.remaining.saturating_sub(1);
        }
        report.expired = combatant.statuses.remove_expired();
        report.fainted = was_alive && !combatant.is_alive();
        report
    }

    /// Removes harmful effects. Returns the removed ids.
    pub fn cleanse(combatant: &mut CombatantState) -> Vec<StatusId> {
        combatant.statuses.cleanse()
    }

    /// Drops every effect, harmful or not. Used when a combatant faints.
    pub fn clear(combatant: &mut CombatantState) {
        combatant.statuses.clear();
    }

    pub fn is_stunned(combatant: &CombatantState) -> bool {
        combatant.statuses.is_stunned()
    }
}
