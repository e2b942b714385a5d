//! Status effects attached to combatants.
//!
//! Status effects are temporary conditions created from a
//! [`StatusDefinition`](crate::env::StatusDefinition): periodic damage or
//! healing, stuns, and stat modifiers. Durations count rounds and are
//! decremented once at the end of each round by [`StatusEffectTracker::tick`].
mod tracker;

use arrayvec::ArrayVec;

pub use tracker::{StatusEffectTracker, TickEntry, TickReport};

use crate::config::BattleConfig;
use crate::env::{StackingPolicy, Stat, StatusDefinition, StatusId, StatusKind};

/// A single attached status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub id: StatusId,
    pub kind: StatusKind,
    pub magnitude: u32,
    /// Rounds left, including the current one.
    pub remaining: u8,
    pub stacking: StackingPolicy,
}

impl StatusEffect {
    pub fn from_definition(definition: &StatusDefinition) -> Self {
        Self {
            id: definition.id,
            kind: definition.kind,
            magnitude: definition.magnitude,
            remaining: definition.duration.max(1),
            stacking: definition.stacking,
        }
    }
}

/// Result of attaching an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ApplyOutcome {
    /// The effect was not present and has been added.
    Attached,
    /// Duration reset to the new effect's duration.
    Refreshed,
    /// Magnitude added onto the existing effect.
    Stacked,
    /// Already present with `IgnoreIfPresent`.
    Ignored,
    /// No room left for another effect.
    Rejected,
}

impl ApplyOutcome {
    pub const fn changed(self) -> bool {
        matches!(self, Self::Attached | Self::Refreshed | Self::Stacked)
    }
}

/// Active status effects on a combatant, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn get(&self, id: StatusId) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: StatusId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.effects.is_full()
    }

    pub fn is_stunned(&self) -> bool {
        self.effects.iter().any(|e| e.kind == StatusKind::Stun)
    }

    /// Net modifier of buffs minus debuffs for `stat`.
    pub fn stat_modifier(&self, stat: Stat) -> i64 {
        self.effects
            .iter()
            .map(|e| match e.kind {
                StatusKind::StatBuff(s) if s == stat => i64::from(e.magnitude),
                StatusKind::StatDebuff(s) if s == stat => -i64::from(e.magnitude),
                _ => 0,
            })
            .sum()
    }

    /// Merges `effect` according to its stacking policy.
    ///
    /// The policy of the incoming effect decides how it merges with an
    /// attached effect of the same id.
    pub fn apply(&mut self, effect: StatusEffect) -> ApplyOutcome {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.id == effect.id) {
            return match effect.stacking {
                StackingPolicy::RefreshDuration => {
                    existing.remaining = effect.remaining;
                    ApplyOutcome::Refreshed
                }
                StackingPolicy::StackMagnitude => {
                    existing.magnitude = existing.magnitude.saturating_add(effect.magnitude);
                    existing.remaining = existing.remaining.max(effect.remaining);
                    ApplyOutcome::Stacked
                }
                StackingPolicy::IgnoreIfPresent => ApplyOutcome::Ignored,
            };
        }

        match self.effects.try_push(effect) {
            Ok(()) => ApplyOutcome::Attached,
            Err(_) => ApplyOutcome::Rejected,
        }
    }

    /// Removes every harmful effect. Returns the removed ids in insertion order.
    pub fn cleanse(&mut self) -> Vec<StatusId> {
        let removed = self
            .effects
            .iter()
            .filter(|e| e.kind.is_harmful())
            .map(|e| e.id)
            .collect();
        self.effects.retain(|e| !e.kind.is_harmful());
        removed
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut StatusEffect> {
        self.effects.iter_mut()
    }

    /// Drops effects whose duration ran out. Returns their ids in insertion order.
    pub(crate) fn remove_expired(&mut self) -> Vec<StatusId> {
        let expired = self
            .effects
            .iter()
            .filter(|e| e.remaining == 0)
            .map(|e| e.id)
            .collect();
        self.effects.retain(|e| e.remaining > 0);
        expired
    }
}
