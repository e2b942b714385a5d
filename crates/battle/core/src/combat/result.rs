//! Resolution result types.

use crate::env::AbilityId;
use crate::state::CombatantId;
use crate::status::StatusEffect;

/// How an ability landed on one target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum HitOutcome {
    Miss,
    Hit,
    Critical,
}

impl HitOutcome {
    pub const fn landed(self) -> bool {
        !matches!(self, Self::Miss)
    }
}

/// Per-target part of a [`ResolutionResult`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetOutcome {
    pub target: CombatantId,
    pub hit: HitOutcome,
    /// Combined type multiplier in percent (100 for non-damaging effects).
    pub effectiveness_pct: u32,
    /// Requested HP change: negative for damage, positive for healing.
    /// Clamping to `[0, max]` happens when the result is applied.
    pub hp_delta: i64,
    /// Statuses to attach, in order.
    pub attach: Vec<StatusEffect>,
    /// Remove harmful statuses before attaching.
    pub cleanse: bool,
}

impl TargetOutcome {
    pub fn missed(target: CombatantId) -> Self {
        Self {
            target,
            hit: HitOutcome::Miss,
            effectiveness_pct: 100,
            hp_delta: 0,
            attach: Vec::new(),
            cleanse: false,
        }
    }

    pub fn landed(target: CombatantId) -> Self {
        Self {
            hit: HitOutcome::Hit,
            ..Self::missed(target)
        }
    }
}

/// Outcome of one ability use, computed without touching battle state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolutionResult {
    pub actor: CombatantId,
    pub ability: AbilityId,
    pub stamina_cost: u32,
    /// Cooldown (rounds) to start on the used ability.
    pub cooldown: u8,
    pub targets: Vec<TargetOutcome>,
    /// Human-readable narration, in order.
    pub messages: Vec<String>,
}

impl ResolutionResult {
    /// Total damage requested across all targets.
    pub fn total_damage(&self) -> u64 {
        self.targets
            .iter()
            .filter(|t| t.hp_delta < 0)
            .map(|t| t.hp_delta.unsigned_abs())
            .sum()
    }
}
