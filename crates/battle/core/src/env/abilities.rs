//! Ability definitions.
//!
//! Abilities are immutable reference data. The effect payload is a tagged
//! variant so the resolver matches it exhaustively.

use std::fmt;

use super::status::StatusId;
use super::types::Element;
use crate::config::BattleConfig;

/// Identifier of an ability definition.
///
/// Ordering matters: the AI breaks score ties by the lower id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AbilityId(pub u16);

impl AbilityId {
    /// Reserved id of the synthetic basic attack. Never present in data tables.
    pub const BASIC_ATTACK: Self = Self(u16::MAX);

    #[inline]
    pub const fn is_basic_attack(self) -> bool {
        self.0 == Self::BASIC_ATTACK.0
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_basic_attack() {
            write!(f, "ability#basic")
        } else {
            write!(f, "ability#{}", self.0)
        }
    }
}

/// Which combatants an ability can affect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetSelector {
    SelfOnly,
    SingleEnemy,
    SingleAlly,
    AllEnemies,
    AllAllies,
}

impl TargetSelector {
    /// Whether the submitted action must name an explicit target.
    pub const fn needs_explicit_target(self) -> bool {
        matches!(self, Self::SingleEnemy | Self::SingleAlly)
    }

    /// Whether the selector points at the opposing side.
    pub const fn is_offensive(self) -> bool {
        matches!(self, Self::SingleEnemy | Self::AllEnemies)
    }
}

/// A status attached with some probability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusRider {
    pub status: StatusId,
    /// Percent chance (0-100) per target hit.
    pub chance: u8,
}

/// Kind-specific payload of an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityEffect {
    /// Runs the damage formula; optionally inflicts a status on hit.
    Damage { inflicts: Option<StatusRider> },
    /// Restores `power + percent_of_max`% of the target's max HP.
    Heal { percent_of_max: u8, cleanse: bool },
    /// Attaches a status (DoT, stun, ...) after an accuracy roll.
    Status { status: StatusId, chance: u8 },
    /// Attaches a stat buff or debuff. Never misses.
    BuffDebuff { status: StatusId },
}

impl AbilityEffect {
    /// Status ids referenced by this payload.
    pub fn referenced_status(&self) -> Option<StatusId> {
        match *self {
            Self::Damage { inflicts } => inflicts.map(|rider| rider.status),
            Self::Heal { .. } => None,
            Self::Status { status, .. } | Self::BuffDebuff { status } => Some(status),
        }
    }
}

/// Immutable ability definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub id: AbilityId,
    pub name: String,
    pub power: u32,
    /// Base accuracy in percent.
    pub accuracy: u8,
    pub element: Element,
    pub effect: AbilityEffect,
    pub target: TargetSelector,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: u32,
    /// Rounds the ability stays unavailable after use.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u8,
}

impl Ability {
    /// The always-available fallback attack: typeless, free, no cooldown.
    pub fn basic_attack(config: &BattleConfig) -> Self {
        Self {
            id: AbilityId::BASIC_ATTACK,
            name: "Strike".to_string(),
            power: config.basic_attack_power,
            accuracy: config.basic_attack_accuracy,
            element: Element::Neutral,
            effect: AbilityEffect::Damage { inflicts: None },
            target: TargetSelector::SingleEnemy,
            cost: 0,
            cooldown: 0,
        }
    }
}

/// Oracle providing ability definitions by id.
pub trait AbilityOracle: Send + Sync {
    fn ability(&self, id: AbilityId) -> Option<&Ability>;
}
