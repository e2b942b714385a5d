//! Status-effect definition table.

use std::fmt;

/// Identifier of a status definition (e.g. poison, stun, guard-up).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatusId(pub u16);

impl fmt::Display for StatusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status#{}", self.0)
    }
}

/// Stat that buffs and debuffs modify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Stat {
    Attack,
    Defense,
    Speed,
}

/// What a status effect does while attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    /// Loses `magnitude` HP at every end-of-round tick.
    DamageOverTime,
    /// Recovers `magnitude` HP at every end-of-round tick.
    HealOverTime,
    /// Skips its actions while attached.
    Stun,
    /// Adds `magnitude` to the stat.
    StatBuff(Stat),
    /// Subtracts `magnitude` from the stat (effective stats never drop below 1).
    StatDebuff(Stat),
}

impl StatusKind {
    /// Harmful effects are the ones a cleanse removes.
    pub const fn is_harmful(self) -> bool {
        matches!(
            self,
            Self::DamageOverTime | Self::Stun | Self::StatDebuff(_)
        )
    }
}

/// How a new application merges with an already attached effect of the same id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StackingPolicy {
    /// Duration is set to the new effect's duration.
    #[default]
    RefreshDuration,
    /// Magnitudes add up; the longer duration is kept.
    StackMagnitude,
    /// A second application is a no-op.
    IgnoreIfPresent,
}

/// Immutable status definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusDefinition {
    pub id: StatusId,
    pub name: String,
    pub kind: StatusKind,
    pub magnitude: u32,
    /// Rounds the effect stays attached (at least 1).
    pub duration: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stacking: StackingPolicy,
}

/// Oracle providing status definitions by id.
pub trait StatusOracle: Send + Sync {
    fn status(&self, id: StatusId) -> Option<&StatusDefinition>;
}
