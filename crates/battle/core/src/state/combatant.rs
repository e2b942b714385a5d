//! Per-battle combatant state.

use arrayvec::ArrayVec;

use super::{CombatantId, RosterEntry, Side};
use crate::config::BattleConfig;
use crate::env::{AbilityId, Element, SpeciesId, Stat};
use crate::status::StatusEffects;

/// A bounded pool with a current and maximum value (HP, stamina).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Removes up to `amount`. Returns how much was actually removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    /// Adds up to `amount` without exceeding the maximum. Returns how much was added.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.maximum - self.current);
        self.current += added;
        added
    }

    /// Spends exactly `amount`, or nothing if the pool is too small.
    pub fn spend(&mut self, amount: u32) -> bool {
        if amount > self.current {
            return false;
        }
        self.current -= amount;
        true
    }

    /// Current value as a percentage of the maximum (0-100).
    pub fn percent(&self) -> u32 {
        if self.maximum == 0 {
            return 0;
        }
        (u64::from(self.current) * 100 / u64::from(self.maximum)) as u32
    }
}

/// One loadout entry with its cooldown bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySlot {
    pub ability: AbilityId,
    /// First round in which the ability may be used again.
    pub ready_from_round: u32,
}

impl AbilitySlot {
    pub fn new(ability: AbilityId) -> Self {
        Self {
            ability,
            ready_from_round: 0,
        }
    }

    #[inline]
    pub fn is_ready(&self, round: u32) -> bool {
        round >= self.ready_from_round
    }

    /// Puts the ability on cooldown after being used in `round`.
    pub fn trigger(&mut self, round: u32, cooldown: u8) {
        self.ready_from_round = round + u32::from(cooldown) + 1;
    }
}

pub type Loadout = ArrayVec<AbilitySlot, { BattleConfig::MAX_ABILITIES }>;

/// State of one creature for the duration of a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantState {
    pub id: CombatantId,
    pub side: Side,
    /// Position in the owner's roster.
    pub roster_index: u8,
    pub species: SpeciesId,
    pub name: String,
    /// Set when the roster entry carried a nickname.
    pub nickname: Option<String>,
    pub hp: ResourceMeter,
    pub stamina: ResourceMeter,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub elements: ArrayVec<Element, { BattleConfig::MAX_ELEMENTS }>,
    pub loadout: Loadout,
    pub statuses: StatusEffects,
    pub experience_yield: u32,
}

impl CombatantState {
    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }

    pub fn slot(&self, ability: AbilityId) -> Option<&AbilitySlot> {
        self.loadout.iter().find(|slot| slot.ability == ability)
    }

    pub fn slot_mut(&mut self, ability: AbilityId) -> Option<&mut AbilitySlot> {
        self.loadout.iter_mut().find(|slot| slot.ability == ability)
    }

    /// Base stat adjusted by active buffs and debuffs, never below 1.
    pub fn effective_stat(&self, stat: Stat) -> u32 {
        let base = match stat {
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::Speed => self.speed,
        };
        let adjusted = i64::from(base) + self.statuses.stat_modifier(stat);
        adjusted.clamp(1, i64::from(u32::MAX)) as u32
    }

    pub fn effective_attack(&self) -> u32 {
        self.effective_stat(Stat::Attack)
    }

    pub fn effective_defense(&self) -> u32 {
        self.effective_stat(Stat::Defense)
    }

    pub fn effective_speed(&self) -> u32 {
        self.effective_stat(Stat::Speed)
    }

    pub fn to_roster_entry(&self) -> RosterEntry {
        RosterEntry {
            species: self.species,
            nickname: self.nickname.clone(),
            current_hp: Some(self.hp.current),
            abilities: self.loadout.iter().map(|slot| slot.ability).collect(),
            statuses: self.statuses.iter().copied().collect(),
        }
    }
}
