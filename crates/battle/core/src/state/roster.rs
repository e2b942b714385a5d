use crate::env::{AbilityId, SpeciesId};
use crate::status::StatusEffect;

/// A creature instance as handed to `start_battle` and returned after it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterEntry {
    pub species: SpeciesId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub nickname: Option<String>,
    /// Persistent HP carried into the battle; `None` means full health.
    #[cfg_attr(feature = "serde", serde(default))]
    pub current_hp: Option<u32>,
    /// Ability loadout; empty takes the species default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<AbilityId>,
    /// Effects still running when the previous battle ended.
    #[cfg_attr(feature = "serde", serde(default))]
    pub statuses: Vec<StatusEffect>,
}

impl RosterEntry {
    pub fn new(species: SpeciesId) -> Self {
        Self {
            species,
            nickname: None,
            current_hp: None,
            abilities: Vec::new(),
            statuses: Vec::new(),
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = StatusEffect>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = AbilityId>) -> Self {
        self.abilities = abilities.into_iter().collect();
        self
    }
}
