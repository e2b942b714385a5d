//! Species templates (base stats and default loadouts).

use std::fmt;

use super::abilities::AbilityId;
use super::types::Element;

/// Identifier of a species in the data table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpeciesId(pub u16);

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "species#{}", self.0)
    }
}

/// Base combat stats of a species.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub hp: u32,
    pub stamina: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl BaseStats {
    pub const fn new(hp: u32, stamina: u32, attack: u32, defense: u32, speed: u32) -> Self {
        Self {
            hp,
            stamina,
            attack,
            defense,
            speed,
        }
    }
}

/// Immutable species definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeciesTemplate {
    pub id: SpeciesId,
    pub name: String,
    /// One or two elements; the first is the primary.
    pub elements: Vec<Element>,
    pub stats: BaseStats,
    /// Loadout used when a roster entry does not specify one.
    pub default_abilities: Vec<AbilityId>,
    /// Experience granted for defeating this species.
    #[cfg_attr(feature = "serde", serde(default))]
    pub experience_yield: u32,
}

/// Oracle providing species templates by id.
pub trait SpeciesOracle: Send + Sync {
    fn species(&self, id: SpeciesId) -> Option<&SpeciesTemplate>;
}
