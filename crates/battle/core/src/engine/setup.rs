//! Building a [`BattleState`] from roster snapshots.

use arrayvec::ArrayVec;

use super::errors::DataIntegrityError;
use crate::config::BattleConfig;
use crate::env::{AbilityOracle, BattleEnv, SpeciesOracle, StatusOracle};
use crate::state::{
    AbilitySlot, BattleMode, BattleState, CombatantId, CombatantState, Controller, Loadout,
    ResourceMeter, RosterEntry, Side,
};
use crate::status::{StatusEffectTracker, StatusEffects};

/// Everything needed to start a battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSetup {
    pub allies: Vec<RosterEntry>,
    pub enemies: Vec<RosterEntry>,
    pub mode: BattleMode,
    pub seed: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ally_controller: Controller,
}

impl BattleSetup {
    pub fn new(allies: Vec<RosterEntry>, enemies: Vec<RosterEntry>) -> Self {
        Self {
            allies,
            enemies,
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: BattleMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_ally_controller(mut self, controller: Controller) -> Self {
        self.ally_controller = controller;
        self
    }
}

/// Resolves every roster entry against the tables and lays out the combatants.
pub(crate) fn build_state(
    env: &BattleEnv<'_>,
    config: &BattleConfig,
    setup: &BattleSetup,
) -> Result<BattleState, DataIntegrityError> {
    config.validate()?;

    let mut combatants = Vec::with_capacity(setup.allies.len() + setup.enemies.len());
    for (side, roster) in [(Side::Ally, &setup.allies), (Side::Enemy, &setup.enemies)] {
        if roster.is_empty() {
            return Err(DataIntegrityError::EmptyRoster(side));
        }
        if roster.len() > BattleConfig::MAX_ROSTER_SIZE {
            return Err(DataIntegrityError::RosterTooLarge {
                side,
                len: roster.len(),
                max: BattleConfig::MAX_ROSTER_SIZE,
            });
        }

        for (roster_index, entry) in roster.iter().enumerate() {
            let id = CombatantId(combatants.len() as u8);
            combatants.push(build_combatant(env, id, side, roster_index as u8, entry)?);
        }

        if !combatants.iter().any(|c| c.side == side && c.is_alive()) {
            return Err(DataIntegrityError::NoConsciousCombatant(side));
        }
    }

    Ok(BattleState::new(setup.seed, setup.mode, combatants))
}

fn build_combatant(
    env: &BattleEnv<'_>,
    id: CombatantId,
    side: Side,
    roster_index: u8,
    entry: &RosterEntry,
) -> Result<CombatantState, DataIntegrityError> {
    let species = env
        .species()?
        .species(entry.species)
        .ok_or(DataIntegrityError::UnknownSpecies(entry.species))?;

    let elements: ArrayVec<_, { BattleConfig::MAX_ELEMENTS }> = species
        .elements
        .iter()
        .copied()
        .take(BattleConfig::MAX_ELEMENTS)
        .collect();
    if species.elements.is_empty() || species.elements.len() > BattleConfig::MAX_ELEMENTS {
        return Err(DataIntegrityError::InvalidElements {
            species: species.id,
            count: species.elements.len(),
        });
    }

    let ability_ids = if entry.abilities.is_empty() {
        &species.default_abilities
    } else {
        &entry.abilities
    };
    if ability_ids.is_empty() {
        return Err(DataIntegrityError::EmptyLoadout {
            species: species.id,
        });
    }
    if ability_ids.len() > BattleConfig::MAX_ABILITIES {
        return Err(DataIntegrityError::LoadoutTooLarge {
            species: species.id,
            len: ability_ids.len(),
            max: BattleConfig::MAX_ABILITIES,
        });
    }

    let abilities = env.abilities()?;
    let statuses = env.statuses()?;
    let mut loadout = Loadout::new();
    for &ability_id in ability_ids {
        let ability = abilities
            .ability(ability_id)
            .ok_or(DataIntegrityError::UnknownAbility(ability_id))?;
        if let Some(status) = ability.effect.referenced_status()
            && statuses.status(status).is_none()
        {
            return Err(DataIntegrityError::UnknownStatus {
                ability: ability_id,
                status,
            });
        }
        if loadout.iter().any(|slot| slot.ability == ability_id) {
            return Err(DataIntegrityError::DuplicateAbility {
                species: species.id,
                ability: ability_id,
            });
        }
        loadout.push(AbilitySlot::new(ability_id));
    }

    if entry.statuses.len() > BattleConfig::MAX_STATUS_EFFECTS {
        return Err(DataIntegrityError::TooManyStatuses {
            species: species.id,
            len: entry.statuses.len(),
            max: BattleConfig::MAX_STATUS_EFFECTS,
        });
    }
    if let Some(effect) = entry.statuses.iter().find(|e| statuses.status(e.id).is_none()) {
        return Err(DataIntegrityError::UnknownCarriedStatus {
            species: species.id,
            status: effect.id,
        });
    }

    let max_hp = species.stats.hp.max(1);
    let hp = entry.current_hp.unwrap_or(max_hp);

    let mut combatant = CombatantState {
        id,
        side,
        roster_index,
        species: species.id,
        name: entry
            .nickname
            .clone()
            .unwrap_or_else(|| species.name.clone()),
        nickname: entry.nickname.clone(),
        hp: ResourceMeter::new(hp, max_hp),
        stamina: ResourceMeter::full(species.stats.stamina),
        attack: species.stats.attack,
        defense: species.stats.defense,
        speed: species.stats.speed,
        elements,
        loadout,
        statuses: StatusEffects::empty(),
        experience_yield: species.experience_yield,
    };
    if combatant.is_alive() {
        for effect in entry.statuses.iter().filter(|e| e.remaining > 0) {
            StatusEffectTracker::apply(&mut combatant, *effect);
        }
    }
    Ok(combatant)
}
