//! Shared fixtures for unit tests.

use arrayvec::ArrayVec;

use crate::env::{
    Ability, AbilityEffect, AbilityId, BaseStats, Element, SpeciesId, SpeciesTemplate, Stat,
    StackingPolicy, StatusDefinition, StatusId, StatusKind, StatusRider, TableSnapshot,
    TargetSelector,
};
use crate::state::{CombatantId, CombatantState, Loadout, ResourceMeter, Side};
use crate::status::StatusEffects;

pub const POISON: StatusId = StatusId(1);
pub const STUN: StatusId = StatusId(2);
pub const GUARD_UP: StatusId = StatusId(3);
pub const WEAKEN: StatusId = StatusId(4);

pub const TACKLE: AbilityId = AbilityId(1);
pub const EMBER: AbilityId = AbilityId(2);
pub const TOXIC_SPIT: AbilityId = AbilityId(3);
pub const TIDAL_WAVE: AbilityId = AbilityId(4);
pub const MEND: AbilityId = AbilityId(5);
pub const HARDEN: AbilityId = AbilityId(6);
pub const STUN_SPORE: AbilityId = AbilityId(7);
pub const INTIMIDATE: AbilityId = AbilityId(8);

pub const EMBERLING: SpeciesId = SpeciesId(1);
pub const TIDEPUP: SpeciesId = SpeciesId(2);
pub const PEBBLIT: SpeciesId = SpeciesId(3);
pub const ZEPHYR: SpeciesId = SpeciesId(4);
pub const MOSSBACK: SpeciesId = SpeciesId(5);

/// A bare combatant with no elements, abilities or statuses.
pub fn combatant(id: u8, side: Side, hp: u32, attack: u32, defense: u32, speed: u32) -> CombatantState {
    CombatantState {
        id: CombatantId(id),
        side,
        roster_index: 0,
        species: SpeciesId(0),
        name: format!("c{id}"),
        nickname: None,
        hp: ResourceMeter::full(hp),
        stamina: ResourceMeter::full(30),
        attack,
        defense,
        speed,
        elements: ArrayVec::new(),
        loadout: Loadout::new(),
        statuses: StatusEffects::empty(),
        experience_yield: 10,
    }
}

fn status(id: StatusId, name: &str, kind: StatusKind, magnitude: u32, duration: u8, stacking: StackingPolicy) -> StatusDefinition {
    StatusDefinition {
        id,
        name: name.into(),
        kind,
        magnitude,
        duration,
        stacking,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn ability(
    id: AbilityId,
    name: &str,
    power: u32,
    element: Element,
    effect: AbilityEffect,
    target: TargetSelector,
    cost: u32,
    cooldown: u8,
) -> Ability {
    Ability {
        id,
        name: name.into(),
        power,
        accuracy: 100,
        element,
        effect,
        target,
        cost,
        cooldown,
    }
}

fn species(id: SpeciesId, name: &str, elements: &[Element], stats: BaseStats, abilities: &[AbilityId], experience_yield: u32) -> SpeciesTemplate {
    SpeciesTemplate {
        id,
        name: name.into(),
        elements: elements.to_vec(),
        stats,
        default_abilities: abilities.to_vec(),
        experience_yield,
    }
}

/// Small data set with every effect kind represented.
pub fn sample_tables() -> TableSnapshot {
    use AbilityEffect::*;
    use TargetSelector::*;

    TableSnapshot::new()
        .with_status(status(POISON, "Poison", StatusKind::DamageOverTime, 5, 3, StackingPolicy::RefreshDuration))
        .with_status(status(STUN, "Stun", StatusKind::Stun, 0, 2, StackingPolicy::IgnoreIfPresent))
        .with_status(status(GUARD_UP, "Guard Up", StatusKind::StatBuff(Stat::Defense), 5, 3, StackingPolicy::StackMagnitude))
        .with_status(status(WEAKEN, "Weaken", StatusKind::StatDebuff(Stat::Attack), 4, 2, StackingPolicy::RefreshDuration))
        .with_ability(ability(TACKLE, "Tackle", 20, Element::Neutral, Damage { inflicts: None }, SingleEnemy, 0, 0))
        .with_ability(ability(EMBER, "Ember", 30, Element::Fire, Damage { inflicts: None }, SingleEnemy, 5, 0))
        .with_ability(ability(
            TOXIC_SPIT,
            "Toxic Spit",
            5,
            Element::Neutral,
            Damage {
                inflicts: Some(StatusRider { status: POISON, chance: 100 }),
            },
            SingleEnemy,
            4,
            2,
        ))
        .with_ability(ability(TIDAL_WAVE, "Tidal Wave", 25, Element::Water, Damage { inflicts: None }, AllEnemies, 10, 3))
        .with_ability(ability(MEND, "Mend", 10, Element::Light, Heal { percent_of_max: 20, cleanse: true }, SelfOnly, 6, 2))
        .with_ability(ability(HARDEN, "Harden", 0, Element::Earth, BuffDebuff { status: GUARD_UP }, SelfOnly, 3, 1))
        .with_ability(ability(STUN_SPORE, "Stun Spore", 0, Element::Earth, Status { status: STUN, chance: 100 }, SingleEnemy, 8, 3))
        .with_ability(ability(INTIMIDATE, "Intimidate", 0, Element::Shadow, BuffDebuff { status: WEAKEN }, SingleEnemy, 4, 2))
        .with_species(species(EMBERLING, "Emberling", &[Element::Fire], BaseStats::new(50, 20, 12, 10, 10), &[TACKLE, EMBER, TOXIC_SPIT], 30))
        .with_species(species(TIDEPUP, "Tidepup", &[Element::Water], BaseStats::new(60, 30, 10, 12, 6), &[TACKLE, TIDAL_WAVE, MEND], 35))
        .with_species(species(PEBBLIT, "Pebblit", &[Element::Earth, Element::Frost], BaseStats::new(70, 20, 11, 14, 4), &[TACKLE, HARDEN, STUN_SPORE], 40))
        .with_species(species(ZEPHYR, "Zephyr", &[Element::Air], BaseStats::new(40, 25, 9, 8, 14), &[TACKLE, INTIMIDATE], 25))
        .with_species(species(MOSSBACK, "Mossback", &[Element::Earth], BaseStats::new(200, 10, 5, 20, 1), &[HARDEN], 60))
}
