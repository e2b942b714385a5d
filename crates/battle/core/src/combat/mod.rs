//! Ability resolution.
//!
//! Pure functions that compute what an ability does: hit checks, the damage
//! and heal formulas, and the per-target [`ResolutionResult`]. Nothing here
//! mutates battle state; the engine applies results atomically.
//!
//! - `resolve_ability`: complete resolution of one ability use
//! - `expected_damage`: roll-free mean damage used by the AI
//! - `calculate_hit_chance` / `calculate_damage`: the underlying formulas

pub mod damage;
pub mod hit;
mod resolve;
pub mod result;

pub use damage::{DamageRoll, calculate_damage, calculate_heal, mean_damage};
pub use hit::{calculate_hit_chance, check_hit};
pub use resolve::{ResolveContext, expected_damage, resolve_ability};
pub use result::{HitOutcome, ResolutionResult, TargetOutcome};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::env::{
        Ability, AbilityEffect, AbilityId, Element, PcgRng, StatusId, StatusRider, TableSnapshot,
        TargetSelector,
    };
    use crate::state::Side;
    use crate::test_support::{combatant, sample_tables};

    fn ctx<'a>(config: &'a BattleConfig, tables: &'a TableSnapshot, rng: &'a PcgRng) -> ResolveContext<'a> {
        ResolveContext {
            config,
            chart: tables,
            statuses: tables,
            rng,
            seed: 7,
            nonce: 0,
        }
    }

    fn strike(power: u32, element: Element) -> Ability {
        Ability {
            id: AbilityId(1),
            name: "Strike".into(),
            power,
            accuracy: 100,
            element,
            effect: AbilityEffect::Damage { inflicts: None },
            target: TargetSelector::SingleEnemy,
            cost: 0,
            cooldown: 0,
        }
    }

    #[test]
    fn neutral_hit_with_pinned_rolls_deals_formula_damage() {
        let config = BattleConfig::deterministic();
        let tables = sample_tables();
        let rng = PcgRng;
        let a = combatant(0, Side::Ally, 50, 10, 10, 10);
        let b = combatant(1, Side::Enemy, 50, 10, 10, 5);

        let result = resolve_ability(&strike(20, Element::Neutral), &a, &[&b], &ctx(&config, &tables, &rng)).unwrap();

        assert_eq!(result.targets.len(), 1);
        assert_eq!(result.targets[0].hit, HitOutcome::Hit);
        assert_eq!(result.targets[0].hp_delta, -20);
        assert_eq!(result.total_damage(), 20);
    }

    #[test]
    fn immune_target_takes_nothing_and_gets_no_rider() {
        let config = BattleConfig::deterministic();
        let tables = sample_tables();
        let rng = PcgRng;
        let a = combatant(0, Side::Ally, 50, 10, 10, 10);
        let mut b = combatant(1, Side::Enemy, 50, 10, 10, 5);
        b.elements.push(Element::Air);

        let mut quake = strike(40, Element::Earth);
        quake.effect = AbilityEffect::Damage {
            inflicts: Some(StatusRider {
                status: StatusId(1),
                chance: 100,
            }),
        };

        let result = resolve_ability(&quake, &a, &[&b], &ctx(&config, &tables, &rng)).unwrap();
        let outcome = &result.targets[0];
        assert_eq!(outcome.effectiveness_pct, 0);
        assert_eq!(outcome.hp_delta, 0);
        assert!(outcome.attach.is_empty());
    }

    #[test]
    fn guaranteed_rider_attaches_status() {
        let config = BattleConfig::deterministic();
        let tables = sample_tables();
        let rng = PcgRng;
        let a = combatant(0, Side::Ally, 50, 10, 10, 10);
        let b = combatant(1, Side::Enemy, 50, 10, 10, 5);

        let mut sting = strike(10, Element::Neutral);
        sting.effect = AbilityEffect::Damage {
            inflicts: Some(StatusRider {
                status: StatusId(1),
                chance: 100,
            }),
        };

        let result = resolve_ability(&sting, &a, &[&b], &ctx(&config, &tables, &rng)).unwrap();
        assert_eq!(result.targets[0].attach.len(), 1);
        assert_eq!(result.targets[0].attach[0].id, StatusId(1));
    }

    #[test]
    fn zero_accuracy_always_misses_opponents() {
        let config = BattleConfig {
            hit_chance_min: 0,
            ..BattleConfig::deterministic()
        };
        let tables = sample_tables();
        let rng = PcgRng;
        let a = combatant(0, Side::Ally, 50, 10, 10, 10);
        let b = combatant(1, Side::Enemy, 50, 10, 10, 10);
        let mut wild = strike(30, Element::Fire);
        wild.accuracy = 0;

        for nonce in 0..20 {
            let ctx = ResolveContext {
                nonce,
                ..ctx(&config, &tables, &rng)
            };
            let result = resolve_ability(&wild, &a, &[&b], &ctx).unwrap();
            assert_eq!(result.targets[0].hit, HitOutcome::Miss);
            assert_eq!(result.targets[0].hp_delta, 0);
        }
    }

    #[test]
    fn heal_never_misses_and_adds_percent() {
        let config = BattleConfig::deterministic();
        let tables = sample_tables();
        let rng = PcgRng;
        let a = combatant(0, Side::Ally, 80, 10, 10, 10);
        let mut mend = strike(5, Element::Light);
        mend.effect = AbilityEffect::Heal {
            percent_of_max: 25,
            cleanse: true,
        };
        mend.accuracy = 0;
        mend.target = TargetSelector::SelfOnly;

        let result = resolve_ability(&mend, &a, &[&a], &ctx(&config, &tables, &rng)).unwrap();
        assert_eq!(result.targets[0].hp_delta, 25);
        assert!(result.targets[0].cleanse);
    }

    #[test]
    fn unknown_status_is_a_data_error() {
        let config = BattleConfig::deterministic();
        let tables = sample_tables();
        let rng = PcgRng;
        let a = combatant(0, Side::Ally, 50, 10, 10, 10);
        let mut hex = strike(0, Element::Shadow);
        hex.effect = AbilityEffect::BuffDebuff {
            status: StatusId(999),
        };

        assert!(resolve_ability(&hex, &a, &[&a], &ctx(&config, &tables, &rng)).is_err());
    }

    #[test]
    fn expected_damage_accounts_for_type_and_accuracy() {
        let config = BattleConfig::deterministic();
        let tables = sample_tables();
        let a = combatant(0, Side::Ally, 50, 10, 10, 10);
        let mut b = combatant(1, Side::Enemy, 50, 10, 10, 10);
        b.elements.push(Element::Frost);

        assert_eq!(expected_damage(&strike(20, Element::Fire), &a, &b, &config, &tables), 40);

        let mut shaky = strike(20, Element::Fire);
        shaky.accuracy = 50;
        assert_eq!(expected_damage(&shaky, &a, &b, &config, &tables), 20);
    }
}
