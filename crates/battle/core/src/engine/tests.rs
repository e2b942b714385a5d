use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::*;
use crate::action::RejectReason;
use crate::combat::{ResolutionResult, ResolveContext, resolve_ability};
use crate::env::{
    AbilityEffect, BaseStats, Element, PcgRng, SpeciesId, SpeciesTemplate, StatusId, StatusOracle,
    TableSnapshot, TargetSelector,
};
use crate::state::{BattleMode, CombatantState, RosterEntry};
use crate::test_support::*;

const JAB: crate::env::AbilityId = crate::env::AbilityId(40);
const QUICK: SpeciesId = SpeciesId(40);
const SLOW: SpeciesId = SpeciesId(41);
const WISP: SpeciesId = SpeciesId(42);

fn template(id: SpeciesId, name: &str, stats: BaseStats, abilities: &[crate::env::AbilityId]) -> SpeciesTemplate {
    SpeciesTemplate {
        id,
        name: name.into(),
        elements: vec![Element::Neutral],
        stats,
        default_abilities: abilities.to_vec(),
        experience_yield: 20,
    }
}

fn tables() -> TableSnapshot {
    sample_tables()
        .with_ability(ability(
            JAB,
            "Jab",
            20,
            Element::Neutral,
            AbilityEffect::Damage { inflicts: None },
            TargetSelector::SingleEnemy,
            0,
            0,
        ))
        .with_species(template(QUICK, "Quick", BaseStats::new(50, 20, 10, 10, 10), &[JAB]))
        .with_species(template(SLOW, "Slow", BaseStats::new(50, 20, 10, 10, 5), &[JAB]))
        .with_species(template(WISP, "Wisp", BaseStats::new(30, 2, 8, 8, 8), &[TACKLE, EMBER]))
}

/// Rolls pinned and every attack lands.
fn sure_hits() -> BattleConfig {
    BattleConfig {
        hit_chance_min: 100,
        ..BattleConfig::deterministic()
    }
}

fn roster(species: &[SpeciesId]) -> Vec<RosterEntry> {
    species.iter().copied().map(RosterEntry::new).collect()
}

fn resolved_in(log: &[BattleEvent], round: u32) -> Vec<(&ResolutionResult, bool)> {
    log.iter()
        .filter_map(|event| match event {
            BattleEvent::ActionResolved {
                round: r,
                result,
                retargeted,
                ..
            } if *r == round => Some((result, *retargeted)),
            _ => None,
        })
        .collect()
}

fn expect_awaiting(engine: &mut BattleEngine, env: &BattleEnv<'_>, actor: u8) {
    assert_eq!(
        engine.advance(env).unwrap(),
        Progress::AwaitingPlayer {
            actor: CombatantId(actor)
        }
    );
}

fn run_to_end(engine: &mut BattleEngine, env: &BattleEnv<'_>) -> Outcome {
    match engine.advance(env).unwrap() {
        Progress::Ended(outcome) => outcome,
        other => panic!("AI battle stopped early: {other:?}"),
    }
}

#[test]
fn faster_combatant_resolves_first_with_formula_damage() {
    let tables = tables();
    let env = BattleEnv::from_snapshot(&tables, &PcgRng);
    let config = BattleConfig::new();
    let setup = BattleSetup::new(roster(&[QUICK]), roster(&[SLOW])).with_seed(7);
    let mut engine = BattleEngine::start(&env, config.clone(), &setup).unwrap();

    expect_awaiting(&mut engine, &env, 0);
    let before = engine.state().combatants.clone();

    engine
        .submit_player_action(&env, BattleAction::use_ability(CombatantId(0), JAB, Some(CombatantId(1))))
        .unwrap();
    expect_awaiting(&mut engine, &env, 0);

    let state = engine.state();
    assert_eq!(
        state.log[0],
        BattleEvent::RoundStarted {
            round: 1,
            order: vec![CombatantId(0), CombatantId(1)],
        }
    );
    let resolved = resolved_in(&state.log, 1);
    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].0.actor, CombatantId(0));
    assert_eq!(resolved[1].0.actor, CombatantId(1));

    let jab = tables.abilities().find(|a| a.id == JAB).unwrap().clone();
    let expected = |nonce, attacker: &CombatantState, defender: &CombatantState| {
        let ctx = ResolveContext {
            config: &config,
            chart: tables.chart(),
            statuses: &tables,
            rng: &PcgRng,
            seed: 7,
            nonce,
        };
        resolve_ability(&jab, attacker, &[defender], &ctx).unwrap().targets[0].hp_delta
    };

    let to_slow = expected(0, &before[0], &before[1]);
    let to_quick = expected(1, &before[1], &before[0]);
    assert!((-30..=-17).contains(&to_slow), "damage {to_slow} outside the formula range");
    assert_eq!(i64::from(state.combatants[1].hp.current), 50 + to_slow);
    assert_eq!(i64::from(state.combatants[0].hp.current), 50 + to_quick);
}

#[test]
fn poison_ticks_three_rounds_then_expires() {
    let tables = tables();
    let env = BattleEnv::from_snapshot(&tables, &PcgRng);
    let setup = BattleSetup::new(roster(&[EMBERLING]), roster(&[MOSSBACK]));
    let mut engine = BattleEngine::start(&env, BattleConfig::deterministic(), &setup).unwrap();
    let enemy = CombatantId(1);

    expect_awaiting(&mut engine, &env, 0);
    engine
        .submit_player_action(&env, BattleAction::use_ability(CombatantId(0), TOXIC_SPIT, Some(enemy)))
        .unwrap();

    for remaining in [2, 1] {
        expect_awaiting(&mut engine, &env, 0);
        let poison = engine.state().combatants[1].statuses.get(POISON).copied();
        assert_eq!(poison.map(|p| p.remaining), Some(remaining));
        engine
            .submit_player_action(&env, BattleAction::use_ability(CombatantId(0), TACKLE, Some(enemy)))
            .unwrap();
    }
    expect_awaiting(&mut engine, &env, 0);
    assert_eq!(engine.state().round, 4);
    assert!(!engine.state().combatants[1].statuses.contains(POISON));

    let ticks: Vec<_> = engine
        .state()
        .log
        .iter()
        .filter_map(|event| match event {
            BattleEvent::StatusTicked { target, status, hp_delta } if *target == enemy && *status == POISON => Some(*hp_delta),
            _ => None,
        })
        .collect();
    assert_eq!(ticks, vec![-5, -5, -5]);
    assert!(engine.state().log.contains(&BattleEvent::StatusExpired {
        target: enemy,
        status: POISON
    }));
}

#[test]
fn ai_falls_back_to_basic_attack_while_on_cooldown() {
    let tables = tables();
    let env = BattleEnv::from_snapshot(&tables, &PcgRng);
    let setup = BattleSetup::new(roster(&[EMBERLING]), roster(&[MOSSBACK]));
    let mut engine = BattleEngine::start(&env, BattleConfig::deterministic(), &setup).unwrap();

    for _ in 0..2 {
        expect_awaiting(&mut engine, &env, 0);
        engine
            .submit_player_action(&env, BattleAction::use_ability(CombatantId(0), TACKLE, Some(CombatantId(1))))
            .unwrap();
    }
    expect_awaiting(&mut engine, &env, 0);

    let enemy_ability = |round| {
        resolved_in(&engine.state().log, round)
            .into_iter()
            .find(|(result, _)| result.actor == CombatantId(1))
            .map(|(result, _)| result.ability)
    };
    // Harden has a one-round cooldown: used in round 1, ready again in round 3.
    assert_eq!(enemy_ability(1), Some(HARDEN));
    assert_eq!(enemy_ability(2), Some(crate::env::AbilityId::BASIC_ATTACK));
}

#[test]
fn turn_order_by_speed_with_ally_tiebreak() {
    use crate::state::{BattleState, Side};

    let mut fainted = combatant(4, Side::Enemy, 10, 5, 5, 99);
    fainted.hp.current = 0;
    let state = BattleState::new(
        1,
        BattleMode::Standard,
        vec![
            combatant(0, Side::Ally, 10, 5, 5, 10),
            combatant(1, Side::Ally, 10, 5, 5, 5),
            combatant(2, Side::Enemy, 10, 5, 5, 10),
            combatant(3, Side::Enemy, 10, 5, 5, 20),
            fainted,
        ],
    );

    let order: Vec<_> = compute_turn_order(&state).into_iter().map(|id| id.0).collect();
    assert_eq!(order, vec![3, 0, 2, 1]);
}

#[test]
fn rejected_submissions_leave_state_untouched() {
    let tables = tables();
    let env = BattleEnv::from_snapshot(&tables, &PcgRng);
    let setup = BattleSetup::new(roster(&[EMBERLING]), roster(&[MOSSBACK])).with_mode(BattleMode::Guardian);
    let mut engine = BattleEngine::start(&env, BattleConfig::deterministic(), &setup).unwrap();
    expect_awaiting(&mut engine, &env, 0);

    let me = CombatantId(0);
    let foe = CombatantId(1);
    let cases = [
        (BattleAction::flee(me), RejectReason::FleeNotAllowed),
        (
            BattleAction::use_ability(foe, HARDEN, None),
            RejectReason::NotActorsTurn { actor: foe, expected: me },
        ),
        (
            BattleAction::use_ability(me, HARDEN, None),
            RejectReason::AbilityNotInLoadout { ability: HARDEN },
        ),
        (
            BattleAction::use_ability(me, TACKLE, None),
            RejectReason::MissingTarget { ability: TACKLE },
        ),
        (
            BattleAction::use_ability(me, TACKLE, Some(CombatantId(9))),
            RejectReason::UnknownTarget(CombatantId(9)),
        ),
        (
            BattleAction::use_ability(me, TACKLE, Some(me)),
            RejectReason::WrongSide { ability: TACKLE, target: me },
        ),
    ];

    let snapshot = engine.state().clone();
    for (action, reason) in cases {
        let err = engine.submit_player_action(&env, action).unwrap_err();
        assert_eq!(err.as_rejection(), Some(&reason), "{action:?}");
        assert_eq!(engine.state(), &snapshot);
    }

    engine
        .submit_player_action(&env, BattleAction::use_ability(me, TOXIC_SPIT, Some(foe)))
        .unwrap();
    expect_awaiting(&mut engine, &env, 0);
    let err = engine
        .submit_player_action(&env, BattleAction::use_ability(me, TOXIC_SPIT, Some(foe)))
        .unwrap_err();
    assert_eq!(
        err.as_rejection(),
        Some(&RejectReason::AbilityOnCooldown {
            ability: TOXIC_SPIT,
            ready_round: 4
        })
    );
}

#[test]
fn unaffordable_ability_is_rejected() {
    let tables = tables();
    let env = BattleEnv::from_snapshot(&tables, &PcgRng);
    let setup = BattleSetup::new(roster(&[WISP]), roster(&[MOSSBACK]));
    let mut engine = BattleEngine::start(&env, BattleConfig::deterministic(), &setup).unwrap();
    expect_awaiting(&mut engine, &env, 0);

    let err = engine
        .submit_player_action(&env, BattleAction::use_ability(CombatantId(0), EMBER, Some(CombatantId(1))))
        .unwrap_err();
    assert_eq!(
        err.as_rejection(),
        Some(&RejectReason::InsufficientStamina {
            required: 5,
            available: 2
        })
    );

    let options = engine.options_for(&env, CombatantId(0)).unwrap();
    assert!(options.iter().all(|c| c.ability != EMBER));
    assert!(options.iter().any(|c| c.ability == TACKLE));
}

#[test]
fn flee_ends_battle_and_locks_engine() {
    let tables = tables();
    let env = BattleEnv::from_snapshot(&tables, &PcgRng);
    let setup = BattleSetup::new(roster(&[EMBERLING]), roster(&[ZEPHYR]));
    let mut engine = BattleEngine::start(&env, BattleConfig::deterministic(), &setup).unwrap();
    expect_awaiting(&mut engine, &env, 0);

    let submitted = engine
        .submit_player_action(&env, BattleAction::flee(CombatantId(0)))
        .unwrap();
    assert_eq!(submitted, Submitted::Ended(Outcome::Fled));
    assert_eq!(engine.outcome(), Some(Outcome::Fled));
    assert_eq!(
        engine.state().log.last(),
        Some(&BattleEvent::BattleEnded {
            outcome: Outcome::Fled,
            rounds: 1,
            rewards: None,
        })
    );

    let violation = BattleError::TerminalState(TerminalStateViolation { outcome: Outcome::Fled });
    assert_eq!(engine.advance(&env).unwrap_err(), violation);
    assert_eq!(
        engine
            .submit_player_action(&env, BattleAction::use_ability(CombatantId(0), TACKLE, Some(CombatantId(1))))
            .unwrap_err(),
        violation
    );
}

#[test]
fn stunned_combatant_loses_its_action() {
    let tables = tables();
    let env = BattleEnv::from_snapshot(&tables, &PcgRng);
    let setup = BattleSetup::new(roster(&[PEBBLIT]), roster(&[MOSSBACK]));
    let mut engine = BattleEngine::start(&env, BattleConfig::deterministic(), &setup).unwrap();

    expect_awaiting(&mut engine, &env, 0);
    engine
        .submit_player_action(&env, BattleAction::use_ability(CombatantId(0), STUN_SPORE, Some(CombatantId(1))))
        .unwrap();
    expect_awaiting(&mut engine, &env, 0);

    let log = &engine.state().log;
    assert!(log.contains(&BattleEvent::ActionSkipped {
        round: 1,
        actor: CombatantId(1),
        reason: SkipReason::Stunned,
    }));
    assert_eq!(resolved_in(log, 1).len(), 1);
    let mossback = engine.state().combatant(CombatantId(1)).unwrap();
    assert_eq!(mossback.statuses.get(STUN).map(|s| s.remaining), Some(1));

    engine
        .submit_player_action(&env, BattleAction::use_ability(CombatantId(0), TACKLE, Some(CombatantId(1))))
        .unwrap();
    expect_awaiting(&mut engine, &env, 0);

    let log = &engine.state().log;
    assert!(log.contains(&BattleEvent::ActionSkipped {
        round: 2,
        actor: CombatantId(1),
        reason: SkipReason::Stunned,
    }));
    assert!(log.contains(&BattleEvent::StatusExpired {
        target: CombatantId(1),
        status: STUN
    }));
    assert_eq!(resolved_in(log, 2).len(), 1);
}

#[test]
fn stun_from_slower_caster_skips_the_next_round() {
    let tables = tables();
    let env = BattleEnv::from_snapshot(&tables, &PcgRng);
    let setup = BattleSetup::new(roster(&[PEBBLIT]), roster(&[QUICK]));
    let mut engine = BattleEngine::start(&env, sure_hits(), &setup).unwrap();
    let quick = CombatantId(1);

    expect_awaiting(&mut engine, &env, 0);
    engine
        .submit_player_action(&env, BattleAction::use_ability(CombatantId(0), STUN_SPORE, Some(quick)))
        .unwrap();
    expect_awaiting(&mut engine, &env, 0);

    let log = &engine.state().log;
    assert_eq!(resolved_in(log, 1).len(), 2);
    assert!(engine.state().combatant(quick).unwrap().statuses.is_stunned());
    assert!(log.contains(&BattleEvent::ActionSkipped {
        round: 2,
        actor: quick,
        reason: SkipReason::Stunned,
    }));

    engine
        .submit_player_action(&env, BattleAction::use_ability(CombatantId(0), TACKLE, Some(quick)))
        .unwrap();
    expect_awaiting(&mut engine, &env, 0);

    let log = &engine.state().log;
    let round_two = resolved_in(log, 2);
    assert_eq!(round_two.len(), 1);
    assert_eq!(round_two[0].0.actor, CombatantId(0));
    assert!(!engine.state().combatant(quick).unwrap().statuses.is_stunned());
}

#[test]
fn fainted_target_is_replaced_by_first_living_opponent() {
    let tables = tables();
    let env = BattleEnv::from_snapshot(&tables, &PcgRng);
    let setup = BattleSetup::new(
        roster(&[EMBERLING, EMBERLING]),
        vec![RosterEntry::new(ZEPHYR).with_hp(1), RosterEntry::new(MOSSBACK)],
    );
    let mut engine = BattleEngine::start(&env, sure_hits(), &setup).unwrap();
    let zephyr = CombatantId(2);

    expect_awaiting(&mut engine, &env, 0);
    engine
        .submit_player_action(&env, BattleAction::use_ability(CombatantId(0), TACKLE, Some(zephyr)))
        .unwrap();
    expect_awaiting(&mut engine, &env, 1);
    engine
        .submit_player_action(&env, BattleAction::use_ability(CombatantId(1), TACKLE, Some(zephyr)))
        .unwrap();
    expect_awaiting(&mut engine, &env, 0);

    let log = &engine.state().log;
    assert!(log.contains(&BattleEvent::CombatantFainted { target: zephyr }));
    let (second, retargeted) = resolved_in(log, 1)
        .into_iter()
        .find(|(result, _)| result.actor == CombatantId(1))
        .unwrap();
    assert!(retargeted);
    assert_eq!(second.targets[0].target, CombatantId(3));
}

#[test]
fn round_limit_compares_hp_fractions() {
    let tables = tables();
    let env = BattleEnv::from_snapshot(&tables, &PcgRng);
    let config = BattleConfig {
        max_rounds: 1,
        ..BattleConfig::deterministic()
    };

    let even = BattleSetup::new(roster(&[MOSSBACK]), roster(&[MOSSBACK])).with_ally_controller(Controller::Ai);
    let mut engine = BattleEngine::start(&env, config.clone(), &even).unwrap();
    assert_eq!(run_to_end(&mut engine, &env), Outcome::EnemyVictory);

    let ahead = BattleSetup::new(roster(&[MOSSBACK]), vec![RosterEntry::new(MOSSBACK).with_hp(100)])
        .with_ally_controller(Controller::Ai);
    let mut engine = BattleEngine::start(&env, config, &ahead).unwrap();
    assert_eq!(run_to_end(&mut engine, &env), Outcome::AllyVictory);
    assert_eq!(
        engine.state().log.last(),
        Some(&BattleEvent::BattleEnded {
            outcome: Outcome::AllyVictory,
            rounds: 1,
            rewards: Some(Rewards::default()),
        })
    );
}

#[test]
fn guardian_victory_scales_rewards() {
    let tables = tables();
    let env = BattleEnv::from_snapshot(&tables, &PcgRng);
    let setup = BattleSetup::new(roster(&[EMBERLING]), vec![RosterEntry::new(ZEPHYR).with_hp(1)])
        .with_mode(BattleMode::Guardian)
        .with_ally_controller(Controller::Ai);
    let mut engine = BattleEngine::start(&env, sure_hits(), &setup).unwrap();

    assert_eq!(run_to_end(&mut engine, &env), Outcome::AllyVictory);
    let Some(BattleEvent::BattleEnded { rounds, rewards, .. }) = engine.state().log.last() else {
        panic!("battle did not end with BattleEnded");
    };
    assert_eq!(*rounds, 1);
    assert_eq!(
        rewards.as_ref(),
        Some(&Rewards {
            experience: 37,
            defeated: vec![ZEPHYR],
        })
    );
}

#[test]
fn ai_battles_terminate_and_respect_invariants() {
    let tables = tables();
    let env = BattleEnv::from_snapshot(&tables, &PcgRng);
    let config = BattleConfig::new();

    for seed in 0..16 {
        let setup = BattleSetup::new(roster(&[EMBERLING, TIDEPUP]), roster(&[PEBBLIT, ZEPHYR]))
            .with_seed(seed)
            .with_ally_controller(Controller::Ai);
        let mut engine = BattleEngine::start(&env, config.clone(), &setup).unwrap();
        run_to_end(&mut engine, &env);

        let state = engine.state();
        assert!(state.round <= config.max_rounds);
        for c in &state.combatants {
            assert!(c.hp.current <= c.hp.maximum);
            assert!(c.stamina.current <= c.stamina.maximum);
            if !c.is_alive() {
                assert!(c.statuses.is_empty(), "seed {seed}: {} fainted with statuses", c.name);
            }
        }

        let mut fainted = HashSet::new();
        for event in &state.log {
            match event {
                BattleEvent::RoundStarted { order, .. } => {
                    assert!(order.iter().all(|id| !fainted.contains(id)), "seed {seed}");
                }
                BattleEvent::ActionResolved { result, .. } => {
                    assert!(!fainted.contains(&result.actor), "seed {seed}");
                    assert!(result.targets.iter().all(|t| !fainted.contains(&t.target)), "seed {seed}");
                }
                BattleEvent::CombatantFainted { target } => {
                    assert!(fainted.insert(*target), "seed {seed}: {target} fainted twice");
                }
                _ => {}
            }
        }
    }
}

#[test]
fn same_seed_reproduces_the_log() {
    let tables = tables();
    let env = BattleEnv::from_snapshot(&tables, &PcgRng);
    let setup = BattleSetup::new(roster(&[EMBERLING, PEBBLIT]), roster(&[TIDEPUP, ZEPHYR]))
        .with_seed(42)
        .with_mode(BattleMode::Endless { wave: 3 })
        .with_ally_controller(Controller::Ai);

    let play = || {
        let mut engine = BattleEngine::start(&env, BattleConfig::new(), &setup).unwrap();
        let outcome = run_to_end(&mut engine, &env);
        (outcome, engine.state().log.clone())
    };
    assert_eq!(play(), play());
}

#[test]
fn observers_see_every_logged_event() {
    let tables = tables();
    let env = BattleEnv::from_snapshot(&tables, &PcgRng);
    let setup = BattleSetup::new(roster(&[TIDEPUP]), roster(&[ZEPHYR]))
        .with_seed(3)
        .with_ally_controller(Controller::Ai);
    let mut engine = BattleEngine::start(&env, BattleConfig::new(), &setup).unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    engine.add_observer(Box::new(move |event: &BattleEvent| {
        sink.lock().unwrap().push(event.clone());
    }));

    run_to_end(&mut engine, &env);
    assert_eq!(*seen.lock().unwrap(), engine.state().log);

    let drained = engine.drain_events();
    assert_eq!(drained, engine.state().log);
    assert!(engine.drain_events().is_empty());
}

#[test]
fn roster_snapshot_carries_running_statuses_into_the_next_battle() {
    let tables = tables();
    let env = BattleEnv::from_snapshot(&tables, &PcgRng);
    let setup = BattleSetup::new(roster(&[PEBBLIT]), roster(&[MOSSBACK]));
    let mut engine = BattleEngine::start(&env, BattleConfig::deterministic(), &setup).unwrap();

    expect_awaiting(&mut engine, &env, 0);
    engine
        .submit_player_action(&env, BattleAction::use_ability(CombatantId(0), STUN_SPORE, Some(CombatantId(1))))
        .unwrap();
    expect_awaiting(&mut engine, &env, 0);

    let enemies = engine.state().roster_snapshot(Side::Enemy);
    assert_eq!(enemies[0].statuses.len(), 1);
    assert_eq!(enemies[0].statuses[0].id, STUN);
    assert_eq!(enemies[0].statuses[0].remaining, 1);

    let rematch = BattleSetup::new(roster(&[PEBBLIT]), enemies);
    let engine = BattleEngine::start(&env, BattleConfig::deterministic(), &rematch).unwrap();
    let mossback = engine.state().combatant(CombatantId(1)).unwrap();
    assert_eq!(mossback.statuses.get(STUN).map(|s| s.remaining), Some(1));
    assert!(engine.state().combatant(CombatantId(0)).unwrap().statuses.is_empty());
}

#[test]
fn setup_rejects_inconsistent_rosters() {
    let tables = tables();
    let env = BattleEnv::from_snapshot(&tables, &PcgRng);
    let start = |allies: Vec<RosterEntry>| {
        BattleEngine::start(&env, BattleConfig::new(), &BattleSetup::new(allies, roster(&[ZEPHYR]))).unwrap_err()
    };

    assert_eq!(start(Vec::new()), DataIntegrityError::EmptyRoster(Side::Ally));
    assert_eq!(
        start(roster(&[SpeciesId(99)])),
        DataIntegrityError::UnknownSpecies(SpeciesId(99))
    );
    assert_eq!(
        start(vec![RosterEntry::new(EMBERLING).with_hp(0)]),
        DataIntegrityError::NoConsciousCombatant(Side::Ally)
    );
    assert_eq!(
        start(vec![RosterEntry::new(EMBERLING).with_abilities([TACKLE, crate::env::AbilityId(77)])]),
        DataIntegrityError::UnknownAbility(crate::env::AbilityId(77))
    );
    assert!(matches!(
        start(vec![RosterEntry::new(EMBERLING).with_abilities([TACKLE, EMBER, TOXIC_SPIT, MEND, HARDEN])]),
        DataIntegrityError::LoadoutTooLarge { len: 5, .. }
    ));
    assert!(matches!(
        start(vec![RosterEntry::new(EMBERLING).with_abilities([TACKLE, TACKLE])]),
        DataIntegrityError::DuplicateAbility { ability: TACKLE, .. }
    ));

    let mut stray = crate::status::StatusEffect::from_definition(tables.status(POISON).unwrap());
    stray.id = StatusId(55);
    assert_eq!(
        start(vec![RosterEntry::new(EMBERLING).with_statuses([stray])]),
        DataIntegrityError::UnknownCarriedStatus {
            species: EMBERLING,
            status: StatusId(55)
        }
    );

    let broken = BattleConfig {
        hit_chance_min: 90,
        hit_chance_max: 50,
        ..BattleConfig::new()
    };
    let err = BattleEngine::start(&env, broken, &BattleSetup::new(roster(&[EMBERLING]), roster(&[ZEPHYR]))).unwrap_err();
    assert!(matches!(err, DataIntegrityError::Config(_)));
}
