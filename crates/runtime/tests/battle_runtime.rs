use battle_content::ContentFactory;
use battle_core::{
    AbilityId, BattleAction, BattleEvent, BattleMode, BattleSetup, CombatantId, Controller,
    DataIntegrityError, Outcome, Progress, RejectReason, RosterEntry, SpeciesId,
};
use battle_runtime::{
    AiActionProvider, Event, OracleManager, Runtime, RuntimeConfig, RuntimeError,
    ScriptedActionProvider, Topic,
};

const EMBERLING: SpeciesId = SpeciesId(1);
const TIDEPUP: SpeciesId = SpeciesId(2);
const PEBBLIT: SpeciesId = SpeciesId(3);
const ZEPHYR: SpeciesId = SpeciesId(4);

const TACKLE: AbilityId = AbilityId(1);
const HARDEN: AbilityId = AbilityId(15);

fn oracles() -> (OracleManager, RuntimeConfig) {
    let bundle = ContentFactory::embedded().expect("embedded content loads");
    let config = RuntimeConfig {
        battle_config: bundle.config.clone(),
        event_buffer_size: 4096,
        seed: Some(11),
        ..RuntimeConfig::default()
    };
    (OracleManager::from_bundle(&bundle), config)
}

fn duel() -> BattleSetup {
    BattleSetup::new(vec![RosterEntry::new(EMBERLING)], vec![RosterEntry::new(ZEPHYR)])
}

fn skirmish() -> BattleSetup {
    BattleSetup::new(
        vec![RosterEntry::new(EMBERLING), RosterEntry::new(TIDEPUP)],
        vec![RosterEntry::new(PEBBLIT), RosterEntry::new(ZEPHYR)],
    )
}

#[tokio::test]
async fn ai_controlled_battle_runs_to_completion() {
    let (oracles, config) = oracles();
    let max_rounds = config.battle_config.max_rounds;
    let mut runtime = Runtime::builder()
        .config(RuntimeConfig {
            ally_controller: Controller::Ai,
            ..config
        })
        .oracles(oracles)
        .setup(skirmish())
        .build()
        .await
        .unwrap();
    let mut lifecycle = runtime.subscribe(Topic::Lifecycle);

    let outcome = runtime.run().await.unwrap();
    assert_ne!(outcome, Outcome::Fled);

    let state = runtime.handle().query_state().await.unwrap();
    assert_eq!(state.outcome, Some(outcome));
    assert_eq!(state.seed, 11);
    assert!(state.round <= max_rounds);

    match lifecycle.recv().await.unwrap() {
        Event::Battle(BattleEvent::BattleEnded { outcome: ended, .. }) => assert_eq!(ended, outcome),
        other => panic!("unexpected lifecycle event {other:?}"),
    }

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn ai_provider_can_play_the_ally_side() {
    let (oracles, config) = oracles();
    let provider = AiActionProvider::new(oracles.clone(), config.battle_config.clone());
    let mut runtime = Runtime::builder()
        .config(config)
        .oracles(oracles)
        .setup(skirmish().with_mode(BattleMode::Endless { wave: 2 }))
        .player_provider(provider)
        .build()
        .await
        .unwrap();

    let outcome = runtime.run().await.unwrap();
    assert!(matches!(outcome, Outcome::AllyVictory | Outcome::EnemyVictory));
}

#[tokio::test]
async fn scripted_flee_ends_the_battle() {
    let (oracles, config) = oracles();
    let mut runtime = Runtime::builder()
        .config(config)
        .oracles(oracles)
        .setup(duel())
        .player_provider(ScriptedActionProvider::new([BattleAction::flee(CombatantId(0))]))
        .build()
        .await
        .unwrap();

    assert_eq!(runtime.run().await.unwrap(), Outcome::Fled);

    let err = runtime.handle().advance().await.unwrap_err();
    assert!(matches!(err, RuntimeError::Battle(_)));
}

#[tokio::test]
async fn rejected_action_is_published_and_retried() {
    let (oracles, config) = oracles();
    let mut runtime = Runtime::builder()
        .config(config)
        .oracles(oracles)
        .setup(duel())
        .player_provider(ScriptedActionProvider::new([
            BattleAction::use_ability(CombatantId(0), HARDEN, None),
            BattleAction::use_ability(CombatantId(0), TACKLE, Some(CombatantId(1))),
        ]))
        .build()
        .await
        .unwrap();
    let mut actions = runtime.subscribe(Topic::Action);

    assert_eq!(runtime.step().await.unwrap(), None);

    match actions.recv().await.unwrap() {
        Event::Rejected { action, reason } => {
            assert_eq!(action.ability(), Some(HARDEN));
            assert_eq!(reason, RejectReason::AbilityNotInLoadout { ability: HARDEN });
        }
        other => panic!("expected a rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn repeated_rejections_give_up() {
    let (oracles, config) = oracles();
    let invalid = BattleAction::use_ability(CombatantId(0), HARDEN, None);
    let mut runtime = Runtime::builder()
        .config(RuntimeConfig {
            max_rejections: 2,
            ..config
        })
        .oracles(oracles)
        .setup(duel())
        .player_provider(ScriptedActionProvider::new([invalid, invalid, invalid]))
        .build()
        .await
        .unwrap();

    let err = runtime.step().await.unwrap_err();
    assert!(matches!(err, RuntimeError::TooManyRejections { attempts: 2 }));
}

#[tokio::test]
async fn player_turn_without_provider_fails() {
    let (oracles, config) = oracles();
    let mut runtime = Runtime::builder()
        .config(config)
        .oracles(oracles)
        .setup(duel())
        .build()
        .await
        .unwrap();

    assert!(matches!(runtime.step().await, Err(RuntimeError::ProviderNotSet)));
}

#[tokio::test]
async fn handle_exposes_engine_operations() {
    let (oracles, config) = oracles();
    let runtime = Runtime::builder()
        .config(config)
        .oracles(oracles)
        .setup(duel())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    assert_eq!(
        handle.advance().await.unwrap(),
        Progress::AwaitingPlayer { actor: CombatantId(0) }
    );
    let options = handle.options(CombatantId(0)).await.unwrap();
    assert!(options.iter().any(|c| c.ability == TACKLE && c.target == Some(CombatantId(1))));

    let before = handle.query_state().await.unwrap();
    let err = handle
        .submit_player_action(BattleAction::use_ability(CombatantId(0), TACKLE, Some(CombatantId(0))))
        .await
        .unwrap_err();
    assert!(matches!(err.as_rejection(), Some(RejectReason::WrongSide { .. })));
    assert_eq!(handle.query_state().await.unwrap(), before);
}

#[tokio::test]
async fn same_seed_same_battle() {
    async fn play() -> Vec<BattleEvent> {
        let (oracles, config) = oracles();
        let mut runtime = Runtime::builder()
            .config(RuntimeConfig {
                seed: Some(99),
                ally_controller: Controller::Ai,
                ..config
            })
            .oracles(oracles)
            .setup(skirmish())
            .build()
            .await
            .unwrap();
        runtime.run().await.unwrap();
        runtime.handle().query_state().await.unwrap().log
    }

    let first = play().await;
    assert_eq!(first, play().await);
    assert_eq!(serde_json::to_string(&first).unwrap(), serde_json::to_string(&play().await).unwrap());
}

#[tokio::test]
async fn build_reports_configuration_errors() {
    let (oracles, config) = oracles();

    let missing_setup = Runtime::builder()
        .config(config.clone())
        .oracles(oracles.clone())
        .build()
        .await;
    assert!(matches!(missing_setup, Err(RuntimeError::MissingSetup)));

    let missing_oracles = Runtime::builder().setup(duel()).build().await;
    assert!(matches!(missing_oracles, Err(RuntimeError::MissingOracles)));

    let unknown = Runtime::builder()
        .config(config)
        .oracles(oracles)
        .setup(BattleSetup::new(vec![RosterEntry::new(SpeciesId(404))], vec![RosterEntry::new(ZEPHYR)]))
        .build()
        .await;
    assert!(matches!(
        unknown,
        Err(RuntimeError::Start(DataIntegrityError::UnknownSpecies(SpeciesId(404))))
    ));
}
