//! AI-vs-AI battles and endless runs on top of the runtime.
use std::path::Path;

use anyhow::{Result, bail};
use battle_content::{ContentBundle, ContentFactory};
use battle_core::{
    BattleConfig, BattleEvent, BattleMode, BattleSetup, Controller, Outcome, RosterEntry, Side,
    SpeciesId,
};
use battle_runtime::{OracleManager, Runtime, RuntimeConfig};
use serde::Serialize;

/// Result of one finished battle.
#[derive(Clone, Debug, Serialize)]
pub struct BattleReport {
    pub seed: u64,
    pub mode: BattleMode,
    pub outcome: Outcome,
    pub rounds: u32,
    pub experience: u32,
    /// Allies still standing, with the HP they finished on.
    pub survivors: Vec<RosterEntry>,
    pub log: Vec<BattleEvent>,
}

/// Every battle played in one simulator run, in order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RunSummary {
    pub battles: Vec<BattleReport>,
}

impl RunSummary {
    pub fn waves_cleared(&self) -> usize {
        self.battles
            .iter()
            .take_while(|b| b.outcome == Outcome::AllyVictory)
            .count()
    }

    pub fn total_experience(&self) -> u64 {
        self.battles.iter().map(|b| u64::from(b.experience)).sum()
    }
}

/// Plays battles with both sides driven by the battle AI.
pub struct Simulator {
    oracles: OracleManager,
    battle_config: BattleConfig,
    wave_pool: Vec<SpeciesId>,
}

impl Simulator {
    pub fn new(bundle: &ContentBundle) -> Self {
        Self {
            oracles: OracleManager::from_bundle(bundle),
            battle_config: bundle.config.clone(),
            wave_pool: bundle.tables.all_species().map(|s| s.id).collect(),
        }
    }

    /// Loads content from `data_dir`, or the embedded tables when `None`.
    pub fn load(data_dir: Option<&Path>) -> Result<Self> {
        let bundle = match data_dir {
            Some(dir) => ContentFactory::new(dir).load_bundle()?,
            None => ContentFactory::embedded()?,
        };
        Ok(Self::new(&bundle))
    }

    /// Runs one battle to completion.
    pub async fn battle(&self, setup: BattleSetup, seed: Option<u64>) -> Result<BattleReport> {
        let mode = setup.mode;
        let config = RuntimeConfig {
            battle_config: self.battle_config.clone(),
            seed,
            ally_controller: Controller::Ai,
            ..RuntimeConfig::default()
        };

        let mut runtime = Runtime::builder()
            .config(config)
            .oracles(self.oracles.clone())
            .setup(setup)
            .build()
            .await?;
        let seed = runtime.seed();
        let outcome = runtime.run().await?;
        let state = runtime.handle().query_state().await?;
        runtime.shutdown().await?;

        let experience = state
            .log
            .iter()
            .rev()
            .find_map(|event| match event {
                BattleEvent::BattleEnded { rewards, .. } => Some(rewards.as_ref().map_or(0, |r| r.experience)),
                _ => None,
            })
            .unwrap_or_default();

        tracing::info!(seed, %mode, %outcome, rounds = state.round, experience, "battle finished");

        Ok(BattleReport {
            seed,
            mode,
            outcome,
            rounds: state.round,
            experience,
            survivors: state
                .roster_snapshot(Side::Ally)
                .into_iter()
                .filter(|entry| entry.current_hp != Some(0))
                .collect(),
            log: state.log,
        })
    }

    /// Plays up to `waves` endless waves, carrying surviving allies forward.
    ///
    /// Stops after the first wave that is not an ally victory. With a base
    /// seed, wave `n` uses `seed + n`.
    pub async fn endless(&self, allies: Vec<RosterEntry>, seed: Option<u64>, waves: u32) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut roster = allies;

        for wave in 1..=waves {
            let setup = BattleSetup::new(roster, self.wave_enemies(wave)?).with_mode(BattleMode::Endless { wave });
            let report = self.battle(setup, seed.map(|s| s.wrapping_add(u64::from(wave)))).await?;

            let cleared = report.outcome == Outcome::AllyVictory;
            roster = report.survivors.clone();
            summary.battles.push(report);

            if !cleared || roster.is_empty() {
                tracing::info!(wave, "endless run over");
                break;
            }
        }

        Ok(summary)
    }

    /// Enemy lineup for `wave`: one more opponent every three waves, up to
    /// three, rotating through the species table.
    pub fn wave_enemies(&self, wave: u32) -> Result<Vec<RosterEntry>> {
        if self.wave_pool.is_empty() {
            bail!("species table is empty");
        }
        let index = wave.saturating_sub(1) as usize;
        let count = (1 + index / 3).min(3);
        let start = index * 2;

        Ok((0..count)
            .map(|offset| RosterEntry::new(self.wave_pool[(start + offset) % self.wave_pool.len()]))
            .collect())
    }
}
