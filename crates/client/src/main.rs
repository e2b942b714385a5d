//! `vasen-sim` binary.
//!
//! Runs AI-vs-AI battles headlessly. Configuration comes from `VASEN_*`
//! environment variables (a `.env` file is honored); see
//! [`vasen_sim::SimConfig::from_env`].
//!
//! ```bash
//! VASEN_MODE=endless VASEN_WAVES=5 VASEN_SEED=42 cargo run -p vasen-sim
//! ```

use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use battle_core::{BattleSetup, RosterEntry};
use vasen_sim::{RunSummary, SimConfig, SimMode, Simulator, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = logging::setup_logging(config.session_id.as_deref())?;

    tracing::info!(mode = ?config.mode, seed = ?config.seed, "starting simulator");

    let simulator = Simulator::load(config.data_dir.as_deref())?;
    let allies: Vec<_> = config.allies.iter().copied().map(RosterEntry::new).collect();

    let summary = match config.mode {
        SimMode::Single(mode) => {
            let enemies = config.enemies.iter().copied().map(RosterEntry::new).collect();
            let setup = BattleSetup::new(allies, enemies).with_mode(mode);
            RunSummary {
                battles: vec![simulator.battle(setup, config.seed).await?],
            }
        }
        SimMode::Endless { waves } => simulator.endless(allies, config.seed, waves).await?,
    };

    for report in &summary.battles {
        println!(
            "{:<18} seed={:<20} {:<13} rounds={:<3} xp={}",
            report.mode.to_string(),
            report.seed,
            report.outcome.to_string(),
            report.rounds,
            report.experience
        );
    }
    println!(
        "battles={} cleared={} experience={}",
        summary.battles.len(),
        summary.waves_cleared(),
        summary.total_experience()
    );

    if let Some(path) = &config.event_dump {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &summary)?;
        tracing::info!(path = %path.display(), "event dump written");
    }

    Ok(())
}
