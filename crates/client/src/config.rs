//! Simulator configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use battle_core::{BattleMode, SpeciesId};

/// What the simulator plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimMode {
    /// One battle in the given mode.
    Single(BattleMode),
    /// Consecutive endless waves, stopping at the first loss.
    Endless { waves: u32 },
}

impl Default for SimMode {
    fn default() -> Self {
        Self::Single(BattleMode::Standard)
    }
}

/// Configuration for one simulator run.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub mode: SimMode,
    /// Seed of the first battle; later waves derive theirs from it.
    pub seed: Option<u64>,
    pub allies: Vec<SpeciesId>,
    pub enemies: Vec<SpeciesId>,
    /// Directory with the RON/TOML content files; `None` uses the embedded set.
    pub data_dir: Option<PathBuf>,
    /// Where to write the JSON event dump, if anywhere.
    pub event_dump: Option<PathBuf>,
    pub session_id: Option<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            mode: SimMode::default(),
            seed: None,
            allies: vec![SpeciesId(1), SpeciesId(2)],
            enemies: vec![SpeciesId(3), SpeciesId(4)],
            data_dir: None,
            event_dump: None,
            session_id: None,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `VASEN_MODE` - `standard`, `guardian` or `endless` (default: standard)
    /// - `VASEN_WAVES` - Number of endless waves (default: 10)
    /// - `VASEN_SEED` - Battle seed (default: random)
    /// - `VASEN_ALLIES` / `VASEN_ENEMIES` - Comma-separated species ids
    /// - `VASEN_DATA_DIR` - Content directory (default: embedded tables)
    /// - `VASEN_EVENT_DUMP` - JSON file receiving every battle log
    /// - `VASEN_SESSION_ID` - Session name used for the log directory
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(mode) = env::var("VASEN_MODE") {
            let waves = read_env::<u32>("VASEN_WAVES").unwrap_or(10);
            match parse_mode(&mode, waves) {
                Some(mode) => config.mode = mode,
                None => tracing::warn!(%mode, "unknown VASEN_MODE, using standard"),
            }
        }

        config.seed = read_env::<u64>("VASEN_SEED");

        if let Some(allies) = env::var("VASEN_ALLIES").ok().and_then(|v| parse_species_list(&v)) {
            config.allies = allies;
        }
        if let Some(enemies) = env::var("VASEN_ENEMIES").ok().and_then(|v| parse_species_list(&v)) {
            config.enemies = enemies;
        }

        config.data_dir = env::var("VASEN_DATA_DIR").ok().map(PathBuf::from);
        config.event_dump = env::var("VASEN_EVENT_DUMP").ok().map(PathBuf::from);
        config.session_id = env::var("VASEN_SESSION_ID").ok();

        config
    }
}

/// Parses `VASEN_MODE`. Zero waves are bumped to one.
pub fn parse_mode(value: &str, waves: u32) -> Option<SimMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "standard" => Some(SimMode::Single(BattleMode::Standard)),
        "guardian" => Some(SimMode::Single(BattleMode::Guardian)),
        "endless" => Some(SimMode::Endless { waves: waves.max(1) }),
        _ => None,
    }
}

/// Parses `"1, 2,3"` into species ids. Empty or malformed lists yield `None`.
pub fn parse_species_list(value: &str) -> Option<Vec<SpeciesId>> {
    let ids = value
        .split(',')
        .map(|part| part.trim().parse::<u16>().map(SpeciesId))
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    (!ids.is_empty()).then_some(ids)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_parse_case_insensitively() {
        assert_eq!(parse_mode("Guardian", 5), Some(SimMode::Single(BattleMode::Guardian)));
        assert_eq!(parse_mode(" endless ", 0), Some(SimMode::Endless { waves: 1 }));
        assert_eq!(parse_mode("arena", 5), None);
    }

    #[test]
    fn species_lists_reject_garbage() {
        assert_eq!(parse_species_list("1, 2,3"), Some(vec![SpeciesId(1), SpeciesId(2), SpeciesId(3)]));
        assert_eq!(parse_species_list("1,x"), None);
        assert_eq!(parse_species_list(""), None);
    }
}
