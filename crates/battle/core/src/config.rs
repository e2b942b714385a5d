//! Battle configuration: compile-time capacities and tunable formula constants.

use crate::state::BattleMode;

/// Heuristic weights used by the battle AI.
///
/// Each candidate's score is the sum of `weight × heuristic` over the six
/// heuristics, plus a random jitter in `[0, jitter]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiWeights {
    pub expected_damage: i64,
    pub knockout: i64,
    pub type_advantage: i64,
    pub self_preservation: i64,
    pub status_disruption: i64,
    pub resource_efficiency: i64,
    pub jitter: u32,
}

impl AiWeights {
    pub const STANDARD: Self = Self {
        expected_damage: 10,
        knockout: 6,
        type_advantage: 4,
        self_preservation: 8,
        status_disruption: 6,
        resource_efficiency: 3,
        jitter: 40,
    };

    pub const GUARDIAN: Self = Self {
        expected_damage: 13,
        knockout: 8,
        type_advantage: 5,
        self_preservation: 6,
        status_disruption: 9,
        resource_efficiency: 2,
        jitter: 15,
    };

    /// Scales the offensive weights (damage, knockout, type advantage) by `percent`.
    pub fn with_offense_scaled(mut self, percent: u32) -> Self {
        let pct = i64::from(percent);
        self.expected_damage = self.expected_damage * pct / 100;
        self.knockout = self.knockout * pct / 100;
        self.type_advantage = self.type_advantage * pct / 100;
        self
    }

    /// Sum of the offensive weights; the AI's "aggressiveness".
    pub fn aggressiveness(&self) -> i64 {
        self.expected_damage + self.knockout + self.type_advantage
    }
}

/// AI weight tables per battle mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiTuning {
    pub standard: AiWeights,
    pub guardian: AiWeights,
    /// Base table for endless waves before wave scaling.
    pub endless: AiWeights,
    /// Offense bonus (percent) gained per wave after the first.
    pub endless_offense_step_pct: u32,
    /// Upper bound on the offense scaling (percent).
    pub endless_offense_cap_pct: u32,
}

impl AiTuning {
    /// Weight table for the given mode.
    ///
    /// Endless waves scale the offensive weights by
    /// `min(100 + step × (wave - 1), cap)` percent, so aggressiveness never
    /// decreases from one wave to the next.
    pub fn weights_for(&self, mode: BattleMode) -> AiWeights {
        match mode {
            BattleMode::Standard => self.standard,
            BattleMode::Guardian => self.guardian,
            BattleMode::Endless { wave } => {
                let waves_cleared = wave.saturating_sub(1);
                let scale = waves_cleared
                    .saturating_mul(self.endless_offense_step_pct)
                    .saturating_add(100)
                    .min(self.endless_offense_cap_pct.max(100));
                self.endless.with_offense_scaled(scale)
            }
        }
    }
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            standard: AiWeights::STANDARD,
            guardian: AiWeights::GUARDIAN,
            endless: AiWeights::STANDARD,
            endless_offense_step_pct: 15,
            endless_offense_cap_pct: 300,
        }
    }
}

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Chance (percent) that a damaging hit is critical.
    pub crit_chance_pct: u8,
    /// Damage multiplier (percent) applied on a critical hit.
    pub crit_multiplier_pct: u32,
    /// Lower bound (percent) of the damage variance roll; the upper bound is 100.
    pub variance_min_pct: u32,
    pub hit_chance_min: u8,
    pub hit_chance_max: u8,
    /// Every `speed_accuracy_divisor` points of speed advantage add 1% accuracy.
    pub speed_accuracy_divisor: u32,
    /// Damage dealt by any non-immune hit at least.
    pub minimum_damage: u32,
    /// Stamina regained by each living combatant at the end of a round.
    pub stamina_regen: u32,
    /// Hard bound on battle length.
    pub max_rounds: u32,
    pub basic_attack_power: u32,
    pub basic_attack_accuracy: u8,
    /// Experience multiplier (percent) for guardian battles.
    pub guardian_reward_pct: u32,
    /// Extra experience (percent) per endless wave after the first.
    pub endless_reward_step_pct: u32,
    pub ai: AiTuning,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ROSTER_SIZE: usize = 6;
    pub const MAX_COMBATANTS: usize = Self::MAX_ROSTER_SIZE * 2;
    pub const MAX_ABILITIES: usize = 4;
    pub const MAX_STATUS_EFFECTS: usize = 8;
    pub const MAX_ELEMENTS: usize = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CRIT_CHANCE_PCT: u8 = 6;
    pub const DEFAULT_CRIT_MULTIPLIER_PCT: u32 = 150;
    pub const DEFAULT_VARIANCE_MIN_PCT: u32 = 85;
    pub const DEFAULT_HIT_CHANCE_MIN: u8 = 5;
    pub const DEFAULT_HIT_CHANCE_MAX: u8 = 100;
    pub const DEFAULT_SPEED_ACCURACY_DIVISOR: u32 = 4;
    pub const DEFAULT_MINIMUM_DAMAGE: u32 = 1;
    pub const DEFAULT_STAMINA_REGEN: u32 = 5;
    pub const DEFAULT_MAX_ROUNDS: u32 = 100;
    pub const DEFAULT_BASIC_ATTACK_POWER: u32 = 10;
    pub const DEFAULT_BASIC_ATTACK_ACCURACY: u8 = 100;
    pub const DEFAULT_GUARDIAN_REWARD_PCT: u32 = 150;
    pub const DEFAULT_ENDLESS_REWARD_STEP_PCT: u32 = 10;

    pub fn new() -> Self {
        Self {
            crit_chance_pct: Self::DEFAULT_CRIT_CHANCE_PCT,
            crit_multiplier_pct: Self::DEFAULT_CRIT_MULTIPLIER_PCT,
            variance_min_pct: Self::DEFAULT_VARIANCE_MIN_PCT,
            hit_chance_min: Self::DEFAULT_HIT_CHANCE_MIN,
            hit_chance_max: Self::DEFAULT_HIT_CHANCE_MAX,
            speed_accuracy_divisor: Self::DEFAULT_SPEED_ACCURACY_DIVISOR,
            minimum_damage: Self::DEFAULT_MINIMUM_DAMAGE,
            stamina_regen: Self::DEFAULT_STAMINA_REGEN,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            basic_attack_power: Self::DEFAULT_BASIC_ATTACK_POWER,
            basic_attack_accuracy: Self::DEFAULT_BASIC_ATTACK_ACCURACY,
            guardian_reward_pct: Self::DEFAULT_GUARDIAN_REWARD_PCT,
            endless_reward_step_pct: Self::DEFAULT_ENDLESS_REWARD_STEP_PCT,
            ai: AiTuning::default(),
        }
    }

    /// Configuration with every roll pinned: no variance, no crits.
    ///
    /// Useful for tests and balance tooling that need exact damage numbers.
    pub fn deterministic() -> Self {
        Self {
            crit_chance_pct: 0,
            variance_min_pct: 100,
            ..Self::new()
        }
    }

    /// Experience multiplier (percent) for a battle mode.
    pub fn reward_multiplier_pct(&self, mode: BattleMode) -> u32 {
        match mode {
            BattleMode::Standard => 100,
            BattleMode::Guardian => self.guardian_reward_pct,
            BattleMode::Endless { wave } => wave
                .saturating_sub(1)
                .saturating_mul(self.endless_reward_step_pct)
                .saturating_add(100),
        }
    }

    /// Checks that the tunables are internally consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hit_chance_min > self.hit_chance_max || self.hit_chance_max > 100 {
            return Err(ConfigError::HitChanceBounds {
                min: self.hit_chance_min,
                max: self.hit_chance_max,
            });
        }
        if self.variance_min_pct == 0 || self.variance_min_pct > 100 {
            return Err(ConfigError::VarianceBounds(self.variance_min_pct));
        }
        if self.crit_chance_pct > 100 {
            return Err(ConfigError::CritChance(self.crit_chance_pct));
        }
        if self.speed_accuracy_divisor == 0 {
            return Err(ConfigError::ZeroDivisor);
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::ZeroMaxRounds);
        }
        Ok(())
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Inconsistent tunables in a [`BattleConfig`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("hit chance bounds are invalid: min {min}, max {max}")]
    HitChanceBounds { min: u8, max: u8 },

    #[error("variance_min_pct must be within 1..=100 (got {0})")]
    VarianceBounds(u32),

    #[error("crit_chance_pct must be at most 100 (got {0})")]
    CritChance(u8),

    #[error("speed_accuracy_divisor must be non-zero")]
    ZeroDivisor,

    #[error("max_rounds must be non-zero")]
    ZeroMaxRounds,
}
