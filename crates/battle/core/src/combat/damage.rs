//! Damage and healing formulas.

use crate::config::BattleConfig;

/// Random components of one damaging hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageRoll {
    /// Variance in percent, within `[variance_min_pct, 100]`.
    pub variance_pct: u32,
    pub critical: bool,
}

impl DamageRoll {
    /// Maximum variance, no critical.
    pub const FLAT: Self = Self {
        variance_pct: 100,
        critical: false,
    };
}

/// Calculate damage of one hit.
///
/// # Formula
///
/// ```text
/// damage = power × attack ÷ defense × type% × variance% × crit%
/// final  = 0                          if type% == 0 (immune)
///          max(damage, minimum)       otherwise
/// ```
///
/// Integer math throughout; the product is divided once at the end so only
/// the final value is truncated.
pub fn calculate_damage(
    power: u32,
    attack: u32,
    defense: u32,
    type_pct: u32,
    roll: DamageRoll,
    config: &BattleConfig,
) -> u32 {
    if type_pct == 0 {
        return 0;
    }

    let crit_pct = if roll.critical {
        config.crit_multiplier_pct
    } else {
        100
    };

    let numerator = u128::from(power)
        * u128::from(attack)
        * u128::from(type_pct)
        * u128::from(roll.variance_pct)
        * u128::from(crit_pct);
    let denominator = u128::from(defense.max(1)) * 100 * 100 * 100;

    let damage = (numerator / denominator).min(u128::from(u32::MAX)) as u32;
    damage.max(config.minimum_damage)
}

/// Roll-free mean damage of one hit, before accuracy.
///
/// Uses the midpoint of the variance range and the crit chance-weighted
/// multiplier.
pub fn mean_damage(power: u32, attack: u32, defense: u32, type_pct: u32, config: &BattleConfig) -> u32 {
    if type_pct == 0 {
        return 0;
    }

    let variance_mean = (config.variance_min_pct.min(100) + 100) / 2;
    let crit_bonus = u128::from(config.crit_chance_pct)
        * u128::from(config.crit_multiplier_pct.saturating_sub(100));
    let crit_scale = 10_000 + crit_bonus;

    let numerator = u128::from(power)
        * u128::from(attack)
        * u128::from(type_pct)
        * u128::from(variance_mean)
        * crit_scale;
    let denominator = u128::from(defense.max(1)) * 100 * 100 * 10_000;

    let damage = (numerator / denominator).min(u128::from(u32::MAX)) as u32;
    damage.max(config.minimum_damage)
}

/// Heal amount: flat power plus a percentage of the target's maximum HP.
pub fn calculate_heal(power: u32, percent_of_max: u8, max_hp: u32) -> u32 {
    let percent = u64::from(max_hp) * u64::from(percent_of_max) / 100;
    power.saturating_add(percent.min(u64::from(u32::MAX)) as u32)
}
