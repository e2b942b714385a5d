//! Hit chance and accuracy calculations.

use crate::config::BattleConfig;

/// Calculate hit chance from ability accuracy and the speed gap.
///
/// # Formula
///
/// ```text
/// hit_chance = accuracy + (attacker_speed - defender_speed) / divisor
/// clamped to [min, max]
/// ```
///
/// The division truncates toward zero, so small speed gaps do not move
/// accuracy at all.
pub fn calculate_hit_chance(
    accuracy: u8,
    attacker_speed: u32,
    defender_speed: u32,
    config: &BattleConfig,
) -> u32 {
    let divisor = i64::from(config.speed_accuracy_divisor.max(1));
    let speed_gap = i64::from(attacker_speed) - i64::from(defender_speed);
    let chance = i64::from(accuracy) + speed_gap / divisor;

    chance.clamp(
        i64::from(config.hit_chance_min),
        i64::from(config.hit_chance_max),
    ) as u32
}

/// Check if an attack hits. `roll` is a d100 result (1-100).
pub fn check_hit(chance: u32, roll: u32) -> bool {
    roll <= chance
}
