//! Ability resolution: turns one ability use into a [`ResolutionResult`].

use super::damage::{DamageRoll, calculate_damage, calculate_heal, mean_damage};
use super::hit::{calculate_hit_chance, check_hit};
use super::result::{HitOutcome, ResolutionResult, TargetOutcome};
use crate::config::BattleConfig;
use crate::engine::DataIntegrityError;
use crate::env::{
    Ability, AbilityEffect, RngOracle, RollContext, StatusId, StatusOracle, TypeChartOracle,
    compute_seed,
};
use crate::state::CombatantState;
use crate::status::StatusEffect;

/// Everything the resolver reads besides the combatants.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub config: &'a BattleConfig,
    pub chart: &'a dyn TypeChartOracle,
    pub statuses: &'a dyn StatusOracle,
    pub rng: &'a dyn RngOracle,
    pub seed: u64,
    pub nonce: u64,
}

impl ResolveContext<'_> {
    fn roll_seed(&self, attacker: &CombatantState, context: RollContext, target_index: usize) -> u64 {
        compute_seed(
            self.seed,
            self.nonce,
            u32::from(attacker.id.0),
            context.for_target(target_index as u32),
        )
    }

    fn roll_d100(&self, attacker: &CombatantState, context: RollContext, target_index: usize) -> u32 {
        self.rng
            .roll_d100(self.roll_seed(attacker, context, target_index))
    }

    fn status_effect(&self, ability: &Ability, id: StatusId) -> Result<StatusEffect, DataIntegrityError> {
        self.statuses
            .status(id)
            .map(StatusEffect::from_definition)
            .ok_or(DataIntegrityError::UnknownStatus {
                ability: ability.id,
                status: id,
            })
    }
}

/// Resolve `ability` used by `attacker` against `defenders`.
///
/// Pure: reads the combatants and the tables, never mutates. Rolls are drawn
/// per target with independent seeds, so the outcome on one target does not
/// depend on how many other targets the ability has.
///
/// Accuracy is rolled only against opposing combatants; heals and
/// buffs/debuffs never miss.
pub fn resolve_ability(
    ability: &Ability,
    attacker: &CombatantState,
    defenders: &[&CombatantState],
    ctx: &ResolveContext<'_>,
) -> Result<ResolutionResult, DataIntegrityError> {
    let mut result = ResolutionResult {
        actor: attacker.id,
        ability: ability.id,
        stamina_cost: ability.cost,
        cooldown: ability.cooldown,
        targets: Vec::with_capacity(defenders.len()),
        messages: vec![format!("{} used {}!", attacker.name, ability.name)],
    };

    for (index, defender) in defenders.iter().enumerate() {
        let offensive = defender.side != attacker.side;
        let needs_accuracy = offensive
            && matches!(
                ability.effect,
                AbilityEffect::Damage { .. } | AbilityEffect::Status { .. }
            );

        if needs_accuracy {
            let chance = calculate_hit_chance(
                ability.accuracy,
                attacker.effective_speed(),
                defender.effective_speed(),
                ctx.config,
            );
            let roll = ctx.roll_d100(attacker, RollContext::Accuracy, index);
            if !check_hit(chance, roll) {
                tracing::debug!(
                    actor = %attacker.id,
                    target = %defender.id,
                    chance,
                    roll,
                    "ability missed"
                );
                result
                    .messages
                    .push(format!("It missed {}.", defender.name));
                result.targets.push(TargetOutcome::missed(defender.id));
                continue;
            }
        }

        let outcome = match ability.effect {
            AbilityEffect::Damage { inflicts } => {
                let type_pct = ctx
                    .chart
                    .multiplier_percent(ability.element, &defender.elements);
                let variance_pct = ctx.rng.range(
                    ctx.roll_seed(attacker, RollContext::Variance, index),
                    ctx.config.variance_min_pct,
                    100,
                );
                let critical = type_pct > 0
                    && check_hit(
                        u32::from(ctx.config.crit_chance_pct),
                        ctx.roll_d100(attacker, RollContext::Critical, index),
                    );
                let damage = calculate_damage(
                    ability.power,
                    attacker.effective_attack(),
                    defender.effective_defense(),
                    type_pct,
                    DamageRoll {
                        variance_pct,
                        critical,
                    },
                    ctx.config,
                );

                let mut outcome = TargetOutcome {
                    hit: if critical {
                        HitOutcome::Critical
                    } else {
                        HitOutcome::Hit
                    },
                    effectiveness_pct: type_pct,
                    hp_delta: -i64::from(damage),
                    ..TargetOutcome::landed(defender.id)
                };

                narrate_damage(&mut result.messages, defender, damage, type_pct, critical);

                if let Some(rider) = inflicts
                    && type_pct > 0
                    && check_hit(
                        u32::from(rider.chance),
                        ctx.roll_d100(attacker, RollContext::StatusChance, index),
                    )
                {
                    outcome.attach.push(ctx.status_effect(ability, rider.status)?);
                }
                outcome
            }
            AbilityEffect::Heal {
                percent_of_max,
                cleanse,
            } => {
                let amount = calculate_heal(ability.power, percent_of_max, defender.hp.maximum);
                result
                    .messages
                    .push(format!("{} recovers {} HP.", defender.name, amount));
                TargetOutcome {
                    hp_delta: i64::from(amount),
                    cleanse,
                    ..TargetOutcome::landed(defender.id)
                }
            }
            AbilityEffect::Status { status, chance } => {
                let mut outcome = TargetOutcome::landed(defender.id);
                if check_hit(
                    u32::from(chance),
                    ctx.roll_d100(attacker, RollContext::StatusChance, index),
                ) {
                    outcome.attach.push(ctx.status_effect(ability, status)?);
                } else {
                    result
                        .messages
                        .push(format!("{} shrugged it off.", defender.name));
                }
                outcome
            }
            AbilityEffect::BuffDebuff { status } => {
                let mut outcome = TargetOutcome::landed(defender.id);
                outcome.attach.push(ctx.status_effect(ability, status)?);
                outcome
            }
        };

        result.targets.push(outcome);
    }

    Ok(result)
}

fn narrate_damage(
    messages: &mut Vec<String>,
    defender: &CombatantState,
    damage: u32,
    type_pct: u32,
    critical: bool,
) {
    if type_pct == 0 {
        messages.push(format!("It doesn't affect {}...", defender.name));
        return;
    }
    if critical {
        messages.push("A critical hit!".to_string());
    }
    if type_pct > 100 {
        messages.push("It's super effective!".to_string());
    } else if type_pct < 100 {
        messages.push("It's not very effective...".to_string());
    }
    messages.push(format!("{} took {} damage.", defender.name, damage));
}

/// Roll-free expected damage of `ability` from `attacker` to `defender`.
///
/// Mean of the damage formula weighted by the hit chance. Zero for
/// non-damaging abilities.
pub fn expected_damage(
    ability: &Ability,
    attacker: &CombatantState,
    defender: &CombatantState,
    config: &BattleConfig,
    chart: &(impl TypeChartOracle + ?Sized),
) -> u32 {
    if !matches!(ability.effect, AbilityEffect::Damage { .. }) {
        return 0;
    }

    let type_pct = chart.multiplier_percent(ability.element, &defender.elements);
    let per_hit = mean_damage(
        ability.power,
        attacker.effective_attack(),
        defender.effective_defense(),
        type_pct,
        config,
    );
    let chance = if defender.side != attacker.side {
        calculate_hit_chance(
            ability.accuracy,
            attacker.effective_speed(),
            defender.effective_speed(),
            config,
        )
    } else {
        100
    };

    (u64::from(per_hit) * u64::from(chance) / 100) as u32
}
