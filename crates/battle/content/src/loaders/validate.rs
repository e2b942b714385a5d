//! Cross-table reference checks.

use battle_core::{AbilityOracle, BattleConfig, StatusOracle, TableSnapshot};

use crate::loaders::LoadResult;

/// Verifies that every id referenced across the tables resolves.
///
/// Species loadouts must name known abilities (at most
/// [`BattleConfig::MAX_ABILITIES`], no repeats) and abilities must reference
/// known statuses. Battles started from validated tables cannot fail with a
/// missing-reference data error.
pub fn validate_tables(tables: &TableSnapshot) -> LoadResult<()> {
    for ability in tables.abilities() {
        if let Some(status) = ability.effect.referenced_status()
            && StatusOracle::status(tables, status).is_none()
        {
            anyhow::bail!(
                "Ability '{}' ({}) references unknown status {}",
                ability.name,
                ability.id,
                status
            );
        }
    }

    for species in tables.all_species() {
        if species.default_abilities.is_empty() {
            anyhow::bail!("Species '{}' has an empty default loadout", species.name);
        }
        if species.default_abilities.len() > BattleConfig::MAX_ABILITIES {
            anyhow::bail!(
                "Species '{}' lists {} default abilities (max {})",
                species.name,
                species.default_abilities.len(),
                BattleConfig::MAX_ABILITIES
            );
        }
        for (index, &id) in species.default_abilities.iter().enumerate() {
            if AbilityOracle::ability(tables, id).is_none() {
                anyhow::bail!("Species '{}' references unknown ability {}", species.name, id);
            }
            if species.default_abilities[..index].contains(&id) {
                anyhow::bail!("Species '{}' lists ability {} twice", species.name, id);
            }
        }
    }

    tracing::debug!(
        abilities = tables.abilities().count(),
        species = tables.all_species().count(),
        statuses = tables.statuses().count(),
        "content tables validated"
    );
    Ok(())
}
