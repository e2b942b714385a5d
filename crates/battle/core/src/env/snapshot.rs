//! In-memory table snapshot implementing every data oracle.
//!
//! Content loaders produce a [`TableSnapshot`]; tests build one by hand.

use std::collections::BTreeMap;

use super::{
    Ability, AbilityId, AbilityOracle, Effectiveness, Element, SpeciesId, SpeciesOracle,
    SpeciesTemplate, StatusDefinition, StatusId, StatusOracle, TypeChart, TypeChartOracle,
};

// ============================================================================
// Snapshot Structure
// ============================================================================

/// Complete snapshot of the read-only battle tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSnapshot {
    abilities: BTreeMap<AbilityId, Ability>,
    species: BTreeMap<SpeciesId, SpeciesTemplate>,
    statuses: BTreeMap<StatusId, StatusDefinition>,
    chart: TypeChart,
}

impl TableSnapshot {
    /// Empty tables with the standard type chart.
    pub fn new() -> Self {
        Self {
            chart: TypeChart::standard(),
            ..Self::default()
        }
    }

    pub fn with_chart(mut self, chart: TypeChart) -> Self {
        self.chart = chart;
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.insert_ability(ability);
        self
    }

    pub fn with_species(mut self, species: SpeciesTemplate) -> Self {
        self.insert_species(species);
        self
    }

    pub fn with_status(mut self, status: StatusDefinition) -> Self {
        self.insert_status(status);
        self
    }

    /// Inserts or replaces an ability. Returns the previous definition.
    pub fn insert_ability(&mut self, ability: Ability) -> Option<Ability> {
        self.abilities.insert(ability.id, ability)
    }

    pub fn insert_species(&mut self, species: SpeciesTemplate) -> Option<SpeciesTemplate> {
        self.species.insert(species.id, species)
    }

    pub fn insert_status(&mut self, status: StatusDefinition) -> Option<StatusDefinition> {
        self.statuses.insert(status.id, status)
    }

    pub fn set_effectiveness(&mut self, attack: Element, defend: Element, value: Effectiveness) {
        self.chart.set(attack, defend, value);
    }

    pub fn chart(&self) -> &TypeChart {
        &self.chart
    }

    pub fn abilities(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.values()
    }

    pub fn all_species(&self) -> impl Iterator<Item = &SpeciesTemplate> {
        self.species.values()
    }

    pub fn statuses(&self) -> impl Iterator<Item = &StatusDefinition> {
        self.statuses.values()
    }
}

// ============================================================================
// Oracle Implementations
// ============================================================================

impl AbilityOracle for TableSnapshot {
    fn ability(&self, id: AbilityId) -> Option<&Ability> {
        self.abilities.get(&id)
    }
}

impl SpeciesOracle for TableSnapshot {
    fn species(&self, id: SpeciesId) -> Option<&SpeciesTemplate> {
        self.species.get(&id)
    }
}

impl StatusOracle for TableSnapshot {
    fn status(&self, id: StatusId) -> Option<&StatusDefinition> {
        self.statuses.get(&id)
    }
}

impl TypeChartOracle for TableSnapshot {
    fn effectiveness(&self, attack: Element, defend: Element) -> Effectiveness {
        self.chart.effectiveness(attack, defend)
    }
}
