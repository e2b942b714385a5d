//! Traits describing read-only battle data.
//!
//! Oracles expose ability definitions, species templates, status definitions,
//! the type chart and the random source. The [`Env`] aggregate bundles them so
//! the engine reaches everything it needs without coupling to a concrete
//! storage; the content crate and tests plug in a [`TableSnapshot`].
mod abilities;
mod error;
mod rng;
mod snapshot;
mod species;
mod status;
mod types;

pub use abilities::{Ability, AbilityEffect, AbilityId, AbilityOracle, StatusRider, TargetSelector};
pub use error::OracleError;
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};
pub use snapshot::TableSnapshot;
pub use species::{BaseStats, SpeciesId, SpeciesOracle, SpeciesTemplate};
pub use status::{Stat, StackingPolicy, StatusDefinition, StatusId, StatusKind, StatusOracle};
pub use types::{Effectiveness, Element, TypeChart, TypeChartOracle};

/// Aggregates read-only oracles required by the engine, resolver and AI.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, A, S, X, T, R>
where
    A: AbilityOracle + ?Sized,
    S: SpeciesOracle + ?Sized,
    X: StatusOracle + ?Sized,
    T: TypeChartOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    abilities: Option<&'a A>,
    species: Option<&'a S>,
    statuses: Option<&'a X>,
    chart: Option<&'a T>,
    rng: Option<&'a R>,
}

pub type BattleEnv<'a> = Env<
    'a,
    dyn AbilityOracle + 'a,
    dyn SpeciesOracle + 'a,
    dyn StatusOracle + 'a,
    dyn TypeChartOracle + 'a,
    dyn RngOracle + 'a,
>;

impl<'a, A, S, X, T, R> Env<'a, A, S, X, T, R>
where
    A: AbilityOracle + ?Sized,
    S: SpeciesOracle + ?Sized,
    X: StatusOracle + ?Sized,
    T: TypeChartOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        abilities: Option<&'a A>,
        species: Option<&'a S>,
        statuses: Option<&'a X>,
        chart: Option<&'a T>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            abilities,
            species,
            statuses,
            chart,
            rng,
        }
    }

    pub fn with_all(
        abilities: &'a A,
        species: &'a S,
        statuses: &'a X,
        chart: &'a T,
        rng: &'a R,
    ) -> Self {
        Self::new(
            Some(abilities),
            Some(species),
            Some(statuses),
            Some(chart),
            Some(rng),
        )
    }

    pub fn empty() -> Self {
        Self {
            abilities: None,
            species: None,
            statuses: None,
            chart: None,
            rng: None,
        }
    }

    /// Returns the AbilityOracle, or an error if not available.
    pub fn abilities(&self) -> Result<&'a A, OracleError> {
        self.abilities.ok_or(OracleError::AbilitiesNotAvailable)
    }

    /// Returns the SpeciesOracle, or an error if not available.
    pub fn species(&self) -> Result<&'a S, OracleError> {
        self.species.ok_or(OracleError::SpeciesNotAvailable)
    }

    /// Returns the StatusOracle, or an error if not available.
    pub fn statuses(&self) -> Result<&'a X, OracleError> {
        self.statuses.ok_or(OracleError::StatusesNotAvailable)
    }

    /// Returns the TypeChartOracle, or an error if not available.
    pub fn chart(&self) -> Result<&'a T, OracleError> {
        self.chart.ok_or(OracleError::TypeChartNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a> BattleEnv<'a> {
    /// Builds an environment where one snapshot serves every table.
    pub fn from_snapshot(tables: &'a TableSnapshot, rng: &'a dyn RngOracle) -> Self {
        Env::new(
            Some(tables as &dyn AbilityOracle),
            Some(tables as &dyn SpeciesOracle),
            Some(tables as &dyn StatusOracle),
            Some(tables as &dyn TypeChartOracle),
            Some(rng),
        )
    }
}

impl<'a, A, S, X, T, R> Env<'a, A, S, X, T, R>
where
    A: AbilityOracle + 'a,
    S: SpeciesOracle + 'a,
    X: StatusOracle + 'a,
    T: TypeChartOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based [`BattleEnv`].
    pub fn into_battle_env(self) -> BattleEnv<'a> {
        let abilities: Option<&'a dyn AbilityOracle> = self.abilities.map(|a| a as _);
        let species: Option<&'a dyn SpeciesOracle> = self.species.map(|s| s as _);
        let statuses: Option<&'a dyn StatusOracle> = self.statuses.map(|x| x as _);
        let chart: Option<&'a dyn TypeChartOracle> = self.chart.map(|t| t as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|r| r as _);
        Env::new(abilities, species, statuses, chart, rng)
    }
}
