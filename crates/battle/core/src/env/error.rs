//! Oracle access errors.

use crate::error::{EngineError, ErrorSeverity};

/// Errors that occur when a required oracle is missing from the environment.
///
/// The engine cannot proceed without its tables, so all variants are fatal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("AbilityOracle not available")]
    AbilitiesNotAvailable,

    #[error("SpeciesOracle not available")]
    SpeciesNotAvailable,

    #[error("StatusOracle not available")]
    StatusesNotAvailable,

    #[error("TypeChartOracle not available")]
    TypeChartNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,
}

impl EngineError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            AbilitiesNotAvailable => "ORACLE_ABILITIES_NOT_AVAILABLE",
            SpeciesNotAvailable => "ORACLE_SPECIES_NOT_AVAILABLE",
            StatusesNotAvailable => "ORACLE_STATUSES_NOT_AVAILABLE",
            TypeChartNotAvailable => "ORACLE_TYPE_CHART_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
