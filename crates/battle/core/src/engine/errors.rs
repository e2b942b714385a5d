//! Error types surfaced by the battle engine.

use crate::action::RejectReason;
use crate::config::ConfigError;
use crate::env::{AbilityId, OracleError, SpeciesId, StatusId};
use crate::error::{EngineError, ErrorSeverity};
use crate::state::{Outcome, Side};

/// The battle cannot be instantiated from the given rosters and tables.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DataIntegrityError {
    #[error("{0} roster is empty")]
    EmptyRoster(Side),

    #[error("{side} roster has {len} entries (max {max})")]
    RosterTooLarge { side: Side, len: usize, max: usize },

    #[error("{0} roster has no combatant able to fight")]
    NoConsciousCombatant(Side),

    #[error("unknown species {0}")]
    UnknownSpecies(SpeciesId),

    #[error("{species} must have one or two elements (has {count})")]
    InvalidElements { species: SpeciesId, count: usize },

    #[error("{species} has an empty loadout")]
    EmptyLoadout { species: SpeciesId },

    #[error("{species} loadout has {len} abilities (max {max})")]
    LoadoutTooLarge {
        species: SpeciesId,
        len: usize,
        max: usize,
    },

    #[error("{species} lists {ability} twice")]
    DuplicateAbility {
        species: SpeciesId,
        ability: AbilityId,
    },

    #[error("unknown ability {0}")]
    UnknownAbility(AbilityId),

    #[error("{ability} references unknown status {status}")]
    UnknownStatus { ability: AbilityId, status: StatusId },

    #[error("{species} carries unknown status {status}")]
    UnknownCarriedStatus { species: SpeciesId, status: StatusId },

    #[error("{species} carries {len} statuses (max {max})")]
    TooManyStatuses {
        species: SpeciesId,
        len: usize,
        max: usize,
    },

    #[error("invalid battle configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl EngineError for DataIntegrityError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use DataIntegrityError::*;
        match self {
            EmptyRoster(_) => "DATA_EMPTY_ROSTER",
            RosterTooLarge { .. } => "DATA_ROSTER_TOO_LARGE",
            NoConsciousCombatant(_) => "DATA_NO_CONSCIOUS_COMBATANT",
            UnknownSpecies(_) => "DATA_UNKNOWN_SPECIES",
            InvalidElements { .. } => "DATA_INVALID_ELEMENTS",
            EmptyLoadout { .. } => "DATA_EMPTY_LOADOUT",
            LoadoutTooLarge { .. } => "DATA_LOADOUT_TOO_LARGE",
            DuplicateAbility { .. } => "DATA_DUPLICATE_ABILITY",
            UnknownAbility(_) => "DATA_UNKNOWN_ABILITY",
            UnknownStatus { .. } => "DATA_UNKNOWN_STATUS",
            UnknownCarriedStatus { .. } => "DATA_UNKNOWN_CARRIED_STATUS",
            TooManyStatuses { .. } => "DATA_TOO_MANY_STATUSES",
            Config(_) => "DATA_INVALID_CONFIG",
            Oracle(e) => e.error_code(),
        }
    }
}

/// A submit or advance reached a battle that has already ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("battle already ended ({outcome})")]
pub struct TerminalStateViolation {
    pub outcome: Outcome,
}

impl EngineError for TerminalStateViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        "BATTLE_ALREADY_ENDED"
    }
}

/// Errors surfaced while driving a battle through the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("action rejected: {0}")]
    Rejected(#[from] RejectReason),

    #[error(transparent)]
    DataIntegrity(#[from] DataIntegrityError),

    #[error(transparent)]
    TerminalState(#[from] TerminalStateViolation),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl BattleError {
    pub fn as_rejection(&self) -> Option<&RejectReason> {
        match self {
            Self::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}

impl EngineError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Rejected(e) => e.severity(),
            Self::DataIntegrity(e) => e.severity(),
            Self::TerminalState(e) => e.severity(),
            Self::Oracle(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected(e) => e.error_code(),
            Self::DataIntegrity(e) => e.error_code(),
            Self::TerminalState(e) => e.error_code(),
            Self::Oracle(e) => e.error_code(),
        }
    }
}
