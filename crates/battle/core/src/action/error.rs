//! Action rejection reasons.

use crate::env::AbilityId;
use crate::error::{EngineError, ErrorSeverity};
use crate::state::CombatantId;

/// Why a submitted action was rejected. Rejections never mutate state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RejectReason {
    /// The engine is not waiting for player input.
    #[error("no action is awaited right now")]
    NotAwaitingInput,

    /// Another combatant is up.
    #[error("not {actor}'s turn (awaiting {expected})")]
    NotActorsTurn {
        actor: CombatantId,
        expected: CombatantId,
    },

    #[error("unknown combatant {0}")]
    UnknownCombatant(CombatantId),

    #[error("{0} has fainted")]
    ActorFainted(CombatantId),

    #[error("{ability} is not in the actor's loadout")]
    AbilityNotInLoadout { ability: AbilityId },

    #[error("{ability} is on cooldown until round {ready_round}")]
    AbilityOnCooldown {
        ability: AbilityId,
        ready_round: u32,
    },

    #[error("not enough stamina: need {required}, have {available}")]
    InsufficientStamina { required: u32, available: u32 },

    #[error("{ability} requires a target")]
    MissingTarget { ability: AbilityId },

    #[error("unknown target {0}")]
    UnknownTarget(CombatantId),

    #[error("target {0} has fainted")]
    TargetFainted(CombatantId),

    #[error("target {target} is on the wrong side for {ability}")]
    WrongSide {
        ability: AbilityId,
        target: CombatantId,
    },

    #[error("fleeing is not allowed here")]
    FleeNotAllowed,

    /// The ability id is in the loadout but absent from the ability table.
    #[error("{0} has no definition")]
    UnknownAbility(AbilityId),
}

impl EngineError for RejectReason {
    fn severity(&self) -> ErrorSeverity {
        use RejectReason::*;
        match self {
            AbilityOnCooldown { .. } | InsufficientStamina { .. } | TargetFainted(_) => {
                ErrorSeverity::Recoverable
            }
            UnknownAbility(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use RejectReason::*;
        match self {
            NotAwaitingInput => "ACTION_NOT_AWAITING_INPUT",
            NotActorsTurn { .. } => "ACTION_NOT_ACTORS_TURN",
            UnknownCombatant(_) => "ACTION_UNKNOWN_COMBATANT",
            ActorFainted(_) => "ACTION_ACTOR_FAINTED",
            AbilityNotInLoadout { .. } => "ACTION_ABILITY_NOT_IN_LOADOUT",
            AbilityOnCooldown { .. } => "ACTION_ABILITY_ON_COOLDOWN",
            InsufficientStamina { .. } => "ACTION_INSUFFICIENT_STAMINA",
            MissingTarget { .. } => "ACTION_MISSING_TARGET",
            UnknownTarget(_) => "ACTION_UNKNOWN_TARGET",
            TargetFainted(_) => "ACTION_TARGET_FAINTED",
            WrongSide { .. } => "ACTION_WRONG_SIDE",
            FleeNotAllowed => "ACTION_FLEE_NOT_ALLOWED",
            UnknownAbility(_) => "ACTION_UNKNOWN_ABILITY",
        }
    }
}
