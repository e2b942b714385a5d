//! Unified error types surfaced by the runtime API.
//!
//! Wraps engine failures, worker coordination failures and action provider
//! failures so clients can bubble them up with consistent context.
use battle_core::{
    AiDecisionFailure, BattleError, CombatantId, DataIntegrityError, EngineError, ErrorSeverity,
    RejectReason,
};
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("player action provider not set")]
    ProviderNotSet,

    #[error("battle worker command channel closed")]
    CommandChannelClosed,

    #[error("battle worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("battle worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,

    #[error("runtime requires a battle setup before building")]
    MissingSetup,

    #[error("failed to start battle")]
    Start(#[source] DataIntegrityError),

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error("AI could not choose an action for {actor}")]
    AiDecision {
        actor: CombatantId,
        #[source]
        source: AiDecisionFailure,
    },

    #[error("action provider has no action left for {actor}")]
    ProviderExhausted { actor: CombatantId },

    #[error("player action provider gave up after {attempts} rejected actions")]
    TooManyRejections { attempts: u32 },
}

impl RuntimeError {
    /// The rejection reason when an engine call refused a player action.
    pub fn as_rejection(&self) -> Option<&RejectReason> {
        match self {
            Self::Battle(error) => error.as_rejection(),
            _ => None,
        }
    }

    /// Severity of the underlying failure; runtime plumbing failures are internal.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Battle(error) => error.severity(),
            Self::Start(error) => error.severity(),
            Self::TooManyRejections { .. } | Self::ProviderExhausted { .. } => ErrorSeverity::Validation,
            _ => ErrorSeverity::Internal,
        }
    }
}
