//! Structured battle events and the observer interface.
//!
//! Events are notifications only: observers cannot influence resolution.
//! Every event is appended to [`BattleState::log`](crate::state::BattleState)
//! and forwarded to registered observers in emission order.

use crate::combat::ResolutionResult;
use crate::env::{SpeciesId, StatusId};
use crate::state::{CombatantId, Outcome};
use crate::status::ApplyOutcome;

/// Why a queued combatant did not act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SkipReason {
    Stunned,
    Fainted,
    /// Every possible target fainted before the action resolved.
    NoTarget,
    InsufficientStamina,
    /// The ability was no longer ready when its turn came.
    OnCooldown,
}

/// HP actually changed on one target after clamping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HpChange {
    pub target: CombatantId,
    pub delta: i64,
    pub hp_after: u32,
}

/// A status attach attempt and how it merged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusChange {
    pub target: CombatantId,
    pub status: StatusId,
    pub outcome: ApplyOutcome,
}

/// Experience granted on an ally victory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rewards {
    pub experience: u32,
    pub defeated: Vec<SpeciesId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    RoundStarted {
        round: u32,
        order: Vec<CombatantId>,
    },
    ActionResolved {
        round: u32,
        result: ResolutionResult,
        /// The requested single target fainted and the action was redirected.
        retargeted: bool,
        hp_changes: Vec<HpChange>,
        status_changes: Vec<StatusChange>,
        cleansed: Vec<(CombatantId, StatusId)>,
    },
    ActionSkipped {
        round: u32,
        actor: CombatantId,
        reason: SkipReason,
    },
    StatusTicked {
        target: CombatantId,
        status: StatusId,
        hp_delta: i64,
    },
    StatusExpired {
        target: CombatantId,
        status: StatusId,
    },
    CombatantFainted {
        target: CombatantId,
    },
    BattleEnded {
        outcome: Outcome,
        rounds: u32,
        rewards: Option<Rewards>,
    },
}

impl BattleEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RoundStarted { .. } => "round_started",
            Self::ActionResolved { .. } => "action_resolved",
            Self::ActionSkipped { .. } => "action_skipped",
            Self::StatusTicked { .. } => "status_ticked",
            Self::StatusExpired { .. } => "status_expired",
            Self::CombatantFainted { .. } => "combatant_fainted",
            Self::BattleEnded { .. } => "battle_ended",
        }
    }
}

/// Receives every event as it is emitted.
pub trait BattleObserver: Send {
    fn on_event(&mut self, event: &BattleEvent);
}

impl<F> BattleObserver for F
where
    F: FnMut(&BattleEvent) + Send,
{
    fn on_event(&mut self, event: &BattleEvent) {
        self(event)
    }
}
