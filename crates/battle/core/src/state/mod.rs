//! Authoritative battle state representation.
//!
//! This module owns the data structures that describe combatants, the round
//! bookkeeping and the event log. Runtime layers clone or query this state but
//! mutate it exclusively through the engine.
mod combatant;
mod roster;

use std::fmt;

use arrayvec::ArrayVec;

pub use combatant::{AbilitySlot, CombatantState, Loadout, ResourceMeter};
pub use roster::RosterEntry;

use crate::action::BattleAction;
use crate::config::BattleConfig;
use crate::engine::BattleEvent;

/// Index of a combatant inside [`BattleState::combatants`].
///
/// Allies come first, then enemies, each in roster order, so comparing ids
/// also compares "ally before enemy, then roster order".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CombatantId(pub u8);

impl CombatantId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "combatant#{}", self.0)
    }
}

/// Which roster a combatant belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Ally => Self::Enemy,
            Self::Enemy => Self::Ally,
        }
    }
}

/// Who picks actions for the ally side. Enemies are always AI-driven.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Controller {
    /// The engine suspends and waits for `submit_player_action`.
    #[default]
    Player,
    /// Allies decide through the battle AI; battles resolve unattended.
    Ai,
}

/// The kind of encounter, which tunes AI weights, fleeing and rewards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleMode {
    #[default]
    Standard,
    /// Boss encounter: fleeing is not allowed.
    Guardian,
    /// Wave-based challenge. `wave` starts at 1.
    Endless { wave: u32 },
}

impl BattleMode {
    pub const fn allows_flee(self) -> bool {
        !matches!(self, Self::Guardian)
    }
}

impl fmt::Display for BattleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Guardian => write!(f, "guardian"),
            Self::Endless { wave } => write!(f, "endless(wave {wave})"),
        }
    }
}

/// Phases of one round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattlePhase {
    #[default]
    RoundStart,
    ActionCollection,
    ActionResolution,
    EffectTick,
    TerminalCheck,
    Ended,
}

/// Terminal result of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    AllyVictory,
    EnemyVictory,
    Fled,
}

impl Outcome {
    /// The winning side, if any.
    pub const fn winner(self) -> Option<Side> {
        match self {
            Self::AllyVictory => Some(Side::Ally),
            Self::EnemyVictory => Some(Side::Enemy),
            Self::Fled => None,
        }
    }
}

/// Turn order of one round.
pub type TurnQueue = ArrayVec<CombatantId, { BattleConfig::MAX_COMBATANTS }>;

/// Canonical snapshot of one battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    /// Seed fixed at battle start; combined with `nonce` for every roll.
    pub seed: u64,
    /// Incremented once per resolved action.
    pub nonce: u64,
    /// 1-based round counter.
    pub round: u32,
    pub phase: BattlePhase,
    pub mode: BattleMode,
    /// Allies first, then enemies, each in roster order.
    pub combatants: Vec<CombatantState>,
    /// Combatants that act this round, fastest first.
    pub queue: TurnQueue,
    /// Position of the next combatant to collect an action from.
    pub cursor: usize,
    /// Actions collected this round, in queue order.
    pub pending: Vec<BattleAction>,
    /// Chronological event log.
    pub log: Vec<BattleEvent>,
    pub outcome: Option<Outcome>,
}

impl BattleState {
    /// Creates a state in `RoundStart` of round 1.
    pub fn new(seed: u64, mode: BattleMode, combatants: Vec<CombatantState>) -> Self {
        Self {
            seed,
            nonce: 0,
            round: 1,
            phase: BattlePhase::RoundStart,
            mode,
            combatants,
            queue: TurnQueue::new(),
            cursor: 0,
            pending: Vec::new(),
            log: Vec::new(),
            outcome: None,
        }
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&CombatantState> {
        self.combatants.get(id.index())
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut CombatantState> {
        self.combatants.get_mut(id.index())
    }

    pub fn side(&self, side: Side) -> impl Iterator<Item = &CombatantState> {
        self.combatants.iter().filter(move |c| c.side == side)
    }

    /// Living combatants of `side`, in roster order.
    pub fn alive_on(&self, side: Side) -> impl Iterator<Item = &CombatantState> {
        self.side(side).filter(|c| c.is_alive())
    }

    pub fn is_side_defeated(&self, side: Side) -> bool {
        self.alive_on(side).next().is_none()
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// The combatant whose action is being collected, if any.
    pub fn current_actor(&self) -> Option<CombatantId> {
        if self.phase == BattlePhase::ActionCollection {
            self.queue.get(self.cursor).copied()
        } else {
            None
        }
    }

    /// Remaining HP over maximum HP for a side, as `(current, max)`.
    pub fn hp_totals(&self, side: Side) -> (u64, u64) {
        self.side(side).fold((0, 0), |(cur, max), c| {
            (cur + u64::from(c.hp.current), max + u64::from(c.hp.maximum))
        })
    }

    /// Post-battle snapshot of one roster, for the caller to persist.
    pub fn roster_snapshot(&self, side: Side) -> Vec<RosterEntry> {
        self.side(side).map(CombatantState::to_roster_entry).collect()
    }
}
