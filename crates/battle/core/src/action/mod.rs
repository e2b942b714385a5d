//! Actions a combatant can take and their validation.
//!
//! An action is either an ability use (the basic attack included, under the
//! reserved [`AbilityId::BASIC_ATTACK`]) or an attempt to flee.
mod error;
mod validate;

pub use error::RejectReason;
pub use validate::{legal_targets, lookup_ability, validate_action};

use crate::env::AbilityId;
use crate::state::CombatantId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    UseAbility {
        ability: AbilityId,
        /// Required for single-target selectors, ignored otherwise.
        target: Option<CombatantId>,
    },
    Flee,
}

/// An action submitted for one combatant in the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleAction {
    pub actor: CombatantId,
    pub kind: ActionKind,
}

impl BattleAction {
    pub fn use_ability(actor: CombatantId, ability: AbilityId, target: Option<CombatantId>) -> Self {
        Self {
            actor,
            kind: ActionKind::UseAbility { ability, target },
        }
    }

    pub fn basic_attack(actor: CombatantId, target: CombatantId) -> Self {
        Self::use_ability(actor, AbilityId::BASIC_ATTACK, Some(target))
    }

    pub fn flee(actor: CombatantId) -> Self {
        Self {
            actor,
            kind: ActionKind::Flee,
        }
    }

    pub fn ability(&self) -> Option<AbilityId> {
        match self.kind {
            ActionKind::UseAbility { ability, .. } => Some(ability),
            ActionKind::Flee => None,
        }
    }

    pub fn target(&self) -> Option<CombatantId> {
        match self.kind {
            ActionKind::UseAbility { target, .. } => target,
            ActionKind::Flee => None,
        }
    }
}
