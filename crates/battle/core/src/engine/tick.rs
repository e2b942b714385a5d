use super::{BattleEngine, BattleEvent};
use crate::state::{BattlePhase, CombatantId};
use crate::status::StatusEffectTracker;

impl BattleEngine {
    /// End-of-round upkeep: status ticks in roster order, then stamina regen.
    ///
    /// Cooldowns need no tick; slots store the round they become ready.
    pub(super) fn tick_round(&mut self) {
        let regen = self.config.stamina_regen;

        for index in 0..self.state.combatants.len() {
            let combatant = &mut self.state.combatants[index];
            if !combatant.is_alive() {
                continue;
            }

            let target: CombatantId = combatant.id;
            let report = StatusEffectTracker::tick(combatant);
            if report.fainted {
                StatusEffectTracker::clear(combatant);
            } else {
                combatant.stamina.restore(regen);
            }

            for entry in report.entries {
                self.emit(BattleEvent::StatusTicked {
                    target,
                    status: entry.status,
                    hp_delta: entry.hp_delta,
                });
            }
            for status in report.expired {
                self.emit(BattleEvent::StatusExpired { target, status });
            }
            if report.fainted {
                tracing::info!(%target, "combatant fainted from a status effect");
                self.emit(BattleEvent::CombatantFainted { target });
            }
        }

        self.state.phase = BattlePhase::TerminalCheck;
    }
}
