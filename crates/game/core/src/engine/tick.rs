use tracing::{trace, warn};

use super::Encounter;
use crate::env::GameEnv;
use crate::group::Member;
use crate::state::CharacterId;

impl Encounter {
    /// Advances the simulation by `elapsed_ms`.
    ///
    /// Every registered character is updated in ascending id order, then
    /// parties and battlefields are cleaned up. A character whose update
    /// fails is finalized and removed; the tick continues for the others.
    pub fn tick(&mut self, env: GameEnv<'_>, elapsed_ms: u64) {
        self.clock_ms = self.clock_ms.saturating_add(elapsed_ms);
        trace!(target: "encounter::engine", clock_ms = self.clock_ms, elapsed_ms, "tick");

        for id in self.characters.ids() {
            // Removed by an earlier update in this tick.
            if !self.characters.contains(id) || !self.hostiles.contains_key(&id) {
                continue;
            }
            if let Err(error) = self.with_brain(env, id, elapsed_ms, |brain, ctx| brain.tick(ctx)) {
                warn!(
                    target: "encounter::engine",
                    character = %id,
                    %error,
                    "update failed; removing character"
                );
                self.finalize(id);
            }
        }

        self.cleanup_parties();
        self.cleanup_battlefields(env);
    }

    /// Detaches `id` from its battlefield and party, then unregisters it.
    pub(super) fn finalize(&mut self, id: CharacterId) {
        if self.hostiles.remove(&id).is_some() {
            let member = Member::Hostile(id);
            if let Some(battlefield) = self.battlefield_of(member) {
                if let Some(entry) = self.battlefields.get_mut(battlefield) {
                    entry.remove(member);
                }
            }
        } else if let Err(error) = self.detach_from_party(id) {
            warn!(target: "encounter::engine", character = %id, %error, "party detach failed");
        }
        self.characters.remove(id);
    }
}
