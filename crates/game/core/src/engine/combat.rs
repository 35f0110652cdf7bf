//! Skill use between characters.

use tracing::{debug, info};

use super::{Encounter, log_rejection};
use crate::combat::{Damage, SkillResolver};
use crate::env::GameEnv;
use crate::error::{EncounterError, GameError};
use crate::notify::{Notification, Recipient};
use crate::state::{CharacterId, SkillId};

impl Encounter {
    /// Uses `skill` from `attacker` on `target`.
    ///
    /// On success the cost is paid, the damage applied, a hostile receiver's
    /// hate toward the attacker raised by the hit-point damage, and both
    /// sides placed in one battlefield. A killed receiver is announced to
    /// its map. On failure nothing changes; a player attacker is told why.
    ///
    /// # Errors
    ///
    /// - `SkillNotFound` / `CharacterNotFound` on stale ids
    /// - `CharacterDead` if either side is dead
    /// - `InsufficientResources` if the attacker cannot pay the cost
    pub fn apply_damage(
        &mut self,
        env: GameEnv<'_>,
        attacker: CharacterId,
        target: CharacterId,
        skill: SkillId,
    ) -> Result<Damage, EncounterError> {
        let result = self.resolve_skill(env, attacker, target, skill);
        if let Err(error) = &result {
            log_rejection("apply damage", error);
            if self.characters.get(attacker).is_some_and(|user| user.is_player()) {
                self.send(
                    Recipient::Player(attacker),
                    Notification::SkillFailed {
                        user: attacker,
                        skill,
                        kind: error.kind(),
                        code: error.error_code().to_owned(),
                    },
                );
            }
        }
        result
    }

    /// Interrupts the skill `hostile` is casting.
    ///
    /// # Errors
    ///
    /// `NothingToInterrupt` unless the hostile is in skill standby, and the
    /// usual lookup errors for a stale or non-hostile id.
    pub fn interrupt(&mut self, env: GameEnv<'_>, hostile: CharacterId) -> Result<(), EncounterError> {
        self.with_brain(env, hostile, 0, |brain, ctx| brain.interrupt(ctx))
            .inspect_err(|error| log_rejection("interrupt", error))?;
        info!(target: "encounter::engine", %hostile, "skill interrupted");
        Ok(())
    }

    /// Skill resolution shared by players and hostiles.
    pub(super) fn resolve_skill(
        &mut self,
        env: GameEnv<'_>,
        attacker: CharacterId,
        target: CharacterId,
        skill: SkillId,
    ) -> Result<Damage, EncounterError> {
        let definition = env.skill(skill)?;
        let damage = SkillResolver::new(definition).apply(&mut self.characters, attacker, target)?;

        if self.hostiles.contains_key(&target) {
            self.with_brain(env, target, 0, |brain, ctx| {
                brain.change_hate(ctx, attacker, damage.hit_points);
                Ok(())
            })?;
        }
        self.engage(attacker, target)?;

        let Some(receiver) = self.characters.get(target) else {
            return Err(EncounterError::CharacterNotFound(target));
        };
        let (hit_points, magic_points, dead) = (
            receiver.pools.hit_points,
            receiver.pools.magic_points,
            receiver.is_dead(),
        );
        let map = receiver.map;
        debug!(
            target: "encounter::engine",
            %attacker,
            %target,
            %skill,
            hp_damage = damage.hit_points,
            mp_damage = damage.magic_points,
            hit_points,
            "skill resolved"
        );
        self.send_near(
            target,
            Notification::TargetUpdated {
                character: target,
                attacker,
                skill,
                hit_point_damage: damage.hit_points,
                magic_point_damage: damage.magic_points,
                hit_points,
                magic_points,
            },
        );

        if dead {
            info!(target: "encounter::engine", %target, killer = %attacker, "character died");
            self.send(
                Recipient::Map(map),
                Notification::TargetDied {
                    character: target,
                    killer: Some(attacker),
                },
            );
            if self.hostiles.contains_key(&target) {
                self.with_brain(env, target, 0, |brain, ctx| {
                    brain.kill(ctx);
                    Ok(())
                })?;
            }
        }
        Ok(damage)
    }
}
