//! Combat sub-state machine run while a hostile is in battle.
//!
//! ```text
//!              ┌──────────── Move ◄───────────┐
//!              ▼                              │
//!        JudgeAction ──► SkillStandby ──► SkillRigid
//!              ▲              │                │
//!              │              ▼                │
//!              └──── SkillInterruption ◄───────┘ (only from standby)
//! ```
//!
//! Exactly one phase step runs per tick. Entering a phase performs its entry
//! work immediately; its countdown starts on the following tick.

use tracing::{debug, warn};

use super::context::{BrainContext, BrainSignal, Countdown};
use crate::combat::SkillResolver;
use crate::error::EncounterError;
use crate::state::{CharacterId, SkillId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PhaseKind {
    JudgeAction,
    Move,
    SkillStandby,
    SkillRigid,
    SkillInterruption,
}

/// Option scored by `JudgeAction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Move,
    UseSkill,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CombatPhase {
    JudgeAction,
    Move,
    SkillStandby { skill: SkillId, cast: Countdown },
    SkillRigid { recast: Countdown },
    SkillInterruption { penalty: Countdown },
}

impl CombatPhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Self::JudgeAction => PhaseKind::JudgeAction,
            Self::Move => PhaseKind::Move,
            Self::SkillStandby { .. } => PhaseKind::SkillStandby,
            Self::SkillRigid { .. } => PhaseKind::SkillRigid,
            Self::SkillInterruption { .. } => PhaseKind::SkillInterruption,
        }
    }
}

/// Skill a hostile could start casting now.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SkillPick {
    slot: usize,
    skill: SkillId,
    cast_time_ms: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CombatMachine {
    phase: CombatPhase,
    last_choice: Option<Choice>,
    /// Next slot of the tribe's skill rotation to try.
    rotation: usize,
}

impl CombatMachine {
    pub fn new() -> Self {
        Self {
            phase: CombatPhase::JudgeAction,
            last_choice: None,
            rotation: 0,
        }
    }

    pub fn phase(&self) -> &CombatPhase {
        &self.phase
    }

    pub fn kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn last_choice(&self) -> Option<Choice> {
        self.last_choice
    }

    /// Runs one step of the current phase against the current top target.
    pub fn tick(
        &mut self,
        ctx: &mut BrainContext<'_>,
        target: Option<CharacterId>,
    ) -> Result<(), EncounterError> {
        match &mut self.phase {
            CombatPhase::JudgeAction => {
                let pick = self.pick_skill(ctx)?;
                let choice = judge(pick.is_some(), self.last_choice);
                self.last_choice = Some(choice);
                match (choice, pick) {
                    (Choice::UseSkill, Some(pick)) => {
                        self.rotation = pick.slot + 1;
                        self.transition(
                            CombatPhase::SkillStandby {
                                skill: pick.skill,
                                cast: Countdown::new(pick.cast_time_ms),
                            },
                            ctx,
                            target,
                        );
                    }
                    _ => self.transition(CombatPhase::Move, ctx, target),
                }
            }
            CombatPhase::Move => {
                if let Some(position) = target
                    .and_then(|id| ctx.characters.get(id))
                    .map(|character| character.position())
                {
                    let dt = ctx.elapsed_secs();
                    let me = ctx.me_mut()?;
                    let (speed, turn_rate) = (me.stats.move_speed, me.stats.turn_rate);
                    me.transform.pursue(position, dt, speed, turn_rate);
                }
                self.transition(CombatPhase::JudgeAction, ctx, target);
            }
            CombatPhase::SkillStandby { skill, cast } => {
                if cast.advance(ctx.elapsed_ms) {
                    let skill = *skill;
                    let recast_time_ms = ctx.env.skill(skill)?.recast_time_ms;
                    match target {
                        Some(target) => ctx.emit(BrainSignal::CastSkill { skill, target }),
                        None => debug!(
                            target: "encounter::hostile",
                            hostile = %ctx.owner,
                            %skill,
                            "cast finished without a target"
                        ),
                    }
                    self.transition(
                        CombatPhase::SkillRigid {
                            recast: Countdown::new(recast_time_ms),
                        },
                        ctx,
                        target,
                    );
                }
            }
            CombatPhase::SkillRigid { recast } => {
                if recast.advance(ctx.elapsed_ms) {
                    self.transition(CombatPhase::JudgeAction, ctx, target);
                }
            }
            CombatPhase::SkillInterruption { penalty } => {
                if penalty.advance(ctx.elapsed_ms) {
                    self.transition(CombatPhase::JudgeAction, ctx, target);
                }
            }
        }
        Ok(())
    }

    /// Abandons a pending skill standby in favor of the interruption penalty.
    ///
    /// # Errors
    ///
    /// Returns `NothingToInterrupt` unless the machine is in `SkillStandby`.
    pub fn interrupt(&mut self, ctx: &mut BrainContext<'_>) -> Result<(), EncounterError> {
        if !matches!(self.phase, CombatPhase::SkillStandby { .. }) {
            return Err(EncounterError::NothingToInterrupt(ctx.owner));
        }
        let penalty = Countdown::new(ctx.config.interruption_penalty_ms);
        self.transition(CombatPhase::SkillInterruption { penalty }, ctx, None);
        Ok(())
    }

    fn transition(
        &mut self,
        next: CombatPhase,
        ctx: &mut BrainContext<'_>,
        target: Option<CharacterId>,
    ) {
        debug!(
            target: "encounter::hostile",
            hostile = %ctx.owner,
            from = %self.phase.kind(),
            to = %next.kind(),
            "combat phase transition"
        );
        self.phase = next;
        self.on_enter(ctx, target);
    }

    fn on_enter(&mut self, ctx: &mut BrainContext<'_>, target: Option<CharacterId>) {
        if let CombatPhase::SkillStandby { skill, .. } = self.phase {
            ctx.emit(BrainSignal::SkillAnnounced { skill, target });
        }
    }

    /// First affordable skill of the tribe rotation, starting at the cursor.
    fn pick_skill(&self, ctx: &BrainContext<'_>) -> Result<Option<SkillPick>, EncounterError> {
        let me = ctx.me()?;
        let Some(tribe) = me.tribe() else {
            return Err(EncounterError::NotAHostile(ctx.owner));
        };
        let rotation = &ctx.env.tribe(tribe)?.skills;
        if rotation.is_empty() {
            return Ok(None);
        }

        for offset in 0..rotation.len() {
            let slot = (self.rotation + offset) % rotation.len();
            let skill_id = rotation[slot];
            let Some(skill) = ctx.env.skills().skill(skill_id) else {
                warn!(
                    target: "encounter::hostile",
                    hostile = %ctx.owner,
                    skill = %skill_id,
                    "tribe references an unknown skill"
                );
                continue;
            };
            if SkillResolver::new(skill).can_afford(&me.pools) {
                return Ok(Some(SkillPick {
                    slot,
                    skill: skill_id,
                    cast_time_ms: skill.cast_time_ms,
                }));
            }
        }
        Ok(None)
    }
}

impl Default for CombatMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Scores moving against using a skill.
///
/// Both options score the same while a skill is affordable, so ties go to the
/// option not chosen last time; without an affordable skill only moving is
/// eligible.
pub fn judge(skill_ready: bool, last: Option<Choice>) -> Choice {
    let move_score = 1.0_f32;
    let skill_score = if skill_ready { 1.0 } else { f32::NEG_INFINITY };

    if skill_score > move_score {
        Choice::UseSkill
    } else if move_score > skill_score {
        Choice::Move
    } else {
        match last {
            Some(Choice::Move) => Choice::UseSkill,
            Some(Choice::UseSkill) | None => Choice::Move,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_alternate() {
        assert_eq!(judge(true, None), Choice::Move);
        assert_eq!(judge(true, Some(Choice::Move)), Choice::UseSkill);
        assert_eq!(judge(true, Some(Choice::UseSkill)), Choice::Move);
    }

    #[test]
    fn unaffordable_skill_always_moves() {
        assert_eq!(judge(false, Some(Choice::Move)), Choice::Move);
        assert_eq!(judge(false, None), Choice::Move);
    }

    #[test]
    fn countdown_reaches_zero_once_elapsed_covers_it() {
        let mut countdown = Countdown::new(250);
        assert!(!countdown.advance(100));
        assert!(!countdown.advance(100));
        assert!(countdown.advance(100));
        assert_eq!(countdown.remaining_ms(), 0);
    }
}
