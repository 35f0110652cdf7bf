//! Outer state machine of a hostile: Normal, Battle or Dead.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use tracing::{debug, info};

use super::context::{BrainContext, BrainSignal, Countdown};
use super::phase::{CombatMachine, PhaseKind};
use crate::combat::AggroTracker;
use crate::error::EncounterError;
use crate::math::Transform;
use crate::state::{CharacterId, CharacterKind, Pools};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StateKind {
    Normal,
    Battle,
    Dead,
}

/// Wandering around the spawn point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Wander {
    idle: Countdown,
    destination: Option<Vec3>,
}

impl Wander {
    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }
}

/// Fighting: aggro records plus the combat sub-state machine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Battle {
    aggro: AggroTracker,
    combat: CombatMachine,
}

impl Battle {
    pub fn aggro(&self) -> &AggroTracker {
        &self.aggro
    }

    pub fn combat(&self) -> &CombatMachine {
        &self.combat
    }
}

/// Waiting to respawn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Respawn {
    timer: Countdown,
}

impl Respawn {
    pub fn remaining_ms(&self) -> u64 {
        self.timer.remaining_ms()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum HostileState {
    Normal(Wander),
    Battle(Battle),
    Dead(Respawn),
}

impl HostileState {
    pub fn kind(&self) -> StateKind {
        match self {
            Self::Normal(_) => StateKind::Normal,
            Self::Battle(_) => StateKind::Battle,
            Self::Dead(_) => StateKind::Dead,
        }
    }
}

/// Behavior of one hostile character.
///
/// The brain owns the hostile's aggro (inside the Battle state) and mutates
/// only its own character record. Everything that touches other characters
/// or grouping is reported through [`BrainSignal`]s.
#[derive(Clone, Debug, PartialEq)]
pub struct HostileBrain {
    id: CharacterId,
    state: HostileState,
}

impl HostileBrain {
    /// A brain starting in Normal with a fresh idle timer.
    pub fn new(id: CharacterId, wander_idle_ms: u64) -> Self {
        Self {
            id,
            state: HostileState::Normal(Wander {
                idle: Countdown::new(wander_idle_ms),
                destination: None,
            }),
        }
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn state(&self) -> &HostileState {
        &self.state
    }

    pub fn kind(&self) -> StateKind {
        self.state.kind()
    }

    /// Current combat phase, only while in battle.
    pub fn phase(&self) -> Option<PhaseKind> {
        match &self.state {
            HostileState::Battle(battle) => Some(battle.combat.kind()),
            _ => None,
        }
    }

    pub fn aggro(&self) -> Option<&AggroTracker> {
        match &self.state {
            HostileState::Battle(battle) => Some(&battle.aggro),
            _ => None,
        }
    }

    /// Adds hate toward `character`, pulling a Normal hostile into battle.
    ///
    /// Dead hostiles ignore hate.
    pub fn change_hate(&mut self, ctx: &mut BrainContext<'_>, character: CharacterId, delta: f32) {
        match &mut self.state {
            HostileState::Dead(_) => {}
            HostileState::Battle(battle) => battle.aggro.change_hate(character, delta),
            HostileState::Normal(_) => {
                if delta > 0.0 {
                    self.transition(HostileState::Battle(Battle::default()), ctx);
                    if let HostileState::Battle(battle) = &mut self.state {
                        battle.aggro.change_hate(character, delta);
                    }
                }
            }
        }
    }

    /// Drops the record held against `character`.
    ///
    /// An emptied tracker ends the battle on the next tick.
    pub fn forget(&mut self, character: CharacterId) -> bool {
        match &mut self.state {
            HostileState::Battle(battle) => battle.aggro.remove(character),
            _ => false,
        }
    }

    /// Returns to Normal from battle, discarding all aggro.
    pub fn disengage(&mut self, ctx: &mut BrainContext<'_>) {
        if matches!(self.state, HostileState::Battle(_)) {
            self.enter_normal(ctx);
        }
    }

    /// Enters Dead unless already there.
    pub fn kill(&mut self, ctx: &mut BrainContext<'_>) {
        if !matches!(self.state, HostileState::Dead(_)) {
            self.transition(HostileState::Dead(Respawn::default()), ctx);
        }
    }

    /// Interrupts a pending skill cast.
    ///
    /// # Errors
    ///
    /// Returns `NothingToInterrupt` unless the hostile is in battle and in `SkillStandby`.
    pub fn interrupt(&mut self, ctx: &mut BrainContext<'_>) -> Result<(), EncounterError> {
        match &mut self.state {
            HostileState::Battle(battle) => battle.combat.interrupt(ctx),
            _ => Err(EncounterError::NothingToInterrupt(self.id)),
        }
    }

    /// Advances the brain by one tick.
    ///
    /// # Errors
    ///
    /// Lookup failures on the hostile's own record, tribe or skills. The
    /// orchestrator finalizes and removes a hostile whose tick fails.
    pub fn tick(&mut self, ctx: &mut BrainContext<'_>) -> Result<(), EncounterError> {
        let dead = ctx.me()?.is_dead();
        if dead && !matches!(self.state, HostileState::Dead(_)) {
            self.kill(ctx);
            return Ok(());
        }

        match &mut self.state {
            HostileState::Normal(wander) => wander_step(wander, ctx),
            HostileState::Battle(battle) => {
                let origin = ctx.me()?.position();
                battle.aggro.update(
                    ctx.elapsed_secs(),
                    ctx.config.aggro_decay_per_second,
                    ctx.config.leash_radius,
                    origin,
                    ctx.characters,
                );
                if battle.aggro.is_empty() {
                    self.enter_normal(ctx);
                    return Ok(());
                }
                let target = battle.aggro.current_target(ctx.characters);
                battle.combat.tick(ctx, target)
            }
            HostileState::Dead(respawn) => {
                if respawn.timer.advance(ctx.elapsed_ms) {
                    repopulate(ctx)?;
                    self.enter_normal(ctx);
                    ctx.emit(BrainSignal::Respawned);
                }
                Ok(())
            }
        }
    }

    fn enter_normal(&mut self, ctx: &mut BrainContext<'_>) {
        self.transition(HostileState::Normal(Wander::default()), ctx);
    }

    /// Exits the current state, swaps in `next` and runs its entry.
    fn transition(&mut self, next: HostileState, ctx: &mut BrainContext<'_>) {
        debug!(
            target: "encounter::hostile",
            hostile = %self.id,
            from = %self.state.kind(),
            to = %next.kind(),
            "state transition"
        );
        self.on_exit(ctx);
        self.state = next;
        self.on_enter(ctx);
    }

    fn on_exit(&mut self, ctx: &mut BrainContext<'_>) {
        if let HostileState::Battle(battle) = &mut self.state {
            // Any in-flight skill phase is abandoned here, never drained.
            battle.aggro.clear();
            ctx.emit(BrainSignal::LeftBattle);
        }
    }

    fn on_enter(&mut self, ctx: &mut BrainContext<'_>) {
        match &mut self.state {
            HostileState::Normal(wander) => {
                wander.idle = Countdown::new(ctx.config.wander_idle_ms);
                wander.destination = None;
            }
            HostileState::Battle(battle) => {
                *battle = Battle::default();
                ctx.emit(BrainSignal::EnteredBattle);
            }
            HostileState::Dead(respawn) => {
                respawn.timer = Countdown::new(ctx.config.respawn_interval_ms);
                ctx.emit(BrainSignal::Died);
            }
        }
    }
}

fn wander_step(wander: &mut Wander, ctx: &mut BrainContext<'_>) -> Result<(), EncounterError> {
    match wander.destination {
        Some(destination) => {
            let dt = ctx.elapsed_secs();
            let tolerance = ctx.config.arrival_tolerance;
            let me = ctx.me_mut()?;
            let (speed, turn_rate) = (me.stats.move_speed, me.stats.turn_rate);
            let remaining = me.transform.pursue(destination, dt, speed, turn_rate);
            if remaining <= tolerance {
                wander.destination = None;
                wander.idle = Countdown::new(ctx.config.wander_idle_ms);
            }
        }
        None => {
            if wander.idle.advance(ctx.elapsed_ms) {
                let spawn_point = ctx
                    .me()?
                    .spawn_point()
                    .ok_or(EncounterError::NotAHostile(ctx.owner))?;
                let radius = ctx.config.wander_radius.max(0.0);
                let angle = ctx.rng.gen_range(0.0..TAU);
                let distance = ctx.rng.gen_range(0.0..=radius);
                wander.destination = Some(
                    spawn_point + Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance),
                );
            }
        }
    }
    Ok(())
}

/// Re-rolls the hostile's tribe and restores it at its spawn point.
fn repopulate(ctx: &mut BrainContext<'_>) -> Result<(), EncounterError> {
    let tribes = ctx.env.tribes().tribe_ids();
    if tribes.is_empty() {
        return Err(EncounterError::NoTribes);
    }
    let tribe_id = tribes[ctx.rng.gen_range(0..tribes.len())];
    let template = ctx.env.tribe(tribe_id)?;

    let owner = ctx.owner;
    let me = ctx.me_mut()?;
    let spawn_point = me
        .spawn_point()
        .ok_or(EncounterError::NotAHostile(owner))?;
    me.kind = CharacterKind::Hostile {
        tribe: tribe_id,
        spawn_point,
    };
    me.stats = template.stats;
    me.pools = Pools::full(&template.stats);
    me.transform = Transform::at(spawn_point);
    me.battlefield = None;

    info!(
        target: "encounter::hostile",
        hostile = %owner,
        tribe = %tribe_id,
        "hostile respawned"
    );
    Ok(())
}
