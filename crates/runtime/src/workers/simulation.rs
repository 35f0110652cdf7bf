//! Simulation worker that owns the authoritative [`Encounter`].
//!
//! Receives commands from [`crate::RuntimeHandle`], applies them to the
//! encounter, optionally ticks it on a fixed interval and publishes the
//! notifications each step produced to the EventBus.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use encounter_core::{
    Battlefield, BattlefieldId, Character, CharacterId, Damage, Encounter, EncounterError, MapId,
    Member, PartyId, SkillId, StatBlock, Transform, TribeId, Vec3,
};

use crate::api::{HostileStatus, Result};
use crate::events::{Event, EventBus, NotificationEvent, SimulationEvent};
use crate::oracle::OracleManager;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Advance the encounter by an explicit amount of tick time.
    Tick {
        elapsed_ms: u64,
        reply: oneshot::Sender<u64>,
    },
    AddPlayer {
        map: MapId,
        transform: Transform,
        stats: StatBlock,
        reply: oneshot::Sender<Result<CharacterId>>,
    },
    Spawn {
        tribe: TribeId,
        map: MapId,
        position: Vec3,
        reply: oneshot::Sender<Result<CharacterId>>,
    },
    ApplyDamage {
        attacker: CharacterId,
        target: CharacterId,
        skill: SkillId,
        reply: oneshot::Sender<Result<Damage>>,
    },
    Interrupt {
        hostile: CharacterId,
        reply: oneshot::Sender<Result<()>>,
    },
    JoinParty {
        player: CharacterId,
        party: PartyId,
        reply: oneshot::Sender<Result<()>>,
    },
    LeaveParty {
        player: CharacterId,
        reply: oneshot::Sender<Result<PartyId>>,
    },
    CreateBattlefield {
        reply: oneshot::Sender<Result<BattlefieldId>>,
    },
    JoinBattlefield {
        member: Member,
        battlefield: BattlefieldId,
        reply: oneshot::Sender<Result<()>>,
    },
    LeaveBattlefield {
        member: Member,
        reply: oneshot::Sender<Result<()>>,
    },
    RemoveCharacter {
        character: CharacterId,
        reply: oneshot::Sender<Result<()>>,
    },
    QueryCharacter {
        character: CharacterId,
        reply: oneshot::Sender<Option<Character>>,
    },
    QueryHostile {
        hostile: CharacterId,
        reply: oneshot::Sender<Option<HostileStatus>>,
    },
    QueryBattlefield {
        battlefield: BattlefieldId,
        reply: oneshot::Sender<Option<Battlefield>>,
    },
    QueryParty {
        player: CharacterId,
        reply: oneshot::Sender<Option<PartyId>>,
    },
    QueryClock {
        reply: oneshot::Sender<u64>,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Tick { .. } => "tick",
            Command::AddPlayer { .. } => "add_player",
            Command::Spawn { .. } => "spawn",
            Command::ApplyDamage { .. } => "apply_damage",
            Command::Interrupt { .. } => "interrupt",
            Command::JoinParty { .. } => "join_party",
            Command::LeaveParty { .. } => "leave_party",
            Command::CreateBattlefield { .. } => "create_battlefield",
            Command::JoinBattlefield { .. } => "join_battlefield",
            Command::LeaveBattlefield { .. } => "leave_battlefield",
            Command::RemoveCharacter { .. } => "remove_character",
            Command::QueryCharacter { .. } => "query_character",
            Command::QueryHostile { .. } => "query_hostile",
            Command::QueryBattlefield { .. } => "query_battlefield",
            Command::QueryParty { .. } => "query_party",
            Command::QueryClock { .. } => "query_clock",
        }
    }
}

/// Background task that processes encounter commands and ticks.
pub struct SimulationWorker {
    encounter: Encounter,
    oracles: OracleManager,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    tick_interval: Option<Duration>,
}

impl SimulationWorker {
    pub fn new(
        encounter: Encounter,
        oracles: OracleManager,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        tick_interval: Option<Duration>,
    ) -> Self {
        info!(
            target: "runtime::simulation",
            skills = oracles.skills().len(),
            tribes = oracles.tribes().len(),
            ?tick_interval,
            "SimulationWorker initialized"
        );

        Self {
            encounter,
            oracles,
            command_rx,
            event_bus,
            tick_interval,
        }
    }

    /// Main worker loop.
    ///
    /// Exits once every [`crate::RuntimeHandle`] has been dropped.
    pub async fn run(mut self) {
        let Some(period) = self.tick_interval.filter(|period| !period.is_zero()) else {
            while let Some(cmd) = self.command_rx.recv().await {
                self.handle_command(cmd);
            }
            return;
        };

        let mut last_tick = Instant::now();
        let mut interval = time::interval_at(last_tick + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                now = interval.tick() => {
                    let elapsed_ms = now.duration_since(last_tick).as_millis() as u64;
                    last_tick = now;
                    self.step(elapsed_ms);
                }
            }
        }
        debug!(target: "runtime::simulation", "command channel closed, worker stopping");
    }

    fn handle_command(&mut self, cmd: Command) {
        let name = cmd.name();
        let env = self.oracles.as_game_env();
        let delivered = match cmd {
            Command::Tick { elapsed_ms, reply } => {
                self.step(elapsed_ms);
                reply.send(self.encounter.clock_ms()).is_ok()
            }
            Command::AddPlayer {
                map,
                transform,
                stats,
                reply,
            } => {
                let result = self.encounter.add_player(map, transform, stats);
                reply.send(self.settle(name, result)).is_ok()
            }
            Command::Spawn {
                tribe,
                map,
                position,
                reply,
            } => {
                let result = self.encounter.spawn(env, tribe, map, position);
                reply.send(self.settle(name, result)).is_ok()
            }
            Command::ApplyDamage {
                attacker,
                target,
                skill,
                reply,
            } => {
                let result = self.encounter.apply_damage(env, attacker, target, skill);
                reply.send(self.settle(name, result)).is_ok()
            }
            Command::Interrupt { hostile, reply } => {
                let result = self.encounter.interrupt(env, hostile);
                reply.send(self.settle(name, result)).is_ok()
            }
            Command::JoinParty {
                player,
                party,
                reply,
            } => {
                let result = self.encounter.join_party(player, party);
                reply.send(self.settle(name, result)).is_ok()
            }
            Command::LeaveParty { player, reply } => {
                let result = self.encounter.leave_party(player);
                reply.send(self.settle(name, result)).is_ok()
            }
            Command::CreateBattlefield { reply } => {
                let result = self.encounter.create_battlefield();
                reply.send(self.settle(name, result)).is_ok()
            }
            Command::JoinBattlefield {
                member,
                battlefield,
                reply,
            } => {
                let result = self.encounter.join_battlefield(member, battlefield);
                reply.send(self.settle(name, result)).is_ok()
            }
            Command::LeaveBattlefield { member, reply } => {
                let result = self.encounter.leave_battlefield(member);
                reply.send(self.settle(name, result)).is_ok()
            }
            Command::RemoveCharacter { character, reply } => {
                let result = self.encounter.remove_character(character);
                reply.send(self.settle(name, result)).is_ok()
            }
            Command::QueryCharacter { character, reply } => reply
                .send(self.encounter.character(character).cloned())
                .is_ok(),
            Command::QueryHostile { hostile, reply } => reply
                .send(self.encounter.hostile(hostile).map(HostileStatus::from))
                .is_ok(),
            Command::QueryBattlefield { battlefield, reply } => reply
                .send(self.encounter.battlefields().get(battlefield).cloned())
                .is_ok(),
            Command::QueryParty { player, reply } => {
                reply.send(self.encounter.party_of(player)).is_ok()
            }
            Command::QueryClock { reply } => reply.send(self.encounter.clock_ms()).is_ok(),
        };

        if !delivered {
            debug!(target: "runtime::simulation", command = name, "reply channel closed (caller dropped)");
        }
        self.publish_notifications();
    }

    /// Runs one encounter tick and publishes what it produced.
    fn step(&mut self, elapsed_ms: u64) {
        self.encounter.tick(self.oracles.as_game_env(), elapsed_ms);
        self.event_bus
            .publish(Event::Simulation(SimulationEvent::Ticked {
                clock_ms: self.encounter.clock_ms(),
                elapsed_ms,
                characters: self.encounter.characters().len(),
                battlefields: self.encounter.battlefields().len(),
            }));
        self.publish_notifications();
    }

    /// Reports a rejected command on the simulation topic and lifts the error.
    fn settle<T>(&self, command: &str, result: std::result::Result<T, EncounterError>) -> Result<T> {
        if let Err(error) = &result {
            self.event_bus
                .publish(Event::Simulation(SimulationEvent::CommandRejected {
                    command: command.to_owned(),
                    error: error.clone(),
                }));
        }
        result.map_err(Into::into)
    }

    fn publish_notifications(&mut self) {
        let clock_ms = self.encounter.clock_ms();
        for envelope in self.encounter.drain_notifications() {
            self.event_bus
                .publish(Event::Notification(NotificationEvent::new(clock_ms, envelope)));
        }
    }
}
