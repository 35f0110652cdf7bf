//! Combat orchestrator.
//!
//! [`Encounter`] owns every registry of the simulation and is the only place
//! where characters, brains, parties and battlefields are mutated together.
//! Each public operation runs to completion; a failure leaves the encounter
//! as it was and is returned to the caller.

mod combat;
mod grouping;
mod tick;

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::config::EncounterConfig;
use crate::env::GameEnv;
use crate::error::{EncounterError, ErrorKind};
use crate::group::{BattlefieldRegistry, Member, PartyRegistry};
use crate::hostile::{BrainContext, BrainSignal, HostileBrain};
use crate::math::{Transform, Vec3};
use crate::notify::{Envelope, Notification, Outbox, Recipient};
use crate::state::{
    BattlefieldId, Character, CharacterId, CharacterRegistry, MapId, PartyId, StatBlock, TribeId,
};

/// A running combat simulation.
#[derive(Clone, Debug)]
pub struct Encounter {
    config: EncounterConfig,
    characters: CharacterRegistry,
    hostiles: BTreeMap<CharacterId, HostileBrain>,
    parties: PartyRegistry,
    battlefields: BattlefieldRegistry,
    outbox: Outbox,
    rng: ChaCha8Rng,
    clock_ms: u64,
}

impl Encounter {
    pub fn new(config: EncounterConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        Self {
            config,
            characters: CharacterRegistry::new(),
            hostiles: BTreeMap::new(),
            parties: PartyRegistry::new(),
            battlefields: BattlefieldRegistry::new(),
            outbox: Outbox::new(),
            rng,
            clock_ms: 0,
        }
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    /// Total tick time accumulated so far.
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn characters(&self) -> &CharacterRegistry {
        &self.characters
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id)
    }

    pub fn hostile(&self, id: CharacterId) -> Option<&HostileBrain> {
        self.hostiles.get(&id)
    }

    pub fn hostiles(&self) -> impl Iterator<Item = &HostileBrain> {
        self.hostiles.values()
    }

    pub fn parties(&self) -> &PartyRegistry {
        &self.parties
    }

    pub fn party_of(&self, player: CharacterId) -> Option<PartyId> {
        self.parties.party_of(player)
    }

    pub fn battlefields(&self) -> &BattlefieldRegistry {
        &self.battlefields
    }

    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    /// Takes every notification queued since the last drain.
    pub fn drain_notifications(&mut self) -> Vec<Envelope> {
        self.outbox.drain()
    }

    /// Registers a player in a fresh solo party.
    ///
    /// # Errors
    ///
    /// `IdsExhausted` if no character or party id is left.
    pub fn add_player(
        &mut self,
        map: MapId,
        transform: Transform,
        stats: StatBlock,
    ) -> Result<CharacterId, EncounterError> {
        let party = self.parties.create()?;
        let player = match self
            .characters
            .insert_with(|id| Character::player(id, map, transform, stats))
        {
            Ok(player) => player,
            Err(error) => {
                self.parties.delete(party);
                warn!(target: "encounter::engine", %error, "player registration failed");
                return Err(error);
            }
        };
        // A fresh party cannot already hold the fresh player.
        if let Err(error) = self.parties.add(party, player) {
            warn!(target: "encounter::engine", %player, %error, "solo party setup failed");
        }
        info!(target: "encounter::engine", %player, %party, %map, "player registered");
        Ok(player)
    }

    /// Registers a hostile of `tribe` standing at `position`, which also
    /// becomes its spawn point.
    ///
    /// # Errors
    ///
    /// `TribeNotFound` if the tribe oracle has no such tribe, `IdsExhausted`
    /// if no character id is left.
    pub fn spawn(
        &mut self,
        env: GameEnv<'_>,
        tribe: TribeId,
        map: MapId,
        position: Vec3,
    ) -> Result<CharacterId, EncounterError> {
        let template = env.tribe(tribe).inspect_err(|error| log_rejection("spawn", error))?;
        let stats = template.stats;
        let hostile = self
            .characters
            .insert_with(|id| Character::hostile(id, tribe, map, Transform::at(position), stats))
            .inspect_err(|error| log_rejection("spawn", error))?;
        self.hostiles
            .insert(hostile, HostileBrain::new(hostile, self.config.wander_idle_ms));

        info!(target: "encounter::engine", %hostile, %tribe, %map, "hostile spawned");
        self.announce_alive(hostile);
        Ok(hostile)
    }

    /// Removes a character and every reference to it.
    ///
    /// # Errors
    ///
    /// `CharacterNotFound` if `id` is not registered.
    pub fn remove_character(&mut self, id: CharacterId) -> Result<(), EncounterError> {
        if !self.characters.contains(id) {
            return Err(EncounterError::CharacterNotFound(id));
        }
        self.finalize(id);
        Ok(())
    }

    /// Runs `f` against a hostile's brain with a context borrowing the
    /// encounter, then carries out the signals the brain emitted.
    fn with_brain<R>(
        &mut self,
        env: GameEnv<'_>,
        hostile: CharacterId,
        elapsed_ms: u64,
        f: impl FnOnce(&mut HostileBrain, &mut BrainContext<'_>) -> Result<R, EncounterError>,
    ) -> Result<R, EncounterError> {
        let Some(mut brain) = self.hostiles.remove(&hostile) else {
            return Err(if self.characters.contains(hostile) {
                EncounterError::NotAHostile(hostile)
            } else {
                EncounterError::CharacterNotFound(hostile)
            });
        };

        let mut signals = Vec::new();
        let result = {
            let mut ctx = BrainContext {
                owner: hostile,
                characters: &mut self.characters,
                env,
                config: &self.config,
                rng: &mut self.rng,
                elapsed_ms,
                signals: &mut signals,
            };
            f(&mut brain, &mut ctx)
        };
        self.hostiles.insert(hostile, brain);

        for signal in signals {
            self.handle_signal(env, hostile, signal);
        }
        result
    }

    fn handle_signal(&mut self, env: GameEnv<'_>, hostile: CharacterId, signal: BrainSignal) {
        debug!(target: "encounter::engine", %hostile, ?signal, "brain signal");
        match signal {
            BrainSignal::EnteredBattle => {}
            BrainSignal::LeftBattle | BrainSignal::Died => {
                match self.leave_battlefield(Member::Hostile(hostile)) {
                    Ok(()) | Err(EncounterError::NotInBattlefield(_)) => {}
                    Err(error) => log_rejection("leave battlefield", &error),
                }
            }
            BrainSignal::Respawned => self.announce_alive(hostile),
            BrainSignal::SkillAnnounced { skill, target } => {
                let cast_time_ms = env.skill(skill).map_or(0, |skill| skill.cast_time_ms);
                self.send_near(
                    hostile,
                    Notification::SkillAnnounced {
                        user: hostile,
                        skill,
                        target,
                        cast_time_ms,
                    },
                );
            }
            BrainSignal::CastSkill { skill, target } => {
                if let Err(error) = self.resolve_skill(env, hostile, target, skill) {
                    debug!(
                        target: "encounter::engine",
                        %hostile,
                        %target,
                        %skill,
                        %error,
                        "hostile skill did not resolve"
                    );
                }
            }
        }
    }

    fn announce_alive(&mut self, hostile: CharacterId) {
        let Some(character) = self.characters.get(hostile) else {
            return;
        };
        let Some(tribe) = character.tribe() else {
            return;
        };
        let map = character.map;
        let notification = Notification::TargetAlive {
            character: hostile,
            tribe,
            position: character.position(),
            hit_points: character.pools.hit_points,
            magic_points: character.pools.magic_points,
        };
        self.send(Recipient::Map(map), notification);
    }

    /// Queues `notification` for the players `recipient` resolves to now.
    fn send(&mut self, recipient: Recipient, notification: Notification) {
        let players = self.resolve_recipient(recipient);
        self.outbox.push(Envelope {
            recipient,
            players,
            notification,
        });
    }

    /// Sends to the battlefield of `character`, or to its map outside battle.
    fn send_near(&mut self, character: CharacterId, notification: Notification) {
        let Some(record) = self.characters.get(character) else {
            return;
        };
        let recipient = match record.battlefield {
            Some(battlefield) if self.battlefields.contains(battlefield) => {
                Recipient::Battlefield(battlefield)
            }
            _ => Recipient::Map(record.map),
        };
        self.send(recipient, notification);
    }

    /// Player ids `recipient` currently addresses, in ascending order.
    pub fn resolve_recipient(&self, recipient: Recipient) -> Vec<CharacterId> {
        match recipient {
            Recipient::Player(player) => self
                .characters
                .get(player)
                .filter(|character| character.is_player())
                .map(|character| vec![character.id])
                .unwrap_or_default(),
            Recipient::Map(map) => self
                .characters
                .iter()
                .filter(|character| character.is_player() && character.map == map)
                .map(|character| character.id)
                .collect(),
            Recipient::Battlefield(battlefield) => self.battlefield_players(battlefield),
        }
    }

    fn battlefield_players(&self, battlefield: BattlefieldId) -> Vec<CharacterId> {
        let Some(battlefield) = self.battlefields.get(battlefield) else {
            return Vec::new();
        };
        let mut players: Vec<CharacterId> = battlefield
            .parties()
            .filter_map(|party| self.parties.get(party))
            .flat_map(|party| party.members().iter().copied())
            .filter(|player| self.characters.contains(*player))
            .collect();
        players.sort_unstable();
        players
    }
}

/// Logs a rejected operation at the level its error kind calls for.
fn log_rejection(operation: &'static str, error: &EncounterError) {
    match error.kind() {
        ErrorKind::Lookup => {
            warn!(target: "encounter::engine", operation, %error, "lookup failed");
        }
        ErrorKind::ResourceInsufficiency | ErrorKind::InvariantViolation => {
            debug!(target: "encounter::engine", operation, %error, "operation rejected");
        }
    }
}
