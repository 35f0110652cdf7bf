//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! every encounter operation, plus topic subscriptions on the event bus.
use tokio::sync::{broadcast, mpsc, oneshot};

use encounter_core::{
    Battlefield, BattlefieldId, Character, CharacterId, Damage, MapId, Member, PartyId, SkillId,
    StatBlock, Transform, TribeId, Vec3,
};

use super::errors::{Result, RuntimeError};
use super::types::HostileStatus;
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Sends one command and waits for the worker's reply.
    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Advance the simulation by `elapsed_ms` of tick time.
    ///
    /// Used when the runtime was built without a tick interval, and by tests
    /// that need exact tick boundaries.
    pub async fn tick(&self, elapsed_ms: u64) -> Result<u64> {
        self.request(|reply| Command::Tick { elapsed_ms, reply })
            .await
    }

    pub async fn add_player(
        &self,
        map: MapId,
        transform: Transform,
        stats: StatBlock,
    ) -> Result<CharacterId> {
        self.request(|reply| Command::AddPlayer {
            map,
            transform,
            stats,
            reply,
        })
        .await?
    }

    pub async fn spawn(&self, tribe: TribeId, map: MapId, position: Vec3) -> Result<CharacterId> {
        self.request(|reply| Command::Spawn {
            tribe,
            map,
            position,
            reply,
        })
        .await?
    }

    /// Resolve `skill` from `attacker` against `target`.
    pub async fn apply_damage(
        &self,
        attacker: CharacterId,
        target: CharacterId,
        skill: SkillId,
    ) -> Result<Damage> {
        self.request(|reply| Command::ApplyDamage {
            attacker,
            target,
            skill,
            reply,
        })
        .await?
    }

    pub async fn interrupt(&self, hostile: CharacterId) -> Result<()> {
        self.request(|reply| Command::Interrupt { hostile, reply })
            .await?
    }

    pub async fn join_party(&self, player: CharacterId, party: PartyId) -> Result<()> {
        self.request(|reply| Command::JoinParty {
            player,
            party,
            reply,
        })
        .await?
    }

    /// Move `player` out of its party; returns the new solo party.
    pub async fn leave_party(&self, player: CharacterId) -> Result<PartyId> {
        self.request(|reply| Command::LeaveParty { player, reply })
            .await?
    }

    pub async fn create_battlefield(&self) -> Result<BattlefieldId> {
        self.request(|reply| Command::CreateBattlefield { reply })
            .await?
    }

    pub async fn join_battlefield(&self, member: Member, battlefield: BattlefieldId) -> Result<()> {
        self.request(|reply| Command::JoinBattlefield {
            member,
            battlefield,
            reply,
        })
        .await?
    }

    pub async fn leave_battlefield(&self, member: Member) -> Result<()> {
        self.request(|reply| Command::LeaveBattlefield { member, reply })
            .await?
    }

    pub async fn remove_character(&self, character: CharacterId) -> Result<()> {
        self.request(|reply| Command::RemoveCharacter { character, reply })
            .await?
    }

    /// Snapshot of one character record.
    pub async fn query_character(&self, character: CharacterId) -> Result<Option<Character>> {
        self.request(|reply| Command::QueryCharacter { character, reply })
            .await
    }

    pub async fn query_hostile(&self, hostile: CharacterId) -> Result<Option<HostileStatus>> {
        self.request(|reply| Command::QueryHostile { hostile, reply })
            .await
    }

    pub async fn query_battlefield(
        &self,
        battlefield: BattlefieldId,
    ) -> Result<Option<Battlefield>> {
        self.request(|reply| Command::QueryBattlefield { battlefield, reply })
            .await
    }

    pub async fn party_of(&self, player: CharacterId) -> Result<Option<PartyId>> {
        self.request(|reply| Command::QueryParty { player, reply })
            .await
    }

    /// Total tick time the simulation has accumulated.
    pub async fn clock_ms(&self) -> Result<u64> {
        self.request(|reply| Command::QueryClock { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Notification` - Player-facing notifications with resolved recipients
    /// - `Topic::Simulation` - Tick progress and rejected commands
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut rx = handle.subscribe(Topic::Notification);
    /// while let Ok(event) = rx.recv().await {
    ///     // Deliver to event.players
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
