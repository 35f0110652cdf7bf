//! Outbound notifications produced by the engine.
//!
//! The engine performs no I/O. Every message is addressed and resolved to
//! concrete player ids when it is queued, then left in the [`Outbox`] for the
//! runtime to drain and deliver.

use glam::Vec3;

use crate::error::ErrorKind;
use crate::state::{BattlefieldId, CharacterId, MapId, SkillId, TribeId};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Notification {
    /// A hostile started casting.
    SkillAnnounced {
        user: CharacterId,
        skill: SkillId,
        target: Option<CharacterId>,
        cast_time_ms: u64,
    },
    /// A requested skill use did not resolve.
    SkillFailed {
        user: CharacterId,
        skill: SkillId,
        kind: ErrorKind,
        code: String,
    },
    /// A hostile appeared or respawned.
    TargetAlive {
        character: CharacterId,
        tribe: TribeId,
        position: Vec3,
        hit_points: f32,
        magic_points: f32,
    },
    /// A character's pools changed after taking damage.
    TargetUpdated {
        character: CharacterId,
        attacker: CharacterId,
        skill: SkillId,
        hit_point_damage: f32,
        magic_point_damage: f32,
        hit_points: f32,
        magic_points: f32,
    },
    TargetDied {
        character: CharacterId,
        killer: Option<CharacterId>,
    },
}

/// Addressing scope of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Recipient {
    Player(CharacterId),
    Map(MapId),
    Battlefield(BattlefieldId),
}

/// A notification with the players it resolved to at send time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Envelope {
    pub recipient: Recipient,
    pub players: Vec<CharacterId>,
    pub notification: Notification,
}

#[derive(Clone, Debug, Default)]
pub struct Outbox {
    queue: Vec<Envelope>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, envelope: Envelope) {
        self.queue.push(envelope);
    }

    /// Takes every queued envelope in send order.
    pub fn drain(&mut self) -> Vec<Envelope> {
        std::mem::take(&mut self.queue)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Envelope> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
