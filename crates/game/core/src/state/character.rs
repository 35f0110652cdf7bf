//! Character records shared by players and hostiles.

use glam::Vec3;

use super::ids::{BattlefieldId, CharacterId, MapId, TribeId};
use crate::math::Transform;

/// Combat statistics of a character.
///
/// Players are registered with an explicit block; hostiles copy theirs from
/// the tribe template they were populated with.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub max_hit_points: f32,
    pub max_magic_points: f32,
    pub strength: f32,
    pub intelligence: f32,
    pub vitality: f32,
    pub mind: f32,
    /// Units per second.
    pub move_speed: f32,
    /// Radians per second.
    pub turn_rate: f32,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self {
            max_hit_points: 100.0,
            max_magic_points: 50.0,
            strength: 10.0,
            intelligence: 10.0,
            vitality: 10.0,
            mind: 10.0,
            move_speed: 3.0,
            turn_rate: std::f32::consts::PI,
        }
    }
}

/// Current hit and magic points.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pools {
    pub hit_points: f32,
    pub magic_points: f32,
}

impl Pools {
    pub const fn new(hit_points: f32, magic_points: f32) -> Self {
        Self {
            hit_points,
            magic_points,
        }
    }

    /// Pools filled to the maximums of `stats`.
    pub const fn full(stats: &StatBlock) -> Self {
        Self::new(stats.max_hit_points, stats.max_magic_points)
    }

    /// Clamps both pools into `[0, max]`.
    pub fn clamp_to(&mut self, stats: &StatBlock) {
        self.hit_points = self.hit_points.clamp(0.0, stats.max_hit_points.max(0.0));
        self.magic_points = self.magic_points.clamp(0.0, stats.max_magic_points.max(0.0));
    }
}

/// Player- or hostile-specific character data.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterKind {
    Player,
    Hostile {
        tribe: TribeId,
        /// Point the hostile wanders around and respawns at.
        spawn_point: Vec3,
    },
}

/// A registered combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: CharacterId,
    pub kind: CharacterKind,
    pub map: MapId,
    /// Battlefield this character currently fights in.
    pub battlefield: Option<BattlefieldId>,
    pub transform: Transform,
    pub stats: StatBlock,
    pub pools: Pools,
}

impl Character {
    pub fn player(id: CharacterId, map: MapId, transform: Transform, stats: StatBlock) -> Self {
        Self {
            id,
            kind: CharacterKind::Player,
            map,
            battlefield: None,
            transform,
            stats,
            pools: Pools::full(&stats),
        }
    }

    pub fn hostile(
        id: CharacterId,
        tribe: TribeId,
        map: MapId,
        transform: Transform,
        stats: StatBlock,
    ) -> Self {
        Self {
            id,
            kind: CharacterKind::Hostile {
                tribe,
                spawn_point: transform.position,
            },
            map,
            battlefield: None,
            transform,
            stats,
            pools: Pools::full(&stats),
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.pools.hit_points <= 0.0
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        matches!(self.kind, CharacterKind::Player)
    }

    #[inline]
    pub fn is_hostile(&self) -> bool {
        matches!(self.kind, CharacterKind::Hostile { .. })
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn tribe(&self) -> Option<TribeId> {
        match self.kind {
            CharacterKind::Hostile { tribe, .. } => Some(tribe),
            CharacterKind::Player => None,
        }
    }

    pub fn spawn_point(&self) -> Option<Vec3> {
        match self.kind {
            CharacterKind::Hostile { spawn_point, .. } => Some(spawn_point),
            CharacterKind::Player => None,
        }
    }
}
