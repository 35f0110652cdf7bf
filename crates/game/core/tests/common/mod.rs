#![allow(dead_code)]

use encounter_core::{
    CharacterId, Encounter, EncounterConfig, MapId, SkillDefinition, SkillId, SkillTable,
    StatBlock, Transform, TribeId, TribeTable, TribeTemplate, Vec3,
};

pub const MAP: MapId = MapId(1);

/// Cost-free strike used by players.
pub const STRIKE: SkillId = SkillId(1);
/// Hostile skill with a cast and a recast time.
pub const CLAW: SkillId = SkillId(2);
/// Skill no default player can afford.
pub const METEOR: SkillId = SkillId(3);
/// Drains magic points only.
pub const HEX: SkillId = SkillId(9);

/// Sturdy tribe casting `CLAW`.
pub const CLAWED: TribeId = TribeId(1);
/// Same stats, no skills.
pub const UNARMED: TribeId = TribeId(2);

pub fn sturdy_stats() -> StatBlock {
    StatBlock {
        max_hit_points: 300.0,
        vitality: 70.0,
        mind: 30.0,
        ..StatBlock::default()
    }
}

pub fn tables() -> (SkillTable, TribeTable) {
    let mut claw = SkillDefinition::physical(CLAW, 10.0, 1.0);
    claw.cast_time_ms = 300;
    claw.recast_time_ms = 500;

    let mut meteor = SkillDefinition::physical(METEOR, 100.0, 1.0);
    meteor.magic_point_cost = 50.0;

    let hex = SkillDefinition {
        base_magical_damage: 5.0,
        intelligence_damage_rate: 1.0,
        ..SkillDefinition::physical(HEX, 0.0, 0.0)
    };

    let skills = [SkillDefinition::physical(STRIKE, 10.0, 1.0), claw, meteor, hex]
        .into_iter()
        .collect();
    let tribes = [
        TribeTemplate {
            id: CLAWED,
            name: "clawed".into(),
            stats: sturdy_stats(),
            skills: vec![CLAW],
        },
        TribeTemplate {
            id: UNARMED,
            name: "unarmed".into(),
            stats: sturdy_stats(),
            skills: Vec::new(),
        },
    ]
    .into_iter()
    .collect();
    (skills, tribes)
}

pub fn strong_player(encounter: &mut Encounter, position: Vec3, strength: f32) -> CharacterId {
    encounter.add_player(
        MAP,
        Transform::at(position),
        StatBlock {
            strength,
            ..StatBlock::default()
        },
    )
    .unwrap()
}

pub fn encounter() -> Encounter {
    Encounter::new(EncounterConfig::default().with_seed(7))
}
