mod common;

use common::*;
use encounter_core::{
    EncounterConfig, Encounter, Env, HostileState, Member, Notification, StateKind, TribeTable,
    Vec3,
};

#[test]
fn hostile_without_aggro_only_wanders() {
    let (skills, tribes) = tables();
    let env = Env::new(&skills, &tribes).as_game_env();
    let mut encounter = encounter();
    let spawn_point = Vec3::new(4.0, 0.0, -2.0);
    let hostile = encounter.spawn(env, CLAWED, MAP, spawn_point).unwrap();
    encounter.drain_notifications();
    let radius = encounter.config().wander_radius;

    // Default idle time is 3000 ms: the first destination is drawn on tick 30.
    for tick in 1..=30 {
        encounter.tick(env, 100);
        let brain = encounter.hostile(hostile).unwrap();
        assert_eq!(brain.kind(), StateKind::Normal, "tick {tick}");
    }
    let HostileState::Normal(wander) = encounter.hostile(hostile).unwrap().state() else {
        panic!("hostile left Normal");
    };
    let destination = wander.destination().expect("destination drawn after idling");
    assert!(destination.distance(spawn_point) <= radius + 1e-4);

    for _ in 0..200 {
        encounter.tick(env, 100);
        assert_eq!(encounter.hostile(hostile).unwrap().kind(), StateKind::Normal);
    }
    assert!(encounter.battlefields().is_empty());
    assert!(encounter.drain_notifications().is_empty());
}

#[test]
fn battle_lasts_exactly_while_aggro_remains() {
    let (skills, tribes) = tables();
    let env = Env::new(&skills, &tribes).as_game_env();
    let mut encounter = encounter();
    let player = strong_player(&mut encounter, Vec3::new(0.0, 0.0, 3.0), 100.0);
    let hostile = encounter.spawn(env, UNARMED, MAP, Vec3::ZERO).unwrap();
    encounter.apply_damage(env, player, hostile, STRIKE).unwrap();

    // About 14.29 hate decaying at 1 per second.
    let mut previous_hate = f32::INFINITY;
    let mut calm_at = None;
    for tick in 1..=200 {
        encounter.tick(env, 100);
        let brain = encounter.hostile(hostile).unwrap();
        match brain.aggro() {
            Some(aggro) => {
                assert_eq!(brain.kind(), StateKind::Battle);
                assert!(!aggro.is_empty());
                let hate = aggro.hate_of(player).unwrap();
                assert!(hate <= previous_hate);
                previous_hate = hate;
            }
            None => {
                assert_eq!(brain.kind(), StateKind::Normal);
                calm_at.get_or_insert(tick);
            }
        }
    }

    let calm_at = calm_at.expect("hate decays away");
    assert!((140..=146).contains(&calm_at), "calmed at tick {calm_at}");
    assert!(encounter.battlefields().is_empty());
}

#[test]
fn killed_hostile_respawns_at_full_health() {
    let (skills, tribes) = tables();
    let env = Env::new(&skills, &tribes).as_game_env();
    let config = EncounterConfig {
        respawn_interval_ms: 2_000,
        ..EncounterConfig::default()
    };
    let mut encounter = Encounter::new(config);
    let spawn_point = Vec3::new(1.0, 0.0, 1.0);
    let player = strong_player(&mut encounter, Vec3::new(1.0, 0.0, 4.0), 10_000.0);
    let hostile = encounter.spawn(env, CLAWED, MAP, spawn_point).unwrap();
    encounter.drain_notifications();

    encounter.apply_damage(env, player, hostile, STRIKE).unwrap();

    assert!(encounter.character(hostile).unwrap().is_dead());
    assert_eq!(encounter.hostile(hostile).unwrap().kind(), StateKind::Dead);
    assert_eq!(encounter.character(hostile).unwrap().battlefield, None);
    let sent = encounter.drain_notifications();
    assert!(sent.iter().any(|envelope| envelope.notification
        == Notification::TargetDied {
            character: hostile,
            killer: Some(player),
        }
        && envelope.players == vec![player]));

    encounter.tick(env, 1_000);
    assert_eq!(encounter.hostile(hostile).unwrap().kind(), StateKind::Dead);
    assert!(encounter.battlefields().is_empty());

    encounter.tick(env, 1_000);
    let brain = encounter.hostile(hostile).unwrap();
    assert_eq!(brain.kind(), StateKind::Normal);
    let character = encounter.character(hostile).unwrap();
    assert!(!character.is_dead());
    assert_eq!(character.pools.hit_points, character.stats.max_hit_points);
    assert_eq!(character.position(), spawn_point);
    assert!(tribes_contains(character.tribe()));

    let sent = encounter.drain_notifications();
    assert!(sent
        .iter()
        .any(|envelope| matches!(envelope.notification, Notification::TargetAlive { character, .. } if character == hostile)));
}

#[test]
fn dead_hostiles_ignore_damage_and_hate() {
    let (skills, tribes) = tables();
    let env = Env::new(&skills, &tribes).as_game_env();
    let mut encounter = encounter();
    let player = strong_player(&mut encounter, Vec3::ZERO, 10_000.0);
    let hostile = encounter.spawn(env, UNARMED, MAP, Vec3::ZERO).unwrap();
    encounter.apply_damage(env, player, hostile, STRIKE).unwrap();

    let again = encounter.apply_damage(env, player, hostile, STRIKE);

    assert_eq!(
        again,
        Err(encounter_core::EncounterError::CharacterDead(hostile))
    );
    assert_eq!(encounter.hostile(hostile).unwrap().kind(), StateKind::Dead);
}

#[test]
fn failing_hostile_is_removed_while_the_tick_goes_on() {
    let (skills, tribes) = tables();
    let env = Env::new(&skills, &tribes).as_game_env();
    let mut encounter = encounter();
    let first = strong_player(&mut encounter, Vec3::new(0.0, 0.0, 3.0), 100.0);
    let second = strong_player(&mut encounter, Vec3::new(20.0, 0.0, 3.0), 100.0);
    let broken = encounter.spawn(env, CLAWED, MAP, Vec3::ZERO).unwrap();
    let healthy = encounter
        .spawn(env, UNARMED, MAP, Vec3::new(20.0, 0.0, 0.0))
        .unwrap();
    encounter.apply_damage(env, first, broken, STRIKE).unwrap();
    encounter.apply_damage(env, second, healthy, STRIKE).unwrap();
    let broken_field = encounter.battlefield_of(Member::Hostile(broken)).unwrap();
    let healthy_field = encounter.battlefield_of(Member::Hostile(healthy)).unwrap();
    assert_ne!(broken_field, healthy_field);

    // The clawed tribe is gone, so its hostile cannot pick a skill.
    let partial: TribeTable = tribes.iter().filter(|t| t.id != CLAWED).cloned().collect();
    let partial_env = Env::new(&skills, &partial).as_game_env();
    encounter.tick(partial_env, 100);

    assert!(encounter.character(broken).is_none());
    assert!(encounter.hostile(broken).is_none());
    assert!(encounter.battlefields().get(broken_field).is_none());
    assert_eq!(encounter.character(first).unwrap().battlefield, None);

    assert_eq!(encounter.hostile(healthy).unwrap().kind(), StateKind::Battle);
    assert_eq!(
        encounter.battlefield_of(Member::Hostile(healthy)),
        Some(healthy_field)
    );
    assert_eq!(encounter.battlefields().len(), 1);
}

fn tribes_contains(tribe: Option<encounter_core::TribeId>) -> bool {
    matches!(tribe, Some(id) if id == CLAWED || id == UNARMED)
}
