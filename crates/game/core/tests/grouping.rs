mod common;

use common::*;
use encounter_core::{EncounterError, Env, Member, StateKind, Vec3};

#[test]
fn separate_fights_merge_when_a_player_strikes_the_other_hostile() {
    let (skills, tribes) = tables();
    let env = Env::new(&skills, &tribes).as_game_env();
    let mut encounter = encounter();
    let first = strong_player(&mut encounter, Vec3::new(0.0, 0.0, 2.0), 100.0);
    let second = strong_player(&mut encounter, Vec3::new(10.0, 0.0, 2.0), 100.0);
    let first_hostile = encounter.spawn(env, UNARMED, MAP, Vec3::ZERO).unwrap();
    let second_hostile = encounter
        .spawn(env, UNARMED, MAP, Vec3::new(10.0, 0.0, 0.0))
        .unwrap();

    encounter.apply_damage(env, first, first_hostile, STRIKE).unwrap();
    encounter.apply_damage(env, second, second_hostile, STRIKE).unwrap();
    let source = encounter.battlefield_of(Member::Hostile(first_hostile)).unwrap();
    let target = encounter.battlefield_of(Member::Hostile(second_hostile)).unwrap();
    assert_ne!(source, target);

    encounter.apply_damage(env, first, second_hostile, STRIKE).unwrap();

    assert!(encounter.battlefields().get(source).is_none());
    let merged = encounter.battlefields().get(target).unwrap();
    let first_party = encounter.party_of(first).unwrap();
    let second_party = encounter.party_of(second).unwrap();
    for member in [
        Member::Party(first_party),
        Member::Party(second_party),
        Member::Hostile(first_hostile),
        Member::Hostile(second_hostile),
    ] {
        assert!(merged.contains(member), "{member} should be merged");
        assert_eq!(encounter.battlefield_of(member), Some(target));
    }
    for player in [first, second] {
        assert_eq!(encounter.character(player).unwrap().battlefield, Some(target));
    }
    assert_eq!(encounter.battlefields().len(), 1);
}

#[test]
fn hit_without_hit_point_damage_starts_no_fight() {
    let (skills, tribes) = tables();
    let env = Env::new(&skills, &tribes).as_game_env();
    let mut encounter = encounter();
    let player = strong_player(&mut encounter, Vec3::new(0.0, 0.0, 2.0), 100.0);
    let hostile = encounter.spawn(env, UNARMED, MAP, Vec3::ZERO).unwrap();
    let party = encounter.party_of(player).unwrap();

    let damage = encounter.apply_damage(env, player, hostile, HEX).unwrap();

    assert_eq!(damage.hit_points, 0.0);
    assert_eq!(encounter.hostile(hostile).unwrap().kind(), StateKind::Normal);
    assert_eq!(encounter.battlefield_of(Member::Hostile(hostile)), None);
    assert_eq!(encounter.battlefield_of(Member::Party(party)), None);
    assert_eq!(encounter.character(player).unwrap().battlefield, None);
    assert!(encounter.battlefields().is_empty());

    for _ in 0..1000 {
        encounter.tick(env, 100);
    }
    assert!(encounter.battlefields().is_empty());
    assert_eq!(encounter.hostile(hostile).unwrap().kind(), StateKind::Normal);
}

#[test]
fn joining_an_occupied_member_migrates_its_whole_battlefield() {
    let (skills, tribes) = tables();
    let env = Env::new(&skills, &tribes).as_game_env();
    let mut encounter = encounter();
    let player = strong_player(&mut encounter, Vec3::ZERO, 100.0);
    let hostile = encounter.spawn(env, UNARMED, MAP, Vec3::ZERO).unwrap();
    let party = encounter.party_of(player).unwrap();

    let source = encounter.create_battlefield().unwrap();
    let target = encounter.create_battlefield().unwrap();
    encounter.join_battlefield(Member::Party(party), source).unwrap();
    encounter.join_battlefield(Member::Hostile(hostile), source).unwrap();

    assert_eq!(
        encounter.join_battlefield(Member::Party(party), source),
        Err(EncounterError::AlreadyInBattlefield {
            member: Member::Party(party),
            battlefield: source,
        })
    );

    encounter.join_battlefield(Member::Hostile(hostile), target).unwrap();

    assert!(encounter.battlefields().get(source).is_none());
    assert_eq!(encounter.battlefield_of(Member::Party(party)), Some(target));
    assert_eq!(encounter.battlefield_of(Member::Hostile(hostile)), Some(target));
}

#[test]
fn join_rejects_stale_and_mistyped_members() {
    let (skills, tribes) = tables();
    let env = Env::new(&skills, &tribes).as_game_env();
    let mut encounter = encounter();
    let player = strong_player(&mut encounter, Vec3::ZERO, 100.0);
    let battlefield = encounter.create_battlefield().unwrap();

    assert_eq!(
        encounter.join_battlefield(Member::Hostile(player), battlefield),
        Err(EncounterError::NotAHostile(player))
    );
    let hostile = encounter.spawn(env, UNARMED, MAP, Vec3::ZERO).unwrap();
    encounter.remove_character(hostile).unwrap();
    assert_eq!(
        encounter.join_battlefield(Member::Hostile(hostile), battlefield),
        Err(EncounterError::CharacterNotFound(hostile))
    );
}

#[test]
fn one_sided_battlefields_are_reaped_on_tick() {
    let (skills, tribes) = tables();
    let env = Env::new(&skills, &tribes).as_game_env();
    let mut encounter = encounter();
    let player = strong_player(&mut encounter, Vec3::ZERO, 100.0);
    let party = encounter.party_of(player).unwrap();
    let empty = encounter.create_battlefield().unwrap();
    let parties_only = encounter.create_battlefield().unwrap();
    encounter.join_battlefield(Member::Party(party), parties_only).unwrap();

    encounter.tick(env, 100);

    assert!(encounter.battlefields().is_empty());
    assert!(encounter.battlefields().get(empty).is_none());
    assert_eq!(encounter.battlefield_of(Member::Party(party)), None);
    assert_eq!(encounter.character(player).unwrap().battlefield, None);
    assert!(encounter.parties().get(party).is_some(), "parties survive reaping");
}

#[test]
fn leaving_party_drops_its_aggro_and_ends_the_fight() {
    let (skills, tribes) = tables();
    let env = Env::new(&skills, &tribes).as_game_env();
    let mut encounter = encounter();
    let player = strong_player(&mut encounter, Vec3::new(0.0, 0.0, 2.0), 100.0);
    let hostile = encounter.spawn(env, UNARMED, MAP, Vec3::ZERO).unwrap();
    encounter.apply_damage(env, player, hostile, STRIKE).unwrap();
    let party = encounter.party_of(player).unwrap();

    encounter.leave_battlefield(Member::Party(party)).unwrap();

    let brain = encounter.hostile(hostile).unwrap();
    assert!(brain.aggro().unwrap().is_empty());
    assert_eq!(
        encounter.leave_battlefield(Member::Party(party)),
        Err(EncounterError::NotInBattlefield(Member::Party(party)))
    );

    encounter.tick(env, 100);
    assert_eq!(encounter.hostile(hostile).unwrap().kind(), StateKind::Normal);
    assert!(encounter.battlefields().is_empty());
    assert_eq!(encounter.character(hostile).unwrap().battlefield, None);
}

#[test]
fn party_priorities_follow_joins_and_leaves() {
    let mut encounter = encounter();
    let leader = strong_player(&mut encounter, Vec3::ZERO, 10.0);
    let second = strong_player(&mut encounter, Vec3::ZERO, 10.0);
    let third = strong_player(&mut encounter, Vec3::ZERO, 10.0);
    let party = encounter.party_of(leader).unwrap();
    let second_solo = encounter.party_of(second).unwrap();

    encounter.join_party(second, party).unwrap();
    encounter.join_party(third, party).unwrap();
    assert!(
        encounter.parties().get(second_solo).is_none(),
        "emptied solo party is deleted"
    );
    assert_eq!(
        encounter.join_party(third, party),
        Err(EncounterError::AlreadyInParty {
            player: third,
            party
        })
    );

    let solo = encounter.leave_party(second).unwrap();
    let members = encounter.parties().get(party).unwrap().members().to_vec();
    assert_eq!(members, vec![leader, third]);
    assert_eq!(encounter.party_of(second), Some(solo));
    assert_eq!(
        encounter.leave_party(second),
        Err(EncounterError::AlreadySolo {
            player: second,
            party: solo
        })
    );
}

#[test]
fn removed_players_are_swept_from_their_party() {
    let mut encounter = encounter();
    let leader = strong_player(&mut encounter, Vec3::ZERO, 10.0);
    let follower = strong_player(&mut encounter, Vec3::ZERO, 10.0);
    let party = encounter.party_of(leader).unwrap();
    encounter.join_party(follower, party).unwrap();

    encounter.remove_character(leader).unwrap();

    let remaining = encounter.parties().get(party).unwrap();
    assert_eq!(remaining.members(), &[follower]);
    assert_eq!(remaining.priority_of(follower), Some(0));

    encounter.remove_character(follower).unwrap();
    assert!(encounter.parties().get(party).is_none());
}
