//! Party and battlefield membership.

use tracing::{debug, info};

use super::{Encounter, log_rejection};
use crate::env::GameEnv;
use crate::error::EncounterError;
use crate::group::Member;
use crate::hostile::StateKind;
use crate::state::{BattlefieldId, CharacterId, PartyId};

impl Encounter {
    /// Creates an empty battlefield.
    ///
    /// It is reaped by the next tick unless it gains a party and a hostile.
    ///
    /// # Errors
    ///
    /// `IdsExhausted` if no battlefield id is left.
    pub fn create_battlefield(&mut self) -> Result<BattlefieldId, EncounterError> {
        let battlefield = self
            .battlefields
            .create()
            .inspect_err(|error| log_rejection("create battlefield", error))?;
        debug!(target: "encounter::grouping", %battlefield, "battlefield created");
        Ok(battlefield)
    }

    /// Battlefield `member` currently fights in.
    pub fn battlefield_of(&self, member: Member) -> Option<BattlefieldId> {
        match member {
            Member::Party(party) => self.parties.get(party)?.battlefield,
            Member::Hostile(hostile) => self.characters.get(hostile)?.battlefield,
        }
    }

    /// Battlefield member standing for `character`: its party for a
    /// player, itself for a hostile.
    pub fn member_of(&self, character: CharacterId) -> Result<Member, EncounterError> {
        let record = self
            .characters
            .get(character)
            .ok_or(EncounterError::CharacterNotFound(character))?;
        if record.is_hostile() {
            return Ok(Member::Hostile(character));
        }
        self.parties
            .party_of(character)
            .map(Member::Party)
            .ok_or(EncounterError::NotAPlayer(character))
    }

    /// Adds `member` to `battlefield`.
    ///
    /// A member already fighting elsewhere brings its whole battlefield
    /// along: every party and hostile of the source moves into `battlefield`
    /// and the source is deleted.
    ///
    /// # Errors
    ///
    /// - `BattlefieldNotFound`, `PartyNotFound` or `CharacterNotFound` on stale ids
    /// - `NotAHostile` if a `Member::Hostile` names a player
    /// - `AlreadyInBattlefield` if `member` is already in `battlefield`
    pub fn join_battlefield(
        &mut self,
        member: Member,
        battlefield: BattlefieldId,
    ) -> Result<(), EncounterError> {
        self.try_join_battlefield(member, battlefield)
            .inspect_err(|error| log_rejection("join battlefield", error))
    }

    fn try_join_battlefield(
        &mut self,
        member: Member,
        battlefield: BattlefieldId,
    ) -> Result<(), EncounterError> {
        if !self.battlefields.contains(battlefield) {
            return Err(EncounterError::BattlefieldNotFound(battlefield));
        }
        self.validate_member(member)?;

        match self.battlefield_of(member) {
            Some(current) if current == battlefield => Err(EncounterError::AlreadyInBattlefield {
                member,
                battlefield,
            }),
            Some(current) => {
                self.merge_battlefields(current, battlefield);
                Ok(())
            }
            None => {
                self.attach(member, battlefield);
                Ok(())
            }
        }
    }

    /// Removes `member` from its battlefield.
    ///
    /// A leaving party takes its players out of the aggro of every hostile
    /// left behind.
    ///
    /// # Errors
    ///
    /// `NotInBattlefield` if `member` is not fighting anywhere.
    pub fn leave_battlefield(&mut self, member: Member) -> Result<(), EncounterError> {
        let battlefield = self
            .battlefield_of(member)
            .ok_or(EncounterError::NotInBattlefield(member))?;

        if let Some(entry) = self.battlefields.get_mut(battlefield) {
            entry.remove(member);
        }
        self.set_battlefield(member, None);

        if let Member::Party(party) = member {
            let players = self
                .parties
                .get(party)
                .map(|party| party.members().to_vec())
                .unwrap_or_default();
            self.forget_players(battlefield, &players);
        }
        debug!(target: "encounter::grouping", %member, %battlefield, "left battlefield");
        Ok(())
    }

    /// Moves `player` into `party`.
    ///
    /// The player's previous party is deleted once it has no members left.
    ///
    /// # Errors
    ///
    /// - `CharacterNotFound` or `PartyNotFound` on stale ids
    /// - `NotAPlayer` if `player` is a hostile
    /// - `AlreadyInParty` if `player` is already a member of `party`
    pub fn join_party(&mut self, player: CharacterId, party: PartyId) -> Result<(), EncounterError> {
        self.try_join_party(player, party)
            .inspect_err(|error| log_rejection("join party", error))
    }

    fn try_join_party(&mut self, player: CharacterId, party: PartyId) -> Result<(), EncounterError> {
        self.validate_player(player)?;
        if !self.parties.contains(party) {
            return Err(EncounterError::PartyNotFound(party));
        }
        if self.parties.party_of(player) == Some(party) {
            return Err(EncounterError::AlreadyInParty { player, party });
        }

        self.detach_from_party(player)?;
        self.parties.add(party, player)?;
        let battlefield = self.parties.get(party).and_then(|party| party.battlefield);
        if let Some(character) = self.characters.get_mut(player) {
            character.battlefield = battlefield;
        }
        info!(target: "encounter::grouping", %player, %party, "joined party");
        Ok(())
    }

    /// Moves `player` out of its party into a fresh solo party.
    ///
    /// # Errors
    ///
    /// - `CharacterNotFound` / `NotAPlayer` for an unknown id or a hostile
    /// - `AlreadySolo` if the player is already alone in its party
    pub fn leave_party(&mut self, player: CharacterId) -> Result<PartyId, EncounterError> {
        self.try_leave_party(player)
            .inspect_err(|error| log_rejection("leave party", error))
    }

    fn try_leave_party(&mut self, player: CharacterId) -> Result<PartyId, EncounterError> {
        self.validate_player(player)?;
        if let Some(current) = self.parties.party_of(player) {
            if self.parties.get(current).is_some_and(|party| party.len() == 1) {
                return Err(EncounterError::AlreadySolo {
                    player,
                    party: current,
                });
            }
        }

        let solo = self.parties.create()?;
        if let Err(error) = self.detach_from_party(player) {
            self.parties.delete(solo);
            return Err(error);
        }
        self.parties.add(solo, player)?;
        if let Some(character) = self.characters.get_mut(player) {
            character.battlefield = None;
        }
        info!(target: "encounter::grouping", %player, party = %solo, "left party");
        Ok(solo)
    }

    /// Places the two sides of a player/hostile skill use in one battlefield.
    ///
    /// Player/player and hostile/hostile pairs are left alone, and so is a
    /// pair whose hostile is not in Battle after the hit.
    pub(super) fn engage(
        &mut self,
        attacker: CharacterId,
        receiver: CharacterId,
    ) -> Result<(), EncounterError> {
        let attacking = self.member_of(attacker)?;
        let receiving = self.member_of(receiver)?;
        let hostile = match (attacking, receiving) {
            (Member::Hostile(hostile), Member::Party(_))
            | (Member::Party(_), Member::Hostile(hostile)) => hostile,
            _ => return Ok(()),
        };
        if !self
            .hostiles
            .get(&hostile)
            .is_some_and(|brain| brain.kind() == StateKind::Battle)
        {
            debug!(target: "encounter::grouping", %hostile, "hostile not in battle, no engagement");
            return Ok(());
        }

        match (self.battlefield_of(attacking), self.battlefield_of(receiving)) {
            (None, None) => {
                let battlefield = self.create_battlefield()?;
                self.attach(attacking, battlefield);
                self.attach(receiving, battlefield);
            }
            (Some(battlefield), None) => self.attach(receiving, battlefield),
            (None, Some(battlefield)) => self.attach(attacking, battlefield),
            (Some(source), Some(target)) if source != target => {
                self.merge_battlefields(source, target);
            }
            (Some(_), Some(_)) => {}
        }
        Ok(())
    }

    /// Deletes empty parties left behind by removed players.
    pub(super) fn cleanup_parties(&mut self) {
        let characters = &self.characters;
        let emptied = self
            .parties
            .retain_members(|player| characters.contains(player));
        for party in emptied {
            self.delete_party(party);
        }
    }

    /// Reaps battlefields missing either side and returns their surviving
    /// hostiles to Normal.
    pub(super) fn cleanup_battlefields(&mut self, env: GameEnv<'_>) {
        for battlefield in self.battlefields.reapable() {
            let Some(removed) = self.battlefields.remove(battlefield) else {
                continue;
            };
            for member in removed.members() {
                self.set_battlefield(member, None);
                if let Member::Hostile(hostile) = member {
                    if let Err(error) =
                        self.with_brain(env, hostile, 0, |brain, ctx| {
                            brain.disengage(ctx);
                            Ok(())
                        })
                    {
                        log_rejection("disengage", &error);
                    }
                }
            }
            debug!(target: "encounter::grouping", %battlefield, "battlefield reaped");
        }
    }

    /// Removes `player` from its party, deleting the party if it empties.
    pub(super) fn detach_from_party(&mut self, player: CharacterId) -> Result<(), EncounterError> {
        let Some(party) = self.parties.party_of(player) else {
            return Ok(());
        };
        let battlefield = self.parties.get(party).and_then(|party| party.battlefield);
        self.parties.remove(party, player)?;
        if let Some(battlefield) = battlefield {
            self.forget_players(battlefield, &[player]);
        }
        if self.parties.get(party).is_some_and(|party| party.is_empty()) {
            self.delete_party(party);
        }
        Ok(())
    }

    fn delete_party(&mut self, party: PartyId) {
        let Some(removed) = self.parties.delete(party) else {
            return;
        };
        if let Some(battlefield) = removed.battlefield {
            if let Some(entry) = self.battlefields.get_mut(battlefield) {
                entry.remove(Member::Party(party));
            }
        }
        debug!(target: "encounter::grouping", %party, "party deleted");
    }

    /// Moves every member of `source` into `target` and deletes `source`.
    fn merge_battlefields(&mut self, source: BattlefieldId, target: BattlefieldId) {
        let Some(removed) = self.battlefields.remove(source) else {
            return;
        };
        let members = removed.members();
        for member in &members {
            self.attach(*member, target);
        }
        info!(
            target: "encounter::grouping",
            %source,
            %target,
            moved = members.len(),
            "battlefields merged"
        );
    }

    fn attach(&mut self, member: Member, battlefield: BattlefieldId) {
        if let Some(entry) = self.battlefields.get_mut(battlefield) {
            entry.insert(member);
            self.set_battlefield(member, Some(battlefield));
        }
    }

    /// Writes the back-reference of `member` and, for a party, of its players.
    fn set_battlefield(&mut self, member: Member, battlefield: Option<BattlefieldId>) {
        match member {
            Member::Party(party) => {
                let Some(entry) = self.parties.get_mut(party) else {
                    return;
                };
                entry.battlefield = battlefield;
                for player in entry.members() {
                    if let Some(character) = self.characters.get_mut(*player) {
                        character.battlefield = battlefield;
                    }
                }
            }
            Member::Hostile(hostile) => {
                if let Some(character) = self.characters.get_mut(hostile) {
                    character.battlefield = battlefield;
                }
            }
        }
    }

    fn forget_players(&mut self, battlefield: BattlefieldId, players: &[CharacterId]) {
        let hostiles: Vec<CharacterId> = self
            .battlefields
            .get(battlefield)
            .map(|entry| entry.hostiles().collect())
            .unwrap_or_default();
        for hostile in hostiles {
            if let Some(brain) = self.hostiles.get_mut(&hostile) {
                for player in players {
                    brain.forget(*player);
                }
            }
        }
    }

    fn validate_member(&self, member: Member) -> Result<(), EncounterError> {
        match member {
            Member::Party(party) if !self.parties.contains(party) => {
                Err(EncounterError::PartyNotFound(party))
            }
            Member::Party(_) => Ok(()),
            Member::Hostile(hostile) => {
                let character = self
                    .characters
                    .get(hostile)
                    .ok_or(EncounterError::CharacterNotFound(hostile))?;
                if character.is_hostile() {
                    Ok(())
                } else {
                    Err(EncounterError::NotAHostile(hostile))
                }
            }
        }
    }

    fn validate_player(&self, player: CharacterId) -> Result<(), EncounterError> {
        let character = self
            .characters
            .get(player)
            .ok_or(EncounterError::CharacterNotFound(player))?;
        if character.is_player() {
            Ok(())
        } else {
            Err(EncounterError::NotAPlayer(player))
        }
    }
}
