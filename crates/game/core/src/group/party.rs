use std::collections::BTreeMap;

use crate::error::EncounterError;
use crate::state::{BattlefieldId, CharacterId, IdAllocator, PartyId};

/// Persistent group of players that enter and leave battle together.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Party {
    pub id: PartyId,
    /// A member's index is its priority; removal shifts later members down.
    members: Vec<CharacterId>,
    pub battlefield: Option<BattlefieldId>,
}

impl Party {
    fn new(id: PartyId) -> Self {
        Self {
            id,
            members: Vec::new(),
            battlefield: None,
        }
    }

    pub fn members(&self) -> &[CharacterId] {
        &self.members
    }

    pub fn leader(&self) -> Option<CharacterId> {
        self.members.first().copied()
    }

    pub fn priority_of(&self, player: CharacterId) -> Option<usize> {
        self.members.iter().position(|member| *member == player)
    }

    pub fn contains(&self, player: CharacterId) -> bool {
        self.priority_of(player).is_some()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Owner of every party and of the player → party index.
#[derive(Clone, Debug, Default)]
pub struct PartyRegistry {
    parties: BTreeMap<PartyId, Party>,
    membership: BTreeMap<CharacterId, PartyId>,
    ids: IdAllocator,
}

impl PartyRegistry {
    pub fn new() -> Self {
        Self {
            parties: BTreeMap::new(),
            membership: BTreeMap::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Creates an empty party.
    ///
    /// # Errors
    ///
    /// `IdsExhausted` once every party id has been handed out.
    pub fn create(&mut self) -> Result<PartyId, EncounterError> {
        let id = PartyId(self.ids.allocate().ok_or(EncounterError::IdsExhausted)?);
        self.parties.insert(id, Party::new(id));
        Ok(id)
    }

    pub fn get(&self, id: PartyId) -> Option<&Party> {
        self.parties.get(&id)
    }

    pub fn get_mut(&mut self, id: PartyId) -> Option<&mut Party> {
        self.parties.get_mut(&id)
    }

    pub fn contains(&self, id: PartyId) -> bool {
        self.parties.contains_key(&id)
    }

    pub fn party_of(&self, player: CharacterId) -> Option<PartyId> {
        self.membership.get(&player).copied()
    }

    /// Appends `player` at the lowest priority of `party`.
    ///
    /// # Errors
    ///
    /// - `PartyNotFound` if `party` does not exist
    /// - `AlreadyInParty` if `player` belongs to any party already
    pub fn add(&mut self, party: PartyId, player: CharacterId) -> Result<(), EncounterError> {
        if let Some(current) = self.party_of(player) {
            return Err(EncounterError::AlreadyInParty {
                player,
                party: current,
            });
        }
        let entry = self
            .parties
            .get_mut(&party)
            .ok_or(EncounterError::PartyNotFound(party))?;
        entry.members.push(player);
        self.membership.insert(player, party);
        Ok(())
    }

    /// Removes `player` from `party`, compacting the remaining priorities.
    ///
    /// The party itself is kept even when it becomes empty.
    ///
    /// # Errors
    ///
    /// - `PartyNotFound` if `party` does not exist
    /// - `NotInParty` if `player` is not one of its members
    pub fn remove(&mut self, party: PartyId, player: CharacterId) -> Result<(), EncounterError> {
        let entry = self
            .parties
            .get_mut(&party)
            .ok_or(EncounterError::PartyNotFound(party))?;
        let index = entry
            .priority_of(player)
            .ok_or(EncounterError::NotInParty { player, party })?;
        entry.members.remove(index);
        self.membership.remove(&player);
        Ok(())
    }

    /// Deletes a party along with the membership index of its players.
    pub fn delete(&mut self, party: PartyId) -> Option<Party> {
        let removed = self.parties.remove(&party)?;
        for member in &removed.members {
            self.membership.remove(member);
        }
        Some(removed)
    }

    /// Drops every member for which `keep` is false.
    ///
    /// Returns the ids of parties left without members; they are not deleted.
    pub fn retain_members(&mut self, mut keep: impl FnMut(CharacterId) -> bool) -> Vec<PartyId> {
        let mut emptied = Vec::new();
        for party in self.parties.values_mut() {
            let before = party.members.len();
            party.members.retain(|member| {
                let kept = keep(*member);
                if !kept {
                    self.membership.remove(member);
                }
                kept
            });
            if party.members.is_empty() && before > 0 {
                emptied.push(party.id);
            }
        }
        emptied
    }

    pub fn ids(&self) -> Vec<PartyId> {
        self.parties.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Party> {
        self.parties.values()
    }

    pub fn len(&self) -> usize {
        self.parties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }
}
