use std::collections::{BTreeMap, BTreeSet};

use super::Member;
use crate::error::EncounterError;
use crate::state::{BattlefieldId, CharacterId, IdAllocator, PartyId};

/// One fight: the parties and hostiles engaged in it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battlefield {
    pub id: BattlefieldId,
    parties: BTreeSet<PartyId>,
    hostiles: BTreeSet<CharacterId>,
}

impl Battlefield {
    fn new(id: BattlefieldId) -> Self {
        Self {
            id,
            parties: BTreeSet::new(),
            hostiles: BTreeSet::new(),
        }
    }

    pub fn parties(&self) -> impl Iterator<Item = PartyId> + '_ {
        self.parties.iter().copied()
    }

    pub fn hostiles(&self) -> impl Iterator<Item = CharacterId> + '_ {
        self.hostiles.iter().copied()
    }

    /// Parties first, then hostiles, each in ascending id order.
    pub fn members(&self) -> Vec<Member> {
        self.parties
            .iter()
            .map(|party| Member::Party(*party))
            .chain(self.hostiles.iter().map(|hostile| Member::Hostile(*hostile)))
            .collect()
    }

    pub fn contains(&self, member: Member) -> bool {
        match member {
            Member::Party(party) => self.parties.contains(&party),
            Member::Hostile(hostile) => self.hostiles.contains(&hostile),
        }
    }

    /// Returns false if `member` was already present.
    pub fn insert(&mut self, member: Member) -> bool {
        match member {
            Member::Party(party) => self.parties.insert(party),
            Member::Hostile(hostile) => self.hostiles.insert(hostile),
        }
    }

    /// Returns false if `member` was not present.
    pub fn remove(&mut self, member: Member) -> bool {
        match member {
            Member::Party(party) => self.parties.remove(&party),
            Member::Hostile(hostile) => self.hostiles.remove(&hostile),
        }
    }

    /// A fight needs at least one party and one hostile to continue.
    pub fn is_reapable(&self) -> bool {
        self.parties.is_empty() || self.hostiles.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty() && self.hostiles.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct BattlefieldRegistry {
    battlefields: BTreeMap<BattlefieldId, Battlefield>,
    ids: IdAllocator,
}

impl BattlefieldRegistry {
    pub fn new() -> Self {
        Self {
            battlefields: BTreeMap::new(),
            ids: IdAllocator::new(),
        }
    }

    /// # Errors
    ///
    /// `IdsExhausted` once every battlefield id has been handed out.
    pub fn create(&mut self) -> Result<BattlefieldId, EncounterError> {
        let id = BattlefieldId(self.ids.allocate().ok_or(EncounterError::IdsExhausted)?);
        self.battlefields.insert(id, Battlefield::new(id));
        Ok(id)
    }

    pub fn get(&self, id: BattlefieldId) -> Option<&Battlefield> {
        self.battlefields.get(&id)
    }

    pub fn get_mut(&mut self, id: BattlefieldId) -> Option<&mut Battlefield> {
        self.battlefields.get_mut(&id)
    }

    pub fn contains(&self, id: BattlefieldId) -> bool {
        self.battlefields.contains_key(&id)
    }

    pub fn remove(&mut self, id: BattlefieldId) -> Option<Battlefield> {
        self.battlefields.remove(&id)
    }

    /// Ids of battlefields missing either side.
    pub fn reapable(&self) -> Vec<BattlefieldId> {
        self.battlefields
            .values()
            .filter(|battlefield| battlefield.is_reapable())
            .map(|battlefield| battlefield.id)
            .collect()
    }

    pub fn ids(&self) -> Vec<BattlefieldId> {
        self.battlefields.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Battlefield> {
        self.battlefields.values()
    }

    pub fn len(&self) -> usize {
        self.battlefields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.battlefields.is_empty()
    }
}
