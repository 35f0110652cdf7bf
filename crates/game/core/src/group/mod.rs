//! Parties and battlefields.
//!
//! Both registries hold ids only. Back-references (a party's battlefield, a
//! character's battlefield) are kept consistent by the engine, which is the
//! only caller that mutates membership.
mod battlefield;
mod party;

use std::fmt;

pub use battlefield::{Battlefield, BattlefieldRegistry};
pub use party::{Party, PartyRegistry};

use crate::state::{CharacterId, PartyId};

/// Anything that can be a direct member of a battlefield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Member {
    Party(PartyId),
    Hostile(CharacterId),
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Party(party) => write!(f, "{party}"),
            Self::Hostile(hostile) => write!(f, "hostile {hostile}"),
        }
    }
}
