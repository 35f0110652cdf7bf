//! Error infrastructure for encounter-core.
//!
//! Every failure in the engine is local: the triggering operation becomes a
//! no-op and the error is returned to the caller, never escalated. Errors are
//! grouped by [`ErrorKind`] so handlers can tell a stale reference from an
//! unaffordable skill or a duplicate message.

use crate::state::{BattlefieldId, CharacterId, PartyId, SkillId, TribeId};

/// Severity level of an error, used for logging priorities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the same request may succeed later.
    ///
    /// Examples: not enough magic points yet.
    Recoverable,

    /// Invalid input that should not be retried unchanged.
    ///
    /// Examples: unknown character id, re-adding a party member.
    Validation,

    /// Unexpected state inconsistency that indicates a bug.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Error taxonomy of the combat engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// A referenced character, skill, tribe, party or battlefield is missing.
    Lookup,
    /// The user cannot pay a skill's cost.
    ResourceInsufficiency,
    /// The request would break a grouping invariant (duplicate join, wrong kind).
    InvariantViolation,
}

/// Common trait for encounter errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for metrics and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Failure reported by any engine operation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterError {
    #[error("character {0} not found")]
    CharacterNotFound(CharacterId),

    #[error("skill {0} not found")]
    SkillNotFound(SkillId),

    #[error("tribe {0} not found")]
    TribeNotFound(TribeId),

    #[error("{0} not found")]
    PartyNotFound(PartyId),

    #[error("{0} not found")]
    BattlefieldNotFound(BattlefieldId),

    #[error("no tribes available to populate a hostile")]
    NoTribes,

    #[error(
        "character {character} cannot afford {skill} (hp {hit_points:.2}, mp {magic_points:.2})"
    )]
    InsufficientResources {
        character: CharacterId,
        skill: SkillId,
        hit_points: f32,
        magic_points: f32,
    },

    #[error("character {0} is dead")]
    CharacterDead(CharacterId),

    #[error("character {0} is not a player")]
    NotAPlayer(CharacterId),

    #[error("character {0} is not a hostile")]
    NotAHostile(CharacterId),

    #[error("{member} is already in {battlefield}")]
    AlreadyInBattlefield {
        member: crate::group::Member,
        battlefield: BattlefieldId,
    },

    #[error("{0} is not in any battlefield")]
    NotInBattlefield(crate::group::Member),

    #[error("character {player} is already a member of {party}")]
    AlreadyInParty { player: CharacterId, party: PartyId },

    #[error("character {player} is not a member of {party}")]
    NotInParty { player: CharacterId, party: PartyId },

    #[error("character {player} is already alone in {party}")]
    AlreadySolo { player: CharacterId, party: PartyId },

    #[error("hostile {0} has no skill standby to interrupt")]
    NothingToInterrupt(CharacterId),

    #[error("id space exhausted")]
    IdsExhausted,
}

impl EncounterError {
    pub const fn kind(&self) -> ErrorKind {
        use EncounterError::*;
        match self {
            CharacterNotFound(_) | SkillNotFound(_) | TribeNotFound(_) | PartyNotFound(_)
            | BattlefieldNotFound(_) | NoTribes => ErrorKind::Lookup,
            InsufficientResources { .. } => ErrorKind::ResourceInsufficiency,
            CharacterDead(_)
            | NotAPlayer(_)
            | NotAHostile(_)
            | AlreadyInBattlefield { .. }
            | NotInBattlefield(_)
            | AlreadyInParty { .. }
            | NotInParty { .. }
            | AlreadySolo { .. }
            | NothingToInterrupt(_)
            | IdsExhausted => ErrorKind::InvariantViolation,
        }
    }

    pub const fn is_lookup(&self) -> bool {
        matches!(self.kind(), ErrorKind::Lookup)
    }
}

impl GameError for EncounterError {
    fn severity(&self) -> ErrorSeverity {
        if matches!(self, Self::IdsExhausted) {
            return ErrorSeverity::Internal;
        }
        match self.kind() {
            ErrorKind::ResourceInsufficiency => ErrorSeverity::Recoverable,
            ErrorKind::Lookup | ErrorKind::InvariantViolation => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use EncounterError::*;
        match self {
            CharacterNotFound(_) => "CHARACTER_NOT_FOUND",
            SkillNotFound(_) => "SKILL_NOT_FOUND",
            TribeNotFound(_) => "TRIBE_NOT_FOUND",
            PartyNotFound(_) => "PARTY_NOT_FOUND",
            BattlefieldNotFound(_) => "BATTLEFIELD_NOT_FOUND",
            NoTribes => "NO_TRIBES",
            InsufficientResources { .. } => "INSUFFICIENT_RESOURCES",
            CharacterDead(_) => "CHARACTER_DEAD",
            NotAPlayer(_) => "NOT_A_PLAYER",
            NotAHostile(_) => "NOT_A_HOSTILE",
            AlreadyInBattlefield { .. } => "ALREADY_IN_BATTLEFIELD",
            NotInBattlefield(_) => "NOT_IN_BATTLEFIELD",
            AlreadyInParty { .. } => "ALREADY_IN_PARTY",
            NotInParty { .. } => "NOT_IN_PARTY",
            AlreadySolo { .. } => "ALREADY_SOLO",
            NothingToInterrupt(_) => "NOTHING_TO_INTERRUPT",
            IdsExhausted => "IDS_EXHAUSTED",
        }
    }
}

pub type Result<T> = std::result::Result<T, EncounterError>;
