//! Skill resolution and aggro tracking.
mod aggro;
mod skill;

pub use aggro::{AggroTracker, Target};
pub use skill::{Damage, SkillResolver};
