//! Combat resolution for Kabut.
//!
//! A bounded, turn-based duel between the player and a single foe. The
//! player acts first each round, the foe retaliates unless it has fallen,
//! and defeat is not fatal: the player is revived at a fixed health and the
//! encounter's reward is withheld.

pub mod combat;
pub mod config;
pub mod dice;

pub use combat::{Combat, CombatAction, CombatEvent, CombatEventKind, CombatOutcome, Foe};
pub use config::CombatConfig;
pub use dice::DamageRange;
