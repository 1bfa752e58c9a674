//! Core types for Kabut: the session state store and engine hooks.
//!
//! This crate defines the closed vocabularies (items, puzzles, story flags,
//! locations), the [`SessionState`] every other crate reads and mutates,
//! and the two seams the engine talks through: a [`Shell`] for text and
//! choices and a [`RandomSource`] for combat draws.

/// Error types used throughout the crate.
pub mod error;
/// Uniform integer generators.
pub mod rng;
/// The presentation contract.
pub mod shell;
/// The mutable session record.
pub mod state;
/// Deterministic hook implementations for tests.
pub mod testing;
/// Items, puzzles, story flags, and locations.
pub mod vocab;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export randomness types.
pub use rng::{RandomSource, StdRandom};
/// Re-export the shell contract.
pub use shell::{Shell, choose_checked};
/// Re-export session state.
pub use state::{STARTING_HEALTH, SessionState};
/// Re-export vocabulary types.
pub use vocab::{Fact, FactKind, Item, Location, Puzzle, StoryFlag};
