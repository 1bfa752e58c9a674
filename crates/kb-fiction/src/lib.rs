//! Narrative engine for Kabut.
//!
//! The story is a directed graph of [`Node`]s. Each node offers choices
//! gated by [`Condition`]s over the session state; picking one applies
//! [`Effect`]s and yields a [`Transition`] that the [`StorySession`] driver
//! interprets. Fights are handed to the combat resolver in `kb-mechanics`
//! and the climax hands over to the [`EndingResolver`].

/// Gating conditions, effects, and the node/choice model.
pub mod choice;
/// Session configuration.
pub mod config;
/// The built-in story.
pub mod content;
/// Endings and the precondition check for each.
pub mod ending;
/// Error types for the fiction engine.
pub mod error;
/// The narrative graph and its static analysis.
pub mod graph;
/// The driver loop.
pub mod session;

pub use choice::{Branch, Choice, Condition, Effect, EncounterId, Node, NodeId, Transition};
pub use config::SessionConfig;
pub use ending::{Ending, EndingOutcome, EndingResolver};
pub use error::{FictionError, FictionResult};
pub use graph::{Encounter, GraphSummary, StoryGraph};
pub use session::{SessionEnd, StorySession};
