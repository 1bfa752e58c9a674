//! Choice engine for the narrative graph.
//!
//! This module provides conditions, effects, transitions, and the node and
//! choice builders the story content is written with.

mod condition;
mod effect;
mod node;
mod puzzle;

pub use condition::Condition;
pub use effect::Effect;
pub use node::{Branch, Choice, EncounterId, Establishing, Node, NodeId, Transition};
pub use puzzle::PuzzleSpec;
