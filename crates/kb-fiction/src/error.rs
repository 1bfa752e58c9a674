//! Error types for the fiction engine.

use kb_core::CoreError;
use thiserror::Error;

use crate::choice::{EncounterId, NodeId};

/// Result type for fiction operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Errors that can occur while driving a story.
///
/// Narrative failures (damage, defeat, a wrong answer, a rejected ending)
/// are state transitions, not errors. These cover a malformed graph and a
/// shell that cannot answer.
#[derive(Debug, Error)]
pub enum FictionError {
    /// A transition points at a node the graph does not contain.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// A transition starts a fight the graph does not define.
    #[error("encounter not found: {0}")]
    EncounterNotFound(EncounterId),

    /// The shell failed or ran out of input.
    #[error(transparent)]
    Shell(#[from] CoreError),
}
