//! Error types for the core crate.

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised at the edges of the core: key parsing and shell input.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A string key does not belong to the named vocabulary.
    #[error("unknown {kind} key: \"{key}\"")]
    UnknownKey {
        /// The vocabulary that was searched.
        kind: &'static str,
        /// The key as given.
        key: String,
    },

    /// The shell returned an index outside the offered options.
    #[error("invalid choice {index}: {available} options were offered")]
    InvalidChoice {
        /// The index returned (0-based).
        index: usize,
        /// How many options were offered.
        available: usize,
    },

    /// The shell has no more input to offer.
    #[error("input closed")]
    InputClosed,

    /// The shell failed to read or write.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
