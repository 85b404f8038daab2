//! Error types for the mechanics engine.

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A critical bonus was picked outside the offered options.
    #[error("choice {index} is out of range ({options} options offered)")]
    InvalidChoice {
        /// The rejected index.
        index: usize,
        /// How many options were offered.
        options: usize,
    },

    /// A mechanics configuration is malformed.
    #[error("invalid mechanics config: {0}")]
    InvalidConfig(String),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
