/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the shared primitives.
///
/// All of these indicate authoring bugs in content tables, not runtime
/// conditions to paper over.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A weighted table was built with no entries.
    #[error("weighted table is empty")]
    EmptyTable,

    /// Every entry of a weighted table has weight zero.
    #[error("weighted table has zero total weight ({entries} entries)")]
    ZeroTotalWeight {
        /// Number of entries in the table.
        entries: usize,
    },

    /// The eligibility filter excluded every entry with positive weight.
    #[error("no eligible entries with positive weight")]
    NoEligibleEntries,

    /// A skill name could not be parsed.
    #[error("unknown skill category: {0}")]
    UnknownSkill(String),
}
