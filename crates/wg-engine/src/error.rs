//! Error types for the traversal engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that abort table registration or a scenario run.
///
/// Running out of matching events, or finding no selectable outcome, is not
/// an error: it is how a journey normally ends.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A table with the same name is already registered.
    #[error("table \"{0}\" is already registered")]
    DuplicateTable(String),

    /// A table referenced by name was never registered.
    #[error("table \"{0}\" not found")]
    TableNotFound(String),

    /// A roll fell outside every entry range of a table.
    #[error("no entry found for roll {roll} in table \"{table}\"")]
    NoEntryForRoll {
        /// The table that was rolled on.
        table: String,
        /// The rolled value.
        roll: i64,
    },

    /// The scenario has no events to start from.
    #[error("no events registered in the scenario")]
    NoEvents,

    /// An outcome weight was negative or not a finite number.
    #[error("invalid likelihood {likelihood} for outcome targeting \"{target}\"")]
    InvalidLikelihood {
        /// The outcome's target table.
        target: String,
        /// The rejected weight.
        likelihood: f64,
    },

    /// A table, entry, target or tag name was empty.
    #[error("empty {0} name")]
    InvalidName(&'static str),

    /// A run appended more path steps than the configured cap allows.
    #[error("step limit of {0} exceeded")]
    StepLimitExceeded(usize),
}
