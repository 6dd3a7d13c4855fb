//! Quiz error types.
//!
//! These errors are local and recoverable. Callers that only need to show a
//! message can rely on the `Display` output; the assembler and the session
//! return them so the front-end can decide how to react.

use thiserror::Error;

/// Errors raised by the question engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The requested category or composite is not in the registry.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// The requested difficulty tier does not exist.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// The requested question kind does not exist.
    #[error("unknown question kind: {0}")]
    UnknownKind(String),

    /// A submitted value cannot be coerced to what the question kind expects.
    #[error("malformed answer for {kind}: {reason}")]
    MalformedAnswer { kind: String, reason: String },

    /// A curated bank holds no item for any tier.
    #[error("no curated items for {0}")]
    EmptyBank(String),

    /// All questions of the session have already been answered.
    #[error("session is complete, no question left to answer")]
    SessionComplete,

    /// The session was asked for a score before every question was answered.
    #[error("session is incomplete: {answered} of {total} questions answered")]
    SessionIncomplete { answered: usize, total: usize },
}

impl QuizError {
    /// Returns `true` if this error only concerns a single submitted answer.
    ///
    /// Such errors are graded as an incorrect answer instead of being surfaced.
    pub fn is_answer_error(&self) -> bool {
        matches!(self, QuizError::MalformedAnswer { .. })
    }
}

/// Result alias for quiz operations.
pub type QuizResult<T> = std::result::Result<T, QuizError>;
