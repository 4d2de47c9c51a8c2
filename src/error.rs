//! Error types for the mutual aid service.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Rotator error: {0}")]
    Rotator(#[from] RotatorError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Rejected quiz flow transitions.
///
/// Every variant leaves the flow in the state it was in before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("Question {got} is not the current question (expected {expected})")]
    WrongQuestion { expected: String, got: String },

    #[error("Invalid answer for question {question_id}: {reason}")]
    InvalidAnswer { question_id: String, reason: String },

    #[error("Cannot proceed: question {question_id} has no valid answer")]
    CannotProceed { question_id: String },

    #[error("Already at the first question")]
    AtFirstStep,

    #[error("Invalid contact: {0:?}")]
    InvalidContact(String),

    #[error("Quiz is no longer collecting answers")]
    NotInProgress,

    #[error("Quiz is not awaiting contact details")]
    NotAwaitingContact,

    #[error("Quiz has already been submitted")]
    AlreadySubmitted,
}

/// Question catalog construction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Question catalog is empty")]
    Empty,

    #[error("Duplicate question id: {0}")]
    DuplicateId(String),
}

/// Testimonial rotator errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RotatorError {
    #[error("Testimonial index {index} out of range (count {count})")]
    OutOfRange { index: usize, count: usize },

    #[error("Cannot rotate an empty testimonial list")]
    Empty,

    #[error("A rotation ticker is already running for this rotator")]
    TickerRunning,
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
