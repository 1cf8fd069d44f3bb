//! Error types for the lead-intake service.

use uuid::Uuid;

use crate::wizard::step::WizardStep;

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("Survey error: {0}")]
    Survey(#[from] SurveyError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Per-step validation failures.
///
/// Always recoverable: surfaced as an inline message on the session and
/// cleared on the next field edit or successful advance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Full name, email and phone number are required")]
    IncompleteIdentity,

    #[error("Email address must contain '@'")]
    InvalidEmail,

    #[error("Select whether this is an active company or a new project")]
    MissingEntityType,

    #[error("Business name and industry are required")]
    IncompleteContext,

    #[error("Select a primary pillar")]
    MissingPillar,

    #[error("Select an investment range")]
    MissingBudget,

    #[error("That investment range is not available for the current plan")]
    UnavailableBudget,

    #[error("A message and contact consent are required")]
    IncompleteMessage,
}

/// Session-level errors: unknown sessions and transitions fired from the
/// wrong step. Validation failures are wrapped so callers can convert them
/// to inline session state rather than propagating.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{action} is not valid while in the {step} step")]
    InvalidAction {
        action: &'static str,
        step: WizardStep,
    },

    #[error("Session {id} not found")]
    NotFound { id: Uuid },
}

/// Submission-sink errors (external boundary).
///
/// Recoverable: the session stays in the Message step with a visible
/// submission error and the user may retry.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Sink {name} rejected the payload: {reason}")]
    Rejected { name: String, reason: String },

    #[error("Failed to deliver via {name}: {reason}")]
    DeliveryFailed { name: String, reason: String },
}

/// Survey runner errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurveyError {
    #[error("Survey {id} has no questions")]
    EmptyDefinition { id: String },

    #[error("Survey run is already complete")]
    AlreadyComplete,

    #[error("Please answer this question")]
    MissingAnswer,

    #[error("Email address must contain '@'")]
    InvalidEmail,

    #[error("Answer must be one of the listed options")]
    UnknownChoice,
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
