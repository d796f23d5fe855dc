//! Error types for the draft engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application. Typed variants are converted with `.into()` and
//! recovered by callers through `downcast_ref::<DraftError>()`.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific draft scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DraftError {
    #[error("Rating anchors are invalid: {reason}")]
    InvalidAnchors { reason: String },

    #[error("No rating available for participant: {participant_id}")]
    UnknownRating { participant_id: String },

    #[error("No eligible participants to place on the wheel")]
    EmptyPopulation,

    #[error("The draw pool is empty")]
    EmptyPool,

    #[error("No segment matched angle {angle}")]
    NoSegmentMatched { angle: f64 },

    #[error("Participant has no positive weight: {participant_id}")]
    InvalidWeight { participant_id: String },

    #[error("A spin is already in progress")]
    SpinInProgress,

    #[error("No spin is in progress")]
    NotSpinning,

    #[error("Participant not found: {participant_id}")]
    ParticipantNotFound { participant_id: String },

    #[error("Duplicate participant: {participant_id}")]
    DuplicateParticipant { participant_id: String },

    #[error("Participant source failed: {message}")]
    SourceError { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl DraftError {
    /// Extract a typed draft error from an anyhow error, if it carries one
    pub fn from_anyhow(error: &anyhow::Error) -> Option<&DraftError> {
        error.downcast_ref::<DraftError>()
    }
}
