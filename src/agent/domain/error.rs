//! Error types for capability domain validation.

use thiserror::Error;

/// Errors returned while constructing capability domain values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AgentDomainError {
    /// The capability name is empty after trimming.
    #[error("capability name must not be empty")]
    EmptyCapabilityName,

    /// The capability name exceeds the 100-character limit.
    #[error("capability name exceeds 100 character limit: {0}")]
    CapabilityNameTooLong(String),

    /// The capability name contains control characters.
    #[error("capability name '{0}' contains control characters")]
    InvalidCapabilityName(String),

    /// The capability description is empty after trimming.
    #[error("capability description must not be empty")]
    EmptyDescription,

    /// The sampling temperature is not a finite value in `[0, 2]`.
    #[error("temperature {0} is outside the supported range 0.0..=2.0")]
    TemperatureOutOfRange(f32),

    /// The query context is not a JSON object.
    #[error("query context must be a JSON object")]
    ContextNotAnObject,
}
