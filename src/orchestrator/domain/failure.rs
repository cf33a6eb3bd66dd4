//! Classification of provider failures.
//!
//! Backends do not expose structured error codes, so failures are
//! classified from their rendered message.

use serde::{Deserialize, Serialize};

/// User-facing answer returned when the generation backend hit a usage limit.
pub const QUOTA_EXCEEDED_MESSAGE: &str = "I'm sorry, the language model service reported that \
its usage limit has been reached. Please wait a minute and try again, or check the API quota.";

/// Failure classes distinguished in user-facing responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// The backend signalled rate limiting or quota exhaustion.
    Quota,
    /// Any other failure.
    Other,
}

/// Classifies an error message.
///
/// Messages containing `429`, or `quota` in any letter case, are
/// [`FailureClass::Quota`]; everything else is [`FailureClass::Other`].
#[must_use]
pub fn classify_failure(message: &str) -> FailureClass {
    if message.contains("429") || message.to_lowercase().contains("quota") {
        FailureClass::Quota
    } else {
        FailureClass::Other
    }
}
