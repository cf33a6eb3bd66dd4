//! Response envelope returned for every query.

use super::{FailureClass, QUOTA_EXCEEDED_MESSAGE};
use crate::agent::domain::{AgentResult, CapabilityName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome marker of a response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeStatus {
    /// The provider answered.
    Success,
    /// The provider failed for a reason other than usage limits.
    Error,
    /// The provider failed because the backend hit a usage limit.
    ErrorQuotaExceeded,
}

impl EnvelopeStatus {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::ErrorQuotaExceeded => "error_quota_exceeded",
        }
    }
}

impl fmt::Display for EnvelopeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<FailureClass> for EnvelopeStatus {
    fn from(value: FailureClass) -> Self {
        match value {
            FailureClass::Quota => Self::ErrorQuotaExceeded,
            FailureClass::Other => Self::Error,
        }
    }
}

/// Error-shaped payload: a readable message, the agent that was attempted,
/// and the failure status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureEnvelope {
    answer: String,
    agent: CapabilityName,
    status: EnvelopeStatus,
}

impl FailureEnvelope {
    /// Builds the payload for a classified failure.
    ///
    /// Quota failures carry a fixed advisory message; other failures embed
    /// the raw error detail.
    #[must_use]
    pub fn classified(agent: CapabilityName, class: FailureClass, detail: &str) -> Self {
        let answer = match class {
            FailureClass::Quota => QUOTA_EXCEEDED_MESSAGE.to_owned(),
            FailureClass::Other => {
                format!("I encountered an error while processing your request: {detail}")
            }
        };
        Self {
            answer,
            agent,
            status: class.into(),
        }
    }

    /// Returns the user-facing message.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Returns the agent that was attempted.
    #[must_use]
    pub const fn agent(&self) -> &CapabilityName {
        &self.agent
    }

    /// Returns the failure status.
    #[must_use]
    pub const fn status(&self) -> EnvelopeStatus {
        self.status
    }
}

/// Final output of the orchestrator: a success or a classified failure,
/// never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseEnvelope {
    /// The selected provider answered.
    Success(AgentResult),
    /// The selected provider failed.
    Failure(FailureEnvelope),
}

impl ResponseEnvelope {
    /// Returns the envelope status.
    #[must_use]
    pub const fn status(&self) -> EnvelopeStatus {
        match self {
            Self::Success(_) => EnvelopeStatus::Success,
            Self::Failure(failure) => failure.status(),
        }
    }

    /// Returns the agent that answered or was attempted.
    #[must_use]
    pub const fn agent(&self) -> &CapabilityName {
        match self {
            Self::Success(result) => result.provider_name(),
            Self::Failure(failure) => failure.agent(),
        }
    }

    /// Returns the answer text or the failure message.
    #[must_use]
    pub fn answer(&self) -> &str {
        match self {
            Self::Success(result) => result.answer(),
            Self::Failure(failure) => failure.answer(),
        }
    }

    /// Returns the agent result when the envelope is a success.
    #[must_use]
    pub const fn as_success(&self) -> Option<&AgentResult> {
        match self {
            Self::Success(result) => Some(result),
            Self::Failure(_) => None,
        }
    }

    /// Returns whether the provider answered.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
