//! Validated capability name type.

use super::AgentDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a capability name, in characters.
const MAX_NAME_LENGTH: usize = 100;

/// Validated, human-readable identifier of a capability provider.
///
/// Names keep their display casing (e.g. `Paper Analyzer`) because they are
/// shown to the routing model and echoed back in responses. Surrounding
/// whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CapabilityName(String);

impl CapabilityName {
    /// Creates a validated capability name.
    ///
    /// # Errors
    ///
    /// Returns [`AgentDomainError::EmptyCapabilityName`] when the value is
    /// empty after trimming, [`AgentDomainError::CapabilityNameTooLong`] when
    /// it exceeds 100 characters, or
    /// [`AgentDomainError::InvalidCapabilityName`] when it contains control
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, AgentDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(AgentDomainError::EmptyCapabilityName);
        }

        if normalized.chars().count() > MAX_NAME_LENGTH {
            return Err(AgentDomainError::CapabilityNameTooLong(raw));
        }

        if normalized.chars().any(char::is_control) {
            return Err(AgentDomainError::InvalidCapabilityName(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the capability name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether `candidate` names this capability, ignoring
    /// surrounding whitespace and ASCII case.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.eq_ignore_ascii_case(candidate.trim())
    }
}

impl AsRef<str> for CapabilityName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CapabilityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CapabilityName {
    type Error = AgentDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CapabilityName> for String {
    fn from(value: CapabilityName) -> Self {
        value.0
    }
}
