//! Capability descriptor value object.

use super::{AgentDomainError, CapabilityName};
use serde::{Deserialize, Serialize};

/// Name and free-text description of a capability provider.
///
/// The description is the routing signal: it is shown verbatim to the
/// routing model when choosing a provider for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    name: CapabilityName,
    description: String,
}

impl CapabilityDescriptor {
    /// Creates a descriptor from a validated name and a description.
    ///
    /// # Errors
    ///
    /// Returns [`AgentDomainError::EmptyDescription`] when the description is
    /// blank.
    pub fn new(
        name: CapabilityName,
        raw_description: impl Into<String>,
    ) -> Result<Self, AgentDomainError> {
        let description = raw_description.into().trim().to_owned();
        if description.is_empty() {
            return Err(AgentDomainError::EmptyDescription);
        }
        Ok(Self { name, description })
    }

    /// Returns the capability name.
    #[must_use]
    pub const fn name(&self) -> &CapabilityName {
        &self.name
    }

    /// Returns the capability description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}
