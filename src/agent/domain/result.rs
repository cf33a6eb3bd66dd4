//! Agent result value object.

use super::{CapabilityName, Passage};
use serde::{Deserialize, Serialize};

/// Answer produced by one provider invocation.
///
/// Serialises as `{"agent", "response", "sources"}`. `sources` holds one slot
/// per retrieved passage, in retrieval order; passages without a source tag
/// yield `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResult {
    #[serde(rename = "agent")]
    provider_name: CapabilityName,
    #[serde(rename = "response")]
    answer: String,
    sources: Vec<Option<String>>,
}

impl AgentResult {
    /// Creates a result with explicit source slots.
    #[must_use]
    pub fn new(
        provider_name: CapabilityName,
        answer: impl Into<String>,
        sources: Vec<Option<String>>,
    ) -> Self {
        Self {
            provider_name,
            answer: answer.into(),
            sources,
        }
    }

    /// Creates a result whose sources are taken from the grounding passages.
    #[must_use]
    pub fn grounded(
        provider_name: CapabilityName,
        answer: impl Into<String>,
        passages: &[Passage],
    ) -> Self {
        let sources = passages
            .iter()
            .map(|passage| passage.metadata().source().map(ToOwned::to_owned))
            .collect();
        Self::new(provider_name, answer, sources)
    }

    /// Returns the name of the provider that produced the answer.
    #[must_use]
    pub const fn provider_name(&self) -> &CapabilityName {
        &self.provider_name
    }

    /// Returns the generated answer.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Returns the source slots, one per retrieved passage.
    #[must_use]
    pub fn sources(&self) -> &[Option<String>] {
        &self.sources
    }
}
