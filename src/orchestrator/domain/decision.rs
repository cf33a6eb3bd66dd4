//! Routing decision types.

use crate::agent::domain::CapabilityName;
use serde::{Deserialize, Serialize};

/// Structured choice the routing model is asked to emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingSelection {
    /// Name of the chosen agent.
    pub agent_name: String,
    /// Why the agent was chosen.
    pub reason: String,
}

impl RoutingSelection {
    /// Parses a model reply into a selection.
    ///
    /// The outermost `{ … }` span is parsed, so markdown fences or prose
    /// around the JSON object are tolerated.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the reply holds no object matching the
    /// two-field schema.
    pub fn from_reply(reply: &str) -> Result<Self, serde_json::Error> {
        let object = match (reply.find('{'), reply.rfind('}')) {
            (Some(start), Some(end)) if start < end => reply.get(start..=end).unwrap_or(reply),
            _ => reply,
        };
        serde_json::from_str(object)
    }
}

/// How a routing decision was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOrigin {
    /// The routing model's choice was accepted.
    Model,
    /// The router fell back to its default provider.
    Fallback,
}

/// The router's choice of provider for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    selected_name: CapabilityName,
    rationale: String,
    origin: DecisionOrigin,
}

impl RoutingDecision {
    /// Creates a decision accepted from the routing model.
    #[must_use]
    pub fn from_model(selected_name: CapabilityName, rationale: impl Into<String>) -> Self {
        Self {
            selected_name,
            rationale: rationale.into(),
            origin: DecisionOrigin::Model,
        }
    }

    /// Creates a decision pointing at the fallback provider.
    #[must_use]
    pub fn fallback(selected_name: CapabilityName, rationale: impl Into<String>) -> Self {
        Self {
            selected_name,
            rationale: rationale.into(),
            origin: DecisionOrigin::Fallback,
        }
    }

    /// Returns the selected provider name.
    #[must_use]
    pub const fn selected_name(&self) -> &CapabilityName {
        &self.selected_name
    }

    /// Returns the rationale for the decision.
    #[must_use]
    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    /// Returns how the decision was reached.
    #[must_use]
    pub const fn origin(&self) -> DecisionOrigin {
        self.origin
    }

    /// Returns whether the router fell back to its default provider.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.origin, DecisionOrigin::Fallback)
    }
}
