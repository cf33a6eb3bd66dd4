//! LLM-backed routing of queries to capability providers.

use minijinja::Environment;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::agent::{
    domain::{CapabilityDescriptor, CapabilityName, Query, Temperature},
    ports::{GenerationError, GenerationRequest, TextGenerator},
};
use crate::orchestrator::domain::{RoutingDecision, RoutingSelection};

const ROUTING_TEMPLATE: &str = r#"You coordinate a team of research agents. Pick the single agent best suited to handle the user's request.

Available agents:
{% for agent in agents %}- {{ agent.name }}: {{ agent.description }}
{% endfor %}
User request:
{{ query }}

Reply with only a JSON object of the form {"agent_name": "<one of the agent names listed above>", "reason": "<one sentence explaining the choice>"}."#;

/// Reasons a routing attempt did not produce a usable selection.
///
/// These never reach callers of [`Router::select`]; they are folded into
/// the rationale of a fallback decision.
#[derive(Debug, Error)]
pub enum RoutingFailure {
    /// The routing prompt could not be rendered.
    #[error("routing prompt rendering failed: {0}")]
    Prompt(String),

    /// The routing backend call failed.
    #[error("routing backend failed: {0}")]
    Backend(#[from] GenerationError),

    /// The reply did not match the selection schema.
    #[error("routing reply did not match the selection schema: {0}")]
    MalformedSelection(#[from] serde_json::Error),

    /// The reply named an agent that is not registered.
    #[error("routing reply named unknown agent '{0}'")]
    UnknownAgent(String),
}

/// Chooses a provider for each query by asking a text-generation backend.
///
/// [`Router::select`] never fails: any routing problem yields a decision for
/// the fallback provider.
pub struct Router<G>
where
    G: TextGenerator,
{
    generator: Arc<G>,
    fallback: CapabilityName,
    temperature: Temperature,
}

impl<G> Router<G>
where
    G: TextGenerator,
{
    /// Creates a router that falls back to `fallback`.
    #[must_use]
    pub const fn new(generator: Arc<G>, fallback: CapabilityName) -> Self {
        Self {
            generator,
            fallback,
            temperature: Temperature::ROUTING,
        }
    }

    /// Overrides the routing temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: Temperature) -> Self {
        self.temperature = temperature;
        self
    }

    /// Returns the fallback provider name.
    #[must_use]
    pub const fn fallback(&self) -> &CapabilityName {
        &self.fallback
    }

    /// Selects the provider that should answer `query`.
    pub async fn select(
        &self,
        query: &Query,
        descriptors: &[CapabilityDescriptor],
    ) -> RoutingDecision {
        match self.try_select(query, descriptors).await {
            Ok(decision) => {
                debug!(
                    query_id = %query.id(),
                    agent = %decision.selected_name(),
                    rationale = decision.rationale(),
                    "routing model selected agent"
                );
                decision
            }
            Err(failure) => {
                warn!(
                    query_id = %query.id(),
                    fallback = %self.fallback,
                    error = %failure,
                    "routing failed, using fallback agent"
                );
                RoutingDecision::fallback(
                    self.fallback.clone(),
                    format!("defaulted to {}: {failure}", self.fallback),
                )
            }
        }
    }

    async fn try_select(
        &self,
        query: &Query,
        descriptors: &[CapabilityDescriptor],
    ) -> Result<RoutingDecision, RoutingFailure> {
        let prompt = render_routing_prompt(query, descriptors)?;
        let reply = self
            .generator
            .generate(&GenerationRequest::new(prompt, self.temperature))
            .await?;
        let selection = RoutingSelection::from_reply(&reply)?;

        let descriptor = descriptors
            .iter()
            .find(|descriptor| descriptor.name().matches(&selection.agent_name))
            .ok_or(RoutingFailure::UnknownAgent(selection.agent_name))?;

        Ok(RoutingDecision::from_model(
            descriptor.name().clone(),
            selection.reason,
        ))
    }
}

fn render_routing_prompt(
    query: &Query,
    descriptors: &[CapabilityDescriptor],
) -> Result<String, RoutingFailure> {
    let agents = serde_json::to_value(descriptors)
        .map_err(|error| RoutingFailure::Prompt(error.to_string()))?;
    let mut context = Map::new();
    context.insert("agents".to_owned(), agents);
    context.insert("query".to_owned(), Value::String(query.text().to_owned()));

    Environment::new()
        .render_str(ROUTING_TEMPLATE, context)
        .map_err(|error| RoutingFailure::Prompt(error.to_string()))
}
