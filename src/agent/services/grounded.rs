//! Retrieval-grounded provider shared by every research agent.
//!
//! Agents differ only by their [`ProviderProfile`]: descriptor, instruction
//! template, sampling temperature and retrieval depth.

use async_trait::async_trait;
use minijinja::Environment;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

use crate::agent::{
    domain::{AgentResult, CapabilityDescriptor, Passage, Query, Temperature},
    ports::{
        CapabilityProvider, GenerationRequest, PassageRetriever, ProviderError, ProviderResult,
        TextGenerator,
    },
};

/// Separator placed between passages in the grounding context.
const PASSAGE_SEPARATOR: &str = "\n\n";

/// Static configuration of a grounded provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderProfile {
    descriptor: CapabilityDescriptor,
    instructions_template: String,
    temperature: Temperature,
    top_k: usize,
}

impl ProviderProfile {
    /// Creates a profile.
    ///
    /// The template is rendered with `grounding` (joined passage text),
    /// `query` (raw query text) and `hints` (the query's context map).
    #[must_use]
    pub fn new(
        descriptor: CapabilityDescriptor,
        instructions_template: impl Into<String>,
        temperature: Temperature,
        top_k: usize,
    ) -> Self {
        Self {
            descriptor,
            instructions_template: instructions_template.into(),
            temperature,
            top_k,
        }
    }

    /// Returns the provider descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &CapabilityDescriptor {
        &self.descriptor
    }

    /// Returns the instruction template source.
    #[must_use]
    pub fn instructions_template(&self) -> &str {
        &self.instructions_template
    }

    /// Returns the sampling temperature.
    #[must_use]
    pub const fn temperature(&self) -> Temperature {
        self.temperature
    }

    /// Returns how many passages are retrieved per query.
    #[must_use]
    pub const fn top_k(&self) -> usize {
        self.top_k
    }
}

/// Provider that grounds its prompt in retrieved passages.
pub struct GroundedProvider<R, G>
where
    R: PassageRetriever,
    G: TextGenerator,
{
    profile: ProviderProfile,
    retriever: Arc<R>,
    generator: Arc<G>,
}

impl<R, G> GroundedProvider<R, G>
where
    R: PassageRetriever,
    G: TextGenerator,
{
    /// Creates a provider, checking the template syntax up front.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Prompt`] when the instruction template does
    /// not parse.
    pub fn new(
        profile: ProviderProfile,
        retriever: Arc<R>,
        generator: Arc<G>,
    ) -> ProviderResult<Self> {
        let environment = Environment::new();
        environment
            .template_from_str(profile.instructions_template())
            .map_err(|error| ProviderError::Prompt {
                provider: profile.descriptor().name().to_string(),
                reason: error.to_string(),
            })?;
        Ok(Self {
            profile,
            retriever,
            generator,
        })
    }

    /// Returns the provider profile.
    #[must_use]
    pub const fn profile(&self) -> &ProviderProfile {
        &self.profile
    }

    fn render_instructions(&self, grounding: String, query: &Query) -> ProviderResult<String> {
        let mut context = Map::new();
        context.insert("grounding".to_owned(), Value::String(grounding));
        context.insert("query".to_owned(), Value::String(query.text().to_owned()));
        context.insert(
            "hints".to_owned(),
            Value::Object(query.context().as_map().clone()),
        );

        Environment::new()
            .render_str(self.profile.instructions_template(), context)
            .map_err(|error| ProviderError::Prompt {
                provider: self.profile.descriptor().name().to_string(),
                reason: error.to_string(),
            })
    }
}

fn join_passages(passages: &[Passage]) -> String {
    passages
        .iter()
        .map(Passage::content)
        .collect::<Vec<_>>()
        .join(PASSAGE_SEPARATOR)
}

#[async_trait]
impl<R, G> CapabilityProvider for GroundedProvider<R, G>
where
    R: PassageRetriever,
    G: TextGenerator,
{
    fn descriptor(&self) -> &CapabilityDescriptor {
        self.profile.descriptor()
    }

    async fn run(&self, query: &Query) -> ProviderResult<AgentResult> {
        let passages = self
            .retriever
            .similarity_search(query.text(), self.profile.top_k())
            .await?;
        debug!(
            query_id = %query.id(),
            agent = %self.profile.descriptor().name(),
            passages = passages.len(),
            "retrieved grounding passages"
        );

        let instructions = self.render_instructions(join_passages(&passages), query)?;
        let request = GenerationRequest::new(instructions, self.profile.temperature());
        let answer = self.generator.generate(&request).await?;

        Ok(AgentResult::grounded(
            self.profile.descriptor().name().clone(),
            answer,
            &passages,
        ))
    }
}
