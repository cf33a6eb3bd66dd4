//! Shared fixtures for orchestrator unit tests.

use async_trait::async_trait;
use mockall::mock;
use std::sync::Arc;

use crate::agent::{
    adapters::memory::{InMemoryPassageIndex, ScriptedGenerator},
    domain::{AgentResult, CapabilityDescriptor, CapabilityName, PassageMetadata, Query},
    ports::{CapabilityProvider, ProviderResult},
    services::{CatalogSettings, DEFAULT_PROVIDER_NAME, research_catalog},
};
use crate::orchestrator::domain::ProviderRegistry;

mock! {
    pub Provider {}

    #[async_trait]
    impl CapabilityProvider for Provider {
        fn descriptor(&self) -> &CapabilityDescriptor;
        async fn run(&self, query: &Query) -> ProviderResult<AgentResult>;
    }
}

pub fn name(raw: &str) -> CapabilityName {
    CapabilityName::new(raw).expect("valid name")
}

pub fn descriptor(raw: &str) -> CapabilityDescriptor {
    CapabilityDescriptor::new(name(raw), format!("Handles {raw} requests."))
        .expect("valid descriptor")
}

/// Provider that always answers with a fixed reply and no sources.
pub struct EchoProvider {
    descriptor: CapabilityDescriptor,
}

impl EchoProvider {
    pub fn shared(raw: &str) -> Arc<dyn CapabilityProvider> {
        Arc::new(Self {
            descriptor: descriptor(raw),
        })
    }
}

#[async_trait]
impl CapabilityProvider for EchoProvider {
    fn descriptor(&self) -> &CapabilityDescriptor {
        &self.descriptor
    }

    async fn run(&self, query: &Query) -> ProviderResult<AgentResult> {
        Ok(AgentResult::new(
            self.descriptor.name().clone(),
            format!("echo: {}", query.text()),
            Vec::new(),
        ))
    }
}

/// Backends and registry for the six built-in agents.
pub struct ResearchHarness {
    pub index: Arc<InMemoryPassageIndex>,
    pub router_generator: Arc<ScriptedGenerator>,
    pub agent_generator: Arc<ScriptedGenerator>,
    pub registry: Arc<ProviderRegistry>,
}

impl ResearchHarness {
    pub fn new() -> Self {
        let index = Arc::new(InMemoryPassageIndex::new());
        let router_generator = Arc::new(ScriptedGenerator::new("not json"));
        let agent_generator = Arc::new(ScriptedGenerator::new("generated answer"));
        let providers = research_catalog(&index, &agent_generator, CatalogSettings::default())
            .expect("catalog should build");
        let registry = ProviderRegistry::builder(name(DEFAULT_PROVIDER_NAME))
            .register_all(providers)
            .build()
            .expect("registry should build");
        Self {
            index,
            router_generator,
            agent_generator,
            registry: Arc::new(registry),
        }
    }

    pub fn route_to(&self, agent: &str) {
        self.router_generator
            .push_reply(format!(
                r#"{{"agent_name": "{agent}", "reason": "best fit for the request"}}"#
            ))
            .expect("script should accept reply");
    }

    pub fn index_document(&self, text: &str, source: &str) {
        self.index
            .add_document(text, PassageMetadata::with_source(source))
            .expect("document should be indexed");
    }
}
