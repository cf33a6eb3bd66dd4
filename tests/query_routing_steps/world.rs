//! Shared world state for query routing BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use researchmate::{
    agent::{
        adapters::memory::{InMemoryPassageIndex, ScriptedGenerator},
        domain::CapabilityName,
        services::{CatalogSettings, DEFAULT_PROVIDER_NAME, research_catalog},
    },
    orchestrator::{
        domain::{ProviderRegistry, ResponseEnvelope},
        services::QueryOrchestrator,
    },
};
use rstest::fixture;

/// Orchestrator type used by the BDD world.
pub type TestOrchestrator = QueryOrchestrator<ScriptedGenerator, DefaultClock>;

/// Scenario world for query routing behaviour tests.
pub struct QueryWorld {
    /// Passage index shared by every agent.
    pub index: Arc<InMemoryPassageIndex>,
    /// Backend answering routing prompts.
    pub router_generator: Arc<ScriptedGenerator>,
    /// Backend answering agent prompts.
    pub agent_generator: Arc<ScriptedGenerator>,
    /// The orchestrator under test.
    pub orchestrator: TestOrchestrator,
    /// Envelope returned for the last processed query.
    pub last_envelope: Option<ResponseEnvelope>,
}

impl QueryWorld {
    /// Creates a world with the six built-in agents and empty scripts.
    ///
    /// # Panics
    ///
    /// Panics when the built-in catalog fails to assemble.
    #[must_use]
    #[expect(
        clippy::expect_used,
        reason = "Fixture construction fails the scenario on broken wiring"
    )]
    pub fn new() -> Self {
        let index = Arc::new(InMemoryPassageIndex::new());
        let router_generator = Arc::new(ScriptedGenerator::new("no selection"));
        let agent_generator = Arc::new(ScriptedGenerator::new("default answer"));
        let providers = research_catalog(&index, &agent_generator, CatalogSettings::default())
            .expect("built-in catalog should assemble");
        let default_name =
            CapabilityName::new(DEFAULT_PROVIDER_NAME).expect("default name should be valid");
        let registry = ProviderRegistry::builder(default_name)
            .register_all(providers)
            .build()
            .expect("registry should build");
        let orchestrator = QueryOrchestrator::new(
            Arc::new(registry),
            Arc::clone(&router_generator),
            Arc::new(DefaultClock),
        );
        Self {
            index,
            router_generator,
            agent_generator,
            orchestrator,
            last_envelope: None,
        }
    }

    /// Returns the last envelope or a step error.
    ///
    /// # Errors
    ///
    /// Returns an error when no query has been processed yet.
    pub fn envelope(&self) -> Result<&ResponseEnvelope, eyre::Report> {
        self.last_envelope
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no query has been processed in this scenario"))
    }
}

impl Default for QueryWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> QueryWorld {
    QueryWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
