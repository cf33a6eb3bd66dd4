//! Query dispatch: route, run the selected provider, shape the response.

use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::Router;
use crate::agent::{
    domain::{Query, QueryContext, QueryId, Temperature},
    ports::TextGenerator,
};
use crate::orchestrator::domain::{
    DispatchState, FailureEnvelope, ProviderRegistry, ResponseEnvelope, classify_failure,
};

/// Entry point that answers queries with the registered providers.
///
/// Every call yields a [`ResponseEnvelope`]; provider failures are
/// classified into failure envelopes rather than returned as errors.
pub struct QueryOrchestrator<G, C>
where
    G: TextGenerator,
    C: Clock + Send + Sync,
{
    registry: Arc<ProviderRegistry>,
    router: Router<G>,
    clock: Arc<C>,
}

impl<G, C> QueryOrchestrator<G, C>
where
    G: TextGenerator,
    C: Clock + Send + Sync,
{
    /// Creates an orchestrator whose router uses `generator` and falls back
    /// to the registry's default provider.
    #[must_use]
    pub fn new(registry: Arc<ProviderRegistry>, generator: Arc<G>, clock: Arc<C>) -> Self {
        let router = Router::new(generator, registry.default_name().clone());
        Self {
            registry,
            router,
            clock,
        }
    }

    /// Overrides the temperature used for routing calls.
    #[must_use]
    pub fn with_routing_temperature(self, temperature: Temperature) -> Self {
        Self {
            router: self.router.with_temperature(temperature),
            ..self
        }
    }

    /// Returns the provider registry.
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Stamps a new query with the orchestrator's clock and processes it.
    pub async fn process_query(
        &self,
        text: impl Into<String>,
        context: Option<QueryContext>,
    ) -> ResponseEnvelope {
        let query = Query::new(text, self.clock.as_ref()).with_context(context.unwrap_or_default());
        self.process(&query).await
    }

    /// Routes `query` to a provider and returns its classified outcome.
    pub async fn process(&self, query: &Query) -> ResponseEnvelope {
        let query_id = query.id();
        let mut state = DispatchState::Routing;
        debug!(%query_id, state = %state, "query received");

        let decision = self.router.select(query, self.registry.descriptors()).await;
        let (resolved_name, provider) = self.registry.resolve(decision.selected_name());
        if resolved_name != decision.selected_name() {
            warn!(
                %query_id,
                agent = %decision.selected_name(),
                fallback = %resolved_name,
                "selected agent is not registered, using default provider"
            );
        }

        state = advance(query_id, state, DispatchState::Dispatching);
        let envelope = match provider.run(query).await {
            Ok(result) => {
                advance(query_id, state, DispatchState::Succeeded);
                ResponseEnvelope::Success(result)
            }
            Err(error) => {
                let detail = error.to_string();
                let class = classify_failure(&detail);
                advance(query_id, state, DispatchState::failed(class));
                warn!(
                    %query_id,
                    agent = %decision.selected_name(),
                    failure = ?class,
                    error = %detail,
                    "agent execution failed"
                );
                ResponseEnvelope::Failure(FailureEnvelope::classified(
                    decision.selected_name().clone(),
                    class,
                    &detail,
                ))
            }
        };

        let elapsed_ms = (self.clock.utc() - query.received_at()).num_milliseconds();
        info!(
            %query_id,
            agent = %envelope.agent(),
            status = %envelope.status(),
            routed_by = ?decision.origin(),
            elapsed_ms,
            "query processed"
        );
        envelope
    }
}

fn advance(query_id: QueryId, current: DispatchState, next: DispatchState) -> DispatchState {
    match current.transition_to(next) {
        Ok(state) => {
            debug!(%query_id, from = %current, to = %state, "dispatch state changed");
            state
        }
        Err(error) => {
            warn!(%query_id, %error, "dispatch state transition rejected");
            next
        }
    }
}
