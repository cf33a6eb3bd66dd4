//! Capability provider contract.

use super::{GenerationError, RetrievalError};
use crate::agent::domain::{AgentResult, CapabilityDescriptor, Query};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for provider invocations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// A named unit of work that answers a query.
///
/// Providers do not recover from failures; every error is returned to the
/// caller unchanged so resilience policy stays in one place.
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    /// Returns the provider's name and routing description.
    fn descriptor(&self) -> &CapabilityDescriptor;

    /// Answers the query.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when retrieval, prompt rendering, or text
    /// generation fails.
    async fn run(&self, query: &Query) -> ProviderResult<AgentResult>;
}

/// Errors surfaced by provider invocations.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Passage retrieval failed.
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    /// Text generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// The instruction template could not be rendered.
    #[error("prompt rendering failed for '{provider}': {reason}")]
    Prompt {
        /// Provider name.
        provider: String,
        /// Rendering failure reason.
        reason: String,
    },
}
