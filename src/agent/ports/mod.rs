//! Port contracts for capability providers.
//!
//! Ports define the infrastructure-agnostic interfaces a provider depends on
//! (retrieval and text generation) and the provider contract itself.

mod generator;
mod provider;
mod retriever;

pub use generator::{GenerationError, GenerationRequest, GenerationResult, TextGenerator};
pub use provider::{CapabilityProvider, ProviderError, ProviderResult};
pub use retriever::{PassageRetriever, RetrievalError, RetrievalResult};
