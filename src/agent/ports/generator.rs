//! Text-generation port.

use crate::agent::domain::Temperature;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for text-generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// A single prompt submitted to the text-generation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    prompt: String,
    temperature: Temperature,
}

impl GenerationRequest {
    /// Creates a generation request.
    #[must_use]
    pub fn new(prompt: impl Into<String>, temperature: Temperature) -> Self {
        Self {
            prompt: prompt.into(),
            temperature,
        }
    }

    /// Returns the fully rendered prompt.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Returns the sampling temperature.
    #[must_use]
    pub const fn temperature(&self) -> Temperature {
        self.temperature
    }
}

/// Language-model backend producing text for a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a completion for the request.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the backend fails. Rate limiting is
    /// reported as [`GenerationError::RateLimited`].
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<String>;

    /// Returns the backend model name, for diagnostics.
    fn model_name(&self) -> &str;
}

/// Errors returned by text-generation adapters.
///
/// Callers classify failures from the rendered message, so rate-limit
/// failures always render with the `429` status code.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// The backend rejected the request because of rate or quota limits.
    #[error("429 Too Many Requests: {0}")]
    RateLimited(String),

    /// The backend answered with a non-success status.
    #[error("generation backend error ({status}): {body}")]
    Backend {
        /// HTTP status code reported by the backend.
        status: u16,
        /// Response body or diagnostic text.
        body: String,
    },

    /// The backend answered with a payload that could not be interpreted.
    #[error("invalid generation response: {0}")]
    InvalidResponse(String),

    /// The request could not be delivered.
    #[error("generation transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl GenerationError {
    /// Wraps a transport-layer failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
