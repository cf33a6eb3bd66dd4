//! Retrieval port returning passages relevant to a query.

use crate::agent::domain::Passage;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for retrieval operations.
pub type RetrievalResult<T> = Result<T, RetrievalError>;

/// Similarity search over the indexed document corpus.
#[async_trait]
pub trait PassageRetriever: Send + Sync {
    /// Returns up to `k` passages relevant to `query_text`, most relevant
    /// first.
    ///
    /// Implementations must return an empty vector, not an error, when the
    /// index is empty.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError`] when the underlying index cannot be
    /// searched.
    async fn similarity_search(&self, query_text: &str, k: usize)
    -> RetrievalResult<Vec<Passage>>;
}

/// Errors returned by retrieval adapters.
#[derive(Debug, Clone, Error)]
pub enum RetrievalError {
    /// The index rejected or failed the search.
    #[error("retrieval failed: {0}")]
    Search(Arc<dyn std::error::Error + Send + Sync>),
}

impl RetrievalError {
    /// Wraps an index failure.
    pub fn search(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Search(Arc::new(err))
    }
}
