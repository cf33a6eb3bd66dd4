//! In-memory passage index with lexical-overlap ranking.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::agent::{
    domain::{Passage, PassageMetadata},
    ports::{PassageRetriever, RetrievalError, RetrievalResult},
};

/// Thread-safe in-memory passage store.
///
/// Each added document becomes a single passage. Search ranks passages by the
/// number of distinct query terms they contain; ties keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPassageIndex {
    state: Arc<RwLock<Vec<Passage>>>,
}

impl InMemoryPassageIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes a document's text. Blank text is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError`] when lock acquisition fails.
    pub fn add_document(
        &self,
        text: impl Into<String>,
        metadata: PassageMetadata,
    ) -> RetrievalResult<()> {
        let content = text.into();
        if content.trim().is_empty() {
            return Ok(());
        }
        let mut passages = self
            .state
            .write()
            .map_err(|err| RetrievalError::search(std::io::Error::other(err.to_string())))?;
        passages.push(Passage::new(content, metadata));
        Ok(())
    }

    /// Returns the number of indexed passages.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError`] when lock acquisition fails.
    pub fn len(&self) -> RetrievalResult<usize> {
        let passages = self
            .state
            .read()
            .map_err(|err| RetrievalError::search(std::io::Error::other(err.to_string())))?;
        Ok(passages.len())
    }
}

fn terms(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[async_trait]
impl PassageRetriever for InMemoryPassageIndex {
    async fn similarity_search(
        &self,
        query_text: &str,
        k: usize,
    ) -> RetrievalResult<Vec<Passage>> {
        let passages = self
            .state
            .read()
            .map_err(|err| RetrievalError::search(std::io::Error::other(err.to_string())))?;

        let query_terms = terms(query_text);
        let mut scored: Vec<(usize, &Passage)> = passages
            .iter()
            .map(|passage| {
                let passage_terms = terms(passage.content());
                (query_terms.intersection(&passage_terms).count(), passage)
            })
            .collect();
        // Stable sort keeps insertion order among equal scores.
        scored.sort_by(|left, right| right.0.cmp(&left.0));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(_, passage)| passage.clone())
            .collect())
    }
}
