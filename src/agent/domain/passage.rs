//! Retrieved passage value objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata attached to an indexed passage.
///
/// `source` names the document the passage came from; any other keys are
/// carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl PassageMetadata {
    /// Creates empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates metadata tagged with a source document name.
    #[must_use]
    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            extra: Map::new(),
        }
    }

    /// Adds an extra metadata entry.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Returns the source tag, if present.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the extra metadata entries.
    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// A passage returned by the retrieval collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    content: String,
    metadata: PassageMetadata,
}

impl Passage {
    /// Creates a passage.
    #[must_use]
    pub fn new(content: impl Into<String>, metadata: PassageMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    /// Returns the passage text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the passage metadata.
    #[must_use]
    pub const fn metadata(&self) -> &PassageMetadata {
        &self.metadata
    }
}
