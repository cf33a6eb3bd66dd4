//! Query value objects passed through the orchestration pipeline.

use super::AgentDomainError;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a query, used to correlate log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryId(Uuid);

impl QueryId {
    /// Creates a new random query identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a query identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for QueryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Optional structured context supplied alongside a query.
///
/// Providers expose the entries to their instruction templates as `hints`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryContext(Map<String, Value>);

impl QueryContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a context from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`AgentDomainError::ContextNotAnObject`] unless the value is a
    /// JSON object.
    pub fn from_value(value: Value) -> Result<Self, AgentDomainError> {
        match value {
            Value::Object(entries) => Ok(Self(entries)),
            _ => Err(AgentDomainError::ContextNotAnObject),
        }
    }

    /// Adds or replaces an entry.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns whether the context has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the underlying JSON map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// A natural-language request and its optional context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    id: QueryId,
    text: String,
    context: QueryContext,
    received_at: DateTime<Utc>,
}

impl Query {
    /// Creates a query with an empty context, stamped with the clock's time.
    #[must_use]
    pub fn new(text: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            id: QueryId::new(),
            text: text.into(),
            context: QueryContext::new(),
            received_at: clock.utc(),
        }
    }

    /// Attaches structured context to the query.
    #[must_use]
    pub fn with_context(mut self, context: QueryContext) -> Self {
        self.context = context;
        self
    }

    /// Returns the query identifier.
    #[must_use]
    pub const fn id(&self) -> QueryId {
        self.id
    }

    /// Returns the raw query text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the structured context.
    #[must_use]
    pub const fn context(&self) -> &QueryContext {
        &self.context
    }

    /// Returns when the query was received.
    #[must_use]
    pub const fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}
