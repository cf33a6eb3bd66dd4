//! Deterministic text generator driven by a reply script.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::agent::ports::{GenerationError, GenerationRequest, GenerationResult, TextGenerator};

/// Text generator that replays queued outcomes.
///
/// Each call pops the next scripted reply or error. Once the script is
/// exhausted the default reply is returned. Every request is recorded.
#[derive(Debug, Clone)]
pub struct ScriptedGenerator {
    model: String,
    default_reply: String,
    state: Arc<Mutex<ScriptState>>,
}

#[derive(Debug, Default)]
struct ScriptState {
    script: VecDeque<GenerationResult<String>>,
    requests: Vec<GenerationRequest>,
}

impl ScriptedGenerator {
    /// Creates a generator that always answers with `default_reply` unless
    /// outcomes are queued.
    #[must_use]
    pub fn new(default_reply: impl Into<String>) -> Self {
        Self {
            model: "scripted".to_owned(),
            default_reply: default_reply.into(),
            state: Arc::new(Mutex::new(ScriptState::default())),
        }
    }

    /// Queues a successful reply.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when lock acquisition fails.
    pub fn push_reply(&self, reply: impl Into<String>) -> GenerationResult<()> {
        self.push(Ok(reply.into()))
    }

    /// Queues a failure.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when lock acquisition fails.
    pub fn push_error(&self, error: GenerationError) -> GenerationResult<()> {
        self.push(Err(error))
    }

    /// Returns every request received so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when lock acquisition fails.
    pub fn requests(&self) -> GenerationResult<Vec<GenerationRequest>> {
        let state = self.lock()?;
        Ok(state.requests.clone())
    }

    fn push(&self, outcome: GenerationResult<String>) -> GenerationResult<()> {
        let mut state = self.lock()?;
        state.script.push_back(outcome);
        Ok(())
    }

    fn lock(&self) -> GenerationResult<std::sync::MutexGuard<'_, ScriptState>> {
        self.state
            .lock()
            .map_err(|err| GenerationError::transport(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<String> {
        let mut state = self.lock()?;
        state.requests.push(request.clone());
        state
            .script
            .pop_front()
            .unwrap_or_else(|| Ok(self.default_reply.clone()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
