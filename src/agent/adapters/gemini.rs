//! Google Gemini text-generation adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::agent::ports::{GenerationError, GenerationRequest, GenerationResult, TextGenerator};

/// Text generator backed by the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiGenerator {
    base_url: String,
    model: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl fmt::Debug for GeminiGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiGenerator")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiGenerator {
    /// Creates a generator for `model` at `base_url`.
    ///
    /// `timeout` bounds each HTTP exchange.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> GenerationResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GenerationError::transport)?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            model: model.into(),
            api_key: api_key.into(),
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

fn extract_text(response: GenerateContentResponse) -> GenerationResult<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::InvalidResponse("no candidates in response".to_owned()))?;
    let content = candidate.content.ok_or_else(|| {
        GenerationError::InvalidResponse("candidate has no content".to_owned())
    })?;
    Ok(content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect())
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart {
                    text: request.prompt(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature().value(),
            },
        };

        debug!(model = %self.model, temperature = %request.temperature(), "calling Gemini");

        let response = self
            .http_client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(GenerationError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(GenerationError::RateLimited(text));
            }
            return Err(GenerationError::Backend {
                status: status.as_u16(),
                body: text,
            });
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| GenerationError::InvalidResponse(err.to_string()))?;
        extract_text(payload)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
