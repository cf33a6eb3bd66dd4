//! Unit tests for grounded providers and the built-in catalog.

use async_trait::async_trait;
use mockable::DefaultClock;
use mockall::{mock, predicate::eq};
use rstest::{fixture, rstest};
use serde_json::json;
use std::sync::Arc;

use crate::agent::{
    adapters::memory::{InMemoryPassageIndex, ScriptedGenerator},
    domain::{
        CapabilityDescriptor, CapabilityName, Passage, PassageMetadata, Query, QueryContext,
        Temperature,
    },
    ports::{
        CapabilityProvider, GenerationError, GenerationRequest, GenerationResult,
        PassageRetriever, ProviderError, RetrievalError, RetrievalResult, TextGenerator,
    },
    services::{
        CatalogSettings, DEFAULT_PROVIDER_NAME, GroundedProvider, ProviderProfile,
        research_catalog, research_profiles,
    },
};

mock! {
    Retriever {}

    #[async_trait]
    impl PassageRetriever for Retriever {
        async fn similarity_search(&self, query_text: &str, k: usize)
            -> RetrievalResult<Vec<Passage>>;
    }
}

mock! {
    Generator {}

    #[async_trait]
    impl TextGenerator for Generator {
        async fn generate(&self, request: &GenerationRequest) -> GenerationResult<String>;
        fn model_name(&self) -> &str;
    }
}

const TEMPLATE: &str = "Context:\n{{ grounding }}\nQuestion: {{ query }}\n\
{% for key, value in hints|items %}{{ key }}={{ value }}\n{% endfor %}";

#[fixture]
fn profile() -> ProviderProfile {
    let descriptor = CapabilityDescriptor::new(
        CapabilityName::new("Paper Analyzer").expect("valid name"),
        "Summarises papers.",
    )
    .expect("valid descriptor");
    ProviderProfile::new(descriptor, TEMPLATE, Temperature::CREATIVE, 4)
}

fn passages() -> Vec<Passage> {
    vec![
        Passage::new("Attention is all you need.", PassageMetadata::with_source("a.pdf")),
        Passage::new("BLEU improves by two points.", PassageMetadata::new()),
    ]
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn run_grounds_prompt_in_retrieved_passages(profile: ProviderProfile) {
    let mut retriever = MockRetriever::new();
    retriever
        .expect_similarity_search()
        .with(eq("What does the paper claim?"), eq(4))
        .times(1)
        .returning(|_, _| Ok(passages()));
    let mut generator = MockGenerator::new();
    generator
        .expect_generate()
        .withf(|request| {
            request.prompt().contains(
                "Context:\nAttention is all you need.\n\nBLEU improves by two points.\n",
            ) && request.prompt().contains("Question: What does the paper claim?")
                && request.temperature() == Temperature::CREATIVE
        })
        .times(1)
        .returning(|_| Ok("It claims attention suffices.".to_owned()));
    let provider = GroundedProvider::new(profile, Arc::new(retriever), Arc::new(generator))
        .expect("provider should build");

    let result = provider
        .run(&Query::new("What does the paper claim?", &DefaultClock))
        .await
        .expect("run should succeed");

    assert_eq!(result.provider_name().as_str(), "Paper Analyzer");
    assert_eq!(result.answer(), "It claims attention suffices.");
    assert_eq!(result.sources(), [Some("a.pdf".to_owned()), None]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn query_context_is_rendered_as_hints(profile: ProviderProfile) {
    let generator = Arc::new(ScriptedGenerator::new("ok"));
    let provider = GroundedProvider::new(
        profile,
        Arc::new(InMemoryPassageIndex::new()),
        Arc::clone(&generator),
    )
    .expect("provider should build");
    let query = Query::new("Summarise", &DefaultClock)
        .with_context(QueryContext::new().with_entry("section", json!("results")));

    provider.run(&query).await.expect("run should succeed");

    let requests = generator.requests().expect("requests should be recorded");
    let prompt = requests.first().map(GenerationRequest::prompt).unwrap_or_default();
    assert!(prompt.contains("section=results"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn retrieval_failure_propagates_without_generation(profile: ProviderProfile) {
    let mut retriever = MockRetriever::new();
    retriever.expect_similarity_search().returning(|_, _| {
        Err(RetrievalError::search(std::io::Error::other("index offline")))
    });
    let mut generator = MockGenerator::new();
    generator.expect_generate().never();
    let provider = GroundedProvider::new(profile, Arc::new(retriever), Arc::new(generator))
        .expect("provider should build");

    let error = provider
        .run(&Query::new("Summarise", &DefaultClock))
        .await
        .expect_err("run should fail");

    assert!(matches!(error, ProviderError::Retrieval(_)));
    assert!(error.to_string().contains("index offline"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rate_limit_propagates_with_status_code(profile: ProviderProfile) {
    let generator = Arc::new(ScriptedGenerator::new("unused"));
    generator
        .push_error(GenerationError::RateLimited("quota exhausted".to_owned()))
        .expect("script should accept error");
    let provider =
        GroundedProvider::new(profile, Arc::new(InMemoryPassageIndex::new()), generator)
            .expect("provider should build");

    let error = provider
        .run(&Query::new("Summarise", &DefaultClock))
        .await
        .expect_err("run should fail");

    assert!(matches!(
        error,
        ProviderError::Generation(GenerationError::RateLimited(_))
    ));
    assert!(error.to_string().starts_with("429"));
}

#[rstest]
fn malformed_template_is_rejected_at_construction() {
    let descriptor = CapabilityDescriptor::new(
        CapabilityName::new("Broken Agent").expect("valid name"),
        "Never renders.",
    )
    .expect("valid descriptor");
    let profile = ProviderProfile::new(descriptor, "{% for x in %}", Temperature::CREATIVE, 4);

    let result = GroundedProvider::new(
        profile,
        Arc::new(InMemoryPassageIndex::new()),
        Arc::new(ScriptedGenerator::new("unused")),
    );

    assert!(matches!(
        result,
        Err(ProviderError::Prompt { provider, .. }) if provider == "Broken Agent"
    ));
}

// ── Built-in catalog ───────────────────────────────────────────────

#[rstest]
fn catalog_lists_six_agents_with_default_first() {
    let profiles = research_profiles(CatalogSettings::default()).expect("profiles should build");

    let names: Vec<&str> = profiles
        .iter()
        .map(|profile| profile.descriptor().name().as_str())
        .collect();
    assert_eq!(
        names,
        [
            DEFAULT_PROVIDER_NAME,
            "Insight Generator",
            "Paper Comparator",
            "Code Generator",
            "Dashboard Planner",
            "Documentation Writer",
        ]
    );
}

#[rstest]
fn comparison_agent_retrieves_more_passages() {
    let settings = CatalogSettings {
        temperature: Temperature::CREATIVE,
        default_top_k: 3,
        comparison_top_k: 8,
    };
    let profiles = research_profiles(settings).expect("profiles should build");

    for profile in &profiles {
        let expected = if profile.descriptor().name().as_str() == "Paper Comparator" {
            8
        } else {
            3
        };
        assert_eq!(profile.top_k(), expected, "{}", profile.descriptor().name());
        assert_eq!(profile.temperature(), Temperature::CREATIVE);
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_catalog_template_renders() {
    let index = Arc::new(InMemoryPassageIndex::new());
    index
        .add_document("A study of graph networks.", PassageMetadata::with_source("g.pdf"))
        .expect("document should be indexed");
    let generator = Arc::new(ScriptedGenerator::new("answer"));
    let providers = research_catalog(&index, &generator, CatalogSettings::default())
        .expect("catalog should build");
    let query = Query::new("graph networks", &DefaultClock)
        .with_context(QueryContext::new().with_entry("format", json!("markdown")));

    for provider in &providers {
        let result = provider.run(&query).await.expect("run should succeed");
        assert_eq!(result.sources(), [Some("g.pdf".to_owned())]);
    }

    let requests = generator.requests().expect("requests should be recorded");
    assert_eq!(requests.len(), 6);
    assert!(requests.iter().all(|request| {
        request.prompt().contains("A study of graph networks.")
            && request.prompt().contains("format: markdown")
    }));
}
