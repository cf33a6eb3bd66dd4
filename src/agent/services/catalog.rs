//! Built-in research agents.

use std::sync::Arc;
use thiserror::Error;

use super::{GroundedProvider, ProviderProfile};
use crate::agent::{
    domain::{AgentDomainError, CapabilityDescriptor, CapabilityName, Temperature},
    ports::{CapabilityProvider, PassageRetriever, ProviderError, TextGenerator},
};

/// Name of the general-purpose analysis agent used as the routing fallback.
pub const DEFAULT_PROVIDER_NAME: &str = "Paper Analyzer";

const HINTS_BLOCK: &str = "{% if hints %}
Additional context supplied with the request:
{% for key, value in hints|items %}- {{ key }}: {{ value }}
{% endfor %}{% endif %}";

const ANALYZER_TEMPLATE: &str = "You are a research assistant analysing uploaded papers.
Answer the request using the excerpts below.

Excerpts:
{{ grounding }}

Request:
{{ query }}
{{ hints_block }}
Give a structured, detailed answer covering the summary, methodology and key findings where relevant.";

const INSIGHT_TEMPLATE: &str = "You are a research strategist. From the excerpts below, identify:
1. Open research gaps
2. Contradictions and limitations
3. Future directions and innovation angles

Excerpts:
{{ grounding }}

Request:
{{ query }}
{{ hints_block }}
Present the insights as structured Markdown.";

const COMPARATOR_TEMPLATE: &str = "You are a careful reviewer comparing the papers represented in the excerpts.
Cover methodology, datasets, evaluation metrics and results.

Excerpts:
{{ grounding }}

Request:
{{ query }}
{{ hints_block }}
Return a Markdown comparison table followed by a short narrative.";

const CODEGEN_TEMPLATE: &str = "You are a machine learning engineer. Write Python code implementing the methodology in the excerpts or the request.

Excerpts:
{{ grounding }}

Request:
{{ query }}
{{ hints_block }}
Return only Python inside fenced code blocks, comment each step, and stick to common libraries (pandas, numpy, scikit-learn, matplotlib, PyTorch or TensorFlow).";

const DASHBOARD_TEMPLATE: &str = "You are a data visualisation specialist planning a dashboard for the findings in the excerpts.

Excerpts:
{{ grounding }}

Request:
{{ query }}
{{ hints_block }}
Propose key performance indicators, chart types, a layout, and titles with short descriptions.";

const WRITER_TEMPLATE: &str = "You are a technical writer producing documentation from the excerpts and the request.

Excerpts:
{{ grounding }}

Request:
{{ query }}
{{ hints_block }}
Produce polished Markdown such as a README, report or blog post.";

/// Tunables shared by the built-in agents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogSettings {
    /// Sampling temperature for every agent.
    pub temperature: Temperature,
    /// Passages retrieved per query.
    pub default_top_k: usize,
    /// Passages retrieved per query by the comparison agent.
    pub comparison_top_k: usize,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            temperature: Temperature::CREATIVE,
            default_top_k: 4,
            comparison_top_k: 6,
        }
    }
}

/// Errors raised while assembling the built-in catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A descriptor failed validation.
    #[error(transparent)]
    Domain(#[from] AgentDomainError),
    /// A provider could not be constructed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

fn profile(
    name: &str,
    description: &str,
    template: &str,
    temperature: Temperature,
    top_k: usize,
) -> Result<ProviderProfile, AgentDomainError> {
    let descriptor = CapabilityDescriptor::new(CapabilityName::new(name)?, description)?;
    let instructions = template.replace("{{ hints_block }}", HINTS_BLOCK);
    Ok(ProviderProfile::new(
        descriptor,
        instructions,
        temperature,
        top_k,
    ))
}

/// Returns the six built-in agent profiles; the first is the default
/// provider.
///
/// # Errors
///
/// Returns [`AgentDomainError`] when a built-in descriptor fails validation.
pub fn research_profiles(
    settings: CatalogSettings,
) -> Result<Vec<ProviderProfile>, AgentDomainError> {
    let CatalogSettings {
        temperature,
        default_top_k,
        comparison_top_k,
    } = settings;
    Ok(vec![
        profile(
            DEFAULT_PROVIDER_NAME,
            "Extracts summaries, methodologies, and key findings from research papers.",
            ANALYZER_TEMPLATE,
            temperature,
            default_top_k,
        )?,
        profile(
            "Insight Generator",
            "Identifies research gaps, future scope, and innovation angles.",
            INSIGHT_TEMPLATE,
            temperature,
            default_top_k,
        )?,
        profile(
            "Paper Comparator",
            "Compares multiple papers on methodology, results, and metrics.",
            COMPARATOR_TEMPLATE,
            temperature,
            comparison_top_k,
        )?,
        profile(
            "Code Generator",
            "Generates Python code for EDA, ML models, and data processing.",
            CODEGEN_TEMPLATE,
            temperature,
            default_top_k,
        )?,
        profile(
            "Dashboard Planner",
            "Suggests KPIs, charts, and layout for visualizing research data.",
            DASHBOARD_TEMPLATE,
            temperature,
            default_top_k,
        )?,
        profile(
            "Documentation Writer",
            "Generates READMEs, reports, and documentation.",
            WRITER_TEMPLATE,
            temperature,
            default_top_k,
        )?,
    ])
}

/// Builds the built-in agents over shared retrieval and generation
/// backends.
///
/// # Errors
///
/// Returns [`CatalogError`] when a profile or provider cannot be built.
pub fn research_catalog<R, G>(
    retriever: &Arc<R>,
    generator: &Arc<G>,
    settings: CatalogSettings,
) -> Result<Vec<Arc<dyn CapabilityProvider>>, CatalogError>
where
    R: PassageRetriever + 'static,
    G: TextGenerator + 'static,
{
    research_profiles(settings)?
        .into_iter()
        .map(|profile| {
            let provider =
                GroundedProvider::new(profile, Arc::clone(retriever), Arc::clone(generator))?;
            Ok(Arc::new(provider) as Arc<dyn CapabilityProvider>)
        })
        .collect()
}
