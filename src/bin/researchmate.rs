//! Answers a research question over local documents.
//!
//! Usage:
//!
//! ```text
//! researchmate [--config PATH] [--document PATH]... QUERY...
//! ```
//!
//! Each document's text is indexed as a single passage tagged with its file
//! name. The query is routed to one of the built-in research agents, which
//! answers through the Gemini API, and the response envelope is written to
//! stdout as JSON. The API key comes from `generator.api_key` in the config
//! file or from `GOOGLE_API_KEY`.

use mockable::DefaultClock;
use researchmate::{
    agent::{
        adapters::{GeminiGenerator, memory::InMemoryPassageIndex},
        domain::PassageMetadata,
        ports::{GenerationError, RetrievalError, TextGenerator},
        services::{CatalogError, research_catalog},
    },
    config::{ConfigError, ResearchConfig},
    orchestrator::{
        domain::{ProviderRegistry, RegistryError, ResponseEnvelope},
        services::QueryOrchestrator,
    },
    telemetry,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::info;

const USAGE: &str = "usage: researchmate [--config PATH] [--document PATH]... QUERY...";

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that stop the command before a query is answered.
#[derive(Debug, Error)]
enum CliError {
    #[error("invalid arguments: {0}\n{USAGE}")]
    InvalidArgs(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read document '{}': {source}", path.display())]
    DocumentRead { path: PathBuf, source: io::Error },
    #[error("failed to index document: {0}")]
    Index(#[from] RetrievalError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("failed to create generator: {0}")]
    Generator(#[from] GenerationError),
    #[error("failed to initialise runtime: {0}")]
    RuntimeInit(io::Error),
    #[error("failed to write response: {0}")]
    Output(io::Error),
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Parsed command-line arguments.
#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    config_path: Option<PathBuf>,
    documents: Vec<PathBuf>,
    query: String,
}

fn main() -> Result<(), BoxError> {
    let args = parse_args(collect_args()?.into_iter())?;
    let config = load_config(args.config_path.as_deref())?;
    telemetry::init(&config.log_level)?;

    let runtime = build_runtime()?;
    let envelope = runtime.block_on(answer(&config, &args))?;
    write_envelope(&mut io::stdout().lock(), &envelope)?;
    Ok(())
}

fn collect_args() -> Result<Vec<String>, CliError> {
    std::env::args_os()
        .skip(1)
        .map(|arg| {
            arg.into_string()
                .map_err(|_| CliError::InvalidArgs("argument is not valid UTF-8".into()))
        })
        .collect()
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, CliError> {
    let mut config_path = None;
    let mut documents = Vec::new();
    let mut words = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| CliError::InvalidArgs("--config requires a path".into()))?;
                config_path = Some(PathBuf::from(path));
            }
            "--document" => {
                let path = args
                    .next()
                    .ok_or_else(|| CliError::InvalidArgs("--document requires a path".into()))?;
                documents.push(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => {
                return Err(CliError::InvalidArgs(format!("unknown option '{flag}'")));
            }
            _ => words.push(arg),
        }
    }

    let query = words.join(" ");
    if query.trim().is_empty() {
        return Err(CliError::InvalidArgs("missing query".into()));
    }

    Ok(CliArgs {
        config_path,
        documents,
        query,
    })
}

fn load_config(path: Option<&Path>) -> Result<ResearchConfig, CliError> {
    path.map_or_else(
        || Ok(ResearchConfig::default()),
        |config_path| ResearchConfig::from_file(config_path).map_err(CliError::from),
    )
}

fn build_runtime() -> Result<tokio::runtime::Runtime, CliError> {
    Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::RuntimeInit)
}

async fn answer(config: &ResearchConfig, args: &CliArgs) -> Result<ResponseEnvelope, CliError> {
    let index = Arc::new(InMemoryPassageIndex::new());
    index_documents(&index, &args.documents)?;

    let api_key = config.generator.resolve_api_key()?;
    let generator = Arc::new(GeminiGenerator::new(
        config.generator.base_url.as_str(),
        config.generator.model.as_str(),
        api_key,
        config.generator.timeout(),
    )?);
    info!(
        model = generator.model_name(),
        documents = args.documents.len(),
        "answering query"
    );

    let orchestrator = build_orchestrator(config, &index, &generator)?;
    Ok(orchestrator.process_query(args.query.as_str(), None).await)
}

fn index_documents(index: &InMemoryPassageIndex, paths: &[PathBuf]) -> Result<(), CliError> {
    for path in paths {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::DocumentRead {
            path: path.clone(),
            source,
        })?;
        let source = path.file_name().map_or_else(
            || path.to_string_lossy().into_owned(),
            |name| name.to_string_lossy().into_owned(),
        );
        index.add_document(text, PassageMetadata::with_source(source))?;
    }
    Ok(())
}

fn build_orchestrator<G>(
    config: &ResearchConfig,
    index: &Arc<InMemoryPassageIndex>,
    generator: &Arc<G>,
) -> Result<QueryOrchestrator<G, DefaultClock>, CliError>
where
    G: TextGenerator + 'static,
{
    let providers = research_catalog(index, generator, config.catalog_settings())?;
    let registry = ProviderRegistry::builder(config.routing.default_provider_name()?)
        .register_all(providers)
        .build()?;
    Ok(QueryOrchestrator::new(
        Arc::new(registry),
        Arc::clone(generator),
        Arc::new(DefaultClock),
    )
    .with_routing_temperature(config.routing.temperature))
}

fn write_envelope(out: &mut impl Write, envelope: &ResponseEnvelope) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(envelope)?;
    writeln!(out, "{rendered}").map_err(CliError::Output)
}
