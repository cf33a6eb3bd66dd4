//! Given steps for query routing BDD scenarios.

use super::world::QueryWorld;
use eyre::WrapErr;
use researchmate::agent::{domain::PassageMetadata, ports::GenerationError};
use rstest_bdd_macros::given;

#[given(r#"a document "{source}" containing "{text}""#)]
fn a_document_containing(
    world: &mut QueryWorld,
    source: String,
    text: String,
) -> Result<(), eyre::Report> {
    world
        .index
        .add_document(text, PassageMetadata::with_source(source))
        .wrap_err("index scenario document")
}

#[given(r#"the router selects "{agent}""#)]
fn the_router_selects(world: &mut QueryWorld, agent: String) -> Result<(), eyre::Report> {
    world
        .router_generator
        .push_reply(format!(
            r#"{{"agent_name": "{agent}", "reason": "chosen by scenario"}}"#
        ))
        .wrap_err("script routing reply")
}

#[given("the routing backend is unavailable")]
fn routing_backend_unavailable(world: &mut QueryWorld) -> Result<(), eyre::Report> {
    world
        .router_generator
        .push_error(GenerationError::transport(std::io::Error::other(
            "connection refused",
        )))
        .wrap_err("script routing failure")
}

#[given(r#"the agent replies "{answer}""#)]
fn the_agent_replies(world: &mut QueryWorld, answer: String) -> Result<(), eyre::Report> {
    world
        .agent_generator
        .push_reply(answer)
        .wrap_err("script agent reply")
}

#[given("the agent backend is rate limited")]
fn agent_backend_rate_limited(world: &mut QueryWorld) -> Result<(), eyre::Report> {
    world
        .agent_generator
        .push_error(GenerationError::RateLimited(
            "Resource has been exhausted".to_owned(),
        ))
        .wrap_err("script agent rate limit")
}
