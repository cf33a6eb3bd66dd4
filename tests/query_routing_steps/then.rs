//! Then steps for query routing BDD scenarios.

use super::world::QueryWorld;
use rstest_bdd_macros::then;

#[then(r#"the response status is "{status}""#)]
fn response_status_is(world: &QueryWorld, status: String) -> Result<(), eyre::Report> {
    let envelope = world.envelope()?;
    if envelope.status().as_str() != status {
        return Err(eyre::eyre!(
            "expected status '{status}', got '{}' ({envelope:?})",
            envelope.status()
        ));
    }
    Ok(())
}

#[then(r#"the responding agent is "{agent}""#)]
fn responding_agent_is(world: &QueryWorld, agent: String) -> Result<(), eyre::Report> {
    let envelope = world.envelope()?;
    if envelope.agent().as_str() != agent {
        return Err(eyre::eyre!(
            "expected agent '{agent}', got '{}'",
            envelope.agent()
        ));
    }
    Ok(())
}

#[then("the response lists {count:usize} sources")]
fn response_lists_sources(world: &QueryWorld, count: usize) -> Result<(), eyre::Report> {
    let result = world
        .envelope()?
        .as_success()
        .ok_or_else(|| eyre::eyre!("expected a successful response"))?;
    if result.sources().len() != count {
        return Err(eyre::eyre!(
            "expected {count} sources, found {:?}",
            result.sources()
        ));
    }
    Ok(())
}

#[then(r#"the response answer is "{answer}""#)]
fn response_answer_is(world: &QueryWorld, answer: String) -> Result<(), eyre::Report> {
    let envelope = world.envelope()?;
    if envelope.answer() != answer {
        return Err(eyre::eyre!(
            "expected answer '{answer}', got '{}'",
            envelope.answer()
        ));
    }
    Ok(())
}

#[then(r#"the agent prompt contains "{text}""#)]
fn agent_prompt_contains(world: &QueryWorld, text: String) -> Result<(), eyre::Report> {
    let requests = world
        .agent_generator
        .requests()
        .map_err(|err| eyre::eyre!("reading agent requests failed: {err}"))?;
    let prompt = requests
        .last()
        .ok_or_else(|| eyre::eyre!("the agent backend was never called"))?
        .prompt();
    if !prompt.contains(&text) {
        return Err(eyre::eyre!("agent prompt does not contain '{text}':\n{prompt}"));
    }
    Ok(())
}
