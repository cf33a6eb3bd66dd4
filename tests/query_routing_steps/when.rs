//! When steps for query routing BDD scenarios.

use super::world::{QueryWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"the query "{text}" is processed"#)]
fn the_query_is_processed(world: &mut QueryWorld, text: String) {
    let envelope = run_async(world.orchestrator.process_query(text, None));
    world.last_envelope = Some(envelope);
}
