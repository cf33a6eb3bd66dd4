//! In-memory adapters for local runs and tests.

mod passage_index;
mod scripted_generator;

pub use passage_index::InMemoryPassageIndex;
pub use scripted_generator::ScriptedGenerator;
