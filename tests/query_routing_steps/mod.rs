//! Step definitions for query routing BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
