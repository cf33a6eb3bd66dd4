//! Query orchestration for ResearchMate.
//!
//! The orchestrator decides which capability provider should answer a
//! natural-language request, dispatches the request, and turns any provider
//! failure into a classified response envelope. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`] (registry, routing decision, envelope,
//!   failure classification, dispatch state)
//! - Orchestration services in [`services`] (router and dispatcher)
//!
//! Ports and adapters are shared with [`crate::agent`].

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
