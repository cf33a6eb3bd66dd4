//! Capability providers for ResearchMate.
//!
//! A capability provider is one specialised research agent: it retrieves
//! grounding passages for a query, renders its instruction template, and asks
//! a text-generation backend for the answer. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Provider implementations and the built-in catalog in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
