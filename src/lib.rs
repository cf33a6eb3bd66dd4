//! ResearchMate: multi-agent research assistant core.
//!
//! Uploaded documents are indexed as passages; specialised research agents
//! answer queries grounded in those passages, and an orchestrator routes each
//! query to the agent best suited to it.
//!
//! # Architecture
//!
//! ResearchMate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure value types and policies with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for retrieval and text generation
//! - **Adapters**: Concrete implementations of ports (Gemini HTTP API,
//!   in-memory index)
//!
//! # Modules
//!
//! - [`agent`]: Capability providers and their ports and adapters
//! - [`orchestrator`]: Provider registry, routing and dispatch
//! - [`config`]: TOML configuration
//! - [`telemetry`]: Tracing subscriber setup for binaries

pub mod agent;
pub mod config;
pub mod orchestrator;
pub mod telemetry;
