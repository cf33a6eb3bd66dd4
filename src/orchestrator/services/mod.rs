//! Orchestration services: routing and dispatch.

mod dispatcher;
mod router;

pub use dispatcher::QueryOrchestrator;
pub use router::{Router, RoutingFailure};
