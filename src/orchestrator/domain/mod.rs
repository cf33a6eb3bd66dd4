//! Domain model for routing and dispatch.

mod decision;
mod envelope;
mod error;
mod failure;
mod registry;
mod state;

pub use decision::{DecisionOrigin, RoutingDecision, RoutingSelection};
pub use envelope::{EnvelopeStatus, FailureEnvelope, ResponseEnvelope};
pub use error::{InvalidDispatchTransition, RegistryError};
pub use failure::{FailureClass, QUOTA_EXCEEDED_MESSAGE, classify_failure};
pub use registry::{ProviderRegistry, ProviderRegistryBuilder};
pub use state::DispatchState;
