//! Domain model for capability providers.
//!
//! Queries, capability descriptors, retrieved passages and agent results are
//! plain value objects. All infrastructure concerns are kept outside the
//! domain boundary.

mod descriptor;
mod error;
mod name;
mod passage;
mod query;
mod result;
mod temperature;

pub use descriptor::CapabilityDescriptor;
pub use error::AgentDomainError;
pub use name::CapabilityName;
pub use passage::{Passage, PassageMetadata};
pub use query::{Query, QueryContext, QueryId};
pub use result::AgentResult;
pub use temperature::Temperature;
