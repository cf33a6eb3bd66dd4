//! Capability provider implementations.

mod catalog;
mod grounded;

pub use catalog::{
    CatalogError, CatalogSettings, DEFAULT_PROVIDER_NAME, research_catalog, research_profiles,
};
pub use grounded::{GroundedProvider, ProviderProfile};
