//! Error types for orchestration domain construction.

use super::DispatchState;
use crate::agent::domain::CapabilityName;
use thiserror::Error;

/// Errors returned while building the provider registry.
///
/// These are startup failures; a registry that builds successfully can
/// always resolve its default provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// No providers were registered.
    #[error("provider registry must contain at least one provider")]
    Empty,

    /// Two providers share a name.
    #[error("duplicate provider name: {0}")]
    DuplicateProvider(CapabilityName),

    /// The designated default provider was never registered.
    #[error("default provider '{0}' is not registered")]
    MissingDefaultProvider(CapabilityName),
}

/// Error returned when a dispatch state transition is not allowed.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid dispatch transition: {from} -> {to}")]
pub struct InvalidDispatchTransition {
    /// Current state.
    pub from: DispatchState,
    /// Requested state.
    pub to: DispatchState,
}
