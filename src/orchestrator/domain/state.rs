//! Per-query dispatch state machine.

use super::{FailureClass, InvalidDispatchTransition};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a single query inside the dispatcher.
///
/// `Routing → Dispatching → {Succeeded | FailedQuota | FailedOther}`; there
/// are no retries, so terminal states never move again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchState {
    /// A provider is being selected.
    Routing,
    /// The selected provider is running.
    Dispatching,
    /// The provider answered.
    Succeeded,
    /// The provider failed on a usage limit.
    FailedQuota,
    /// The provider failed for another reason.
    FailedOther,
}

impl DispatchState {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Routing => "routing",
            Self::Dispatching => "dispatching",
            Self::Succeeded => "succeeded",
            Self::FailedQuota => "failed_quota",
            Self::FailedOther => "failed_other",
        }
    }

    /// Returns the terminal state for a classified failure.
    #[must_use]
    pub const fn failed(class: FailureClass) -> Self {
        match class {
            FailureClass::Quota => Self::FailedQuota,
            FailureClass::Other => Self::FailedOther,
        }
    }

    /// Returns whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::FailedQuota | Self::FailedOther)
    }

    /// Returns whether moving to `next` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Routing, Self::Dispatching)
                | (
                    Self::Dispatching,
                    Self::Succeeded | Self::FailedQuota | Self::FailedOther
                )
        )
    }

    /// Moves to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDispatchTransition`] when the transition is not
    /// allowed.
    pub const fn transition_to(self, next: Self) -> Result<Self, InvalidDispatchTransition> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(InvalidDispatchTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
