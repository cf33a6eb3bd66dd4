//! Sampling temperature for text generation.

use super::AgentDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_TEMPERATURE: f32 = 2.0;

/// Sampling temperature passed to the text-generation backend.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Temperature(f32);

impl Temperature {
    /// Low temperature used for routing decisions.
    pub const ROUTING: Self = Self(0.3);

    /// Temperature used by the built-in research agents.
    pub const CREATIVE: Self = Self(0.7);

    /// Creates a validated temperature.
    ///
    /// # Errors
    ///
    /// Returns [`AgentDomainError::TemperatureOutOfRange`] when the value is
    /// not finite or lies outside `0.0..=2.0`.
    pub fn new(value: f32) -> Result<Self, AgentDomainError> {
        if value.is_finite() && (0.0..=MAX_TEMPERATURE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AgentDomainError::TemperatureOutOfRange(value))
        }
    }

    /// Returns the raw temperature value.
    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for Temperature {
    type Error = AgentDomainError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Temperature> for f32 {
    fn from(value: Temperature) -> Self {
        value.0
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
