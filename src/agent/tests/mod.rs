//! Unit tests for the agent module.

mod provider_tests;
