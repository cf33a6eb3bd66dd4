//! Unit tests for the orchestrator module.

mod domain_tests;
mod support;
