//! Adapter implementations for capability provider ports.

pub mod gemini;
pub mod memory;

pub use gemini::GeminiGenerator;
