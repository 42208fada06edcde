//! Machine-readable output formats for scan results.
//!
//! The line-oriented console output lives in [`crate::report`]; this module
//! holds the formats meant for other programs:
//! - JSON for automation and scripting

pub mod json;

// Re-export main types
pub use json::JsonOutput;
