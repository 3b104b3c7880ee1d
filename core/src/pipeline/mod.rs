// caller/src/pipeline/mod.rs

//! Defines the `Pipeline` struct, its construction, queue mutation and execution logic.

pub mod definition;
pub mod execution;

// Re-export the main Pipeline struct
pub use definition::Pipeline;
