//! Functional units used by the pipeline stages.

/// Integer ALU with overflow detection.
pub mod alu;

/// Set-associative write-back cache.
pub mod cache;
