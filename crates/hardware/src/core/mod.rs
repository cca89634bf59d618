//! CPU core: architectural state, pipeline, and functional units.

/// CPU architectural and pipeline state.
pub mod cpu;

/// Five-stage pipeline: latches, signals, hazards, stages, and driver.
pub mod pipeline;

/// Functional units (ALU, caches).
pub mod units;

pub use cpu::Cpu;
