//! Simulation: the `Simulator` driver and the program-image loader.

/// Program-image loader.
pub mod loader;

/// Top-level simulator.
pub mod simulator;

pub use simulator::{RunStatus, Simulator};
