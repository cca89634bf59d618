//! Common utilities and types used throughout the MIPS pipeline simulator.
//!
//! This module provides fundamental building blocks that are shared across all
//! components of the simulator. It includes:
//! 1. **Constants:** System-wide constants (halt sentinel, exception vector, word size).
//! 2. **Memory Access:** The access-size taxonomy for byte/half/word operations.
//! 3. **Error Handling:** Architectural exceptions and host-level simulator errors.
//! 4. **Register Management:** The 32-entry general-purpose register file.

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access size definitions.
pub mod data;

/// Error types: architectural exceptions and host-level failures.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{EXCEPTION_ADDR, HALT_SENTINEL, NUM_REGS, WORD_BYTES};
pub use data::MemSize;
pub use error::{Exception, SimError};
pub use reg::RegisterFile;
