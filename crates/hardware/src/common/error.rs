//! Exception and simulator error definitions.
//!
//! This module defines the two error strata of the simulator:
//! 1. **Architectural Exceptions:** Synchronous events the modeled machine raises
//!    (integer overflow, illegal opcode). These flow through pipeline state,
//!    squash in-flight stages, and redirect the PC to the exception vector.
//! 2. **Host-Level Errors:** Failures of the simulation itself (bad cache
//!    geometry, unreadable program image, out-of-range memory access). These
//!    integrate with standard Rust error handling.

use std::fmt;

/// Architectural exceptions raised by the modeled processor.
///
/// An exception sets a one-bit flag in the pipeline state, squashes in-flight
/// stages, and redirects the PC to the exception vector. There is no
/// exception-return mechanism in this machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Exception {
    /// Signed integer overflow on ADD, ADDI, or SUB.
    ///
    /// Detected in the execute stage. The offending instruction's writeback
    /// is squashed.
    IntegerOverflow,

    /// Unrecognized opcode field.
    ///
    /// Detected in the decode stage. The associated value is the instruction
    /// encoding.
    IllegalInstruction(u32),
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntegerOverflow => write!(f, "IntegerOverflow"),
            Self::IllegalInstruction(inst) => write!(f, "IllegalInstruction({:#010x})", inst),
        }
    }
}

impl std::error::Error for Exception {}

/// Host-level simulator errors.
///
/// These are failures of the simulation environment rather than of the
/// modeled program; they are reported to the caller instead of being
/// simulated as architectural exceptions.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Invalid simulator or cache configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The program image could not be read from disk.
    #[error("could not read program image: {0}")]
    Image(#[from] std::io::Error),

    /// A memory access fell outside the backing store.
    #[error("memory access out of range: addr={addr:#010x} size={size} bytes")]
    MemoryRange {
        /// The faulting byte address.
        addr: u32,
        /// The access width in bytes.
        size: u32,
    },
}
