//! Cycle-accurate MIPS pipeline simulator library.
//!
//! This crate implements a cycle-accurate simulator for a five-stage in-order
//! 32-bit MIPS integer pipeline with the following:
//! 1. **Core:** The five-stage pipeline (Fetch, Decode, Execute, Memory,
//!    Writeback) with hazard detection, two forwarding networks, and
//!    branch resolution in decode.
//! 2. **Memory:** Independent set-associative write-back LRU instruction and
//!    data caches over a flat big-endian memory store.
//! 3. **ISA:** Decoding, control generation, and execution for the classic
//!    MIPS integer instruction set, plus a disassembler.
//! 4. **Simulation:** [`Simulator`] (owns the CPU), the program-image loader,
//!    configuration, and statistics.

/// Common types and constants (sizes, errors, registers).
pub mod common;
/// Simulator configuration (defaults, cache geometry, validation).
pub mod config;
/// CPU core (state, pipeline, functional units).
pub mod core;
/// Instruction set (fields, opcodes, decode, ABI, disassembly).
pub mod isa;
/// Flat byte-addressable backing memory.
pub mod mem;
/// Simulation: `Simulator`, program loader.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `SimConfig::default()` or deserialize from JSON.
pub use crate::config::SimConfig;
/// Main CPU type; holds registers, latches, caches, and stats.
pub use crate::core::Cpu;
/// Flat backing memory shared by both caches.
pub use crate::mem::MemoryStore;
/// Top-level simulator; owns the CPU and the pipe trace.
pub use crate::sim::Simulator;
