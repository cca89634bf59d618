//! Common constants used throughout the simulator.

/// Instruction word that marks the end of the program.
///
/// The sentinel propagates through the pipeline as a bubble; when it reaches
/// the writeback stage, execution terminates.
pub const HALT_SENTINEL: u32 = 0xFEED_FEED;

/// Exception vector address.
///
/// Integer overflow and illegal-opcode exceptions redirect the program
/// counter here. A handler must be present in the program image; there is no
/// exception-return mechanism in this machine.
pub const EXCEPTION_ADDR: u32 = 0x8000;

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 32;

/// Size of one instruction word in bytes.
pub const WORD_BYTES: u32 = 4;

/// Default size of the flat memory store in bytes (1 MiB).
///
/// Large enough to hold a program image at address 0, the exception handler
/// at [`EXCEPTION_ADDR`], and working data above both.
pub const DEFAULT_MEMORY_BYTES: usize = 1024 * 1024;
