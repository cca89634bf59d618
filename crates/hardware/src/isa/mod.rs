//! MIPS integer instruction set.
//!
//! This module covers everything the simulator knows about the instruction
//! encoding itself:
//! 1. **Field Extraction:** Bit-level access to R/I/J-format fields.
//! 2. **Opcodes:** Opcode and funct constants plus classification helpers.
//! 3. **Decoding:** The `Decoded` record with isolated fields and extended immediates.
//! 4. **ABI:** Register indices and names.
//! 5. **Disassembly:** Mnemonic rendering for debug tracing and diagnostics.

/// ABI register indices and names.
pub mod abi;

/// Instruction decoder producing the `Decoded` record.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Bit-level instruction field extraction.
pub mod instruction;

/// Opcode and funct constants with classification helpers.
pub mod opcodes;

pub use decode::{Decoded, decode};
pub use instruction::InstructionBits;
