//! MIPS General-Purpose Register File.
//!
//! This module implements the general-purpose register file. It performs the
//! following:
//! 1. **Storage:** Maintains 32 integer registers (`$0`-`$31`).
//! 2. **Invariant Enforcement:** Ensures that register `$zero` is hardwired to zero.
//! 3. **Debugging:** Provides a register dump with ABI names.

use crate::common::constants::NUM_REGS;
use crate::isa::abi;

/// General-purpose register file.
///
/// Contains 32 registers used for integer operations. Register `$zero` is
/// hardwired to zero and cannot be modified.
#[derive(Clone, Debug)]
pub struct RegisterFile {
    regs: [u32; NUM_REGS],
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Reads a register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `$zero` always returns 0.
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the specified register.
    pub fn read(&self, idx: u32) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx as usize] }
    }

    /// Writes a value to a register.
    ///
    /// Writes to `$zero` are silently dropped.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 32-bit value to write.
    pub fn write(&mut self, idx: u32, val: u32) {
        if idx != 0 {
            self.regs[idx as usize] = val;
        }
    }

    /// Dumps the contents of all registers to stdout.
    ///
    /// Displays registers in pairs with their ABI names and hexadecimal
    /// values.
    pub fn dump(&self) {
        for i in (0..NUM_REGS).step_by(2) {
            println!(
                "{:>5}={:#010x} {:>5}={:#010x}",
                abi::reg_name(i as u32),
                self.regs[i],
                abi::reg_name(i as u32 + 1),
                self.regs[i + 1]
            );
        }
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
