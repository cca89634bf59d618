//! MIPS ABI register indices and names.

/// Register `$zero`, hardwired to zero.
pub const REG_ZERO: u32 = 0;
/// Register `$at`, assembler temporary.
pub const REG_AT: u32 = 1;
/// Register `$v0`, first result register.
pub const REG_V0: u32 = 2;
/// Register `$a0`, first argument register.
pub const REG_A0: u32 = 4;
/// Register `$t0`, first caller-saved temporary.
pub const REG_T0: u32 = 8;
/// Register `$s0`, first callee-saved register.
pub const REG_S0: u32 = 16;
/// Register `$gp`, global pointer.
pub const REG_GP: u32 = 28;
/// Register `$sp`, stack pointer.
pub const REG_SP: u32 = 29;
/// Register `$fp`, frame pointer.
pub const REG_FP: u32 = 30;
/// Register `$ra`, return address (written by JAL).
pub const REG_RA: u32 = 31;

/// ABI register names for `$0`-`$31`.
const REG_NAMES: [&str; 32] = [
    "$zero", "$at", "$v0", "$v1", "$a0", "$a1", "$a2", "$a3", "$t0", "$t1", "$t2", "$t3", "$t4",
    "$t5", "$t6", "$t7", "$s0", "$s1", "$s2", "$s3", "$s4", "$s5", "$s6", "$s7", "$t8", "$t9",
    "$k0", "$k1", "$gp", "$sp", "$fp", "$ra",
];

/// Returns the ABI name for a register index.
#[inline]
pub fn reg_name(idx: u32) -> &'static str {
    REG_NAMES.get(idx as usize).copied().unwrap_or("$??")
}
