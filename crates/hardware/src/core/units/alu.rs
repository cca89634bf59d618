//! Integer ALU.
//!
//! Implements the arithmetic and logic operations dispatched by the execute
//! stage: the R-type funct family and the I-type opcode family. ADD, ADDI,
//! and SUB detect signed overflow; the U-variants wrap silently.
//!
//! Branches and jumps are resolved in the decode stage and never reach the
//! ALU. Loads and stores compute their effective address here.

use crate::common::error::Exception;
use crate::isa::decode::Decoded;
use crate::isa::opcodes::{funct, op};

/// Executes an R-type operation selected by the funct field.
///
/// `JR` is handled by the execute stage before dispatch and never reaches
/// this function. Unknown funct encodings yield `0`.
///
/// # Arguments
///
/// * `inst` - The decoded instruction (provides `funct` and `shamt`).
/// * `rs_val` - First operand, after forwarding.
/// * `rt_val` - Second operand, after forwarding.
///
/// # Returns
///
/// The 32-bit ALU result.
///
/// # Errors
///
/// Returns [`Exception::IntegerOverflow`] for ADD/SUB signed overflow.
pub fn execute_r(inst: &Decoded, rs_val: u32, rt_val: u32) -> Result<u32, Exception> {
    let result = match inst.funct {
        funct::ADD => checked_add(rs_val, rt_val)?,
        funct::ADDU => rs_val.wrapping_add(rt_val),
        funct::SUB => checked_sub(rs_val, rt_val)?,
        funct::SUBU => rs_val.wrapping_sub(rt_val),
        funct::AND => rs_val & rt_val,
        funct::OR => rs_val | rt_val,
        funct::NOR => !(rs_val | rt_val),
        funct::SLT => u32::from((rs_val as i32) < (rt_val as i32)),
        funct::SLTU => u32::from(rs_val < rt_val),
        funct::SLL => rt_val << inst.shamt,
        funct::SRL => rt_val >> inst.shamt,
        _ => 0,
    };
    Ok(result)
}

/// Executes an I-type ALU, load, or store operation selected by the opcode.
///
/// Loads and stores compute the effective address `rs + sign_ext_imm`; the
/// memory stage performs the actual access. LUI shifts the raw immediate into
/// the upper halfword. Branches resolve in decode and yield `0` here.
///
/// # Arguments
///
/// * `inst` - The decoded instruction (provides opcode and immediates).
/// * `rs_val` - First operand, after forwarding.
///
/// # Returns
///
/// The 32-bit ALU result (an effective address for loads and stores).
///
/// # Errors
///
/// Returns [`Exception::IntegerOverflow`] for ADDI signed overflow.
pub fn execute_i(inst: &Decoded, rs_val: u32) -> Result<u32, Exception> {
    let se_imm = inst.sign_ext_imm;
    let ze_imm = inst.zero_ext_imm;
    let addr = rs_val.wrapping_add(se_imm);

    let result = match inst.op {
        op::ADDI => checked_add(rs_val, se_imm)?,
        op::ADDIU => rs_val.wrapping_add(se_imm),
        op::ANDI => rs_val & ze_imm,
        op::ORI => rs_val | ze_imm,
        op::SLTI => u32::from((rs_val as i32) < (se_imm as i32)),
        op::SLTIU => u32::from(rs_val < se_imm),
        op::LUI => inst.imm << 16,
        op::LW | op::LHU | op::LBU | op::SW | op::SH | op::SB => addr,
        _ => 0,
    };
    Ok(result)
}

/// Signed addition with overflow detection.
fn checked_add(a: u32, b: u32) -> Result<u32, Exception> {
    (a as i32)
        .checked_add(b as i32)
        .map(|v| v as u32)
        .ok_or(Exception::IntegerOverflow)
}

/// Signed subtraction with overflow detection.
fn checked_sub(a: u32, b: u32) -> Result<u32, Exception> {
    (a as i32)
        .checked_sub(b as i32)
        .map(|v| v as u32)
        .ok_or(Exception::IntegerOverflow)
}
