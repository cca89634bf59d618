//! Pipeline control signals.
//!
//! This module defines the control-signal bundle generated in the decode
//! stage and carried through the pipeline latches. It performs:
//! 1. **Bundle Definition:** The nine booleans that steer the later stages.
//! 2. **Canonical Bundles:** The five fixed bundles (R-type, load, store,
//!    I-type, NOP) every instruction class maps onto.
//! 3. **Control Decoding:** Opcode-to-bundle selection, with illegal opcodes
//!    reported to the caller.

use crate::common::constants::HALT_SENTINEL;
use crate::isa::decode::Decoded;
use crate::isa::opcodes::{self, op};

/// Control signals for pipeline stage execution.
///
/// All signals are generated during instruction decode. The default value is
/// the NOP bundle: every flag false, the value a squashed or initialized
/// latch carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Destination register select: `rd` when set, `rt` otherwise.
    pub reg_dst: bool,
    /// ALU function select, bit 1.
    pub alu_op1: bool,
    /// ALU function select, bit 2.
    pub alu_op2: bool,
    /// Second ALU operand is the immediate rather than a register.
    pub alu_src: bool,
    /// Instruction is a conditional branch.
    pub branch: bool,
    /// Enable memory read operation (load).
    pub mem_read: bool,
    /// Enable memory write operation (store).
    pub mem_write: bool,
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// Writeback source select: memory data when set, ALU result otherwise.
    pub mem_to_reg: bool,
}

/// Control bundle for R-type instructions.
pub const CONTROL_RTYPE: ControlSignals = ControlSignals {
    reg_dst: true,
    alu_op1: true,
    alu_op2: true,
    alu_src: false,
    branch: false,
    mem_read: false,
    mem_write: false,
    reg_write: true,
    mem_to_reg: false,
};

/// Control bundle for load-class instructions (LW/LHU/LBU/LUI).
pub const CONTROL_LOAD: ControlSignals = ControlSignals {
    reg_dst: false,
    alu_op1: false,
    alu_op2: false,
    alu_src: true,
    branch: false,
    mem_read: true,
    mem_write: false,
    reg_write: true,
    mem_to_reg: true,
};

/// Control bundle for store instructions (SB/SH/SW).
pub const CONTROL_STORE: ControlSignals = ControlSignals {
    reg_dst: false,
    alu_op1: false,
    alu_op2: false,
    alu_src: true,
    branch: false,
    mem_read: false,
    mem_write: true,
    reg_write: false,
    mem_to_reg: false,
};

/// Control bundle for non-load/store I-type instructions.
pub const CONTROL_ITYPE: ControlSignals = ControlSignals {
    reg_dst: false,
    alu_op1: true,
    alu_op2: false,
    alu_src: false,
    branch: false,
    mem_read: false,
    mem_write: false,
    reg_write: true,
    mem_to_reg: false,
};

/// Control bundle for a bubble; every flag false.
pub const CONTROL_NOP: ControlSignals = ControlSignals {
    reg_dst: false,
    alu_op1: false,
    alu_op2: false,
    alu_src: false,
    branch: false,
    mem_read: false,
    mem_write: false,
    reg_write: false,
    mem_to_reg: false,
};

/// Maps a decoded instruction onto its control bundle.
///
/// The halt sentinel and the J/JAL jumps carry the NOP bundle (JAL's link
/// write is a dedicated writeback path, not a register-write signal).
///
/// # Arguments
///
/// * `inst` - The decoded instruction.
///
/// # Returns
///
/// The control bundle, or `None` for an illegal opcode.
pub fn control_for(inst: &Decoded) -> Option<ControlSignals> {
    if inst.raw == HALT_SENTINEL {
        return Some(CONTROL_NOP);
    }
    if !opcodes::is_valid(inst.op) {
        return None;
    }

    let ctrl = if inst.op == op::RTYPE {
        CONTROL_RTYPE
    } else if opcodes::is_load(inst.op) {
        CONTROL_LOAD
    } else if opcodes::is_store(inst.op) {
        CONTROL_STORE
    } else if opcodes::is_itype_alu(inst.op) {
        CONTROL_ITYPE
    } else {
        CONTROL_NOP
    };
    Some(ctrl)
}
