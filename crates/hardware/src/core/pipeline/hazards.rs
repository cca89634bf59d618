//! Data Hazard Detection and Forwarding.
//!
//! This module implements the logic for maintaining pipeline consistency when
//! data dependencies exist between in-flight instructions. It provides:
//! 1. **EX-Input Forwarding:** Bypasses results from the memory or writeback
//!    stage into the execute stage's operands.
//! 2. **Branch-Input Forwarding:** Bypasses results (or demands stalls) for
//!    branch comparisons resolved in the decode stage.
//! 3. **Store-Data Forwarding:** Bypasses the writeback value into the memory
//!    stage for back-to-back load/store pairs.
//! 4. **Load-Use Detection:** Identifies the one hazard forwarding cannot
//!    hide and raises a one-cycle stall.
//!
//! All detection runs once per cycle in the driver, over cycle-start latch
//! state; the decisions are small value records consumed by the stages. The
//! forwarded *values* are published onto the `mem_value`/`wb_value` buses by
//! the memory and writeback stages as they execute.

use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb};
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::abi;
use crate::isa::decode::Decoded;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::{self, op};

/// Forwarding source for an execute-stage operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Forward {
    /// No hazard; use the value read from the register file in decode.
    #[default]
    None,
    /// Producer is in the memory stage; use the ALU-result bus.
    Mem,
    /// Producer is in the writeback stage; use the writeback bus.
    Wb,
}

/// Forwarding source for a branch operand compared in the decode stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BranchForward {
    /// No hazard; use the register file.
    #[default]
    None,
    /// Producer is entering execute this cycle; the branch must stall.
    Execute,
    /// Producer is a non-load in the memory stage; use the ALU-result bus.
    Mem,
    /// Producer is a load in the memory stage; stall, then forward next cycle.
    LoadMem,
    /// Producer is in the writeback stage; use the writeback bus.
    Wb,
}

/// Returns the architectural destination register of an in-flight instruction.
///
/// JAL writes the link register through a dedicated path; everything else
/// follows the `reg_dst` select.
#[inline]
pub fn dest_reg(inst: &Decoded, ctrl: &ControlSignals) -> u32 {
    if inst.op == op::JAL {
        abi::REG_RA
    } else if ctrl.reg_dst {
        inst.rd
    } else {
        inst.rt
    }
}

/// Returns true if an in-flight instruction will write a register.
#[inline]
pub fn writes_reg(inst: &Decoded, ctrl: &ControlSignals) -> bool {
    ctrl.reg_write || inst.op == op::JAL
}

/// Per-cycle EX-input forwarding decisions plus the two value buses.
///
/// `op1`/`op2`/`store_data` are computed by [`ExForwarding::detect`] at cycle
/// start; `mem_value` and `wb_value` are published during the cycle by the
/// memory and writeback stages.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExForwarding {
    /// Forwarding source for the first ALU operand (`rs`).
    pub op1: Forward,
    /// Forwarding source for the second ALU operand (`rt`).
    pub op2: Forward,
    /// Forward the writeback value into the memory stage as store data.
    pub store_data: bool,
    /// ALU-result bus, published by the memory stage.
    pub mem_value: u32,
    /// Writeback bus, published by the writeback stage.
    pub wb_value: u32,
}

impl ExForwarding {
    /// Detects EX-input and store-data hazards from cycle-start latch state.
    ///
    /// Priority per operand: the memory-stage producer (younger) wins over
    /// the writeback-stage producer. Register `$zero` never forwards.
    ///
    /// # Arguments
    ///
    /// * `id_ex` - Consumer latch (instruction entering execute this cycle).
    /// * `ex_mem` - Producer latch one stage ahead.
    /// * `mem_wb` - Producer latch two stages ahead.
    pub fn detect(id_ex: &IdEx, ex_mem: &ExMem, mem_wb: &MemWb) -> Self {
        let mut fwd = Self::default();

        if writes_reg(&ex_mem.inst, &ex_mem.ctrl) {
            let dest = dest_reg(&ex_mem.inst, &ex_mem.ctrl);
            if dest != 0 {
                if dest == id_ex.inst.rs {
                    fwd.op1 = Forward::Mem;
                }
                if dest == id_ex.inst.rt {
                    fwd.op2 = Forward::Mem;
                }
            }
        }

        if writes_reg(&mem_wb.inst, &mem_wb.ctrl) {
            let dest = dest_reg(&mem_wb.inst, &mem_wb.ctrl);
            if dest != 0 {
                if dest == id_ex.inst.rs && fwd.op1 == Forward::None {
                    fwd.op1 = Forward::Wb;
                }
                if dest == id_ex.inst.rt && fwd.op2 == Forward::None {
                    fwd.op2 = Forward::Wb;
                }
                // lw $t0 ; sw $t0: the store in MEM needs the value retiring in WB.
                if ex_mem.ctrl.mem_write && dest == ex_mem.inst.rt {
                    fwd.store_data = true;
                }
            }
        }

        fwd
    }
}

/// Per-cycle branch-input forwarding decisions plus the two value buses.
#[derive(Clone, Copy, Debug, Default)]
pub struct BranchForwarding {
    /// Forwarding source for the branch's `rs` operand.
    pub op1: BranchForward,
    /// Forwarding source for the branch's `rt` operand.
    pub op2: BranchForward,
    /// ALU-result bus, published by the memory stage.
    pub mem_value: u32,
    /// Writeback bus, published by the writeback stage.
    pub wb_value: u32,
}

impl BranchForwarding {
    /// Detects branch-operand hazards from cycle-start latch state.
    ///
    /// Only BEQ/BNE in IF/ID are considered. The closest (youngest) producer
    /// wins; the lookup stops at the first match per operand:
    ///
    /// 1. Producer in ID/EX: cannot resolve yet, stall.
    /// 2. Non-load producer in EX/MEM: forward the ALU result.
    /// 3. Load producer in EX/MEM: stall, forward from WB next cycle.
    /// 4. Producer in MEM/WB: forward the writeback value.
    ///
    /// # Arguments
    ///
    /// * `if_id` - Latch holding the (potential) branch being decoded.
    /// * `id_ex` - Producer entering execute this cycle.
    /// * `ex_mem` - Producer in the memory stage.
    /// * `mem_wb` - Producer in the writeback stage.
    pub fn detect(if_id: &IfId, id_ex: &IdEx, ex_mem: &ExMem, mem_wb: &MemWb) -> Self {
        let mut fwd = Self::default();
        if !opcodes::is_branch(if_id.instr.op()) {
            return fwd;
        }
        let rs = if_id.instr.rs();
        let rt = if_id.instr.rt();

        let mut apply = |src: BranchForward, dest: u32| {
            if dest == 0 {
                return;
            }
            if dest == rs && fwd.op1 == BranchForward::None {
                fwd.op1 = src;
            }
            if dest == rt && fwd.op2 == BranchForward::None {
                fwd.op2 = src;
            }
        };

        if writes_reg(&id_ex.inst, &id_ex.ctrl) {
            apply(BranchForward::Execute, dest_reg(&id_ex.inst, &id_ex.ctrl));
        }
        if writes_reg(&ex_mem.inst, &ex_mem.ctrl) {
            let src = if ex_mem.ctrl.mem_read {
                BranchForward::LoadMem
            } else {
                BranchForward::Mem
            };
            apply(src, dest_reg(&ex_mem.inst, &ex_mem.ctrl));
        }
        if writes_reg(&mem_wb.inst, &mem_wb.ctrl) {
            apply(BranchForward::Wb, dest_reg(&mem_wb.inst, &mem_wb.ctrl));
        }

        fwd
    }
}

/// Checks if a pipeline stall is needed due to a load-use data hazard.
///
/// A load-use hazard occurs when the instruction being decoded depends on
/// data that the load entering execute this cycle has not yet read. The
/// comparison uses the load's `rt` (its destination) against both source
/// fields of the word in IF/ID.
///
/// # Arguments
///
/// * `if_id` - The IF/ID latch containing the instruction being decoded.
/// * `id_ex` - The ID/EX latch containing the instruction entering execute.
///
/// # Returns
///
/// `true` if a one-cycle stall is required, `false` otherwise.
pub fn need_stall_load_use(if_id: &IfId, id_ex: &IdEx) -> bool {
    if !id_ex.ctrl.mem_read || id_ex.inst.rt == 0 {
        return false;
    }
    let rs = if_id.instr.rs();
    let rt = if_id.instr.rt();
    id_ex.inst.rt == rs || id_ex.inst.rt == rt
}
