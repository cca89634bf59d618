//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the pipeline. It commits results
//! to the register file, publishes the writeback bypass bus, performs the
//! dedicated JAL link write, and detects the halt sentinel that ends the
//! simulation.

use crate::common::constants::{HALT_SENTINEL, WORD_BYTES};
use crate::core::Cpu;
use crate::isa::abi;
use crate::isa::disasm::disassemble;
use crate::isa::opcodes::op;

/// Executes the writeback stage.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
///
/// # Behavior
///
/// - A retiring halt sentinel sets the end-of-program flag and does nothing
///   else.
/// - `write_data` selects between memory data and the ALU result;
///   `write_reg` between `rd` and `rt`. Writes to `$zero` are dropped.
/// - The committed value is published on the writeback bypass bus consumed by
///   the execute stage and the branch comparison this cycle.
/// - JAL writes `NPC + 4` into `$ra` through its dedicated path.
pub fn writeback_stage(cpu: &mut Cpu) {
    let wb = cpu.mem_wb;
    cpu.pipe.wb_instr = wb.inst.raw;

    if wb.inst.raw == HALT_SENTINEL {
        cpu.pipe.wb_instr = 0;
        cpu.end_program = true;
        return;
    }

    let write_data = if wb.ctrl.mem_to_reg {
        wb.data
    } else {
        wb.alu_result
    };
    let write_reg = if wb.ctrl.reg_dst {
        wb.inst.rd
    } else {
        wb.inst.rt
    };

    if wb.ctrl.reg_write && write_reg != 0 {
        cpu.regs.write(write_reg, write_data);
        cpu.fwd.wb_value = write_data;
        cpu.branch_fwd.wb_value = write_data;
        if cpu.trace {
            eprintln!(
                "WB  {} {} <= {:#010x}",
                disassemble(wb.inst.raw),
                abi::reg_name(write_reg),
                write_data
            );
        }
    }

    if wb.inst.op == op::JAL {
        let link = wb.npc.wrapping_add(WORD_BYTES);
        cpu.regs.write(abi::REG_RA, link);
        cpu.fwd.wb_value = link;
        cpu.branch_fwd.wb_value = link;
        if cpu.trace {
            eprintln!("WB  {} $ra <= {:#010x}", disassemble(wb.inst.raw), link);
        }
    }

    if wb.inst.raw != 0 {
        cpu.stats.instructions_retired += 1;
    }
}
