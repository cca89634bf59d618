//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the pipeline. It performs the
//! following:
//! 1. **Decoding:** Converts the raw fetched word into a [`Decoded`] record
//!    and selects its control bundle; an unrecognized opcode raises the
//!    illegal-instruction exception.
//! 2. **Hazard Handling:** Consumes the load-use stall decision and resolves
//!    branches and jumps using the branch-forwarding network.
//! 3. **Register Read:** Reads both source operands and advances the
//!    instruction into ID/EX; branches and jumps (except JAL) retire here and
//!    a bubble advances instead.

use crate::common::constants::{EXCEPTION_ADDR, HALT_SENTINEL};
use crate::common::error::Exception;
use crate::core::Cpu;
use crate::core::pipeline::hazards::BranchForward;
use crate::core::pipeline::latches::{IdEx, IfId};
use crate::core::pipeline::signals::control_for;
use crate::isa::decode::{Decoded, decode};
use crate::isa::disasm::disassemble;
use crate::isa::opcodes::{self, op};

/// Executes the instruction decode stage.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn decode_stage(cpu: &mut Cpu) {
    let instr = cpu.if_id.instr;
    cpu.pipe.id_instr = instr;

    if instr == HALT_SENTINEL {
        cpu.end_at_decode = true;
    }

    let inst = decode(instr);
    let Some(ctrl) = control_for(&inst) else {
        let e = Exception::IllegalInstruction(instr);
        if cpu.trace {
            eprintln!("ID  npc={:#010x} # EXCEPTION: {}", cpu.if_id.npc, e);
        }
        cpu.exception = true;
        cpu.branch_pc = EXCEPTION_ADDR;
        return;
    };

    if !cpu.end_at_decode {
        // While a data-cache miss holds the latches, the blocked flags
        // already freeze the front end; re-raising the load-use stall would
        // only double-count it.
        if cpu.load_use && !cpu.id_ex.blocked {
            cpu.stall = true;
            cpu.stats.stalls_data += 1;
            if cpu.trace {
                eprintln!("ID  {} # load-use stall", disassemble(instr));
            }
        } else {
            resolve_branch(cpu, &inst);
        }
    }

    // Branches and jumps finish here; JAL continues so its link value can be
    // written through the normal writeback path.
    if cpu.stall || (opcodes::is_branch_or_jump(inst.op) && inst.op != op::JAL) {
        if !cpu.id_ex.blocked {
            cpu.id_ex = IdEx::default();
        }
        return;
    }

    if !cpu.id_ex.blocked {
        if cpu.trace && instr != 0 {
            eprintln!("ID  npc={:#010x} {}", cpu.if_id.npc, disassemble(instr));
        }
        cpu.id_ex = IdEx {
            inst,
            npc: cpu.if_id.npc,
            read_data1: cpu.regs.read(inst.rs),
            read_data2: cpu.regs.read(inst.rt),
            ctrl,
            blocked: false,
        };
        cpu.if_id = IfId::default();
    }
}

/// Resolves branches and jumps in decode.
///
/// For BEQ/BNE the operands come from the branch-forwarding network, which
/// may instead demand a one-cycle stall when the producer has not progressed
/// far enough. For J/JAL the jump is unconditional. JR is not handled here;
/// it resolves in execute.
///
/// Sets `jump` and `branch_pc`; the fetch stage consumes both this cycle.
fn resolve_branch(cpu: &mut Cpu, inst: &Decoded) {
    if !opcodes::is_branch_or_jump(inst.op) {
        return;
    }
    let npc = cpu.if_id.npc;

    if opcodes::is_branch(inst.op) {
        let v1 = match cpu.branch_fwd.op1 {
            BranchForward::Execute | BranchForward::LoadMem => {
                branch_stall(cpu);
                return;
            }
            BranchForward::Mem => cpu.branch_fwd.mem_value,
            BranchForward::Wb => cpu.branch_fwd.wb_value,
            BranchForward::None => cpu.regs.read(inst.rs),
        };
        let v2 = match cpu.branch_fwd.op2 {
            BranchForward::Execute | BranchForward::LoadMem => {
                branch_stall(cpu);
                return;
            }
            BranchForward::Mem => cpu.branch_fwd.mem_value,
            BranchForward::Wb => cpu.branch_fwd.wb_value,
            BranchForward::None => cpu.regs.read(inst.rt),
        };

        cpu.jump = match inst.op {
            op::BEQ => v1 == v2,
            _ => v1 != v2,
        };
        cpu.branch_pc = npc.wrapping_add(inst.sign_ext_imm << 2);
        if cpu.trace {
            eprintln!(
                "ID  {} # {} (target={:#010x})",
                disassemble(inst.raw),
                if cpu.jump { "taken" } else { "not taken" },
                cpu.branch_pc
            );
        }
    } else {
        cpu.jump = true;
        cpu.branch_pc = (npc & 0xF000_0000) | inst.jump_addr;
        if cpu.trace {
            eprintln!("ID  {} # target={:#010x}", disassemble(inst.raw), cpu.branch_pc);
        }
    }
}

/// Raises the branch-operand stall: the branch stays in IF/ID for one cycle.
fn branch_stall(cpu: &mut Cpu) {
    cpu.stall = true;
    cpu.stats.stalls_control += 1;
    if cpu.trace {
        eprintln!("ID  # branch operand stall");
    }
}
