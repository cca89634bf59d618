//! Execute (EX) Stage.
//!
//! This module implements the third stage of the pipeline. It performs the
//! following:
//! 1. **Operand Selection:** Applies the EX-input forwarding decisions to
//!    both operands before dispatch.
//! 2. **ALU Dispatch:** R-type by funct, I-type/load/store by opcode; JR
//!    replaces the carried NPC with `rs` here.
//! 3. **Overflow Handling:** An arithmetic overflow flushes IF/ID, ID/EX, and
//!    EX/MEM and redirects the PC to the exception vector.

use crate::common::constants::{EXCEPTION_ADDR, HALT_SENTINEL};
use crate::core::Cpu;
use crate::core::pipeline::hazards::Forward;
use crate::core::pipeline::latches::{ExMem, IdEx, IfId};
use crate::core::units::alu;
use crate::isa::disasm::disassemble;
use crate::isa::opcodes::{self, funct, op};

/// Executes the execute stage.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn execute_stage(cpu: &mut Cpu) {
    cpu.pipe.ex_instr = cpu.id_ex.inst.raw;

    // Operand selection: bypass values beat the register-file reads latched
    // in decode. The selection is re-applied on every cycle the instruction
    // sits in this stage, so the freshest producer wins.
    match cpu.fwd.op1 {
        Forward::Mem => cpu.id_ex.read_data1 = cpu.fwd.mem_value,
        Forward::Wb => cpu.id_ex.read_data1 = cpu.fwd.wb_value,
        Forward::None => {}
    }
    match cpu.fwd.op2 {
        Forward::Mem => cpu.id_ex.read_data2 = cpu.fwd.mem_value,
        Forward::Wb => cpu.id_ex.read_data2 = cpu.fwd.wb_value,
        Forward::None => {}
    }

    let inst = cpu.id_ex.inst;
    let rs_val = cpu.id_ex.read_data1;
    let rt_val = cpu.id_ex.read_data2;
    let mut alu_result = 0u32;
    let mut npc = cpu.id_ex.npc;

    if inst.raw != HALT_SENTINEL {
        let outcome = if inst.op == op::RTYPE {
            if inst.funct == funct::JR {
                npc = rs_val;
                Ok(0)
            } else {
                alu::execute_r(&inst, rs_val, rt_val)
            }
        } else if opcodes::is_itype_alu(inst.op)
            || opcodes::is_load(inst.op)
            || opcodes::is_store(inst.op)
        {
            alu::execute_i(&inst, rs_val)
        } else {
            // J/JAL already resolved in decode; nothing to compute.
            Ok(0)
        };

        match outcome {
            Ok(v) => alu_result = v,
            Err(e) => {
                if cpu.trace {
                    eprintln!("EX  {} # EXCEPTION: {}", disassemble(inst.raw), e);
                }
                cpu.exception = true;
                cpu.branch_pc = EXCEPTION_ADDR;
                cpu.if_id = IfId::default();
                cpu.id_ex = IdEx::default();
                cpu.ex_mem = ExMem::default();
                return;
            }
        }
    }

    if cpu.trace && inst.raw != 0 && inst.raw != HALT_SENTINEL {
        eprintln!("EX  {} -> {:#010x}", disassemble(inst.raw), alu_result);
    }

    if !cpu.ex_mem.blocked {
        cpu.ex_mem = ExMem {
            inst,
            npc,
            alu_result,
            store_data: rt_val,
            ctrl: cpu.id_ex.ctrl,
            blocked: false,
        };
        cpu.id_ex = IdEx::default();
    }
}
