//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the pipeline. It performs the
//! following:
//! 1. **Bus Publication:** Publishes the ALU-result bypass bus consumed by
//!    the execute stage and the branch-forwarding network this cycle.
//! 2. **Data-Cache Access:** Issues loads and stores; a miss with nonzero
//!    penalty freezes the upstream latches until the wait elapses.
//! 3. **Store-Data Forwarding:** Captures the writeback value when the store
//!    data is still in flight.

use crate::common::constants::{HALT_SENTINEL, WORD_BYTES};
use crate::common::data::MemSize;
use crate::core::Cpu;
use crate::core::pipeline::latches::{ExMem, MemWb};
use crate::core::units::cache::Access;
use crate::isa::disasm::disassemble;
use crate::isa::opcodes::op;

/// Executes the memory stage.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn mem_stage(cpu: &mut Cpu) {
    // Publish the bypass bus before anything can stall: consumers later in
    // this cycle (EX operand selection, branch comparison in ID) read it.
    cpu.fwd.mem_value = mem_bus_value(&cpu.ex_mem);
    cpu.branch_fwd.mem_value = cpu.fwd.mem_value;
    cpu.pipe.mem_instr = cpu.ex_mem.inst.raw;

    cpu.mem_wait_cycles = cpu.mem_wait_cycles.saturating_sub(1);
    if cpu.mem_wait_cycles > 0 {
        cpu.stats.stalls_mem += 1;
        return;
    }

    // Any outstanding miss has completed.
    cpu.if_id.blocked = false;
    cpu.id_ex.blocked = false;
    cpu.ex_mem.blocked = false;

    // Store-data may still be in flight (lw $t0 ; sw $t0). Capture the
    // writeback value into the latch so a miss-retry reuses it.
    if cpu.fwd.store_data {
        cpu.ex_mem.store_data = cpu.fwd.wb_value;
    }

    let inst = cpu.ex_mem.inst;
    let addr = cpu.ex_mem.alu_result;
    let store_data = cpu.ex_mem.store_data;

    let mut data = cpu.ex_mem.alu_result;
    let mut status = Access::Hit;

    if inst.raw != HALT_SENTINEL {
        match inst.op {
            op::SW | op::SH | op::SB => {
                let size = match inst.op {
                    op::SW => MemSize::Word,
                    op::SH => MemSize::Half,
                    _ => MemSize::Byte,
                };
                match cpu.dcache.write(addr, store_data, size, &mut cpu.mem) {
                    Ok(s) => status = s,
                    Err(e) => eprintln!("MEM addr={:#010x} # memory error: {}", addr, e),
                }
                if cpu.trace {
                    eprintln!(
                        "MEM {} addr={:#010x} data={:#010x}",
                        disassemble(inst.raw),
                        addr,
                        store_data & size.mask()
                    );
                }
            }
            op::LW | op::LHU | op::LBU => {
                let size = match inst.op {
                    op::LW => MemSize::Word,
                    op::LHU => MemSize::Half,
                    _ => MemSize::Byte,
                };
                match cpu.dcache.read(addr, size, &mut cpu.mem) {
                    Ok((v, s)) => {
                        data = v & size.mask();
                        status = s;
                    }
                    Err(e) => {
                        eprintln!("MEM addr={:#010x} # memory error: {}", addr, e);
                        data = 0;
                    }
                }
                if cpu.trace {
                    eprintln!(
                        "MEM {} addr={:#010x} data={:#010x}",
                        disassemble(inst.raw),
                        addr,
                        data
                    );
                }
            }
            _ => {}
        }
    }

    if status == Access::Miss && cpu.dcache.penalty() > 0 {
        if cpu.trace {
            eprintln!("MEM addr={:#010x} # D$ miss ({} cycles)", addr, cpu.dcache.penalty());
        }
        cpu.mem_wait_cycles = cpu.dcache.penalty() - 1;
        cpu.ex_mem.blocked = true;
        cpu.id_ex.blocked = true;
        cpu.if_id.blocked = true;
        // Writeback sees bubbles while the miss is outstanding.
        cpu.mem_wb = MemWb::default();
        cpu.stats.stalls_mem += 1;
        return;
    }

    cpu.mem_wb = MemWb {
        inst,
        npc: cpu.ex_mem.npc,
        alu_result: cpu.ex_mem.alu_result,
        data,
        ctrl: cpu.ex_mem.ctrl,
        blocked: false,
    };
    cpu.ex_mem = ExMem::default();
}

/// The value the memory stage drives onto the ALU-result bypass bus.
///
/// A JAL in this stage produces its link value, not a stale ALU result.
fn mem_bus_value(ex_mem: &ExMem) -> u32 {
    if ex_mem.inst.op == op::JAL {
        ex_mem.npc.wrapping_add(WORD_BYTES)
    } else {
        ex_mem.alu_result
    }
}
