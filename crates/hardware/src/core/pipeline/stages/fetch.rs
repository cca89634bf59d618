//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the pipeline. It is responsible
//! for fetching instruction words through the instruction cache, absorbing
//! cache-miss latency as fetch bubbles, and steering the program counter:
//! sequential flow, branch/jump redirects resolved in decode, and exception
//! redirects.

use crate::common::constants::{EXCEPTION_ADDR, WORD_BYTES};
use crate::common::data::MemSize;
use crate::core::Cpu;
use crate::core::pipeline::latches::IfId;
use crate::core::units::cache::Access;

/// Executes the instruction fetch stage.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
///
/// # Behavior
///
/// - Holds the PC and IF/ID while the decode stage demands a stall.
/// - Counts down an outstanding instruction-cache miss, emitting bubbles.
/// - Fetches through the I-cache; a miss with nonzero penalty consumes this
///   cycle and schedules `penalty - 1` further wait cycles.
/// - On a pending redirect (taken branch/jump or exception) the fetched word
///   is discarded: a bubble enters IF/ID and the PC is steered to the target.
pub fn fetch_stage(cpu: &mut Cpu) {
    if cpu.stall {
        return;
    }

    cpu.if_wait_cycles = cpu.if_wait_cycles.saturating_sub(1);
    if cpu.if_wait_cycles > 0 {
        cpu.stats.stalls_mem += 1;
        return;
    }

    if cpu.end_at_decode {
        return;
    }

    let (instr, status) = match cpu.icache.read(cpu.pc, MemSize::Word, &mut cpu.mem) {
        Ok(fetched) => fetched,
        Err(e) => {
            eprintln!("IF  pc={:#010x} # memory error: {}", cpu.pc, e);
            (0, Access::Hit)
        }
    };

    if status == Access::Miss && cpu.icache.penalty() > 0 {
        if cpu.trace {
            eprintln!("IF  pc={:#010x} # I$ miss ({} cycles)", cpu.pc, cpu.icache.penalty());
        }
        cpu.if_wait_cycles = cpu.icache.penalty() - 1;
        cpu.stats.stalls_mem += 1;
        return;
    }

    cpu.pipe.if_instr = instr;
    if cpu.trace {
        eprintln!("IF  pc={:#010x} inst={:#010x}", cpu.pc, instr);
    }

    if !cpu.if_id.blocked {
        if cpu.jump || cpu.exception {
            // The word fetched behind a redirect never executes.
            cpu.if_id = IfId::default();
            cpu.stats.stalls_control += 1;
        } else {
            cpu.if_id.instr = instr;
            cpu.if_id.npc = cpu.pc.wrapping_add(WORD_BYTES);
        }
        cpu.pc = if cpu.jump {
            cpu.branch_pc
        } else if cpu.exception {
            EXCEPTION_ADDR
        } else {
            cpu.pc.wrapping_add(WORD_BYTES)
        };
    }
}
