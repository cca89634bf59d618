//! Five-stage in-order pipeline.
//!
//! This module ties the pipeline together:
//! 1. **Latches:** The four inter-stage buffers.
//! 2. **Signals:** The control bundle generated in decode.
//! 3. **Hazards:** Forwarding networks and load-use detection.
//! 4. **Stages:** The five stage functions.
//! 5. **Driver:** [`tick`], which advances the machine by exactly one cycle.

/// Data hazard detection and forwarding.
pub mod hazards;

/// Pipeline latch structures.
pub mod latches;

/// Control signal bundles.
pub mod signals;

/// The five stage functions.
pub mod stages;

use crate::core::Cpu;
use crate::core::cpu::PipeSnapshot;
use crate::core::pipeline::hazards::{BranchForwarding, ExForwarding};

/// Advances the pipeline by one cycle.
///
/// The stage invocation order (WB before MEM before EX before ID before IF)
/// is the sole synchronization mechanism: each stage observes its consumer
/// latch as-written-this-cycle and its producer latch as-written-last-cycle,
/// realizing rising-edge latch semantics without double buffering.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn tick(cpu: &mut Cpu) {
    cpu.stats.cycles += 1;
    cpu.stall = false;
    cpu.jump = false;

    // Hazard decisions are a pure function of cycle-start latch state; the
    // value buses are filled in by the memory and writeback stages below.
    cpu.fwd = ExForwarding::detect(&cpu.id_ex, &cpu.ex_mem, &cpu.mem_wb);
    cpu.branch_fwd = BranchForwarding::detect(&cpu.if_id, &cpu.id_ex, &cpu.ex_mem, &cpu.mem_wb);
    cpu.load_use = hazards::need_stall_load_use(&cpu.if_id, &cpu.id_ex);

    cpu.pipe = PipeSnapshot {
        cycle: cpu.stats.cycles,
        ..PipeSnapshot::default()
    };

    stages::writeback_stage(cpu);
    stages::mem_stage(cpu);
    stages::execute_stage(cpu);
    stages::decode_stage(cpu);
    stages::fetch_stage(cpu);

    if cpu.exception {
        cpu.pc = cpu.branch_pc;
        cpu.exception = false;
    }
}
