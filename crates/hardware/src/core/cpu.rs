//! CPU state.
//!
//! This module defines [`Cpu`], the single owned state bag the pipeline
//! driver threads through the stage functions each cycle. It holds:
//! 1. **Architectural State:** Register file, program counter, branch-target
//!    register.
//! 2. **Pipeline State:** The four latches, per-cycle hazard records, stall
//!    and exception flags, wait-cycle counters.
//! 3. **Memory Hierarchy:** Both caches and the flat backing store.
//! 4. **Observability:** The per-cycle pipe snapshot, statistics, and the
//!    trace flag.

use crate::common::reg::RegisterFile;
use crate::config::SimConfig;
use crate::core::pipeline::hazards::{BranchForwarding, ExForwarding};
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb};
use crate::core::units::cache::Cache;
use crate::mem::MemoryStore;
use crate::stats::SimulationStats;

/// Per-cycle snapshot of the instruction word occupying each stage.
///
/// A zero word denotes a bubble. One snapshot is recorded per cycle into the
/// simulator's pipe trace.
#[derive(Clone, Copy, Debug, Default)]
pub struct PipeSnapshot {
    /// Cycle number the snapshot belongs to.
    pub cycle: u64,
    /// Instruction word in the fetch stage.
    pub if_instr: u32,
    /// Instruction word in the decode stage.
    pub id_instr: u32,
    /// Instruction word in the execute stage.
    pub ex_instr: u32,
    /// Instruction word in the memory stage.
    pub mem_instr: u32,
    /// Instruction word in the writeback stage.
    pub wb_instr: u32,
}

/// The complete simulator state threaded through the stage functions.
///
/// All mutation funnels through the per-cycle driver; there is no interior
/// mutability and no locking. The two caches are independent and observe
/// each other only through the shared memory store.
#[derive(Debug)]
pub struct Cpu {
    /// General-purpose register file.
    pub regs: RegisterFile,
    /// Program counter (word-aligned byte address).
    pub pc: u32,
    /// Pending redirect target, written in decode and consumed in fetch.
    pub branch_pc: u32,

    /// IF/ID latch.
    pub if_id: IfId,
    /// ID/EX latch.
    pub id_ex: IdEx,
    /// EX/MEM latch.
    pub ex_mem: ExMem,
    /// MEM/WB latch.
    pub mem_wb: MemWb,

    /// Instruction cache.
    pub icache: Cache,
    /// Data cache.
    pub dcache: Cache,
    /// Flat backing memory shared by both caches.
    pub mem: MemoryStore,

    /// EX-input forwarding record, recomputed each cycle.
    pub fwd: ExForwarding,
    /// Branch-input forwarding record, recomputed each cycle.
    pub branch_fwd: BranchForwarding,

    /// A taken branch or jump was resolved in decode this cycle.
    pub jump: bool,
    /// The decode stage demands that fetch not advance this cycle.
    pub stall: bool,
    /// Load-use stall decision, computed at cycle start.
    pub load_use: bool,
    /// An architectural exception was raised this cycle.
    pub exception: bool,
    /// The halt sentinel has reached decode; fetching stops.
    pub end_at_decode: bool,
    /// The halt sentinel has retired; the simulation is over.
    pub end_program: bool,

    /// Remaining fetch-stall cycles from an instruction-cache miss.
    pub if_wait_cycles: u32,
    /// Remaining memory-stall cycles from a data-cache miss.
    pub mem_wait_cycles: u32,

    /// Per-stage instruction words for the current cycle.
    pub pipe: PipeSnapshot,
    /// Aggregated statistics.
    pub stats: SimulationStats,
    /// Enable per-stage tracing to stderr.
    pub trace: bool,
}

impl Cpu {
    /// Creates a CPU with zeroed architectural state.
    ///
    /// # Arguments
    ///
    /// * `config` - Simulator configuration; cache geometry must already be
    ///   validated.
    /// * `mem` - Backing memory, typically preloaded with the program image.
    pub fn new(config: &SimConfig, mem: MemoryStore) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: 0,
            branch_pc: 0,
            if_id: IfId::default(),
            id_ex: IdEx::default(),
            ex_mem: ExMem::default(),
            mem_wb: MemWb::default(),
            icache: Cache::new(&config.icache),
            dcache: Cache::new(&config.dcache),
            mem,
            fwd: ExForwarding::default(),
            branch_fwd: BranchForwarding::default(),
            jump: false,
            stall: false,
            load_use: false,
            exception: false,
            end_at_decode: false,
            end_program: false,
            if_wait_cycles: 0,
            mem_wait_cycles: 0,
            pipe: PipeSnapshot::default(),
            stats: SimulationStats::default(),
            trace: config.trace,
        }
    }

    /// Dumps the architectural state (PC, latches, registers) to stdout.
    pub fn dump_state(&self) {
        println!("PC: {:#010x}", self.pc);
        println!("IF/ID:  {:#010x}", self.if_id.instr);
        println!("ID/EX:  {:#010x}", self.id_ex.inst.raw);
        println!("EX/MEM: {:#010x}", self.ex_mem.inst.raw);
        println!("MEM/WB: {:#010x}", self.mem_wb.inst.raw);
        self.regs.dump();
    }
}
