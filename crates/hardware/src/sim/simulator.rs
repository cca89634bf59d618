//! Simulator: owns the CPU and drives it cycle by cycle.
//!
//! This module provides the [`Simulator`], the top-level handle used by the
//! CLI and the test harness. It performs:
//! 1. **Initialization:** Validates cache configuration and builds the CPU
//!    around a preloaded memory store.
//! 2. **Execution:** Bounded (`run_cycles`) and unbounded (`run_till_halt`)
//!    driving of the pipeline.
//! 3. **Finalization:** Drains the data cache and snapshots cache counters
//!    into the statistics.
//! 4. **Observability:** The accumulated per-cycle pipe trace.

use crate::config::{CacheConfig, SimConfig};
use crate::core::Cpu;
use crate::core::cpu::PipeSnapshot;
use crate::core::pipeline;
use crate::mem::MemoryStore;
use crate::stats::SimulationStats;

/// Outcome of a bounded run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// The cycle budget elapsed before the halt sentinel retired.
    Running,
    /// The halt sentinel retired; the simulation is over.
    Halted,
}

/// Top-level simulator: CPU state plus the accumulated pipe trace.
#[derive(Debug)]
pub struct Simulator {
    /// The complete machine state.
    pub cpu: Cpu,
    trace_log: Vec<PipeSnapshot>,
}

impl Simulator {
    /// Creates a simulator from a full configuration and a preloaded memory
    /// store.
    ///
    /// # Arguments
    ///
    /// * `config` - Simulator configuration (trace flag and both caches).
    /// * `mem` - Backing memory, typically preloaded with the program image.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Config`] when either cache
    /// geometry is invalid.
    pub fn new(config: &SimConfig, mem: MemoryStore) -> Result<Self, crate::common::SimError> {
        config.icache.validate("icache")?;
        config.dcache.validate("dcache")?;
        Ok(Self {
            cpu: Cpu::new(config, mem),
            trace_log: Vec::new(),
        })
    }

    /// Creates a simulator from separate cache configurations.
    ///
    /// Convenience wrapper matching the harness-facing
    /// `init(icConfig, dcConfig, memory)` contract.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Config`] when either cache
    /// geometry is invalid.
    pub fn with_caches(
        icache: CacheConfig,
        dcache: CacheConfig,
        mem: MemoryStore,
    ) -> Result<Self, crate::common::SimError> {
        let config = SimConfig {
            icache,
            dcache,
            ..SimConfig::default()
        };
        Self::new(&config, mem)
    }

    /// Runs up to `n` cycles.
    ///
    /// # Arguments
    ///
    /// * `n` - Maximum number of cycles to advance.
    ///
    /// # Returns
    ///
    /// [`RunStatus::Halted`] as soon as the halt sentinel retires,
    /// [`RunStatus::Running`] when the budget elapses first.
    pub fn run_cycles(&mut self, n: u64) -> RunStatus {
        for _ in 0..n {
            if self.cpu.end_program {
                break;
            }
            pipeline::tick(&mut self.cpu);
            self.trace_log.push(self.cpu.pipe);
        }
        if self.cpu.end_program {
            RunStatus::Halted
        } else {
            RunStatus::Running
        }
    }

    /// Runs until the halt sentinel retires.
    ///
    /// The caller is responsible for any host-side watchdog; a program image
    /// without a reachable sentinel runs forever.
    pub fn run_till_halt(&mut self) {
        while !self.cpu.end_program {
            pipeline::tick(&mut self.cpu);
            self.trace_log.push(self.cpu.pipe);
        }
    }

    /// Finalizes the simulation.
    ///
    /// Drains the data cache so committed stores become visible in memory and
    /// snapshots the cache counters into the statistics.
    ///
    /// # Returns
    ///
    /// A reference to the final statistics.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::common::SimError::MemoryRange`] from the drain.
    pub fn finalize(&mut self) -> Result<&SimulationStats, crate::common::SimError> {
        let cpu = &mut self.cpu;
        cpu.dcache.drain(&mut cpu.mem)?;
        cpu.stats.icache_hits = cpu.icache.hits();
        cpu.stats.icache_misses = cpu.icache.misses();
        cpu.stats.dcache_hits = cpu.dcache.hits();
        cpu.stats.dcache_misses = cpu.dcache.misses();
        Ok(&cpu.stats)
    }

    /// Returns the accumulated per-cycle pipe trace.
    pub fn pipe_trace(&self) -> &[PipeSnapshot] {
        &self.trace_log
    }
}
