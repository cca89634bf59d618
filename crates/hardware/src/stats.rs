//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline simulator. It
//! provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions, derived CPI.
//! 2. **Stalls:** Memory, control, and data hazard stall-cycle counts.
//! 3. **Cache Hierarchy:** Hit/miss counts for the instruction and data
//!    caches, snapshotted at finalization.

use std::time::Instant;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimulationStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions committed (retired).
    pub instructions_retired: u64,

    /// Stall cycles due to load-use data hazards.
    pub stalls_data: u64,
    /// Stall cycles due to control hazards (branch operand waits, taken-branch bubbles).
    pub stalls_control: u64,
    /// Stall cycles due to cache misses.
    pub stalls_mem: u64,

    /// Instruction cache hit count.
    pub icache_hits: u64,
    /// Instruction cache miss count.
    pub icache_misses: u64,
    /// Data cache hit count.
    pub dcache_hits: u64,
    /// Data cache miss count.
    pub dcache_misses: u64,
}

impl Default for SimulationStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            stalls_data: 0,
            stalls_control: 0,
            stalls_mem: 0,
            icache_hits: 0,
            icache_misses: 0,
            dcache_hits: 0,
            dcache_misses: 0,
        }
    }
}

impl SimulationStats {
    /// Prints the statistics block to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = if self.cycles == 0 { 1 } else { self.cycles };
        let instr = if self.instructions_retired == 0 {
            1
        } else {
            self.instructions_retired
        };
        let cpi = cyc as f64 / instr as f64;

        println!("\n==========================================================");
        println!("MIPS PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_cpi                  {:.4}", cpi);
        println!("----------------------------------------------------------");
        println!(
            "  stalls.data            {} ({:.2}%)",
            self.stalls_data,
            (self.stalls_data as f64 / cyc as f64) * 100.0
        );
        println!(
            "  stalls.control         {} ({:.2}%)",
            self.stalls_control,
            (self.stalls_control as f64 / cyc as f64) * 100.0
        );
        println!(
            "  stalls.memory          {} ({:.2}%)",
            self.stalls_mem,
            (self.stalls_mem as f64 / cyc as f64) * 100.0
        );
        println!("----------------------------------------------------------");
        let print_cache = |name: &str, hits: u64, misses: u64| {
            let total = hits + misses;
            let rate = if total > 0 {
                (misses as f64 / total as f64) * 100.0
            } else {
                0.0
            };
            println!(
                "  {:<4} accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}%",
                name, total, hits, rate
            );
        };
        print_cache("I$", self.icache_hits, self.icache_misses);
        print_cache("D$", self.dcache_hits, self.dcache_misses);
        println!("==========================================================");
    }
}
