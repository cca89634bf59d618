//! End-to-End Pipeline Scenarios.
//!
//! Whole-program runs through the five-stage pipeline exercising forwarding,
//! stalls, branch resolution, exceptions, cache stalls, and termination.

use mipsim_core::common::constants::EXCEPTION_ADDR;
use mipsim_core::config::{CacheConfig, CacheKind};
use pretty_assertions::assert_eq;

use crate::common::asm;
use crate::common::harness::{
    mem_word, reg, run_program, run_program_with, small_two_way_cache, zero_latency_cache,
};

// ══════════════════════════════════════════════════════════
// 1. Forwarding, no stall
// ══════════════════════════════════════════════════════════

/// Back-to-back dependent ALU operations complete through the bypass network
/// alone: four real instructions, four drain cycles, no stalls.
#[test]
fn forwarding_without_stall() {
    let sim = run_program(&[
        asm::addi(1, 0, 5),
        asm::addi(2, 0, 7),
        asm::add(3, 1, 2),
        asm::halt(),
    ]);

    assert_eq!(reg(&sim, 1), 5);
    assert_eq!(reg(&sim, 2), 7);
    assert_eq!(reg(&sim, 3), 12);
    assert_eq!(sim.cpu.stats.cycles, 8);
    assert_eq!(sim.cpu.stats.stalls_data, 0);
    assert_eq!(sim.cpu.stats.stalls_control, 0);
}

/// The pipe trace covers every cycle and starts with the first fetch.
#[test]
fn pipe_trace_records_every_cycle() {
    let program = [asm::addi(1, 0, 5), asm::halt()];
    let sim = run_program(&program);

    let trace = sim.pipe_trace();
    assert_eq!(trace.len() as u64, sim.cpu.stats.cycles);
    assert_eq!(trace[0].if_instr, program[0]);
    assert_eq!(trace[0].wb_instr, 0);
    assert_eq!(trace[1].id_instr, program[0]);
}

// ══════════════════════════════════════════════════════════
// 2. Load-use stall
// ══════════════════════════════════════════════════════════

/// A dependent instruction directly after a load costs exactly one bubble;
/// the loaded value arrives through the writeback bypass.
#[test]
fn load_use_inserts_one_bubble() {
    let sim = run_program_with(
        &[asm::lw(1, 12, 0), asm::add(2, 1, 1), asm::halt()],
        &[(12, 0x0000_0009)],
        zero_latency_cache(),
        zero_latency_cache(),
    );

    assert_eq!(reg(&sim, 1), 9);
    assert_eq!(reg(&sim, 2), 18);
    assert_eq!(sim.cpu.stats.stalls_data, 1);
    assert!(sim.cpu.stats.icache_misses >= 1);
    assert!(sim.cpu.stats.dcache_misses >= 1);
}

// ══════════════════════════════════════════════════════════
// 3. Branches resolved in decode
// ══════════════════════════════════════════════════════════

/// A taken branch with operands still in flight: the comparison uses the
/// forwarding network, the fall-through instruction is squashed, and the
/// target path executes.
#[test]
fn taken_branch_with_forwarding() {
    let sim = run_program(&[
        asm::addi(1, 0, 4),
        asm::addi(2, 0, 4),
        asm::beq(1, 2, 1), // target: the second addi below
        asm::addi(3, 0, 1),
        asm::addi(4, 0, 2),
        asm::halt(),
    ]);

    assert_eq!(reg(&sim, 3), 0, "fall-through must be squashed");
    assert_eq!(reg(&sim, 4), 2);
    assert!(sim.cpu.stats.stalls_control >= 1);
}

/// An untaken branch falls through and executes the next instruction.
#[test]
fn untaken_branch_falls_through() {
    let sim = run_program(&[
        asm::addi(1, 0, 1),
        asm::nop(),
        asm::nop(),
        asm::beq(1, 0, 1),
        asm::addi(4, 0, 7),
        asm::halt(),
    ]);

    assert_eq!(reg(&sim, 4), 7);
}

/// BNE branches on inequality.
#[test]
fn bne_taken_on_inequality() {
    let sim = run_program(&[
        asm::addi(1, 0, 1),
        asm::nop(),
        asm::nop(),
        asm::bne(1, 0, 1),
        asm::addi(3, 0, 1),
        asm::addi(4, 0, 2),
        asm::halt(),
    ]);

    assert_eq!(reg(&sim, 3), 0);
    assert_eq!(reg(&sim, 4), 2);
}

/// An unconditional jump skips the straight-line path.
#[test]
fn jump_redirects_fetch() {
    let sim = run_program(&[
        asm::j(12),
        asm::addi(3, 0, 1),
        asm::addi(4, 0, 2),
        asm::halt(),
    ]);

    assert_eq!(reg(&sim, 3), 0, "the word behind the jump must not execute");
    assert_eq!(reg(&sim, 4), 2);
}

/// A branch whose producer precedes it by one instruction needs a one-cycle
/// operand stall, then resolves via the bypass.
#[test]
fn branch_operand_stall_then_forward() {
    let sim = run_program(&[
        asm::addi(1, 0, 3),
        asm::addi(2, 0, 3),
        asm::beq(1, 2, 1),
        asm::addi(5, 0, 1),
        asm::addi(6, 0, 9),
        asm::halt(),
    ]);

    assert_eq!(reg(&sim, 5), 0);
    assert_eq!(reg(&sim, 6), 9);
}

// ══════════════════════════════════════════════════════════
// 4. Exceptions
// ══════════════════════════════════════════════════════════

/// Integer overflow squashes the offending writeback and redirects to the
/// exception vector, where the handler runs.
#[test]
fn overflow_redirects_to_handler() {
    let handler = EXCEPTION_ADDR;
    let sim = run_program_with(
        &[
            asm::lui(1, 0x7FFF),
            asm::ori(1, 1, 0xFFFF),
            asm::addi(1, 1, 1), // overflows 0x7FFFFFFF
            asm::halt(),
        ],
        &[
            (handler, asm::addi(24, 0, 0x5AFE)),
            (handler + 4, asm::halt()),
        ],
        zero_latency_cache(),
        zero_latency_cache(),
    );

    assert_eq!(reg(&sim, 1), 0x7FFF_FFFF, "the addi writeback is squashed");
    assert_eq!(reg(&sim, 24), 0x5AFE, "the handler must run");
}

/// An illegal opcode raises the exception in decode and the handler runs.
#[test]
fn illegal_opcode_redirects_to_handler() {
    let handler = EXCEPTION_ADDR;
    let sim = run_program_with(
        &[0xFC00_0000, asm::halt()],
        &[
            (handler, asm::addi(9, 0, 3)),
            (handler + 4, asm::halt()),
        ],
        zero_latency_cache(),
        zero_latency_cache(),
    );

    assert_eq!(reg(&sim, 9), 3);
}

// ══════════════════════════════════════════════════════════
// 5. JAL / JR
// ══════════════════════════════════════════════════════════

/// JAL links `PC + 8` (NPC + 4) into `$ra` through the writeback path, and a
/// consumer at the target sees the link via forwarding.
#[test]
fn jal_links_return_address() {
    let sim = run_program(&[
        asm::jal(12),        // 0x0
        asm::nop(),          // 0x4 (squashed fetch)
        asm::halt(),         // 0x8 (skipped)
        asm::addi(2, 31, 0), // 0xc: T
        asm::halt(),         // 0x10
    ]);

    assert_eq!(reg(&sim, 31), 8);
    assert_eq!(reg(&sim, 2), 8, "the link must forward to the target path");
}

/// JR flows through the pipeline without disturbing straight-line execution.
#[test]
fn jr_passes_through() {
    let sim = run_program(&[
        asm::addi(1, 0, 0x20),
        asm::nop(),
        asm::jr(1),
        asm::addi(5, 0, 4),
        asm::halt(),
    ]);

    assert_eq!(reg(&sim, 5), 4);
}

// ══════════════════════════════════════════════════════════
// 6. Stores, draining, and cache stalls
// ══════════════════════════════════════════════════════════

/// Committed stores become visible in memory after finalize drains the data
/// cache. SH and SB store the low-order bytes.
#[test]
fn stores_visible_after_drain() {
    let sim = run_program(&[
        asm::addi(1, 0, 0x2A),
        asm::sw(1, 0x100, 0),
        asm::lui(2, 0xBEEF),
        asm::ori(2, 2, 0xCAFE),
        asm::sh(2, 0x108, 0),
        asm::sb(2, 0x10C, 0),
        asm::halt(),
    ]);

    assert_eq!(mem_word(&sim, 0x100), 0x2A);
    assert_eq!(mem_word(&sim, 0x108), 0xCAFE_0000, "sh stores the low halfword");
    assert_eq!(mem_word(&sim, 0x10C), 0xFE00_0000, "sb stores the low byte");
}

/// A loaded value feeding an immediately following store arrives through the
/// store-data forwarding path.
#[test]
fn load_then_store_forwards_data() {
    let sim = run_program_with(
        &[
            asm::lw(1, 0x100, 0),
            asm::sw(1, 0x104, 0),
            asm::halt(),
        ],
        &[(0x100, 0x1357_9BDF)],
        zero_latency_cache(),
        zero_latency_cache(),
    );

    assert_eq!(mem_word(&sim, 0x104), 0x1357_9BDF);
}

/// Sub-word loads zero-extend.
#[test]
fn subword_loads_zero_extend() {
    let sim = run_program_with(
        &[
            asm::lbu(1, 0x100, 0),
            asm::lhu(2, 0x100, 0),
            asm::halt(),
        ],
        &[(0x100, 0xA1B2_C3D4)],
        zero_latency_cache(),
        zero_latency_cache(),
    );

    assert_eq!(reg(&sim, 1), 0xA1);
    assert_eq!(reg(&sim, 2), 0xA1B2);
}

/// With a nonzero miss latency the same program takes longer and accounts
/// memory stall cycles, without changing the architectural result.
#[test]
fn cache_miss_penalty_stalls_pipeline() {
    let program = [asm::lw(1, 0x40, 0), asm::add(2, 1, 1), asm::halt()];
    let data = [(0x40u32, 21u32)];

    let fast = run_program_with(&program, &data, zero_latency_cache(), zero_latency_cache());
    let slow = run_program_with(&program, &data, small_two_way_cache(), small_two_way_cache());

    assert_eq!(reg(&fast, 2), 42);
    assert_eq!(reg(&slow, 2), 42);
    assert!(slow.cpu.stats.cycles > fast.cpu.stats.cycles);
    assert!(slow.cpu.stats.stalls_mem > 0);
}

/// The original driver geometry (64B two-way, 3-cycle penalty) runs a small
/// arithmetic program to the same result as the zero-latency model.
#[test]
fn timing_model_does_not_change_results() {
    let program = [
        asm::addi(1, 0, 5),
        asm::addi(2, 0, 7),
        asm::add(3, 1, 2),
        asm::sub(4, 2, 1),
        asm::slt(5, 1, 2),
        asm::halt(),
    ];

    let fast = run_program(&program);
    let slow = run_program_with(&program, &[], small_two_way_cache(), small_two_way_cache());

    for r in 1..=5 {
        assert_eq!(reg(&fast, r), reg(&slow, r));
    }
}

/// Register `$zero` stays zero even when targeted by a write.
#[test]
fn zero_register_is_immutable() {
    let sim = run_program(&[asm::addi(0, 0, 123), asm::addi(1, 0, 5), asm::halt()]);
    assert_eq!(reg(&sim, 0), 0);
    assert_eq!(reg(&sim, 1), 5);
}

/// Retired-instruction accounting is bounded by the fetch count.
#[test]
fn retirement_accounting_is_sane() {
    let sim = run_program(&[
        asm::addi(1, 0, 1),
        asm::addi(2, 0, 2),
        asm::add(3, 1, 2),
        asm::halt(),
    ]);

    // Three real instructions retire; the sentinel and bubbles do not count.
    assert_eq!(sim.cpu.stats.instructions_retired, 3);

    let fetched = sim.cpu.stats.icache_hits + sim.cpu.stats.icache_misses;
    assert!(sim.cpu.stats.instructions_retired <= fetched);
}

/// Configurations with different cache kinds produce the configured hit
/// patterns end to end (scenario 5 at the pipeline level).
#[test]
fn two_way_icache_beats_direct_mapped_on_conflict() {
    // Direct-mapped 64B/4B: instruction fetches at 0x00 and 0x40 conflict.
    let direct = CacheConfig {
        cache_size: 64,
        block_size: 4,
        kind: CacheKind::DirectMapped,
        miss_latency: 0,
    };
    let two_way = CacheConfig {
        cache_size: 64,
        block_size: 4,
        kind: CacheKind::TwoWay,
        miss_latency: 0,
    };

    // Jump out to 0x40 and back to 0x04: the squashed fetch at 0x44 evicts
    // the 0x04 block in the direct-mapped cache, so the revisit misses there
    // but hits in the two-way cache.
    let program_words: Vec<(u32, u32)> = vec![
        (0x00, asm::j(0x40)),
        (0x40, asm::j(0x04)),
        (0x04, asm::halt()),
    ];

    let fast = run_program_with(&[], &program_words, two_way, zero_latency_cache());
    let slow = run_program_with(&[], &program_words, direct, zero_latency_cache());

    assert!(fast.cpu.stats.icache_misses < slow.cpu.stats.icache_misses);
}
