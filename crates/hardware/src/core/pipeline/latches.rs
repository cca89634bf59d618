//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the buffers that connect the five stages of the
//! pipeline. It implements:
//! 1. **Instruction Flow:** Structures carrying state between Fetch, Decode,
//!    Execute, Memory, and Writeback.
//! 2. **Squashing:** Clearing a latch to its default yields a bubble (raw
//!    word zero, NOP control bundle).
//! 3. **Blocking:** Each latch carries a `blocked` flag; while set, the
//!    producing stage must not overwrite the latch (used to freeze the
//!    pipeline behind a data-cache miss).

use crate::core::pipeline::signals::ControlSignals;
use crate::isa::decode::Decoded;

/// IF/ID pipeline latch (Fetch to Decode stage).
///
/// Carries the raw fetched word; decoding happens on the consumer side.
#[derive(Clone, Copy, Debug, Default)]
pub struct IfId {
    /// Raw 32-bit instruction word (zero for a bubble).
    pub instr: u32,
    /// PC + 4 at the time of fetch.
    pub npc: u32,
    /// Set while a downstream cache miss freezes the pipeline.
    pub blocked: bool,
}

/// ID/EX pipeline latch (Decode to Execute stage).
#[derive(Clone, Copy, Debug, Default)]
pub struct IdEx {
    /// Decoded instruction with all fields isolated.
    pub inst: Decoded,
    /// PC + 4 at the time of fetch.
    pub npc: u32,
    /// Value of register `rs`, as read in decode.
    pub read_data1: u32,
    /// Value of register `rt`, as read in decode.
    pub read_data2: u32,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
    /// Set while a downstream cache miss freezes the pipeline.
    pub blocked: bool,
}

/// EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Copy, Debug, Default)]
pub struct ExMem {
    /// Decoded instruction with all fields isolated.
    pub inst: Decoded,
    /// PC + 4 at the time of fetch (JR overwrites this with `rs`).
    pub npc: u32,
    /// ALU result, or the effective address for loads and stores.
    pub alu_result: u32,
    /// Store-data value (forwarded operand 2).
    pub store_data: u32,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
    /// Set while this stage waits out a data-cache miss.
    pub blocked: bool,
}

/// MEM/WB pipeline latch (Memory to Writeback stage).
#[derive(Clone, Copy, Debug, Default)]
pub struct MemWb {
    /// Decoded instruction with all fields isolated.
    pub inst: Decoded,
    /// PC + 4 at the time of fetch (the JAL link base).
    pub npc: u32,
    /// ALU result carried past the memory stage.
    pub alu_result: u32,
    /// Memory-read data for loads; the ALU result passed through otherwise.
    pub data: u32,
    /// Control signals for the writeback stage.
    pub ctrl: ControlSignals,
    /// Carried for latch uniformity; never set on this latch.
    pub blocked: bool,
}
