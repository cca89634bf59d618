//! The five pipeline stage functions.
//!
//! Each stage is a free function over `&mut Cpu`. The driver invokes them in
//! reverse order (WB, MEM, EX, ID, IF) every cycle so that each latch is read
//! by its consumer before its producer overwrites it, modeling
//! single-edge-triggered hardware latches without double buffering.

/// Instruction decode stage.
pub mod decode;

/// Execute stage.
pub mod execute;

/// Instruction fetch stage.
pub mod fetch;

/// Memory access stage.
pub mod memory;

/// Writeback stage.
pub mod writeback;

pub use decode::decode_stage;
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory::mem_stage;
pub use writeback::writeback_stage;
