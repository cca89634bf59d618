//! Instruction Disassembler for the MIPS integer instruction set.
//!
//! Converts a 32-bit instruction encoding into a human-readable mnemonic
//! string for debug tracing, logging, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use mipsim_core::isa::disasm::disassemble;
//! let text = disassemble(0x2001_0005); // ADDI $at, $zero, 5
//! assert_eq!(text, "addi $at, $zero, 5");
//! ```

use crate::common::constants::HALT_SENTINEL;
use crate::isa::abi::reg_name;
use crate::isa::decode::decode;
use crate::isa::opcodes::{funct, op};

/// Disassembles a 32-bit MIPS instruction into a human-readable string.
///
/// Returns a mnemonic like `"add $t0, $t1, $t2"`, `"nop"` for the zero word,
/// `"halt"` for the termination sentinel, or `"unknown"` for unrecognised
/// encodings.
///
/// # Arguments
///
/// * `inst` - The raw 32-bit instruction encoding.
pub fn disassemble(inst: u32) -> String {
    if inst == 0 {
        return "nop".to_string();
    }
    if inst == HALT_SENTINEL {
        return "halt".to_string();
    }

    let d = decode(inst);
    let rs = reg_name(d.rs);
    let rt = reg_name(d.rt);
    let rd = reg_name(d.rd);
    let simm = d.sign_ext_imm as i32;

    match d.op {
        op::RTYPE => match d.funct {
            funct::SLL => format!("sll {}, {}, {}", rd, rt, d.shamt),
            funct::SRL => format!("srl {}, {}, {}", rd, rt, d.shamt),
            funct::JR => format!("jr {}", rs),
            funct::ADD => format!("add {}, {}, {}", rd, rs, rt),
            funct::ADDU => format!("addu {}, {}, {}", rd, rs, rt),
            funct::SUB => format!("sub {}, {}, {}", rd, rs, rt),
            funct::SUBU => format!("subu {}, {}, {}", rd, rs, rt),
            funct::AND => format!("and {}, {}, {}", rd, rs, rt),
            funct::OR => format!("or {}, {}, {}", rd, rs, rt),
            funct::NOR => format!("nor {}, {}, {}", rd, rs, rt),
            funct::SLT => format!("slt {}, {}, {}", rd, rs, rt),
            funct::SLTU => format!("sltu {}, {}, {}", rd, rs, rt),
            _ => "unknown".to_string(),
        },
        op::J => format!("j {:#x}", d.jump_addr),
        op::JAL => format!("jal {:#x}", d.jump_addr),
        op::BEQ => format!("beq {}, {}, {}", rs, rt, simm),
        op::BNE => format!("bne {}, {}, {}", rs, rt, simm),
        op::ADDI => format!("addi {}, {}, {}", rt, rs, simm),
        op::ADDIU => format!("addiu {}, {}, {}", rt, rs, simm),
        op::SLTI => format!("slti {}, {}, {}", rt, rs, simm),
        op::SLTIU => format!("sltiu {}, {}, {}", rt, rs, simm),
        op::ANDI => format!("andi {}, {}, {:#x}", rt, rs, d.zero_ext_imm),
        op::ORI => format!("ori {}, {}, {:#x}", rt, rs, d.zero_ext_imm),
        op::LUI => format!("lui {}, {:#x}", rt, d.imm),
        op::LW => format!("lw {}, {}({})", rt, simm, rs),
        op::LHU => format!("lhu {}, {}({})", rt, simm, rs),
        op::LBU => format!("lbu {}, {}({})", rt, simm, rs),
        op::SW => format!("sw {}, {}({})", rt, simm, rs),
        op::SH => format!("sh {}, {}({})", rt, simm, rs),
        op::SB => format!("sb {}, {}({})", rt, simm, rs),
        _ => "unknown".to_string(),
    }
}
