//! Disassembler Unit Tests.
//!
//! Spot-checks mnemonic rendering used by trace output and diagnostics.

use mipsim_core::isa::disasm::disassemble;
use pretty_assertions::assert_eq;

use crate::common::asm;

#[test]
fn renders_special_words() {
    assert_eq!(disassemble(asm::nop()), "nop");
    assert_eq!(disassemble(asm::halt()), "halt");
}

#[test]
fn renders_r_type() {
    assert_eq!(disassemble(asm::add(3, 1, 2)), "add $v1, $at, $v0");
    assert_eq!(disassemble(asm::sll(8, 9, 4)), "sll $t0, $t1, 4");
    assert_eq!(disassemble(asm::jr(31)), "jr $ra");
}

#[test]
fn renders_i_type() {
    assert_eq!(disassemble(asm::addi(1, 0, 5)), "addi $at, $zero, 5");
    assert_eq!(disassemble(asm::addi(1, 0, -3)), "addi $at, $zero, -3");
    assert_eq!(disassemble(asm::lw(2, 16, 29)), "lw $v0, 16($sp)");
    assert_eq!(disassemble(asm::beq(1, 2, -4)), "beq $at, $v0, -4");
}

#[test]
fn renders_jumps() {
    assert_eq!(disassemble(asm::j(0x40)), "j 0x40");
    assert_eq!(disassemble(asm::jal(0x100)), "jal 0x100");
}

#[test]
fn unknown_opcode_is_flagged() {
    assert_eq!(disassemble(0xFC00_0000), "unknown");
}
