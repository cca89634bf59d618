//! Instruction Decoder Unit Tests.
//!
//! Verifies field extraction, immediate extension, and jump-target alignment
//! for all three MIPS instruction formats.

use mipsim_core::isa::decode::decode;
use pretty_assertions::assert_eq;

use crate::common::asm;

// ──────────────────────────────────────────────────────────
// R-format
// ──────────────────────────────────────────────────────────

/// `add $3, $1, $2` isolates every R-format field.
#[test]
fn r_format_fields() {
    let d = decode(asm::add(3, 1, 2));
    assert_eq!(d.op, 0);
    assert_eq!(d.rs, 1);
    assert_eq!(d.rt, 2);
    assert_eq!(d.rd, 3);
    assert_eq!(d.shamt, 0);
    assert_eq!(d.funct, 0x20);
}

/// `sll $5, $6, 12` carries the shift amount.
#[test]
fn shamt_extraction() {
    let d = decode(asm::sll(5, 6, 12));
    assert_eq!(d.rd, 5);
    assert_eq!(d.rt, 6);
    assert_eq!(d.shamt, 12);
    assert_eq!(d.funct, 0x00);
}

// ──────────────────────────────────────────────────────────
// I-format immediates
// ──────────────────────────────────────────────────────────

/// A negative immediate sign-extends; the zero-extended copy does not.
#[test]
fn negative_immediate_extension() {
    let d = decode(asm::addi(1, 0, -1));
    assert_eq!(d.imm, 0xFFFF);
    assert_eq!(d.sign_ext_imm, 0xFFFF_FFFF);
    assert_eq!(d.zero_ext_imm, 0x0000_FFFF);
}

/// A positive immediate extends identically both ways.
#[test]
fn positive_immediate_extension() {
    let d = decode(asm::addi(1, 0, 0x7ABC));
    assert_eq!(d.sign_ext_imm, 0x0000_7ABC);
    assert_eq!(d.zero_ext_imm, 0x0000_7ABC);
}

// ──────────────────────────────────────────────────────────
// J-format target
// ──────────────────────────────────────────────────────────

/// The 26-bit target field is shifted left by two exactly once.
#[test]
fn jump_target_shifted_once() {
    let d = decode(asm::j(0x40));
    assert_eq!(d.jump_addr, 0x40);

    let d = decode(asm::jal(0x0012_3454));
    assert_eq!(d.jump_addr, 0x0012_3454);
}

/// The raw word is preserved in the decoded record.
#[test]
fn raw_word_preserved() {
    let word = asm::lw(7, 16, 3);
    assert_eq!(decode(word).raw, word);
}
