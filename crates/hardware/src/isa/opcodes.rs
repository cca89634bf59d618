//! MIPS opcode and funct constants with classification helpers.
//!
//! Constants follow the encoding in the MIPS integer instruction set; the
//! classification helpers drive control-bundle selection and hazard handling.

/// Opcode field values (bits 31-26).
pub mod op {
    /// R-type instructions; the funct field selects the operation.
    pub const RTYPE: u32 = 0x00;
    /// Jump.
    pub const J: u32 = 0x02;
    /// Jump and link.
    pub const JAL: u32 = 0x03;
    /// Branch on equal.
    pub const BEQ: u32 = 0x04;
    /// Branch on not equal.
    pub const BNE: u32 = 0x05;
    /// Add immediate (signed, traps on overflow).
    pub const ADDI: u32 = 0x08;
    /// Add immediate unsigned (no trap).
    pub const ADDIU: u32 = 0x09;
    /// Set on less than immediate (signed).
    pub const SLTI: u32 = 0x0A;
    /// Set on less than immediate unsigned.
    pub const SLTIU: u32 = 0x0B;
    /// AND immediate (zero-extended).
    pub const ANDI: u32 = 0x0C;
    /// OR immediate (zero-extended).
    pub const ORI: u32 = 0x0D;
    /// Load upper immediate.
    pub const LUI: u32 = 0x0F;
    /// Load word.
    pub const LW: u32 = 0x23;
    /// Load byte unsigned.
    pub const LBU: u32 = 0x24;
    /// Load halfword unsigned.
    pub const LHU: u32 = 0x25;
    /// Store byte.
    pub const SB: u32 = 0x28;
    /// Store halfword.
    pub const SH: u32 = 0x29;
    /// Store word.
    pub const SW: u32 = 0x2B;
}

/// Funct field values for R-type instructions (bits 5-0).
pub mod funct {
    /// Shift left logical (by shamt).
    pub const SLL: u32 = 0x00;
    /// Shift right logical (by shamt).
    pub const SRL: u32 = 0x02;
    /// Jump register.
    pub const JR: u32 = 0x08;
    /// Add (signed, traps on overflow).
    pub const ADD: u32 = 0x20;
    /// Add unsigned (no trap).
    pub const ADDU: u32 = 0x21;
    /// Subtract (signed, traps on overflow).
    pub const SUB: u32 = 0x22;
    /// Subtract unsigned (no trap).
    pub const SUBU: u32 = 0x23;
    /// Bitwise AND.
    pub const AND: u32 = 0x24;
    /// Bitwise OR.
    pub const OR: u32 = 0x25;
    /// Bitwise NOR.
    pub const NOR: u32 = 0x27;
    /// Set on less than (signed).
    pub const SLT: u32 = 0x2A;
    /// Set on less than unsigned.
    pub const SLTU: u32 = 0x2B;
}

/// Returns true if the opcode names a load-class instruction.
///
/// LUI is classified as a load: it carries the load control bundle and its
/// result flows down the memory-data path unchanged.
#[inline]
pub fn is_load(opcode: u32) -> bool {
    matches!(opcode, op::LUI | op::LW | op::LHU | op::LBU)
}

/// Returns true if the opcode names a store instruction.
#[inline]
pub fn is_store(opcode: u32) -> bool {
    matches!(opcode, op::SB | op::SH | op::SW)
}

/// Returns true if the opcode names a non-load/store I-type ALU or branch
/// instruction.
#[inline]
pub fn is_itype_alu(opcode: u32) -> bool {
    matches!(
        opcode,
        op::ADDI | op::ADDIU | op::ANDI | op::ORI | op::SLTI | op::SLTIU | op::BEQ | op::BNE
    )
}

/// Returns true if the opcode names a conditional branch.
#[inline]
pub fn is_branch(opcode: u32) -> bool {
    matches!(opcode, op::BEQ | op::BNE)
}

/// Returns true if the opcode names a branch or jump resolved in decode.
#[inline]
pub fn is_branch_or_jump(opcode: u32) -> bool {
    matches!(opcode, op::BEQ | op::BNE | op::J | op::JAL)
}

/// Returns true if the opcode is part of the implemented instruction set.
///
/// Anything else raises an illegal-instruction exception in decode.
#[inline]
pub fn is_valid(opcode: u32) -> bool {
    opcode == op::RTYPE
        || is_load(opcode)
        || is_store(opcode)
        || is_itype_alu(opcode)
        || matches!(opcode, op::J | op::JAL)
}
