//! # Addressing Modes
//!
//! The 13 addressing modes of the NMOS 6502. The mode of an instruction
//! determines how its operand bytes are interpreted and how the effective
//! address is formed, and it decides whether a page-crossing cycle penalty
//! can apply.

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative,
///   IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand; the operation is implied by the instruction itself.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: ASL A, LSR A, ROL A, ROR A
    Accumulator,

    /// 8-bit constant embedded in the instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address within zero page (0x0000-0x00FF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X; wraps within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y; wraps within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset relative to the following instruction; used by
    /// the branch family only.
    ///
    /// Example: BNE loop
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X. Reads through this mode pay one extra
    /// cycle when the indexed address crosses a page boundary.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address indexed by Y. Reads through this mode pay one extra
    /// cycle when the indexed address crosses a page boundary.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Indirect jump through a 16-bit pointer; JMP only. Inherits the NMOS
    /// page-wrap defect when the pointer sits at $xxFF.
    ///
    /// Example: JMP ($FFFC)
    Indirect,

    /// Indexed indirect: operand plus X selects a zero-page pointer, which
    /// is then dereferenced.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: operand selects a zero-page pointer, Y is added to
    /// the pointed-to address. Reads pay one extra cycle on page crossing.
    ///
    /// Example: LDA ($40),Y
    IndirectY,
}
