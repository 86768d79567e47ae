//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA: Push Accumulator on Stack
//! - PHP: Push Processor Status on Stack
//! - PLA: Pull Accumulator from Stack
//! - PLP: Pull Processor Status from Stack
//!
//! The 6502 stack is located at memory addresses 0x0100-0x01FF and grows
//! downward. The stack pointer (SP) is an 8-bit register that serves as an
//! offset into this page. The full stack address is calculated as
//! 0x0100 | SP.

use crate::{ExecutionError, MemoryBus, CPU, OPCODE_TABLE};

/// Executes the PHA (Push Accumulator) instruction.
///
/// Pushes a copy of the accumulator onto the stack and decrements the stack
/// pointer (wrapping from 0x00 to 0xFF).
///
/// Cycle timing: 3 cycles. Flags affected: none.
pub(crate) fn execute_pha<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let value = cpu.a;
    cpu.push(value);

    cpu.tick(metadata.base_cycles as u64);
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);

    Ok(())
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// Pushes the status byte with both the B flag (bit 4) and bit 5 set, the
/// same image BRK pushes. The live flags are unchanged.
///
/// Cycle timing: 3 cycles.
pub(crate) fn execute_php<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let status = cpu.status() | 0b0011_0000;
    cpu.push(status);

    cpu.tick(metadata.base_cycles as u64);
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);

    Ok(())
}

/// Executes the PLA (Pull Accumulator) instruction.
///
/// Pulls a byte from the stack into the accumulator and updates Z and N.
///
/// Cycle timing: 4 cycles.
pub(crate) fn execute_pla<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let value = cpu.pull();
    cpu.a = value;

    cpu.flag_z = value == 0;
    cpu.flag_n = (value & 0x80) != 0;

    cpu.tick(metadata.base_cycles as u64);
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);

    Ok(())
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// Pulls a byte from the stack into the status register. Bit 5 of the
/// pulled byte is ignored.
///
/// Cycle timing: 4 cycles.
pub(crate) fn execute_plp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let status = cpu.pull();
    cpu.set_status(status);

    cpu.tick(metadata.base_cycles as u64);
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);

    Ok(())
}
