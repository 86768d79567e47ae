//! # Register Transfer Instructions
//!
//! This module implements register transfer operations:
//! - TAX: Transfer Accumulator to X
//! - TAY: Transfer Accumulator to Y
//! - TXA: Transfer X to Accumulator
//! - TYA: Transfer Y to Accumulator
//! - TSX: Transfer Stack Pointer to X
//! - TXS: Transfer X to Stack Pointer
//!
//! All transfers update Z and N from the copied value, except TXS which
//! affects no flags.

use crate::{ExecutionError, MemoryBus, CPU, OPCODE_TABLE};

/// Executes the TAX (Transfer Accumulator to X) instruction.
///
/// Copies the current contents of the accumulator into the X register and
/// sets the zero and negative flags as appropriate.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `opcode` - The opcode byte for this TAX instruction
pub(crate) fn execute_tax<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    cpu.x = cpu.a;

    cpu.flag_z = cpu.x == 0;
    cpu.flag_n = (cpu.x & 0x80) != 0;

    cpu.tick(metadata.base_cycles as u64);
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);

    Ok(())
}

/// Executes the TAY (Transfer Accumulator to Y) instruction.
pub(crate) fn execute_tay<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    cpu.y = cpu.a;

    cpu.flag_z = cpu.y == 0;
    cpu.flag_n = (cpu.y & 0x80) != 0;

    cpu.tick(metadata.base_cycles as u64);
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);

    Ok(())
}

/// Executes the TXA (Transfer X to Accumulator) instruction.
pub(crate) fn execute_txa<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    cpu.a = cpu.x;

    cpu.flag_z = cpu.a == 0;
    cpu.flag_n = (cpu.a & 0x80) != 0;

    cpu.tick(metadata.base_cycles as u64);
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);

    Ok(())
}

/// Executes the TYA (Transfer Y to Accumulator) instruction.
pub(crate) fn execute_tya<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    cpu.a = cpu.y;

    cpu.flag_z = cpu.a == 0;
    cpu.flag_n = (cpu.a & 0x80) != 0;

    cpu.tick(metadata.base_cycles as u64);
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);

    Ok(())
}

/// Executes the TSX (Transfer Stack Pointer to X) instruction.
pub(crate) fn execute_tsx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    cpu.x = cpu.sp;

    cpu.flag_z = cpu.x == 0;
    cpu.flag_n = (cpu.x & 0x80) != 0;

    cpu.tick(metadata.base_cycles as u64);
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);

    Ok(())
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction.
///
/// The only transfer that affects no flags.
pub(crate) fn execute_txs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    cpu.sp = cpu.x;

    cpu.tick(metadata.base_cycles as u64);
    cpu.pc = cpu.pc.wrapping_add(metadata.size_bytes as u16);

    Ok(())
}
