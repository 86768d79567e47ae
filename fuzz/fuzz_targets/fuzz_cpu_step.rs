//! Fuzz target for CPU step execution.
//!
//! Creates arbitrary CPU states and memory contents, then executes a
//! handful of instructions to find panics and bookkeeping bugs.

#![no_main]

use arbitrary::Arbitrary;
use lib6507::{FlatMemory, MemoryBus, CPU};
use libfuzzer_sys::fuzz_target;

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
}

/// Memory regions the fuzzer controls
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location (instructions + operands)
    program: [u8; 16],
    /// Zero page contents
    zero_page: [u8; 256],
    /// Stack page contents
    stack_page: [u8; 256],
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();

    // Reset, IRQ, and NMI vectors
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.write(0xFFFE, 0x00);
    memory.write(0xFFFF, 0x90);
    memory.write(0xFFFA, 0x00);
    memory.write(0xFFFB, 0xA0);

    memory.load(0x8000, &input.memory.program);
    memory.load(0x0000, &input.memory.zero_page);
    memory.load(0x0100, &input.memory.stack_page);

    let mut cpu = CPU::new(memory);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);

    // Illegal opcodes are expected to fail; nothing may panic.
    let cycles_before = cpu.cycles();
    let completed = cpu.execute(4);

    if !completed {
        assert!(cpu.fatal_error());
    }
    // Cycles never run backwards
    assert!(cpu.cycles() >= cycles_before);
});
