//! Property tests for the CPU core.

use lib6507::{FlatMemory, MemoryBus, CPU, OPCODE_TABLE};
use proptest::prelude::*;

fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

proptest! {
    /// LDA immediate always leaves A equal to the operand, with Z and N
    /// derived from it.
    #[test]
    fn prop_lda_immediate_flags(value in any::<u8>()) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, 0xA9);
        cpu.memory_mut().write(0x8001, value);
        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.flag_z(), value == 0);
        prop_assert_eq!(cpu.flag_n(), value & 0x80 != 0);
    }

    /// Binary ADC matches plain wrapping arithmetic, and the carry flag
    /// matches the 9-bit sum.
    #[test]
    fn prop_adc_binary_matches_reference(a in any::<u8>(), operand in any::<u8>(), carry in any::<bool>()) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, 0x69);
        cpu.memory_mut().write(0x8001, operand);
        cpu.set_a(a);
        cpu.set_flag_c(carry);
        cpu.step().unwrap();

        let sum = a as u16 + operand as u16 + carry as u16;
        prop_assert_eq!(cpu.a(), sum as u8);
        prop_assert_eq!(cpu.flag_c(), sum > 0xFF);
        prop_assert_eq!(cpu.flag_z(), sum as u8 == 0);
    }

    /// CMP never modifies the accumulator, and its flags mirror an
    /// unsigned comparison.
    #[test]
    fn prop_cmp_is_nondestructive(a in any::<u8>(), operand in any::<u8>()) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, 0xC9);
        cpu.memory_mut().write(0x8001, operand);
        cpu.set_a(a);
        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), a);
        prop_assert_eq!(cpu.flag_c(), a >= operand);
        prop_assert_eq!(cpu.flag_z(), a == operand);
    }

    /// Pushing and pulling the accumulator is the identity and restores
    /// the stack pointer.
    #[test]
    fn prop_pha_pla_roundtrip(value in any::<u8>(), sp in any::<u8>()) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, 0x48); // PHA
        cpu.memory_mut().write(0x8001, 0xA9); // LDA #$00 (clobber)
        cpu.memory_mut().write(0x8002, 0x00);
        cpu.memory_mut().write(0x8003, 0x68); // PLA

        cpu.set_a(value);
        cpu.set_sp(sp);
        prop_assert!(cpu.execute(3));

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.sp(), sp);
    }

    /// The status byte packs and unpacks losslessly (modulo the always-set
    /// bit 5).
    #[test]
    fn prop_status_roundtrip(value in any::<u8>()) {
        let mut cpu = setup_cpu();
        cpu.set_status(value);
        prop_assert_eq!(cpu.status(), value | 0b0010_0000);
    }

    /// Every legal single instruction consumes at least its base cycle
    /// cost and at most two more.
    #[test]
    fn prop_legal_instruction_cycle_bounds(opcode in 0u8..=255, operand_lo in any::<u8>(), operand_hi in any::<u8>()) {
        let metadata = &OPCODE_TABLE[opcode as usize];
        prop_assume!(metadata.legal);

        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, opcode);
        cpu.memory_mut().write(0x8001, operand_lo);
        cpu.memory_mut().write(0x8002, operand_hi);
        cpu.step().unwrap();

        let base = metadata.base_cycles as u64;
        prop_assert!(cpu.cycles() >= base);
        prop_assert!(cpu.cycles() <= base + 2);
    }
}
