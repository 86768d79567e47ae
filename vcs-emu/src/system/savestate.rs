//! Save-state orchestration.
//!
//! A state blob is a versioned, self-describing byte stream keyed by the
//! ROM hash:
//!
//! ```text
//! "State" tag
//! format version            (int)
//! ROM hash                  (string)
//! device count              (int)
//! per device, in attachment order: name-tagged payload
//! CPU payload               ("M6502" tag + registers)
//! system cycles             (int)
//! ```
//!
//! Loading verifies the tag, version, hash, and device count before any
//! device state is touched, and each device payload re-verifies its own
//! name tag. Any failure leaves a partially restored machine; the caller
//! must discard it.

use lib6507::CPU;

use crate::serializer::{Deserializer, Serializer, StateError};
use crate::system::{Console, System};

/// Leading tag of every state blob.
pub const STATE_TAG: &str = "State";

/// Current state format version.
pub const STATE_VERSION: i32 = 1;

/// CPU payload tag.
const CPU_TAG: &str = "M6502";

/// Writes the complete machine state.
pub fn save(console: &Console, rom_hash: &str, out: &mut Serializer) -> Result<(), StateError> {
    out.put_string(STATE_TAG);
    out.put_int(STATE_VERSION);
    out.put_string(rom_hash);

    let system = console.system();
    out.put_int(system.device_count());
    system.save_devices(out)?;

    save_cpu(console.cpu(), out);
    out.put_int(system.cycles() as i32);

    Ok(())
}

/// Restores the complete machine state.
pub fn load(
    console: &mut Console,
    rom_hash: &str,
    input: &mut Deserializer<'_>,
) -> Result<(), StateError> {
    input.expect_tag(STATE_TAG)?;

    let version = input.get_int()?;
    if version != STATE_VERSION {
        return Err(StateError::VersionMismatch {
            expected: STATE_VERSION,
            found: version,
        });
    }

    let found_hash = input.get_string()?;
    if found_hash != rom_hash {
        return Err(StateError::RomMismatch { found: found_hash });
    }

    let expected_devices = console.system().device_count();
    let found_devices = input.get_int()?;
    if found_devices != expected_devices {
        return Err(StateError::DeviceCountMismatch {
            expected: expected_devices,
            found: found_devices,
        });
    }

    console.system_mut().load_devices(input)?;
    load_cpu(console.cpu_mut(), input)?;

    let cycles = input.get_int()? as u32;
    console.system_mut().set_cycles(cycles);

    Ok(())
}

/// Writes a u64 as two ints, low word first.
fn put_u64(out: &mut Serializer, value: u64) {
    out.put_int(value as u32 as i32);
    out.put_int((value >> 32) as u32 as i32);
}

/// Reads a u64 written by [`put_u64`].
fn get_u64(input: &mut Deserializer<'_>) -> Result<u64, StateError> {
    let low = input.get_int()? as u32 as u64;
    let high = input.get_int()? as u32 as u64;
    Ok(low | (high << 32))
}

/// Writes the CPU payload: registers, packed status, condition bits, and
/// the execution counters.
fn save_cpu(cpu: &CPU<System>, out: &mut Serializer) {
    out.put_string(CPU_TAG);
    out.put_int(cpu.a() as i32);
    out.put_int(cpu.x() as i32);
    out.put_int(cpu.y() as i32);
    out.put_int(cpu.sp() as i32);
    out.put_int(cpu.ir() as i32);
    out.put_int(cpu.pc() as i32);
    out.put_int(cpu.status() as i32);
    out.put_int(cpu.execution_status() as i32);
    out.put_bool(cpu.last_access_was_read());
    put_u64(out, cpu.instruction_count());
    put_u64(out, cpu.cycles());
}

/// Restores the CPU payload through the register accessors.
fn load_cpu(cpu: &mut CPU<System>, input: &mut Deserializer<'_>) -> Result<(), StateError> {
    input.expect_tag(CPU_TAG)?;
    cpu.set_a(input.get_int()? as u8);
    cpu.set_x(input.get_int()? as u8);
    cpu.set_y(input.get_int()? as u8);
    cpu.set_sp(input.get_int()? as u8);
    cpu.set_ir(input.get_int()? as u8);
    cpu.set_pc(input.get_int()? as u16);
    let status = input.get_int()? as u8;
    cpu.set_status(status);
    cpu.set_execution_status(input.get_int()? as u8);
    let last_was_read = input.get_bool()?;
    cpu.set_last_access_was_read(last_was_read);
    cpu.set_instruction_count(get_u64(input)?);
    cpu.set_cycles(get_u64(input)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::cart::{create, CartridgeKind};
    use crate::settings::Settings;

    const HASH: &str = "9b21f6cb27bbbd5bf1e088b3b9d6a1b8";

    fn test_console() -> Console {
        let mut image = vec![0xEA; 4096]; // NOPs
        image[0xFFC] = 0x00;
        image[0xFFD] = 0xF0;
        let cart = create(CartridgeKind::FourK, image).unwrap();
        let mut console = Console::new(cart, &Settings::default());
        console.reset();
        console
    }

    #[test]
    fn test_roundtrip_restores_cpu_and_cycles() {
        let mut console = test_console();
        console.execute(123);
        console.cpu_mut().set_a(0x42);

        let mut out = Serializer::new();
        console.save_state(HASH, &mut out).unwrap();
        let blob = out.into_bytes();

        let mut restored = test_console();
        restored
            .load_state(HASH, &mut Deserializer::new(&blob))
            .unwrap();

        assert_eq!(restored.cpu().a(), 0x42);
        assert_eq!(restored.cpu().pc(), console.cpu().pc());
        assert_eq!(restored.cpu().status(), console.cpu().status());
        assert_eq!(restored.cpu().cycles(), console.cpu().cycles());
        assert_eq!(
            restored.cpu().instruction_count(),
            console.cpu().instruction_count()
        );
        assert_eq!(restored.system().cycles(), console.system().cycles());
    }

    #[test]
    fn test_wrong_rom_hash_rejected() {
        let console = test_console();
        let mut out = Serializer::new();
        console.save_state(HASH, &mut out).unwrap();
        let blob = out.into_bytes();

        let mut other = test_console();
        let result = other.load_state("a-different-rom", &mut Deserializer::new(&blob));
        assert!(matches!(result, Err(StateError::RomMismatch { .. })));
    }

    #[test]
    fn test_truncated_blob_rejected() {
        let console = test_console();
        let mut out = Serializer::new();
        console.save_state(HASH, &mut out).unwrap();
        let blob = out.into_bytes();

        let mut other = test_console();
        let result = other.load_state(HASH, &mut Deserializer::new(&blob[..blob.len() / 2]));
        assert!(matches!(result, Err(StateError::Truncated { .. })));
    }

    #[test]
    fn test_wrong_leading_tag_rejected() {
        let mut out = Serializer::new();
        out.put_string("NotAState");
        let blob = out.into_bytes();

        let mut console = test_console();
        let result = console.load_state(HASH, &mut Deserializer::new(&blob));
        assert!(matches!(result, Err(StateError::TagMismatch { .. })));
    }
}
