//! The assembled machine.
//!
//! A [`Console`] wires a cartridge into a [`System`] bus and hands the bus
//! to the CPU, which owns it from then on. The console is the host-facing
//! surface: reset, execution, and save/load entry points.

use lib6507::CPU;

use crate::devices::cart::Cartridge;
use crate::serializer::{Deserializer, Serializer, StateError};
use crate::settings::Settings;
use crate::system::{savestate, System};

/// An Atari 2600 with a cartridge inserted.
pub struct Console {
    cpu: CPU<System>,
}

impl Console {
    /// Assembles the machine around a cartridge.
    ///
    /// The CPU immediately reads the reset vector through the freshly
    /// installed cartridge mapping.
    pub fn new(cart: Box<dyn Cartridge>, settings: &Settings) -> Self {
        let system = System::new(cart, settings);
        Self {
            cpu: CPU::new(system),
        }
    }

    /// Resets the machine: the cycle counter is rebased, every device
    /// returns to power-on state, and the CPU re-reads the reset vector.
    pub fn reset(&mut self) {
        self.cpu.memory_mut().reset_cycles();
        self.cpu.memory_mut().reset_devices();
        self.cpu.reset();
    }

    /// Executes up to `instructions` instructions (0 runs until stopped).
    ///
    /// Answers `false` iff the CPU hit a fatal error; `fatal_error()` on
    /// the CPU then reports the condition.
    pub fn execute(&mut self, instructions: u32) -> bool {
        self.cpu.execute(instructions)
    }

    /// The system bus.
    pub fn system(&self) -> &System {
        self.cpu.memory()
    }

    /// Mutable system bus.
    pub fn system_mut(&mut self) -> &mut System {
        self.cpu.memory_mut()
    }

    /// The CPU.
    pub fn cpu(&self) -> &CPU<System> {
        &self.cpu
    }

    /// Mutable CPU.
    pub fn cpu_mut(&mut self) -> &mut CPU<System> {
        &mut self.cpu
    }

    /// Saves the complete machine state, keyed by the ROM hash.
    pub fn save_state(&self, rom_hash: &str, out: &mut Serializer) -> Result<(), StateError> {
        savestate::save(self, rom_hash, out)
    }

    /// Restores machine state saved for the same ROM.
    ///
    /// On any error the partially loaded state must be discarded; callers
    /// should reset or reload before continuing.
    pub fn load_state(
        &mut self,
        rom_hash: &str,
        input: &mut Deserializer<'_>,
    ) -> Result<(), StateError> {
        savestate::load(self, rom_hash, input)
    }
}
