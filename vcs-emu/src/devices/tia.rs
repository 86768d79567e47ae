//! TIA bus front-end.
//!
//! The Television Interface Adapter's video pixel pipeline lives outside
//! this core; what the bus needs from the TIA is its register surface: all
//! writes are latched, and the six sound registers ($15-$1A) are forwarded
//! to the audio pipeline stamped with the CPU cycle of the write.
//!
//! Reads model only the bus behavior: with no collision or input logic
//! here, the driven bits are zero and the floating bits echo the data-bus
//! latch.

use crate::random::Random;
use crate::serializer::{Deserializer, Serializer, StateError};
use crate::settings::Settings;
use crate::sound::Sound;
use crate::system::{PageAccess, PageOwner, PageTable};

use super::Device;

/// Number of addressable TIA registers (the 6-bit register space).
const REGISTER_COUNT: usize = 0x40;

/// First and last sound register addresses.
const AUDIO_FIRST: u16 = 0x15;
const AUDIO_LAST: u16 = 0x1A;

/// The TIA as seen from the bus: write-register latches plus the audio
/// pipeline.
pub struct Tia {
    registers: [u8; REGISTER_COUNT],
    sound: Sound,
}

impl Tia {
    /// Builds the TIA front-end with its audio pipeline configured from
    /// the settings.
    pub fn new(settings: &Settings) -> Self {
        Self {
            registers: [0; REGISTER_COUNT],
            sound: Sound::new(settings),
        }
    }

    /// A read of a TIA register.
    ///
    /// Bits 7 and 6 are driven by the (absent) collision latches, so they
    /// read zero; bits 5-0 float and echo the data bus.
    pub fn peek(&mut self, _addr: u16, data_bus: u8) -> u8 {
        data_bus & 0b0011_1111
    }

    /// A write to a TIA register at the given CPU cycle.
    ///
    /// The address is masked to the 6-bit register space (the TIA appears
    /// in many mirrors). Sound register writes flow into the audio queue
    /// with the cycle attached.
    pub fn poke(&mut self, addr: u16, value: u8, cycle: u32) {
        let reg = addr & 0x3F;
        self.registers[reg as usize] = value;

        if (AUDIO_FIRST..=AUDIO_LAST).contains(&reg) {
            self.sound.set(reg, value, cycle);
        }
    }

    /// The last value written to a register (test and debug hook).
    pub fn register(&self, reg: u16) -> u8 {
        self.registers[(reg & 0x3F) as usize]
    }

    /// The audio pipeline.
    pub fn sound(&self) -> &Sound {
        &self.sound
    }

    /// Mutable access to the audio pipeline.
    pub fn sound_mut(&mut self) -> &mut Sound {
        &mut self.sound
    }
}

impl Device for Tia {
    fn name(&self) -> &'static str {
        "TIA"
    }

    fn install(&mut self, pages: &mut PageTable) {
        // The TIA is selected when A12 is low and A7 is low; claim every
        // such page (the chip appears throughout the lower half of the
        // address space in mirrors).
        for page_start in (0x0000..0x1000u16).step_by(PageTable::PAGE_SIZE) {
            if page_start & 0x1080 == 0x0000 {
                pages.set_page_access(
                    PageTable::page_of(page_start),
                    PageAccess::device(PageOwner::Tia),
                );
            }
        }
    }

    fn reset(&mut self, _pages: &mut PageTable, _rng: &mut Random) {
        self.registers = [0; REGISTER_COUNT];
        self.sound.reset();
    }

    fn system_cycles_reset(&mut self, cycles: u32) {
        self.sound.adjust_cycle_counter(-(cycles as i64));
    }

    fn save(&self, out: &mut Serializer) -> Result<(), StateError> {
        self.sound.save(out)
    }

    fn load(
        &mut self,
        input: &mut Deserializer<'_>,
        _pages: &mut PageTable,
    ) -> Result<(), StateError> {
        self.sound.load(input)
    }
}
