//! Memory-mapped hardware devices of the VCS.
//!
//! Every component on the bus implements the [`Device`] trait: lifecycle
//! (install, reset, cycle-counter rebase) and state capture. Bus accesses
//! themselves are dispatched by the [`System`](crate::system::System)
//! through the page-access table, so each device also exposes its concrete
//! `peek`/`poke` surface with exactly the context it needs.
//!
//! - [`Tia`]: register latches and the audio pipeline entry point
//! - [`Riot`]: 6532 RAM, interval timer, and switch ports
//! - [`cart`]: the cartridge family and its bankswitching mappers
//! - [`NullDevice`]: open-bus filler for unmapped pages

pub mod cart;
pub mod null;
pub mod riot;
pub mod tia;

pub use null::NullDevice;
pub use riot::Riot;
pub use tia::Tia;

use crate::random::Random;
use crate::serializer::{Deserializer, Serializer, StateError};
use crate::system::PageTable;

/// Contract implemented by every memory-mapped component.
///
/// Where the original system handed devices a back-reference to the whole
/// machine, here each hook receives exactly the slice of the system it may
/// touch - the page table for claiming and remapping pages, and the RNG for
/// randomized power-on state - for the duration of the call only.
pub trait Device {
    /// The device's name; also used as its save-state tag.
    fn name(&self) -> &'static str;

    /// Claims the pages this device owns. Invoked once when the device is
    /// attached to the system.
    fn install(&mut self, pages: &mut PageTable);

    /// Returns the device to its power-on state. Mappers remap their
    /// startup bank here.
    fn reset(&mut self, pages: &mut PageTable, rng: &mut Random);

    /// Notifies the device that the system cycle counter is being rebased
    /// to zero; `cycles` is the value being subtracted. Devices that keep
    /// absolute cycle references adjust them here.
    fn system_cycles_reset(&mut self, cycles: u32) {
        let _ = cycles;
    }

    /// Writes the device's name-tagged state payload.
    fn save(&self, out: &mut Serializer) -> Result<(), StateError>;

    /// Restores the device's state payload; fails on a name-tag mismatch.
    /// Mappers remap restored banks through `pages`.
    fn load(
        &mut self,
        input: &mut Deserializer<'_>,
        pages: &mut PageTable,
    ) -> Result<(), StateError>;
}
