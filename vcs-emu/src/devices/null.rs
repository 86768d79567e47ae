//! Open-bus filler device for unmapped pages.

use crate::random::Random;
use crate::serializer::{Deserializer, Serializer, StateError};
use crate::system::PageTable;

use super::Device;

/// The device behind every page no real device has claimed.
///
/// Reads return the current data-bus latch (open-bus behavior: the last
/// value driven onto the bus is what a floating read sees); writes vanish.
#[derive(Debug, Default)]
pub struct NullDevice;

impl NullDevice {
    /// Creates the null device.
    pub fn new() -> Self {
        Self
    }

    /// A read from an unmapped page: answers the floating bus.
    pub fn peek(&self, data_bus: u8) -> u8 {
        data_bus
    }

    /// A write to an unmapped page: dropped.
    pub fn poke(&self, _addr: u16, _value: u8) {}
}

impl Device for NullDevice {
    fn name(&self) -> &'static str {
        "NULL"
    }

    fn install(&mut self, _pages: &mut PageTable) {
        // Unclaimed pages already default to the null device.
    }

    fn reset(&mut self, _pages: &mut PageTable, _rng: &mut Random) {}

    fn save(&self, _out: &mut Serializer) -> Result<(), StateError> {
        Ok(())
    }

    fn load(
        &mut self,
        _input: &mut Deserializer<'_>,
        _pages: &mut PageTable,
    ) -> Result<(), StateError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_bus_read() {
        let device = NullDevice::new();
        assert_eq!(device.peek(0xA5), 0xA5);
        assert_eq!(device.peek(0x00), 0x00);
    }

    #[test]
    fn test_state_is_a_noop() {
        let mut device = NullDevice::new();
        let mut out = Serializer::new();
        assert!(device.save(&mut out).is_ok());
        assert!(out.as_bytes().is_empty());

        let mut pages = PageTable::new();
        let blob = out.into_bytes();
        assert!(device
            .load(&mut Deserializer::new(&blob), &mut pages)
            .is_ok());
    }
}
