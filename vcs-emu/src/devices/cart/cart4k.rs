//! 4 KB cartridge: the whole window, no banking.

use crate::random::Random;
use crate::serializer::{Deserializer, Serializer, StateError};
use crate::system::{PageAccess, PageOwner, PageTable};

use super::{CartContext, Cartridge, CartridgeError, Device, WINDOW_BASE};

/// A plain 4 KB board.
pub struct Cartridge4K {
    image: Vec<u8>,
    bank_locked: bool,
}

impl Cartridge4K {
    /// Wraps a 4 KB image.
    pub fn new(image: Vec<u8>) -> Result<Self, CartridgeError> {
        if image.len() != 4096 {
            return Err(CartridgeError::InvalidImageSize {
                kind: "4K",
                size: image.len(),
            });
        }
        Ok(Self {
            image,
            bank_locked: false,
        })
    }
}

impl Device for Cartridge4K {
    fn name(&self) -> &'static str {
        "Cartridge4K"
    }

    fn install(&mut self, pages: &mut PageTable) {
        for page_start in (WINDOW_BASE..0x2000).step_by(PageTable::PAGE_SIZE) {
            pages.set_page_access(
                PageTable::page_of(page_start),
                PageAccess::direct_peek(PageOwner::Cart, u32::from(page_start & 0x0FFF)),
            );
        }
    }

    fn reset(&mut self, _pages: &mut PageTable, _rng: &mut Random) {}

    fn save(&self, out: &mut Serializer) -> Result<(), StateError> {
        out.put_string(self.name());
        Ok(())
    }

    fn load(
        &mut self,
        input: &mut Deserializer<'_>,
        _pages: &mut PageTable,
    ) -> Result<(), StateError> {
        input.expect_tag("Cartridge4K")
    }
}

impl Cartridge for Cartridge4K {
    fn peek(&mut self, addr: u16, _ctx: &mut CartContext<'_>) -> u8 {
        self.image[(addr & 0x0FFF) as usize]
    }

    fn poke(&mut self, _addr: u16, _value: u8, _ctx: &mut CartContext<'_>) {}

    fn peek_direct(&self, offset: u32) -> u8 {
        self.image[(offset as usize) & 0x0FFF]
    }

    fn bank(&mut self, _bank: u16, _pages: &mut PageTable) {}

    fn current_bank(&self) -> u16 {
        0
    }

    fn bank_count(&self) -> u16 {
        1
    }

    fn patch(&mut self, addr: u16, value: u8) -> bool {
        self.image[(addr & 0x0FFF) as usize] = value;
        true
    }

    fn image(&self) -> &[u8] {
        &self.image
    }

    fn bank_locked(&self) -> bool {
        self.bank_locked
    }

    fn set_bank_locked(&mut self, locked: bool) {
        self.bank_locked = locked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_mapping() {
        let mut image = vec![0u8; 4096];
        image[0xFFF] = 0x77;
        let mut cart = Cartridge4K::new(image).unwrap();

        let mut pages = PageTable::new();
        cart.install(&mut pages);

        let access = pages.get_page_access(PageTable::page_of(0x1FC0));
        assert_eq!(access.owner, PageOwner::Cart);
        assert_eq!(access.direct_peek_base, Some(0xFC0));
        assert_eq!(cart.peek_direct(0xFFF), 0x77);
    }
}
