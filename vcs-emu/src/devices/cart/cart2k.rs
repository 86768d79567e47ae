//! 2 KB cartridge: no banking, the image mirrors into both halves of the
//! window.

use crate::random::Random;
use crate::serializer::{Deserializer, Serializer, StateError};
use crate::system::{PageAccess, PageOwner, PageTable};

use super::{CartContext, Cartridge, CartridgeError, Device, WINDOW_BASE};

/// A plain 2 KB board.
pub struct Cartridge2K {
    image: Vec<u8>,
    bank_locked: bool,
}

impl Cartridge2K {
    /// Wraps a 2 KB image.
    pub fn new(image: Vec<u8>) -> Result<Self, CartridgeError> {
        if image.len() != 2048 {
            return Err(CartridgeError::InvalidImageSize {
                kind: "2K",
                size: image.len(),
            });
        }
        Ok(Self {
            image,
            bank_locked: false,
        })
    }
}

impl Device for Cartridge2K {
    fn name(&self) -> &'static str {
        "Cartridge2K"
    }

    fn install(&mut self, pages: &mut PageTable) {
        // The 2K image appears twice across the 4K window
        for page_start in (WINDOW_BASE..0x2000).step_by(PageTable::PAGE_SIZE) {
            pages.set_page_access(
                PageTable::page_of(page_start),
                PageAccess::direct_peek(PageOwner::Cart, u32::from(page_start & 0x07FF)),
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
        input.expect_tag("Cartridge2K")
    }
}

impl Cartridge for Cartridge2K {
    fn peek(&mut self, addr: u16, _ctx: &mut CartContext<'_>) -> u8 {
        self.image[(addr & 0x07FF) as usize]
    }

    fn poke(&mut self, _addr: u16, _value: u8, _ctx: &mut CartContext<'_>) {}

    fn peek_direct(&self, offset: u32) -> u8 {
        self.image[(offset as usize) & 0x07FF]
    }

    fn bank(&mut self, _bank: u16, _pages: &mut PageTable) {}

    fn current_bank(&self) -> u16 {
        0
    }

    fn bank_count(&self) -> u16 {
        1
    }

    fn patch(&mut self, addr: u16, value: u8) -> bool {
        self.image[(addr & 0x07FF) as usize] = value;
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
