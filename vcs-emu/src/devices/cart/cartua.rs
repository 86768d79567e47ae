//! UA Limited bankswitching.
//!
//! Two 4 KB banks, selected by touching $0220 (bank 0) or $0240 (bank 1) -
//! addresses that live in TIA mirror space, so the mapper claims those two
//! pages in addition to the window. Accesses to the hotspot pages answer
//! zero.

use crate::random::Random;
use crate::serializer::{Deserializer, Serializer, StateError};
use crate::system::{PageAccess, PageOwner, PageTable};

use super::{CartContext, Cartridge, CartridgeError, Device, WINDOW_BASE};

/// Bank size.
const BANK_SIZE: usize = 4096;

/// A UA Limited board.
pub struct CartridgeUA {
    image: Vec<u8>,
    current_bank: u16,
    bank_locked: bool,
}

impl CartridgeUA {
    /// Wraps an 8 KB image.
    pub fn new(image: Vec<u8>) -> Result<Self, CartridgeError> {
        if image.len() != 8192 {
            return Err(CartridgeError::InvalidImageSize {
                kind: "UA",
                size: image.len(),
            });
        }
        Ok(Self {
            image,
            current_bank: 0,
            bank_locked: false,
        })
    }

    /// Applies a hotspot access, if the address is one.
    fn check_hotspot(&mut self, addr: u16, pages: &mut PageTable) {
        if self.bank_locked {
            return;
        }
        match addr {
            0x0220 => self.bank(0, pages),
            0x0240 => self.bank(1, pages),
            _ => {}
        }
    }
}

impl Device for CartridgeUA {
    fn name(&self) -> &'static str {
        "CartridgeUA"
    }

    fn install(&mut self, pages: &mut PageTable) {
        // The two hotspots sit outside the window, in TIA mirror space
        pages.set_page_access(PageTable::page_of(0x0220), PageAccess::device(PageOwner::Cart));
        pages.set_page_access(PageTable::page_of(0x0240), PageAccess::device(PageOwner::Cart));

        self.bank(0, pages);
    }

    fn reset(&mut self, pages: &mut PageTable, _rng: &mut Random) {
        self.bank(0, pages);
    }

    fn save(&self, out: &mut Serializer) -> Result<(), StateError> {
        out.put_string(self.name());
        out.put_int(self.current_bank as i32);
        Ok(())
    }

    fn load(
        &mut self,
        input: &mut Deserializer<'_>,
        pages: &mut PageTable,
    ) -> Result<(), StateError> {
        input.expect_tag("CartridgeUA")?;
        let bank = input.get_int()? as u16;
        self.bank(bank, pages);
        Ok(())
    }
}

impl Cartridge for CartridgeUA {
    fn peek(&mut self, addr: u16, ctx: &mut CartContext<'_>) -> u8 {
        self.check_hotspot(addr, ctx.pages);

        if addr & 0x1000 != 0 {
            self.image[self.current_bank as usize * BANK_SIZE + (addr & 0x0FFF) as usize]
        } else {
            // A hotspot-page read; the board drives nothing
            0
        }
    }

    fn poke(&mut self, addr: u16, _value: u8, ctx: &mut CartContext<'_>) {
        self.check_hotspot(addr, ctx.pages);
    }

    fn peek_direct(&self, offset: u32) -> u8 {
        self.image[offset as usize]
    }

    fn bank(&mut self, bank: u16, pages: &mut PageTable) {
        if self.bank_locked {
            return;
        }

        self.current_bank = bank % 2;
        let offset = self.current_bank as u32 * BANK_SIZE as u32;

        for page_start in (WINDOW_BASE..0x2000).step_by(PageTable::PAGE_SIZE) {
            pages.set_page_access(
                PageTable::page_of(page_start),
                PageAccess::direct_peek(PageOwner::Cart, offset + u32::from(page_start & 0x0FFF)),
            );
        }
    }

    fn current_bank(&self) -> u16 {
        self.current_bank
    }

    fn bank_count(&self) -> u16 {
        2
    }

    fn patch(&mut self, addr: u16, value: u8) -> bool {
        let offset = self.current_bank as usize * BANK_SIZE + (addr & 0x0FFF) as usize;
        self.image[offset] = value;
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
    use crate::devices::{Riot, Tia};
    use crate::settings::Settings;

    fn banked_image() -> Vec<u8> {
        let mut image = vec![0u8; 8192];
        for (i, byte) in image.iter_mut().enumerate() {
            *byte = (i / BANK_SIZE) as u8;
        }
        image
    }

    #[test]
    fn test_hotspots_in_tia_mirror_space() {
        let mut cart = CartridgeUA::new(banked_image()).unwrap();
        let mut pages = PageTable::new();
        cart.install(&mut pages);
        let mut tia = Tia::new(&Settings::default());
        let mut riot = Riot::new();
        let mut ctx = CartContext {
            pages: &mut pages,
            tia: &mut tia,
            riot: &mut riot,
            cycles: 0,
        };

        assert_eq!(cart.peek(0x1000, &mut ctx), 0);
        assert_eq!(cart.peek(0x0240, &mut ctx), 0);
        assert_eq!(cart.current_bank(), 1);
        assert_eq!(cart.peek(0x1000, &mut ctx), 1);
        cart.peek(0x0220, &mut ctx);
        assert_eq!(cart.current_bank(), 0);
    }

    #[test]
    fn test_install_claims_hotspot_pages() {
        let mut cart = CartridgeUA::new(banked_image()).unwrap();
        let mut pages = PageTable::new();
        cart.install(&mut pages);
        assert_eq!(
            pages.get_page_access(PageTable::page_of(0x0220)).owner,
            PageOwner::Cart
        );
        assert_eq!(
            pages.get_page_access(PageTable::page_of(0x0240)).owner,
            PageOwner::Cart
        );
    }
}
