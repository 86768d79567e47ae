//! CommaVid CV: fixed 2 KB ROM plus 1 KB RAM, no banking.
//!
//! RAM stores land at $1000-$13FF and loads come from $1400-$17FF; the ROM
//! occupies the upper half of the window.

use crate::random::Random;
use crate::serializer::{Deserializer, Serializer, StateError};
use crate::system::{PageAccess, PageOwner, PageTable};

use super::{CartContext, Cartridge, CartridgeError, Device};

/// On-cart RAM size.
const RAM_SIZE: usize = 1024;

/// A CommaVid board.
pub struct CartridgeCV {
    image: Vec<u8>,
    ram: Box<[u8; RAM_SIZE]>,
    bank_locked: bool,
}

impl CartridgeCV {
    /// Wraps a 2 KB image.
    pub fn new(image: Vec<u8>) -> Result<Self, CartridgeError> {
        if image.len() != 2048 {
            return Err(CartridgeError::InvalidImageSize {
                kind: "CV",
                size: image.len(),
            });
        }
        Ok(Self {
            image,
            ram: Box::new([0; RAM_SIZE]),
            bank_locked: false,
        })
    }
}

impl Device for CartridgeCV {
    fn name(&self) -> &'static str {
        "CartridgeCV"
    }

    fn install(&mut self, pages: &mut PageTable) {
        let ram_base = self.image.len() as u32;

        // RAM store port
        for page_start in (0x1000u16..0x1400).step_by(PageTable::PAGE_SIZE) {
            pages.set_page_access(
                PageTable::page_of(page_start),
                PageAccess {
                    direct_peek_base: None,
                    direct_poke_base: Some(ram_base + u32::from(page_start & 0x03FF)),
                    owner: PageOwner::Cart,
                },
            );
        }
        // RAM load port
        for page_start in (0x1400u16..0x1800).step_by(PageTable::PAGE_SIZE) {
            pages.set_page_access(
                PageTable::page_of(page_start),
                PageAccess::direct_peek(PageOwner::Cart, ram_base + u32::from(page_start & 0x03FF)),
            );
        }
        // Fixed ROM
        for page_start in (0x1800u16..0x2000).step_by(PageTable::PAGE_SIZE) {
            pages.set_page_access(
                PageTable::page_of(page_start),
                PageAccess::direct_peek(PageOwner::Cart, u32::from(page_start & 0x07FF)),
            );
        }
    }

    fn reset(&mut self, _pages: &mut PageTable, _rng: &mut Random) {
        self.ram.fill(0);
    }

    fn save(&self, out: &mut Serializer) -> Result<(), StateError> {
        out.put_string(self.name());
        out.put_bytes(self.ram.as_ref());
        Ok(())
    }

    fn load(
        &mut self,
        input: &mut Deserializer<'_>,
        _pages: &mut PageTable,
    ) -> Result<(), StateError> {
        input.expect_tag("CartridgeCV")?;
        let ram = input.get_bytes()?;
        if ram.len() != RAM_SIZE {
            return Err(StateError::Malformed("CV RAM frame has wrong length"));
        }
        self.ram.copy_from_slice(&ram);
        Ok(())
    }
}

impl Cartridge for CartridgeCV {
    fn peek(&mut self, addr: u16, _ctx: &mut CartContext<'_>) -> u8 {
        let offset = addr & 0x0FFF;
        if offset < 0x0800 {
            self.ram[(offset & 0x3FF) as usize]
        } else {
            self.image[(offset & 0x7FF) as usize]
        }
    }

    fn poke(&mut self, addr: u16, value: u8, _ctx: &mut CartContext<'_>) {
        let offset = addr & 0x0FFF;
        if offset < 0x0400 {
            self.ram[offset as usize] = value;
        }
    }

    fn peek_direct(&self, offset: u32) -> u8 {
        let offset = offset as usize;
        if offset < self.image.len() {
            self.image[offset]
        } else {
            self.ram[(offset - self.image.len()) % RAM_SIZE]
        }
    }

    fn poke_direct(&mut self, offset: u32, value: u8) {
        let offset = offset as usize;
        if offset >= self.image.len() {
            self.ram[(offset - self.image.len()) % RAM_SIZE] = value;
        }
    }

    fn bank(&mut self, _bank: u16, _pages: &mut PageTable) {}

    fn current_bank(&self) -> u16 {
        0
    }

    fn bank_count(&self) -> u16 {
        1
    }

    fn patch(&mut self, addr: u16, value: u8) -> bool {
        let offset = addr & 0x0FFF;
        if offset < 0x0800 {
            // The lower window is RAM; there is no ROM there to patch
            return false;
        }
        self.image[(offset & 0x7FF) as usize] = value;
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

    #[test]
    fn test_ram_ports() {
        let mut cart = CartridgeCV::new(vec![0xEE; 2048]).unwrap();
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

        cart.poke(0x1234, 0x42, &mut ctx);
        assert_eq!(cart.peek(0x1634, &mut ctx), 0x42);
        // ROM half unaffected
        assert_eq!(cart.peek(0x1800, &mut ctx), 0xEE);
    }

    #[test]
    fn test_patch_refuses_ram_region() {
        let mut cart = CartridgeCV::new(vec![0; 2048]).unwrap();
        assert!(!cart.patch(0x1100, 0x55));
        assert!(cart.patch(0x1900, 0x55));
        assert_eq!(cart.peek_direct(0x100), 0x55);
    }

    #[test]
    fn test_state_roundtrip() {
        let mut cart = CartridgeCV::new(vec![0; 2048]).unwrap();
        let ram_base = cart.image().len() as u32;
        cart.poke_direct(ram_base + 9, 0x77);

        let mut out = Serializer::new();
        cart.save(&mut out).unwrap();
        let blob = out.into_bytes();

        let mut restored = CartridgeCV::new(vec![0; 2048]).unwrap();
        let mut pages = PageTable::new();
        restored
            .load(&mut Deserializer::new(&blob), &mut pages)
            .unwrap();
        assert_eq!(restored.peek_direct(ram_base + 9), 0x77);
    }
}
