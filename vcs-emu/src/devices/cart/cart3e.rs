//! Tigervision 3E bankswitching: 3F plus banked RAM.
//!
//! ROM behaves exactly like the 3F scheme, but the bank-select hotspot is
//! the single address $3F. Writing $3E instead switches the lower window to
//! one of 32 banks of on-cart RAM (1 KB each): stores land at $1000-$13FF
//! and loads come from $1400-$17FF. Following the original's convention, a
//! selected RAM bank is recorded as `bank + 256`.

use crate::random::Random;
use crate::serializer::{Deserializer, Serializer, StateError};
use crate::system::{PageAccess, PageOwner, PageTable};

use super::cart3f::SLICE_SIZE;
use super::{CartContext, Cartridge, CartridgeError, Device, WINDOW_BASE};

/// RAM bank size.
const RAM_BANK_SIZE: usize = 1024;

/// Total on-cart RAM.
const RAM_SIZE: usize = 32 * 1024;

/// Bank numbers at or above this select RAM.
const RAM_BANK_BASE: u16 = 256;

/// A Tigervision 3E board.
pub struct Cartridge3E {
    image: Vec<u8>,
    ram: Box<[u8; RAM_SIZE]>,
    current_bank: u16,
    bank_locked: bool,
}

impl Cartridge3E {
    /// Wraps an image made of 2 KB slices.
    pub fn new(image: Vec<u8>) -> Result<Self, CartridgeError> {
        if image.is_empty() || image.len() % SLICE_SIZE != 0 || image.len() > 512 * 1024 {
            return Err(CartridgeError::InvalidImageSize {
                kind: "3E",
                size: image.len(),
            });
        }
        Ok(Self {
            image,
            ram: Box::new([0; RAM_SIZE]),
            current_bank: 0,
            bank_locked: false,
        })
    }

    /// Switches the lower window to a RAM bank.
    fn bank_ram(&mut self, bank: u16, pages: &mut PageTable) {
        if self.bank_locked {
            return;
        }

        let bank = bank % (RAM_SIZE / RAM_BANK_SIZE) as u16;
        self.current_bank = bank + RAM_BANK_BASE;
        let ram_base = self.image.len() as u32 + bank as u32 * RAM_BANK_SIZE as u32;

        // Stores at $1000-$13FF
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
        // Loads at $1400-$17FF
        for page_start in (0x1400u16..0x1800).step_by(PageTable::PAGE_SIZE) {
            pages.set_page_access(
                PageTable::page_of(page_start),
                PageAccess::direct_peek(PageOwner::Cart, ram_base + u32::from(page_start & 0x03FF)),
            );
        }
    }

    /// Whether a RAM bank currently fills the lower window.
    fn ram_selected(&self) -> bool {
        self.current_bank >= RAM_BANK_BASE
    }
}

impl Device for Cartridge3E {
    fn name(&self) -> &'static str {
        "Cartridge3E"
    }

    fn install(&mut self, pages: &mut PageTable) {
        pages.set_page_access(PageTable::page_of(0x0000), PageAccess::device(PageOwner::Cart));

        let fixed_base = (self.image.len() - SLICE_SIZE) as u32;
        for page_start in (0x1800u16..0x2000).step_by(PageTable::PAGE_SIZE) {
            pages.set_page_access(
                PageTable::page_of(page_start),
                PageAccess::direct_peek(PageOwner::Cart, fixed_base + u32::from(page_start & 0x07FF)),
            );
        }

        self.bank(0, pages);
    }

    fn reset(&mut self, pages: &mut PageTable, _rng: &mut Random) {
        self.ram.fill(0);
        self.bank(0, pages);
    }

    fn save(&self, out: &mut Serializer) -> Result<(), StateError> {
        out.put_string(self.name());
        out.put_int(self.current_bank as i32);
        out.put_bytes(self.ram.as_ref());
        Ok(())
    }

    fn load(
        &mut self,
        input: &mut Deserializer<'_>,
        pages: &mut PageTable,
    ) -> Result<(), StateError> {
        input.expect_tag("Cartridge3E")?;
        let bank = input.get_int()? as u16;
        let ram = input.get_bytes()?;
        if ram.len() != RAM_SIZE {
            return Err(StateError::Malformed("3E RAM frame has wrong length"));
        }
        self.ram.copy_from_slice(&ram);

        if bank >= RAM_BANK_BASE {
            self.bank_ram(bank - RAM_BANK_BASE, pages);
        } else {
            self.bank(bank, pages);
        }
        Ok(())
    }
}

impl Cartridge for Cartridge3E {
    fn peek(&mut self, addr: u16, _ctx: &mut CartContext<'_>) -> u8 {
        let offset = (addr & 0x0FFF) as usize;
        if offset < 0x800 {
            if self.ram_selected() {
                let bank = (self.current_bank - RAM_BANK_BASE) as usize;
                self.ram[bank * RAM_BANK_SIZE + (offset & 0x3FF)]
            } else {
                self.image[self.current_bank as usize * SLICE_SIZE + (offset & 0x7FF)]
            }
        } else {
            self.image[self.image.len() - SLICE_SIZE + (offset & 0x7FF)]
        }
    }

    fn poke(&mut self, addr: u16, value: u8, ctx: &mut CartContext<'_>) {
        let offset = addr & 0x0FFF;

        if offset == 0x003F {
            self.bank(value as u16, ctx.pages);
        } else if offset == 0x003E {
            self.bank_ram(value as u16, ctx.pages);
        }

        ctx.tia.poke(addr, value, ctx.cycles);
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

    fn bank(&mut self, bank: u16, pages: &mut PageTable) {
        if self.bank_locked {
            return;
        }

        let bank_count = (self.image.len() / SLICE_SIZE) as u16;
        self.current_bank = bank % bank_count;

        let offset = self.current_bank as u32 * SLICE_SIZE as u32;
        for page_start in (WINDOW_BASE..0x1800).step_by(PageTable::PAGE_SIZE) {
            pages.set_page_access(
                PageTable::page_of(page_start),
                PageAccess::direct_peek(PageOwner::Cart, offset + u32::from(page_start & 0x07FF)),
            );
        }
    }

    fn current_bank(&self) -> u16 {
        self.current_bank
    }

    fn bank_count(&self) -> u16 {
        (self.image.len() / SLICE_SIZE) as u16
    }

    fn patch(&mut self, addr: u16, value: u8) -> bool {
        let offset = (addr & 0x0FFF) as usize;
        if offset < 0x800 {
            if self.ram_selected() {
                return false;
            }
            self.image[self.current_bank as usize * SLICE_SIZE + (offset & 0x7FF)] = value;
        } else {
            let fixed = self.image.len() - SLICE_SIZE;
            self.image[fixed + (offset & 0x7FF)] = value;
        }
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

    fn image(slices: usize) -> Vec<u8> {
        let mut data = vec![0u8; slices * SLICE_SIZE];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = (i / SLICE_SIZE) as u8;
        }
        data
    }

    fn ctx_parts() -> (PageTable, Tia, Riot) {
        (
            PageTable::new(),
            Tia::new(&Settings::default()),
            Riot::new(),
        )
    }

    #[test]
    fn test_rom_select_via_3f_hotspot() {
        let mut cart = Cartridge3E::new(image(4)).unwrap();
        let (mut pages, mut tia, mut riot) = ctx_parts();
        cart.install(&mut pages);
        let mut ctx = CartContext {
            pages: &mut pages,
            tia: &mut tia,
            riot: &mut riot,
            cycles: 0,
        };

        cart.poke(0x003F, 2, &mut ctx);
        assert_eq!(cart.current_bank(), 2);
        assert_eq!(cart.peek(0x1000, &mut ctx), 2);
    }

    #[test]
    fn test_ram_select_and_ports() {
        let mut cart = Cartridge3E::new(image(4)).unwrap();
        let (mut pages, mut tia, mut riot) = ctx_parts();
        cart.install(&mut pages);
        let mut ctx = CartContext {
            pages: &mut pages,
            tia: &mut tia,
            riot: &mut riot,
            cycles: 0,
        };

        cart.poke(0x003E, 3, &mut ctx);
        assert_eq!(cart.current_bank(), 256 + 3);

        // Store through the write page's direct base, read back via peek
        let write_access = ctx.pages.get_page_access(PageTable::page_of(0x1000));
        let base = write_access.direct_poke_base.unwrap();
        cart.poke_direct(base + 0x25, 0x5C);
        assert_eq!(cart.peek(0x1425, &mut ctx), 0x5C);
    }

    #[test]
    fn test_ram_bank_wraps() {
        let mut cart = Cartridge3E::new(image(2)).unwrap();
        let (mut pages, _tia, _riot) = ctx_parts();
        cart.install(&mut pages);
        cart.bank_ram(33, &mut pages);
        assert_eq!(cart.current_bank(), 256 + 1);
    }

    #[test]
    fn test_state_roundtrip_restores_ram_mode() {
        let mut cart = Cartridge3E::new(image(2)).unwrap();
        let (mut pages, _tia, _riot) = ctx_parts();
        cart.install(&mut pages);
        cart.bank_ram(7, &mut pages);
        let base = cart.image().len() as u32 + 7 * RAM_BANK_SIZE as u32;
        cart.poke_direct(base + 1, 0xEE);

        let mut out = Serializer::new();
        cart.save(&mut out).unwrap();
        let blob = out.into_bytes();

        let mut restored = Cartridge3E::new(image(2)).unwrap();
        let mut pages = PageTable::new();
        restored.install(&mut pages);
        restored
            .load(&mut Deserializer::new(&blob), &mut pages)
            .unwrap();

        assert_eq!(restored.current_bank(), 256 + 7);
        assert_eq!(restored.peek_direct(base + 1), 0xEE);
        // The restored mapping points the read page at the right RAM bank
        let access = pages.get_page_access(PageTable::page_of(0x1400));
        assert_eq!(access.direct_peek_base, Some(base));
    }
}
