//! M-Network E7 bankswitching.
//!
//! A 16 KB image in eight 2 KB banks plus 2 KB of RAM. The lower window
//! half ($1000-$17FF) shows the ROM bank selected by $1FE0-$1FE6, or - when
//! $1FE7 is touched - a 1 KB RAM block (stores at $1000-$13FF, loads at
//! $1400-$17FF). $1800-$19FF is a 256-byte RAM window banked by
//! $1FE8-$1FEB (stores at $1800-$18FF, loads at $1900-$19FF), and
//! $1A00-$1FFF is fixed to the last 1.5 KB of ROM, where the hotspots
//! live.

use crate::random::Random;
use crate::serializer::{Deserializer, Serializer, StateError};
use crate::system::{PageAccess, PageOwner, PageTable};

use super::{CartContext, Cartridge, CartridgeError, Device};

/// ROM bank size.
const BANK_SIZE: usize = 2048;

/// Total on-cart RAM: one 1 KB block plus four 256-byte blocks.
const RAM_SIZE: usize = 2048;

/// Sentinel bank number meaning "RAM fills the lower window".
const RAM_BANK: u16 = 7;

/// An M-Network E7 board.
pub struct CartridgeE7 {
    image: Vec<u8>,
    ram: Box<[u8; RAM_SIZE]>,
    /// ROM bank in the lower window, or [`RAM_BANK`] for the RAM block.
    current_bank: u16,
    /// Selected 256-byte RAM block for the $1800 window.
    current_ram: u16,
    bank_locked: bool,
}

impl CartridgeE7 {
    /// Wraps a 16 KB image.
    pub fn new(image: Vec<u8>) -> Result<Self, CartridgeError> {
        if image.len() != 16384 {
            return Err(CartridgeError::InvalidImageSize {
                kind: "E7",
                size: image.len(),
            });
        }
        Ok(Self {
            image,
            ram: Box::new([0; RAM_SIZE]),
            current_bank: 0,
            current_ram: 0,
            bank_locked: false,
        })
    }

    /// Selects the 256-byte RAM block shown at $1800-$19FF.
    fn bank_ram(&mut self, block: u16, pages: &mut PageTable) {
        if self.bank_locked {
            return;
        }

        let block = block & 0x03;
        self.current_ram = block;
        // The four blocks live in the upper kilobyte of RAM
        let base = self.image.len() as u32 + 1024 + block as u32 * 256;

        for page_start in (0x1800u16..0x1900).step_by(PageTable::PAGE_SIZE) {
            pages.set_page_access(
                PageTable::page_of(page_start),
                PageAccess {
                    direct_peek_base: None,
                    direct_poke_base: Some(base + u32::from(page_start & 0xFF)),
                    owner: PageOwner::Cart,
                },
            );
        }
        for page_start in (0x1900u16..0x1A00).step_by(PageTable::PAGE_SIZE) {
            pages.set_page_access(
                PageTable::page_of(page_start),
                PageAccess::direct_peek(PageOwner::Cart, base + u32::from(page_start & 0xFF)),
            );
        }
    }

    /// Applies a hotspot access, if the offset is one.
    fn check_hotspot(&mut self, offset: u16, pages: &mut PageTable) {
        if self.bank_locked {
            return;
        }
        match offset {
            0x0FE0..=0x0FE7 => self.bank(offset - 0x0FE0, pages),
            0x0FE8..=0x0FEB => self.bank_ram(offset - 0x0FE8, pages),
            _ => {}
        }
    }

    /// Image offset of the fixed upper region for a window offset.
    fn fixed_offset(&self, offset: u16) -> usize {
        self.image.len() - 1536 + (offset - 0x0A00) as usize
    }
}

impl Device for CartridgeE7 {
    fn name(&self) -> &'static str {
        "CartridgeE7"
    }

    fn install(&mut self, pages: &mut PageTable) {
        // Fixed upper region, bar the hotspot page
        for page_start in (0x1A00u16..0x1FC0).step_by(PageTable::PAGE_SIZE) {
            let base = self.fixed_offset(page_start & 0x0FFF) as u32;
            pages.set_page_access(
                PageTable::page_of(page_start),
                PageAccess::direct_peek(PageOwner::Cart, base),
            );
        }
        pages.set_page_access(PageTable::page_of(0x1FC0), PageAccess::device(PageOwner::Cart));

        self.bank_ram(0, pages);
        self.bank(0, pages);
    }

    fn reset(&mut self, pages: &mut PageTable, _rng: &mut Random) {
        self.ram.fill(0);
        self.bank_ram(0, pages);
        self.bank(0, pages);
    }

    fn save(&self, out: &mut Serializer) -> Result<(), StateError> {
        out.put_string(self.name());
        out.put_int(self.current_bank as i32);
        out.put_int(self.current_ram as i32);
        out.put_bytes(self.ram.as_ref());
        Ok(())
    }

    fn load(
        &mut self,
        input: &mut Deserializer<'_>,
        pages: &mut PageTable,
    ) -> Result<(), StateError> {
        input.expect_tag("CartridgeE7")?;
        let bank = input.get_int()? as u16;
        let ram_block = input.get_int()? as u16;
        let ram = input.get_bytes()?;
        if ram.len() != RAM_SIZE {
            return Err(StateError::Malformed("E7 RAM frame has wrong length"));
        }
        self.ram.copy_from_slice(&ram);

        self.bank_ram(ram_block, pages);
        self.bank(bank, pages);
        Ok(())
    }
}

impl Cartridge for CartridgeE7 {
    fn peek(&mut self, addr: u16, ctx: &mut CartContext<'_>) -> u8 {
        let offset = addr & 0x0FFF;
        self.check_hotspot(offset, ctx.pages);

        match offset {
            0x0000..=0x07FF => {
                if self.current_bank == RAM_BANK {
                    self.ram[(offset & 0x3FF) as usize]
                } else {
                    self.image[self.current_bank as usize * BANK_SIZE + (offset & 0x7FF) as usize]
                }
            }
            0x0800..=0x09FF => {
                self.ram[1024 + self.current_ram as usize * 256 + (offset & 0xFF) as usize]
            }
            _ => self.image[self.fixed_offset(offset)],
        }
    }

    fn poke(&mut self, addr: u16, value: u8, ctx: &mut CartContext<'_>) {
        let offset = addr & 0x0FFF;
        self.check_hotspot(offset, ctx.pages);

        match offset {
            0x0000..=0x03FF if self.current_bank == RAM_BANK => {
                self.ram[(offset & 0x3FF) as usize] = value;
            }
            0x0800..=0x08FF => {
                self.ram[1024 + self.current_ram as usize * 256 + (offset & 0xFF) as usize] = value;
            }
            _ => {}
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

    fn bank(&mut self, bank: u16, pages: &mut PageTable) {
        if self.bank_locked {
            return;
        }

        let bank = bank % 8;
        self.current_bank = bank;

        if bank == RAM_BANK {
            // RAM fills the lower window: stores low, loads high
            let base = self.image.len() as u32;
            for page_start in (0x1000u16..0x1400).step_by(PageTable::PAGE_SIZE) {
                pages.set_page_access(
                    PageTable::page_of(page_start),
                    PageAccess {
                        direct_peek_base: None,
                        direct_poke_base: Some(base + u32::from(page_start & 0x03FF)),
                        owner: PageOwner::Cart,
                    },
                );
            }
            for page_start in (0x1400u16..0x1800).step_by(PageTable::PAGE_SIZE) {
                pages.set_page_access(
                    PageTable::page_of(page_start),
                    PageAccess::direct_peek(PageOwner::Cart, base + u32::from(page_start & 0x03FF)),
                );
            }
        } else {
            let offset = bank as u32 * BANK_SIZE as u32;
            for page_start in (0x1000u16..0x1800).step_by(PageTable::PAGE_SIZE) {
                pages.set_page_access(
                    PageTable::page_of(page_start),
                    PageAccess::direct_peek(PageOwner::Cart, offset + u32::from(page_start & 0x07FF)),
                );
            }
        }
    }

    fn current_bank(&self) -> u16 {
        self.current_bank
    }

    fn bank_count(&self) -> u16 {
        8
    }

    fn patch(&mut self, addr: u16, value: u8) -> bool {
        let offset = addr & 0x0FFF;
        match offset {
            0x0000..=0x07FF => {
                if self.current_bank == RAM_BANK {
                    return false;
                }
                self.image[self.current_bank as usize * BANK_SIZE + (offset & 0x7FF) as usize] =
                    value;
            }
            0x0800..=0x09FF => return false,
            _ => {
                let fixed = self.fixed_offset(offset);
                self.image[fixed] = value;
            }
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

    fn banked_image() -> Vec<u8> {
        let mut image = vec![0u8; 16384];
        for (i, byte) in image.iter_mut().enumerate() {
            *byte = (i / BANK_SIZE) as u8;
        }
        image
    }

    fn run<R>(f: impl FnOnce(&mut CartridgeE7, &mut CartContext<'_>) -> R) -> R {
        let mut cart = CartridgeE7::new(banked_image()).unwrap();
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
        f(&mut cart, &mut ctx)
    }

    #[test]
    fn test_rom_bank_select() {
        run(|cart, ctx| {
            assert_eq!(cart.peek(0x1000, ctx), 0);
            cart.peek(0x1FE3, ctx);
            assert_eq!(cart.current_bank(), 3);
            assert_eq!(cart.peek(0x1000, ctx), 3);
        });
    }

    #[test]
    fn test_fixed_region_shows_tail_of_image() {
        run(|cart, ctx| {
            // $1A00 is the first byte of the last 1.5 KB, inside bank 7
            assert_eq!(cart.peek(0x1A00, ctx), 7);
            assert_eq!(cart.peek(0x1FBF, ctx), 7);
        });
    }

    #[test]
    fn test_ram_mode_in_lower_window() {
        run(|cart, ctx| {
            cart.peek(0x1FE7, ctx); // switch in RAM
            assert_eq!(cart.current_bank(), RAM_BANK);
            cart.poke(0x1123, 0xBE, ctx);
            assert_eq!(cart.peek(0x1523, ctx), 0xBE);
        });
    }

    #[test]
    fn test_ram_block_banking() {
        run(|cart, ctx| {
            cart.peek(0x1FE9, ctx); // block 1
            assert_eq!(cart.current_ram, 1);
            cart.poke(0x1810, 0x11, ctx);
            assert_eq!(cart.peek(0x1910, ctx), 0x11);

            cart.peek(0x1FE8, ctx); // block 0 is distinct
            assert_eq!(cart.peek(0x1910, ctx), 0x00);
        });
    }

    #[test]
    fn test_state_roundtrip() {
        let blob = run(|cart, ctx| {
            cart.peek(0x1FE5, ctx);
            cart.peek(0x1FEA, ctx);
            cart.poke(0x1820, 0x77, ctx);
            let mut out = Serializer::new();
            cart.save(&mut out).unwrap();
            out.into_bytes()
        });

        let mut restored = CartridgeE7::new(banked_image()).unwrap();
        let mut pages = PageTable::new();
        restored.install(&mut pages);
        restored
            .load(&mut Deserializer::new(&blob), &mut pages)
            .unwrap();

        assert_eq!(restored.current_bank(), 5);
        assert_eq!(restored.current_ram, 2);
        let base = restored.image().len() as u32 + 1024 + 2 * 256 + 0x20;
        assert_eq!(restored.peek_direct(base), 0x77);
    }
}
