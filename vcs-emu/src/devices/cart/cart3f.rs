//! Tigervision 3F bankswitching.
//!
//! The window is split in half: the upper 2 KB always shows the last slice
//! of the image, while the lower 2 KB shows the slice selected by the most
//! recent write to $00-$3F (the value is the bank number). The mapper traps
//! that low page and, because those addresses belong to the TIA, chains
//! every write it receives on to the TIA as well.
//!
//! Images up to 512 KB work; the bank number wraps modulo the slice count.

use crate::random::Random;
use crate::serializer::{Deserializer, Serializer, StateError};
use crate::system::{PageAccess, PageOwner, PageTable};

use super::{CartContext, Cartridge, CartridgeError, Device, WINDOW_BASE};

/// Slice size for the Tigervision schemes.
pub(super) const SLICE_SIZE: usize = 2048;

/// Largest supported image.
const MAX_SIZE: usize = 512 * 1024;

/// A Tigervision 3F board.
pub struct Cartridge3F {
    image: Vec<u8>,
    current_bank: u16,
    bank_locked: bool,
}

impl Cartridge3F {
    /// Wraps an image made of 2 KB slices.
    pub fn new(image: Vec<u8>) -> Result<Self, CartridgeError> {
        if image.is_empty() || image.len() % SLICE_SIZE != 0 || image.len() > MAX_SIZE {
            return Err(CartridgeError::InvalidImageSize {
                kind: "3F",
                size: image.len(),
            });
        }
        Ok(Self {
            image,
            current_bank: 0,
            bank_locked: false,
        })
    }
}

impl Device for Cartridge3F {
    fn name(&self) -> &'static str {
        "Cartridge3F"
    }

    fn install(&mut self, pages: &mut PageTable) {
        // Trap the page holding $00-$3F so bank-select writes (which are
        // also TIA writes) reach the mapper.
        pages.set_page_access(PageTable::page_of(0x0000), PageAccess::device(PageOwner::Cart));

        // The upper half of the window is fixed to the last slice
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
        input.expect_tag("Cartridge3F")?;
        let bank = input.get_int()? as u16;
        self.bank(bank, pages);
        Ok(())
    }
}

impl Cartridge for Cartridge3F {
    fn peek(&mut self, addr: u16, _ctx: &mut CartContext<'_>) -> u8 {
        let offset = (addr & 0x0FFF) as usize;
        if offset < SLICE_SIZE {
            self.image[self.current_bank as usize * SLICE_SIZE + (offset & 0x07FF)]
        } else {
            self.image[self.image.len() - SLICE_SIZE + (offset & 0x07FF)]
        }
    }

    fn poke(&mut self, addr: u16, value: u8, ctx: &mut CartContext<'_>) {
        let offset = addr & 0x0FFF;

        if offset <= 0x003F {
            self.bank(value as u16, ctx.pages);
        }

        // The trapped addresses are TIA registers; the chip still sees the
        // write.
        ctx.tia.poke(addr, value, ctx.cycles);
    }

    fn peek_direct(&self, offset: u32) -> u8 {
        self.image[offset as usize]
    }

    fn bank(&mut self, bank: u16, pages: &mut PageTable) {
        if self.bank_locked {
            return;
        }

        let bank_count = (self.image.len() / SLICE_SIZE) as u16;
        self.current_bank = if (bank as usize) * SLICE_SIZE < self.image.len() {
            bank
        } else {
            bank % bank_count
        };

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
        if offset < SLICE_SIZE {
            self.image[self.current_bank as usize * SLICE_SIZE + (offset & 0x07FF)] = value;
        } else {
            let fixed = self.image.len() - SLICE_SIZE;
            self.image[fixed + (offset & 0x07FF)] = value;
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

    fn sliced_image(slices: usize) -> Vec<u8> {
        let mut image = vec![0u8; slices * SLICE_SIZE];
        for (i, byte) in image.iter_mut().enumerate() {
            *byte = (i / SLICE_SIZE) as u8;
        }
        image
    }

    #[test]
    fn test_upper_half_fixed_to_last_slice() {
        let mut cart = Cartridge3F::new(sliced_image(4)).unwrap();
        let mut pages = PageTable::new();
        cart.install(&mut pages);

        let access = pages.get_page_access(PageTable::page_of(0x1800));
        assert_eq!(cart.peek_direct(access.direct_peek_base.unwrap()), 3);
    }

    #[test]
    fn test_write_to_low_page_switches_and_chains() {
        let mut cart = Cartridge3F::new(sliced_image(4)).unwrap();
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

        cart.poke(0x0000, 0x02, &mut ctx);
        assert_eq!(cart.current_bank(), 2);
        assert_eq!(cart.peek(0x1000, &mut ctx), 2);
        // The TIA observed the same write
        assert_eq!(tia.register(0x00), 0x02);
    }

    #[test]
    fn test_bank_wraps_modulo_count() {
        let mut cart = Cartridge3F::new(sliced_image(4)).unwrap();
        let mut pages = PageTable::new();
        cart.install(&mut pages);
        cart.bank(6, &mut pages);
        assert_eq!(cart.current_bank(), 2);
    }

    #[test]
    fn test_state_roundtrip() {
        let mut cart = Cartridge3F::new(sliced_image(8)).unwrap();
        let mut pages = PageTable::new();
        cart.install(&mut pages);
        cart.bank(5, &mut pages);

        let mut out = Serializer::new();
        cart.save(&mut out).unwrap();
        let blob = out.into_bytes();

        let mut restored = Cartridge3F::new(sliced_image(8)).unwrap();
        let mut pages = PageTable::new();
        restored.install(&mut pages);
        restored
            .load(&mut Deserializer::new(&blob), &mut pages)
            .unwrap();
        assert_eq!(restored.current_bank(), 5);
    }

    #[test]
    fn test_load_rejects_wrong_variant() {
        let mut out = Serializer::new();
        out.put_string("CartridgeF8");
        out.put_int(0);
        let blob = out.into_bytes();

        let mut cart = Cartridge3F::new(sliced_image(2)).unwrap();
        let mut pages = PageTable::new();
        assert!(cart
            .load(&mut Deserializer::new(&blob), &mut pages)
            .is_err());
    }
}
