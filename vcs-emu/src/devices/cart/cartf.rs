//! Atari F-series bankswitching (F8/F6/F4), with optional SuperChip RAM.
//!
//! The board holds two, four, or eight 4 KB banks; reading or writing a
//! hotspot at the top of the window ($1FF8/$1FF9 for F8, $1FF6-$1FF9 for
//! F6, $1FF4-$1FFB for F4) selects the bank whose index is the hotspot's
//! position in that range. Every page of the window except the one holding
//! the hotspots is direct-mapped onto the live bank; the hotspot page goes
//! through the mapper so switches are observed.
//!
//! SuperChip boards add 128 bytes of RAM overlaying the bottom of the
//! window: writes land at $1000-$107F, reads come from $1080-$10FF.

use crate::random::Random;
use crate::serializer::{Deserializer, Serializer, StateError};
use crate::system::{PageAccess, PageOwner, PageTable};

use super::{CartContext, Cartridge, CartridgeError, Device, WINDOW_BASE};

/// SuperChip RAM size.
const RAM_SIZE: usize = 128;

/// Bank size for the whole family.
const BANK_SIZE: usize = 4096;

/// First page of the window holding hotspots; never direct-mapped.
const HOTSPOT_PAGE_START: u16 = 0x1FC0;

/// An F8, F6, or F4 board, optionally carrying SuperChip RAM.
///
/// The three schemes differ only in bank count, hotspot range, and startup
/// bank, so one mapper covers the family.
pub struct CartridgeF {
    name: &'static str,
    image: Vec<u8>,
    bank_count: u16,
    /// First hotspot, as an offset within the 4 KB window.
    hotspot_base: u16,
    /// Bank mapped on reset.
    start_bank: u16,
    ram: Option<Box<[u8; RAM_SIZE]>>,

    current_bank: u16,
    bank_locked: bool,
}

impl CartridgeF {
    fn build(
        name: &'static str,
        kind: &'static str,
        image: Vec<u8>,
        bank_count: u16,
        hotspot_base: u16,
        start_bank: u16,
        superchip: bool,
    ) -> Result<Self, CartridgeError> {
        if image.len() != bank_count as usize * BANK_SIZE {
            return Err(CartridgeError::InvalidImageSize {
                kind,
                size: image.len(),
            });
        }
        Ok(Self {
            name,
            image,
            bank_count,
            hotspot_base,
            start_bank,
            ram: superchip.then(|| Box::new([0; RAM_SIZE])),
            current_bank: start_bank,
            bank_locked: false,
        })
    }

    /// 8 KB F8 board; starts in the upper bank.
    pub fn f8(image: Vec<u8>) -> Result<Self, CartridgeError> {
        Self::build("CartridgeF8", "F8", image, 2, 0x0FF8, 1, false)
    }

    /// F8 with SuperChip RAM.
    pub fn f8sc(image: Vec<u8>) -> Result<Self, CartridgeError> {
        Self::build("CartridgeF8SC", "F8SC", image, 2, 0x0FF8, 1, true)
    }

    /// 16 KB F6 board.
    pub fn f6(image: Vec<u8>) -> Result<Self, CartridgeError> {
        Self::build("CartridgeF6", "F6", image, 4, 0x0FF6, 0, false)
    }

    /// F6 with SuperChip RAM.
    pub fn f6sc(image: Vec<u8>) -> Result<Self, CartridgeError> {
        Self::build("CartridgeF6SC", "F6SC", image, 4, 0x0FF6, 0, true)
    }

    /// 32 KB F4 board.
    pub fn f4(image: Vec<u8>) -> Result<Self, CartridgeError> {
        Self::build("CartridgeF4", "F4", image, 8, 0x0FF4, 0, false)
    }

    /// F4 with SuperChip RAM.
    pub fn f4sc(image: Vec<u8>) -> Result<Self, CartridgeError> {
        Self::build("CartridgeF4SC", "F4SC", image, 8, 0x0FF4, 0, true)
    }

    /// Checks a window offset against the hotspot range, switching banks
    /// on a hit.
    fn check_hotspot(&mut self, offset: u16, pages: &mut PageTable) {
        if offset >= self.hotspot_base && offset < self.hotspot_base + self.bank_count {
            let bank = offset - self.hotspot_base;
            self.bank(bank, pages);
        }
    }

    /// First window offset served by ROM (past any SuperChip overlay).
    fn rom_window_start(&self) -> u16 {
        if self.ram.is_some() {
            0x1100
        } else {
            WINDOW_BASE
        }
    }
}

impl Device for CartridgeF {
    fn name(&self) -> &'static str {
        self.name
    }

    fn install(&mut self, pages: &mut PageTable) {
        // The hotspot page is always handled by the mapper
        pages.set_page_access(
            PageTable::page_of(HOTSPOT_PAGE_START),
            PageAccess::device(PageOwner::Cart),
        );

        if self.ram.is_some() {
            let ram_base = self.image.len() as u32;
            // Write port: $1000-$107F stores straight into RAM
            for page_start in (0x1000u16..0x1080).step_by(PageTable::PAGE_SIZE) {
                pages.set_page_access(
                    PageTable::page_of(page_start),
                    PageAccess {
                        direct_peek_base: None,
                        direct_poke_base: Some(ram_base + u32::from(page_start & 0x7F)),
                        owner: PageOwner::Cart,
                    },
                );
            }
            // Read port: $1080-$10FF reads straight out of RAM
            for page_start in (0x1080u16..0x1100).step_by(PageTable::PAGE_SIZE) {
                pages.set_page_access(
                    PageTable::page_of(page_start),
                    PageAccess::direct_peek(PageOwner::Cart, ram_base + u32::from(page_start & 0x7F)),
                );
            }
        }

        let start = self.start_bank;
        self.bank(start, pages);
    }

    fn reset(&mut self, pages: &mut PageTable, _rng: &mut Random) {
        if let Some(ram) = self.ram.as_mut() {
            ram.fill(0);
        }
        let start = self.start_bank;
        self.bank(start, pages);
    }

    fn save(&self, out: &mut Serializer) -> Result<(), StateError> {
        out.put_string(self.name);
        out.put_int(self.current_bank as i32);
        if let Some(ram) = self.ram.as_ref() {
            out.put_bytes(ram.as_ref());
        }
        Ok(())
    }

    fn load(
        &mut self,
        input: &mut Deserializer<'_>,
        pages: &mut PageTable,
    ) -> Result<(), StateError> {
        let found = input.get_string()?;
        if found != self.name {
            return Err(StateError::TagMismatch {
                expected: self.name,
                found,
            });
        }

        let bank = input.get_int()? as u16;
        if self.ram.is_some() {
            let ram = input.get_bytes()?;
            if ram.len() != RAM_SIZE {
                return Err(StateError::Malformed("SuperChip RAM frame has wrong length"));
            }
            if let Some(store) = self.ram.as_mut() {
                store.copy_from_slice(&ram);
            }
        }

        self.bank(bank, pages);
        Ok(())
    }
}

impl Cartridge for CartridgeF {
    fn peek(&mut self, addr: u16, ctx: &mut CartContext<'_>) -> u8 {
        let offset = addr & 0x0FFF;

        if !self.bank_locked {
            self.check_hotspot(offset, ctx.pages);
        }

        if let Some(ram) = self.ram.as_ref() {
            // Only the read port answers with RAM; the write port at
            // $1000-$107F is write-only and reads fall through to ROM.
            if (0x0080..0x0100).contains(&offset) {
                return ram[(offset & 0x7F) as usize];
            }
        }

        self.image[self.current_bank as usize * BANK_SIZE + offset as usize]
    }

    fn poke(&mut self, addr: u16, value: u8, ctx: &mut CartContext<'_>) {
        let offset = addr & 0x0FFF;

        if !self.bank_locked {
            self.check_hotspot(offset, ctx.pages);
        }

        if let Some(ram) = self.ram.as_mut() {
            if offset < 0x80 {
                ram[offset as usize] = value;
            }
        }
    }

    fn peek_direct(&self, offset: u32) -> u8 {
        let offset = offset as usize;
        if offset < self.image.len() {
            self.image[offset]
        } else {
            match self.ram.as_ref() {
                Some(ram) => ram[(offset - self.image.len()) & (RAM_SIZE - 1)],
                None => 0,
            }
        }
    }

    fn poke_direct(&mut self, offset: u32, value: u8) {
        let offset = offset as usize;
        if offset >= self.image.len() {
            if let Some(ram) = self.ram.as_mut() {
                ram[(offset - self.image.len()) & (RAM_SIZE - 1)] = value;
            }
        }
    }

    fn bank(&mut self, bank: u16, pages: &mut PageTable) {
        if self.bank_locked {
            return;
        }

        self.current_bank = bank % self.bank_count;
        let offset = self.current_bank as u32 * BANK_SIZE as u32;

        // Remap every window page below the hotspot page onto the new bank
        for page_start in (self.rom_window_start()..HOTSPOT_PAGE_START).step_by(PageTable::PAGE_SIZE)
        {
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
        self.bank_count
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

    /// Builds an image where every byte names its bank.
    fn banked_image(banks: usize) -> Vec<u8> {
        let mut image = vec![0u8; banks * BANK_SIZE];
        for (i, byte) in image.iter_mut().enumerate() {
            *byte = (i / BANK_SIZE) as u8;
        }
        image
    }

    fn with_ctx<R>(cart: &mut CartridgeF, f: impl FnOnce(&mut CartridgeF, &mut CartContext<'_>) -> R) -> R {
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
        f(cart, &mut ctx)
    }

    #[test]
    fn test_f8_starts_in_upper_bank() {
        let cart = CartridgeF::f8(banked_image(2)).unwrap();
        assert_eq!(cart.current_bank(), 1);
    }

    #[test]
    fn test_f8_hotspot_switches() {
        let mut cart = CartridgeF::f8(banked_image(2)).unwrap();
        with_ctx(&mut cart, |cart, ctx| {
            assert_eq!(cart.peek(0x1000, ctx), 1);
            // Touching $1FF8 selects bank 0
            cart.peek(0x1FF8, ctx);
            assert_eq!(cart.current_bank(), 0);
            assert_eq!(cart.peek(0x1000, ctx), 0);
            // And $1FF9 selects bank 1 again
            cart.peek(0x1FF9, ctx);
            assert_eq!(cart.current_bank(), 1);
        });
    }

    #[test]
    fn test_every_bank_maps_correct_slice() {
        let schemes: [(fn(Vec<u8>) -> Result<CartridgeF, CartridgeError>, usize); 3] =
            [(CartridgeF::f8, 2), (CartridgeF::f6, 4), (CartridgeF::f4, 8)];
        for (build, banks) in schemes {
            let mut cart = build(banked_image(banks)).unwrap();
            let mut pages = PageTable::new();
            cart.install(&mut pages);
            for bank in 0..banks as u16 {
                cart.bank(bank, &mut pages);
                // A direct page in the middle of the window shows the slice
                let access = pages.get_page_access(PageTable::page_of(0x1800));
                let base = access.direct_peek_base.unwrap();
                assert_eq!(cart.peek_direct(base), bank as u8);
            }
        }
    }

    #[test]
    fn test_out_of_range_bank_wraps() {
        let mut cart = CartridgeF::f6(banked_image(4)).unwrap();
        let mut pages = PageTable::new();
        cart.install(&mut pages);
        cart.bank(9, &mut pages);
        assert_eq!(cart.current_bank(), 1);
    }

    #[test]
    fn test_bank_lock_suppresses_switching() {
        let mut cart = CartridgeF::f8(banked_image(2)).unwrap();
        with_ctx(&mut cart, |cart, ctx| {
            cart.set_bank_locked(true);
            cart.peek(0x1FF8, ctx);
            assert_eq!(cart.current_bank(), 1);
            // Peeks still resolve through the current mapping
            assert_eq!(cart.peek(0x1000, ctx), 1);
        });
    }

    #[test]
    fn test_superchip_ram_ports() {
        let mut cart = CartridgeF::f8sc(banked_image(2)).unwrap();
        with_ctx(&mut cart, |cart, ctx| {
            cart.poke(0x1010, 0xCD, ctx);
            // Read port is 0x80 above the write port
            assert_eq!(cart.peek(0x1090, ctx), 0xCD);
            // The write port is write-only: reading it falls through to
            // the ROM image, not the RAM just stored
            assert_eq!(cart.peek(0x1010, ctx), 1);
        });
    }

    #[test]
    fn test_superchip_direct_offsets() {
        let mut cart = CartridgeF::f8sc(banked_image(2)).unwrap();
        let ram_base = cart.image().len() as u32;
        cart.poke_direct(ram_base + 5, 0x5A);
        assert_eq!(cart.peek_direct(ram_base + 5), 0x5A);
    }

    #[test]
    fn test_state_roundtrip_with_ram() {
        let mut cart = CartridgeF::f6sc(banked_image(4)).unwrap();
        let mut pages = PageTable::new();
        cart.install(&mut pages);
        cart.bank(2, &mut pages);
        let ram_base = cart.image().len() as u32;
        cart.poke_direct(ram_base + 10, 0x42);

        let mut out = Serializer::new();
        cart.save(&mut out).unwrap();
        let blob = out.into_bytes();

        let mut restored = CartridgeF::f6sc(banked_image(4)).unwrap();
        let mut pages = PageTable::new();
        restored.install(&mut pages);
        restored
            .load(&mut Deserializer::new(&blob), &mut pages)
            .unwrap();

        assert_eq!(restored.current_bank(), 2);
        assert_eq!(restored.peek_direct(ram_base + 10), 0x42);
    }

    #[test]
    fn test_patch_through_current_bank() {
        let mut cart = CartridgeF::f8(banked_image(2)).unwrap();
        let mut pages = PageTable::new();
        cart.install(&mut pages);
        cart.bank(0, &mut pages);
        assert!(cart.patch(0x1234, 0x99));
        assert_eq!(cart.peek_direct(0x234), 0x99);
        // Bank 1's copy is untouched
        assert_eq!(cart.peek_direct(BANK_SIZE as u32 + 0x234), 1);
    }
}
