//! Activision FE bankswitching.
//!
//! Two 4 KB banks with no hotspots in the window. The board watches the
//! stack traffic of JSR/RTS: whenever $01FE is accessed, bit 5 of the byte
//! transferred there (the high byte of the return address) picks the bank -
//! set selects bank 0, clear selects bank 1.
//!
//! To see that traffic the mapper claims the RAM mirror pages holding the
//! top of the stack and chains those accesses through to the RIOT, so RAM
//! behavior is unchanged.

use crate::random::Random;
use crate::serializer::{Deserializer, Serializer, StateError};
use crate::system::{PageAccess, PageOwner, PageTable};

use super::{CartContext, Cartridge, CartridgeError, Device, WINDOW_BASE};

/// Bank size.
const BANK_SIZE: usize = 4096;

/// The monitored stack address.
const TRIGGER: u16 = 0x01FE;

/// An Activision FE board.
pub struct CartridgeFE {
    image: Vec<u8>,
    current_bank: u16,
    bank_locked: bool,
}

impl CartridgeFE {
    /// Wraps an 8 KB image.
    pub fn new(image: Vec<u8>) -> Result<Self, CartridgeError> {
        if image.len() != 8192 {
            return Err(CartridgeError::InvalidImageSize {
                kind: "FE",
                size: image.len(),
            });
        }
        Ok(Self {
            image,
            current_bank: 0,
            bank_locked: false,
        })
    }

    /// Switches banks when the monitored address carries a bank cue.
    fn check_switch(&mut self, addr: u16, value: u8, pages: &mut PageTable) {
        if self.bank_locked || addr != TRIGGER {
            return;
        }
        let bank = if value & 0x20 != 0 { 0 } else { 1 };
        self.bank(bank, pages);
    }
}

impl Device for CartridgeFE {
    fn name(&self) -> &'static str {
        "CartridgeFE"
    }

    fn install(&mut self, pages: &mut PageTable) {
        // Claim the RAM mirror pages covering $0180-$01FF so stack pushes
        // and pulls at $01FE pass through the mapper.
        pages.set_page_access(PageTable::page_of(0x0180), PageAccess::device(PageOwner::Cart));
        pages.set_page_access(PageTable::page_of(0x01C0), PageAccess::device(PageOwner::Cart));

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
        input.expect_tag("CartridgeFE")?;
        let bank = input.get_int()? as u16;
        self.bank(bank, pages);
        Ok(())
    }
}

impl Cartridge for CartridgeFE {
    fn peek(&mut self, addr: u16, ctx: &mut CartContext<'_>) -> u8 {
        if addr < 0x0200 {
            // Chain to the RIOT RAM underneath, then inspect the byte
            let value = ctx.riot.peek(addr, ctx.cycles);
            self.check_switch(addr, value, ctx.pages);
            value
        } else {
            self.image[self.current_bank as usize * BANK_SIZE + (addr & 0x0FFF) as usize]
        }
    }

    fn poke(&mut self, addr: u16, value: u8, ctx: &mut CartContext<'_>) {
        if addr < 0x0200 {
            ctx.riot.poke(addr, value, ctx.cycles);
            self.check_switch(addr, value, ctx.pages);
        }
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

    fn run<R>(f: impl FnOnce(&mut CartridgeFE, &mut CartContext<'_>) -> R) -> R {
        let mut cart = CartridgeFE::new(banked_image()).unwrap();
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
    fn test_push_at_01fe_selects_bank() {
        run(|cart, ctx| {
            // A JSR into $Dxxx pushes 0xDx at $01FE: bit 5 clear -> bank 1
            cart.poke(TRIGGER, 0xD0, ctx);
            assert_eq!(cart.current_bank(), 1);

            // A JSR into $Fxxx pushes 0xFx: bit 5 set -> bank 0
            cart.poke(TRIGGER, 0xF0, ctx);
            assert_eq!(cart.current_bank(), 0);
        });
    }

    #[test]
    fn test_pull_at_01fe_selects_bank() {
        run(|cart, ctx| {
            // Store the return-address high byte in RAM first
            cart.poke(TRIGGER, 0xD3, ctx);
            cart.bank(0, ctx.pages);

            // An RTS pulls the byte back; the read switches too
            let value = cart.peek(TRIGGER, ctx);
            assert_eq!(value, 0xD3);
            assert_eq!(cart.current_bank(), 1);
        });
    }

    #[test]
    fn test_ram_chaining_preserves_contents() {
        run(|cart, ctx| {
            cart.poke(0x01F0, 0x42, ctx);
            assert_eq!(cart.peek(0x01F0, ctx), 0x42);
            // The byte is the same RAM the RIOT serves at $90
            assert_eq!(ctx.riot.peek(0x0090, 0), 0x42);
        });
    }

    #[test]
    fn test_01ff_does_not_switch() {
        run(|cart, ctx| {
            cart.poke(0x01FF, 0xD0, ctx);
            assert_eq!(cart.current_bank(), 0);
        });
    }

    #[test]
    fn test_window_reads_follow_bank() {
        run(|cart, ctx| {
            assert_eq!(cart.peek(0x1000, ctx), 0);
            cart.poke(TRIGGER, 0xD0, ctx); // bank 1
            assert_eq!(cart.peek(0x1000, ctx), 1);
        });
    }
}
