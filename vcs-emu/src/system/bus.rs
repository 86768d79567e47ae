//! The paged memory bus.
//!
//! The 6507 drives a 13-bit address space carved into 64-byte pages; every
//! access masks the address once at the bus boundary and dispatches through
//! a 128-entry page-access table. A page either short-circuits to a direct
//! offset into its owning device's backing store (no decoding, no side
//! effects) or routes to the device's `peek`/`poke` handler.
//!
//! The bus also owns the data-bus latch: the last byte driven on the bus,
//! which is what floating reads observe, plus a lock that debug tooling
//! uses to inspect memory without disturbing that latch.

use lib6507::MemoryBus;

use crate::devices::cart::{CartContext, Cartridge};
use crate::devices::{Device, NullDevice, Riot, Tia};
use crate::random::Random;
use crate::serializer::{Deserializer, Serializer, StateError};
use crate::settings::Settings;

/// Log base 2 of the addressing space size (the 6507 has 13 address lines).
pub const ADDRESS_SPACE_BITS: u16 = 13;

/// Log base 2 of the page size.
pub const PAGE_BITS: u16 = 6;

/// Which device owns a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOwner {
    /// Unmapped; reads float, writes vanish.
    Null,
    /// The TIA register space (and its mirrors).
    Tia,
    /// The 6532 RAM/IO/timer (and its mirrors).
    Riot,
    /// The cartridge, including any extra pages a mapper traps.
    Cart,
}

/// Access methods for one page.
///
/// The direct bases are offsets into the owning device's backing store, in
/// whatever layout that device chose; when present, the bus reads or
/// writes `store[base + (addr & page_mask)]` without involving the
/// device's handler. Either a direct peek base or the owning device must
/// be able to answer a read on any valid page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageAccess {
    /// Backing-store offset for reads, or `None` to call the device.
    pub direct_peek_base: Option<u32>,

    /// Backing-store offset for writes, or `None` to call the device.
    pub direct_poke_base: Option<u32>,

    /// The device behind this page.
    pub owner: PageOwner,
}

impl PageAccess {
    /// An unmapped page.
    pub fn none() -> Self {
        Self::device(PageOwner::Null)
    }

    /// A page served entirely by the device's peek/poke handlers.
    pub fn device(owner: PageOwner) -> Self {
        Self {
            direct_peek_base: None,
            direct_poke_base: None,
            owner,
        }
    }

    /// A read-only page served directly from the owner's backing store.
    pub fn direct_peek(owner: PageOwner, base: u32) -> Self {
        Self {
            direct_peek_base: Some(base),
            direct_poke_base: None,
            owner,
        }
    }
}

/// The page-access table: one entry per 64-byte page.
pub struct PageTable {
    pages: [PageAccess; PageTable::PAGE_COUNT],
}

impl PageTable {
    /// Mask applied to every address before it touches the table.
    pub const ADDRESS_MASK: u16 = (1 << ADDRESS_SPACE_BITS) - 1;

    /// Mask yielding the offset within a page.
    pub const PAGE_MASK: u16 = (1 << PAGE_BITS) - 1;

    /// Number of pages in the address space.
    pub const PAGE_COUNT: usize = 1 << (ADDRESS_SPACE_BITS - PAGE_BITS);

    /// Bytes per page.
    pub const PAGE_SIZE: usize = 1 << PAGE_BITS;

    /// Creates a table with every page unmapped.
    pub fn new() -> Self {
        Self {
            pages: [PageAccess::none(); Self::PAGE_COUNT],
        }
    }

    /// The page index of an address.
    pub fn page_of(addr: u16) -> u16 {
        (addr & Self::ADDRESS_MASK) >> PAGE_BITS
    }

    /// Sets the access methods for a page. Trusted path used by devices
    /// during install and bank switches.
    pub fn set_page_access(&mut self, page: u16, access: PageAccess) {
        self.pages[page as usize & (Self::PAGE_COUNT - 1)] = access;
    }

    /// The access methods for a page.
    pub fn get_page_access(&self, page: u16) -> PageAccess {
        self.pages[page as usize & (Self::PAGE_COUNT - 1)]
    }
}

impl Default for PageTable {
    fn default() -> Self {
        Self::new()
    }
}

/// The system bus: page table, devices, cycle counter, and data-bus latch.
///
/// The bus owns every device; the CPU owns the bus. Devices are installed
/// in a fixed order - TIA, RIOT, then the cartridge - so mappers that trap
/// TIA or RIOT pages override them.
pub struct System {
    pages: PageTable,

    tia: Tia,
    riot: Riot,
    cart: Box<dyn Cartridge>,
    null: NullDevice,

    random: Random,

    /// System cycles since the last counter reset.
    cycles: u32,

    /// Last byte driven on the data bus.
    data_bus: u8,

    /// When locked, reads leave the data-bus latch untouched (debug
    /// inspection); writes always drive the bus.
    data_bus_locked: bool,
}

impl System {
    /// Assembles the bus around a cartridge, installing every device.
    pub fn new(mut cart: Box<dyn Cartridge>, settings: &Settings) -> Self {
        let mut pages = PageTable::new();
        let mut tia = Tia::new(settings);
        let mut riot = Riot::new();

        // Attachment order matters: the cartridge installs last so mappers
        // may take over TIA/RIOT mirror pages they need to observe.
        tia.install(&mut pages);
        riot.install(&mut pages);
        cart.install(&mut pages);

        Self {
            pages,
            tia,
            riot,
            cart,
            null: NullDevice::new(),
            random: Random::new(),
            cycles: 0,
            data_bus: 0,
            data_bus_locked: false,
        }
    }

    /// Reads the byte at `addr`.
    ///
    /// The address is masked to the 13-bit space exactly once, here. Direct
    /// pages bypass the owning device's handler entirely. Unless the data
    /// bus is locked, the value read becomes the new bus state.
    pub fn peek(&mut self, addr: u16) -> u8 {
        let addr = addr & PageTable::ADDRESS_MASK;
        let access = self.pages.get_page_access(PageTable::page_of(addr));

        let value = match access.direct_peek_base {
            Some(base) => {
                let offset = base + u32::from(addr & PageTable::PAGE_MASK);
                match access.owner {
                    PageOwner::Cart => self.cart.peek_direct(offset),
                    PageOwner::Riot => self.riot.peek_direct(offset),
                    // Neither the TIA nor unmapped pages install direct
                    // bases; fall back to the floating bus.
                    PageOwner::Tia | PageOwner::Null => self.data_bus,
                }
            }
            None => match access.owner {
                PageOwner::Null => self.null.peek(self.data_bus),
                PageOwner::Tia => self.tia.peek(addr, self.data_bus),
                PageOwner::Riot => self.riot.peek(addr, self.cycles),
                PageOwner::Cart => {
                    let mut ctx = CartContext {
                        pages: &mut self.pages,
                        tia: &mut self.tia,
                        riot: &mut self.riot,
                        cycles: self.cycles,
                    };
                    self.cart.peek(addr, &mut ctx)
                }
            },
        };

        if !self.data_bus_locked {
            self.data_bus = value;
        }

        value
    }

    /// Writes the byte at `addr`.
    ///
    /// Direct-poke pages store without notifying the owning device; all
    /// other pages route to the device handler. Writes always drive the
    /// data bus.
    pub fn poke(&mut self, addr: u16, value: u8) {
        let addr = addr & PageTable::ADDRESS_MASK;
        let access = self.pages.get_page_access(PageTable::page_of(addr));

        match access.direct_poke_base {
            Some(base) => {
                let offset = base + u32::from(addr & PageTable::PAGE_MASK);
                match access.owner {
                    PageOwner::Cart => self.cart.poke_direct(offset, value),
                    PageOwner::Riot => self.riot.poke_direct(offset, value),
                    PageOwner::Tia | PageOwner::Null => {}
                }
            }
            None => match access.owner {
                PageOwner::Null => self.null.poke(addr, value),
                PageOwner::Tia => self.tia.poke(addr, value, self.cycles),
                PageOwner::Riot => self.riot.poke(addr, value, self.cycles),
                PageOwner::Cart => {
                    let mut ctx = CartContext {
                        pages: &mut self.pages,
                        tia: &mut self.tia,
                        riot: &mut self.riot,
                        cycles: self.cycles,
                    };
                    self.cart.poke(addr, value, &mut ctx);
                }
            },
        }

        self.data_bus = value;
    }

    /// Resets every attached device to its power-on state, in attachment
    /// order.
    pub fn reset_devices(&mut self) {
        self.null.reset(&mut self.pages, &mut self.random);
        self.tia.reset(&mut self.pages, &mut self.random);
        self.riot.reset(&mut self.pages, &mut self.random);
        self.cart.reset(&mut self.pages, &mut self.random);
        self.data_bus = 0;
    }

    /// Zeros the cycle counter, first notifying every device so cycle-
    /// derived state (timers, audio timestamps) can be rebased.
    pub fn reset_cycles(&mut self) {
        let cycles = self.cycles;
        self.tia.system_cycles_reset(cycles);
        self.riot.system_cycles_reset(cycles);
        self.cart.system_cycles_reset(cycles);
        self.cycles = 0;
    }

    /// System cycles since the last counter reset.
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Advances the cycle counter.
    pub fn increment_cycles(&mut self, amount: u32) {
        self.cycles = self.cycles.wrapping_add(amount);
    }

    /// Restores the cycle counter (state load).
    pub(crate) fn set_cycles(&mut self, cycles: u32) {
        self.cycles = cycles;
    }

    /// The current data-bus latch.
    pub fn data_bus_state(&self) -> u8 {
        self.data_bus
    }

    /// Stops reads from updating the data-bus latch, so a debugger can
    /// inspect memory without perturbing open-bus state.
    pub fn lock_data_bus(&mut self) {
        self.data_bus_locked = true;
    }

    /// Resumes normal data-bus tracking.
    pub fn unlock_data_bus(&mut self) {
        self.data_bus_locked = false;
    }

    /// Sets the access methods for a page (trusted device path).
    pub fn set_page_access(&mut self, page: u16, access: PageAccess) {
        self.pages.set_page_access(page, access);
    }

    /// The access methods for a page.
    pub fn get_page_access(&self, page: u16) -> PageAccess {
        self.pages.get_page_access(page)
    }

    /// The TIA front-end.
    pub fn tia(&self) -> &Tia {
        &self.tia
    }

    /// Mutable TIA front-end.
    pub fn tia_mut(&mut self) -> &mut Tia {
        &mut self.tia
    }

    /// The RIOT.
    pub fn riot(&self) -> &Riot {
        &self.riot
    }

    /// Mutable RIOT.
    pub fn riot_mut(&mut self) -> &mut Riot {
        &mut self.riot
    }

    /// The cartridge.
    pub fn cart(&self) -> &dyn Cartridge {
        self.cart.as_ref()
    }

    /// Mutable cartridge.
    pub fn cart_mut(&mut self) -> &mut dyn Cartridge {
        self.cart.as_mut()
    }

    /// The system random number generator.
    pub fn rng_mut(&mut self) -> &mut Random {
        &mut self.random
    }

    /// Selects a cartridge bank through the trusted page-table path
    /// (debugger-style direct switching, bypassing hotspots).
    pub fn cart_bank(&mut self, bank: u16) {
        self.cart.bank(bank, &mut self.pages);
    }

    /// Saves every device payload in attachment order.
    pub(crate) fn save_devices(&self, out: &mut Serializer) -> Result<(), StateError> {
        self.tia.save(out)?;
        self.riot.save(out)?;
        self.cart.save(out)?;
        Ok(())
    }

    /// Restores every device payload in attachment order.
    pub(crate) fn load_devices(&mut self, input: &mut Deserializer<'_>) -> Result<(), StateError> {
        self.tia.load(input, &mut self.pages)?;
        self.riot.load(input, &mut self.pages)?;
        self.cart.load(input, &mut self.pages)?;
        Ok(())
    }

    /// Number of devices serialized into a state blob.
    pub(crate) fn device_count(&self) -> i32 {
        3
    }
}

impl MemoryBus for System {
    fn read(&mut self, addr: u16) -> u8 {
        self.peek(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.poke(addr, value)
    }

    fn increment_cycles(&mut self, amount: u32) {
        self.cycles = self.cycles.wrapping_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::cart::{create, CartridgeKind};

    fn system_with_4k() -> System {
        let mut image = vec![0u8; 4096];
        for (i, byte) in image.iter_mut().enumerate() {
            *byte = i as u8;
        }
        let cart = create(CartridgeKind::FourK, image).unwrap();
        System::new(cart, &Settings::default())
    }

    #[test]
    fn test_geometry_constants() {
        assert_eq!(PageTable::ADDRESS_MASK, 0x1FFF);
        assert_eq!(PageTable::PAGE_MASK, 0x3F);
        assert_eq!(PageTable::PAGE_COUNT, 128);
        assert_eq!(PageTable::PAGE_SIZE, 64);
    }

    #[test]
    fn test_address_masked_once_at_boundary() {
        let mut system = system_with_4k();
        // 0x3080 masks to 0x1080: cartridge space
        assert_eq!(system.peek(0x3080), system.peek(0x1080));
        // 0xF123 masks to 0x1123
        assert_eq!(system.peek(0xF123), 0x23);
    }

    #[test]
    fn test_ram_poke_then_peek() {
        let mut system = system_with_4k();
        for addr in 0x80..0x100u16 {
            system.poke(addr, addr as u8 ^ 0x5A);
        }
        for addr in 0x80..0x100u16 {
            assert_eq!(system.peek(addr), addr as u8 ^ 0x5A);
        }
    }

    #[test]
    fn test_ram_mirrors() {
        let mut system = system_with_4k();
        system.poke(0x0080, 0x42);
        assert_eq!(system.peek(0x0180), 0x42);
        system.poke(0x01FF, 0x24);
        assert_eq!(system.peek(0x00FF), 0x24);
    }

    #[test]
    fn test_data_bus_follows_reads() {
        let mut system = system_with_4k();
        let value = system.peek(0x1042);
        assert_eq!(system.data_bus_state(), value);
    }

    #[test]
    fn test_data_bus_lock() {
        let mut system = system_with_4k();
        system.poke(0x0080, 0x77);
        assert_eq!(system.data_bus_state(), 0x77);

        system.lock_data_bus();
        let _ = system.peek(0x1000);
        // Locked: the latch still holds the write
        assert_eq!(system.data_bus_state(), 0x77);

        system.unlock_data_bus();
        let value = system.peek(0x1000);
        assert_eq!(system.data_bus_state(), value);
    }

    #[test]
    fn test_tia_read_floats_lower_bits() {
        let mut system = system_with_4k();
        system.poke(0x0080, 0xFF); // drive the bus to 0xFF
        assert_eq!(system.peek(0x0000), 0x3F);
    }

    #[test]
    fn test_reset_cycles_notifies_and_zeros() {
        let mut system = system_with_4k();
        system.increment_cycles(500);
        assert_eq!(system.cycles(), 500);
        system.reset_cycles();
        assert_eq!(system.cycles(), 0);
    }
}
