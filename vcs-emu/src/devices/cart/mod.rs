//! The cartridge family.
//!
//! A cartridge is the device that serves the 4K window at $1000-$1FFF and
//! implements whatever bankswitching scheme its board used. Hotspot
//! addresses inside (or, for some boards, outside) the window change which
//! ROM slice the window shows; the mapper rewrites the page-access table so
//! the direct read path always points at the live slice.
//!
//! Variants:
//! - [`Cartridge2K`] / [`Cartridge4K`]: no switching
//! - [`CartridgeF`]: Atari F8/F6/F4 (8/16/32 KB), optionally with
//!   SuperChip RAM
//! - [`Cartridge3F`] / [`Cartridge3E`]: Tigervision write-to-low-address
//!   schemes, 3E adding banked RAM
//! - [`CartridgeE0`]: Parker Brothers three-segment slicing
//! - [`CartridgeE7`]: M-Network ROM/RAM combination
//! - [`CartridgeCV`]: CommaVid fixed ROM plus RAM
//! - [`CartridgeUA`]: UA Limited, hotspots in TIA mirror space
//! - [`CartridgeFE`]: Activision bank detection on stack accesses

mod cart2k;
mod cart3e;
mod cart3f;
mod cart4k;
mod cartcv;
mod carte0;
mod carte7;
mod cartf;
mod cartfe;
mod cartua;

pub use cart2k::Cartridge2K;
pub use cart3e::Cartridge3E;
pub use cart3f::Cartridge3F;
pub use cart4k::Cartridge4K;
pub use cartcv::CartridgeCV;
pub use carte0::CartridgeE0;
pub use carte7::CartridgeE7;
pub use cartf::CartridgeF;
pub use cartfe::CartridgeFE;
pub use cartua::CartridgeUA;

use thiserror::Error;

use crate::devices::{Device, Riot, Tia};
use crate::system::PageTable;

/// Base address of the cartridge window.
pub const WINDOW_BASE: u16 = 0x1000;

/// Everything a mapper may touch while handling a bus access: the page
/// table for remapping, the TIA for chained register writes, the RIOT for
/// chained RAM accesses, and the cycle counter for timestamping.
///
/// Borrowed from the system for the duration of one access only.
pub struct CartContext<'a> {
    pub pages: &'a mut PageTable,
    pub tia: &'a mut Tia,
    pub riot: &'a mut Riot,
    pub cycles: u32,
}

/// The cartridge contract on top of the common device lifecycle.
pub trait Cartridge: Device {
    /// Handles a read the page table routed to the cartridge. Hotspot
    /// reads switch banks before the value is resolved.
    fn peek(&mut self, addr: u16, ctx: &mut CartContext<'_>) -> u8;

    /// Handles a write routed to the cartridge.
    fn poke(&mut self, addr: u16, value: u8, ctx: &mut CartContext<'_>);

    /// Byte at `offset` in the backing store, for pages mapped with a
    /// direct peek base. The offset layout is the mapper's own.
    fn peek_direct(&self, offset: u32) -> u8;

    /// Store at `offset` in the backing store, for pages mapped with a
    /// direct poke base.
    fn poke_direct(&mut self, offset: u32, value: u8) {
        let _ = (offset, value);
    }

    /// Selects a bank, remapping the window. Out-of-range requests wrap
    /// modulo the bank count; a locked cartridge ignores the request.
    fn bank(&mut self, bank: u16, pages: &mut PageTable);

    /// The currently selected bank.
    fn current_bank(&self) -> u16;

    /// Number of selectable banks (1 for unswitched boards).
    fn bank_count(&self) -> u16;

    /// Patches the ROM image through the current mapping so a following
    /// `peek` of the same address observes the new value. Answers false
    /// when the address does not land in patchable ROM.
    fn patch(&mut self, addr: u16, value: u8) -> bool;

    /// The canonical ROM image bytes.
    fn image(&self) -> &[u8];

    /// Whether bank switching is currently suppressed.
    fn bank_locked(&self) -> bool;

    /// Suppresses or re-enables bank switching (debugger use: hotspot
    /// peeks still resolve, but no longer switch).
    fn set_bank_locked(&mut self, locked: bool);
}

/// Bankswitching scheme selector for [`create`].
///
/// Type auto-detection heuristics live with the ROM loader; the core takes
/// an explicit kind and validates the image size against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartridgeKind {
    /// 2 KB, mirrored across the window.
    TwoK,
    /// Plain 4 KB.
    FourK,
    /// Atari 8 KB, hotspots $1FF8/$1FF9.
    F8,
    /// F8 with 128 bytes of SuperChip RAM.
    F8Sc,
    /// Atari 16 KB, hotspots $1FF6-$1FF9.
    F6,
    /// F6 with SuperChip RAM.
    F6Sc,
    /// Atari 32 KB, hotspots $1FF4-$1FFB.
    F4,
    /// F4 with SuperChip RAM.
    F4Sc,
    /// Tigervision, bank select by writes to $00-$3F.
    ThreeF,
    /// Tigervision plus 32 KB of banked RAM selected via $3E.
    ThreeE,
    /// Parker Brothers 8 KB, three switchable 1 KB segments.
    E0,
    /// M-Network 16 KB ROM with 2 KB RAM.
    E7,
    /// CommaVid 2 KB ROM with 1 KB RAM.
    CV,
    /// UA Limited 8 KB, hotspots $0220/$0240.
    UA,
    /// Activision 8 KB, bank chosen by stack-access data.
    FE,
}

/// Errors constructing a cartridge.
#[derive(Debug, Error)]
pub enum CartridgeError {
    /// The image size is impossible for the requested scheme.
    #[error("invalid ROM image size {size} for {kind} cartridge")]
    InvalidImageSize { kind: &'static str, size: usize },
}

/// Builds the cartridge for an explicit scheme, validating the image size.
pub fn create(
    kind: CartridgeKind,
    image: Vec<u8>,
) -> Result<Box<dyn Cartridge>, CartridgeError> {
    Ok(match kind {
        CartridgeKind::TwoK => Box::new(Cartridge2K::new(image)?),
        CartridgeKind::FourK => Box::new(Cartridge4K::new(image)?),
        CartridgeKind::F8 => Box::new(CartridgeF::f8(image)?),
        CartridgeKind::F8Sc => Box::new(CartridgeF::f8sc(image)?),
        CartridgeKind::F6 => Box::new(CartridgeF::f6(image)?),
        CartridgeKind::F6Sc => Box::new(CartridgeF::f6sc(image)?),
        CartridgeKind::F4 => Box::new(CartridgeF::f4(image)?),
        CartridgeKind::F4Sc => Box::new(CartridgeF::f4sc(image)?),
        CartridgeKind::ThreeF => Box::new(Cartridge3F::new(image)?),
        CartridgeKind::ThreeE => Box::new(Cartridge3E::new(image)?),
        CartridgeKind::E0 => Box::new(CartridgeE0::new(image)?),
        CartridgeKind::E7 => Box::new(CartridgeE7::new(image)?),
        CartridgeKind::CV => Box::new(CartridgeCV::new(image)?),
        CartridgeKind::UA => Box::new(CartridgeUA::new(image)?),
        CartridgeKind::FE => Box::new(CartridgeFE::new(image)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_validates_sizes() {
        assert!(create(CartridgeKind::TwoK, vec![0; 2048]).is_ok());
        assert!(create(CartridgeKind::TwoK, vec![0; 4096]).is_err());
        assert!(create(CartridgeKind::FourK, vec![0; 4096]).is_ok());
        assert!(create(CartridgeKind::F8, vec![0; 8192]).is_ok());
        assert!(create(CartridgeKind::F8, vec![0; 4096]).is_err());
        assert!(create(CartridgeKind::F6, vec![0; 16384]).is_ok());
        assert!(create(CartridgeKind::F4, vec![0; 32768]).is_ok());
        assert!(create(CartridgeKind::ThreeF, vec![0; 8 * 2048]).is_ok());
        assert!(create(CartridgeKind::ThreeF, vec![0; 1000]).is_err());
        assert!(create(CartridgeKind::E0, vec![0; 8192]).is_ok());
        assert!(create(CartridgeKind::E7, vec![0; 16384]).is_ok());
        assert!(create(CartridgeKind::CV, vec![0; 2048]).is_ok());
        assert!(create(CartridgeKind::UA, vec![0; 8192]).is_ok());
        assert!(create(CartridgeKind::FE, vec![0; 8192]).is_ok());
    }

    #[test]
    fn test_names_match_schemes() {
        let cases: Vec<(CartridgeKind, usize, &str)> = vec![
            (CartridgeKind::TwoK, 2048, "Cartridge2K"),
            (CartridgeKind::FourK, 4096, "Cartridge4K"),
            (CartridgeKind::F8, 8192, "CartridgeF8"),
            (CartridgeKind::F8Sc, 8192, "CartridgeF8SC"),
            (CartridgeKind::F6, 16384, "CartridgeF6"),
            (CartridgeKind::F4, 32768, "CartridgeF4"),
            (CartridgeKind::ThreeF, 8192, "Cartridge3F"),
            (CartridgeKind::ThreeE, 8192, "Cartridge3E"),
            (CartridgeKind::E0, 8192, "CartridgeE0"),
            (CartridgeKind::E7, 16384, "CartridgeE7"),
            (CartridgeKind::CV, 2048, "CartridgeCV"),
            (CartridgeKind::UA, 8192, "CartridgeUA"),
            (CartridgeKind::FE, 8192, "CartridgeFE"),
        ];
        for (kind, size, name) in cases {
            let cart = create(kind, vec![0; size]).unwrap();
            assert_eq!(cart.name(), name);
        }
    }
}
