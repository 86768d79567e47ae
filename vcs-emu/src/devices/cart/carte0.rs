//! Parker Brothers E0 bankswitching.
//!
//! An 8 KB image is cut into eight 1 KB slices. The window is four 1 KB
//! segments: the first three each show an independently selectable slice,
//! and the fourth is fixed to the last slice (which also holds the
//! hotspots). Reading or writing $1FE0-$1FE7 selects a slice for segment
//! 0, $1FE8-$1FEF for segment 1, and $1FF0-$1FF7 for segment 2; the slice
//! number is the low three bits of the hotspot address.

use crate::random::Random;
use crate::serializer::{Deserializer, Serializer, StateError};
use crate::system::{PageAccess, PageOwner, PageTable};

use super::{CartContext, Cartridge, CartridgeError, Device};

/// Slice and segment size.
const SLICE_SIZE: usize = 1024;

/// Number of slices in the image.
const SLICE_COUNT: u16 = 8;

/// A Parker Brothers E0 board.
pub struct CartridgeE0 {
    image: Vec<u8>,
    /// Slice mapped into each segment; the last entry is fixed at 7.
    current_slice: [u16; 4],
    bank_locked: bool,
}

impl CartridgeE0 {
    /// Wraps an 8 KB image.
    pub fn new(image: Vec<u8>) -> Result<Self, CartridgeError> {
        if image.len() != 8192 {
            return Err(CartridgeError::InvalidImageSize {
                kind: "E0",
                size: image.len(),
            });
        }
        Ok(Self {
            image,
            current_slice: [4, 5, 6, 7],
            bank_locked: false,
        })
    }

    /// Maps a slice into one of the three switchable segments.
    fn segment(&mut self, segment: usize, slice: u16, pages: &mut PageTable) {
        if self.bank_locked {
            return;
        }

        let slice = slice % SLICE_COUNT;
        self.current_slice[segment] = slice;

        let segment_base = 0x1000 + (segment as u16) * 0x400;
        let slice_base = slice as u32 * SLICE_SIZE as u32;
        for page_start in (segment_base..segment_base + 0x400).step_by(PageTable::PAGE_SIZE) {
            pages.set_page_access(
                PageTable::page_of(page_start),
                PageAccess::direct_peek(PageOwner::Cart, slice_base + u32::from(page_start & 0x03FF)),
            );
        }
    }

    /// Image offset of a window offset through the current mapping.
    fn resolve(&self, offset: u16) -> usize {
        let segment = (offset >> 10) as usize;
        self.current_slice[segment] as usize * SLICE_SIZE + (offset & 0x3FF) as usize
    }

    /// Applies a hotspot access, if the offset is one.
    fn check_hotspot(&mut self, offset: u16, pages: &mut PageTable) {
        if self.bank_locked {
            return;
        }
        if (0x0FE0..0x0FF8).contains(&offset) {
            let segment = ((offset - 0x0FE0) >> 3) as usize;
            let slice = offset & 0x07;
            self.segment(segment, slice, pages);
        }
    }
}

impl Device for CartridgeE0 {
    fn name(&self) -> &'static str {
        "CartridgeE0"
    }

    fn install(&mut self, pages: &mut PageTable) {
        // Fixed fourth segment, except its last page which holds the
        // hotspots and must stay on the device path.
        let fixed_base = 7 * SLICE_SIZE as u32;
        for page_start in (0x1C00u16..0x1FC0).step_by(PageTable::PAGE_SIZE) {
            pages.set_page_access(
                PageTable::page_of(page_start),
                PageAccess::direct_peek(PageOwner::Cart, fixed_base + u32::from(page_start & 0x03FF)),
            );
        }
        pages.set_page_access(PageTable::page_of(0x1FC0), PageAccess::device(PageOwner::Cart));

        let startup = [4, 5, 6];
        for (segment, slice) in startup.into_iter().enumerate() {
            self.segment(segment, slice, pages);
        }
    }

    fn reset(&mut self, pages: &mut PageTable, _rng: &mut Random) {
        for (segment, slice) in [4u16, 5, 6].into_iter().enumerate() {
            self.segment(segment, slice, pages);
        }
    }

    fn save(&self, out: &mut Serializer) -> Result<(), StateError> {
        out.put_string(self.name());
        for &slice in &self.current_slice {
            out.put_int(slice as i32);
        }
        Ok(())
    }

    fn load(
        &mut self,
        input: &mut Deserializer<'_>,
        pages: &mut PageTable,
    ) -> Result<(), StateError> {
        input.expect_tag("CartridgeE0")?;
        let mut slices = [0u16; 4];
        for slot in slices.iter_mut() {
            *slot = input.get_int()? as u16;
        }
        for segment in 0..3 {
            self.segment(segment, slices[segment], pages);
        }
        Ok(())
    }
}

impl Cartridge for CartridgeE0 {
    fn peek(&mut self, addr: u16, ctx: &mut CartContext<'_>) -> u8 {
        let offset = addr & 0x0FFF;
        self.check_hotspot(offset, ctx.pages);
        self.image[self.resolve(offset)]
    }

    fn poke(&mut self, addr: u16, _value: u8, ctx: &mut CartContext<'_>) {
        self.check_hotspot(addr & 0x0FFF, ctx.pages);
    }

    fn peek_direct(&self, offset: u32) -> u8 {
        self.image[offset as usize]
    }

    fn bank(&mut self, bank: u16, pages: &mut PageTable) {
        // The single-bank interface maps the requested slice into the
        // first segment.
        self.segment(0, bank, pages);
    }

    fn current_bank(&self) -> u16 {
        self.current_slice[0]
    }

    fn bank_count(&self) -> u16 {
        SLICE_COUNT
    }

    fn patch(&mut self, addr: u16, value: u8) -> bool {
        let offset = self.resolve(addr & 0x0FFF);
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

    fn sliced_image() -> Vec<u8> {
        let mut image = vec![0u8; 8192];
        for (i, byte) in image.iter_mut().enumerate() {
            *byte = (i / SLICE_SIZE) as u8;
        }
        image
    }

    #[test]
    fn test_startup_segments() {
        let mut cart = CartridgeE0::new(sliced_image()).unwrap();
        let mut pages = PageTable::new();
        cart.install(&mut pages);

        assert_eq!(cart.current_slice, [4, 5, 6, 7]);
        for (segment, expected) in [4u8, 5, 6, 7].into_iter().enumerate() {
            let addr = 0x1000 + (segment as u16) * 0x400;
            let access = pages.get_page_access(PageTable::page_of(addr));
            assert_eq!(cart.peek_direct(access.direct_peek_base.unwrap()), expected);
        }
    }

    #[test]
    fn test_hotspots_select_independent_segments() {
        let mut cart = CartridgeE0::new(sliced_image()).unwrap();
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

        // $1FE2: segment 0 <- slice 2
        cart.peek(0x1FE2, &mut ctx);
        // $1FE9: segment 1 <- slice 1
        cart.peek(0x1FE9, &mut ctx);
        // $1FF0: segment 2 <- slice 0
        cart.peek(0x1FF0, &mut ctx);

        assert_eq!(cart.current_slice, [2, 1, 0, 7]);
        assert_eq!(cart.peek(0x1000, &mut ctx), 2);
        assert_eq!(cart.peek(0x1400, &mut ctx), 1);
        assert_eq!(cart.peek(0x1800, &mut ctx), 0);
        // Fourth segment stays fixed
        assert_eq!(cart.peek(0x1C00, &mut ctx), 7);
    }

    #[test]
    fn test_state_roundtrip() {
        let mut cart = CartridgeE0::new(sliced_image()).unwrap();
        let mut pages = PageTable::new();
        cart.install(&mut pages);
        cart.segment(0, 3, &mut pages);
        cart.segment(2, 1, &mut pages);

        let mut out = Serializer::new();
        cart.save(&mut out).unwrap();
        let blob = out.into_bytes();

        let mut restored = CartridgeE0::new(sliced_image()).unwrap();
        let mut pages = PageTable::new();
        restored.install(&mut pages);
        restored
            .load(&mut Deserializer::new(&blob), &mut pages)
            .unwrap();
        assert_eq!(restored.current_slice, [3, 5, 1, 7]);
    }
}
