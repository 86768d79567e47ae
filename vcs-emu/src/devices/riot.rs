//! 6532 RIOT: 128 bytes of RAM, the interval timer, and the switch ports.
//!
//! RAM is mapped through direct page access in both directions. The timer
//! is not stepped; its value is derived on demand from the system cycle
//! counter, so the device must rebase its reference cycle whenever the
//! counter is reset.
//!
//! The switch ports (`SWCHA`/`SWCHB` and their direction registers) are
//! plain latches with hardware idle defaults; controller and console-switch
//! semantics live with the input collaborators.

use crate::random::Random;
use crate::serializer::{Deserializer, Serializer, StateError};
use crate::system::{PageAccess, PageOwner, PageTable};

use super::Device;

/// RIOT RAM size in bytes.
const RAM_SIZE: usize = 128;

/// Prescaler shift per timer register: TIM1T, TIM8T, TIM64T, T1024T.
const INTERVAL_SHIFTS: [u32; 4] = [0, 3, 6, 10];

/// Idle SWCHA: no controller lines pulled low.
const SWCHA_IDLE: u8 = 0xFF;
/// Idle SWCHB: reset/select released, color enabled, amateur difficulty.
const SWCHB_IDLE: u8 = 0x0B;

/// The 6532 RAM/IO/Timer chip.
pub struct Riot {
    ram: [u8; RAM_SIZE],

    /// Timer countdown in clock cycles at the moment it was set
    /// (register value shifted by the interval).
    timer: u32,
    /// Prescaler shift selected by the last timer write.
    interval_shift: u32,
    /// System cycle at which the timer was set.
    cycles_when_set: u32,

    swcha: u8,
    swacnt: u8,
    swchb: u8,
    swbcnt: u8,
}

impl Riot {
    /// Creates the RIOT with idle ports and a cleared timer.
    pub fn new() -> Self {
        Self {
            ram: [0; RAM_SIZE],
            timer: 0,
            interval_shift: 6,
            cycles_when_set: 0,
            swcha: SWCHA_IDLE,
            swacnt: 0,
            swchb: SWCHB_IDLE,
            swbcnt: 0,
        }
    }

    /// Whether the given (masked) address selects this chip.
    fn selected(addr: u16) -> bool {
        addr & 0x1080 == 0x0080
    }

    /// Whether the address selects RAM rather than the IO/timer block.
    fn selects_ram(addr: u16) -> bool {
        addr & 0x0200 == 0
    }

    /// A read routed to the RIOT.
    ///
    /// `cycles` is the current system cycle count, which the timer value is
    /// derived from.
    pub fn peek(&mut self, addr: u16, cycles: u32) -> u8 {
        if !Self::selected(addr) {
            return 0;
        }

        if Self::selects_ram(addr) {
            return self.ram[(addr & 0x7F) as usize];
        }

        match addr & 0x07 {
            0x00 => self.swcha,
            0x01 => self.swacnt,
            0x02 => self.swchb,
            0x03 => self.swbcnt,
            0x04 | 0x06 => self.timer_value(cycles),
            _ => self.timer_status(cycles),
        }
    }

    /// A write routed to the RIOT.
    pub fn poke(&mut self, addr: u16, value: u8, cycles: u32) {
        if !Self::selected(addr) {
            return;
        }

        if Self::selects_ram(addr) {
            self.ram[(addr & 0x7F) as usize] = value;
            return;
        }

        if addr & 0x14 == 0x14 {
            // TIM1T/TIM8T/TIM64T/T1024T
            self.set_timer((addr & 0x03) as usize, value, cycles);
        } else {
            match addr & 0x03 {
                0x00 => self.swcha = value,
                0x01 => self.swacnt = value,
                // SWCHB is input-only on the console
                0x02 => {}
                _ => self.swbcnt = value,
            }
        }
    }

    /// Byte of RAM behind a direct-mapped page.
    pub fn peek_direct(&self, offset: u32) -> u8 {
        self.ram[(offset as usize) & (RAM_SIZE - 1)]
    }

    /// Store into RAM behind a direct-mapped page.
    pub fn poke_direct(&mut self, offset: u32, value: u8) {
        self.ram[(offset as usize) & (RAM_SIZE - 1)] = value;
    }

    /// Starts the interval timer: `value` counts of the selected interval.
    fn set_timer(&mut self, interval: usize, value: u8, cycles: u32) {
        self.interval_shift = INTERVAL_SHIFTS[interval & 0x03];
        self.timer = (value as u32) << self.interval_shift;
        self.cycles_when_set = cycles;
    }

    /// INTIM: remaining interval counts, or the raw countdown after
    /// underflow (the chip then decrements once per clock from 0xFF).
    fn timer_value(&self, cycles: u32) -> u8 {
        let elapsed = cycles.wrapping_sub(self.cycles_when_set) as i64;
        let remaining = self.timer as i64 - elapsed;
        if remaining >= 0 {
            (remaining >> self.interval_shift) as u8
        } else {
            (remaining & 0xFF) as u8
        }
    }

    /// TIMINT: bit 7 reports timer underflow.
    fn timer_status(&self, cycles: u32) -> u8 {
        let elapsed = cycles.wrapping_sub(self.cycles_when_set) as i64;
        if (self.timer as i64) < elapsed {
            0x80
        } else {
            0x00
        }
    }

    /// Sets the port A input latch (joystick lines).
    pub fn set_swcha(&mut self, value: u8) {
        self.swcha = value;
    }

    /// Sets the port B input latch (console switches).
    pub fn set_swchb(&mut self, value: u8) {
        self.swchb = value;
    }
}

impl Default for Riot {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for Riot {
    fn name(&self) -> &'static str {
        "M6532"
    }

    fn install(&mut self, pages: &mut PageTable) {
        // RIOT select is A12 low, A7 high; A9 separates RAM from IO.
        for page_start in (0x0000..0x1000u16).step_by(PageTable::PAGE_SIZE) {
            if !Self::selected(page_start) {
                continue;
            }

            let page = PageTable::page_of(page_start);
            if Self::selects_ram(page_start) {
                // RAM pages read and write straight into the 128-byte array
                let base = u32::from(page_start & 0x7F);
                pages.set_page_access(
                    page,
                    PageAccess {
                        direct_peek_base: Some(base),
                        direct_poke_base: Some(base),
                        owner: PageOwner::Riot,
                    },
                );
            } else {
                pages.set_page_access(page, PageAccess::device(PageOwner::Riot));
            }
        }
    }

    fn reset(&mut self, _pages: &mut PageTable, rng: &mut Random) {
        // Power-on RAM contents are unpredictable on real hardware
        for byte in self.ram.iter_mut() {
            *byte = rng.next() as u8;
        }

        // The timer starts at an arbitrary point
        self.interval_shift = 6;
        self.timer = (25 + rng.next() % 75) << 6;
        self.cycles_when_set = 0;

        self.swcha = SWCHA_IDLE;
        self.swacnt = 0;
        self.swchb = SWCHB_IDLE;
        self.swbcnt = 0;
    }

    fn system_cycles_reset(&mut self, cycles: u32) {
        self.cycles_when_set = self.cycles_when_set.saturating_sub(cycles);
    }

    fn save(&self, out: &mut Serializer) -> Result<(), StateError> {
        out.put_string(self.name());
        out.put_bytes(&self.ram);
        out.put_int(self.timer as i32);
        out.put_int(self.interval_shift as i32);
        out.put_int(self.cycles_when_set as i32);
        out.put_int(self.swcha as i32);
        out.put_int(self.swacnt as i32);
        out.put_int(self.swchb as i32);
        out.put_int(self.swbcnt as i32);
        Ok(())
    }

    fn load(
        &mut self,
        input: &mut Deserializer<'_>,
        _pages: &mut PageTable,
    ) -> Result<(), StateError> {
        input.expect_tag("M6532")?;

        let ram = input.get_bytes()?;
        if ram.len() != RAM_SIZE {
            return Err(StateError::Malformed("RIOT RAM frame has wrong length"));
        }
        self.ram.copy_from_slice(&ram);

        self.timer = input.get_int()? as u32;
        self.interval_shift = (input.get_int()? as u32) & 0x1F;
        self.cycles_when_set = input.get_int()? as u32;
        self.swcha = input.get_int()? as u8;
        self.swacnt = input.get_int()? as u8;
        self.swchb = input.get_int()? as u8;
        self.swbcnt = input.get_int()? as u8;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ram_addressing_and_mirrors() {
        let mut riot = Riot::new();
        riot.poke(0x0080, 0x42, 0);
        assert_eq!(riot.peek(0x0080, 0), 0x42);
        // The stack page at $0180-$01FF mirrors the same RAM
        assert_eq!(riot.peek(0x0180, 0), 0x42);
        riot.poke(0x01FF, 0x99, 0);
        assert_eq!(riot.peek(0x00FF, 0), 0x99);
    }

    #[test]
    fn test_direct_offsets_match_device_path() {
        let mut riot = Riot::new();
        riot.poke_direct(0x45, 0xAB);
        assert_eq!(riot.peek(0x00C5, 0), 0xAB);
        assert_eq!(riot.peek_direct(0x45), 0xAB);
    }

    #[test]
    fn test_timer_counts_down_at_interval() {
        let mut riot = Riot::new();
        // TIM64T = 10 at cycle 100
        riot.poke(0x0296, 10, 100);
        assert_eq!(riot.peek(0x0284, 100), 10);
        assert_eq!(riot.peek(0x0284, 100 + 64), 9);
        assert_eq!(riot.peek(0x0284, 100 + 64 * 10 - 1), 0);
    }

    #[test]
    fn test_timer_underflow_counts_by_ones() {
        let mut riot = Riot::new();
        riot.poke(0x0294, 2, 0); // TIM1T = 2
        assert_eq!(riot.peek(0x0285, 1), 0x00);
        // One cycle past expiry the counter has wrapped to 0xFF
        assert_eq!(riot.peek(0x0284, 3), 0xFF);
        assert_eq!(riot.peek(0x0285, 3), 0x80);
        assert_eq!(riot.peek(0x0284, 4), 0xFE);
    }

    #[test]
    fn test_cycle_rebase_preserves_timer() {
        let mut riot = Riot::new();
        riot.poke(0x0296, 10, 1000); // TIM64T = 10
        let before = riot.peek(0x0284, 1128);

        // Rebase the counter by 1000 cycles
        riot.system_cycles_reset(1000);
        let after = riot.peek(0x0284, 128);
        assert_eq!(before, after);
    }

    #[test]
    fn test_port_latches() {
        let mut riot = Riot::new();
        assert_eq!(riot.peek(0x0280, 0), 0xFF); // SWCHA idle
        assert_eq!(riot.peek(0x0282, 0), 0x0B); // SWCHB idle

        riot.poke(0x0281, 0xF0, 0); // SWACNT
        assert_eq!(riot.peek(0x0281, 0), 0xF0);

        // SWCHB is input-only; writes are dropped
        riot.poke(0x0282, 0x00, 0);
        assert_eq!(riot.peek(0x0282, 0), 0x0B);
    }

    #[test]
    fn test_state_roundtrip() {
        let mut riot = Riot::new();
        let mut pages = PageTable::new();
        let mut rng = Random::new();
        riot.reset(&mut pages, &mut rng);
        riot.poke(0x0297, 42, 500); // T1024T

        let mut out = Serializer::new();
        riot.save(&mut out).unwrap();
        let blob = out.into_bytes();

        let mut restored = Riot::new();
        restored
            .load(&mut Deserializer::new(&blob), &mut pages)
            .unwrap();

        assert_eq!(riot.peek(0x0284, 5000), restored.peek(0x0284, 5000));
        for addr in 0x80..0x100u16 {
            assert_eq!(riot.peek(addr, 0), restored.peek(addr, 0));
        }
    }
}
