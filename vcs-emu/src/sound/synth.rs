//! TIA two-channel waveform synthesizer.
//!
//! Models the audio half of the TIA: two channels, each with a 4-bit
//! control register selecting a waveform/noise mode (AUDC), a 5-bit
//! frequency divider (AUDF), and a 4-bit volume (AUDV). The generators run
//! at the logical TIA sample rate (one tick per scanline pair, about
//! 31.4 kHz on NTSC) and are resampled to the host rate with a fractional
//! accumulator.
//!
//! Noise modes are produced by the TIA's polynomial counters: a 4-bit, a
//! 5-bit, and a 9-bit LFSR.

/// First sound register address (AUDC0).
pub const AUDC0: u16 = 0x15;
/// AUDC1 register address.
pub const AUDC1: u16 = 0x16;
/// AUDF0 register address.
pub const AUDF0: u16 = 0x17;
/// AUDF1 register address.
pub const AUDF1: u16 = 0x18;
/// AUDV0 register address.
pub const AUDV0: u16 = 0x19;
/// AUDV1 register address.
pub const AUDV1: u16 = 0x1A;

/// Per-channel generator state.
#[derive(Debug, Clone)]
struct Channel {
    /// Waveform/noise control (4 bits).
    audc: u8,
    /// Frequency divider (5 bits).
    audf: u8,
    /// Volume (4 bits).
    audv: u8,

    /// Divider countdown toward the next waveform clock.
    div_count: u8,
    /// 4-bit polynomial counter.
    poly4: u8,
    /// 5-bit polynomial counter.
    poly5: u8,
    /// 9-bit polynomial counter.
    poly9: u16,
    /// Divide-by-31 phase counter (modes 2, 6, 0xA, 0xE).
    div31: u8,
    /// Divide-by-6 phase counter (modes 0xC, 0xD, 0xE, 0xF).
    div6: u8,
    /// Current output bit.
    output: bool,
}

impl Channel {
    fn new() -> Self {
        Self {
            audc: 0,
            audf: 0,
            audv: 0,
            div_count: 0,
            poly4: 0x0F,
            poly5: 0x1F,
            poly9: 0x1FF,
            div31: 0,
            div6: 0,
            output: false,
        }
    }

    /// Advances the channel by one logical TIA sample tick.
    fn tick(&mut self) {
        self.div_count += 1;
        if self.div_count > self.audf {
            self.div_count = 0;
            self.clock_waveform();
        }
    }

    /// One clock of the waveform generator selected by AUDC.
    fn clock_waveform(&mut self) {
        match self.audc & 0x0F {
            // Constant level
            0x0 | 0xB => self.output = true,
            // 4-bit poly
            0x1 => {
                self.clock_poly4();
                self.output = self.poly4 & 1 != 0;
            }
            // 4-bit poly clocked through the div-31 counter
            0x2 => {
                self.div31 = (self.div31 + 1) % 31;
                if self.div31 == 0 {
                    self.clock_poly4();
                }
                self.output = self.poly4 & 1 != 0;
            }
            // 4-bit poly gated by the 5-bit poly
            0x3 => {
                self.clock_poly5();
                if self.poly5 & 1 != 0 {
                    self.clock_poly4();
                }
                self.output = self.poly4 & 1 != 0;
            }
            // Pure tone, divide by two
            0x4 | 0x5 => self.output = !self.output,
            // Div-31 square (18 high, 13 low)
            0x6 | 0xA => {
                self.div31 = (self.div31 + 1) % 31;
                self.output = self.div31 < 18;
            }
            // 5-bit poly
            0x7 | 0x9 => {
                self.clock_poly5();
                self.output = self.poly5 & 1 != 0;
            }
            // 9-bit poly (white noise)
            0x8 => {
                self.clock_poly9();
                self.output = self.poly9 & 1 != 0;
            }
            // Pure tone, divide by six
            0xC | 0xD => {
                self.div6 = (self.div6 + 1) % 6;
                if self.div6 == 0 {
                    self.output = !self.output;
                }
            }
            // Div-93 tone (31 then 3)
            0xE => {
                self.div31 = (self.div31 + 1) % 31;
                if self.div31 == 0 {
                    self.div6 = (self.div6 + 1) % 3;
                    if self.div6 == 0 {
                        self.output = !self.output;
                    }
                }
            }
            // 5-bit poly clocked into the div-6 tone
            _ => {
                self.clock_poly5();
                if self.poly5 & 1 != 0 {
                    self.div6 = (self.div6 + 1) % 6;
                    if self.div6 == 0 {
                        self.output = !self.output;
                    }
                }
            }
        }
    }

    fn clock_poly4(&mut self) {
        let feedback = ((self.poly4 >> 3) ^ (self.poly4 >> 2)) & 1;
        self.poly4 = ((self.poly4 << 1) | feedback) & 0x0F;
    }

    fn clock_poly5(&mut self) {
        let feedback = ((self.poly5 >> 4) ^ (self.poly5 >> 2)) & 1;
        self.poly5 = ((self.poly5 << 1) | feedback) & 0x1F;
    }

    fn clock_poly9(&mut self) {
        let feedback = ((self.poly9 >> 8) ^ (self.poly9 >> 4)) & 1;
        self.poly9 = ((self.poly9 << 1) | feedback) & 0x1FF;
    }

    /// Current amplitude contribution, 0-255.
    fn amplitude(&self) -> u16 {
        if self.output {
            // 4-bit volume spread over the 8-bit range
            self.audv as u16 * 17
        } else {
            0
        }
    }
}

/// The two-channel TIA audio synthesizer.
///
/// Produces unsigned 8-bit PCM with silence at zero. The mixed channel sum
/// is scaled by the output volume; overflow either clips at full scale or
/// wraps, matching the configured clip behavior.
pub struct TiaSynth {
    channels: [Channel; 2],
    output_rate: u32,
    tia_rate: u32,
    output_channels: u32,
    volume_percent: u32,
    clip_volume: bool,
    /// Fractional TIA ticks carried between output samples.
    tick_accumulator: f64,
}

impl TiaSynth {
    /// Creates a synthesizer with both channels silent.
    pub fn new() -> Self {
        Self {
            channels: [Channel::new(), Channel::new()],
            output_rate: 31440,
            tia_rate: 31440,
            output_channels: 1,
            volume_percent: 100,
            clip_volume: true,
            tick_accumulator: 0.0,
        }
    }

    /// Sets the host output rate in Hz.
    pub fn set_output_frequency(&mut self, rate: u32) {
        if rate > 0 {
            self.output_rate = rate;
        }
    }

    /// Sets the logical TIA sample rate in Hz.
    pub fn set_tia_frequency(&mut self, rate: u32) {
        if rate > 0 {
            self.tia_rate = rate;
        }
    }

    /// Sets the number of interleaved output channels (1 or 2).
    pub fn set_channels(&mut self, channels: u32) {
        if channels == 1 || channels == 2 {
            self.output_channels = channels;
        }
    }

    /// Sets the output volume, 0-100.
    pub fn set_volume(&mut self, percent: u32) {
        if percent <= 100 {
            self.volume_percent = percent;
        }
    }

    /// Chooses clamping versus wrapping on mixed-channel overflow.
    pub fn set_clip_volume(&mut self, clip: bool) {
        self.clip_volume = clip;
    }

    /// Returns the synthesizer to power-on state; registers cleared.
    pub fn reset(&mut self) {
        self.channels = [Channel::new(), Channel::new()];
        self.tick_accumulator = 0.0;
    }

    /// Applies a sound register write.
    ///
    /// Addresses are masked to the TIA register range; non-audio addresses
    /// are ignored.
    pub fn set(&mut self, addr: u16, value: u8) {
        match addr & 0x3F {
            AUDC0 => self.channels[0].audc = value & 0x0F,
            AUDC1 => self.channels[1].audc = value & 0x0F,
            AUDF0 => self.channels[0].audf = value & 0x1F,
            AUDF1 => self.channels[1].audf = value & 0x1F,
            AUDV0 => self.channels[0].audv = value & 0x0F,
            AUDV1 => self.channels[1].audv = value & 0x0F,
            _ => {}
        }
    }

    /// Reads back a sound register value (masked as stored).
    pub fn get(&self, addr: u16) -> u8 {
        match addr & 0x3F {
            AUDC0 => self.channels[0].audc,
            AUDC1 => self.channels[1].audc,
            AUDF0 => self.channels[0].audf,
            AUDF1 => self.channels[1].audf,
            AUDV0 => self.channels[0].audv,
            AUDV1 => self.channels[1].audv,
            _ => 0,
        }
    }

    /// Synthesizes `samples` frames into `buffer` using current register
    /// state.
    ///
    /// Each frame is `channels` interleaved copies of the mono mix. Frames
    /// past the end of the buffer are dropped.
    pub fn process(&mut self, buffer: &mut [u8], samples: usize) {
        let frame_width = self.output_channels as usize;
        for frame in buffer.chunks_mut(frame_width).take(samples) {
            let sample = self.next_sample();
            for slot in frame.iter_mut() {
                *slot = sample;
            }
        }
    }

    /// Produces the next output sample, advancing the generators by the
    /// appropriate number of TIA ticks.
    fn next_sample(&mut self) -> u8 {
        self.tick_accumulator += self.tia_rate as f64 / self.output_rate as f64;
        while self.tick_accumulator >= 1.0 {
            self.tick_accumulator -= 1.0;
            self.channels[0].tick();
            self.channels[1].tick();
        }

        let mixed = (self.channels[0].amplitude() + self.channels[1].amplitude()) as u32
            * self.volume_percent
            / 100;

        if self.clip_volume {
            mixed.min(255) as u8
        } else {
            mixed as u8
        }
    }
}

impl Default for TiaSynth {
    fn default() -> Self {
        Self::new()
    }
}
