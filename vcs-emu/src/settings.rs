//! Machine configuration options.
//!
//! The recognized options and their defaults. Persistence and command-line
//! parsing live with the host; the core only consumes the values.

/// Configuration consumed by the machine core.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Master sound enable.
    pub sound: bool,

    /// Host audio rate in Hz.
    pub freq: u32,

    /// Logical TIA sample rate used by the synthesizer, in Hz.
    pub tiafreq: u32,

    /// Host fragment size in samples; a power of two.
    pub fragsize: u32,

    /// Output volume, 0-100.
    pub volume: u32,

    /// Clamp volume overflow at full scale instead of wrapping.
    pub clipvol: bool,

    /// When non-empty, produced PCM fragments are also written to this
    /// file.
    pub record_sound_filename: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: true,
            freq: 31440,
            tiafreq: 31440,
            fragsize: 512,
            volume: 100,
            clipvol: true,
            record_sound_filename: String::new(),
        }
    }
}
