//! TIA audio pipeline: register write queue, synthesizer, and the
//! host-facing fragment interface.
//!
//! The emulation thread calls [`Sound::set`] for every sound register poke,
//! carrying the CPU cycle so inter-write gaps can be reconstructed as
//! seconds of emulated time. The host's audio callback thread calls
//! [`Sound::process_fragment`], which walks the pending writes and
//! synthesizes each segment with the register state that was live at that
//! point.
//!
//! A single mutex guards the queue, the synthesizer, and the write
//! timestamp; the emulation side holds it only across an enqueue, the
//! callback side across one whole fragment.

pub mod exporter;
pub mod queue;
pub mod synth;

use log::{debug, warn};
use parking_lot::Mutex;

use crate::serializer::{Deserializer, Serializer, StateError};
use crate::settings::Settings;
use exporter::SoundExporter;
use queue::{RegWrite, RegWriteQueue};
use synth::TiaSynth;

/// TIA color clock frequency on NTSC, in Hz. Cycle deltas between register
/// writes are converted to seconds against this reference.
pub const TIA_CLOCK_HZ: f64 = 1_193_191.666_666_67;

/// State shared between the emulation thread and the audio callback.
struct Shared {
    queue: RegWriteQueue,
    synth: TiaSynth,
    /// CPU cycle of the most recent register write.
    last_set_cycle: u32,
    exporter: Option<SoundExporter>,
    /// Outstanding recording budget, in mono samples.
    record_samples_needed: i64,
}

/// Host-facing sound front-end.
///
/// Owns the write queue and synthesizer behind a mutex so the host may
/// drive [`Sound::process_fragment`] from its audio callback thread while
/// the emulation thread keeps enqueuing writes.
pub struct Sound {
    enabled: bool,
    initialized: bool,
    muted: bool,
    volume: u32,
    channels: u32,
    frame_rate: u32,
    fragment_size_log2: f64,
    host_rate: u32,
    shared: Mutex<Shared>,
}

impl Sound {
    /// Builds the sound front-end from the configured options.
    ///
    /// If sound is disabled, or the fragment-to-rate ratio cannot sustain
    /// realtime audio, the front-end stays uninitialized: register writes
    /// still update the synthesizer (so state saves stay accurate) but no
    /// queueing happens and fragments are not produced.
    pub fn new(settings: &Settings) -> Self {
        let mut synth = TiaSynth::new();
        synth.set_output_frequency(settings.freq);
        synth.set_tia_frequency(settings.tiafreq);
        synth.set_channels(1);
        synth.set_clip_volume(settings.clipvol);
        synth.set_volume(settings.volume.min(100));

        let exporter = if settings.record_sound_filename.is_empty() {
            None
        } else {
            match SoundExporter::new(&settings.record_sound_filename, 1) {
                Ok(exporter) => Some(exporter),
                Err(err) => {
                    warn!(
                        "could not open sound recording file {:?}: {}",
                        settings.record_sound_filename, err
                    );
                    None
                }
            }
        };

        let mut initialized = false;
        if settings.sound {
            // A fragment longer than a quarter second cannot keep up with
            // realtime; run silently rather than stuttering.
            if settings.freq > 0 && (settings.fragsize as f64 / settings.freq as f64) < 0.25 {
                initialized = true;
            } else {
                warn!(
                    "sound device cannot sustain realtime audio (fragment {} at {} Hz); audio disabled",
                    settings.fragsize, settings.freq
                );
            }
        }

        Self {
            enabled: settings.sound,
            initialized,
            muted: false,
            volume: settings.volume.min(100),
            channels: 1,
            frame_rate: 60,
            fragment_size_log2: (settings.fragsize.max(1) as f64).log2(),
            host_rate: settings.freq,
            shared: Mutex::new(Shared {
                queue: RegWriteQueue::new(),
                synth,
                last_set_cycle: 0,
                exporter,
                record_samples_needed: 0,
            }),
        }
    }

    /// Whether the pipeline came up in a usable configuration.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether sound is enabled at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Records a sound register write at the given CPU cycle.
    ///
    /// The elapsed emulated time since the previous write is derived from
    /// the cycle difference against the TIA reference clock and queued with
    /// the write.
    pub fn set(&self, addr: u16, value: u8, cycle: u32) {
        let mut shared = self.shared.lock();

        if !self.initialized {
            // No callback will drain a queue; keep the synthesizer current
            // instead so saved state reflects the registers.
            shared.synth.set(addr, value);
            shared.last_set_cycle = cycle;
            return;
        }

        // Seconds that would have passed on real hardware since the last
        // register write.
        let delta = (cycle as f64 - shared.last_set_cycle as f64) / TIA_CLOCK_HZ;
        shared.queue.enqueue(RegWrite { addr, value, delta });
        shared.last_set_cycle = cycle;
    }

    /// Fills `stream` with interleaved unsigned 8-bit samples.
    ///
    /// Pending register writes are applied at their proper sample offsets:
    /// each segment is synthesized with the register state that was live
    /// for it, using a running fractional cursor so the integer sample
    /// counts across a fragment add up to the fragment length exactly.
    pub fn process_fragment(&self, stream: &mut [u8]) {
        if !self.initialized {
            return;
        }

        let channels = self.channels as usize;
        let length = stream.len() / channels;

        let mut guard = self.shared.lock();
        let shared = &mut *guard;

        // If the CPU has run far ahead, fold the oldest writes straight
        // into the synthesizer to bound latency.
        if shared.queue.duration() > self.fragment_size_log2 / self.frame_rate as f64 {
            debug!("sound register queue overfull; folding old writes");
            let mut removed = 0.0;
            while removed < (self.fragment_size_log2 - 1.0) / self.frame_rate as f64 {
                match shared.queue.front().copied() {
                    Some(info) => {
                        removed += info.delta;
                        shared.synth.set(info.addr, info.value);
                        shared.queue.dequeue();
                    }
                    None => break,
                }
            }
        }

        let mut position: f64 = 0.0;
        let mut remaining: f64 = length as f64;

        while remaining > 0.0 {
            match shared.queue.front().copied() {
                None => {
                    // No more pending updates; finish the fragment with
                    // current settings. The reference cycle restarts from
                    // zero, accepting a small timing error at starvation.
                    let start = (position.floor() as usize).min(length);
                    shared.synth.process(&mut stream[start * channels..], length - start);
                    shared.last_set_cycle = 0;
                    break;
                }
                Some(info) => {
                    // How long the rest of this fragment will take to play
                    let duration = remaining / self.host_rate as f64;

                    if info.delta <= duration {
                        if info.delta > 0.0 {
                            let samples = self.host_rate as f64 * info.delta;
                            // Carry-correct rounding: the count is the
                            // number of integer positions stepped over.
                            let count =
                                ((position + samples).floor() - position.floor()) as usize;
                            let start = (position.floor() as usize).min(length);
                            shared.synth.process(&mut stream[start * channels..], count);
                            position += samples;
                            remaining -= samples;
                        }
                        shared.synth.set(info.addr, info.value);
                        shared.queue.dequeue();
                    } else {
                        // The next update falls in a later fragment; finish
                        // this one and charge it the elapsed time.
                        let start = (position.floor() as usize).min(length);
                        shared.synth.process(&mut stream[start * channels..], length - start);
                        if let Some(front) = shared.queue.front_mut() {
                            front.delta -= duration;
                        }
                        break;
                    }
                }
            }
        }

        if shared.record_samples_needed > 0 {
            if let Some(exporter) = shared.exporter.as_mut() {
                if let Err(err) = exporter.add_samples(&stream[..length * channels]) {
                    warn!("sound recording failed: {}", err);
                }
                shared.record_samples_needed -= length as i64;
            }
        }
    }

    /// Number of register writes waiting for the callback.
    pub fn pending_writes(&self) -> usize {
        self.shared.lock().queue.size()
    }

    /// Total pending emulated time across the queue, in seconds.
    pub fn pending_duration(&self) -> f64 {
        self.shared.lock().queue.duration()
    }

    /// Mutes or unmutes output. Muting discards pending register writes.
    pub fn mute(&mut self, state: bool) {
        if !self.initialized || self.muted == state {
            return;
        }
        self.muted = state;
        self.shared.lock().queue.clear();
    }

    /// Whether output is currently muted.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Returns the pipeline to power-on state: queue emptied, synthesizer
    /// cleared, write timestamp rebased.
    pub fn reset(&mut self) {
        if !self.initialized {
            return;
        }
        self.muted = false;
        let mut shared = self.shared.lock();
        shared.last_set_cycle = 0;
        shared.synth.reset();
        shared.queue.clear();
    }

    /// Sets the output volume as a percentage in `[0, 100]`.
    pub fn set_volume(&mut self, percent: u32) {
        if percent <= 100 {
            self.volume = percent;
            self.shared.lock().synth.set_volume(percent);
        }
    }

    /// Nudges the volume up or down by two percent.
    pub fn adjust_volume(&mut self, direction: i8) {
        let percent = self.volume as i64 + 2 * direction as i64;
        if (0..=100).contains(&percent) {
            self.set_volume(percent as u32);
        }
    }

    /// Current volume percentage.
    pub fn volume(&self) -> u32 {
        self.volume
    }

    /// Sets the number of interleaved output channels (1 or 2).
    pub fn set_channels(&mut self, channels: u32) {
        if channels == 1 || channels == 2 {
            self.channels = channels;
            self.shared.lock().synth.set_channels(channels);
        }
    }

    /// Sets the display frame rate used for queue latency bounds.
    ///
    /// The write timestamp restarts so stale deltas don't span the rate
    /// change.
    pub fn set_frame_rate(&mut self, frame_rate: u32) {
        if frame_rate > 0 {
            self.frame_rate = frame_rate;
            self.shared.lock().last_set_cycle = 0;
        }
    }

    /// Rebases the write timestamp when the system cycle counter resets.
    pub fn adjust_cycle_counter(&self, amount: i64) {
        let mut shared = self.shared.lock();
        shared.last_set_cycle = (shared.last_set_cycle as i64 + amount).max(0) as u32;
    }

    /// Grows the recording budget by one video frame's worth of samples.
    pub fn record_next_frame(&self) {
        let mut shared = self.shared.lock();
        if shared.exporter.is_some() {
            shared.record_samples_needed += exporter::SAMPLES_PER_FRAME;
        }
    }

    /// Writes the `"TIASound"` state frame: the six registers and the
    /// reference cycle.
    pub fn save(&self, out: &mut Serializer) -> Result<(), StateError> {
        out.put_string("TIASound");

        let shared = self.shared.lock();
        for addr in synth::AUDC0..=synth::AUDV1 {
            out.put_int(shared.synth.get(addr) as i32);
        }
        out.put_int(shared.last_set_cycle as i32);

        Ok(())
    }

    /// Restores the `"TIASound"` state frame. Pending writes are
    /// discarded; the registers land in the synthesizer directly.
    pub fn load(&mut self, input: &mut Deserializer<'_>) -> Result<(), StateError> {
        input.expect_tag("TIASound")?;

        let mut registers = [0u8; 6];
        for slot in registers.iter_mut() {
            *slot = input.get_int()? as u8;
        }
        let last_set_cycle = input.get_int()? as u32;

        let mut shared = self.shared.lock();
        shared.queue.clear();
        for (i, &value) in registers.iter().enumerate() {
            shared.synth.set(synth::AUDC0 + i as u16, value);
        }
        shared.last_set_cycle = last_set_cycle;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sound_with(freq: u32, fragsize: u32) -> Sound {
        let settings = Settings {
            freq,
            tiafreq: freq,
            fragsize,
            ..Settings::default()
        };
        Sound::new(&settings)
    }

    #[test]
    fn test_initializes_with_defaults() {
        let sound = Sound::new(&Settings::default());
        assert!(sound.is_initialized());
    }

    #[test]
    fn test_unusable_fragment_ratio_disables_audio() {
        // 16384 samples at 31440 Hz is over half a second per fragment.
        let sound = sound_with(31440, 16384);
        assert!(!sound.is_initialized());
    }

    #[test]
    fn test_disabled_sound_stays_uninitialized() {
        let settings = Settings {
            sound: false,
            ..Settings::default()
        };
        let sound = Sound::new(&settings);
        assert!(!sound.is_initialized());
        // Writes still land in the synthesizer for state saves.
        sound.set(synth::AUDV0, 0x0F, 100);
        let mut out = Serializer::new();
        sound.save(&mut out).unwrap();
    }

    #[test]
    fn test_state_roundtrip() {
        let mut sound = Sound::new(&Settings::default());
        sound.set(synth::AUDC0, 0x04, 100);
        sound.set(synth::AUDF0, 0x1F, 200);
        sound.set(synth::AUDV0, 0x08, 300);

        // Drain the queue into the synthesizer so the registers stick.
        let mut fragment = [0u8; 512];
        sound.process_fragment(&mut fragment);

        let mut out = Serializer::new();
        sound.save(&mut out).unwrap();
        let blob = out.into_bytes();

        let mut restored = Sound::new(&Settings::default());
        restored.load(&mut Deserializer::new(&blob)).unwrap();

        let mut check = Serializer::new();
        restored.save(&mut check).unwrap();
        assert_eq!(blob, check.into_bytes());
    }

    #[test]
    fn test_volume_bounds() {
        let mut sound = Sound::new(&Settings::default());
        sound.set_volume(50);
        assert_eq!(sound.volume(), 50);
        sound.set_volume(101); // ignored
        assert_eq!(sound.volume(), 50);
        sound.adjust_volume(1);
        assert_eq!(sound.volume(), 52);
        sound.adjust_volume(-1);
        assert_eq!(sound.volume(), 50);
    }
}
