//! Raw PCM recording sink.
//!
//! When recording is configured, each produced audio fragment is appended
//! to a file as raw unsigned 8-bit PCM, interleaved by channel. Recording
//! is budgeted per video frame: the machine grows the sample budget by a
//! frame's worth at a time and the callback consumes it.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Samples recorded per video frame (logical TIA rate over 60 Hz).
pub const SAMPLES_PER_FRAME: i64 = 524;

/// Writes produced PCM fragments to a file.
pub struct SoundExporter {
    writer: BufWriter<File>,
    channels: u32,
    samples_written: u64,
}

impl SoundExporter {
    /// Opens the recording file, truncating any previous contents.
    pub fn new<P: AsRef<Path>>(path: P, channels: u32) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            channels,
            samples_written: 0,
        })
    }

    /// Appends a fragment of interleaved samples.
    pub fn add_samples(&mut self, samples: &[u8]) -> io::Result<()> {
        self.writer.write_all(samples)?;
        self.samples_written += samples.len() as u64 / self.channels.max(1) as u64;
        Ok(())
    }

    /// Total mono sample count written so far.
    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    /// Flushes buffered samples to disk.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Drop for SoundExporter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_raw_pcm() {
        let path = std::env::temp_dir().join("vcs_emu_exporter_test.pcm");
        {
            let mut exporter = SoundExporter::new(&path, 1).unwrap();
            exporter.add_samples(&[1, 2, 3, 4]).unwrap();
            exporter.add_samples(&[5, 6]).unwrap();
            assert_eq!(exporter.samples_written(), 6);
            exporter.flush().unwrap();
        }
        let contents = std::fs::read(&path).unwrap();
        assert_eq!(contents, vec![1, 2, 3, 4, 5, 6]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_channel_accounting() {
        let path = std::env::temp_dir().join("vcs_emu_exporter_stereo_test.pcm");
        {
            let mut exporter = SoundExporter::new(&path, 2).unwrap();
            exporter.add_samples(&[0; 8]).unwrap();
            assert_eq!(exporter.samples_written(), 4);
        }
        let _ = std::fs::remove_file(&path);
    }
}
