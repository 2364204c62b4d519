/// Synthesized speech playback
///
/// The speech API returns raw 16-bit little-endian PCM. We wrap it in a
/// WAV container and hand it to the platform's command-line player,
/// which blocks until the clip has been played.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::NarrationError;

/// Sample rate of the speech API output
pub const SPEECH_SAMPLE_RATE: u32 = 24_000;

/// Decoded PCM audio
#[derive(Debug, Clone, PartialEq)]
pub struct PcmClip {
    /// Interleaved samples
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl PcmClip {
    /// Build a clip from raw little-endian 16-bit samples.
    /// A trailing odd byte is ignored.
    pub fn from_le_bytes(bytes: &[u8], sample_rate: u32, channels: u16) -> Self {
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    /// Number of frames (samples per channel)
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    pub fn duration_secs(&self) -> f32 {
        self.frame_count() as f32 / self.sample_rate.max(1) as f32
    }

    /// Encode as a canonical 44-byte-header PCM WAV file
    pub fn to_wav(&self) -> Vec<u8> {
        let data_len = (self.samples.len() * 2) as u32;
        let block_align = self.channels * 2;
        let byte_rate = self.sample_rate * block_align as u32;

        let mut wav = Vec::with_capacity(44 + data_len as usize);
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(36 + data_len).to_le_bytes());
        wav.extend_from_slice(b"WAVE");

        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&self.channels.to_le_bytes());
        wav.extend_from_slice(&self.sample_rate.to_le_bytes());
        wav.extend_from_slice(&byte_rate.to_le_bytes());
        wav.extend_from_slice(&block_align.to_le_bytes());
        wav.extend_from_slice(&16u16.to_le_bytes());

        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&data_len.to_le_bytes());
        for sample in &self.samples {
            wav.extend_from_slice(&sample.to_le_bytes());
        }

        wav
    }
}

/// Plays a clip to completion (blocking)
pub trait AudioOutput: Send + Sync {
    fn play(&self, clip: &PcmClip) -> Result<(), NarrationError>;
}

/// Plays clips through the platform's command-line audio player
#[derive(Debug, Clone)]
pub struct SystemPlayer {
    scratch_dir: PathBuf,
}

impl SystemPlayer {
    /// Clips are written as temporary WAV files inside `scratch_dir`
    pub fn new(scratch_dir: PathBuf) -> Self {
        Self { scratch_dir }
    }

    fn command(path: &Path) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("afplay");
            cmd.arg(path);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("powershell");
            cmd.arg("-NoProfile").arg("-Command").arg(format!(
                "(New-Object Media.SoundPlayer '{}').PlaySync()",
                path.display()
            ));
            cmd
        } else {
            let mut cmd = Command::new("aplay");
            cmd.arg("-q").arg(path);
            cmd
        }
    }
}

impl AudioOutput for SystemPlayer {
    fn play(&self, clip: &PcmClip) -> Result<(), NarrationError> {
        std::fs::create_dir_all(&self.scratch_dir)
            .map_err(|e| NarrationError::Playback(e.to_string()))?;

        let path = self.scratch_dir.join(format!(
            "narration-{}.wav",
            chrono::Utc::now().timestamp_millis()
        ));
        std::fs::write(&path, clip.to_wav())
            .map_err(|e| NarrationError::Playback(e.to_string()))?;

        tracing::debug!(
            "🔊 Playing {:.1}s narration from {}",
            clip.duration_secs(),
            path.display()
        );

        let status = Self::command(&path).status();
        let _ = std::fs::remove_file(&path);

        match status {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(NarrationError::Playback(format!(
                "audio player exited with {status}"
            ))),
            Err(e) => Err(NarrationError::Playback(format!(
                "could not start audio player: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_le_bytes_ignores_trailing_byte() {
        let clip = PcmClip::from_le_bytes(&[0x01, 0x00, 0xff, 0x7f, 0x00, 0x80, 0x42], 24_000, 1);
        assert_eq!(clip.samples, vec![1, i16::MAX, i16::MIN]);
        assert_eq!(clip.frame_count(), 3);
    }

    #[test]
    fn test_duration() {
        let clip = PcmClip {
            samples: vec![0; 48_000],
            sample_rate: SPEECH_SAMPLE_RATE,
            channels: 1,
        };
        assert!((clip.duration_secs() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_wav_header() {
        let clip = PcmClip {
            samples: vec![0, 1, -1],
            sample_rate: SPEECH_SAMPLE_RATE,
            channels: 1,
        };
        let wav = clip.to_wav();

        assert_eq!(wav.len(), 44 + 6);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes(wav[4..8].try_into().unwrap()), 36 + 6);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(u16::from_le_bytes(wav[22..24].try_into().unwrap()), 1);
        assert_eq!(u32::from_le_bytes(wav[24..28].try_into().unwrap()), 24_000);
        assert_eq!(u32::from_le_bytes(wav[28..32].try_into().unwrap()), 48_000);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32::from_le_bytes(wav[40..44].try_into().unwrap()), 6);
        assert_eq!(&wav[46..48], &1i16.to_le_bytes());
    }
}
