//! Named sound registry with loaded-or-absent handles.
//!
//! Registration never fails the session: an unreadable or undecodable file
//! records an absent handle and logs a warning, and every later playback
//! request for that key degrades to silence. Decoding is probed once at
//! registration so a malformed file is caught up front, not mid-game.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rodio::Decoder;

/// Shared, immutable sample bytes. Playback decodes from a cursor over this,
/// so many overlapping one-shots can read the same allocation.
#[derive(Clone)]
pub struct SoundData(Arc<Vec<u8>>);

impl SoundData {
    pub fn cursor(&self) -> Cursor<SoundData> {
        Cursor::new(self.clone())
    }
}

impl AsRef<[u8]> for SoundData {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[derive(Default)]
pub struct SoundBank {
    sounds: HashMap<String, Option<SoundData>>,
}

impl SoundBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sound from disk under a logical key. Failure records an
    /// absent handle; the caller does not need to care.
    pub fn register_file(&mut self, key: &str, path: &Path) {
        match std::fs::read(path) {
            Ok(bytes) => self.register_bytes(key, bytes),
            Err(err) => {
                log::warn!("Sound '{key}' missing or unreadable ({}): {err}", path.display());
                self.sounds.insert(key.to_string(), None);
            }
        }
    }

    /// Register raw encoded bytes under a logical key, probing that they
    /// decode. Undecodable bytes record an absent handle.
    pub fn register_bytes(&mut self, key: &str, bytes: Vec<u8>) {
        let data = SoundData(Arc::new(bytes));
        match Decoder::new(data.cursor()) {
            Ok(_) => {
                log::debug!("Sound '{key}' registered ({} bytes)", data.as_ref().len());
                self.sounds.insert(key.to_string(), Some(data));
            }
            Err(err) => {
                log::warn!("Sound '{key}' failed to decode: {err}");
                self.sounds.insert(key.to_string(), None);
            }
        }
    }

    /// Loaded-or-absent lookup. `None` covers both "never registered" and
    /// "registered but failed to load"; callers treat them identically.
    pub fn get(&self, key: &str) -> Option<&SoundData> {
        self.sounds.get(key).and_then(|slot| slot.as_ref())
    }

    pub fn is_ready(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }
}

/// A tiny valid mono 16-bit PCM WAV, for tests that need a ready handle
/// without shipping audio fixtures.
#[cfg(test)]
pub(crate) fn test_wav_bytes() -> Vec<u8> {
    let sample_rate: u32 = 8_000;
    let samples: Vec<i16> = (0..64).map(|i| if i % 2 == 0 { 2_000 } else { -2_000 }).collect();
    let data_len = (samples.len() * 2) as u32;

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes()); // PCM fmt chunk size
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // byte rate
    bytes.extend_from_slice(&2u16.to_le_bytes()); // block align
    bytes.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "flux_bank_test_{}_{}.wav",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn valid_bytes_register_as_ready() {
        let mut bank = SoundBank::new();
        bank.register_bytes("beep", test_wav_bytes());
        assert!(bank.is_ready("beep"));
        assert!(bank.get("beep").is_some());
    }

    #[test]
    fn undecodable_bytes_record_an_absent_handle() {
        let mut bank = SoundBank::new();
        bank.register_bytes("junk", vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(!bank.is_ready("junk"));
        assert_eq!(bank.len(), 1, "the key is still recorded");
    }

    #[test]
    fn missing_file_records_an_absent_handle() {
        let mut bank = SoundBank::new();
        bank.register_file("ghost", Path::new("/nonexistent/ghost.wav"));
        assert!(!bank.is_ready("ghost"));
    }

    #[test]
    fn file_registration_round_trips() {
        let path = temp_path("roundtrip");
        std::fs::write(&path, test_wav_bytes()).expect("write temp wav");
        let mut bank = SoundBank::new();
        bank.register_file("disk", &path);
        assert!(bank.is_ready("disk"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn unregistered_key_is_not_ready() {
        let bank = SoundBank::new();
        assert!(!bank.is_ready("never"));
        assert!(bank.get("never").is_none());
    }

    #[test]
    fn decodes_from_shared_cursor_repeatedly() {
        let mut bank = SoundBank::new();
        bank.register_bytes("beep", test_wav_bytes());
        let data = bank.get("beep").expect("ready");
        for _ in 0..3 {
            assert!(Decoder::new(data.cursor()).is_ok());
        }
    }
}
