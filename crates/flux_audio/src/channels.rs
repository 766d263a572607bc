//! Audio channel manager.
//!
//! Three channels with different disciplines:
//!
//! - **Background**: exclusive looping channel. Only session phase-entry
//!   actions drive it; a start always stops the prior loop first and is
//!   idempotent for the already-active key. Invariant: at most one loop
//!   alive at any instant.
//! - **Held**: one auxiliary loop that plays while a per-frame condition
//!   holds, with an optional cap on continuous playback. Hard-cancelled on
//!   any phase or microgame change.
//! - **One-shots**: fire-and-forget, overlap freely, no bookkeeping.
//!
//! All operations degrade to silence when a handle is absent or the output
//! device is unavailable (headless machines, CI). Channel bookkeeping for
//! ready handles still updates without a device, which is what the invariant
//! tests exercise.

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use flux_core::catalog::{BackgroundPolicy, MicrogameDescriptor};

use crate::bank::SoundBank;

const BACKGROUND_VOLUME: f32 = 0.45;
const HELD_VOLUME: f32 = 0.5;

struct BackgroundLoop {
    key: String,
    sink: Option<Sink>,
}

struct HeldLoop {
    key: String,
    sink: Option<Sink>,
    started_ms: u64,
    /// Once the cap fires the loop stays silent until the hold is released.
    capped: bool,
}

pub struct AudioChannels {
    bank: SoundBank,
    output: Option<(OutputStream, OutputStreamHandle)>,
    background: Option<BackgroundLoop>,
    held: Option<HeldLoop>,
}

impl AudioChannels {
    pub fn new(bank: SoundBank) -> Self {
        let output = match OutputStream::try_default() {
            Ok(pair) => Some(pair),
            Err(err) => {
                log::warn!("No audio output device, running silent: {err}");
                None
            }
        };
        Self {
            bank,
            output,
            background: None,
            held: None,
        }
    }

    pub fn bank(&self) -> &SoundBank {
        &self.bank
    }

    /// Apply a microgame's background policy on Active entry. `Silent` and
    /// `HeldOnly` clear the channel; `Loop` swaps the exclusive loop over to
    /// this game's track.
    pub fn apply_background(&mut self, descriptor: &MicrogameDescriptor) {
        match descriptor.background {
            BackgroundPolicy::Silent | BackgroundPolicy::HeldOnly(_) => self.stop_background(),
            BackgroundPolicy::Loop(key) => self.play_background(key),
        }
    }

    /// Start the exclusive background loop for `key`. Restarting the key
    /// that is already active is a no-op; any other active loop is stopped
    /// before the new one starts.
    pub fn play_background(&mut self, key: &str) {
        if self.background.as_ref().is_some_and(|bg| bg.key == key) {
            return;
        }
        self.stop_background();
        let Some(data) = self.bank.get(key) else {
            log::debug!("Background '{key}' not ready, staying silent");
            return;
        };
        let sink = self.make_sink().map(|sink| {
            match Decoder::new(data.cursor()) {
                Ok(source) => {
                    sink.set_volume(BACKGROUND_VOLUME);
                    sink.append(source.repeat_infinite());
                }
                Err(err) => log::warn!("Background '{key}' failed to decode: {err}"),
            }
            sink
        });
        self.background = Some(BackgroundLoop {
            key: key.to_string(),
            sink,
        });
    }

    /// Stop whatever background loop is active. Safe with nothing active.
    pub fn stop_background(&mut self) {
        if let Some(bg) = self.background.take() {
            if let Some(sink) = bg.sink {
                sink.stop();
            }
        }
    }

    /// Key of the active background loop, if any. At most one exists.
    pub fn background_key(&self) -> Option<&str> {
        self.background.as_ref().map(|bg| bg.key.as_str())
    }

    /// Fire a non-looping sound. Overlapping shots are fine; an unready
    /// handle is silence.
    pub fn play_one_shot(&mut self, key: &str) {
        let Some(data) = self.bank.get(key) else {
            log::debug!("One-shot '{key}' not ready, skipped");
            return;
        };
        let Some(sink) = self.make_sink() else {
            return;
        };
        match Decoder::new(data.cursor()) {
            Ok(source) => {
                sink.append(source);
                sink.detach();
            }
            Err(err) => log::warn!("One-shot '{key}' failed to decode: {err}"),
        }
    }

    /// Drive the held loop from a per-frame condition. While `active`, the
    /// loop for `key` plays until `cap_ms` of continuous playback has
    /// accumulated, then stays silent until released. Releasing stops it
    /// immediately; the next hold starts fresh.
    pub fn hold_loop(&mut self, key: &str, active: bool, now_ms: u64, cap_ms: Option<u64>) {
        if !active {
            self.stop_held();
            return;
        }

        // A different key while one is held means the caller switched
        // sounds; restart rather than leave the old loop running.
        if self.held.as_ref().is_some_and(|h| h.key != key) {
            self.stop_held();
        }

        match &mut self.held {
            Some(held) => {
                if held.capped {
                    return;
                }
                if let Some(cap) = cap_ms {
                    if now_ms.saturating_sub(held.started_ms) >= cap {
                        if let Some(sink) = held.sink.take() {
                            sink.stop();
                        }
                        held.capped = true;
                    }
                }
            }
            None => {
                if !self.bank.is_ready(key) {
                    log::debug!("Held loop '{key}' not ready, staying silent");
                    return;
                }
                let sink = self.make_sink().map(|sink| {
                    if let Some(data) = self.bank.get(key) {
                        match Decoder::new(data.cursor()) {
                            Ok(source) => {
                                sink.set_volume(HELD_VOLUME);
                                sink.append(source.repeat_infinite());
                            }
                            Err(err) => log::warn!("Held loop '{key}' failed to decode: {err}"),
                        }
                    }
                    sink
                });
                self.held = Some(HeldLoop {
                    key: key.to_string(),
                    sink,
                    started_ms: now_ms,
                    capped: false,
                });
            }
        }
    }

    /// Hard-cancel the held loop. Called on every phase or microgame change
    /// so no held sound survives a switch.
    pub fn stop_held(&mut self) {
        if let Some(held) = self.held.take() {
            if let Some(sink) = held.sink {
                sink.stop();
            }
        }
    }

    /// True while the held loop is audible (held and not capped).
    pub fn held_playing(&self) -> bool {
        self.held.as_ref().is_some_and(|h| !h.capped)
    }

    fn make_sink(&self) -> Option<Sink> {
        let (_, handle) = self.output.as_ref()?;
        match Sink::try_new(handle) {
            Ok(sink) => Some(sink),
            Err(err) => {
                log::warn!("Failed to open audio sink: {err}");
                None
            }
        }
    }
}
