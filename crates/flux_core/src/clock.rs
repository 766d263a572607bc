//! Wall-clock timing, centralized.
//!
//! `FrameClock` is the only place real time is read. Everything downstream
//! (the session state machine, phase budgets, caption fades, microgame
//! animation) receives millisecond timestamps or elapsed values as plain
//! numbers, which keeps all of it testable with synthetic clocks.

use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;

pub struct FrameClock {
    start: Instant,
    last_instant: Instant,
    pub real_dt: f64,
    pub frame_count: u64,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_instant: now,
            real_dt: 0.0,
            frame_count: 0,
            fps_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
        }
    }

    /// Milliseconds since clock creation. Phase budgets are compared against
    /// this, so they are wall-clock based and unaffected by frame-rate
    /// variance.
    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        self.real_dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Start timestamp of the current phase. Re-armed on every phase entry;
/// elapsed time for the phase is `now - started`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimer {
    started_ms: u64,
}

impl PhaseTimer {
    pub fn started_at(now_ms: u64) -> Self {
        Self { started_ms: now_ms }
    }

    pub fn restart(&mut self, now_ms: u64) {
        self.started_ms = now_ms;
    }

    pub fn elapsed(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_timer_measures_from_restart() {
        let mut timer = PhaseTimer::started_at(1_000);
        assert_eq!(timer.elapsed(1_000), 0);
        assert_eq!(timer.elapsed(7_250), 6_250);
        timer.restart(7_250);
        assert_eq!(timer.elapsed(7_250), 0);
        assert_eq!(timer.elapsed(9_000), 1_750);
    }

    #[test]
    fn phase_timer_elapsed_saturates_on_clock_skew() {
        let timer = PhaseTimer::started_at(5_000);
        assert_eq!(timer.elapsed(4_000), 0);
    }

    #[test]
    fn frame_clock_advances() {
        let mut clock = FrameClock::new();
        clock.begin_frame();
        clock.begin_frame();
        assert_eq!(clock.frame_count, 2);
        assert!(clock.smoothed_fps > 0.0);
    }
}
