//! The thirteen microgames and the trait they share.
//!
//! Each game owns only its round-scoped state. `reset` is called every time
//! the game is (re-)entered, including re-entry into the same game, so
//! nothing may survive a round except what `reset` rebuilds. The session
//! layer decides when rounds begin and end; games never touch the clock or
//! the phase machine.

use egui::Pos2;
use rand::rngs::StdRng;

use flux_audio::AudioChannels;
use flux_core::input::{InputEvent, InputState};

use crate::assets::ImageBank;
use crate::canvas::Canvas;

mod cloud;
mod dog;
mod ego;
mod escape;
mod face;
mod form;
mod legal;
mod motivation;
mod noise;
mod sausage;
mod space;
mod spaghetti;
mod stomp;

/// Per-frame services handed to a game. Borrowed fresh each call so games
/// never hold references across frames.
pub struct GameCtx<'a> {
    pub audio: &'a mut AudioChannels,
    pub images: &'a ImageBank,
    pub rng: &'a mut StdRng,
    /// Logical size of the draw surface, for reset-time placement.
    pub view: egui::Vec2,
    pub now_ms: u64,
}

impl GameCtx<'_> {
    pub fn view_center(&self) -> Pos2 {
        Pos2::new(self.view.x * 0.5, self.view.y * 0.5)
    }
}

/// Sine wobble driven by wall time, for the ambient animation most games
/// use. `speed` is roughly cycles-per-second-ish; tune by eye.
pub(crate) fn wobble(now_ms: u64, speed: f32, phase: f32) -> f32 {
    (now_ms as f32 * 0.001 * speed + phase).sin()
}

/// Square-wave blink flag, `period_ms` per on/off pair.
pub(crate) fn blink(now_ms: u64, period_ms: u64) -> bool {
    (now_ms / period_ms) % 2 == 0
}

pub trait Microgame {
    /// Rebuild all round state. Runs on every entry, even into the same game.
    fn reset(&mut self, ctx: &mut GameCtx);

    /// Simulate and draw one frame of the active round.
    fn frame(&mut self, canvas: &Canvas, input: &InputState, ctx: &mut GameCtx, elapsed_ms: u64);

    /// Discrete input delivered while this game's round is active.
    fn on_event(&mut self, _event: &InputEvent, _ctx: &mut GameCtx) {}
}

/// All games in catalog order; index with the catalog position of an id.
pub struct GameSet {
    games: Vec<Box<dyn Microgame>>,
}

impl GameSet {
    pub fn standard() -> Self {
        let games: Vec<Box<dyn Microgame>> = vec![
            Box::new(cloud::CloudMower::default()),
            Box::new(noise::NoiseMaker::default()),
            Box::new(face::FaceFreezer::default()),
            Box::new(motivation::MotivationCatcher::default()),
            Box::new(space::SpaceSorter::default()),
            Box::new(ego::EgoDeflator::default()),
            Box::new(dog::DogPetter::default()),
            Box::new(spaghetti::SpaghettiUntangler::default()),
            Box::new(form::FormFiler::default()),
            Box::new(stomp::CreatureStomper::default()),
            Box::new(escape::MeetingEscape::default()),
            Box::new(legal::LegalSkimmer::default()),
            Box::new(sausage::SausageStuffer::default()),
        ];
        Self { games }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn get_mut(&mut self, position: usize) -> &mut dyn Microgame {
        self.games[position].as_mut()
    }
}

/// Owned context parts for game unit tests. `AudioChannels` tolerates a
/// missing output device, so these run headless.
#[cfg(test)]
pub(crate) struct TestRig {
    audio: AudioChannels,
    images: ImageBank,
    rng: StdRng,
}

#[cfg(test)]
impl TestRig {
    pub fn new() -> Self {
        use rand::SeedableRng;
        Self {
            audio: AudioChannels::new(flux_audio::SoundBank::new()),
            images: ImageBank::empty(),
            rng: StdRng::seed_from_u64(7),
        }
    }

    pub fn ctx(&mut self, now_ms: u64) -> GameCtx<'_> {
        GameCtx {
            audio: &mut self.audio,
            images: &self.images,
            rng: &mut self.rng,
            view: egui::Vec2::new(800.0, 600.0),
            now_ms,
        }
    }
}
