//! Organize the sentient spaghetti: one press of G straightens the tangle
//! into a tidy column. Any other key offends it permanently.

use egui::{Color32, Pos2, Vec2};
use rand::Rng;

use flux_core::input::{InputEvent, InputState, Key};

use crate::assets::keys;
use crate::canvas::Canvas;

use super::{wobble, GameCtx, Microgame};

const NOODLE_POINTS: usize = 24;

#[derive(Clone, Copy, PartialEq)]
enum Mood {
    Tangle,
    Column,
    Angry,
}

struct NoodlePoint {
    x: f32,
    y: f32,
    phase: f32,
}

pub struct SpaghettiUntangler {
    mood: Mood,
    points: Vec<NoodlePoint>,
}

impl Default for SpaghettiUntangler {
    fn default() -> Self {
        Self {
            mood: Mood::Tangle,
            points: Vec::new(),
        }
    }
}

impl Microgame for SpaghettiUntangler {
    fn reset(&mut self, ctx: &mut GameCtx) {
        self.mood = Mood::Tangle;
        self.points = (0..NOODLE_POINTS)
            .map(|_| NoodlePoint {
                x: ctx.view.x * 0.35 + ctx.rng.gen_range(0.0..ctx.view.x * 0.3),
                y: ctx.view.y * 0.35 + ctx.rng.gen_range(0.0..ctx.view.y * 0.3),
                phase: ctx.rng.gen_range(0.0..std::f32::consts::TAU),
            })
            .collect();
    }

    fn frame(&mut self, canvas: &Canvas, _input: &InputState, ctx: &mut GameCtx, _elapsed_ms: u64) {
        canvas.fill(Color32::from_rgb(200, 45, 20));
        let noodle = Color32::from_rgb(230, 170, 60);
        let now = ctx.now_ms;

        match self.mood {
            Mood::Tangle => {
                let wobbled: Vec<Pos2> = self
                    .points
                    .iter()
                    .map(|p| {
                        Pos2::new(
                            p.x + 10.0 * wobble(now, 3.0, p.phase),
                            p.y + 10.0 * wobble(now, 3.6, p.phase + 1.57),
                        )
                    })
                    .collect();
                canvas.polyline(wobbled, 5.0, noodle);
            }
            Mood::Column => {
                let cx = canvas.width() * 0.5;
                for i in -4..=4 {
                    let x = cx + i as f32 * 8.0;
                    canvas.line(
                        Pos2::new(x, canvas.height() * 0.3),
                        Pos2::new(x, canvas.height() * 0.7),
                        5.0,
                        noodle,
                    );
                }
                // A stray strand escaping the column.
                canvas.line(
                    Pos2::new(cx - 25.0, canvas.height() * 0.72),
                    Pos2::new(cx - 10.0, canvas.height() * 0.75),
                    5.0,
                    Color32::BLACK,
                );
                canvas.line(
                    Pos2::new(cx - 10.0, canvas.height() * 0.75),
                    Pos2::new(cx + 20.0, canvas.height() * 0.68),
                    5.0,
                    Color32::BLACK,
                );
            }
            Mood::Angry => {
                let c = canvas.center();
                let r = canvas.min_dim() * 0.25;
                canvas.circle(c, r, Color32::from_rgb(255, 220, 70));
                canvas.circle(c + Vec2::new(-50.0, -30.0), 14.0, Color32::BLACK);
                canvas.circle(c + Vec2::new(50.0, -30.0), 14.0, Color32::BLACK);
                // Downturned mouth.
                canvas.line(
                    c + Vec2::new(-60.0, 40.0),
                    c + Vec2::new(0.0, 20.0),
                    3.0,
                    Color32::BLACK,
                );
                canvas.line(
                    c + Vec2::new(0.0, 20.0),
                    c + Vec2::new(60.0, 40.0),
                    3.0,
                    Color32::BLACK,
                );
            }
        }

        canvas.text_outlined(
            canvas.at(0.5, 0.15),
            canvas.min_dim() * 0.045,
            Color32::BLACK,
            Color32::WHITE,
            "Press 'G' once. Any other key offends the spaghetti.",
        );
    }

    fn on_event(&mut self, event: &InputEvent, ctx: &mut GameCtx) {
        if let InputEvent::KeyPressed(key) = event {
            if *key == Key::G {
                self.mood = Mood::Column;
                ctx.audio.play_one_shot(keys::SPAGHETTI_OK);
            } else {
                self.mood = Mood::Angry;
                ctx.audio.play_one_shot(keys::SPAGHETTI_WRONG);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn g_straightens_the_tangle() {
        let mut rig = super::super::TestRig::new();
        let mut game = SpaghettiUntangler::default();
        game.reset(&mut rig.ctx(0));
        assert_eq!(game.points.len(), NOODLE_POINTS);

        game.on_event(&InputEvent::KeyPressed(Key::G), &mut rig.ctx(10));
        assert!(game.mood == Mood::Column);
    }

    #[test]
    fn any_other_key_offends() {
        let mut rig = super::super::TestRig::new();
        let mut game = SpaghettiUntangler::default();
        game.reset(&mut rig.ctx(0));
        game.on_event(&InputEvent::KeyPressed(Key::Other), &mut rig.ctx(10));
        assert!(game.mood == Mood::Angry);

        // The spaghetti forgives: a later G still straightens it.
        game.on_event(&InputEvent::KeyPressed(Key::G), &mut rig.ctx(20));
        assert!(game.mood == Mood::Column);
    }
}
