//! Deflate the ego: a balloon inflates steadily; pin clicks inside it shrink
//! it until it pops, after six hits, at minimum size, or when the pointer
//! leaves the window.

use egui::{Color32, Pos2, Vec2};

use flux_core::input::{InputEvent, InputState};

use crate::assets::keys;
use crate::canvas::Canvas;

use super::{wobble, GameCtx, Microgame};

const HITS_TO_POP: u8 = 6;
const GROWTH_PER_FRAME: f32 = 0.35;
const SHRINK_PER_HIT: f32 = 0.85;
const PSSST_MS: u64 = 150;

#[derive(Default)]
pub struct EgoDeflator {
    popped: bool,
    radius: f32,
    hits: u8,
    last_hit_ms: Option<u64>,
    pop_played: bool,
}

fn balloon_center(view: Vec2) -> Pos2 {
    Pos2::new(view.x * 0.5, view.y * 0.52)
}

impl EgoDeflator {
    /// Fleeing the window entirely counts as letting go of the ego.
    fn note_pointer_presence(&mut self, in_window: bool) {
        if !self.popped && !in_window {
            self.popped = true;
        }
    }
}

impl Microgame for EgoDeflator {
    fn reset(&mut self, ctx: &mut GameCtx) {
        self.popped = false;
        self.radius = ctx.view.x.min(ctx.view.y) * 0.25;
        self.hits = 0;
        self.last_hit_ms = None;
        self.pop_played = false;
    }

    fn frame(&mut self, canvas: &Canvas, input: &InputState, ctx: &mut GameCtx, _elapsed_ms: u64) {
        canvas.fill(Color32::from_rgb(40, 0, 80));
        let c = balloon_center(ctx.view);
        let now = ctx.now_ms;

        let (mx, my) = input.pointer_position();
        let in_window = input.pointer_in_window();
        self.note_pointer_presence(in_window);

        if !self.popped {
            self.radius += GROWTH_PER_FRAME;
        } else {
            let floor = canvas.min_dim() * 0.04;
            self.radius += (floor - self.radius) * 0.25;
            if !self.pop_played {
                ctx.audio.play_one_shot(keys::EGO_POP);
                self.pop_played = true;
            }
        }

        let tint = Color32::from_rgb(
            (180.0 + 75.0 * wobble(now, 3.0, 0.0)) as u8,
            (180.0 + 75.0 * wobble(now, 4.2, 1.7)) as u8,
            (180.0 + 75.0 * wobble(now, 5.4, 0.6)) as u8,
        );
        // Soft halo rings, then the balloon itself.
        for i in (1..=5).rev() {
            let halo = Color32::from_rgba_unmultiplied(tint.r(), tint.g(), tint.b(), 14 * i);
            canvas.circle(c, self.radius + i as f32 * 7.0, halo);
        }
        canvas.circle(c, self.radius, tint);
        canvas.circle_stroke(c, self.radius, 2.0, Color32::WHITE);

        if self.popped {
            for i in 0..10 {
                let a = std::f32::consts::TAU * i as f32 / 10.0 + now as f32 * 0.0018;
                let tip = c + Vec2::new(a.cos(), a.sin()) * (self.radius + 30.0);
                canvas.line(c, tip, 2.0, Color32::WHITE);
            }
        }

        if let Some(hit) = self.last_hit_ms {
            if now.saturating_sub(hit) < PSSST_MS {
                canvas.text_outlined(
                    c - Vec2::new(0.0, self.radius * 0.2),
                    canvas.min_dim() * 0.06,
                    Color32::WHITE,
                    Color32::BLACK,
                    "pssst!",
                );
            }
        }

        // Pin cursor.
        if in_window {
            let p = Pos2::new(mx, my);
            canvas.polygon(
                vec![
                    p + Vec2::new(-4.0, 0.0),
                    p + Vec2::new(4.0, 0.0),
                    p + Vec2::new(0.0, -16.0),
                ],
                Color32::from_gray(250),
                0.0,
                Color32::TRANSPARENT,
            );
            canvas.rect_filled(
                egui::Rect::from_min_size(p + Vec2::new(-2.0, -28.0), Vec2::new(4.0, 14.0)),
                2,
                Color32::BLACK,
            );
        }
    }

    fn on_event(&mut self, event: &InputEvent, ctx: &mut GameCtx) {
        if let InputEvent::PointerPressed { x, y } = *event {
            let c = balloon_center(ctx.view);
            let d2 = (x - c.x).powi(2) + (y - c.y).powi(2);
            if !self.popped && d2 <= self.radius * self.radius {
                self.hits += 1;
                self.radius *= SHRINK_PER_HIT;
                self.last_hit_ms = Some(ctx.now_ms);
                ctx.audio.play_one_shot(keys::EGO_HIT);
                let min_radius = ctx.view.x.min(ctx.view.y) * 0.06;
                if self.hits >= HITS_TO_POP || self.radius < min_radius {
                    self.popped = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit_center(game: &mut EgoDeflator, rig: &mut super::super::TestRig, at_ms: u64) {
        // balloon center for the 800x600 test view
        let event = InputEvent::PointerPressed { x: 400.0, y: 312.0 };
        game.on_event(&event, &mut rig.ctx(at_ms));
    }

    #[test]
    fn six_hits_pop_the_balloon() {
        let mut rig = super::super::TestRig::new();
        let mut game = EgoDeflator::default();
        game.reset(&mut rig.ctx(0));
        for i in 0..6 {
            assert!(!game.popped, "popped early at hit {i}");
            hit_center(&mut game, &mut rig, i * 50);
        }
        assert!(game.popped);
        assert_eq!(game.hits, HITS_TO_POP);
    }

    #[test]
    fn hits_shrink_the_radius() {
        let mut rig = super::super::TestRig::new();
        let mut game = EgoDeflator::default();
        game.reset(&mut rig.ctx(0));
        let before = game.radius;
        hit_center(&mut game, &mut rig, 10);
        assert!((game.radius - before * SHRINK_PER_HIT).abs() < 0.01);
    }

    #[test]
    fn leaving_the_window_pops_the_balloon() {
        let mut rig = super::super::TestRig::new();
        let mut game = EgoDeflator::default();
        game.reset(&mut rig.ctx(0));
        assert!(!game.popped);

        let mut input = InputState::new();
        input.push_pointer_moved(400.0, 300.0);
        game.note_pointer_presence(input.pointer_in_window());
        assert!(!game.popped);

        input.push_pointer_left();
        game.note_pointer_presence(input.pointer_in_window());
        assert!(game.popped);
    }

    #[test]
    fn clicks_outside_the_balloon_miss() {
        let mut rig = super::super::TestRig::new();
        let mut game = EgoDeflator::default();
        game.reset(&mut rig.ctx(0));
        let event = InputEvent::PointerPressed { x: 10.0, y: 10.0 };
        game.on_event(&event, &mut rig.ctx(10));
        assert_eq!(game.hits, 0);
    }
}
