//! Tag the fleeting motivation: a 10-pixel dot ricochets around a dark
//! stage; clicking within its radius catches it.

use egui::{Color32, Pos2, Vec2};
use rand::Rng;

use flux_core::input::{InputEvent, InputState};

use crate::canvas::Canvas;

use super::{GameCtx, Microgame};

const CATCH_RADIUS: f32 = 10.0;
const EDGE_MARGIN: f32 = 20.0;

#[derive(Default)]
pub struct MotivationCatcher {
    caught: bool,
    pos: Vec2,
    vel: Vec2,
}

impl Microgame for MotivationCatcher {
    fn reset(&mut self, ctx: &mut GameCtx) {
        self.caught = false;
        self.pos = ctx.view * 0.5;
        let speed = (ctx.view.x.min(ctx.view.y) * 0.012).max(5.0);
        let angle = ctx.rng.gen_range(0.0..std::f32::consts::TAU);
        self.vel = Vec2::new(speed * angle.cos(), speed * angle.sin());
    }

    fn frame(&mut self, canvas: &Canvas, _input: &InputState, _ctx: &mut GameCtx, _elapsed_ms: u64) {
        canvas.fill(Color32::from_rgb(10, 10, 20));

        if !self.caught {
            self.pos += self.vel;
            if self.pos.x < EDGE_MARGIN || self.pos.x > canvas.width() - EDGE_MARGIN {
                self.vel.x = -self.vel.x;
            }
            if self.pos.y < EDGE_MARGIN || self.pos.y > canvas.height() - EDGE_MARGIN {
                self.vel.y = -self.vel.y;
            }
        }

        // Glowing trail behind the dot.
        let trail = Color32::from_rgba_unmultiplied(120, 240, 255, 70);
        for i in 0..10 {
            let f = i as f32 / 10.0;
            let t = self.pos - self.vel * f * 2.5;
            canvas.circle_stroke(t.to_pos2(), (10.0 - i as f32 * 0.7) * 0.5, 3.0, trail);
        }

        let p = self.pos.to_pos2();
        if self.caught {
            canvas.circle(p, 5.0, Color32::from_rgb(100, 255, 120));
            canvas.text_outlined(
                p - Vec2::new(0.0, 24.0),
                26.0,
                Color32::from_rgb(0, 255, 160),
                Color32::WHITE,
                "GOT IT",
            );
        } else {
            canvas.circle(p, 5.0, Color32::from_rgb(255, 80, 160));
            canvas.text(p - Vec2::new(0.0, 18.0), 14.0, Color32::WHITE, "MOTIVATION");
        }

        canvas.text_outlined(
            canvas.at(0.5, 0.12),
            canvas.min_dim() * 0.04,
            Color32::WHITE,
            Color32::WHITE,
            "Motivation Catch-up.",
        );
    }

    fn on_event(&mut self, event: &InputEvent, _ctx: &mut GameCtx) {
        if let InputEvent::PointerPressed { x, y } = *event {
            let d = (Vec2::new(x, y) - self.pos).length();
            if d <= CATCH_RADIUS {
                self.caught = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catch_needs_a_click_on_the_dot() {
        let mut rig = super::super::TestRig::new();
        let mut game = MotivationCatcher::default();
        game.reset(&mut rig.ctx(0));
        let start = game.pos;

        let far = InputEvent::PointerPressed {
            x: start.x + 50.0,
            y: start.y,
        };
        game.on_event(&far, &mut rig.ctx(10));
        assert!(!game.caught);

        let near = InputEvent::PointerPressed {
            x: start.x + 4.0,
            y: start.y + 4.0,
        };
        game.on_event(&near, &mut rig.ctx(20));
        assert!(game.caught);
    }

    #[test]
    fn reset_launches_from_center_with_speed() {
        let mut rig = super::super::TestRig::new();
        let mut game = MotivationCatcher::default();
        game.reset(&mut rig.ctx(0));
        assert_eq!(game.pos, Vec2::new(400.0, 300.0));
        assert!(game.vel.length() >= 5.0);
    }
}
