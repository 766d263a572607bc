//! The glitchy face: a color-strobing face wobbles until the FREEZE button
//! locks it into one of seven random expressions.

use egui::{Color32, Pos2, Rect, Vec2};
use rand::Rng;

use flux_core::input::{InputEvent, InputState};

use crate::assets::keys;
use crate::canvas::Canvas;

use super::{wobble, GameCtx, Microgame};

const EXPRESSIONS: u8 = 7;

#[derive(Default)]
pub struct FaceFreezer {
    frozen: bool,
    expression: u8,
}

fn button_rect(view: Vec2) -> Rect {
    let bw = view.x.min(600.0) * 0.35;
    let bh = 56.0;
    Rect::from_center_size(Pos2::new(view.x * 0.5, view.y * 0.82), Vec2::new(bw, bh))
}

impl FaceFreezer {
    fn draw_expression(&self, canvas: &Canvas, cx: f32, cy: f32, r: f32) {
        let c = Pos2::new(cx, cy);
        match self.expression {
            // Each variant is a small doodle; the joke is the randomness,
            // not the art.
            1 => {
                // Sunglasses and a smirk.
                let lens = Vec2::new(r * 0.28, r * 0.16);
                canvas.rect_filled(
                    Rect::from_min_size(c + Vec2::new(-r * 0.38, -r * 0.2), lens),
                    4,
                    Color32::BLACK,
                );
                canvas.rect_filled(
                    Rect::from_min_size(c + Vec2::new(r * 0.10, -r * 0.2), lens),
                    4,
                    Color32::BLACK,
                );
                canvas.line(
                    c + Vec2::new(-r * 0.10, -r * 0.12),
                    c + Vec2::new(r * 0.10, -r * 0.12),
                    2.0,
                    Color32::BLACK,
                );
            }
            2 => {
                // Hypno-spiral eyes.
                for i in 0..6 {
                    let rr = r * (0.03 + i as f32 * 0.015);
                    canvas.circle_stroke(c + Vec2::new(-r * 0.25, -r * 0.15), rr, 1.5, Color32::BLACK);
                    canvas.circle_stroke(c + Vec2::new(r * 0.25, -r * 0.15), rr, 1.5, Color32::BLACK);
                }
            }
            3 => {
                // Droopy cheeks.
                canvas.circle(c + Vec2::new(-r * 0.12, r * 0.2), r * 0.1, Color32::BLACK);
                canvas.circle(c + Vec2::new(r * 0.12, r * 0.2), r * 0.1, Color32::BLACK);
            }
            4 => {
                // Starry eyes.
                canvas.circle(c + Vec2::new(-r * 0.25, -r * 0.15), r * 0.09, Color32::from_rgb(255, 220, 0));
                canvas.circle(c + Vec2::new(r * 0.25, -r * 0.15), r * 0.09, Color32::from_rgb(255, 220, 0));
            }
            5 => {
                // Tongue out.
                canvas.rect_filled(
                    Rect::from_min_size(
                        c + Vec2::new(-r * 0.08, r * 0.22),
                        Vec2::new(r * 0.16, r * 0.16),
                    ),
                    8,
                    Color32::from_rgb(255, 80, 120),
                );
            }
            6 => {
                // Angry brows.
                canvas.line(
                    c + Vec2::new(-r * 0.36, -r * 0.28),
                    c + Vec2::new(-r * 0.14, -r * 0.20),
                    2.0,
                    Color32::BLACK,
                );
                canvas.line(
                    c + Vec2::new(r * 0.14, -r * 0.20),
                    c + Vec2::new(r * 0.36, -r * 0.28),
                    2.0,
                    Color32::BLACK,
                );
            }
            _ => {}
        }
    }
}

impl Microgame for FaceFreezer {
    fn reset(&mut self, _ctx: &mut GameCtx) {
        self.frozen = false;
        self.expression = 0;
    }

    fn frame(&mut self, canvas: &Canvas, input: &InputState, ctx: &mut GameCtx, _elapsed_ms: u64) {
        canvas.fill(Color32::from_rgb(60, 50, 180));

        let r = canvas.min_dim() * 0.22;
        let face_center = canvas.at(0.5, 0.45);
        let (cx, cy) = (face_center.x, face_center.y);
        let now = ctx.now_ms;

        let face_color = if self.frozen {
            Color32::from_rgb(255, 240, 200)
        } else {
            Color32::from_rgb(
                (180.0 + 75.0 * wobble(now, 24.0, 0.0)) as u8,
                (180.0 + 75.0 * wobble(now, 42.0, 1.2)) as u8,
                (180.0 + 75.0 * wobble(now, 54.0, 0.7)) as u8,
            )
        };
        canvas.circle(face_center, r * 0.58, face_color);

        if !self.frozen {
            // Jittering eyes and a wobbling mouth.
            let dx = 6.0 * wobble(now, 36.0, 0.0);
            let dy = 4.0 * wobble(now, 30.0, 1.57);
            let eye = r * 0.08;
            canvas.circle(Pos2::new(cx - r * 0.25 + dx, cy - r * 0.15 + dy), eye, Color32::BLACK);
            canvas.circle(Pos2::new(cx + r * 0.25 - dx, cy - r * 0.15 - dy), eye, Color32::BLACK);
            let wob = wobble(now, 18.0, 0.0) * r * 0.1;
            canvas.line(
                Pos2::new(cx - r * 0.3, cy + r * 0.12),
                Pos2::new(cx + r * 0.3, cy + r * 0.12 + wob),
                3.0,
                Color32::BLACK,
            );
        } else {
            canvas.circle(Pos2::new(cx - r * 0.25, cy - r * 0.15), r * 0.06, Color32::BLACK);
            canvas.circle(Pos2::new(cx + r * 0.25, cy - r * 0.15), r * 0.06, Color32::BLACK);
            canvas.line(
                Pos2::new(cx - r * 0.27, cy + r * 0.18),
                Pos2::new(cx + r * 0.27, cy + r * 0.18),
                3.0,
                Color32::BLACK,
            );
            self.draw_expression(canvas, cx, cy, r);
        }

        let btn = button_rect(ctx.view);
        let (mx, my) = input.pointer_position();
        let hovering = btn.contains(Pos2::new(mx, my));
        let fill = if hovering {
            Color32::from_rgb(255, 210, 60)
        } else {
            Color32::from_rgb(255, 180, 40)
        };
        canvas.rect_filled(btn, 12, fill);
        canvas.rect_stroke(btn, 12, 1.5, Color32::BLACK);
        canvas.text(btn.center(), 28.0, Color32::BLACK, "FREEZE!");
        canvas.text(
            btn.center() - Vec2::new(0.0, btn.height() * 0.5 + 24.0),
            18.0,
            Color32::WHITE,
            "Freeze the AI Face in judgment.",
        );
    }

    fn on_event(&mut self, event: &InputEvent, ctx: &mut GameCtx) {
        if let InputEvent::PointerPressed { x, y } = *event {
            if button_rect(ctx.view).contains(Pos2::new(x, y)) {
                self.frozen = true;
                self.expression = ctx.rng.gen_range(0..EXPRESSIONS);
                ctx.audio.play_one_shot(keys::FACE_CLICK);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freeze_requires_hitting_the_button() {
        let mut rig = super::super::TestRig::new();
        let mut game = FaceFreezer::default();
        game.reset(&mut rig.ctx(0));

        let miss = InputEvent::PointerPressed { x: 5.0, y: 5.0 };
        game.on_event(&miss, &mut rig.ctx(10));
        assert!(!game.frozen);

        // view in TestRig is 800x600, so the button center is (400, 492)
        let hit = InputEvent::PointerPressed { x: 400.0, y: 492.0 };
        game.on_event(&hit, &mut rig.ctx(20));
        assert!(game.frozen);
        assert!(game.expression < EXPRESSIONS);
    }

    #[test]
    fn reset_unfreezes() {
        let mut rig = super::super::TestRig::new();
        let mut game = FaceFreezer {
            frozen: true,
            expression: 3,
        };
        game.reset(&mut rig.ctx(0));
        assert!(!game.frozen);
        assert_eq!(game.expression, 0);
    }
}
