//! Don't touch the form: a red form ricochets around the office while your
//! stick figure follows the pointer. Contact means DENIED and a shower of
//! rejection stamps.

use egui::{Color32, Pos2, Rect, Vec2};
use rand::Rng;

use flux_core::input::InputState;

use crate::assets::keys;
use crate::canvas::Canvas;

use super::{blink, GameCtx, Microgame};

const STAMP_COUNT: usize = 36;

struct Stamp {
    pos: Vec2,
    vel: Vec2,
    rot: f32,
    spin: f32,
}

#[derive(Default)]
pub struct FormFiler {
    denied: bool,
    pos: Vec2,
    vel: Vec2,
    size: Vec2,
    stamps: Vec<Stamp>,
}

fn stick_figure(canvas: &Canvas, x: f32, y: f32) {
    let p = Pos2::new(x, y);
    canvas.circle(p + Vec2::new(0.0, -10.0), 5.0, Color32::WHITE);
    canvas.circle_stroke(p + Vec2::new(0.0, -10.0), 5.0, 2.0, Color32::BLACK);
    canvas.line(p + Vec2::new(0.0, -5.0), p + Vec2::new(0.0, 10.0), 2.0, Color32::BLACK);
    canvas.line(p + Vec2::new(0.0, 2.0), p + Vec2::new(-6.0, 8.0), 2.0, Color32::BLACK);
    canvas.line(p + Vec2::new(0.0, 2.0), p + Vec2::new(6.0, 8.0), 2.0, Color32::BLACK);
    canvas.line(p + Vec2::new(0.0, 10.0), p + Vec2::new(-5.0, 18.0), 2.0, Color32::BLACK);
    canvas.line(p + Vec2::new(0.0, 10.0), p + Vec2::new(5.0, 18.0), 2.0, Color32::BLACK);
}

impl FormFiler {
    fn form_rect(&self) -> Rect {
        Rect::from_min_size(self.pos.to_pos2(), self.size)
    }
}

impl Microgame for FormFiler {
    fn reset(&mut self, ctx: &mut GameCtx) {
        self.denied = false;
        self.stamps.clear();
        let unit = ctx.view.x.min(ctx.view.y);
        self.size = Vec2::new(unit * 0.25, unit * 0.12);
        self.pos = Vec2::new(
            ctx.rng.gen_range(ctx.view.x * 0.2..ctx.view.x * 0.8 - self.size.x),
            ctx.rng.gen_range(ctx.view.y * 0.2..ctx.view.y * 0.8 - self.size.y),
        );
        let speed = (unit * 0.0045).max(2.2);
        let angle = ctx.rng.gen_range(0.0..std::f32::consts::TAU);
        self.vel = Vec2::new(speed * angle.cos(), speed * angle.sin());
    }

    fn frame(&mut self, canvas: &Canvas, input: &InputState, ctx: &mut GameCtx, _elapsed_ms: u64) {
        canvas.fill(Color32::from_rgb(240, 240, 255));

        if !self.denied {
            self.pos += self.vel;
            if self.pos.x < 0.0 || self.pos.x + self.size.x > canvas.width() {
                self.vel.x = -self.vel.x;
            }
            if self.pos.y < 0.0 || self.pos.y + self.size.y > canvas.height() {
                self.vel.y = -self.vel.y;
            }

            let rect = self.form_rect();
            canvas.rect_filled(rect, 0, Color32::from_rgb(220, 40, 40));
            canvas.rect_stroke(rect, 0, 2.0, Color32::BLACK);

            let (mx, my) = input.pointer_position();
            if rect.contains(Pos2::new(mx, my)) {
                self.denied = true;
                let origin = rect.center().to_vec2();
                for _ in 0..STAMP_COUNT {
                    self.stamps.push(Stamp {
                        pos: origin,
                        vel: Vec2::new(
                            ctx.rng.gen_range(-3.0..3.0),
                            ctx.rng.gen_range(-3.0..-0.5),
                        ),
                        rot: ctx.rng.gen_range(0.0..std::f32::consts::TAU),
                        spin: ctx.rng.gen_range(-0.1..0.1),
                    });
                }
                ctx.audio.play_one_shot(keys::DENIED);
            }
        } else {
            for s in &mut self.stamps {
                s.pos += s.vel;
                s.vel.y += 0.06;
                s.rot += s.spin;
                let dir = Vec2::angled(s.rot);
                let p = s.pos.to_pos2();
                // A little rubber stamp: pad plus handle, tilted by rot.
                canvas.line(p - dir * 6.0, p + dir * 6.0, 8.0, Color32::from_rgb(240, 40, 40));
                canvas.line(p, p + dir.rot90() * 8.0, 4.0, Color32::from_gray(60));
            }
            if blink(ctx.now_ms, 260) {
                canvas.text_outlined(
                    canvas.at(0.5, 0.2),
                    canvas.min_dim() * 0.12,
                    Color32::from_rgb(255, 60, 60),
                    Color32::BLACK,
                    "DENIED",
                );
            }
        }

        let (mx, my) = input.pointer_position();
        stick_figure(canvas, mx, my);

        canvas.text_outlined(
            canvas.at(0.5, 0.9),
            canvas.min_dim() * 0.04,
            Color32::BLACK,
            Color32::WHITE,
            "Avoid the moving form. Do not touch it!",
        );
    }
}
