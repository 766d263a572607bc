//! Find the noise: five clicks, each spawning a brief silly doodle and one
//! of two squirrel chirps, then the truth is revealed.

use egui::{Color32, Pos2, Vec2};
use rand::Rng;

use flux_core::input::{InputEvent, InputState};

use crate::assets::keys;
use crate::canvas::Canvas;

use super::{blink, GameCtx, Microgame};

const CLICKS_TO_REVEAL: u8 = 5;
const PUFF_MS: u64 = 140;
const FLASH_MS: u64 = 700;

struct Puff {
    x: f32,
    y: f32,
    kind: u8,
    at_ms: u64,
}

#[derive(Default)]
pub struct NoiseMaker {
    clicks: u8,
    puffs: Vec<Puff>,
}

impl NoiseMaker {
    fn draw_silly(&self, canvas: &Canvas, puff: &Puff) {
        let p = Pos2::new(puff.x, puff.y);
        match puff.kind {
            0 => {
                canvas.circle(p, 12.0, Color32::WHITE);
                canvas.circle(p + Vec2::new(3.0, 0.0), 4.0, Color32::BLACK);
            }
            1 => {
                canvas.polygon(
                    vec![
                        p + Vec2::new(-16.0, 10.0),
                        p + Vec2::new(16.0, 10.0),
                        p + Vec2::new(-10.0, -10.0),
                    ],
                    Color32::from_rgb(255, 230, 80),
                    0.0,
                    Color32::TRANSPARENT,
                );
                canvas.circle(p + Vec2::new(-4.0, -2.0), 2.0, Color32::from_rgb(210, 170, 50));
                canvas.circle(p + Vec2::new(2.0, 2.0), 1.5, Color32::from_rgb(210, 170, 50));
            }
            _ => {
                canvas.circle(p, 11.0, Color32::WHITE);
                canvas.circle(p, 5.0, Color32::BLACK);
                canvas.line(
                    p + Vec2::new(6.0, 6.0),
                    p + Vec2::new(12.0, 12.0),
                    3.0,
                    Color32::BLACK,
                );
            }
        }
    }
}

impl Microgame for NoiseMaker {
    fn reset(&mut self, _ctx: &mut GameCtx) {
        self.clicks = 0;
        self.puffs.clear();
    }

    fn frame(&mut self, canvas: &Canvas, _input: &InputState, ctx: &mut GameCtx, elapsed_ms: u64) {
        canvas.fill(Color32::from_rgb(255, 35, 190));

        if elapsed_ms < FLASH_MS {
            canvas.text_outlined(
                canvas.at(0.5, 0.15),
                canvas.min_dim() * 0.06,
                Color32::BLACK,
                Color32::WHITE,
                "THE NOISE IS A SQUIRREL",
            );
        }

        let remaining = CLICKS_TO_REVEAL.saturating_sub(self.clicks);
        let hint = canvas.min_dim() * 0.045;
        canvas.text_outlined(
            canvas.at(0.5, 0.85),
            hint,
            Color32::BLACK,
            Color32::WHITE,
            "Click to find the noise.",
        );
        canvas.text_outlined(
            canvas.at(0.5, 0.9),
            hint,
            Color32::BLACK,
            Color32::WHITE,
            &format!("Clicks remaining: {remaining}"),
        );

        let now = ctx.now_ms;
        self.puffs.retain(|p| now.saturating_sub(p.at_ms) < PUFF_MS);
        for puff in &self.puffs {
            self.draw_silly(canvas, puff);
        }

        if self.clicks >= CLICKS_TO_REVEAL && blink(now, 250) {
            canvas.text_outlined(
                canvas.at(0.5, 0.5),
                canvas.min_dim() * 0.07,
                Color32::WHITE,
                Color32::BLACK,
                "...THE NOISE WAS INSIDE YOU ALL ALONG...",
            );
        }
    }

    fn on_event(&mut self, event: &InputEvent, ctx: &mut GameCtx) {
        if let InputEvent::PointerPressed { x, y } = *event {
            if self.clicks < CLICKS_TO_REVEAL {
                self.clicks += 1;
                self.puffs.push(Puff {
                    x,
                    y,
                    kind: ctx.rng.gen_range(0..3),
                    at_ms: ctx.now_ms,
                });
                let chirp = keys::SQUIRREL[ctx.rng.gen_range(0..keys::SQUIRREL.len())];
                ctx.audio.play_one_shot(chirp);
            }
        }
    }
}
