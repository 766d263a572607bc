//! Pet the invisible dog: hold the button for the whole round. Letting go
//! after starting is the only way to lose.

use egui::Color32;

use flux_core::input::{InputEvent, InputState};

use crate::assets::keys;
use crate::canvas::Canvas;

use super::{blink, wobble, GameCtx, Microgame};

#[derive(Default)]
pub struct DogPetter {
    ever_pressed: bool,
    failed: bool,
}

impl Microgame for DogPetter {
    fn reset(&mut self, ctx: &mut GameCtx) {
        self.ever_pressed = false;
        self.failed = false;
        ctx.audio.stop_held();
    }

    fn frame(&mut self, canvas: &Canvas, input: &InputState, ctx: &mut GameCtx, _elapsed_ms: u64) {
        canvas.fill(Color32::from_rgb(236, 225, 206));

        let petting = input.pointer_held() && !self.failed;
        if petting {
            let r = canvas.min_dim() * (0.06 + 0.01 * wobble(ctx.now_ms, 12.0, 0.0));
            let c = canvas.center();
            canvas.circle_stroke(c, r * 0.5, 2.0, Color32::from_rgb(255, 200, 80));
            canvas.circle(
                c,
                r * 0.7,
                Color32::from_rgba_unmultiplied(255, 220, 120, 40),
            );
        }
        ctx.audio.hold_loop(keys::DOG_HOLD, petting, ctx.now_ms, None);

        if self.failed && blink(ctx.now_ms, 260) {
            canvas.text_outlined(
                canvas.at(0.5, 0.45),
                canvas.min_dim() * 0.12,
                Color32::from_rgb(230, 40, 40),
                Color32::BLACK,
                "HE BIT YOU",
            );
        }

        canvas.text_outlined(
            canvas.at(0.5, 0.8),
            canvas.min_dim() * 0.045,
            Color32::BLACK,
            Color32::WHITE,
            "Hold the mouse button down for the full duration.",
        );
    }

    fn on_event(&mut self, event: &InputEvent, ctx: &mut GameCtx) {
        match event {
            InputEvent::PointerPressed { .. } => {
                self.ever_pressed = true;
            }
            InputEvent::PointerReleased { .. } => {
                // Releasing before the round ends counts as letting go;
                // never having touched the dog is fine.
                if self.ever_pressed && !self.failed {
                    self.failed = true;
                    ctx.audio.play_one_shot(keys::DOG_BITE);
                }
            }
            _ => {}
        }
    }
}
