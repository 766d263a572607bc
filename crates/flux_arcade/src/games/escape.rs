//! The escape button: one big inviting button in the middle of the screen.
//! Clicking it reveals that there was never anywhere to go.

use egui::{Color32, Pos2, Rect, Vec2};

use flux_core::input::{InputEvent, InputState};

use crate::canvas::Canvas;

use super::{GameCtx, Microgame};

#[derive(Default)]
pub struct MeetingEscape {
    escaped: bool,
}

fn button_rect(view: Vec2) -> Rect {
    let w = (view.x * 0.6).min(420.0);
    Rect::from_center_size(Pos2::new(view.x * 0.5, view.y * 0.5), Vec2::new(w, 72.0))
}

impl Microgame for MeetingEscape {
    fn reset(&mut self, _ctx: &mut GameCtx) {
        self.escaped = false;
    }

    fn frame(&mut self, canvas: &Canvas, input: &InputState, ctx: &mut GameCtx, _elapsed_ms: u64) {
        canvas.fill(Color32::from_rgb(24, 28, 44));

        canvas.text_outlined(
            canvas.at(0.5, 0.28),
            canvas.min_dim() * 0.08,
            Color32::WHITE,
            Color32::BLACK,
            "Repo Something!",
        );

        let btn = button_rect(ctx.view);
        let (mx, my) = input.pointer_position();
        let hovering = btn.contains(Pos2::new(mx, my));
        let fill = if hovering {
            Color32::from_rgb(60, 220, 120)
        } else {
            Color32::from_rgb(40, 180, 90)
        };
        canvas.rect_filled(btn, 12, fill);
        canvas.text(btn.center(), 28.0, Color32::BLACK, "REPOSSESS");

        let tip = if self.escaped {
            "You are still here."
        } else {
            "Click the button to escape the nonsense."
        };
        canvas.text(
            canvas.at(0.5, 0.68),
            canvas.min_dim() * 0.035,
            Color32::from_gray(230),
            tip,
        );
    }

    fn on_event(&mut self, event: &InputEvent, ctx: &mut GameCtx) {
        if let InputEvent::PointerPressed { x, y } = *event {
            if button_rect(ctx.view).contains(Pos2::new(x, y)) {
                self.escaped = true;
            }
        }
    }
}
