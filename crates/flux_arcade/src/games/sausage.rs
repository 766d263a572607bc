//! Stuff the sausage: every click flings a piece of modern life toward the
//! casing. Eight pieces make a fine meal.

use egui::{Color32, Pos2, Rect, Vec2};
use rand::Rng;

use flux_core::input::{InputEvent, InputState};

use crate::assets::keys;
use crate::canvas::Canvas;

use super::{wobble, GameCtx, Microgame};

const FILL_TARGET: u8 = 8;

const STUFFING: [&str; 46] = [
    "CORRUPTION",
    "HUNGER",
    "SANCTIONS",
    "PROPAGANDA",
    "W.M.D.",
    "SURVEILLANCE",
    "OLIGARCHS",
    "DISINFORMATION",
    "DEBT",
    "STRESS",
    "BUREAUCRACY",
    "INFLUENCERS",
    "NUKE",
    "WAR",
    "LIFE COACHES",
    "SPAM EMAILS",
    "SCROLLING",
    "MICROTRANSACTIONS",
    "CLICKBAIT",
    "FAST FOOD",
    "ADVERTISING",
    "ALGORITHMS",
    "FOMO",
    "COMMUTE",
    "SUBSCRIPTIONS",
    "INSTANT GRATIFICATION",
    "OVERWORK",
    "DATA MINING",
    "MALWARE",
    "STAGNATION",
    "GOSSIP",
    "NOTIFICATIONS",
    "BURNOUT",
    "MEETINGS",
    "MIDLIFE CRISIS",
    "DOOMSCROLLING",
    "FAKE NEWS",
    "SURVEILLANCE CAPITALISM",
    "TERMS OF SERVICE",
    "ADDICTION",
    "POP-UPS",
    "EGO",
    "ANXIETY",
    "PROCRASTINATION",
    "PORNOGRAPHY",
    "POLITICIANS",
];

struct FlyingLabel {
    pos: Vec2,
    label: &'static str,
    phase: f32,
}

#[derive(Default)]
pub struct SausageStuffer {
    flying: Vec<FlyingLabel>,
    fill_count: u8,
}

impl Microgame for SausageStuffer {
    fn reset(&mut self, _ctx: &mut GameCtx) {
        self.flying.clear();
        self.fill_count = 0;
    }

    fn frame(&mut self, canvas: &Canvas, _input: &InputState, ctx: &mut GameCtx, _elapsed_ms: u64) {
        canvas.fill(Color32::from_rgb(255, 237, 210));

        let sx = canvas.width() * 0.2;
        let sy = canvas.height() * 0.5;
        let sw = canvas.width() * 0.6;
        let sh = (canvas.height() * 0.22).min(180.0);

        let body = Rect::from_min_size(Pos2::new(sx, sy - sh * 0.5), Vec2::new(sw, sh));
        canvas.rect_filled(body, (sh * 0.5) as u8, Color32::from_rgb(200, 80, 70));
        canvas.rect_filled(
            body.shrink(8.0),
            (sh * 0.5 - 12.0).max(0.0) as u8,
            Color32::from_rgb(170, 60, 55),
        );

        // Fill progress bar below the casing.
        let pct = (self.fill_count as f32 / FILL_TARGET as f32).clamp(0.0, 1.0);
        let bar = Rect::from_min_size(
            Pos2::new(sx, sy + sh * 0.5 + 20.0),
            Vec2::new(sw, 14.0),
        );
        canvas.rect_filled(
            Rect::from_min_size(bar.min, Vec2::new(sw * pct, 14.0)),
            7,
            Color32::from_rgb(30, 200, 110),
        );
        canvas.rect_stroke(bar, 7, 1.5, Color32::BLACK);

        // Labels drift toward a wandering point inside the casing and
        // vanish when they arrive.
        self.flying.retain_mut(|f| {
            let target = Vec2::new(
                sx + ctx.rng.gen_range(20.0..sw - 20.0),
                sy + ctx.rng.gen_range(-sh * 0.5 + 14.0..sh * 0.5 - 14.0),
            );
            f.pos += (target - f.pos) * 0.08;
            f.phase += 0.03;
            let tilt = 6.0 * wobble(ctx.now_ms, 2.0, f.phase);
            canvas.text_outlined(
                f.pos.to_pos2() + Vec2::new(0.0, tilt),
                20.0,
                Color32::WHITE,
                Color32::BLACK,
                f.label,
            );
            (target - f.pos).length() >= 18.0
        });

        canvas.text_outlined(
            Pos2::new(canvas.width() * 0.5, sy - sh * 0.5 - 40.0),
            canvas.min_dim() * 0.045,
            Color32::BLACK,
            Color32::WHITE,
            "Click to Add 'content' into the sausage.",
        );

        if self.fill_count >= FILL_TARGET {
            canvas.text_outlined(
                Pos2::new(canvas.width() * 0.5, sy - sh * 0.5 - 100.0),
                canvas.min_dim() * 0.07,
                Color32::WHITE,
                Color32::BLACK,
                "A FINE MEAL!",
            );
        }
    }

    fn on_event(&mut self, event: &InputEvent, ctx: &mut GameCtx) {
        if let InputEvent::PointerPressed { x, y } = *event {
            let label = STUFFING[ctx.rng.gen_range(0..STUFFING.len())];
            self.flying.push(FlyingLabel {
                pos: Vec2::new(x, y),
                label,
                phase: ctx.rng.gen_range(0.0..std::f32::consts::TAU),
            });
            if self.fill_count < FILL_TARGET {
                self.fill_count += 1;
            }
            ctx.audio.play_one_shot(keys::SAUSAGE_CLICK);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_clicks_fill_the_sausage() {
        let mut rig = super::super::TestRig::new();
        let mut game = SausageStuffer::default();
        game.reset(&mut rig.ctx(0));
        for i in 0..12u64 {
            let event = InputEvent::PointerPressed { x: 50.0, y: 50.0 };
            game.on_event(&event, &mut rig.ctx(i * 100));
        }
        assert_eq!(game.fill_count, FILL_TARGET, "fill count saturates");
        assert_eq!(game.flying.len(), 12, "labels keep flying past the target");
    }

    #[test]
    fn reset_empties_the_casing() {
        let mut rig = super::super::TestRig::new();
        let mut game = SausageStuffer {
            fill_count: FILL_TARGET,
            ..Default::default()
        };
        game.reset(&mut rig.ctx(0));
        assert_eq!(game.fill_count, 0);
    }
}
