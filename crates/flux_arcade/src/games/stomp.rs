//! Creature stomp: six creatures patrol a corridor while a giant foot
//! follows the pointer. A press latches a stomp that always completes its
//! descent; anything under the foot on the way down is flattened.

use egui::{Color32, Pos2, Rect, Vec2};
use rand::Rng;

use flux_core::input::{InputEvent, InputState};

use crate::assets::keys;
use crate::canvas::Canvas;

use super::{GameCtx, Microgame};

const CREATURE_COUNT: usize = 6;

struct Creature {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    vx: f32,
    alive: bool,
    image: &'static str,
}

#[derive(Default)]
pub struct CreatureStomper {
    creatures: Vec<Creature>,
    foot_x: f32,
    foot_y: f32,
    foot_down: bool,
    prev_foot_down: bool,
    latched: bool,
    completed: bool,
}

impl CreatureStomper {
    fn foot_size(&self, min_dim: f32) -> Vec2 {
        // 1.35 base scale shrunk to 30%, like a cutout that was never
        // resized properly.
        let w = min_dim * 0.55 * 1.35 * 0.3;
        Vec2::new(w, w * 0.7)
    }

    fn alive_count(&self) -> usize {
        self.creatures.iter().filter(|c| c.alive).count()
    }
}

const CREATURE_IMAGES: [&str; 3] = ["creature_0", "creature_1", "creature_2"];

impl Microgame for CreatureStomper {
    fn reset(&mut self, ctx: &mut GameCtx) {
        let unit = ctx.view.x.min(ctx.view.y);
        self.creatures = (0..CREATURE_COUNT)
            .map(|i| {
                let speed = ctx.rng.gen_range(2.0..3.6);
                Creature {
                    x: ctx.rng.gen_range(ctx.view.x * 0.1..ctx.view.x * 0.9),
                    y: ctx.rng.gen_range(ctx.view.y * 0.4..ctx.view.y * 0.8),
                    w: unit * ctx.rng.gen_range(0.10..0.16),
                    h: unit * ctx.rng.gen_range(0.10..0.16),
                    vx: if ctx.rng.gen_bool(0.5) { speed } else { -speed },
                    alive: true,
                    image: CREATURE_IMAGES[i % CREATURE_IMAGES.len()],
                }
            })
            .collect();
        self.foot_x = ctx.view.x * 0.75;
        self.foot_y = ctx.view.y * 0.2;
        self.foot_down = false;
        self.prev_foot_down = false;
        self.latched = false;
        self.completed = false;
    }

    fn frame(&mut self, canvas: &Canvas, input: &InputState, ctx: &mut GameCtx, _elapsed_ms: u64) {
        canvas.fill(Color32::from_rgb(255, 235, 180));

        // A press latches the stomp so it always reaches the floor, even if
        // the button is released mid-descent.
        if self.foot_down && !self.prev_foot_down {
            self.latched = true;
            self.completed = false;
        }
        let stomping = self.foot_down || (self.latched && !self.completed);

        for c in self.creatures.iter_mut().filter(|c| c.alive) {
            c.x += c.vx;
            if c.x < 0.0 {
                c.x = 0.0;
                c.vx = -c.vx;
            }
            if c.x + c.w > canvas.width() {
                c.x = canvas.width() - c.w;
                c.vx = -c.vx;
            }
        }

        let foot = self.foot_size(canvas.min_dim());
        let up_y = canvas.height() * 0.18;
        let down_y = canvas.height() * 0.45;

        // Corridor lock: clamp creature rows into the foot's hittable band
        // so the round is always winnable.
        let band_top = (down_y - foot.y * 0.50).max(0.0);
        let band_bottom = (down_y + foot.y * 0.35).min(canvas.height());
        for c in self.creatures.iter_mut().filter(|c| c.alive) {
            c.y = c.y.clamp(band_top, (band_bottom - c.h).max(band_top));
        }

        for c in self.creatures.iter().filter(|c| c.alive) {
            let rect = Rect::from_min_size(Pos2::new(c.x, c.y), Vec2::new(c.w, c.h));
            match ctx.images.get(c.image) {
                Some(tex) => canvas.image(tex, rect),
                None => {
                    canvas.rect_filled(rect, 6, Color32::from_rgb(90, 160, 220));
                    canvas.circle(
                        rect.center() - Vec2::new(0.0, c.h * 0.1),
                        c.w * 0.08,
                        Color32::BLACK,
                    );
                }
            }
        }

        self.foot_x = input.pointer_position().0;
        let target_y = if stomping { down_y } else { up_y };
        let rate = if stomping { 0.35 } else { 0.18 };
        self.foot_y += (target_y - self.foot_y) * rate;
        if stomping && self.foot_y >= down_y - 1.0 {
            self.foot_y = down_y;
            self.completed = true;
        }
        if !stomping && self.latched && self.completed {
            self.latched = false;
        }
        self.prev_foot_down = self.foot_down;

        let foot_rect = Rect::from_center_size(Pos2::new(self.foot_x, self.foot_y), foot);
        match ctx.images.get("foot") {
            Some(tex) => canvas.image(tex, foot_rect),
            None => canvas.circle(foot_rect.center(), foot.x * 0.5, Color32::from_rgb(255, 200, 170)),
        }

        if stomping {
            for c in self.creatures.iter_mut().filter(|c| c.alive) {
                let rect = Rect::from_min_size(Pos2::new(c.x, c.y), Vec2::new(c.w, c.h));
                if foot_rect.intersects(rect) {
                    c.alive = false;
                    ctx.audio.play_one_shot(keys::STOMP_HIT);
                }
            }
        }

        if self.alive_count() == 0 {
            canvas.text_outlined(
                canvas.at(0.5, 0.25),
                canvas.min_dim() * 0.03,
                Color32::WHITE,
                Color32::BLACK,
                "AND NOW FOR SOMETHING COMPLETELY FLATTENED",
            );
        }
    }

    fn on_event(&mut self, event: &InputEvent, ctx: &mut GameCtx) {
        match event {
            InputEvent::PointerPressed { .. } => {
                self.foot_down = true;
                ctx.audio.play_one_shot(keys::STOMP);
            }
            InputEvent::PointerReleased { .. } => {
                self.foot_down = false;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_spawns_six_live_creatures() {
        let mut rig = super::super::TestRig::new();
        let mut game = CreatureStomper::default();
        game.reset(&mut rig.ctx(0));
        assert_eq!(game.creatures.len(), CREATURE_COUNT);
        assert_eq!(game.alive_count(), CREATURE_COUNT);
        assert!(!game.latched);
    }

    #[test]
    fn press_lowers_and_release_raises_the_foot_flag() {
        let mut rig = super::super::TestRig::new();
        let mut game = CreatureStomper::default();
        game.reset(&mut rig.ctx(0));

        game.on_event(&InputEvent::PointerPressed { x: 0.0, y: 0.0 }, &mut rig.ctx(10));
        assert!(game.foot_down);
        game.on_event(&InputEvent::PointerReleased { x: 0.0, y: 0.0 }, &mut rig.ctx(20));
        assert!(!game.foot_down);
    }

    #[test]
    fn latch_survives_an_early_release() {
        let mut game = CreatureStomper {
            foot_down: true,
            prev_foot_down: false,
            ..Default::default()
        };
        // rising edge latches
        if game.foot_down && !game.prev_foot_down {
            game.latched = true;
            game.completed = false;
        }
        game.foot_down = false;
        let stomping = game.foot_down || (game.latched && !game.completed);
        assert!(stomping, "stomp continues after release until it bottoms out");
    }
}
