//! Mow the cloud: drag the mower around the sky, leave dark patches, and
//! run the trimmer loop while the pointer is inside the cloud zone and moving.

use egui::{Color32, Pos2, Rect, Vec2};
use rand::Rng;

use flux_core::input::InputState;

use crate::assets::keys;
use crate::canvas::Canvas;

use super::{GameCtx, Microgame};

const MAX_SPOTS: usize = 400;
const CLOUD_ZONE_FRACTION: f32 = 0.6;
const MOVE_THRESHOLD: f32 = 1.5;

struct MowSpot {
    x: f32,
    y: f32,
    r: f32,
}

#[derive(Default)]
pub struct CloudMower {
    spots: Vec<MowSpot>,
}

impl Microgame for CloudMower {
    fn reset(&mut self, _ctx: &mut GameCtx) {
        self.spots.clear();
    }

    fn frame(&mut self, canvas: &Canvas, input: &InputState, ctx: &mut GameCtx, _elapsed_ms: u64) {
        canvas.fill(Color32::from_rgb(120, 200, 255));

        // Ground stripe.
        let ground = Rect::from_min_size(
            canvas.at(0.0, 0.8),
            Vec2::new(canvas.width(), canvas.height() * 0.2),
        );
        canvas.rect_filled(ground, 0, Color32::from_rgb(60, 180, 90));

        // Puffy cloud out of overlapping circles.
        let base_r = canvas.min_dim() * 0.12;
        let c = canvas.at(0.5, 0.33);
        let haze = Color32::from_rgba_unmultiplied(200, 220, 240, 140);
        canvas.circle(c + Vec2::new(-base_r, base_r * 0.2), base_r * 1.1, haze);
        canvas.circle(c + Vec2::new(base_r, base_r * 0.15), base_r, haze);
        canvas.circle(c + Vec2::new(-base_r * 1.3, 0.0), base_r * 0.9, Color32::WHITE);
        canvas.circle(c + Vec2::new(0.0, -base_r * 0.2), base_r * 1.25, Color32::WHITE);
        canvas.circle(c + Vec2::new(base_r * 1.3, base_r * 0.05), base_r * 0.95, Color32::WHITE);

        let zone_bottom = canvas.height() * CLOUD_ZONE_FRACTION;
        let patch = Color32::from_rgba_unmultiplied(80, 80, 90, 100);
        for spot in &self.spots {
            if spot.y < zone_bottom {
                canvas.circle(Pos2::new(spot.x, spot.y), spot.r * 0.5, patch);
            }
        }

        let (mx, my) = input.pointer_position();
        let mx = mx.clamp(0.0, canvas.width());
        let my = my.clamp(0.0, canvas.height());

        // Red mower cursor.
        let mower = (canvas.min_dim() * 0.06).max(25.0);
        let body = Rect::from_center_size(Pos2::new(mx, my), Vec2::splat(mower));
        canvas.rect_filled(body, 3, Color32::from_rgb(220, 40, 40));
        canvas.rect_stroke(body, 3, 2.0, Color32::BLACK);
        let blade = Rect::from_min_size(
            Pos2::new(mx - mower * 0.5, my - mower * 0.7),
            Vec2::new(mower, mower * 0.2),
        );
        canvas.rect_filled(blade, 2, Color32::BLACK);

        if my < zone_bottom {
            self.spots.push(MowSpot {
                x: mx,
                y: my,
                r: mower * ctx.rng.gen_range(0.9..1.1),
            });
            if self.spots.len() > MAX_SPOTS {
                self.spots.remove(0);
            }
        }

        let inside = my < zone_bottom;
        let moving = input.pointer_travel() > MOVE_THRESHOLD;
        ctx.audio
            .hold_loop(keys::TRIMMER, inside && moving, ctx.now_ms, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_mown_patches() {
        let mut rig = super::super::TestRig::new();
        let mut game = CloudMower::default();
        game.spots.push(MowSpot {
            x: 1.0,
            y: 2.0,
            r: 3.0,
        });
        game.reset(&mut rig.ctx(0));
        assert!(game.spots.is_empty());
    }
}
