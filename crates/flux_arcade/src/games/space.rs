//! Give them space: GRIEF and MAYONNAISE sit too close together until one
//! press of Space slides them apart to a gavel bong.

use egui::{Color32, Pos2, Vec2};

use flux_core::input::{InputEvent, InputState, Key};

use crate::assets::keys;
use crate::canvas::Canvas;

use super::{GameCtx, Microgame};

const BONG_FLASH_MS: u64 = 450;

#[derive(Default)]
pub struct SpaceSorter {
    sorted: bool,
    bong_at_ms: Option<u64>,
    grief: Vec2,
    mayo: Vec2,
}

fn spiky(canvas: &Canvas, center: Pos2, r: f32, spikes: usize, color: Color32) {
    let mut points = Vec::with_capacity(spikes * 2);
    for i in 0..spikes * 2 {
        let ang = std::f32::consts::PI * i as f32 / spikes as f32;
        let rr = if i % 2 == 0 { r } else { r * 0.45 };
        points.push(center + Vec2::new(ang.cos() * rr, ang.sin() * rr));
    }
    // Star polygons are not convex, so fill with a disc and stroke the rim.
    canvas.circle(center, r * 0.5, color);
    canvas.polyline(
        points.iter().copied().chain(points.first().copied()).collect(),
        2.0,
        Color32::BLACK,
    );
}

impl Microgame for SpaceSorter {
    fn reset(&mut self, ctx: &mut GameCtx) {
        self.sorted = false;
        self.bong_at_ms = None;
        self.grief = Vec2::new(ctx.view.x * 0.45, ctx.view.y * 0.5);
        self.mayo = Vec2::new(ctx.view.x * 0.55, ctx.view.y * 0.5);
    }

    fn frame(&mut self, canvas: &Canvas, _input: &InputState, ctx: &mut GameCtx, _elapsed_ms: u64) {
        canvas.fill(Color32::from_rgb(70, 240, 90));
        canvas.line(canvas.at(0.5, 0.2), canvas.at(0.5, 0.8), 3.0, Color32::BLACK);

        let unit = canvas.min_dim();
        spiky(
            canvas,
            self.grief.to_pos2(),
            unit * 0.1,
            11,
            Color32::from_rgb(240, 40, 40),
        );
        canvas.text_outlined(
            (self.grief - Vec2::new(0.0, unit * 0.12)).to_pos2(),
            unit * 0.05,
            Color32::BLACK,
            Color32::WHITE,
            "GRIEF",
        );

        let mayo = self.mayo.to_pos2();
        canvas.circle(mayo, unit * 0.085, Color32::from_rgb(255, 245, 120));
        canvas.circle(
            mayo - Vec2::new(10.0, 10.0),
            8.0,
            Color32::from_rgba_unmultiplied(255, 255, 200, 180),
        );
        canvas.text_outlined(
            mayo + Vec2::new(0.0, unit * 0.12),
            unit * 0.05,
            Color32::BLACK,
            Color32::WHITE,
            "MAYONNAISE",
        );

        canvas.text_outlined(
            canvas.at(0.5, 0.12),
            unit * 0.045,
            Color32::BLACK,
            Color32::WHITE,
            "Give them Space.",
        );

        if let Some(at) = self.bong_at_ms {
            if self.sorted && ctx.now_ms.saturating_sub(at) < BONG_FLASH_MS {
                canvas.text_outlined(
                    canvas.at(0.5, 0.35),
                    unit * 0.16,
                    Color32::WHITE,
                    Color32::BLACK,
                    "BONG!",
                );
            }
        }
    }

    fn on_event(&mut self, event: &InputEvent, ctx: &mut GameCtx) {
        if matches!(event, InputEvent::KeyPressed(Key::Space)) && !self.sorted {
            self.sorted = true;
            self.bong_at_ms = Some(ctx.now_ms);
            self.grief = Vec2::new(ctx.view.x * 0.2, ctx.view.y * 0.5);
            self.mayo = Vec2::new(ctx.view.x * 0.8, ctx.view.y * 0.5);
            ctx.audio.play_one_shot(keys::GAVEL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_separates_exactly_once() {
        let mut rig = super::super::TestRig::new();
        let mut game = SpaceSorter::default();
        game.reset(&mut rig.ctx(0));
        assert!((game.grief.x - 360.0).abs() < 0.01);

        game.on_event(&InputEvent::KeyPressed(Key::Space), &mut rig.ctx(100));
        assert!(game.sorted);
        assert_eq!(game.bong_at_ms, Some(100));
        assert!((game.grief.x - 160.0).abs() < 0.01);
        assert!((game.mayo.x - 640.0).abs() < 0.01);

        // A second press is ignored; the bong timestamp stays put.
        game.on_event(&InputEvent::KeyPressed(Key::Space), &mut rig.ctx(200));
        assert_eq!(game.bong_at_ms, Some(100));
    }

    #[test]
    fn other_keys_do_nothing() {
        let mut rig = super::super::TestRig::new();
        let mut game = SpaceSorter::default();
        game.reset(&mut rig.ctx(0));
        game.on_event(&InputEvent::KeyPressed(Key::G), &mut rig.ctx(10));
        assert!(!game.sorted);
    }
}
