//! The multiplying terms: legal boilerplate spawns every 80 ms until the
//! screen drowns in it. Holding Space freezes the swarm blue and runs the
//! droning loop, capped at three seconds per hold.

use egui::{Color32, Pos2};
use rand::Rng;

use flux_core::input::{InputEvent, InputState, Key};

use crate::assets;
use crate::canvas::Canvas;

use super::{GameCtx, Microgame};

const SPAWN_INTERVAL_MS: u64 = 80;
const MAX_SNIPPETS: usize = 240;
const HOLD_CAP_MS: u64 = 3_000;

const LEGAL_LINES: [&str; 30] = [
    "LIMITED LIABILITY NOTICE",
    "NON-DISCLOSURE ACKNOWLEDGED",
    "FOR INTERNAL USE ONLY",
    "USER CONSENT PENDING",
    "INTELLECTUAL PROPERTY CLAIM",
    "VOID WHERE PROHIBITED",
    "SUBJECT TO AUDIT",
    "LICENSE AGREEMENT EXPIRED",
    "TERMINATION CLAUSE ACTIVE",
    "FORCE MAJEURE INVOKED",
    "CONTRACTUAL OBLIGATION LOOP",
    "THIRD-PARTY DATA SHARING",
    "INDEMNIFICATION REQUIRED",
    "CONFIDENTIALITY BREACH REPORTED",
    "DISPUTE RESOLUTION IN PROGRESS",
    "PATENT PENDING PERPETUITY",
    "WAIVER OF RIGHTS ACCEPTED",
    "JURISDICTION: UNKNOWN",
    "RETENTION POLICY ENABLED",
    "FINAL SETTLEMENT OFFER",
    "NOTICE OF COMPLIANCE FAILURE",
    "MANDATORY UPDATE ENFORCED",
    "CONSENT FORM OUTDATED",
    "SECTION 404 UNAVAILABLE",
    "NON-COMPETE ACTIVATED",
    "EXCLUSIVITY AGREEMENT VIOLATED",
    "TERMS SUBJECT TO CHANGE",
    "PERPETUAL LICENSE GRANTED",
    "CLAUSE 9.3(B) DISPUTED",
    "CONSUMER RIGHTS OVERRIDDEN",
];

struct Snippet {
    x: f32,
    y: f32,
    line: &'static str,
    size: f32,
    dies_at_ms: u64,
}

#[derive(Default)]
pub struct LegalSkimmer {
    snippets: Vec<Snippet>,
    last_spawn_ms: u64,
}

impl Microgame for LegalSkimmer {
    fn reset(&mut self, ctx: &mut GameCtx) {
        self.snippets.clear();
        self.last_spawn_ms = ctx.now_ms;
    }

    fn frame(&mut self, canvas: &Canvas, input: &InputState, ctx: &mut GameCtx, _elapsed_ms: u64) {
        canvas.fill(Color32::from_rgb(248, 250, 255));

        let holding = input.is_held(Key::Space);
        let now = ctx.now_ms;

        // The drone only plays while held, and cuts out after three seconds
        // even if Space stays down.
        ctx.audio
            .hold_loop(assets::BG_LEGAL, holding, now, Some(HOLD_CAP_MS));

        if !holding && now.saturating_sub(self.last_spawn_ms) > SPAWN_INTERVAL_MS {
            self.last_spawn_ms = now;
            self.snippets.push(Snippet {
                x: ctx.rng.gen_range(0.0..canvas.width()),
                y: ctx.rng.gen_range(0.0..canvas.height()),
                line: LEGAL_LINES[ctx.rng.gen_range(0..LEGAL_LINES.len())],
                size: ctx.rng.gen_range(14.0..28.0),
                dies_at_ms: now + ctx.rng.gen_range(1_500..4_000),
            });
            if self.snippets.len() > MAX_SNIPPETS {
                self.snippets.remove(0);
            }
        }

        self.snippets.retain(|s| s.dies_at_ms > now);
        let ink = if holding {
            Color32::from_rgb(60, 160, 255)
        } else {
            Color32::from_rgb(10, 10, 10)
        };
        for s in &self.snippets {
            canvas.text(Pos2::new(s.x, s.y), s.size, ink, s.line);
        }

        canvas.text_outlined(
            canvas.at(0.5, 0.12),
            canvas.min_dim() * 0.045,
            Color32::from_gray(20),
            Color32::WHITE,
            "THE TERMS ARE MULTIPLYING - HOLD SPACE TO FREEZE THEM",
        );
    }

    fn on_event(&mut self, _event: &InputEvent, _ctx: &mut GameCtx) {
        // Space is read as held state in frame(); no discrete handling.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_count_stays_capped() {
        let mut game = LegalSkimmer::default();
        for _ in 0..(MAX_SNIPPETS + 20) {
            game.snippets.push(Snippet {
                x: 0.0,
                y: 0.0,
                line: LEGAL_LINES[0],
                size: 14.0,
                dies_at_ms: u64::MAX,
            });
            if game.snippets.len() > MAX_SNIPPETS {
                game.snippets.remove(0);
            }
        }
        assert_eq!(game.snippets.len(), MAX_SNIPPETS);
    }

    #[test]
    fn reset_restarts_spawn_timing() {
        let mut rig = super::super::TestRig::new();
        let mut game = LegalSkimmer::default();
        game.snippets.push(Snippet {
            x: 0.0,
            y: 0.0,
            line: LEGAL_LINES[0],
            size: 14.0,
            dies_at_ms: u64::MAX,
        });
        game.reset(&mut rig.ctx(5_000));
        assert!(game.snippets.is_empty());
        assert_eq!(game.last_spawn_ms, 5_000);
    }
}
