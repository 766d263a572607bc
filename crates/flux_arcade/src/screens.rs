//! Non-game screens: the start screen, the two-column select menu, the
//! NEXT! transition card, the objective caption, and the footer ribbon.

use egui::{Color32, Pos2, Rect, Vec2};

use flux_core::catalog::Catalog;
use flux_core::session;

use crate::canvas::Canvas;
use crate::games::wobble;

/// Keyboard cursor for the select menu. Row geometry is not cached here;
/// both drawing and hit-testing derive it from the current view size, so a
/// resize can never leave a pointer click against a stale layout.
pub struct MenuState {
    pub cursor: usize,
}

impl MenuState {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let len = len as isize;
        self.cursor = ((self.cursor as isize + delta).rem_euclid(len)) as usize;
    }
}

/// Rect of menu entry `index` in a view of the given size. Shared by the
/// draw pass and `hit_menu_row` so the two always agree on layout.
pub fn menu_row_rect(view: Vec2, index: usize) -> Rect {
    let list_top = view.y * 0.34;
    let row_h = (view.y * 0.08).min(72.0);
    let item_w = (view.x * 0.7).min(720.0);
    let left = (view.x - item_w) * 0.5;
    let col_gap = 24.0;
    let margin = 10.0;
    let available = (view.x - margin) - left;
    let fitted_w = ((available - col_gap) * 0.5).min(item_w).max(80.0);
    let col = (index % 2) as f32;
    let row = (index / 2) as f32;
    let x = left + col * (fitted_w + col_gap);
    let y = list_top + row * (row_h + 12.0);
    Rect::from_min_size(Pos2::new(x, y - row_h * 0.5), Vec2::new(fitted_w, row_h))
}

/// Index of the menu row under the pointer, for the current view size.
pub fn hit_menu_row(view: Vec2, len: usize, x: f32, y: f32) -> Option<usize> {
    (0..len).find(|&i| menu_row_rect(view, i).contains(Pos2::new(x, y)))
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new()
    }
}

/// Start button layout, shared by the draw pass and the hit test.
pub fn start_button_rect(view: Vec2) -> Rect {
    let bw = (view.x * 0.5).min(360.0);
    let bh = (view.y * 0.09).clamp(56.0, 80.0);
    Rect::from_center_size(Pos2::new(view.x * 0.5, view.y * 0.55), Vec2::new(bw, bh))
}

pub fn draw_start_screen(canvas: &Canvas, pointer: (f32, f32)) {
    canvas.fill(Color32::from_rgb(18, 22, 38));

    canvas.text_outlined(
        canvas.at(0.5, 0.35),
        canvas.min_dim() * 0.07,
        Color32::WHITE,
        Color32::BLACK,
        "FOUR-SECOND FLUX",
    );

    let btn = start_button_rect(Vec2::new(canvas.width(), canvas.height()));
    let hover = btn.contains(Pos2::new(pointer.0, pointer.1));
    let fill = if hover {
        Color32::from_rgb(80, 220, 150)
    } else {
        Color32::from_rgb(60, 190, 120)
    };
    canvas.rect_filled(btn, 14, fill);
    canvas.text(btn.center(), 28.0, Color32::BLACK, "Press to Start");

    canvas.text(
        Pos2::new(canvas.width() * 0.5, btn.bottom() + 40.0),
        canvas.min_dim() * 0.03,
        Color32::from_gray(230),
        "Press Enter to start",
    );
}

/// Draw the two-column menu.
pub fn draw_menu(canvas: &Canvas, catalog: &Catalog, menu: &MenuState, pointer: (f32, f32)) {
    canvas.fill(Color32::from_rgb(18, 22, 38));

    canvas.text_outlined(
        canvas.at(0.5, 0.18),
        canvas.min_dim() * 0.048,
        Color32::WHITE,
        Color32::BLACK,
        "Select A Micro-Game",
    );
    canvas.text(
        canvas.at(0.5, 0.26),
        canvas.min_dim() * 0.025,
        Color32::from_gray(230),
        "Click an option, or use Up/Down and Enter.  Press TAB to return.",
    );

    let view = Vec2::new(canvas.width(), canvas.height());
    let hover = Pos2::new(pointer.0, pointer.1);

    for (i, entry) in catalog.entries().iter().enumerate() {
        let rect = menu_row_rect(view, i);

        let selected = i == menu.cursor;
        let hovered = rect.contains(hover);
        let fill = if selected {
            Color32::from_rgb(70, 90, 160)
        } else if hovered {
            Color32::from_rgb(55, 66, 110)
        } else {
            Color32::from_rgb(40, 48, 80)
        };
        canvas.rect_filled(rect, 12, fill);
        canvas.text_left(
            Pos2::new(rect.left() + 40.0, rect.center().y),
            canvas.min_dim() * 0.024,
            Color32::WHITE,
            &format!("ID {} - {}", entry.id.0, entry.name),
        );
    }
}

pub fn draw_transition(canvas: &Canvas, now_ms: u64) {
    canvas.fill(Color32::from_rgb(20, 20, 40));
    let color = Color32::from_rgb(
        (180.0 + 75.0 * wobble(now_ms, 18.0, 0.0)) as u8,
        (100.0 + 155.0 * wobble(now_ms, 30.0, 1.2)).clamp(0.0, 255.0) as u8,
        240,
    );
    canvas.text_outlined(
        canvas.center(),
        canvas.min_dim() * 0.12,
        color,
        Color32::WHITE,
        "NEXT!",
    );
}

/// Objective caption, fading out over the first 1.1 s of a round.
pub fn draw_caption(canvas: &Canvas, objective: &str, elapsed_ms: u64) {
    let alpha = session::caption_alpha(elapsed_ms);
    if alpha <= 0.0 {
        return;
    }
    let a = (alpha * 255.0) as u8;
    canvas.text_outlined(
        canvas.at(0.5, 0.52),
        canvas.min_dim() * 0.06,
        Color32::from_rgba_unmultiplied(255, 255, 255, a),
        Color32::from_rgba_unmultiplied(0, 0, 0, a),
        objective,
    );
}

pub fn draw_footer(canvas: &Canvas) {
    let bar = Rect::from_min_size(
        Pos2::new(0.0, canvas.height() - 36.0),
        Vec2::new(canvas.width(), 36.0),
    );
    canvas.rect_filled(bar, 0, Color32::from_rgba_unmultiplied(0, 0, 0, 30));
    canvas.text(
        bar.center(),
        16.0,
        Color32::WHITE,
        "ABSURDIST MICRO-GAMES \u{2022} Press TAB for Menu \u{2022} No score. No failure. Only nonsense.",
    );
}
