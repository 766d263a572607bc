//! Thin drawing facade over an egui [`Painter`](egui::Painter).
//!
//! Microgames draw in logical pixels against the full window rect. Helpers
//! here keep the game code free of egui plumbing (font ids, align anchors,
//! stroke construction) and provide the fractional coordinate helpers the
//! games lean on for resolution independence.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};

pub struct Canvas<'a> {
    painter: &'a Painter,
    rect: Rect,
}

impl<'a> Canvas<'a> {
    pub fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn width(&self) -> f32 {
        self.rect.width()
    }

    pub fn height(&self) -> f32 {
        self.rect.height()
    }

    /// Shorter window edge, the base unit for font and sprite sizing.
    pub fn min_dim(&self) -> f32 {
        self.rect.width().min(self.rect.height())
    }

    pub fn center(&self) -> Pos2 {
        self.rect.center()
    }

    /// Point at the given fractions of the canvas width and height.
    pub fn at(&self, fx: f32, fy: f32) -> Pos2 {
        Pos2::new(
            self.rect.left() + self.rect.width() * fx,
            self.rect.top() + self.rect.height() * fy,
        )
    }

    pub fn fill(&self, color: Color32) {
        self.painter
            .rect_filled(self.rect, egui::CornerRadius::ZERO, color);
    }

    pub fn rect_filled(&self, rect: Rect, rounding: u8, color: Color32) {
        self.painter
            .rect_filled(rect, egui::CornerRadius::same(rounding), color);
    }

    pub fn rect_stroke(&self, rect: Rect, rounding: u8, width: f32, color: Color32) {
        self.painter.rect_stroke(
            rect,
            egui::CornerRadius::same(rounding),
            Stroke::new(width, color),
            egui::StrokeKind::Middle,
        );
    }

    pub fn circle(&self, center: Pos2, radius: f32, color: Color32) {
        self.painter.circle_filled(center, radius, color);
    }

    pub fn circle_stroke(&self, center: Pos2, radius: f32, width: f32, color: Color32) {
        self.painter
            .circle_stroke(center, radius, Stroke::new(width, color));
    }

    pub fn line(&self, a: Pos2, b: Pos2, width: f32, color: Color32) {
        self.painter
            .line_segment([a, b], Stroke::new(width, color));
    }

    pub fn polyline(&self, points: Vec<Pos2>, width: f32, color: Color32) {
        self.painter
            .add(egui::Shape::line(points, Stroke::new(width, color)));
    }

    pub fn polygon(&self, points: Vec<Pos2>, fill: Color32, stroke_width: f32, stroke: Color32) {
        self.painter.add(egui::Shape::convex_polygon(
            points,
            fill,
            Stroke::new(stroke_width, stroke),
        ));
    }

    /// Centered text, the default register for microgame captions.
    pub fn text(&self, pos: Pos2, size: f32, color: Color32, text: &str) {
        self.painter.text(
            pos,
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(size),
            color,
        );
    }

    pub fn text_left(&self, pos: Pos2, size: f32, color: Color32, text: &str) {
        self.painter.text(
            pos,
            Align2::LEFT_CENTER,
            text,
            FontId::proportional(size),
            color,
        );
    }

    /// Text with a four-offset outline pass behind it, for captions that
    /// must stay readable over arbitrary game art.
    pub fn text_outlined(
        &self,
        pos: Pos2,
        size: f32,
        fill: Color32,
        outline: Color32,
        text: &str,
    ) {
        let o = (size * 0.06).max(1.0);
        for offset in [
            Vec2::new(-o, 0.0),
            Vec2::new(o, 0.0),
            Vec2::new(0.0, -o),
            Vec2::new(0.0, o),
        ] {
            self.painter.text(
                pos + offset,
                Align2::CENTER_CENTER,
                text,
                FontId::proportional(size),
                outline,
            );
        }
        self.painter.text(
            pos,
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(size),
            fill,
        );
    }

    pub fn image(&self, texture: &egui::TextureHandle, rect: Rect) {
        self.painter.image(
            texture.id(),
            rect,
            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );
    }
}
