//! Custom widgets, flat and dark, drawn with the painter

use crate::theme::SlowColors;
use egui::{Color32, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2, Widget};

/// Which way an [`ArrowButton`] points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    Left,
    Right,
}

/// Square button with a painted triangle, for page navigation.
pub struct ArrowButton {
    direction: ArrowDirection,
    size: f32,
    enabled: bool,
}

impl ArrowButton {
    pub fn new(direction: ArrowDirection) -> Self {
        Self { direction, size: 40.0, enabled: true }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Widget for ArrowButton {
    fn ui(self, ui: &mut Ui) -> Response {
        let sense = if self.enabled { Sense::click() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(self.size), sense);

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let fill = if self.enabled && response.hovered() {
                SlowColors::BUTTON_HOVER
            } else {
                SlowColors::BUTTON
            };
            painter.rect_filled(rect, 6.0, fill);

            let glyph = if self.enabled { SlowColors::WHITE } else { SlowColors::MUTED };
            let c = rect.center();
            let h = self.size * 0.22;
            let points = match self.direction {
                ArrowDirection::Left => vec![
                    Pos2::new(c.x - h, c.y),
                    Pos2::new(c.x + h * 0.8, c.y - h),
                    Pos2::new(c.x + h * 0.8, c.y + h),
                ],
                ArrowDirection::Right => vec![
                    Pos2::new(c.x + h, c.y),
                    Pos2::new(c.x - h * 0.8, c.y + h),
                    Pos2::new(c.x - h * 0.8, c.y - h),
                ],
            };
            painter.add(egui::Shape::convex_polygon(points, glyph, Stroke::NONE));
        }

        response
    }
}

/// Label on a black badge, used for the page counter.
pub fn badge(ui: &mut Ui, text: &str) -> Response {
    egui::Frame::none()
        .fill(SlowColors::BLACK)
        .inner_margin(egui::Margin::symmetric(10.0, 5.0))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).color(SlowColors::WHITE));
        })
        .response
}

/// Status bar: panel fill, thin top border
pub fn status_bar(ui: &mut Ui, text: &str) {
    egui::Frame::none()
        .fill(SlowColors::PANEL)
        .stroke(Stroke::new(1.0, SlowColors::OUTLINE))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).small());
        });
}

/// Width of the scrollbar track in points.
pub const SCROLLBAR_WIDTH: f32 = 12.0;

/// Thumb rectangle for a vertical scrollbar, or `None` when the content
/// fits and there is nothing to scroll.
pub fn scrollbar_thumb(track: Rect, offset: f32, content_height: f32, viewport_height: f32) -> Option<Rect> {
    let max_offset = content_height - viewport_height;
    if max_offset <= 0.0 || track.height() <= 0.0 {
        return None;
    }
    let thumb_h = (track.height() * viewport_height / content_height).max(SCROLLBAR_WIDTH);
    let travel = track.height() - thumb_h;
    let t = (offset / max_offset).clamp(0.0, 1.0);
    let top = track.min.y + travel * t;
    Some(Rect::from_min_size(
        Pos2::new(track.min.x, top),
        Vec2::new(track.width(), thumb_h),
    ))
}

/// Vertical scrollbar drawn into `track`. Returns the new offset when the
/// user dragged the thumb or clicked the track.
pub fn vertical_scrollbar(
    ui: &mut Ui,
    track: Rect,
    offset: f32,
    content_height: f32,
    viewport_height: f32,
) -> Option<f32> {
    let thumb = scrollbar_thumb(track, offset, content_height, viewport_height)?;
    let response = ui.interact(track, ui.id().with("vscroll"), Sense::click_and_drag());

    let painter = ui.painter_at(track);
    painter.rect_filled(track, 0.0, SlowColors::PANEL);
    let thumb_fill: Color32 = if response.hovered() || response.dragged() {
        SlowColors::WHITE
    } else {
        SlowColors::MUTED
    };
    painter.rect_filled(thumb.shrink(2.0), 4.0, thumb_fill);

    let max_offset = content_height - viewport_height;
    let travel = (track.height() - thumb.height()).max(1.0);

    if response.dragged() {
        let dy = response.drag_delta().y;
        if dy != 0.0 {
            return Some((offset + dy * max_offset / travel).clamp(0.0, max_offset));
        }
    } else if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let page = if pos.y < thumb.min.y { -viewport_height } else { viewport_height };
            return Some((offset + page).clamp(0.0, max_offset));
        }
    }
    None
}
