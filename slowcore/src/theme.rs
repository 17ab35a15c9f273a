//! slowPDF theme: dark reading room
//!
//! A near-black canvas under the page so the paper stands out, a slightly
//! lighter toolbar, and white text. Flat: no rounding, no soft shadows.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

/// The fixed palette. There is no light mode.
pub struct SlowColors;

impl SlowColors {
    pub const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BLACK: Color32 = Color32::from_rgb(0, 0, 0);
    /// Behind the page.
    pub const CANVAS: Color32 = Color32::from_rgb(0x2c, 0x2c, 0x2c);
    /// Toolbar and window fill.
    pub const PANEL: Color32 = Color32::from_rgb(0x21, 0x21, 0x21);
    /// Buttons at rest.
    pub const BUTTON: Color32 = Color32::from_rgb(0x1f, 0x53, 0x8d);
    /// Buttons under the pointer.
    pub const BUTTON_HOVER: Color32 = Color32::from_rgb(0x14, 0x37, 0x5e);
    pub const OUTLINE: Color32 = Color32::from_rgb(0x56, 0x56, 0x56);
    /// Disabled glyphs.
    pub const MUTED: Color32 = Color32::from_rgb(0x80, 0x80, 0x80);
}

/// Theme configuration
pub struct SlowTheme {
    pub font_size_body: f32,
    pub font_size_title: f32,
    pub font_size_button: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for SlowTheme {
    fn default() -> Self {
        Self {
            font_size_body: 18.0,
            font_size_title: 20.0,
            font_size_button: 20.0,
            font_size_small: 12.0,
            window_padding: 10.0,
            item_spacing: 10.0,
        }
    }
}

impl SlowTheme {
    /// Apply the theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_button, FontFamily::Monospace)),
            (TextStyle::Heading, FontId::new(self.font_size_title, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::dark();

        visuals.window_fill = SlowColors::PANEL;
        visuals.panel_fill = SlowColors::PANEL;
        visuals.extreme_bg_color = SlowColors::CANVAS;
        visuals.override_text_color = Some(SlowColors::WHITE);

        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        visuals.window_stroke = Stroke::new(1.0, SlowColors::OUTLINE);

        let flat = |ws: &mut egui::style::WidgetVisuals, fill: Color32| {
            ws.bg_fill = fill;
            ws.weak_bg_fill = fill;
            ws.bg_stroke = Stroke::NONE;
            ws.fg_stroke = Stroke::new(1.0, SlowColors::WHITE);
            ws.rounding = Rounding::same(6.0);
        };
        flat(&mut visuals.widgets.inactive, SlowColors::BUTTON);
        flat(&mut visuals.widgets.hovered, SlowColors::BUTTON_HOVER);
        flat(&mut visuals.widgets.active, SlowColors::BUTTON_HOVER);
        flat(&mut visuals.widgets.open, SlowColors::BUTTON_HOVER);

        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        style.visuals = visuals;

        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(12.0, 7.0);

        ctx.set_style(style);
    }

    /// Toolbar strip above the canvas
    pub fn toolbar_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(SlowColors::PANEL)
            .inner_margin(egui::Margin::symmetric(10.0, 10.0))
    }

    /// The page canvas: flat dark fill, no margin
    pub fn canvas_frame() -> egui::Frame {
        egui::Frame::none().fill(SlowColors::CANVAS)
    }
}

/// Consume Cmd+/Cmd- so egui's built-in UI scaling never fights the
/// viewer's own zoom. Call at the start of `update()`.
pub fn consume_special_keys(ctx: &egui::Context) {
    ctx.input_mut(|i| {
        i.events.retain(|event| {
            !matches!(
                event,
                egui::Event::Key { key, modifiers, .. }
                    if modifiers.command
                        && matches!(key, egui::Key::Plus | egui::Key::Minus | egui::Key::Equals)
            )
        });
    });
}
