//! slowPDF application
//!
//! Toolbar on top (open button, document title, page counter, arrows),
//! the page canvas below with its own scrollbar, and a status line.
//! Clicking the canvas toggles zoom; the wheel scrolls.

use crate::config::ViewerConfig;
use crate::extract::ExtractOptions;
use crate::picker;
use crate::viewer::{centered_origin, fit_size, Viewer};
use crate::worker::{LoadOutcome, Loader};
use egui::{
    Align, ColorImage, Context, Key, Layout, Pos2, Rect, RichText, Sense, TextureHandle,
    TextureOptions, Vec2,
};
use image::imageops::{self, FilterType};
use slowcore::repaint::RepaintController;
use slowcore::storage::display_name;
use slowcore::theme::{consume_special_keys, SlowColors};
use slowcore::widgets::{
    badge, status_bar, vertical_scrollbar, ArrowButton, ArrowDirection, SCROLLBAR_WIDTH,
};
use slowcore::SlowTheme;
use std::path::PathBuf;

/// The one resized page currently uploaded to the GPU
struct RenderedPage {
    generation: u64,
    page: usize,
    size: (u32, u32),
    texture: TextureHandle,
}

/// Toolbar and keyboard requests, applied after the UI pass
#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Open,
    NextPage,
    PreviousPage,
    ToggleZoom,
    ScrollBy(f32),
    ScrollTop,
    ScrollBottom,
}

pub struct SlowPdfApp {
    repaint: RepaintController,
    viewer: Viewer,
    loader: Loader,
    /// Bumped on every successful load so a stale texture is never reused
    generation: u64,
    rendered: Option<RenderedPage>,
    /// Error from the last load attempt, shown until dismissed
    error: Option<String>,
}

impl SlowPdfApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig, initial_path: Option<PathBuf>) -> Self {
        let loader = Loader::new(ExtractOptions::from(&config));
        let mut app = Self {
            viewer: Viewer::new(config.zoom_factor, config.scroll_step),
            repaint: RepaintController::new(),
            loader,
            generation: 0,
            rendered: None,
            error: None,
        };

        if let Some(path) = initial_path {
            if picker::is_pdf(&path) {
                app.load_pdf(&cc.egui_ctx, path);
            } else {
                tracing::warn!("ignoring {}: not a PDF", path.display());
            }
        }
        app
    }

    fn open_dialog(&mut self, ctx: &Context) {
        let start_dir = self
            .viewer
            .document()
            .and_then(|doc| doc.path.parent())
            .map(|p| p.to_path_buf());
        if let Some(path) = picker::pick_pdf(start_dir.as_deref()) {
            self.load_pdf(ctx, path);
        }
    }

    /// Kick off a background load. The current document stays up until the
    /// new one is ready.
    fn load_pdf(&mut self, ctx: &Context, path: PathBuf) {
        tracing::info!("loading {}", path.display());
        let ctx = ctx.clone();
        self.loader.start(path, move || ctx.request_repaint());
        self.repaint.set_polling(true);
    }

    fn finish_load(&mut self, outcome: LoadOutcome) {
        self.repaint.set_polling(self.loader.is_loading());
        self.repaint.mark_needs_repaint();
        match self.viewer.apply_outcome(outcome) {
            Ok(()) => {
                self.generation += 1;
                self.rendered = None;
                self.error = None;
            }
            Err(message) => self.error = Some(message),
        }
    }

    fn apply(&mut self, ctx: &Context, action: Action) {
        match action {
            Action::Open => self.open_dialog(ctx),
            Action::NextPage => {
                self.viewer.next_page();
            }
            Action::PreviousPage => {
                self.viewer.previous_page();
            }
            Action::ToggleZoom => {
                if self.viewer.has_document() {
                    self.viewer.toggle_zoom();
                }
            }
            Action::ScrollBy(delta) => self.viewer.scroll(delta),
            Action::ScrollTop => self.viewer.scroll_to_top(),
            Action::ScrollBottom => self.viewer.scroll_to_bottom(),
        }
    }

    fn handle_keyboard(&mut self, ctx: &Context) -> Vec<Action> {
        consume_special_keys(ctx);
        ctx.input(|i| {
            let mut actions = Vec::new();
            if i.modifiers.command && i.key_pressed(Key::O) {
                actions.push(Action::Open);
            }
            if i.key_pressed(Key::ArrowRight) {
                actions.push(Action::NextPage);
            }
            if i.key_pressed(Key::ArrowLeft) {
                actions.push(Action::PreviousPage);
            }
            if i.key_pressed(Key::Z) && !i.modifiers.command {
                actions.push(Action::ToggleZoom);
            }
            if i.key_pressed(Key::ArrowUp) {
                actions.push(Action::ScrollBy(1.0));
            }
            if i.key_pressed(Key::ArrowDown) {
                actions.push(Action::ScrollBy(-1.0));
            }
            if i.key_pressed(Key::Home) {
                actions.push(Action::ScrollTop);
            }
            if i.key_pressed(Key::End) {
                actions.push(Action::ScrollBottom);
            }
            actions
        })
    }

    fn handle_dropped_files(&mut self, ctx: &Context) {
        let dropped: Option<PathBuf> = ctx.input(|i| {
            i.raw.dropped_files.first().and_then(|f| f.path.clone())
        });
        if let Some(path) = dropped {
            if picker::is_pdf(&path) {
                self.load_pdf(ctx, path);
            } else {
                tracing::debug!("ignoring dropped file {}", path.display());
            }
        }
    }

    fn render_toolbar(&self, ui: &mut egui::Ui) -> Option<Action> {
        let mut action = None;
        ui.horizontal(|ui| {
            if ui.button("Open PDF").clicked() {
                action = Some(Action::Open);
            }
            ui.add_space(20.0);
            ui.label(RichText::new(self.viewer.title_label()).heading().strong());

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let next = ArrowButton::new(ArrowDirection::Right).enabled(self.viewer.can_go_next());
                if ui.add(next).clicked() {
                    action = Some(Action::NextPage);
                }
                let prev = ArrowButton::new(ArrowDirection::Left).enabled(self.viewer.can_go_previous());
                if ui.add(prev).clicked() {
                    action = Some(Action::PreviousPage);
                }
                badge(ui, &self.viewer.page_label());
            });
        });
        action
    }

    fn render_canvas(&mut self, ui: &mut egui::Ui) {
        let full = ui.available_rect_before_wrap();
        let canvas = Rect::from_min_max(full.min, Pos2::new(full.max.x - SCROLLBAR_WIDTH, full.max.y));
        let track = Rect::from_min_max(Pos2::new(canvas.max.x, full.min.y), full.max);

        let response = ui.allocate_rect(canvas, Sense::click());
        if response.clicked() && self.viewer.has_document() {
            self.viewer.toggle_zoom();
        }
        if response.hovered() {
            let wheel = ui.input(|i| i.raw_scroll_delta.y);
            self.viewer.scroll_points(wheel);
        }

        let painter = ui.painter_at(canvas);
        painter.rect_filled(canvas, 0.0, SlowColors::CANVAS);

        if !self.ensure_page_texture(ui.ctx(), canvas.size()) {
            self.viewer.set_viewport(0.0, canvas.height());
            return;
        }
        let Some(rendered) = &self.rendered else { return };

        let ppp = ui.ctx().pixels_per_point();
        let size = Vec2::new(rendered.size.0 as f32 / ppp, rendered.size.1 as f32 / ppp);
        self.viewer.set_viewport(size.y, canvas.height());

        let (x, y) = centered_origin(
            (size.x, size.y),
            (canvas.width(), canvas.height()),
            self.viewer.scroll_offset(),
        );
        let image_rect = Rect::from_min_size(canvas.min + Vec2::new(x, y), size);
        painter.image(
            rendered.texture.id(),
            image_rect,
            Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        if let Some(offset) = vertical_scrollbar(
            ui,
            track,
            self.viewer.scroll_offset(),
            size.y,
            canvas.height(),
        ) {
            self.viewer.scroll_to(offset);
        }
    }

    /// Make sure the current page is uploaded at the size the canvas wants.
    /// Resizes from the full-resolution bitmap whenever the page or target
    /// size changes. Returns false when there is nothing to draw.
    fn ensure_page_texture(&mut self, ctx: &Context, canvas: Vec2) -> bool {
        let Some(bitmap) = self.viewer.current_bitmap() else {
            self.rendered = None;
            return false;
        };

        let ppp = ctx.pixels_per_point();
        let target = fit_size(
            bitmap.dimensions(),
            (canvas.x * ppp, canvas.y * ppp),
            self.viewer.zoom(),
        );
        let page = self.viewer.current_page();
        let fresh = self.rendered.as_ref().is_some_and(|r| {
            r.generation == self.generation && r.page == page && r.size == target
        });
        if fresh {
            return true;
        }

        let resized = imageops::resize(bitmap, target.0, target.1, FilterType::Lanczos3);
        let color_image = ColorImage::from_rgb(
            [resized.width() as usize, resized.height() as usize],
            resized.as_raw(),
        );
        let texture = ctx.load_texture("pdf_page", color_image, TextureOptions::LINEAR);
        tracing::debug!("page {} drawn at {}x{}", page + 1, target.0, target.1);
        self.rendered = Some(RenderedPage {
            generation: self.generation,
            page,
            size: target,
            texture,
        });
        true
    }

    fn render_error(&mut self, ctx: &Context) -> Option<Action> {
        let message = self.error.clone()?;
        let mut action = None;
        egui::Window::new("error")
            .collapsible(false)
            .resizable(false)
            .default_width(360.0)
            .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(&message);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("ok").clicked() {
                        self.error = None;
                    }
                    if ui.button("open another file").clicked() {
                        self.error = None;
                        action = Some(Action::Open);
                    }
                });
            });
        action
    }

    fn status_text(&self) -> String {
        if let Some(path) = self.loader.loading_path() {
            return format!("loading {}...", display_name(path));
        }
        if let Some(ref err) = self.error {
            return format!("error: {}", err);
        }
        match self.viewer.document() {
            Some(doc) => format!(
                "{}  |  page {}/{}{}",
                display_name(&doc.path),
                self.viewer.current_page() + 1,
                doc.page_count(),
                if self.viewer.is_zoomed() { "  |  zoomed" } else { "" },
            ),
            None => "no file loaded  |  ⌘O to open".to_string(),
        }
    }
}

impl eframe::App for SlowPdfApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.repaint.begin_frame(ctx);

        if let Some(outcome) = self.loader.poll() {
            self.finish_load(outcome);
        }
        self.handle_dropped_files(ctx);

        let mut actions = self.handle_keyboard(ctx);

        egui::TopBottomPanel::top("toolbar")
            .frame(SlowTheme::toolbar_frame())
            .show(ctx, |ui| {
                if let Some(action) = self.render_toolbar(ui) {
                    actions.push(action);
                }
            });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            status_bar(ui, &self.status_text());
        });

        egui::CentralPanel::default()
            .frame(SlowTheme::canvas_frame())
            .show(ctx, |ui| {
                slowcore::safety::catch_or((), || self.render_canvas(ui));
            });

        if let Some(action) = self.render_error(ctx) {
            actions.push(action);
        }

        if !actions.is_empty() {
            for action in actions {
                self.apply(ctx, action);
            }
            self.repaint.mark_needs_repaint();
        }

        self.repaint.end_frame(ctx);
    }
}
