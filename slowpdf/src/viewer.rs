//! Viewer state
//!
//! The whole model behind the window: which document is open, which page
//! is showing, whether it is zoomed, and how far the canvas is scrolled.
//! The app owns one `Viewer`; the canvas reads it each frame and feeds the
//! drawn height back through [`Viewer::set_viewport`].

use crate::extract::Document;
use crate::title::title_label;
use crate::worker::LoadOutcome;
use image::RgbImage;
use slowcore::storage::display_name;

pub struct Viewer {
    document: Option<Document>,
    current_page: usize,
    zoomed: bool,
    zoom_factor: f32,
    scroll_offset: f32,
    scroll_step: f32,
    /// Height of the last drawn page and of the canvas, for clamping
    content_height: f32,
    viewport_height: f32,
}

impl Viewer {
    pub fn new(zoom_factor: f32, scroll_step: f32) -> Self {
        Self {
            document: None,
            current_page: 0,
            zoomed: false,
            zoom_factor,
            scroll_offset: 0.0,
            scroll_step,
            content_height: 0.0,
            viewport_height: 0.0,
        }
    }

    /// Replace the open document and reset cursor, zoom and scroll.
    /// Returns the document it replaced.
    pub fn load(&mut self, document: Document) -> Option<Document> {
        self.current_page = 0;
        self.zoomed = false;
        self.scroll_offset = 0.0;
        self.content_height = 0.0;
        self.document.replace(document)
    }

    /// Take a finished load. A success replaces the document. A failure
    /// leaves page, zoom and scroll untouched and returns the message to
    /// show the user.
    pub fn apply_outcome(&mut self, outcome: LoadOutcome) -> Result<(), String> {
        match outcome.result {
            Ok(document) => {
                tracing::info!(
                    "showing \"{}\" with {} pages",
                    document.title,
                    document.page_count()
                );
                self.load(document);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("failed to open {}: {}", outcome.path.display(), e);
                Err(format!("could not open {}: {}", display_name(&outcome.path), e))
            }
        }
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    pub fn page_count(&self) -> usize {
        self.document.as_ref().map_or(0, Document::page_count)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Bitmap under the cursor, full resolution
    pub fn current_bitmap(&self) -> Option<&RgbImage> {
        self.document.as_ref()?.pages.get(self.current_page)
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page + 1 < self.page_count()
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page > 0
    }

    /// Advance one page. Returns whether anything changed.
    pub fn next_page(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.current_page += 1;
        self.scroll_offset = 0.0;
        true
    }

    /// Go back one page. Returns whether anything changed.
    pub fn previous_page(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.current_page -= 1;
        self.scroll_offset = 0.0;
        true
    }

    pub fn toggle_zoom(&mut self) {
        self.zoomed = !self.zoomed;
        self.clamp_scroll();
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn zoom(&self) -> f32 {
        if self.zoomed { self.zoom_factor } else { 1.0 }
    }

    /// Scroll by one step per wheel notch. Positive `delta` is a wheel
    /// turned up, which moves the view towards the top of the page.
    pub fn scroll(&mut self, delta: f32) {
        if self.document.is_none() || delta == 0.0 {
            return;
        }
        let step = if delta > 0.0 { -self.scroll_step } else { self.scroll_step };
        self.scroll_to(self.scroll_offset + step);
    }

    /// Scroll by a raw wheel or trackpad delta in points, positive up.
    /// Trackpads send many small deltas per gesture, so the distance moved
    /// follows the delta rather than counting events.
    pub fn scroll_points(&mut self, points: f32) {
        if points == 0.0 {
            return;
        }
        self.scroll_to(self.scroll_offset - points);
    }

    pub fn scroll_to(&mut self, offset: f32) {
        if self.document.is_none() {
            return;
        }
        self.scroll_offset = offset;
        self.clamp_scroll();
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_to(0.0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_to(self.max_scroll());
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Record what the canvas drew so scrolling can be bounded.
    pub fn set_viewport(&mut self, content_height: f32, viewport_height: f32) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll());
    }

    /// "2/3 pages". Before anything is open this reads "1/1 pages".
    pub fn page_label(&self) -> String {
        match &self.document {
            Some(doc) => format!("{}/{} pages", self.current_page + 1, doc.page_count()),
            None => "1/1 pages".to_string(),
        }
    }

    /// "Report.pdf", or empty with no document
    pub fn title_label(&self) -> String {
        self.document
            .as_ref()
            .map(|doc| title_label(&doc.title))
            .unwrap_or_default()
    }
}

/// Fit `image` inside `canvas` keeping its aspect ratio, then scale by
/// `zoom`. Whichever side is the binding constraint fills the canvas.
/// Results are truncated to whole pixels and never below 1.
pub fn fit_size(image: (u32, u32), canvas: (f32, f32), zoom: f32) -> (u32, u32) {
    let (iw, ih) = (image.0.max(1) as f32, image.1.max(1) as f32);
    let (cw, ch) = (canvas.0.max(1.0), canvas.1.max(1.0));
    let image_ratio = iw / ih;
    let canvas_ratio = cw / ch;

    let (w, h) = if image_ratio > canvas_ratio {
        let w = (cw * zoom).floor();
        (w, (w / image_ratio).floor())
    } else {
        let h = (ch * zoom).floor();
        ((h * image_ratio).floor(), h)
    };
    ((w as u32).max(1), (h as u32).max(1))
}

/// Top-left corner of a `size` image centered in a `canvas`, shifted up by
/// the scroll offset. Oversized images overhang both edges evenly until
/// scrolled.
pub fn centered_origin(size: (f32, f32), canvas: (f32, f32), scroll_offset: f32) -> (f32, f32) {
    let x = (canvas.0 - size.0) / 2.0;
    let y = if size.1 > canvas.1 {
        -scroll_offset
    } else {
        (canvas.1 - size.1) / 2.0
    };
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{open_document, ExtractOptions};
    use crate::fixtures;
    use std::path::PathBuf;

    fn doc(pages: usize) -> Document {
        Document {
            pages: (0..pages).map(|_| RgbImage::new(200, 100)).collect(),
            title: "Report".to_string(),
            path: PathBuf::from("/tmp/report.pdf"),
        }
    }

    fn viewer_with(pages: usize) -> Viewer {
        let mut v = Viewer::new(1.5, 40.0);
        v.load(doc(pages));
        v
    }

    #[test]
    fn test_empty_viewer() {
        let mut v = Viewer::new(1.5, 40.0);
        assert!(!v.has_document());
        assert_eq!(v.page_label(), "1/1 pages");
        assert_eq!(v.title_label(), "");
        assert!(!v.next_page());
        assert!(!v.previous_page());
        assert_eq!(v.current_page(), 0);
        assert!(v.current_bitmap().is_none());
    }

    #[test]
    fn test_three_page_scenario() {
        let mut v = viewer_with(3);
        assert_eq!(v.page_label(), "1/3 pages");
        assert!(v.next_page());
        assert!(v.next_page());
        assert_eq!(v.page_label(), "3/3 pages");
        assert!(!v.next_page());
        assert_eq!(v.page_label(), "3/3 pages");
    }

    #[test]
    fn test_previous_at_first_page_is_noop() {
        let mut v = viewer_with(3);
        assert!(!v.previous_page());
        assert_eq!(v.current_page(), 0);
    }

    #[test]
    fn test_cursor_never_escapes() {
        let mut v = viewer_with(4);
        // Fixed pseudo-random walk, heavy on both ends.
        let moves = [1, 1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, 0, 1, 1, 1, 1, 1];
        for m in moves {
            if m == 1 { v.next_page(); } else { v.previous_page(); }
            assert!(v.current_page() < v.page_count());
        }
    }

    #[test]
    fn test_toggle_zoom_twice_restores() {
        let mut v = viewer_with(1);
        let before = v.zoom();
        v.toggle_zoom();
        assert_eq!(v.zoom(), 1.5);
        v.toggle_zoom();
        assert_eq!(v.zoom(), before);
    }

    #[test]
    fn test_load_resets_state() {
        let mut v = viewer_with(5);
        v.next_page();
        v.next_page();
        v.toggle_zoom();
        v.set_viewport(900.0, 300.0);
        v.scroll(-1.0);

        let previous = v.load(doc(2));
        assert_eq!(previous.map(|d| d.page_count()), Some(5));
        assert_eq!(v.current_page(), 0);
        assert!(!v.is_zoomed());
        assert_eq!(v.scroll_offset(), 0.0);
        assert_eq!(v.page_label(), "1/2 pages");
        assert_eq!(v.title_label(), "Report.pdf");
    }

    #[test]
    fn test_scroll_without_document_is_noop() {
        let mut v = Viewer::new(1.5, 40.0);
        v.set_viewport(1000.0, 100.0);
        v.scroll(-1.0);
        assert_eq!(v.scroll_offset(), 0.0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut v = viewer_with(2);
        v.set_viewport(150.0, 100.0);
        v.scroll(1.0);
        assert_eq!(v.scroll_offset(), 0.0);
        v.scroll(-1.0);
        assert_eq!(v.scroll_offset(), 40.0);
        v.scroll(-1.0);
        assert_eq!(v.scroll_offset(), 50.0);
        v.scroll_to_top();
        assert_eq!(v.scroll_offset(), 0.0);
        v.scroll_to_bottom();
        assert_eq!(v.scroll_offset(), 50.0);
    }

    #[test]
    fn test_scroll_leaves_page_and_zoom_alone() {
        let mut v = viewer_with(3);
        v.next_page();
        v.set_viewport(500.0, 100.0);
        v.scroll(-3.0);
        assert_eq!(v.current_page(), 1);
        assert!(!v.is_zoomed());
    }

    #[test]
    fn test_page_change_scrolls_to_top() {
        let mut v = viewer_with(3);
        v.set_viewport(500.0, 100.0);
        v.scroll(-1.0);
        assert!(v.scroll_offset() > 0.0);
        v.next_page();
        assert_eq!(v.scroll_offset(), 0.0);
    }

    #[test]
    fn test_shrinking_viewport_reclamps() {
        let mut v = viewer_with(1);
        v.set_viewport(500.0, 100.0);
        v.scroll_to_bottom();
        assert_eq!(v.scroll_offset(), 400.0);
        v.set_viewport(200.0, 100.0);
        assert_eq!(v.scroll_offset(), 100.0);
    }

    #[test]
    fn test_trackpad_swipe_moves_by_its_distance() {
        let mut v = viewer_with(1);
        v.set_viewport(1000.0, 100.0);
        for _ in 0..20 {
            v.scroll_points(-2.0);
        }
        assert_eq!(v.scroll_offset(), 40.0);
        v.scroll_points(15.0);
        assert_eq!(v.scroll_offset(), 25.0);
        v.scroll_points(-5000.0);
        assert_eq!(v.scroll_offset(), 900.0);
    }

    #[test]
    fn test_scroll_points_without_document_is_noop() {
        let mut v = Viewer::new(1.5, 40.0);
        v.set_viewport(1000.0, 100.0);
        v.scroll_points(-30.0);
        assert_eq!(v.scroll_offset(), 0.0);
    }

    #[test]
    fn test_failed_load_keeps_open_document() {
        let dir = tempfile::tempdir().unwrap();
        let good = fixtures::write_pdf(dir.path(), "three.pdf", 3, Some("Report"));
        let mut v = Viewer::new(1.5, 40.0);
        let opened = LoadOutcome {
            result: open_document(&good, ExtractOptions::default()),
            path: good,
        };
        assert!(v.apply_outcome(opened).is_ok());
        assert!(v.next_page());
        v.toggle_zoom();

        let missing = dir.path().join("missing.pdf");
        let failed = LoadOutcome {
            result: open_document(&missing, ExtractOptions::default()),
            path: missing,
        };
        let message = v.apply_outcome(failed).unwrap_err();
        assert!(message.starts_with("could not open missing.pdf:"), "{}", message);

        assert_eq!(v.current_page(), 1);
        assert!(v.is_zoomed());
        assert_eq!(v.page_count(), 3);
        assert_eq!(v.title_label(), "Report.pdf");
        assert_eq!(v.page_label(), "2/3 pages");
    }

    #[test]
    fn test_successful_load_replaces_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write_pdf(dir.path(), "scan001.pdf", 2, None);
        let mut v = viewer_with(5);
        v.next_page();
        let outcome = LoadOutcome {
            result: open_document(&path, ExtractOptions::default()),
            path,
        };
        assert!(v.apply_outcome(outcome).is_ok());
        assert_eq!(v.page_label(), "1/2 pages");
        assert_eq!(v.title_label(), "scan001.pdf");
    }

    #[test]
    fn test_fit_landscape_in_portrait_is_width_bound() {
        assert_eq!(fit_size((200, 100), (400.0, 800.0), 1.0), (400, 200));
    }

    #[test]
    fn test_fit_portrait_in_landscape_is_height_bound() {
        assert_eq!(fit_size((100, 200), (800.0, 400.0), 1.0), (200, 400));
    }

    #[test]
    fn test_fit_equal_ratio_uses_height() {
        assert_eq!(fit_size((100, 100), (300.0, 300.0), 1.0), (300, 300));
    }

    #[test]
    fn test_fit_zoom_scales_both_sides() {
        let (w, h) = fit_size((100, 200), (800.0, 400.0), 1.5);
        assert_eq!((w, h), (300, 600));
    }

    #[test]
    fn test_fit_upscales_small_pages() {
        assert_eq!(fit_size((10, 5), (1000.0, 1000.0), 1.0), (1000, 500));
    }

    #[test]
    fn test_fit_degenerate_canvas() {
        let (w, h) = fit_size((200, 100), (0.0, 0.0), 1.0);
        assert!(w >= 1 && h >= 1);
    }

    #[test]
    fn test_centered_origin() {
        assert_eq!(centered_origin((100.0, 50.0), (300.0, 150.0), 0.0), (100.0, 50.0));
        assert_eq!(centered_origin((450.0, 300.0), (300.0, 150.0), 20.0), (-75.0, -20.0));
    }
}
