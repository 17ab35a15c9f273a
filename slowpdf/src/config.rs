//! Hardcoded viewer settings. There is no config file and no flags.

/// Window and viewer constants
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub window_title: &'static str,
    /// Initial inner size before the window is maximized
    pub window_size: [f32; 2],
    pub maximized: bool,
    /// Scale applied on top of fit-to-window when zoomed in
    pub zoom_factor: f32,
    /// Titles longer than this many characters get an ellipsis
    pub title_max_chars: usize,
    /// Rasterization scale; 1.0 is 72 DPI, one pixel per PDF point
    pub render_scale: f32,
    /// Points scrolled per wheel notch or arrow key
    pub scroll_step: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_title: "PDF Viewer",
            window_size: [800.0, 600.0],
            maximized: true,
            zoom_factor: 1.5,
            title_max_chars: 30,
            render_scale: 1.0,
            scroll_step: 40.0,
        }
    }
}
