//! slowPDF: page-at-a-time PDF viewer for the Slow Computer

mod app;
mod config;
mod extract;
#[cfg(test)]
mod fixtures;
mod picker;
mod title;
mod viewer;
mod worker;

use app::SlowPdfApp;
use config::ViewerConfig;
use eframe::NativeOptions;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("slowpdf=info,slowcore=info")),
        )
        .init();

    // Optional file to open on launch
    let initial_path = std::env::args().nth(1).map(std::path::PathBuf::from);

    let config = ViewerConfig::default();
    let title = config.window_title;

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size(config.window_size)
        .with_title(title)
        .with_maximized(config.maximized);

    let options = NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(title, options, Box::new(move |cc| {
        slowcore::SlowTheme::default().apply(&cc.egui_ctx);
        Box::new(SlowPdfApp::new(cc, config, initial_path))
    }))
}
