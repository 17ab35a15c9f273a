//! slowcore: shared library for the slowPDF viewer

pub mod repaint;
pub mod safety;
pub mod storage;
pub mod theme;
pub mod widgets;

pub use repaint::RepaintController;
pub use theme::SlowTheme;
