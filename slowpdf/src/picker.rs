//! File loader: native open dialog restricted to PDFs

use slowcore::storage::{documents_dir, has_extension};
use std::path::{Path, PathBuf};

const PDF_EXTENSIONS: &[&str] = &["pdf"];

/// Ask the user for a PDF. `None` when the dialog is dismissed.
/// Blocks until the dialog closes.
pub fn pick_pdf(start_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = start_dir.map(Path::to_path_buf).unwrap_or_else(documents_dir);
    let picked = rfd::FileDialog::new()
        .set_title("Open PDF")
        .add_filter("PDF Files", PDF_EXTENSIONS)
        .set_directory(dir)
        .pick_file();
    if picked.is_none() {
        tracing::debug!("open dialog cancelled");
    }
    picked
}

/// Extension check used for dropped files and command-line paths
pub fn is_pdf(path: &Path) -> bool {
    has_extension(path, PDF_EXTENSIONS)
}
