//! Storage utilities
//!
//! Well-known user directories and extension checks for file pickers.
//! Nothing here writes to disk.

use std::path::{Path, PathBuf};

/// Get the documents directory, falling back to home, then the cwd
pub fn documents_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| {
            dirs.document_dir()
                .map(|p| p.to_path_buf())
                .or_else(|| Some(dirs.home_dir().to_path_buf()))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Case-insensitive extension check against a list like `["pdf"]`
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// File name for display, or "unknown" for paths like `/` or `..`
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
