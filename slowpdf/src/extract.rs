//! Page extractor
//!
//! Opens a PDF and rasterizes every page up front with hayro (pure Rust),
//! at one pixel per point unless the caller asks for a different scale.
//! Pages are flattened onto white and kept as RGB. Extraction is
//! all-or-nothing: the first failure discards everything rendered so far.

use crate::config::ViewerConfig;
use crate::title;
use hayro::hayro_interpret::InterpreterSettings;
use hayro::hayro_syntax::Pdf;
use hayro::RenderSettings;
use image::{Rgb, RgbImage, RgbaImage};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// A loaded document. Pages never change after extraction.
pub struct Document {
    pub pages: Vec<RgbImage>,
    /// Display title, already truncated
    pub title: String,
    pub path: PathBuf,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("pages", &self.pages.len())
            .field("title", &self.title)
            .field("path", &self.path)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not a readable PDF: {0}")]
    Parse(String),
    #[error("document has no pages")]
    Empty,
    #[error("page {} could not be rendered", .page + 1)]
    Render { page: usize },
    #[error("loader stopped before finishing")]
    WorkerLost,
}

/// Extraction settings
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// 1.0 = 72 DPI
    pub scale: f32,
    pub title_max_chars: usize,
}

impl From<&ViewerConfig> for ExtractOptions {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            scale: config.render_scale,
            title_max_chars: config.title_max_chars,
        }
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::from(&ViewerConfig::default())
    }
}

/// Open `path`, rasterize all pages, and resolve the display title.
pub fn open_document(path: &Path, options: ExtractOptions) -> Result<Document, LoadError> {
    let started = Instant::now();
    let data = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let metadata = title::metadata_title(&data);
    let title = title::resolve_title(metadata.as_deref(), path, options.title_max_chars);

    let pages = rasterize(data, options.scale)?;
    tracing::info!(
        "opened {} ({} pages) in {:.0?}",
        path.display(),
        pages.len(),
        started.elapsed()
    );

    Ok(Document {
        pages,
        title,
        path: path.to_path_buf(),
    })
}

/// Render every page of an in-memory PDF, in document order.
pub fn rasterize(data: Vec<u8>, scale: f32) -> Result<Vec<RgbImage>, LoadError> {
    let data: Arc<dyn AsRef<[u8]> + Send + Sync> = Arc::new(data);
    let pdf = Pdf::new(data).map_err(|e| LoadError::Parse(format!("{:?}", e)))?;
    let pages = pdf.pages();
    if pages.len() == 0 {
        return Err(LoadError::Empty);
    }

    let interpreter_settings = InterpreterSettings::default();
    let render_settings = RenderSettings {
        x_scale: scale,
        y_scale: scale,
        ..Default::default()
    };

    let mut out = Vec::with_capacity(pages.len());
    for index in 0..pages.len() {
        let page = pages.get(index).ok_or(LoadError::Render { page: index })?;
        let pixmap = hayro::render(page, &interpreter_settings, &render_settings);
        let png = pixmap
            .into_png()
            .map_err(|_| LoadError::Render { page: index })?;
        let rgba = image::load_from_memory(&png)
            .map_err(|e| {
                tracing::warn!("page {} decode failed: {}", index + 1, e);
                LoadError::Render { page: index }
            })?
            .to_rgba8();
        let (w, h) = rgba.dimensions();
        tracing::debug!("page {}/{} rendered at {}x{}", index + 1, pages.len(), w, h);
        out.push(flatten_on_white(&rgba));
    }
    Ok(out)
}

/// Composite an RGBA bitmap over opaque white.
pub fn flatten_on_white(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let a = a as u32;
        let over = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
        Rgb([over(r), over(g), over(b)])
    })
}
