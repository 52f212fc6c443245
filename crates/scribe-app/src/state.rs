// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// UI state that is not owned by the session controller: rendered previews,
// form inputs and the last pointer position.

use std::collections::HashMap;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use scribe_core::types::{PageRange, ProjectSummary, Script, SourceFile};
use scribe_core::error::Result as ScribeResult;
use scribe_document::{Point, Surface, SurfaceKind};

/// One rendered page and the `src` to display it with.
#[derive(Debug, Clone)]
pub struct PagePreview {
    pub surface: Arc<Surface>,
    pub data_url: String,
}

impl PartialEq for PagePreview {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.surface, &other.surface) && self.data_url == other.data_url
    }
}

/// What the preview area shows for a document.
#[derive(Debug, Clone)]
pub enum Preview {
    Pages(Vec<PagePreview>),
    /// No raster available (PDFs without the `pdf-render` feature); only
    /// whole-document OCR works.
    Placeholder { pages: u32, reason: String },
}

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Keyed by [`SourceFile::fingerprint`].
    pub previews: HashMap<String, Preview>,
    /// Last pointer position over a page, used when the pointer leaves it
    /// mid-drag.
    pub last_point: Option<Point>,
    pub target_script: Script,
    pub project_name: String,
    pub projects: Vec<ProjectSummary>,
    pub page_start: String,
    pub page_end: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            previews: HashMap::new(),
            last_point: None,
            target_script: Script::Devanagari,
            project_name: String::new(),
            projects: Vec::new(),
            page_start: String::new(),
            page_end: String::new(),
        }
    }
}

/// `data:` URL for displaying an image source directly.
pub fn data_url(source: &SourceFile) -> String {
    format!(
        "data:{};base64,{}",
        source.kind.mime_type(),
        STANDARD.encode(&source.bytes)
    )
}

/// `src` for one page: image documents show their own bytes, rendered canvases
/// are encoded as PNG.
pub fn page_data_url(source: &SourceFile, surface: &Surface) -> ScribeResult<String> {
    match surface.kind() {
        SurfaceKind::Image => Ok(data_url(source)),
        SurfaceKind::Canvas => Ok(format!(
            "data:image/png;base64,{}",
            STANDARD.encode(surface.to_png()?)
        )),
    }
}

/// Parse the optional page range inputs.
///
/// Both empty means the whole document. A missing first page means page 1 and
/// a missing last page means the end of the document.
pub fn parse_page_range(start: &str, end: &str) -> Result<Option<PageRange>, String> {
    let parse = |label: &str, value: &str| -> Result<Option<u32>, String> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        value
            .parse::<u32>()
            .map(Some)
            .map_err(|_| format!("{label} page must be a number"))
    };

    match (parse("First", start)?, parse("Last", end)?) {
        (None, None) => Ok(None),
        (Some(start), None) => Ok(Some(PageRange::from_page(start))),
        (None, Some(end)) => Ok(Some(PageRange::through(end))),
        (Some(start), Some(end)) => Ok(Some(PageRange::new(start, end))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::types::DocumentKind;

    #[test]
    fn data_url_carries_mime_and_payload() {
        let source = SourceFile::new("a.png", DocumentKind::Png, b"abc".to_vec());
        assert_eq!(data_url(&source), "data:image/png;base64,YWJj");
    }

    #[test]
    fn canvas_pages_get_their_own_png() {
        let source = SourceFile::new("book.pdf", DocumentKind::Pdf, b"%PDF".to_vec());
        let raster = image::DynamicImage::ImageRgba8(image::RgbaImage::new(4, 4));
        let surface = Surface::fit_width(1, SurfaceKind::Canvas, Arc::new(raster), 2.0);
        let url = page_data_url(&source, &surface).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert_ne!(url, data_url(&source));
    }

    #[test]
    fn page_range_inputs() {
        assert_eq!(parse_page_range("", " "), Ok(None));
        assert_eq!(parse_page_range("3", ""), Ok(Some(PageRange::from_page(3))));
        assert_eq!(parse_page_range("", "4"), Ok(Some(PageRange::new(1, 4))));
        assert_eq!(
            parse_page_range("2", "5"),
            Ok(Some(PageRange::new(2, 5)))
        );
        assert!(parse_page_range("two", "5").is_err());
    }
}
