// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Local page renderer: page counts via lopdf, image decoding via `image`.
// PDF pages are rasterised with MuPDF when the `pdf-render` feature is on;
// without it their previews come back as an error and the app shows
// placeholders instead.

use std::sync::Arc;

use async_trait::async_trait;
use scribe_core::error::{Result, ScribeError};
use scribe_core::types::{DocumentKind, SourceFile};
use scribe_document::{PdfReader, Surface};
use tracing::{debug, instrument};

/// Pixels per PDF point used when rasterising pages. The preview then shows
/// the page at the configured width, so capture scales are usually not 1:1.
pub const PDF_RENDER_ZOOM: f32 = 2.0;

use crate::traits::PdfRenderer;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalRenderer;

impl LocalRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PdfRenderer for LocalRenderer {
    #[instrument(skip_all, fields(file = %file.name))]
    async fn page_count(&self, file: &SourceFile) -> Result<u32> {
        if file.is_empty() {
            return Err(ScribeError::EmptyDocument);
        }
        match file.kind {
            DocumentKind::Pdf => {
                let reader = PdfReader::from_bytes(&file.bytes)?;
                debug!(pages = reader.page_count(), "PDF inspected");
                Ok(reader.page_count())
            }
            _ => Ok(1),
        }
    }

    async fn render_preview(
        &self,
        file: &SourceFile,
        display_width: f64,
    ) -> Result<Vec<Arc<Surface>>> {
        match file.kind {
            DocumentKind::Pdf => render_pdf(file, display_width).await,
            _ => {
                let surface = Surface::decode_image(&file.bytes, display_width)?;
                Ok(vec![Arc::new(surface)])
            }
        }
    }
}

#[cfg(not(feature = "pdf-render"))]
async fn render_pdf(_file: &SourceFile, _display_width: f64) -> Result<Vec<Arc<Surface>>> {
    Err(ScribeError::PdfError(
        "page rasterisation is not available in this build".into(),
    ))
}

#[cfg(feature = "pdf-render")]
#[instrument(skip_all, fields(file = %file.name))]
async fn render_pdf(file: &SourceFile, display_width: f64) -> Result<Vec<Arc<Surface>>> {
    let bytes = Arc::clone(&file.bytes);
    tokio::task::spawn_blocking(move || pdf::rasterise(&bytes, display_width))
        .await
        .map_err(|err| ScribeError::PdfError(format!("render task failed: {}", err)))?
}

#[cfg(feature = "pdf-render")]
mod pdf {
    use std::sync::Arc;

    use image::{DynamicImage, RgbaImage};
    use mupdf::{Colorspace, Document, Matrix, Pixmap};
    use scribe_core::error::{Result, ScribeError};
    use scribe_document::{Surface, SurfaceKind};
    use tracing::debug;

    use super::PDF_RENDER_ZOOM;

    fn pdf_error(err: mupdf::Error) -> ScribeError {
        ScribeError::PdfError(err.to_string())
    }

    /// One canvas surface per page, laid out at `display_width`.
    pub(super) fn rasterise(bytes: &[u8], display_width: f64) -> Result<Vec<Arc<Surface>>> {
        let doc = Document::from_bytes(bytes, "application/pdf").map_err(pdf_error)?;
        let page_count = doc.page_count().map_err(pdf_error)?;

        let matrix = Matrix::new_scale(PDF_RENDER_ZOOM, PDF_RENDER_ZOOM);
        let colorspace = Colorspace::device_rgb();
        let mut surfaces = Vec::with_capacity(usize::try_from(page_count).unwrap_or(0));
        for index in 0..page_count {
            let page = doc.load_page(index).map_err(pdf_error)?;
            let pixmap = page
                .to_pixmap(&matrix, &colorspace, false, true)
                .map_err(pdf_error)?;
            let raster = to_image(&pixmap)?;
            surfaces.push(Arc::new(Surface::fit_width(
                index as u32 + 1,
                SurfaceKind::Canvas,
                Arc::new(raster),
                display_width,
            )));
        }

        debug!(pages = surfaces.len(), zoom = PDF_RENDER_ZOOM, "PDF rasterised");
        Ok(surfaces)
    }

    fn to_image(pixmap: &Pixmap) -> Result<DynamicImage> {
        let width = pixmap.width() as u32;
        let height = pixmap.height() as u32;
        let samples = pixmap.samples();
        let n = pixmap.n() as usize;

        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for pixel in 0..(width as usize * height as usize) {
            let offset = pixel * n;
            let channel = |i: usize| samples.get(offset + i).copied().unwrap_or(0);
            let alpha = if n >= 4 { channel(3) } else { 255 };
            rgba.extend_from_slice(&[channel(0), channel(1), channel(2), alpha]);
        }

        RgbaImage::from_raw(width, height, rgba)
            .map(DynamicImage::ImageRgba8)
            .ok_or_else(|| ScribeError::PdfError("rendered page has no pixels".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbaImage};
    use lopdf::{Document, Object, dictionary};
    use scribe_document::SurfaceKind;
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(width, height));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    fn pdf(pages: u32) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut kids = Vec::new();
        for _ in 0..pages {
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(595),
                    Object::Integer(842),
                ],
            });
            kids.push(Object::Reference(page_id));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => i64::from(pages),
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    #[tokio::test]
    async fn image_counts_one_page_and_decodes_to_a_surface() {
        let file = SourceFile::new("scan.png", DocumentKind::Png, png(400, 200));
        let renderer = LocalRenderer::new();
        assert_eq!(renderer.page_count(&file).await.unwrap(), 1);

        let surfaces = renderer.render_preview(&file, 200.0).await.unwrap();
        assert_eq!(surfaces.len(), 1);
        assert_eq!(surfaces[0].kind(), SurfaceKind::Image);
        assert_eq!(surfaces[0].native_size(), (400, 200));
        assert_eq!(surfaces[0].display_size().height, 100.0);
    }

    #[tokio::test]
    async fn pdf_page_count_comes_from_the_page_tree() {
        let file = SourceFile::new("book.pdf", DocumentKind::Pdf, pdf(3));
        let renderer = LocalRenderer::new();
        assert_eq!(renderer.page_count(&file).await.unwrap(), 3);
    }

    #[cfg(not(feature = "pdf-render"))]
    #[tokio::test]
    async fn pdf_preview_needs_the_renderer() {
        let file = SourceFile::new("book.pdf", DocumentKind::Pdf, pdf(1));
        let err = LocalRenderer::new()
            .render_preview(&file, 800.0)
            .await
            .unwrap_err();
        assert!(matches!(err, ScribeError::PdfError(_)));
    }

    #[cfg(feature = "pdf-render")]
    #[tokio::test]
    async fn pdf_pages_rasterise_at_render_zoom() {
        let file = SourceFile::new("book.pdf", DocumentKind::Pdf, pdf(2));
        let surfaces = LocalRenderer::new()
            .render_preview(&file, 800.0)
            .await
            .unwrap();
        assert_eq!(surfaces.len(), 2);
        assert_eq!(surfaces[1].page(), 2);
        assert_eq!(surfaces[0].kind(), SurfaceKind::Canvas);

        // A4 at 2 px/pt, laid out 800 px wide.
        let (width, height) = surfaces[0].native_size();
        assert!(width.abs_diff(1190) <= 1, "width {width}");
        assert!(height.abs_diff(1684) <= 1, "height {height}");
        let display = surfaces[0].display_size();
        assert_eq!(display.width, 800.0);

        let scale_x = f64::from(width) / display.width;
        let scale_y = f64::from(height) / display.height;
        assert!((scale_x - scale_y).abs() < 1e-9);
        assert!(scale_x > 1.4 && scale_x < 1.5);
    }

    #[tokio::test]
    async fn corrupt_pdf_is_rejected() {
        let file = SourceFile::new("broken.pdf", DocumentKind::Pdf, b"not a pdf".to_vec());
        let err = LocalRenderer::new().page_count(&file).await.unwrap_err();
        assert!(matches!(err, ScribeError::PdfError(_)));
    }
}
