// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Renderable surfaces — a rasterised page or image together with the size it
// is laid out at on screen.

use std::sync::Arc;

use image::{DynamicImage, ImageFormat};
use scribe_core::error::{Result, ScribeError};
use tracing::{debug, instrument};

use crate::geometry::Size;

/// What kind of element backs a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// A PDF page rasterised by the render collaborator.
    Canvas,
    /// An image document shown as-is.
    Image,
}

/// A capture target: native pixels plus display box.
///
/// The native raster usually differs from the display size, e.g. a PDF page
/// rendered at 2x zoom and then shown at the preview width.
#[derive(Debug, Clone)]
pub struct Surface {
    /// 1-indexed page within the owning document.
    page: u32,
    kind: SurfaceKind,
    raster: Arc<DynamicImage>,
    display: Size,
}

impl Surface {
    /// Wrap a raster displayed at an explicit size.
    pub fn new(page: u32, kind: SurfaceKind, raster: Arc<DynamicImage>, display: Size) -> Self {
        Self {
            page,
            kind,
            raster,
            display,
        }
    }

    /// Wrap a raster laid out at `display_width`, keeping its aspect ratio.
    pub fn fit_width(
        page: u32,
        kind: SurfaceKind,
        raster: Arc<DynamicImage>,
        display_width: f64,
    ) -> Self {
        let (w, h) = (raster.width(), raster.height());
        let display_height = if w == 0 {
            0.0
        } else {
            display_width * f64::from(h) / f64::from(w)
        };
        Self::new(page, kind, raster, Size::new(display_width, display_height))
    }

    /// Decode an encoded image (PNG, JPEG, ...) into an image surface.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn decode_image(data: &[u8], display_width: f64) -> Result<Self> {
        let img = image::load_from_memory(data).map_err(|err| {
            ScribeError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded for preview"
        );
        Ok(Self::fit_width(
            1,
            SurfaceKind::Image,
            Arc::new(img),
            display_width,
        ))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    pub fn raster(&self) -> &DynamicImage {
        &self.raster
    }

    /// Intrinsic pixel dimensions of the raster.
    pub fn native_size(&self) -> (u32, u32) {
        (self.raster.width(), self.raster.height())
    }

    /// Post-layout bounding box size in CSS pixels.
    pub fn display_size(&self) -> Size {
        self.display
    }

    /// The raster as PNG, for displaying a rendered canvas.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.raster
            .write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|err| ScribeError::ImageError(format!("PNG encoding failed: {}", err)))?;
        Ok(buffer)
    }

    /// The same raster laid out at a new display size (window resize).
    pub fn relayout(&self, display: Size) -> Self {
        Self {
            display,
            ..self.clone()
        }
    }
}
