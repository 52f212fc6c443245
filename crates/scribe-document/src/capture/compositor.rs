// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture compositor — maps a confirmed selection from display pixels into the
// target's native pixel space, crops that region onto a fresh raster and
// encodes it for the OCR service.

use image::{DynamicImage, ImageFormat, RgbaImage};
use imageproc::rect::Rect as PixelRect;
use scribe_core::config::CaptureFormat;
use scribe_core::error::{Result, ScribeError};
use tracing::{debug, info, instrument};

use crate::capture::selector::Selection;

/// A selection remapped into the target's native pixel space.
///
/// `x`/`y` may be negative or run past the raster when the drag left the
/// surface; [`CaptureCompositor::capture`] clips the copy but keeps the output
/// at the full `width` x `height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureRegion {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
    /// native width / display width
    pub scale_x: f64,
    /// native height / display height
    pub scale_y: f64,
}

impl CaptureRegion {
    /// Remap `selection` using independent horizontal and vertical scales.
    pub fn from_selection(selection: &Selection) -> Result<Self> {
        let display = selection.target.display_size();
        if display.is_empty() {
            return Err(ScribeError::Capture(format!(
                "target has no displayed area ({}x{})",
                display.width, display.height
            )));
        }

        let (native_w, native_h) = selection.target.native_size();
        let scale_x = f64::from(native_w) / display.width;
        let scale_y = f64::from(native_h) / display.height;

        let rect = selection.rect;
        let width = (rect.width * scale_x).round();
        let height = (rect.height * scale_y).round();
        if width < 1.0 || height < 1.0 {
            return Err(ScribeError::Capture(format!(
                "selection maps to an empty {}x{} region",
                width, height
            )));
        }

        Ok(Self {
            x: (rect.x * scale_x).round() as i64,
            y: (rect.y * scale_y).round() as i64,
            width: width as u32,
            height: height as u32,
            scale_x,
            scale_y,
        })
    }
}

/// An encoded crop ready for submission.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: CaptureFormat,
}

impl CapturedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// File name used when uploading the crop.
    pub fn file_name(&self) -> String {
        format!("snip.{}", self.format.extension())
    }
}

/// Turns selections into encoded crops.
#[derive(Debug, Clone, Copy)]
pub struct CaptureCompositor {
    format: CaptureFormat,
}

impl Default for CaptureCompositor {
    fn default() -> Self {
        Self::new(CaptureFormat::Png)
    }
}

impl CaptureCompositor {
    pub fn new(format: CaptureFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> CaptureFormat {
        self.format
    }

    /// Crop `selection` out of its target and encode it.
    ///
    /// The output is exactly `round(w * scale_x)` x `round(h * scale_y)`
    /// pixels. Parts of the region outside the raster stay transparent.
    #[instrument(skip_all, fields(page = selection.target.page()))]
    pub fn capture(&self, selection: &Selection) -> Result<CapturedImage> {
        let region = CaptureRegion::from_selection(selection)?;
        debug!(
            scale_x = region.scale_x,
            scale_y = region.scale_y,
            x = region.x,
            y = region.y,
            width = region.width,
            height = region.height,
            "Selection remapped to native pixels"
        );

        let raster = selection.target.raster();
        let cropped = crop_region(raster, &region)?;
        let bytes = encode(&cropped, self.format)?;
        if bytes.is_empty() {
            return Err(ScribeError::Capture("encoder produced no data".into()));
        }

        info!(
            width = region.width,
            height = region.height,
            bytes = bytes.len(),
            "Region captured"
        );
        Ok(CapturedImage {
            bytes,
            width: region.width,
            height: region.height,
            format: self.format,
        })
    }
}

/// Copy the part of `raster` covered by `region` onto a transparent canvas
/// of the region's size.
fn crop_region(raster: &DynamicImage, region: &CaptureRegion) -> Result<DynamicImage> {
    let bounds = PixelRect::at(0, 0).of_size(raster.width().max(1), raster.height().max(1));
    let wanted = PixelRect::at(to_i32(region.x)?, to_i32(region.y)?)
        .of_size(region.width, region.height);

    let visible = match bounds.intersect(wanted) {
        Some(visible) if raster.width() > 0 && raster.height() > 0 => visible,
        _ => {
            return Err(ScribeError::Capture(
                "selection does not overlap the page".into(),
            ));
        }
    };

    let piece = raster
        .crop_imm(
            visible.left() as u32,
            visible.top() as u32,
            visible.width(),
            visible.height(),
        )
        .to_rgba8();

    let mut canvas = RgbaImage::new(region.width, region.height);
    image::imageops::replace(
        &mut canvas,
        &piece,
        i64::from(visible.left()) - region.x,
        i64::from(visible.top()) - region.y,
    );
    Ok(DynamicImage::ImageRgba8(canvas))
}

fn to_i32(value: i64) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| ScribeError::Capture(format!("coordinate {value} out of range")))
}

/// Encode an image in the configured capture format.
fn encode(image: &DynamicImage, format: CaptureFormat) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    match format {
        CaptureFormat::Png => {
            let mut cursor = std::io::Cursor::new(&mut buffer);
            image.write_to(&mut cursor, ImageFormat::Png).map_err(|err| {
                ScribeError::Capture(format!("PNG encoding failed: {}", err))
            })?;
        }
        CaptureFormat::Jpeg { quality } => {
            let rgb = image.to_rgb8();
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                &mut buffer,
                quality.clamp(1, 100),
            );
            rgb.write_with_encoder(encoder).map_err(|err| {
                ScribeError::Capture(format!("JPEG encoding failed: {}", err))
            })?;
        }
    }
    Ok(buffer)
}
