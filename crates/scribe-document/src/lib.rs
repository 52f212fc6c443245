// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scribe-document — Document surfaces and region capture for Indic Scribe.
//
// Provides the snip pipeline's pure parts: pointer-driven region selection over
// a rendered page, remapping of the selection into the page's native pixel
// space and rasterisation of the crop. Also PDF inspection (page counts and
// sizes) and Unicode-range script detection for transliteration.

pub mod capture;
pub mod geometry;
pub mod pdf;
pub mod script;

#[cfg(feature = "ocr")]
pub mod ocr;

// Re-export the primary structs so callers can use `scribe_document::RegionSelector` etc.
pub use capture::compositor::{CaptureCompositor, CaptureRegion, CapturedImage};
pub use capture::selector::{
    ModalHit, PointerButton, PointerDown, PointerTarget, PointerUp, RegionSelector, Selection,
    SelectorState,
};
pub use capture::surface::{Surface, SurfaceKind};
pub use geometry::{Point, Rect, Size};
pub use pdf::reader::PdfReader;
pub use script::detect_script;

#[cfg(feature = "ocr")]
pub use ocr::OcrEngine;
