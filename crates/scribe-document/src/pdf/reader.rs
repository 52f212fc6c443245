// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open a PDF and inspect its page tree (count, page sizes) using
// the `lopdf` crate. Rasterisation is the render collaborator's job.

use std::path::Path;

use lopdf::{Document, Object, ObjectId};
use scribe_core::error::{Result, ScribeError};
use tracing::{debug, info, instrument};

/// US Letter in points, used when a page carries no usable /MediaBox.
const FALLBACK_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// Read-only view of a PDF's page tree.
pub struct PdfReader {
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            ScribeError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            ScribeError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Size of a page (1-indexed) in PDF points, honouring /Rotate.
    ///
    /// /MediaBox is inherited from ancestor /Pages nodes when the page itself
    /// does not set it.
    pub fn page_size(&self, page_number: u32) -> Result<(f32, f32)> {
        let pages = self.document.get_pages();
        let page_id: ObjectId = *pages.get(&page_number).ok_or_else(|| {
            ScribeError::PdfError(format!(
                "page {} out of range (document has {} pages)",
                page_number,
                pages.len()
            ))
        })?;

        let (width, height) = self
            .inherited(page_id, b"MediaBox")
            .and_then(|obj| media_box_size(&obj))
            .unwrap_or(FALLBACK_PAGE_SIZE);

        let rotation = self
            .inherited(page_id, b"Rotate")
            .and_then(|obj| obj.as_i64().ok())
            .unwrap_or(0)
            .rem_euclid(360);

        if rotation == 90 || rotation == 270 {
            Ok((height, width))
        } else {
            Ok((width, height))
        }
    }

    // -- Helpers --------------------------------------------------------------

    /// Look up `key` on a page dictionary, walking up /Parent links.
    fn inherited(&self, mut node: ObjectId, key: &[u8]) -> Option<Object> {
        // Page trees are shallow; the bound guards against /Parent cycles.
        for _ in 0..32 {
            let dict = self.document.get_dictionary(node).ok()?;
            if let Ok(value) = dict.get(key) {
                return Some(self.resolve(value).clone());
            }
            node = dict.get(b"Parent").ok()?.as_reference().ok()?;
        }
        None
    }

    fn resolve<'a>(&'a self, object: &'a Object) -> &'a Object {
        match object {
            Object::Reference(id) => self.document.get_object(*id).unwrap_or(object),
            other => other,
        }
    }
}

/// Width and height of a `[llx lly urx ury]` rectangle.
fn media_box_size(object: &Object) -> Option<(f32, f32)> {
    let values = object.as_array().ok()?;
    if values.len() != 4 {
        return None;
    }
    let mut coords = [0f32; 4];
    for (slot, value) in coords.iter_mut().zip(values) {
        *slot = match value {
            Object::Integer(i) => *i as f32,
            Object::Real(r) => *r,
            _ => return None,
        };
    }
    let width = (coords[2] - coords[0]).abs();
    let height = (coords[3] - coords[1]).abs();
    (width > 0.0 && height > 0.0).then_some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    /// Build a PDF with one page per entry of `media_boxes`, each page
    /// optionally rotated.
    fn build_pdf(pages: &[([i64; 4], i64)]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut kids = Vec::new();
        for (media_box, rotate) in pages {
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => media_box.iter().map(|v| Object::Integer(*v)).collect::<Vec<_>>(),
                "Rotate" => *rotate,
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
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

    #[test]
    fn counts_pages() {
        let bytes = build_pdf(&[
            ([0, 0, 595, 842], 0),
            ([0, 0, 595, 842], 0),
            ([0, 0, 612, 792], 0),
        ]);
        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.page_count(), 3);
        assert!(reader.source_path().is_none());
    }

    #[test]
    fn page_size_honours_rotation() {
        let bytes = build_pdf(&[([0, 0, 595, 842], 0), ([0, 0, 595, 842], 90)]);
        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.page_size(1).unwrap(), (595.0, 842.0));
        assert_eq!(reader.page_size(2).unwrap(), (842.0, 595.0));
    }

    #[test]
    fn page_size_out_of_range() {
        let bytes = build_pdf(&[([0, 0, 595, 842], 0)]);
        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert!(matches!(reader.page_size(2), Err(ScribeError::PdfError(_))));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            PdfReader::from_bytes(b"%PDF-not really"),
            Err(ScribeError::PdfError(_))
        ));
    }
}
