// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Indic Scribe.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Result, ScribeError};

/// Supported source document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Pdf,
    Png,
    Jpeg,
    Tiff,
    Bmp,
    Webp,
}

impl DocumentKind {
    /// MIME type sent to the OCR service.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Tiff => "image/tiff",
            Self::Bmp => "image/bmp",
            Self::Webp => "image/webp",
        }
    }

    /// Infer document type from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "tif" | "tiff" => Some(Self::Tiff),
            "bmp" => Some(Self::Bmp),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Raster images always render as exactly one page.
    pub fn is_raster(&self) -> bool {
        !matches!(self, Self::Pdf)
    }
}

/// An uploaded file: name, type and the raw bytes.
///
/// Bytes are reference-counted so a document can be handed to the OCR
/// collaborator without copying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub kind: DocumentKind,
    pub bytes: Arc<[u8]>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, kind: DocumentKind, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            kind,
            bytes: bytes.into(),
        }
    }

    /// Build a source file, inferring the kind from the name's extension.
    pub fn from_name(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Result<Self> {
        let name = name.into();
        let ext = std::path::Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let kind = DocumentKind::from_extension(ext)
            .ok_or_else(|| ScribeError::UnsupportedDocument(name.clone()))?;
        Ok(Self::new(name, kind, bytes))
    }

    /// SHA-256 of the bytes, hex encoded. Stable across reopenings of the
    /// same file, so the UI uses it as a tab key.
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// An open document: the source file and its rendered page count.
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    source: SourceFile,
    page_count: u32,
}

impl Document {
    /// Create a document. A document always has at least one page.
    pub fn new(source: SourceFile, page_count: u32) -> Result<Self> {
        if page_count == 0 {
            return Err(ScribeError::EmptyDocument);
        }
        Ok(Self { source, page_count })
    }

    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    pub fn name(&self) -> &str {
        &self.source.name
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }
}

/// Inclusive, 1-indexed page range for multi-page OCR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// From `start` to the end of whatever document it is applied to.
    pub fn from_page(start: u32) -> Self {
        Self {
            start,
            end: u32::MAX,
        }
    }

    /// From the first page through `end`.
    pub fn through(end: u32) -> Self {
        Self { start: 1, end }
    }

    /// Clamp the range to a document's pages. Fails only when no page of
    /// the document is left.
    pub fn fit(&self, page_count: u32) -> Result<Self> {
        self.clamp_to(page_count).ok_or(ScribeError::InvalidPageRange {
            start: self.start,
            end: self.end,
            page_count,
        })
    }

    /// Trim the range to `1..=page_count`; `None` when nothing is left.
    pub fn clamp_to(&self, page_count: u32) -> Option<Self> {
        let clamped = Self {
            start: self.start.max(1),
            end: self.end.min(page_count),
        };
        (!clamped.is_empty()).then_some(clamped)
    }

    /// Number of pages covered.
    pub fn len(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// Writing systems the transliteration service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Devanagari,
    Kannada,
    Telugu,
    Tamil,
    Latin,
}

impl Script {
    pub const ALL: [Script; 5] = [
        Script::Devanagari,
        Script::Kannada,
        Script::Telugu,
        Script::Tamil,
        Script::Latin,
    ];

    /// Language code understood by the transliteration backend.
    pub fn language_code(&self) -> &'static str {
        match self {
            Self::Devanagari => "sa",
            Self::Kannada => "kn",
            Self::Telugu => "te",
            Self::Tamil => "ta",
            Self::Latin => "en",
        }
    }

    /// Parse a UI label or backend code (`"kannada"`, `"kn"`, `"hindi"` ...).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "devanagari" | "sanskrit" | "sa" | "hindi" | "hi" => Some(Self::Devanagari),
            "kannada" | "kn" => Some(Self::Kannada),
            "telugu" | "te" => Some(Self::Telugu),
            "tamil" | "ta" => Some(Self::Tamil),
            "english" | "latin" | "en" => Some(Self::Latin),
            _ => None,
        }
    }

    /// Human-readable name for menus.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Devanagari => "Devanagari",
            Self::Kannada => "Kannada",
            Self::Telugu => "Telugu",
            Self::Tamil => "Tamil",
            Self::Latin => "English",
        }
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifier assigned to a saved project by the project store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A saved editing project: `{name, content}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub content: String,
}

/// Listing entry for a stored project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub modified_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_extension_is_case_insensitive() {
        assert_eq!(DocumentKind::from_extension("PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_extension("JpEg"), Some(DocumentKind::Jpeg));
        assert_eq!(DocumentKind::from_extension("docx"), None);
    }

    #[test]
    fn source_file_from_name_rejects_unknown_types() {
        let err = SourceFile::from_name("notes.docx", vec![1u8, 2, 3]).unwrap_err();
        assert!(matches!(err, ScribeError::UnsupportedDocument(_)));

        let ok = SourceFile::from_name("scan.PNG", vec![1u8]).unwrap();
        assert_eq!(ok.kind, DocumentKind::Png);
    }

    #[test]
    fn fingerprint_is_stable() {
        let a = SourceFile::new("a.png", DocumentKind::Png, vec![1u8, 2, 3]);
        let b = SourceFile::new("b.png", DocumentKind::Png, vec![1u8, 2, 3]);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn document_requires_a_page() {
        let src = SourceFile::new("a.pdf", DocumentKind::Pdf, vec![0u8]);
        assert!(matches!(
            Document::new(src.clone(), 0),
            Err(ScribeError::EmptyDocument)
        ));
        assert_eq!(Document::new(src, 3).unwrap().page_count(), 3);
    }

    #[test]
    fn page_range_fits_document() {
        assert_eq!(PageRange::new(1, 4).fit(4).unwrap(), PageRange::new(1, 4));
        assert_eq!(PageRange::new(3, 10).fit(5).unwrap(), PageRange::new(3, 5));
        assert_eq!(PageRange::from_page(2).fit(4).unwrap(), PageRange::new(2, 4));
        assert_eq!(PageRange::through(3).fit(9).unwrap(), PageRange::new(1, 3));
        assert_eq!(PageRange::new(0, 2).fit(4).unwrap(), PageRange::new(1, 2));
        assert!(matches!(
            PageRange::new(3, 2).fit(4),
            Err(ScribeError::InvalidPageRange { page_count: 4, .. })
        ));
        assert!(PageRange::new(6, 9).fit(5).is_err());
        assert_eq!(PageRange::new(2, 4).len(), 3);
        assert_eq!(PageRange::new(3, 2).len(), 0);
    }

    #[test]
    fn page_range_clamps_to_document() {
        assert_eq!(
            PageRange::new(0, 9).clamp_to(4),
            Some(PageRange::new(1, 4))
        );
        assert_eq!(PageRange::new(5, 9).clamp_to(4), None);
    }

    #[test]
    fn script_labels_round_trip_through_codes() {
        for script in Script::ALL {
            assert_eq!(Script::from_label(script.language_code()), Some(script));
        }
        assert_eq!(Script::from_label("hindi"), Some(Script::Devanagari));
        assert_eq!(Script::from_label("klingon"), None);
    }

    #[test]
    fn project_wire_shape() {
        let project = Project {
            name: "Gita ch. 2".into(),
            content: "text".into(),
        };
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Gita ch. 2", "content": "text"}));
    }
}
