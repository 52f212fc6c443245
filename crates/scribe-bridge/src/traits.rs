// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Collaborator interfaces consumed by the session core.
//
// All traits are object safe and `Send + Sync` so the session can hold them as
// `Arc<dyn ...>` and hand clones to in-flight capture and recording tasks.

use std::sync::Arc;

use async_trait::async_trait;
use scribe_core::error::Result;
use scribe_core::types::{
    PageRange, Project, ProjectId, ProjectSummary, Script, Severity, SourceFile,
};
use scribe_document::Surface;

// -- Services ----------------------------------------------------------------

/// A payload for the OCR service.
#[derive(Debug, Clone)]
pub struct OcrRequest {
    pub bytes: Arc<[u8]>,
    pub file_name: String,
    pub mime_type: String,
    /// Only meaningful for multi-page sources.
    pub pages: Option<PageRange>,
}

impl OcrRequest {
    /// A single encoded image (a captured region).
    pub fn image(
        bytes: impl Into<Arc<[u8]>>,
        file_name: impl Into<String>,
        mime_type: &str,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            file_name: file_name.into(),
            mime_type: mime_type.to_string(),
            pages: None,
        }
    }

    /// A whole source document, optionally limited to a page range.
    pub fn document(source: &SourceFile, pages: Option<PageRange>) -> Self {
        Self {
            bytes: Arc::clone(&source.bytes),
            file_name: source.name.clone(),
            mime_type: source.kind.mime_type().to_string(),
            pages,
        }
    }
}

/// Text recognition.
#[async_trait]
pub trait OcrService: Send + Sync {
    /// Recognise the text in `request`. An empty string means no text was
    /// found; failures carry the service's message.
    async fn recognize(&self, request: OcrRequest) -> Result<String>;
}

/// A finished voice recording.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub duration_secs: f64,
}

/// Speech to text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String>;
}

/// Conversion of text between scripts.
#[async_trait]
pub trait Transliterator: Send + Sync {
    async fn transliterate(&self, text: &str, from: Script, to: Script) -> Result<String>;
}

/// Saved projects (`{name, content}`).
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn save(&self, project: &Project) -> Result<ProjectId>;
    async fn load(&self, id: &ProjectId) -> Result<Project>;
    async fn list(&self) -> Result<Vec<ProjectSummary>>;
}

// -- UI ----------------------------------------------------------------------

/// The rich-text editor's buffer.
///
/// Each call is atomic with respect to the buffer; callers that read and then
/// write across an await must check the text did not change in between.
pub trait EditorBuffer: Send + Sync {
    /// Insert at the cursor, surrounded by blank lines, and move the cursor
    /// past the inserted span.
    fn insert_text(&self, text: &str);
    /// Replace the whole buffer.
    fn set_text(&self, text: &str);
    fn get_text(&self) -> String;
}

/// Toasts and the busy spinner.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
    fn show_spinner(&self, label: &str);
    fn hide_spinner(&self);
}

/// One entry in the tab strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub title: String,
    pub page_count: u32,
}

/// The row of open-document tabs plus the OCR trigger button.
pub trait TabStrip: Send + Sync {
    fn render(&self, tabs: &[TabView], active: Option<usize>);
    fn set_ocr_enabled(&self, enabled: bool);
}

// -- Rendering and devices -----------------------------------------------------

/// Page counting and preview rasterisation.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn page_count(&self, file: &SourceFile) -> Result<u32>;

    /// One capture surface per page, laid out at `display_width` CSS pixels.
    async fn render_preview(&self, file: &SourceFile, display_width: f64)
    -> Result<Vec<Arc<Surface>>>;
}

/// An open microphone stream.
///
/// `release` stops the device tracks and must be safe to call more than once.
pub trait AudioStream: Send {
    /// Stop recording and return what was captured.
    fn finish(&mut self) -> Result<AudioClip>;
    fn release(&mut self);
}

/// Audio input device access.
#[async_trait]
pub trait Microphone: Send + Sync {
    /// Acquire the device; fails when permission is denied or no device exists.
    async fn open(&self) -> Result<Box<dyn AudioStream>>;
}
