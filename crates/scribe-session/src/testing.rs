// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test doubles shared by the session tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::{DynamicImage, Rgba, RgbaImage};
use scribe_bridge::{
    AudioClip, AudioStream, MemoryEditor, MemoryProjectStore, MemoryTabStrip, Microphone,
    NoticeBoard, OcrRequest, OcrService, PdfRenderer, Transcriber, Transliterator,
};
use scribe_core::error::{Result, ScribeError};
use scribe_core::types::{Document, DocumentKind, Script, SourceFile};
use scribe_document::geometry::Size;
use scribe_document::{Surface, SurfaceKind};

use tokio::sync::Notify;

use crate::controller::Collaborators;

pub fn doc(name: &str, pages: u32) -> Document {
    let source = SourceFile::from_name(name, vec![0u8; 8]).unwrap();
    Document::new(source, pages).unwrap()
}

pub fn pdf_doc(name: &str, pages: u32) -> Document {
    Document::new(SourceFile::new(name, DocumentKind::Pdf, vec![1u8; 16]), pages).unwrap()
}

/// A page surface whose pixel at (x, y) encodes its own coordinates.
pub fn surface(native: (u32, u32), display: (f64, f64)) -> Arc<Surface> {
    let raster = RgbaImage::from_fn(native.0, native.1, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
    });
    Arc::new(Surface::new(
        1,
        SurfaceKind::Canvas,
        Arc::new(DynamicImage::ImageRgba8(raster)),
        Size::new(display.0, display.1),
    ))
}

/// Renderer that reports a fixed page count.
pub struct FixedPages(pub u32);

#[async_trait]
impl PdfRenderer for FixedPages {
    async fn page_count(&self, _file: &SourceFile) -> Result<u32> {
        Ok(self.0)
    }

    async fn render_preview(
        &self,
        _file: &SourceFile,
        _display_width: f64,
    ) -> Result<Vec<Arc<Surface>>> {
        Ok(Vec::new())
    }
}

/// OCR double answering with a queued reply and recording every request.
#[derive(Default)]
pub struct ScriptedOcr {
    replies: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<OcrRequest>>,
}

impl ScriptedOcr {
    pub fn replying(reply: Result<String>) -> Arc<Self> {
        let ocr = Self::default();
        ocr.replies.lock().unwrap().push_back(reply);
        Arc::new(ocr)
    }

    pub fn requests(&self) -> Vec<OcrRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl OcrService for ScriptedOcr {
    async fn recognize(&self, request: OcrRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

/// Transliterator that tags the text, optionally editing the editor first to
/// simulate a concurrent change.
pub struct TaggingTransliterator {
    pub calls: Mutex<Vec<(String, Script, Script)>>,
    pub interfere: Option<Arc<MemoryEditor>>,
    pub fail_with: Option<String>,
}

impl TaggingTransliterator {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            interfere: None,
            fail_with: None,
        }
    }
}

#[async_trait]
impl Transliterator for TaggingTransliterator {
    async fn transliterate(&self, text: &str, from: Script, to: Script) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), from, to));
        if let Some(editor) = &self.interfere {
            use scribe_bridge::EditorBuffer;
            editor.set_text("edited meanwhile");
        }
        if let Some(detail) = &self.fail_with {
            return Err(ScribeError::Transliteration(detail.clone()));
        }
        Ok(format!("<{}>{}", to.language_code(), text))
    }
}

/// Stream double counting releases.
pub struct FakeStream {
    pub clip: Option<Result<AudioClip>>,
    pub releases: Arc<Mutex<usize>>,
}

impl AudioStream for FakeStream {
    fn finish(&mut self) -> Result<AudioClip> {
        self.clip
            .take()
            .unwrap_or_else(|| Err(ScribeError::Microphone("stream already finished".into())))
    }

    fn release(&mut self) {
        *self.releases.lock().unwrap() += 1;
    }
}

/// Microphone double: hands out streams producing `clip_secs` of audio, or
/// refuses when `deny` is set.
pub struct FakeMicrophone {
    pub deny: bool,
    pub clip_secs: f64,
    /// When set, `open` waits for a permit before handing out the stream.
    pub gate: Option<Arc<Notify>>,
    pub opens: Mutex<usize>,
    pub releases: Arc<Mutex<usize>>,
}

impl FakeMicrophone {
    pub fn new(clip_secs: f64) -> Arc<Self> {
        Arc::new(Self {
            deny: false,
            clip_secs,
            gate: None,
            opens: Mutex::new(0),
            releases: Arc::new(Mutex::new(0)),
        })
    }

    /// A microphone whose `open` blocks until the returned gate is notified.
    pub fn gated(clip_secs: f64) -> (Arc<Self>, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let mic = Arc::new(Self {
            deny: false,
            clip_secs,
            gate: Some(Arc::clone(&gate)),
            opens: Mutex::new(0),
            releases: Arc::new(Mutex::new(0)),
        });
        (mic, gate)
    }

    pub fn denied() -> Arc<Self> {
        Arc::new(Self {
            deny: true,
            clip_secs: 0.0,
            gate: None,
            opens: Mutex::new(0),
            releases: Arc::new(Mutex::new(0)),
        })
    }

    pub fn opens(&self) -> usize {
        *self.opens.lock().unwrap()
    }

    pub fn releases(&self) -> usize {
        *self.releases.lock().unwrap()
    }
}

#[async_trait]
impl Microphone for FakeMicrophone {
    async fn open(&self) -> Result<Box<dyn AudioStream>> {
        if self.deny {
            return Err(ScribeError::Microphone("permission denied".into()));
        }
        *self.opens.lock().unwrap() += 1;
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(Box::new(FakeStream {
            clip: Some(Ok(AudioClip {
                bytes: vec![0u8; 32],
                mime_type: "audio/webm".into(),
                duration_secs: self.clip_secs,
            })),
            releases: Arc::clone(&self.releases),
        }))
    }
}

/// Transcriber double with a fixed reply.
pub struct FixedTranscriber(pub Result<String>);

#[async_trait]
impl Transcriber for FixedTranscriber {
    async fn transcribe(&self, _clip: &AudioClip) -> Result<String> {
        match &self.0 {
            Ok(text) => Ok(text.clone()),
            Err(err) => Err(ScribeError::Transcription(err.to_string())),
        }
    }
}

/// The in-memory collaborators plus handles to inspect them.
pub struct Harness {
    pub editor: Arc<MemoryEditor>,
    pub notices: Arc<NoticeBoard>,
    pub tabs: Arc<MemoryTabStrip>,
    pub projects: Arc<MemoryProjectStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            editor: Arc::new(MemoryEditor::new()),
            notices: Arc::new(NoticeBoard::new()),
            tabs: Arc::new(MemoryTabStrip::new()),
            projects: Arc::new(MemoryProjectStore::new()),
        }
    }

    pub fn collaborators(
        &self,
        ocr: Arc<dyn OcrService>,
        transliterator: Arc<dyn Transliterator>,
    ) -> Collaborators {
        Collaborators {
            ocr,
            editor: self.editor.clone(),
            notifier: self.notices.clone(),
            tabs: self.tabs.clone(),
            transliterator,
            projects: self.projects.clone(),
        }
    }
}
