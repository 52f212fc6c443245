// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Indic Scribe — collaborator bridge.
//
// The session core only talks to the outside world through the traits in
// `traits`: the OCR, transcription, transliteration and project services, the
// text editor, the notification area, the tab strip, the page renderer and the
// microphone. This crate also ships the implementations the desktop app uses:
// an HTTP client for the backend, in-memory editor/notices/tab strip/project
// store, a lopdf-based renderer and a stub microphone.

pub mod http;
pub mod memory;
pub mod render;
pub mod stub;
pub mod traits;

#[cfg(feature = "ocr")]
pub mod local_ocr;

pub use http::HttpBackend;
#[cfg(feature = "ocr")]
pub use local_ocr::LocalOcr;
pub use memory::{MemoryEditor, MemoryProjectStore, MemoryTabStrip, Notice, NoticeBoard};
pub use render::LocalRenderer;
pub use stub::StubMicrophone;
pub use traits::*;
