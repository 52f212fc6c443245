// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Indic Scribe.

use thiserror::Error;

/// Top-level error type for all Indic Scribe operations.
#[derive(Debug, Error)]
pub enum ScribeError {
    // -- Document errors --
    #[error("unsupported document type: {0}")]
    UnsupportedDocument(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("document has no pages")]
    EmptyDocument,

    #[error("page range {start}-{end} is invalid for a {page_count} page document")]
    InvalidPageRange {
        start: u32,
        end: u32,
        page_count: u32,
    },

    #[error("no document is open")]
    NoActiveDocument,

    // -- Capture errors --
    #[error("capture failed: {0}")]
    Capture(String),

    // -- Collaborator errors --
    //
    // The payload is the message reported by the service itself, shown to the
    // user as-is.
    #[error("{0}")]
    Ocr(String),

    #[error("{0}")]
    Transcription(String),

    #[error("{0}")]
    Transliteration(String),

    #[error("{0}")]
    ProjectStore(String),

    #[error("could not reach the server: {0}")]
    Network(String),

    #[error("could not recognise the script of the text")]
    UnknownScript,

    // -- Device errors --
    #[error("microphone unavailable: {0}")]
    Microphone(String),

    #[error("recording is {secs}s long, the limit is {max_secs}s")]
    RecordingTooLong { secs: u32, max_secs: u32 },

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform --
    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScribeError>;
