// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// File name of the persisted configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the OCR / transcription / project backend.
    pub backend_url: String,
    /// Thresholds applied to snip selections.
    pub selection: SelectionConfig,
    /// Raster format used when submitting a captured region for OCR.
    pub capture_format: CaptureFormat,
    /// Width (CSS pixels) at which document pages are laid out in the preview.
    pub preview_width: f64,
    /// Longest voice clip accepted for transcription, in seconds.
    pub max_recording_secs: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".into(),
            selection: SelectionConfig::default(),
            capture_format: CaptureFormat::Png,
            preview_width: 800.0,
            max_recording_secs: 120,
        }
    }
}

impl AppConfig {
    /// Load the configuration stored in `data_dir`, if any.
    ///
    /// A missing or unreadable file yields `None`; callers fall back to
    /// [`AppConfig::default`].
    pub fn load(data_dir: &Path) -> Option<Self> {
        let path = data_dir.join(CONFIG_FILE);
        let data = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&data) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                None
            }
        }
    }

    /// Write the configuration as pretty JSON into `data_dir`.
    pub fn persist(&self, data_dir: &Path) -> Result<()> {
        let path = data_dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        Ok(())
    }
}

/// Minimum size a dragged rectangle must reach before it is offered for
/// capture. Anything smaller is treated as an accidental click.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Minimum width in display pixels.
    pub min_width: f64,
    /// Minimum height in display pixels.
    pub min_height: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_width: 10.0,
            min_height: 10.0,
        }
    }
}

/// Encoding of captured regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureFormat {
    /// Lossless; the default.
    Png,
    /// Lossy, with quality 1-100.
    Jpeg { quality: u8 },
}

impl CaptureFormat {
    /// MIME type sent alongside the encoded bytes.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg { .. } => "image/jpeg",
        }
    }

    /// File extension used for the multipart file name.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpg",
        }
    }
}
