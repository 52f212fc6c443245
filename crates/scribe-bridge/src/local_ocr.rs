// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// On-device OCR collaborator backed by the `ocrs` engine.

use std::sync::Arc;

use async_trait::async_trait;
use scribe_core::error::{Result, ScribeError};
use scribe_document::OcrEngine;
use tracing::warn;

use crate::traits::{OcrRequest, OcrService};

/// Runs recognition on a blocking thread; page ranges are ignored.
#[derive(Clone)]
pub struct LocalOcr {
    engine: Arc<OcrEngine>,
}

impl LocalOcr {
    pub fn new(engine: OcrEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Load the models from the default cache directory.
    pub fn with_defaults() -> Result<Self> {
        OcrEngine::with_defaults().map(Self::new)
    }
}

#[async_trait]
impl OcrService for LocalOcr {
    async fn recognize(&self, request: OcrRequest) -> Result<String> {
        if request.mime_type == "application/pdf" {
            return Err(ScribeError::Ocr(
                "on-device OCR only accepts images".into(),
            ));
        }
        if request.pages.is_some() {
            warn!("page range ignored by on-device OCR");
        }
        let engine = Arc::clone(&self.engine);
        tokio::task::spawn_blocking(move || engine.recognize_encoded(&request.bytes))
            .await
            .map_err(|err| ScribeError::Ocr(format!("OCR task failed: {}", err)))?
    }
}
