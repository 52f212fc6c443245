// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub microphone for builds without an audio capture backend.
//
// `open` always fails with `PlatformUnavailable`, which the recorder reports
// as a denied microphone.

use async_trait::async_trait;
use scribe_core::error::{Result, ScribeError};

use crate::traits::{AudioStream, Microphone};

/// Microphone that never opens.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubMicrophone;

#[async_trait]
impl Microphone for StubMicrophone {
    async fn open(&self) -> Result<Box<dyn AudioStream>> {
        tracing::warn!("Microphone::open called on stub microphone");
        Err(ScribeError::PlatformUnavailable)
    }
}
