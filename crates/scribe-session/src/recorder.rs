// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Voice recorder — microphone to transcript.
//
// `start` is a no-op while a recording is starting or running. `stop` resets
// the state immediately and releases the device on every path; the captured
// clip comes back as a `PendingTranscription` for the caller to run.

use std::sync::{Arc, Mutex};

use scribe_bridge::{AudioClip, AudioStream, EditorBuffer, Microphone, Notifier, Transcriber};
use scribe_core::error::ScribeError;
use scribe_core::types::Severity;
use tracing::{debug, error, info, instrument, warn};

use crate::busy::BusyGuard;
use crate::controller::notice_text;

/// Releases the device stream when dropped.
struct StreamGuard(Box<dyn AudioStream>);

impl StreamGuard {
    fn finish(&mut self) -> scribe_core::error::Result<AudioClip> {
        self.0.finish()
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.0.release();
        debug!("microphone released");
    }
}

#[derive(Default)]
enum Phase {
    #[default]
    Idle,
    /// Waiting for the device; `cancelled` is set if `stop` came first.
    Starting { cancelled: bool },
    Recording(StreamGuard),
}

/// What the UI shows on the record button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Starting,
    Recording,
}

pub struct VoiceRecorder {
    phase: Mutex<Phase>,
    microphone: Arc<dyn Microphone>,
    transcriber: Arc<dyn Transcriber>,
    editor: Arc<dyn EditorBuffer>,
    notifier: Arc<dyn Notifier>,
    max_secs: u32,
}

impl VoiceRecorder {
    pub fn new(
        microphone: Arc<dyn Microphone>,
        transcriber: Arc<dyn Transcriber>,
        editor: Arc<dyn EditorBuffer>,
        notifier: Arc<dyn Notifier>,
        max_secs: u32,
    ) -> Self {
        Self {
            phase: Mutex::new(Phase::Idle),
            microphone,
            transcriber,
            editor,
            notifier,
            max_secs,
        }
    }

    pub fn state(&self) -> RecorderState {
        match *self.phase.lock().expect("recorder lock poisoned") {
            Phase::Idle => RecorderState::Idle,
            Phase::Starting { .. } => RecorderState::Starting,
            Phase::Recording(_) => RecorderState::Recording,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.state() == RecorderState::Recording
    }

    /// Open the microphone and start recording.
    ///
    /// Does nothing if a recording is already starting or running. A refused
    /// device shows an error notice and leaves the recorder idle.
    #[instrument(skip_all)]
    pub async fn start(&self) {
        {
            let mut phase = self.phase.lock().expect("recorder lock poisoned");
            if !matches!(*phase, Phase::Idle) {
                debug!("start ignored, already recording");
                return;
            }
            *phase = Phase::Starting { cancelled: false };
        }

        let opened = self.microphone.open().await;

        let mut phase = self.phase.lock().expect("recorder lock poisoned");
        let cancelled = matches!(*phase, Phase::Starting { cancelled: true } | Phase::Idle);
        match opened {
            Ok(stream) => {
                let guard = StreamGuard(stream);
                if cancelled {
                    info!("recording stopped before the microphone opened");
                    *phase = Phase::Idle;
                    drop(guard);
                } else {
                    info!("recording started");
                    *phase = Phase::Recording(guard);
                }
            }
            Err(err) => {
                *phase = Phase::Idle;
                drop(phase);
                warn!(%err, "microphone unavailable");
                let err = match err {
                    ScribeError::Microphone(_) => err,
                    other => ScribeError::Microphone(other.to_string()),
                };
                self.notifier.notify(&err.to_string(), Severity::Error);
            }
        }
    }

    /// Stop recording.
    ///
    /// The state is back to idle and the device released before this returns.
    /// Returns the transcription to run, or `None` when nothing was recording
    /// or the clip was unusable.
    pub fn stop(&self) -> Option<PendingTranscription> {
        let previous = {
            let mut phase = self.phase.lock().expect("recorder lock poisoned");
            match std::mem::take(&mut *phase) {
                Phase::Starting { .. } => {
                    *phase = Phase::Starting { cancelled: true };
                    return None;
                }
                other => other,
            }
        };

        let Phase::Recording(mut guard) = previous else {
            return None;
        };
        let finished = guard.finish();
        drop(guard);

        let clip = match finished {
            Ok(clip) => clip,
            Err(err) => {
                error!(%err, "recording failed");
                self.notifier.notify(&notice_text(&err), Severity::Error);
                return None;
            }
        };

        if clip.duration_secs > f64::from(self.max_secs) {
            let err = ScribeError::RecordingTooLong {
                secs: clip.duration_secs.round() as u32,
                max_secs: self.max_secs,
            };
            info!(%err, "recording rejected");
            self.notifier.notify(&err.to_string(), Severity::Info);
            return None;
        }

        info!(secs = clip.duration_secs, bytes = clip.bytes.len(), "recording stopped");
        Some(PendingTranscription {
            clip,
            transcriber: Arc::clone(&self.transcriber),
            editor: Arc::clone(&self.editor),
            notifier: Arc::clone(&self.notifier),
        })
    }
}

/// A finished clip waiting to be transcribed.
#[must_use = "nothing is transcribed until the pending transcription is run"]
pub struct PendingTranscription {
    clip: AudioClip,
    transcriber: Arc<dyn Transcriber>,
    editor: Arc<dyn EditorBuffer>,
    notifier: Arc<dyn Notifier>,
}

impl PendingTranscription {
    pub fn clip(&self) -> &AudioClip {
        &self.clip
    }

    /// Transcribe the clip and insert the text into the editor. Returns
    /// whether anything was inserted.
    #[instrument(skip_all, fields(secs = self.clip.duration_secs))]
    pub async fn run(self) -> bool {
        let _busy = BusyGuard::show(Arc::clone(&self.notifier), "Transcribing...");
        match self.transcriber.transcribe(&self.clip).await {
            Ok(text) if text.trim().is_empty() => {
                self.notifier
                    .notify("No speech was recognised.", Severity::Info);
                false
            }
            Ok(text) => {
                self.editor.insert_text(&text);
                self.notifier
                    .notify("Transcription complete.", Severity::Success);
                true
            }
            Err(err) => {
                error!(%err, "transcription failed");
                self.notifier.notify(&notice_text(&err), Severity::Error);
                false
            }
        }
    }
}
