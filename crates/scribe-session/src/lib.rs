// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scribe-session — the editing session for Indic Scribe.
//
// Owns the open documents (the tab strip's model), the snip selector and the
// orchestration around the collaborators: capture then OCR then editor,
// whole-document OCR, transliteration, project save/load and voice recording.
// Everything here is driven by UI event handlers; async operations are
// returned as pending values that the caller spawns.

pub mod busy;
pub mod controller;
pub mod recorder;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use busy::BusyGuard;
pub use controller::{Collaborators, PendingCapture, SessionController, SessionServices};
pub use recorder::{PendingTranscription, RecorderState, VoiceRecorder};
pub use store::DocumentSessionStore;
