// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — builds the collaborators once at startup and hands
// them to the session controller and the UI.
//
// The collaborators are `Send + Sync` and shared as `Arc`s; the UI learns
// about their changes through a `watch` channel bumped by every notice and
// spinner change, which the root component turns into a re-render.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use scribe_bridge::{
    EditorBuffer, HttpBackend, LocalRenderer, MemoryEditor, MemoryTabStrip, NoticeBoard, Notifier,
    OcrService, StubMicrophone,
};
use scribe_core::AppConfig;
use scribe_core::error::Result;
use scribe_core::types::Severity;
use scribe_session::{Collaborators, SessionController, VoiceRecorder};
use tokio::sync::watch;
use tracing::info;

use super::data_dir;

/// Notifier that records into a [`NoticeBoard`] and pings the UI.
pub struct UiNotifier {
    board: Arc<NoticeBoard>,
    changed: watch::Sender<u64>,
}

impl UiNotifier {
    fn ping(&self) {
        self.changed.send_modify(|n| *n = n.wrapping_add(1));
    }
}

impl Notifier for UiNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.board.notify(message, severity);
        self.ping();
    }

    fn show_spinner(&self, label: &str) {
        self.board.show_spinner(label);
        self.ping();
    }

    fn hide_spinner(&self) {
        self.board.hide_spinner();
        self.ping();
    }
}

/// Shared services, available to every component via
/// `use_context::<AppServices>()`.
#[derive(Clone)]
pub struct AppServices {
    data_dir: PathBuf,
    config: Arc<Mutex<AppConfig>>,
    editor: Arc<MemoryEditor>,
    notices: Arc<NoticeBoard>,
    notifier: Arc<UiNotifier>,
    tabs: Arc<MemoryTabStrip>,
    backend: HttpBackend,
    renderer: LocalRenderer,
    recorder: Arc<VoiceRecorder>,
    changes: watch::Receiver<u64>,
}

impl AppServices {
    /// Initialise all services. Call once at app startup.
    pub fn init() -> Self {
        let dir = data_dir::data_dir();
        let config = if data_dir::has_config(&dir) {
            AppConfig::load(&dir).unwrap_or_default()
        } else {
            AppConfig::default()
        };
        info!(
            path = %dir.display(),
            backend = %config.backend_url,
            "initialising app services"
        );

        let (tx, rx) = watch::channel(0u64);
        let notices = Arc::new(NoticeBoard::new());
        let notifier = Arc::new(UiNotifier {
            board: Arc::clone(&notices),
            changed: tx,
        });
        let editor = Arc::new(MemoryEditor::new());
        let backend = HttpBackend::new(config.backend_url.clone());

        // No audio capture backend is wired in yet, so Record always reports
        // the microphone as unavailable.
        let recorder = Arc::new(VoiceRecorder::new(
            Arc::new(StubMicrophone),
            Arc::new(backend.clone()),
            editor.clone(),
            notifier.clone(),
            config.max_recording_secs,
        ));

        Self {
            data_dir: dir,
            config: Arc::new(Mutex::new(config)),
            editor,
            notices,
            notifier,
            tabs: Arc::new(MemoryTabStrip::new()),
            backend,
            renderer: LocalRenderer::new(),
            recorder,
            changes: rx,
        }
    }

    /// Build the session controller for this window.
    pub fn session(&self) -> SessionController {
        let config = self.config();
        SessionController::new(
            &config,
            Collaborators {
                ocr: self.ocr_service(),
                editor: self.editor.clone(),
                notifier: self.notifier.clone(),
                tabs: self.tabs.clone(),
                transliterator: Arc::new(self.backend.clone()),
                projects: Arc::new(self.backend.clone()),
            },
        )
    }

    #[cfg(feature = "ocr")]
    fn ocr_service(&self) -> Arc<dyn OcrService> {
        if scribe_document::ocr::models_available() {
            match scribe_bridge::LocalOcr::with_defaults() {
                Ok(local) => {
                    info!("using on-device OCR");
                    return Arc::new(local);
                }
                Err(err) => tracing::warn!(%err, "on-device OCR unavailable"),
            }
        }
        Arc::new(self.backend.clone())
    }

    #[cfg(not(feature = "ocr"))]
    fn ocr_service(&self) -> Arc<dyn OcrService> {
        Arc::new(self.backend.clone())
    }

    // -- Accessors -------------------------------------------------------------

    pub fn editor(&self) -> &Arc<MemoryEditor> {
        &self.editor
    }

    pub fn notices(&self) -> &Arc<NoticeBoard> {
        &self.notices
    }

    pub fn tabs(&self) -> &Arc<MemoryTabStrip> {
        &self.tabs
    }

    pub fn renderer(&self) -> LocalRenderer {
        self.renderer
    }

    pub fn recorder(&self) -> Arc<VoiceRecorder> {
        Arc::clone(&self.recorder)
    }

    /// A receiver that changes whenever a notice or the spinner changes.
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.changes.clone()
    }

    /// Replace the editor text with what the user typed.
    pub fn set_editor_text(&self, text: &str) {
        self.editor.set_text(text);
    }

    /// Show a notice raised by the UI itself (file dialog errors etc.).
    pub fn notify(&self, message: &str, severity: Severity) {
        self.notifier.notify(message, severity);
    }

    // -- Config ----------------------------------------------------------------

    pub fn config(&self) -> AppConfig {
        self.config.lock().expect("config lock poisoned").clone()
    }

    /// Store and persist a new configuration. Takes effect on next start.
    pub fn save_config(&self, config: AppConfig) -> Result<()> {
        config.persist(&self.data_dir)?;
        *self.config.lock().expect("config lock poisoned") = config;
        info!("configuration saved");
        Ok(())
    }
}
