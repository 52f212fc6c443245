// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Session controller — one per editing session.
//
// Pointer events and tab clicks are handled synchronously against the owned
// store and selector. Anything that awaits a collaborator is handed back as a
// `PendingCapture` or runs on the shared `SessionServices`, so callers never
// hold the controller across a suspension point.

use std::sync::Arc;

use scribe_bridge::{
    EditorBuffer, Notifier, OcrRequest, OcrService, ProjectStore, TabStrip, Transliterator,
};
use scribe_core::config::AppConfig;
use scribe_core::error::{Result, ScribeError};
use scribe_core::human_errors::humanize_error;
use scribe_core::types::{
    Document, PageRange, Project, ProjectId, ProjectSummary, Script, Severity,
};
use scribe_document::{
    CaptureCompositor, ModalHit, Point, PointerButton, PointerDown, PointerTarget, PointerUp,
    Rect, RegionSelector, Selection, detect_script,
};
use tracing::{error, info, instrument, warn};

use crate::busy::BusyGuard;
use crate::store::DocumentSessionStore;

/// Collaborators the session talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub ocr: Arc<dyn OcrService>,
    pub editor: Arc<dyn EditorBuffer>,
    pub notifier: Arc<dyn Notifier>,
    pub tabs: Arc<dyn TabStrip>,
    pub transliterator: Arc<dyn Transliterator>,
    pub projects: Arc<dyn ProjectStore>,
}

/// Text shown in the notice line for `err`.
///
/// Service messages are shown verbatim; local failures get the plain-language
/// summary.
pub(crate) fn notice_text(err: &ScribeError) -> String {
    match err {
        ScribeError::Ocr(_)
        | ScribeError::Transcription(_)
        | ScribeError::Transliteration(_)
        | ScribeError::ProjectStore(_)
        | ScribeError::Network(_)
        | ScribeError::Capture(_) => err.to_string(),
        other => humanize_error(other).message,
    }
}

// -- Services ------------------------------------------------------------------

enum CaptureJob {
    Region(Selection),
    Document(OcrRequest),
}

/// The async half of the session, shared with in-flight tasks.
pub struct SessionServices {
    compositor: CaptureCompositor,
    ocr: Arc<dyn OcrService>,
    editor: Arc<dyn EditorBuffer>,
    notifier: Arc<dyn Notifier>,
    transliterator: Arc<dyn Transliterator>,
    projects: Arc<dyn ProjectStore>,
}

impl SessionServices {
    pub fn editor(&self) -> &Arc<dyn EditorBuffer> {
        &self.editor
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    fn report(&self, err: &ScribeError) {
        self.notifier.notify(&notice_text(err), Severity::Error);
    }

    async fn recognize(&self, job: CaptureJob) -> Result<String> {
        let request = match job {
            CaptureJob::Region(selection) => {
                let captured = self.compositor.capture(&selection)?;
                let file_name = captured.file_name();
                OcrRequest::image(captured.bytes, file_name, captured.format.mime_type())
            }
            CaptureJob::Document(request) => request,
        };
        self.ocr.recognize(request).await
    }

    /// Transliterate the whole editor into `target`.
    ///
    /// The source script is detected from the text. The result is written back
    /// only if the editor still holds the text that was sent; returns whether
    /// it was written.
    #[instrument(skip(self))]
    pub async fn transliterate_editor(&self, target: Script) -> bool {
        let original = self.editor.get_text();
        if original.trim().is_empty() {
            self.notifier
                .notify("There is no text to transliterate.", Severity::Info);
            return false;
        }
        let Some(source) = detect_script(&original) else {
            self.report(&ScribeError::UnknownScript);
            return false;
        };
        if source == target {
            self.notifier.notify(
                &format!("The text is already in {}.", target),
                Severity::Info,
            );
            return false;
        }

        let _busy = BusyGuard::show(Arc::clone(&self.notifier), "Transliterating...");
        match self
            .transliterator
            .transliterate(&original, source, target)
            .await
        {
            Ok(result) => {
                if self.editor.get_text() != original {
                    warn!("editor changed during transliteration, result dropped");
                    self.notifier.notify(
                        "The text changed while transliterating. Try again.",
                        Severity::Info,
                    );
                    return false;
                }
                self.editor.set_text(&result);
                info!(from = %source, to = %target, "editor transliterated");
                self.notifier.notify(
                    &format!("Transliterated from {} to {}.", source, target),
                    Severity::Success,
                );
                true
            }
            Err(err) => {
                error!(%err, "transliteration failed");
                self.report(&err);
                false
            }
        }
    }

    /// Save the editor's current text as project `name`.
    #[instrument(skip(self))]
    pub async fn save_project(&self, name: &str) -> Option<ProjectId> {
        let name = name.trim();
        if name.is_empty() {
            self.notifier
                .notify("Give the project a name first.", Severity::Info);
            return None;
        }
        let project = Project {
            name: name.to_string(),
            content: self.editor.get_text(),
        };

        let _busy = BusyGuard::show(Arc::clone(&self.notifier), "Saving project...");
        match self.projects.save(&project).await {
            Ok(id) => {
                info!(%id, "project saved");
                self.notifier
                    .notify(&format!("Saved \"{}\".", project.name), Severity::Success);
                Some(id)
            }
            Err(err) => {
                error!(%err, "project save failed");
                self.report(&err);
                None
            }
        }
    }

    /// Replace the editor's text with the stored project.
    #[instrument(skip(self))]
    pub async fn load_project(&self, id: &ProjectId) -> Option<Project> {
        let _busy = BusyGuard::show(Arc::clone(&self.notifier), "Loading project...");
        match self.projects.load(id).await {
            Ok(project) => {
                self.editor.set_text(&project.content);
                self.notifier
                    .notify(&format!("Opened \"{}\".", project.name), Severity::Success);
                Some(project)
            }
            Err(err) => {
                error!(%err, "project load failed");
                self.report(&err);
                None
            }
        }
    }

    /// Stored projects, or an empty list (with an error notice) on failure.
    pub async fn list_projects(&self) -> Vec<ProjectSummary> {
        match self.projects.list().await {
            Ok(list) => list,
            Err(err) => {
                self.report(&err);
                Vec::new()
            }
        }
    }
}

// -- Pending capture -------------------------------------------------------------

/// A confirmed snip or a whole-document OCR request, ready to run.
#[must_use = "nothing is recognised until the capture is run"]
pub struct PendingCapture {
    services: Arc<SessionServices>,
    job: CaptureJob,
}

impl PendingCapture {
    /// The snapshot taken when the selection was confirmed.
    pub fn selection(&self) -> Option<&Selection> {
        match &self.job {
            CaptureJob::Region(selection) => Some(selection),
            CaptureJob::Document(_) => None,
        }
    }

    /// Run and insert the outcome into the editor.
    pub async fn run(self) {
        let editor = Arc::clone(&self.services.editor);
        self.run_with(move |text| editor.insert_text(&text)).await;
    }

    /// Run, handing the recognised text (or a marked error string) to
    /// `complete`.
    ///
    /// The spinner is shown for the whole operation. An empty result only
    /// shows an info notice and does not call `complete`.
    pub async fn run_with<F>(self, complete: F)
    where
        F: FnOnce(String) + Send,
    {
        let services = self.services;
        let _busy = BusyGuard::show(Arc::clone(&services.notifier), "Recognizing text...");

        match services.recognize(self.job).await {
            Ok(text) if text.trim().is_empty() => {
                info!("OCR returned no text");
                services
                    .notifier
                    .notify("No text was found in the selection.", Severity::Info);
            }
            Ok(text) => {
                info!(chars = text.chars().count(), "OCR succeeded");
                complete(text);
                services
                    .notifier
                    .notify("Text recognized.", Severity::Success);
            }
            Err(err) => {
                error!(%err, "OCR failed");
                services.report(&err);
                complete(format!("[OCR Error: {}]", err));
            }
        }
    }
}

// -- Controller ------------------------------------------------------------------

pub struct SessionController {
    store: DocumentSessionStore,
    selector: RegionSelector,
    services: Arc<SessionServices>,
}

impl SessionController {
    pub fn new(config: &AppConfig, collaborators: Collaborators) -> Self {
        let Collaborators {
            ocr,
            editor,
            notifier,
            tabs,
            transliterator,
            projects,
        } = collaborators;

        Self {
            store: DocumentSessionStore::new(tabs),
            selector: RegionSelector::new(config.selection),
            services: Arc::new(SessionServices {
                compositor: CaptureCompositor::new(config.capture_format),
                ocr,
                editor,
                notifier,
                transliterator,
                projects,
            }),
        }
    }

    pub fn store(&self) -> &DocumentSessionStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DocumentSessionStore {
        &mut self.store
    }

    pub fn selector(&self) -> &RegionSelector {
        &self.selector
    }

    pub fn services(&self) -> Arc<SessionServices> {
        Arc::clone(&self.services)
    }

    // -- Tabs ------------------------------------------------------------------

    /// Switch tabs. An open overlay belongs to the old tab's pages and is dropped.
    pub fn select_document(&mut self, index: usize) -> bool {
        if self.store.active_index() != Some(index) {
            self.selector.cancel();
        }
        self.store.select(index)
    }

    /// Add a loaded document as a new, active tab.
    pub fn open_document(&mut self, document: Document) -> usize {
        self.selector.cancel();
        self.store.open(document)
    }

    /// Close a tab, dropping the overlay if it was the active one.
    pub fn close_document(&mut self, index: usize) -> bool {
        if self.store.active_index() == Some(index) {
            self.selector.cancel();
        }
        self.store.remove_document(index)
    }

    // -- Snip ------------------------------------------------------------------

    pub fn pointer_down(
        &mut self,
        button: PointerButton,
        at: Point,
        target: PointerTarget,
    ) -> PointerDown {
        self.selector.pointer_down(button, at, target)
    }

    pub fn pointer_move(&mut self, at: Point) -> Option<Rect> {
        self.selector.pointer_move(at)
    }

    pub fn pointer_up(&mut self, at: Point) -> PointerUp {
        self.selector.pointer_up(at)
    }

    pub fn cancel_selection(&mut self) -> bool {
        self.selector.cancel()
    }

    pub fn dismiss(&mut self, hit: ModalHit) -> bool {
        self.selector.dismiss(hit)
    }

    /// Accept the pending selection and return the capture to run.
    pub fn confirm(&mut self) -> Option<PendingCapture> {
        let selection = self.selector.confirm()?;
        Some(PendingCapture {
            services: Arc::clone(&self.services),
            job: CaptureJob::Region(selection),
        })
    }

    // -- Whole-document OCR ----------------------------------------------------

    /// OCR the active document, optionally limited to `range` (1-indexed,
    /// inclusive). The range is clamped to the document's pages; an error
    /// notice and `None` mean there is no active document or no page of it
    /// is left.
    pub fn ocr_active_document(&self, range: Option<PageRange>) -> Option<PendingCapture> {
        let request = self
            .store
            .get_active()
            .ok_or(ScribeError::NoActiveDocument)
            .and_then(|document| {
                let pages = range
                    .map(|range| range.fit(document.page_count()))
                    .transpose()?;
                Ok(OcrRequest::document(document.source(), pages))
            });

        match request {
            Ok(request) => Some(PendingCapture {
                services: Arc::clone(&self.services),
                job: CaptureJob::Document(request),
            }),
            Err(err) => {
                warn!(%err, "document OCR rejected");
                self.services.report(&err);
                None
            }
        }
    }

    // -- Editor ----------------------------------------------------------------

    pub async fn transliterate_editor(&self, target: Script) -> bool {
        self.services.transliterate_editor(target).await
    }

    pub async fn save_project(&self, name: &str) -> Option<ProjectId> {
        self.services.save_project(name).await
    }

    pub async fn load_project(&self, id: &ProjectId) -> Option<Project> {
        self.services.load_project(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Harness, ScriptedOcr, TaggingTransliterator, doc, pdf_doc, surface};
    use scribe_bridge::Notice;
    use scribe_core::config::CaptureFormat;
    use std::sync::Mutex;

    fn controller(harness: &Harness, ocr: Arc<ScriptedOcr>) -> SessionController {
        SessionController::new(
            &AppConfig::default(),
            harness.collaborators(ocr, Arc::new(TaggingTransliterator::new())),
        )
    }

    fn drag(
        session: &mut SessionController,
        target: PointerTarget,
        from: (f64, f64),
        to: (f64, f64),
    ) -> PointerUp {
        session.pointer_down(PointerButton::Primary, Point::new(from.0, from.1), target);
        session.pointer_move(Point::new(to.0, to.1));
        session.pointer_up(Point::new(to.0, to.1))
    }

    fn decoded_size(request: &OcrRequest) -> (u32, u32) {
        let img = image::load_from_memory(&request.bytes).unwrap();
        (img.width(), img.height())
    }

    #[tokio::test]
    async fn scenario_a_snip_to_editor() {
        let harness = Harness::new();
        let ocr = ScriptedOcr::replying(Ok("Hello".into()));
        let mut session = controller(&harness, ocr.clone());
        session.store_mut().add_document(doc("page.png", 1));
        session.select_document(0);

        let page = surface((800, 600), (800.0, 600.0));
        let up = drag(&mut session, PointerTarget::Surface(page), (50.0, 50.0), (150.0, 120.0));
        assert_eq!(up, PointerUp::AwaitingConfirmation(Rect::new(50.0, 50.0, 100.0, 70.0)));

        let pending = session.confirm().expect("selection pending");
        assert_eq!(pending.selection().unwrap().rect, Rect::new(50.0, 50.0, 100.0, 70.0));
        assert!(session.selector().is_idle());

        pending.run().await;

        let requests = ocr.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].mime_type, "image/png");
        assert_eq!(requests[0].file_name, "snip.png");
        assert_eq!(decoded_size(&requests[0]), (100, 70));

        assert!(harness.editor.get_text().contains("Hello"));
        assert_eq!(
            harness.notices.latest(),
            Some(Notice {
                message: "Text recognized.".into(),
                severity: Severity::Success
            })
        );
        assert!(harness.notices.spinner().is_none());
        assert_eq!(harness.notices.spinner_counts(), (1, 1));
    }

    #[tokio::test]
    async fn scenario_b_tiny_drag_never_reaches_ocr() {
        let harness = Harness::new();
        let ocr = ScriptedOcr::replying(Ok("Hello".into()));
        let mut session = controller(&harness, ocr.clone());

        let page = surface((800, 600), (800.0, 600.0));
        let up = drag(&mut session, PointerTarget::Surface(page), (50.0, 50.0), (55.0, 53.0));
        assert_eq!(up, PointerUp::Discarded);
        assert!(session.confirm().is_none());
        assert!(ocr.requests().is_empty());
        assert!(harness.notices.notices().is_empty());
        assert_eq!(harness.notices.spinner_counts(), (0, 0));
    }

    #[tokio::test]
    async fn scenario_c_service_error_reaches_notice_and_callback() {
        let harness = Harness::new();
        let ocr = ScriptedOcr::replying(Err(ScribeError::Ocr("engine unavailable".into())));
        let mut session = controller(&harness, ocr);

        let page = surface((800, 600), (800.0, 600.0));
        drag(&mut session, PointerTarget::Surface(page), (50.0, 50.0), (150.0, 120.0));

        let received = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&received);
        session
            .confirm()
            .unwrap()
            .run_with(move |text| *sink.lock().unwrap() = Some(text))
            .await;

        assert_eq!(
            harness.notices.latest(),
            Some(Notice {
                message: "engine unavailable".into(),
                severity: Severity::Error
            })
        );
        let received = received.lock().unwrap().clone().unwrap();
        assert!(received.contains("engine unavailable"));
        assert!(received.starts_with("[OCR Error"));
        assert!(harness.notices.spinner().is_none());
    }

    #[tokio::test]
    async fn scaled_surface_captures_native_pixels() {
        let harness = Harness::new();
        let ocr = ScriptedOcr::replying(Ok("x".into()));
        let mut session = controller(&harness, ocr.clone());

        // Page rendered at 2x, displayed at half size.
        let page = surface((1600, 1200), (800.0, 600.0));
        drag(&mut session, PointerTarget::Surface(page), (150.0, 120.0), (50.0, 50.0));
        session.confirm().unwrap().run().await;

        assert_eq!(decoded_size(&ocr.requests()[0]), (200, 140));
    }

    #[tokio::test]
    async fn empty_result_is_info_and_skips_callback() {
        let harness = Harness::new();
        let ocr = ScriptedOcr::replying(Ok("  \n".into()));
        let mut session = controller(&harness, ocr);

        let page = surface((800, 600), (800.0, 600.0));
        drag(&mut session, PointerTarget::Surface(page), (0.0, 0.0), (40.0, 40.0));

        let called = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&called);
        session
            .confirm()
            .unwrap()
            .run_with(move |_| *flag.lock().unwrap() = true)
            .await;

        assert!(!*called.lock().unwrap());
        assert_eq!(harness.notices.latest().unwrap().severity, Severity::Info);
        assert!(harness.notices.spinner().is_none());
    }

    #[tokio::test]
    async fn capture_failure_marks_editor_and_hides_spinner() {
        let harness = Harness::new();
        let ocr = ScriptedOcr::replying(Ok("unused".into()));
        let mut session = controller(&harness, ocr.clone());

        // Selection entirely outside the raster.
        let page = surface((100, 100), (100.0, 100.0));
        drag(&mut session, PointerTarget::Surface(page), (200.0, 200.0), (260.0, 260.0));
        session.confirm().unwrap().run().await;

        assert!(ocr.requests().is_empty());
        assert!(harness.editor.get_text().contains("[OCR Error: capture failed"));
        assert_eq!(harness.notices.latest().unwrap().severity, Severity::Error);
        assert_eq!(harness.notices.spinner_counts(), (1, 1));
    }

    #[tokio::test]
    async fn jpeg_capture_format_is_honoured() {
        let harness = Harness::new();
        let ocr = ScriptedOcr::replying(Ok("x".into()));
        let config = AppConfig {
            capture_format: CaptureFormat::Jpeg { quality: 90 },
            ..AppConfig::default()
        };
        let mut session = SessionController::new(
            &config,
            harness.collaborators(ocr.clone(), Arc::new(TaggingTransliterator::new())),
        );

        let page = surface((800, 600), (800.0, 600.0));
        drag(&mut session, PointerTarget::Surface(page), (10.0, 10.0), (60.0, 60.0));
        session.confirm().unwrap().run().await;

        let request = &ocr.requests()[0];
        assert_eq!(request.mime_type, "image/jpeg");
        assert_eq!(request.file_name, "snip.jpg");
    }

    #[test]
    fn switching_tabs_drops_overlay() {
        let harness = Harness::new();
        let mut session = controller(&harness, ScriptedOcr::replying(Ok(String::new())));
        session.store_mut().add_document(doc("a.png", 1));
        session.store_mut().add_document(doc("b.png", 1));
        session.select_document(0);

        let page = surface((800, 600), (800.0, 600.0));
        drag(&mut session, PointerTarget::Surface(page), (0.0, 0.0), (50.0, 50.0));
        assert!(session.selector().is_pending());

        session.select_document(1);
        assert!(session.selector().is_idle());
        assert!(session.confirm().is_none());
    }

    #[test]
    fn closing_active_tab_drops_overlay() {
        let harness = Harness::new();
        let mut session = controller(&harness, ScriptedOcr::replying(Ok(String::new())));
        session.store_mut().add_document(doc("a.png", 1));
        session.select_document(0);

        let page = surface((800, 600), (800.0, 600.0));
        drag(&mut session, PointerTarget::Surface(page), (0.0, 0.0), (50.0, 50.0));
        assert!(session.close_document(0));
        assert!(session.selector().is_idle());
        assert!(!harness.tabs.ocr_enabled());
    }

    #[test]
    fn opening_a_document_activates_it_and_drops_overlay() {
        let harness = Harness::new();
        let mut session = controller(&harness, ScriptedOcr::replying(Ok(String::new())));
        session.open_document(doc("a.png", 1));

        let page = surface((800, 600), (800.0, 600.0));
        drag(&mut session, PointerTarget::Surface(page), (0.0, 0.0), (50.0, 50.0));
        assert!(session.selector().is_pending());

        assert_eq!(session.open_document(pdf_doc("b.pdf", 3)), 1);
        assert!(session.selector().is_idle());
        assert_eq!(session.store().active_index(), Some(1));
        assert_eq!(harness.tabs.active(), Some(1));
        assert!(harness.tabs.ocr_enabled());
    }

    #[tokio::test]
    async fn document_ocr_sends_source_with_page_range() {
        let harness = Harness::new();
        let ocr = ScriptedOcr::replying(Ok("page two text".into()));
        let mut session = controller(&harness, ocr.clone());
        session.store_mut().add_document(pdf_doc("book.pdf", 5));
        session.select_document(0);

        session
            .ocr_active_document(Some(PageRange::new(2, 3)))
            .expect("document active")
            .run()
            .await;

        let request = &ocr.requests()[0];
        assert_eq!(request.file_name, "book.pdf");
        assert_eq!(request.mime_type, "application/pdf");
        assert_eq!(request.pages, Some(PageRange::new(2, 3)));
        assert!(harness.editor.get_text().contains("page two text"));
    }

    #[test]
    fn document_ocr_requires_active_document() {
        let harness = Harness::new();
        let session = controller(&harness, ScriptedOcr::replying(Ok(String::new())));
        assert!(session.ocr_active_document(None).is_none());

        let notice = harness.notices.latest().unwrap();
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(
            notice.message,
            humanize_error(&ScribeError::NoActiveDocument).message
        );
    }

    #[tokio::test]
    async fn document_ocr_clamps_range_to_the_last_page() {
        let harness = Harness::new();
        let ocr = ScriptedOcr::replying(Ok("tail pages".into()));
        let mut session = controller(&harness, ocr.clone());
        session.store_mut().add_document(pdf_doc("book.pdf", 5));
        session.select_document(0);

        session
            .ocr_active_document(Some(PageRange::new(3, 10)))
            .expect("range overlaps the document")
            .run()
            .await;
        assert_eq!(ocr.requests()[0].pages, Some(PageRange::new(3, 5)));

        session
            .ocr_active_document(Some(PageRange::from_page(4)))
            .expect("open-ended range")
            .run()
            .await;
        assert_eq!(ocr.requests()[1].pages, Some(PageRange::new(4, 5)));
    }

    #[test]
    fn document_ocr_rejects_range_beyond_the_document() {
        let harness = Harness::new();
        let mut session = controller(&harness, ScriptedOcr::replying(Ok(String::new())));
        session.store_mut().add_document(pdf_doc("book.pdf", 2));
        session.select_document(0);

        assert!(session.ocr_active_document(Some(PageRange::new(3, 4))).is_none());
        assert_eq!(harness.notices.latest().unwrap().severity, Severity::Error);
        assert_eq!(harness.notices.spinner_counts(), (0, 0));
    }

    fn transliterating(
        harness: &Harness,
        transliterator: TaggingTransliterator,
    ) -> SessionController {
        SessionController::new(
            &AppConfig::default(),
            harness.collaborators(
                ScriptedOcr::replying(Ok(String::new())),
                Arc::new(transliterator),
            ),
        )
    }

    #[tokio::test]
    async fn transliteration_detects_source_and_writes_back() {
        let harness = Harness::new();
        let session = transliterating(&harness, TaggingTransliterator::new());
        harness.editor.set_text("ನಮಸ್ಕಾರ");

        assert!(session.transliterate_editor(Script::Devanagari).await);
        assert_eq!(harness.editor.get_text(), "<sa>ನಮಸ್ಕಾರ");
        assert_eq!(harness.notices.latest().unwrap().severity, Severity::Success);
        assert!(harness.notices.spinner().is_none());
    }

    #[tokio::test]
    async fn transliteration_drops_result_after_concurrent_edit() {
        let harness = Harness::new();
        let mut transliterator = TaggingTransliterator::new();
        transliterator.interfere = Some(harness.editor.clone());
        let session = transliterating(&harness, transliterator);
        harness.editor.set_text("namaste");

        assert!(!session.transliterate_editor(Script::Kannada).await);
        assert_eq!(harness.editor.get_text(), "edited meanwhile");
        assert_eq!(harness.notices.latest().unwrap().severity, Severity::Info);
    }

    #[tokio::test]
    async fn transliteration_of_unknown_script_is_an_error_notice() {
        let harness = Harness::new();
        let session = transliterating(&harness, TaggingTransliterator::new());
        harness.editor.set_text("1234 !!");

        assert!(!session.transliterate_editor(Script::Tamil).await);
        assert_eq!(harness.notices.latest().unwrap().severity, Severity::Error);
        assert_eq!(harness.editor.get_text(), "1234 !!");
    }

    #[tokio::test]
    async fn transliteration_to_same_script_is_skipped() {
        let harness = Harness::new();
        let session = transliterating(&harness, TaggingTransliterator::new());
        harness.editor.set_text("hello");

        assert!(!session.transliterate_editor(Script::Latin).await);
        assert_eq!(harness.notices.latest().unwrap().severity, Severity::Info);
        assert_eq!(harness.notices.spinner_counts(), (0, 0));
    }

    #[tokio::test]
    async fn transliteration_failure_keeps_text() {
        let harness = Harness::new();
        let mut transliterator = TaggingTransliterator::new();
        transliterator.fail_with = Some("service down".into());
        let session = transliterating(&harness, transliterator);
        harness.editor.set_text("hello");

        assert!(!session.transliterate_editor(Script::Telugu).await);
        assert_eq!(harness.editor.get_text(), "hello");
        assert_eq!(
            harness.notices.latest(),
            Some(Notice {
                message: "service down".into(),
                severity: Severity::Error
            })
        );
    }

    #[tokio::test]
    async fn project_round_trip_through_store() {
        let harness = Harness::new();
        let session = controller(&harness, ScriptedOcr::replying(Ok(String::new())));
        harness.editor.set_text("chapter one");

        let id = session.save_project("  Chapter 1 ").await.unwrap();
        harness.editor.set_text("scratch");

        let project = session.load_project(&id).await.unwrap();
        assert_eq!(project.name, "Chapter 1");
        assert_eq!(harness.editor.get_text(), "chapter one");
        assert_eq!(session.services().list_projects().await.len(), 1);
    }

    #[tokio::test]
    async fn saving_without_name_is_refused() {
        let harness = Harness::new();
        let session = controller(&harness, ScriptedOcr::replying(Ok(String::new())));
        assert!(session.save_project("   ").await.is_none());
        assert_eq!(harness.notices.latest().unwrap().severity, Severity::Info);
    }

    #[tokio::test]
    async fn loading_missing_project_reports_error() {
        let harness = Harness::new();
        let session = controller(&harness, ScriptedOcr::replying(Ok(String::new())));
        harness.editor.set_text("keep me");

        assert!(session.load_project(&ProjectId("missing".into())).await.is_none());
        assert_eq!(harness.editor.get_text(), "keep me");
        assert_eq!(harness.notices.latest().unwrap().severity, Severity::Error);
        assert!(harness.notices.spinner().is_none());
    }
}
