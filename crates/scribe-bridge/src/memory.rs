// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory collaborators: editor buffer, notice board, tab strip and project
// store. The desktop app renders from these; tests assert against them.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use scribe_core::error::{Result, ScribeError};
use scribe_core::types::{Project, ProjectId, ProjectSummary, Severity};
use uuid::Uuid;

use crate::traits::{EditorBuffer, Notifier, ProjectStore, TabStrip, TabView};

// -- Editor ------------------------------------------------------------------

#[derive(Debug, Default)]
struct TextState {
    text: String,
    /// Byte offset, always on a char boundary.
    cursor: usize,
}

/// Plain-text editor buffer with a cursor.
#[derive(Debug, Default)]
pub struct MemoryEditor {
    state: Mutex<TextState>,
}

impl MemoryEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor position as a byte offset into [`EditorBuffer::get_text`].
    pub fn cursor(&self) -> usize {
        self.state.lock().expect("editor lock poisoned").cursor
    }
}

impl EditorBuffer for MemoryEditor {
    fn insert_text(&self, text: &str) {
        let mut state = self.state.lock().expect("editor lock poisoned");
        let before = &state.text[..state.cursor];

        let mut span = String::with_capacity(text.len() + 4);
        if !before.is_empty() && !before.ends_with("\n\n") {
            span.push_str(if before.ends_with('\n') { "\n" } else { "\n\n" });
        }
        span.push_str(text);
        span.push_str("\n\n");

        let at = state.cursor;
        state.text.insert_str(at, &span);
        state.cursor = at + span.len();
    }

    fn set_text(&self, text: &str) {
        let mut state = self.state.lock().expect("editor lock poisoned");
        state.text = text.to_string();
        state.cursor = state.text.len();
    }

    fn get_text(&self) -> String {
        self.state.lock().expect("editor lock poisoned").text.clone()
    }
}

// -- Notices -----------------------------------------------------------------

/// One toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

/// Notices kept before the oldest are dropped.
pub const NOTICE_HISTORY: usize = 50;

#[derive(Debug, Default)]
struct BoardState {
    notices: Vec<Notice>,
    spinner: Option<String>,
    spinner_shows: usize,
    spinner_hides: usize,
}

/// Records notices and the spinner label.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    state: Mutex<BoardState>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent notices (up to [`NOTICE_HISTORY`]), oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.state.lock().expect("notice lock poisoned").notices.clone()
    }

    pub fn latest(&self) -> Option<Notice> {
        self.state
            .lock()
            .expect("notice lock poisoned")
            .notices
            .last()
            .cloned()
    }

    /// The spinner label while busy.
    pub fn spinner(&self) -> Option<String> {
        self.state.lock().expect("notice lock poisoned").spinner.clone()
    }

    /// How often the spinner was shown and hidden.
    pub fn spinner_counts(&self) -> (usize, usize) {
        let state = self.state.lock().expect("notice lock poisoned");
        (state.spinner_shows, state.spinner_hides)
    }

    pub fn clear(&self) {
        self.state.lock().expect("notice lock poisoned").notices.clear();
    }
}

impl Notifier for NoticeBoard {
    fn notify(&self, message: &str, severity: Severity) {
        let mut state = self.state.lock().expect("notice lock poisoned");
        state.notices.push(Notice {
            message: message.to_string(),
            severity,
        });
        if state.notices.len() > NOTICE_HISTORY {
            let excess = state.notices.len() - NOTICE_HISTORY;
            state.notices.drain(..excess);
        }
    }

    fn show_spinner(&self, label: &str) {
        let mut state = self.state.lock().expect("notice lock poisoned");
        state.spinner = Some(label.to_string());
        state.spinner_shows += 1;
    }

    fn hide_spinner(&self) {
        let mut state = self.state.lock().expect("notice lock poisoned");
        state.spinner = None;
        state.spinner_hides += 1;
    }
}

// -- Tab strip ---------------------------------------------------------------

#[derive(Debug, Default)]
struct StripState {
    tabs: Vec<TabView>,
    active: Option<usize>,
    ocr_enabled: bool,
    renders: usize,
}

/// Keeps the last rendered tab list.
#[derive(Debug, Default)]
pub struct MemoryTabStrip {
    state: Mutex<StripState>,
}

impl MemoryTabStrip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tabs(&self) -> Vec<TabView> {
        self.state.lock().expect("tab lock poisoned").tabs.clone()
    }

    pub fn active(&self) -> Option<usize> {
        self.state.lock().expect("tab lock poisoned").active
    }

    pub fn ocr_enabled(&self) -> bool {
        self.state.lock().expect("tab lock poisoned").ocr_enabled
    }

    pub fn render_count(&self) -> usize {
        self.state.lock().expect("tab lock poisoned").renders
    }
}

impl TabStrip for MemoryTabStrip {
    fn render(&self, tabs: &[TabView], active: Option<usize>) {
        let mut state = self.state.lock().expect("tab lock poisoned");
        state.tabs = tabs.to_vec();
        state.active = active;
        state.renders += 1;
    }

    fn set_ocr_enabled(&self, enabled: bool) {
        self.state.lock().expect("tab lock poisoned").ocr_enabled = enabled;
    }
}

// -- Projects ----------------------------------------------------------------

/// Project store kept in memory, for offline use.
#[derive(Debug, Default)]
pub struct MemoryProjectStore {
    projects: Mutex<HashMap<ProjectId, (Project, chrono::DateTime<Utc>)>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn save(&self, project: &Project) -> Result<ProjectId> {
        let mut projects = self.projects.lock().expect("project lock poisoned");
        // Saving under an existing name overwrites that project.
        let id = projects
            .iter()
            .find(|(_, (p, _))| p.name == project.name)
            .map(|(id, _)| id.clone())
            .unwrap_or_else(|| ProjectId(Uuid::new_v4().to_string()));
        projects.insert(id.clone(), (project.clone(), Utc::now()));
        Ok(id)
    }

    async fn load(&self, id: &ProjectId) -> Result<Project> {
        self.projects
            .lock()
            .expect("project lock poisoned")
            .get(id)
            .map(|(project, _)| project.clone())
            .ok_or_else(|| ScribeError::ProjectStore(format!("project {id} not found")))
    }

    async fn list(&self) -> Result<Vec<ProjectSummary>> {
        let projects = self.projects.lock().expect("project lock poisoned");
        let mut list: Vec<ProjectSummary> = projects
            .iter()
            .map(|(id, (project, modified))| ProjectSummary {
                id: id.clone(),
                name: project.name.clone(),
                modified_at: Some(*modified),
            })
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }
}
