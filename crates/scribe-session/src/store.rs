// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document session store — the open documents in tab order and which one is
// active.
//
// Every mutation re-renders the tab strip and toggles the OCR trigger to
// "enabled iff at least one document is open".

use std::sync::Arc;

use scribe_bridge::{PdfRenderer, TabStrip, TabView};
use scribe_core::error::Result;
use scribe_core::types::{Document, SourceFile};
use tracing::{debug, info, instrument, warn};

pub struct DocumentSessionStore {
    documents: Vec<Document>,
    active: Option<usize>,
    tabs: Arc<dyn TabStrip>,
}

impl DocumentSessionStore {
    pub fn new(tabs: Arc<dyn TabStrip>) -> Self {
        let store = Self {
            documents: Vec::new(),
            active: None,
            tabs,
        };
        store.refresh();
        store
    }

    /// Append a document and return its index. The active document is unchanged.
    pub fn add_document(&mut self, document: Document) -> usize {
        info!(
            name = document.name(),
            pages = document.page_count(),
            "document added"
        );
        self.documents.push(document);
        self.refresh();
        self.documents.len() - 1
    }

    /// Remove the document at `index`.
    ///
    /// Removing the active document selects the one before it (or none when
    /// the store becomes empty); removing one before the active document keeps
    /// the same document active. Out-of-range indices are ignored.
    pub fn remove_document(&mut self, index: usize) -> bool {
        if index >= self.documents.len() {
            warn!(index, len = self.documents.len(), "remove_document out of range");
            return false;
        }

        let removed = self.documents.remove(index);
        self.active = match self.active {
            _ if self.documents.is_empty() => None,
            Some(active) if index == active => Some(active.saturating_sub(1)),
            Some(active) if index < active => Some(active - 1),
            other => other,
        };

        debug!(name = removed.name(), active = ?self.active, "document removed");
        self.refresh();
        true
    }

    /// Make the document at `index` active. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.documents.len() {
            warn!(index, len = self.documents.len(), "select out of range");
            return false;
        }
        self.active = Some(index);
        self.refresh();
        true
    }

    pub fn get_active(&self) -> Option<&Document> {
        self.active.and_then(|index| self.documents.get(index))
    }

    pub fn clear(&mut self) {
        self.documents.clear();
        self.active = None;
        self.refresh();
    }

    /// Count the pages of `source` and build the document for it.
    ///
    /// Needs no access to the store, so callers can await it before taking
    /// the store mutably for [`open`](Self::open).
    #[instrument(skip_all, fields(file = %source.name))]
    pub async fn load_document(
        source: SourceFile,
        renderer: &dyn PdfRenderer,
    ) -> Result<Document> {
        let page_count = renderer.page_count(&source).await?;
        debug!(pages = page_count, "document loaded");
        Document::new(source, page_count)
    }

    /// Add a document and make it active.
    pub fn open(&mut self, document: Document) -> usize {
        let index = self.add_document(document);
        self.select(index);
        index
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    fn refresh(&self) {
        let views: Vec<TabView> = self
            .documents
            .iter()
            .map(|doc| TabView {
                title: doc.name().to_string(),
                page_count: doc.page_count(),
            })
            .collect();
        self.tabs.render(&views, self.active);
        self.tabs.set_ocr_enabled(!self.documents.is_empty());
    }
}
