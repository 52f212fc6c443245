// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Workspace page — tabs, page preview with the snip overlay, the editor and
// the notice line.

use std::collections::HashSet;
use std::sync::Arc;

use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;

use scribe_bridge::{EditorBuffer, PdfRenderer};
use scribe_core::human_errors::humanize_error;
use scribe_core::types::{ProjectSummary, Script, Severity, SourceFile};
use scribe_document::{ModalHit, Point, PointerButton, PointerTarget, Rect};
use scribe_session::{DocumentSessionStore, RecorderState, SessionController};

use crate::Revision;
use crate::services::app_services::AppServices;
use crate::state::{AppState, PagePreview, Preview, page_data_url, parse_page_range};

const OPEN_FILTER: &[&str] = &["pdf", "png", "jpg", "jpeg", "tif", "tiff", "bmp", "webp"];

const BUTTON: &str = "padding: 6px 12px; border-radius: 6px; border: 1px solid #007aff; color: #007aff; background: white; font-size: 14px;";
const PRIMARY_BUTTON: &str = "padding: 6px 12px; border-radius: 6px; border: none; background: #007aff; color: white; font-size: 14px;";

#[component]
pub fn Workspace() -> Element {
    rsx! {
        div { style: "display: flex; flex-direction: column; height: 100%; gap: 8px;",
            Toolbar {}
            ProjectList {}
            TabBar {}
            div { style: "flex: 1; display: flex; gap: 12px; min-height: 0;",
                PreviewPane {}
                EditorPane {}
            }
            NoticeLine {}
            ConfirmModal {}
        }
    }
}

// -- Toolbar -----------------------------------------------------------------

#[component]
fn Toolbar() -> Element {
    let svc = use_context::<AppServices>();
    let session = use_context::<Signal<SessionController>>();
    let mut state = use_context::<Signal<AppState>>();
    let Revision(mut revision) = use_context::<Revision>();
    let _ = revision();
    let _ = session.read();

    let ocr_enabled = svc.tabs().ocr_enabled();
    let recording = svc.recorder().state();
    let record_label = match recording {
        RecorderState::Idle => "Record",
        RecorderState::Starting => "Starting...",
        RecorderState::Recording => "Stop",
    };
    let current_script = state.read().target_script;

    rsx! {
        div { style: "display: flex; gap: 8px; flex-wrap: wrap; align-items: center;",
            button {
                style: PRIMARY_BUTTON,
                onclick: {
                    let svc = svc.clone();
                    move |_| open_document(svc.clone(), session, state)
                },
                "Open"
            }

            // Whole-document OCR with an optional page range
            input {
                style: "width: 56px; padding: 4px;",
                placeholder: "from",
                value: "{state.read().page_start}",
                oninput: move |evt| state.write().page_start = evt.value(),
            }
            input {
                style: "width: 56px; padding: 4px;",
                placeholder: "to",
                value: "{state.read().page_end}",
                oninput: move |evt| state.write().page_end = evt.value(),
            }
            button {
                style: BUTTON,
                disabled: !ocr_enabled,
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let range = {
                            let st = state.read();
                            parse_page_range(&st.page_start, &st.page_end)
                        };
                        match range {
                            Ok(range) => {
                                let pending = session.read().ocr_active_document(range);
                                if let Some(pending) = pending {
                                    spawn(async move { pending.run().await });
                                }
                            }
                            Err(msg) => svc.notify(&msg, Severity::Error),
                        }
                    }
                },
                "OCR document"
            }

            button {
                style: BUTTON,
                disabled: recording == RecorderState::Starting,
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let recorder = svc.recorder();
                        match recorder.state() {
                            RecorderState::Idle => {
                                spawn(async move {
                                    recorder.start().await;
                                    revision += 1;
                                });
                            }
                            RecorderState::Starting | RecorderState::Recording => {
                                let pending = recorder.stop();
                                revision += 1;
                                if let Some(pending) = pending {
                                    spawn(async move {
                                        pending.run().await;
                                    });
                                }
                            }
                        }
                    }
                },
                "{record_label}"
            }

            select {
                style: "padding: 4px;",
                onchange: move |evt| {
                    if let Some(script) = Script::from_label(&evt.value()) {
                        state.write().target_script = script;
                    }
                },
                for script in Script::ALL {
                    option {
                        value: "{script.language_code()}",
                        selected: script == current_script,
                        "{script}"
                    }
                }
            }
            button {
                style: BUTTON,
                onclick: move |_| {
                    let services = session.read().services();
                    let target = state.read().target_script;
                    spawn(async move {
                        services.transliterate_editor(target).await;
                    });
                },
                "Transliterate"
            }

            input {
                style: "width: 160px; padding: 4px;",
                placeholder: "Project name",
                value: "{state.read().project_name}",
                oninput: move |evt| state.write().project_name = evt.value(),
            }
            button {
                style: BUTTON,
                onclick: move |_| {
                    let services = session.read().services();
                    let name = state.read().project_name.clone();
                    spawn(async move {
                        services.save_project(&name).await;
                    });
                },
                "Save"
            }
            button {
                style: BUTTON,
                onclick: move |_| {
                    let services = session.read().services();
                    spawn(async move {
                        let projects = services.list_projects().await;
                        if projects.is_empty() {
                            services
                                .notifier()
                                .notify("No saved projects yet.", Severity::Info);
                        }
                        state.write().projects = projects;
                    });
                },
                "Projects"
            }
        }
    }
}

/// Pick a file, count its pages, render its preview and open it in a new tab.
fn open_document(
    svc: AppServices,
    mut session: Signal<SessionController>,
    mut state: Signal<AppState>,
) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("Documents", OPEN_FILTER)
        .pick_file()
    else {
        return;
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".into());
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            svc.notify(&format!("Could not read {name}: {e}"), Severity::Error);
            return;
        }
    };
    let source = match SourceFile::from_name(name, bytes) {
        Ok(source) => source,
        Err(e) => {
            svc.notify(&humanize_error(&e).message, Severity::Error);
            return;
        }
    };

    spawn(async move {
        let renderer = svc.renderer();
        let document = match DocumentSessionStore::load_document(source, &renderer).await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(error = %e, "could not open document");
                svc.notify(&humanize_error(&e).message, Severity::Error);
                return;
            }
        };

        let source = document.source();
        let preview = match renderer
            .render_preview(source, svc.config().preview_width)
            .await
            .and_then(|surfaces| {
                surfaces
                    .into_iter()
                    .map(|surface| {
                        let data_url = page_data_url(source, &surface)?;
                        Ok(PagePreview { surface, data_url })
                    })
                    .collect::<scribe_core::error::Result<Vec<_>>>()
            }) {
            Ok(pages) => Preview::Pages(pages),
            Err(e) => {
                tracing::debug!(file = %source.name, error = %e, "no raster preview");
                Preview::Placeholder {
                    pages: document.page_count(),
                    reason: e.to_string(),
                }
            }
        };

        tracing::info!(
            file = %document.name(),
            pages = document.page_count(),
            "document opened"
        );
        state
            .write()
            .previews
            .insert(source.fingerprint(), preview);
        session.write().open_document(document);
    });
}

#[component]
fn ProjectList() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let projects = state.read().projects.clone();

    if projects.is_empty() {
        return rsx! {};
    }

    rsx! {
        div { style: "display: flex; gap: 6px; flex-wrap: wrap; align-items: center; font-size: 13px;",
            span { style: "color: #666;", "Open project:" }
            for project in projects {
                ProjectButton { key: "{project.id}", project: project.clone() }
            }
            button {
                style: "border: none; background: none; color: #999;",
                onclick: move |_| state.write().projects.clear(),
                "\u{2715}"
            }
        }
    }
}

#[component]
fn ProjectButton(project: ProjectSummary) -> Element {
    let session = use_context::<Signal<SessionController>>();
    let mut state = use_context::<Signal<AppState>>();

    rsx! {
        button {
            style: BUTTON,
            onclick: move |_| {
                let services = session.read().services();
                let id = project.id.clone();
                state.write().projects.clear();
                spawn(async move {
                    services.load_project(&id).await;
                });
            },
            "{project.name}"
        }
    }
}

// -- Tabs --------------------------------------------------------------------

#[component]
fn TabBar() -> Element {
    let svc = use_context::<AppServices>();
    let mut session = use_context::<Signal<SessionController>>();
    let mut state = use_context::<Signal<AppState>>();
    let _ = session.read();

    let tabs = svc.tabs().tabs();
    let active = svc.tabs().active();

    rsx! {
        div { style: "display: flex; gap: 4px; border-bottom: 1px solid #e0e0e0; overflow-x: auto;",
            for (index, tab) in tabs.into_iter().enumerate() {
                div {
                    key: "{index}",
                    style: if Some(index) == active {
                        "display: flex; gap: 6px; align-items: center; padding: 6px 10px; border: 1px solid #007aff; border-bottom: none; border-radius: 6px 6px 0 0; background: #eef5ff; cursor: pointer;"
                    } else {
                        "display: flex; gap: 6px; align-items: center; padding: 6px 10px; border: 1px solid #e0e0e0; border-bottom: none; border-radius: 6px 6px 0 0; cursor: pointer;"
                    },
                    onclick: move |_| {
                        session.write().select_document(index);
                    },
                    span { "{tab.title}" }
                    span { style: "color: #888; font-size: 12px;", "{tab.page_count}p" }
                    button {
                        style: "border: none; background: none; cursor: pointer; color: #999;",
                        onclick: move |evt: MouseEvent| {
                            evt.stop_propagation();
                            session.write().close_document(index);
                            let open: HashSet<String> = session
                                .read()
                                .store()
                                .documents()
                                .iter()
                                .map(|d| d.source().fingerprint())
                                .collect();
                            state.write().previews.retain(|key, _| open.contains(key));
                        },
                        "\u{2715}"
                    }
                }
            }
        }
    }
}

// -- Preview -----------------------------------------------------------------

fn element_point(evt: &MouseEvent) -> Point {
    let p = evt.element_coordinates();
    Point::new(p.x, p.y)
}

fn pointer_button(evt: &MouseEvent) -> PointerButton {
    match evt.trigger_button() {
        Some(MouseButton::Primary) => PointerButton::Primary,
        Some(MouseButton::Secondary) => PointerButton::Secondary,
        _ => PointerButton::Auxiliary,
    }
}

#[component]
fn PreviewPane() -> Element {
    let mut session = use_context::<Signal<SessionController>>();
    let state = use_context::<Signal<AppState>>();

    let (preview, overlay) = {
        let ctrl = session.read();
        let preview = ctrl
            .store()
            .get_active()
            .map(|doc| state.read().previews.get(&doc.source().fingerprint()).cloned());
        let overlay = ctrl
            .selector()
            .overlay()
            .zip(ctrl.selector().target().cloned());
        (preview, overlay)
    };

    let pane = "flex: 1; overflow: auto; padding: 12px; background: #f0f0f0; border-radius: 8px;";

    let body = match preview {
        None => rsx! {
            p { style: "color: #666;", "Open a PDF or an image to start." }
        },
        Some(None) => rsx! {
            p { style: "color: #666;", "Preparing preview..." }
        },
        Some(Some(Preview::Placeholder { pages, reason })) => rsx! {
            p { style: "color: #666; font-size: 13px;",
                "Page preview unavailable ({reason}). Use \"OCR document\" to recognise the whole file or a page range."
            }
            for page in 1..=pages {
                div {
                    key: "{page}",
                    style: "width: 200px; height: 280px; margin-bottom: 12px; background: white; display: flex; align-items: center; justify-content: center; color: #aaa;",
                    "Page {page}"
                }
            }
        },
        Some(Some(Preview::Pages(pages))) => {
            let pages: Vec<(PagePreview, Option<Rect>)> = pages
                .into_iter()
                .map(|page| {
                    let rect = overlay
                        .as_ref()
                        .filter(|(_, target)| Arc::ptr_eq(target, &page.surface))
                        .map(|(rect, _)| *rect);
                    (page, rect)
                })
                .collect();
            rsx! {
                for (page, rect) in pages {
                    PageView {
                        key: "{page.surface.page()}",
                        page: page.clone(),
                        overlay: rect,
                    }
                }
            }
        }
    };

    rsx! {
        div {
            style: pane,
            // Presses that miss every page still tear down the previous overlay.
            onmousedown: move |evt: MouseEvent| {
                let button = pointer_button(&evt);
                session
                    .write()
                    .pointer_down(button, element_point(&evt), PointerTarget::Other);
            },
            {body}
        }
    }
}

#[component]
fn PageView(page: PagePreview, overlay: Option<Rect>) -> Element {
    let mut session = use_context::<Signal<SessionController>>();
    let mut state = use_context::<Signal<AppState>>();
    let display = page.surface.display_size();
    let surface = page.surface.clone();

    rsx! {
        div {
            style: "position: relative; width: {display.width}px; height: {display.height}px; margin-bottom: 12px; box-shadow: 0 1px 4px rgba(0,0,0,0.2); cursor: crosshair; user-select: none;",
            img {
                src: "{page.data_url}",
                draggable: false,
                style: "display: block; width: {display.width}px; height: {display.height}px;",
                onmousedown: move |evt: MouseEvent| {
                    evt.prevent_default();
                    evt.stop_propagation();
                    let at = element_point(&evt);
                    state.write().last_point = Some(at);
                    session.write().pointer_down(
                        pointer_button(&evt),
                        at,
                        PointerTarget::Surface(surface.clone()),
                    );
                },
                onmousemove: move |evt: MouseEvent| {
                    if !session.peek().selector().is_dragging() {
                        return;
                    }
                    let at = element_point(&evt);
                    state.write().last_point = Some(at);
                    session.write().pointer_move(at);
                },
                onmouseup: move |evt: MouseEvent| {
                    session.write().pointer_up(element_point(&evt));
                },
                onmouseleave: move |_| {
                    if session.peek().selector().is_dragging() {
                        let at = state.peek().last_point.unwrap_or_default();
                        session.write().pointer_up(at);
                    }
                },
            }
            if let Some(rect) = overlay {
                div {
                    style: "position: absolute; left: {rect.x}px; top: {rect.y}px; width: {rect.width}px; height: {rect.height}px; border: 2px dashed #007aff; background: rgba(0,122,255,0.12); pointer-events: none;",
                }
            }
        }
    }
}

// -- Editor and notices ------------------------------------------------------

#[component]
fn EditorPane() -> Element {
    let svc = use_context::<AppServices>();
    let Revision(revision) = use_context::<Revision>();
    let _ = revision();
    let text = svc.editor().get_text();

    rsx! {
        textarea {
            style: "flex: 1; padding: 12px; font-size: 16px; line-height: 1.5; border: 1px solid #ccc; border-radius: 8px; resize: none;",
            placeholder: "Recognised text appears here...",
            value: "{text}",
            oninput: move |evt| svc.set_editor_text(&evt.value()),
        }
    }
}

#[component]
fn NoticeLine() -> Element {
    let svc = use_context::<AppServices>();
    let Revision(revision) = use_context::<Revision>();
    let _ = revision();

    let spinner = svc.notices().spinner();
    let latest = svc.notices().latest();

    rsx! {
        div { style: "display: flex; gap: 12px; align-items: center; min-height: 24px; font-size: 14px;",
            if let Some(label) = spinner {
                span { style: "color: #007aff;", "\u{23F3} {label}" }
            }
            if let Some(notice) = latest {
                span {
                    style: match notice.severity {
                        Severity::Success => "color: #1b873f;",
                        Severity::Info => "color: #555;",
                        Severity::Error => "color: #c62828;",
                    },
                    "{notice.message}"
                }
            }
        }
    }
}

// -- Confirmation prompt -----------------------------------------------------

#[component]
fn ConfirmModal() -> Element {
    let mut session = use_context::<Signal<SessionController>>();
    let pending = session.read().selector().pending().map(|s| s.rect);

    let Some(rect) = pending else {
        return rsx! {};
    };
    let width = rect.width.round();
    let height = rect.height.round();

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center;",
            onclick: move |_| {
                session.write().dismiss(ModalHit::Backdrop);
            },
            div {
                style: "background: white; padding: 20px; border-radius: 8px; min-width: 280px;",
                onclick: move |evt: MouseEvent| {
                    evt.stop_propagation();
                    session.write().dismiss(ModalHit::Content);
                },
                h3 { style: "margin-top: 0;", "Recognise text in this region?" }
                p { style: "color: #666;", "{width} \u{00D7} {height} px" }
                div { style: "display: flex; gap: 8px; justify-content: flex-end;",
                    button {
                        style: BUTTON,
                        onclick: move |evt: MouseEvent| {
                            evt.stop_propagation();
                            session.write().cancel_selection();
                        },
                        "Cancel"
                    }
                    button {
                        style: PRIMARY_BUTTON,
                        onclick: move |evt: MouseEvent| {
                            evt.stop_propagation();
                            let pending = session.write().confirm();
                            if let Some(pending) = pending {
                                spawn(async move { pending.run().await });
                            }
                        },
                        "Recognise"
                    }
                }
            }
        }
    }
}
