// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Indic Scribe — OCR snip tool, transcription and transliteration for Indic
// documents.
//
// Entry point. Initialises logging, the collaborators and the session, and
// launches the Dioxus UI.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use pages::settings::Settings;
use pages::workspace::Workspace;

use services::app_services::AppServices;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Indic Scribe starting");

    dioxus::launch(app);
}

/// Top-level route enum.
#[derive(Debug, Clone, Routable, PartialEq)]
enum Route {
    #[layout(NavLayout)]
    #[route("/")]
    Workspace {},
    #[route("/settings")]
    Settings {},
}

/// Bumped whenever a collaborator reports a change the UI should pick up.
#[derive(Clone, Copy)]
pub struct Revision(pub Signal<u64>);

/// Root component.
fn app() -> Element {
    let svc = use_hook(AppServices::init);

    use_context_provider(|| svc.clone());
    use_context_provider(|| Signal::new(svc.session()));
    use_context_provider(|| Signal::new(state::AppState::default()));
    let mut revision = use_context_provider(|| Revision(Signal::new(0u64)));

    // Notices and the spinner change from inside async tasks.
    let svc_clone = svc.clone();
    use_future(move || {
        let mut changes = svc_clone.changes();
        async move {
            while changes.changed().await.is_ok() {
                revision.0 += 1;
            }
        }
    });

    rsx! {
        Router::<Route> {}
    }
}

/// Top navigation wrapping both pages.
#[component]
fn NavLayout() -> Element {
    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; height: 100vh; font-family: system-ui, -apple-system, sans-serif;",

            nav { class: "nav-bar",
                style: "display: flex; gap: 16px; align-items: center; padding: 8px 16px; border-bottom: 1px solid #e0e0e0; background: #fafafa;",
                strong { "Indic Scribe" }
                NavLink { to: Route::Workspace {}, label: "Workspace" }
                NavLink { to: Route::Settings {}, label: "Settings" }
            }

            div { class: "page-content",
                style: "flex: 1; overflow: hidden; padding: 12px;",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn NavLink(to: Route, label: &'static str) -> Element {
    rsx! {
        Link { to: to,
            style: "text-decoration: none; color: #333; font-size: 14px;",
            "{label}"
        }
    }
}
