// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page — backend address, snip thresholds, capture format, preview
// width and the recording limit.

use dioxus::prelude::*;

use scribe_core::AppConfig;
use scribe_core::config::CaptureFormat;
use scribe_core::human_errors::humanize_error;

use crate::services::app_services::AppServices;

const DEFAULT_JPEG_QUALITY: u8 = 90;

#[component]
pub fn Settings() -> Element {
    let svc = use_context::<AppServices>();
    let mut config = use_signal(|| svc.config());
    let mut status_msg = use_signal(|| Option::<String>::None);

    let cfg = config.read().clone();
    let (format_value, quality) = match cfg.capture_format {
        CaptureFormat::Png => ("png", DEFAULT_JPEG_QUALITY),
        CaptureFormat::Jpeg { quality } => ("jpeg", quality),
    };

    rsx! {
        div { style: "max-width: 520px; overflow-y: auto; height: 100%;",
            h1 { "Settings" }

            SettingRow { label: "Backend URL",
                input {
                    style: "width: 100%; padding: 6px;",
                    value: "{cfg.backend_url}",
                    oninput: move |evt| config.write().backend_url = evt.value(),
                }
            }

            SettingRow { label: "Minimum selection (px)",
                div { style: "display: flex; gap: 8px;",
                    input {
                        r#type: "number",
                        style: "width: 80px; padding: 6px;",
                        value: "{cfg.selection.min_width}",
                        oninput: move |evt| {
                            if let Ok(v) = evt.value().parse::<f64>() {
                                config.write().selection.min_width = v.max(1.0);
                            }
                        },
                    }
                    input {
                        r#type: "number",
                        style: "width: 80px; padding: 6px;",
                        value: "{cfg.selection.min_height}",
                        oninput: move |evt| {
                            if let Ok(v) = evt.value().parse::<f64>() {
                                config.write().selection.min_height = v.max(1.0);
                            }
                        },
                    }
                }
            }

            SettingRow { label: "Capture format",
                div { style: "display: flex; gap: 8px; align-items: center;",
                    select {
                        style: "padding: 6px;",
                        onchange: move |evt| {
                            let format = if evt.value() == "jpeg" {
                                CaptureFormat::Jpeg { quality }
                            } else {
                                CaptureFormat::Png
                            };
                            config.write().capture_format = format;
                        },
                        option { value: "png", selected: format_value == "png", "PNG (lossless)" }
                        option { value: "jpeg", selected: format_value == "jpeg", "JPEG" }
                    }
                    if format_value == "jpeg" {
                        input {
                            r#type: "number",
                            style: "width: 64px; padding: 6px;",
                            value: "{quality}",
                            oninput: move |evt| {
                                if let Ok(q) = evt.value().parse::<u8>() {
                                    config.write().capture_format = CaptureFormat::Jpeg {
                                        quality: q.clamp(1, 100),
                                    };
                                }
                            },
                        }
                    }
                }
            }

            SettingRow { label: "Preview width (px)",
                input {
                    r#type: "number",
                    style: "width: 100px; padding: 6px;",
                    value: "{cfg.preview_width}",
                    oninput: move |evt| {
                        if let Ok(v) = evt.value().parse::<f64>() {
                            config.write().preview_width = v.max(100.0);
                        }
                    },
                }
            }

            SettingRow { label: "Longest recording (seconds)",
                input {
                    r#type: "number",
                    style: "width: 100px; padding: 6px;",
                    value: "{cfg.max_recording_secs}",
                    oninput: move |evt| {
                        if let Ok(v) = evt.value().parse::<u32>() {
                            config.write().max_recording_secs = v;
                        }
                    },
                }
            }

            div { style: "display: flex; gap: 8px; margin-top: 16px;",
                button {
                    style: "padding: 8px 16px; border-radius: 6px; border: none; background: #007aff; color: white;",
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let cfg = config.read().clone();
                            match svc.save_config(cfg) {
                                Ok(()) => status_msg.set(Some(
                                    "Saved. New settings apply the next time Indic Scribe starts.".into(),
                                )),
                                Err(e) => status_msg.set(Some(humanize_error(&e).message)),
                            }
                        }
                    },
                    "Save"
                }
                button {
                    style: "padding: 8px 16px; border-radius: 6px; border: 1px solid #ccc; background: white;",
                    onclick: move |_| config.set(AppConfig::default()),
                    "Reset to defaults"
                }
            }

            if let Some(ref msg) = *status_msg.read() {
                p { style: "margin-top: 8px; color: #666; font-size: 14px;", "{msg}" }
            }
        }
    }
}

#[component]
fn SettingRow(label: &'static str, children: Element) -> Element {
    rsx! {
        div { style: "margin: 12px 0;",
            label { style: "display: block; font-size: 13px; color: #555; margin-bottom: 4px;", "{label}" }
            {children}
        }
    }
}
