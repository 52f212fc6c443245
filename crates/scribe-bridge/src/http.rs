// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP client for the Indic Scribe backend.
//
// One `reqwest::Client` serves OCR (`/api/ocr`), transcription
// (`/api/transcribe`), transliteration (`/api/transliterate`) and the project
// store (`/api/projects`). Non-2xx responses surface the server's `detail`
// string verbatim so the session can show it to the user.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use scribe_core::error::{Result, ScribeError};
use scribe_core::types::{Project, ProjectId, ProjectSummary, Script};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::traits::{AudioClip, OcrRequest, OcrService, ProjectStore, Transcriber, Transliterator};

/// Default backend address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Which backend call failed; picks the error variant and fallback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Ocr,
    Transcription,
    Transliteration,
    Projects,
}

impl Operation {
    fn label(self) -> &'static str {
        match self {
            Self::Ocr => "OCR",
            Self::Transcription => "Transcription",
            Self::Transliteration => "Transliteration",
            Self::Projects => "Project request",
        }
    }

    fn error(self, message: String) -> ScribeError {
        match self {
            Self::Ocr => ScribeError::Ocr(message),
            Self::Transcription => ScribeError::Transcription(message),
            Self::Transliteration => ScribeError::Transliteration(message),
            Self::Projects => ScribeError::ProjectStore(message),
        }
    }
}

#[derive(Deserialize)]
struct TextResponse {
    text: String,
}

#[derive(Serialize)]
struct TransliterateBody<'a> {
    text: &'a str,
    source: &'a str,
    target: &'a str,
}

#[derive(Deserialize)]
struct TransliterateResponse {
    result: String,
}

#[derive(Deserialize)]
struct SavedProject {
    id: ProjectId,
}

/// Backend client implementing every remote collaborator.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Turn a non-2xx response into the operation's error; pass others through.
    async fn check(op: Operation, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(op.error(error_message(op, status.as_u16(), &body)))
    }

    async fn read_json<T: for<'de> Deserialize<'de>>(
        op: Operation,
        response: Response,
    ) -> Result<T> {
        let response = Self::check(op, response).await?;
        response.json::<T>().await.map_err(|err| {
            op.error(format!(
                "{} returned an unreadable response: {}",
                op.label(),
                err
            ))
        })
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Message for a failed response: the body's `detail` if present, else a
/// generic line naming the operation and status code.
fn error_message(op: Operation, status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("detail").cloned())
        .and_then(|detail| match detail {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
        .unwrap_or_else(|| format!("{} failed (HTTP {})", op.label(), status))
}

fn transport(err: reqwest::Error) -> ScribeError {
    ScribeError::Network(err.to_string())
}

#[async_trait]
impl OcrService for HttpBackend {
    #[instrument(skip_all, fields(file = %request.file_name, bytes = request.bytes.len()))]
    async fn recognize(&self, request: OcrRequest) -> Result<String> {
        let part = Part::bytes(request.bytes.to_vec())
            .file_name(request.file_name.clone())
            .mime_str(&request.mime_type)
            .map_err(|err| ScribeError::Ocr(format!("invalid mime type: {}", err)))?;
        let form = Form::new().part("file", part);

        let mut builder = self.client.post(self.endpoint("ocr")).multipart(form);
        if let Some(range) = request.pages {
            builder = builder.query(&[("page_start", range.start), ("page_end", range.end)]);
        }

        debug!("sending OCR request");
        let response = builder.send().await.map_err(transport)?;
        let body: TextResponse = Self::read_json(Operation::Ocr, response).await?;
        Ok(body.text)
    }
}

#[async_trait]
impl Transcriber for HttpBackend {
    #[instrument(skip_all, fields(bytes = clip.bytes.len(), secs = clip.duration_secs))]
    async fn transcribe(&self, clip: &AudioClip) -> Result<String> {
        let part = Part::bytes(clip.bytes.clone())
            .file_name("recording.webm")
            .mime_str(&clip.mime_type)
            .map_err(|err| ScribeError::Transcription(format!("invalid mime type: {}", err)))?;
        let form = Form::new().part("audio", part);

        let response = self
            .client
            .post(self.endpoint("transcribe"))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        let body: TextResponse = Self::read_json(Operation::Transcription, response).await?;
        Ok(body.text)
    }
}

#[async_trait]
impl Transliterator for HttpBackend {
    #[instrument(skip_all, fields(from = %from, to = %to, chars = text.chars().count()))]
    async fn transliterate(&self, text: &str, from: Script, to: Script) -> Result<String> {
        let body = TransliterateBody {
            text,
            source: from.language_code(),
            target: to.language_code(),
        };
        let response = self
            .client
            .post(self.endpoint("transliterate"))
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        let body: TransliterateResponse =
            Self::read_json(Operation::Transliteration, response).await?;
        Ok(body.result)
    }
}

#[async_trait]
impl ProjectStore for HttpBackend {
    #[instrument(skip_all, fields(name = %project.name))]
    async fn save(&self, project: &Project) -> Result<ProjectId> {
        let response = self
            .client
            .post(self.endpoint("projects"))
            .json(project)
            .send()
            .await
            .map_err(transport)?;
        let saved: SavedProject = Self::read_json(Operation::Projects, response).await?;
        Ok(saved.id)
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn load(&self, id: &ProjectId) -> Result<Project> {
        let response = self
            .client
            .get(self.endpoint(&format!("projects/{}", id)))
            .send()
            .await
            .map_err(transport)?;
        Self::read_json(Operation::Projects, response).await
    }

    async fn list(&self) -> Result<Vec<ProjectSummary>> {
        let response = self
            .client
            .get(self.endpoint("projects"))
            .send()
            .await
            .map_err(transport)?;
        Self::read_json(Operation::Projects, response).await
    }
}
