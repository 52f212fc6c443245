// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// The notice line shows the raw error text (service messages are already
// meant for people); this module adds the follow-up hint shown underneath it.

use crate::error::ScribeError;

/// What the user can do about an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Trying the same thing again may work.
    Retry,
    /// The user has to change something first (grant a permission, pick a
    /// different file, shorten a recording).
    ActionRequired,
    /// Retrying will not help.
    Permanent,
}

/// A plain-language explanation with a suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    pub recovery: Recovery,
}

/// Convert a `ScribeError` into a `HumanError`.
pub fn humanize_error(err: &ScribeError) -> HumanError {
    match err {
        // -- Document errors --
        ScribeError::UnsupportedDocument(name) => HumanError {
            message: "This type of file can't be opened.".into(),
            suggestion: format!("Open a PDF or an image (PNG, JPEG, TIFF, BMP, WebP). ({name})"),
            recovery: Recovery::Permanent,
        },

        ScribeError::PdfError(_) => HumanError {
            message: "There's a problem with this PDF file.".into(),
            suggestion: "The file may be damaged or password protected. Try exporting it again or scanning the pages as images.".into(),
            recovery: Recovery::Permanent,
        },

        ScribeError::ImageError(_) => HumanError {
            message: "There's a problem with this image.".into(),
            suggestion: "The image may be damaged or in an unusual format. Try saving it as a PNG first.".into(),
            recovery: Recovery::Permanent,
        },

        ScribeError::EmptyDocument => HumanError {
            message: "This document has no pages.".into(),
            suggestion: "Choose a different file.".into(),
            recovery: Recovery::Permanent,
        },

        ScribeError::InvalidPageRange { page_count, .. } => HumanError {
            message: "Those pages don't exist in this document.".into(),
            suggestion: format!("Pick pages between 1 and {page_count}."),
            recovery: Recovery::ActionRequired,
        },

        ScribeError::NoActiveDocument => HumanError {
            message: "No document is open.".into(),
            suggestion: "Open a PDF or image first.".into(),
            recovery: Recovery::ActionRequired,
        },

        // -- Capture --
        ScribeError::Capture(_) => HumanError {
            message: "The selected area couldn't be captured.".into(),
            suggestion: "Draw the selection again, making sure it covers part of the page.".into(),
            recovery: Recovery::Retry,
        },

        // -- Collaborators --
        ScribeError::Ocr(_) => HumanError {
            message: "Text recognition didn't work.".into(),
            suggestion: "Try again, or select a smaller and clearer area of the page.".into(),
            recovery: Recovery::Retry,
        },

        ScribeError::Transcription(_) => HumanError {
            message: "The recording couldn't be transcribed.".into(),
            suggestion: "Speak close to the microphone and try again.".into(),
            recovery: Recovery::Retry,
        },

        ScribeError::Transliteration(_) => HumanError {
            message: "The text couldn't be converted.".into(),
            suggestion: "Try again in a moment.".into(),
            recovery: Recovery::Retry,
        },

        ScribeError::ProjectStore(_) => HumanError {
            message: "The project couldn't be saved or loaded.".into(),
            suggestion: "Check that you're signed in, then try again.".into(),
            recovery: Recovery::Retry,
        },

        ScribeError::Network(_) => HumanError {
            message: "The server couldn't be reached.".into(),
            suggestion: "Check your internet connection, then try again.".into(),
            recovery: Recovery::Retry,
        },

        ScribeError::UnknownScript => HumanError {
            message: "We couldn't tell which script this text is written in.".into(),
            suggestion: "Make sure the editor contains Devanagari, Kannada, Telugu, Tamil or English text.".into(),
            recovery: Recovery::ActionRequired,
        },

        // -- Devices --
        ScribeError::Microphone(_) => HumanError {
            message: "The microphone couldn't be used.".into(),
            suggestion: "Allow microphone access for this app in your system settings.".into(),
            recovery: Recovery::ActionRequired,
        },

        ScribeError::RecordingTooLong { max_secs, .. } => HumanError {
            message: "That recording is too long.".into(),
            suggestion: format!("Keep recordings under {max_secs} seconds."),
            recovery: Recovery::ActionRequired,
        },

        // -- Storage --
        ScribeError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                    recovery: Recovery::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The app doesn't have permission to read that file.".into(),
                    suggestion: "Check the file permissions, or copy the file somewhere else first.".into(),
                    recovery: Recovery::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your disk may be full.".into(),
                    recovery: Recovery::Retry,
                }
            }
        }

        ScribeError::Serialization(_) => HumanError {
            message: "The app had an internal data problem.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            recovery: Recovery::Retry,
        },

        ScribeError::PlatformUnavailable => HumanError {
            message: "This feature isn't available on your device.".into(),
            suggestion: "Some features need hardware or services this device doesn't have.".into(),
            recovery: Recovery::Permanent,
        },
    }
}
