// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

use hyper::StatusCode;
use thiserror::Error;

/// Every way a controller request can fail.
///
/// The GUI handles all of them the same way: it shows [`RequestFailed::message`] and returns to idle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestFailed {
    /// The server answered with a non-2xx status, or with `"success": false`.
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    /// The request never produced a response (connection refused, timeout, etc).
    #[error("{0}")]
    Transport(String),

    /// A payload the client can't work without was not valid JSON for its type.
    #[error("{0}")]
    Decode(String),
}

impl RequestFailed {
    /// Build a [`RequestFailed::Status`], preferring the server-provided message.
    ///
    /// Falls back to the canonical reason phrase, then to the bare status code.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        let message = message
            .filter(|message| !message.is_empty())
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| status.as_u16().to_string());

        RequestFailed::Status {
            status: status.as_u16(),
            message,
        }
    }

    /// Text shown to the operator.
    pub fn message(&self) -> &str {
        match self {
            RequestFailed::Status { message, .. } => message,
            RequestFailed::Transport(message) => message,
            RequestFailed::Decode(message) => message,
        }
    }
}
