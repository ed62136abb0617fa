// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

//! Simple payload structs exchanged with the controller

use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Snapshot of the rig as reported by `GET /api/status`.
///
/// Absent fields read as false/zero/empty, so older controllers that don't report the slider
/// switches still render.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct DeviceStatus {
    pub is_running: bool,
    pub is_homed: bool,
    pub current_angle: f64,
    pub hall_status: bool,
    pub inductive_status: bool,
    pub slider_min: bool,
    pub slider_max: bool,
    pub system_message: String,
}

impl Display for DeviceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let homed = if self.is_homed { "homed" } else { "not homed" };
        if self.is_running {
            write!(f, "{}° ({homed}, running)", self.current_angle)
        } else {
            write!(f, "{}° ({homed})", self.current_angle)
        }
    }
}

/// Body returned by the action endpoints and by `POST /api/config`.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}

impl ActionResponse {
    /// Parse a response body, treating anything that isn't a matching JSON object as `{}`.
    pub fn from_body(body: &[u8]) -> ActionResponse {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// The server message, unless it is missing or empty.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|message| !message.is_empty())
    }

    pub fn reported_failure(&self) -> bool {
        self.success == Some(false)
    }
}

/// Request body of `POST /api/rotary/move`
#[derive(Serialize, Debug)]
pub struct MoveRequest {
    pub degrees: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_status_uses_defaults() {
        let status: DeviceStatus = serde_json::from_str(r#"{"is_running": true, "hall_status": true}"#).unwrap();
        assert!(status.is_running);
        assert!(status.hall_status);
        assert!(!status.slider_min);
        assert!(!status.slider_max);
        assert_eq!(status.system_message, "");
    }

    #[test]
    fn unparsable_action_body_is_empty_object() {
        assert_eq!(ActionResponse::from_body(b"<html>502</html>"), ActionResponse::default());
        assert_eq!(ActionResponse::from_body(b"[1, 2]"), ActionResponse::default());
        assert_eq!(ActionResponse::from_body(b""), ActionResponse::default());
    }

    #[test]
    fn empty_message_is_absent() {
        let response = ActionResponse::from_body(br#"{"message": "", "success": false}"#);
        assert_eq!(response.message(), None);
        assert!(response.reported_failure());
    }

    #[test]
    fn status_display() {
        let status = DeviceStatus { current_angle: 36.0, is_homed: true, ..Default::default() };
        assert_eq!(status.to_string(), "36° (homed)");
    }
}
