// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

//! Typed access to the rig controller's JSON-over-HTTP API

use std::time::Duration;

use bytes::Bytes;
use hyper::client::HttpConnector;
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Client, Method, Request, StatusCode, Uri};
use hyper_timeout::TimeoutConnector;
use hyper_tls::HttpsConnector;
use tracing::{debug, warn};

use crate::api::device_config::{ConfigSchema, DeviceConfig};
use crate::api::error::RequestFailed;
use crate::api::structs::{ActionResponse, DeviceStatus, MoveRequest};

type Connector = TimeoutConnector<HttpsConnector<HttpConnector>>;

static JSON_CONTENT_TYPE: &str = "application/json";

static PATH_STATUS: &str = "/api/status";
static PATH_CONFIG: &str = "/api/config";
static PATH_ROTARY_HOME: &str = "/api/rotary/home";
static PATH_ROTARY_MOVE: &str = "/api/rotary/move";
static PATH_ROTARY_SET_ZERO: &str = "/api/rotary/set_zero";
static PATH_SLIDER_TEST_CYCLE: &str = "/api/slider/test_cycle";
static PATH_LEGACY_HOME: &str = "/api/home";
static PATH_LEGACY_START: &str = "/api/start";

/// Optional transport timeouts. `None` leaves the transport default in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Option<Duration>,
    pub read: Option<Duration>,
}

/// A single action request, as produced by the panel when an operator presses a button
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActionRequest {
    RotaryHome,
    RotaryMove { degrees: f64 },
    RotarySetZero,
    SliderTestCycle,
    LegacyHome,
    LegacyStart,
}

/// Handle to one controller. Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct DeviceApi {
    client: Client<Connector, Body>,
    base_url: String,
}

impl DeviceApi {
    /// Create a client for the controller at `base_url` (`http://` or `https://`).
    pub fn new(base_url: &str, timeouts: Timeouts) -> Result<DeviceApi, String> {
        let base_url = base_url.trim().trim_end_matches('/');
        let uri: Uri = base_url.parse().map_err(|e| format!("invalid server URL \"{base_url}\": {e}"))?;

        match uri.scheme_str() {
            Some("http") | Some("https") => (),
            _ => return Err(format!("server URL \"{base_url}\" must start with http:// or https://")),
        }
        if uri.authority().is_none() {
            return Err(format!("server URL \"{base_url}\" has no host"));
        }

        let mut connector = TimeoutConnector::new(HttpsConnector::new());
        connector.set_connect_timeout(timeouts.connect);
        connector.set_read_timeout(timeouts.read);

        Ok(DeviceApi {
            client: Client::builder().build(connector),
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/status`
    pub async fn status(&self) -> Result<DeviceStatus, RequestFailed> {
        let (status, body) = self.send(Method::GET, PATH_STATUS, None).await?;
        ensure_success(status, &body)?;
        serde_json::from_slice(&body).map_err(|e| RequestFailed::Decode(format!("invalid status response: {e}")))
    }

    /// `GET /api/config`, decoded as the given schema
    pub async fn load_config(&self, schema: ConfigSchema) -> Result<DeviceConfig, RequestFailed> {
        let (status, body) = self.send(Method::GET, PATH_CONFIG, None).await?;
        ensure_success(status, &body)?;
        schema.parse(&body).map_err(|e| RequestFailed::Decode(format!("invalid {schema} config response: {e}")))
    }

    /// `POST /api/config`. A 2xx answer carrying `"success": false` is still a failure.
    pub async fn save_config(&self, config: &DeviceConfig) -> Result<ActionResponse, RequestFailed> {
        let body = to_json(config)?;
        let (status, body) = self.send(Method::POST, PATH_CONFIG, Some(body)).await?;
        reported_outcome(status, &body)
    }

    /// `POST /api/rotary/home`
    pub async fn home(&self) -> Result<ActionResponse, RequestFailed> {
        let (status, body) = self.send(Method::POST, PATH_ROTARY_HOME, None).await?;
        reported_outcome(status, &body)
    }

    /// `POST /api/rotary/move`. Positive degrees turn forward, negative turn backward.
    pub async fn move_degrees(&self, degrees: f64) -> Result<ActionResponse, RequestFailed> {
        let body = to_json(&MoveRequest { degrees })?;
        let (status, body) = self.send(Method::POST, PATH_ROTARY_MOVE, Some(body)).await?;
        reported_outcome(status, &body)
    }

    /// `POST /api/rotary/set_zero`
    pub async fn set_zero(&self) -> Result<ActionResponse, RequestFailed> {
        let (status, body) = self.send(Method::POST, PATH_ROTARY_SET_ZERO, None).await?;
        reported_outcome(status, &body)
    }

    /// `POST /api/slider/test_cycle`
    ///
    /// `"success": false` here means the test ran and failed, which is a result rather than an
    /// error, so only the HTTP status is checked.
    pub async fn slider_test_cycle(&self) -> Result<ActionResponse, RequestFailed> {
        let (status, body) = self.send(Method::POST, PATH_SLIDER_TEST_CYCLE, None).await?;
        ensure_success(status, &body)?;
        Ok(ActionResponse::from_body(&body))
    }

    /// Fire a legacy endpoint. The response body is never looked at.
    async fn legacy(&self, path: &str) -> Result<ActionResponse, RequestFailed> {
        let (status, _) = self.send(Method::POST, path, None).await?;
        if !status.is_success() {
            warn!("{path} answered {status}");
        }
        Ok(ActionResponse::default())
    }

    pub async fn execute(&self, request: ActionRequest) -> Result<ActionResponse, RequestFailed> {
        match request {
            ActionRequest::RotaryHome => self.home().await,
            ActionRequest::RotaryMove { degrees } => self.move_degrees(degrees).await,
            ActionRequest::RotarySetZero => self.set_zero().await,
            ActionRequest::SliderTestCycle => self.slider_test_cycle().await,
            ActionRequest::LegacyHome => self.legacy(PATH_LEGACY_HOME).await,
            ActionRequest::LegacyStart => self.legacy(PATH_LEGACY_START).await,
        }
    }

    async fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<(StatusCode, Bytes), RequestFailed> {
        let uri = format!("{}{path}", self.base_url);
        debug!("{method} {uri}");

        let request = Request::builder()
            .method(method)
            .uri(uri.as_str())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .map_err(|e| RequestFailed::Transport(format!("failed to build request for {uri}: {e}")))?;

        let response = self.client.request(request).await
            .map_err(|e| RequestFailed::Transport(format!("request to {uri} failed: {e}")))?;
        let status = response.status();

        // note that this buffers the entire body, which is fine for the small payloads involved
        let body = hyper::body::to_bytes(response.into_body()).await
            .map_err(|e| RequestFailed::Transport(format!("failed to read response from {uri}: {e}")))?;

        debug!("{uri} answered {status} with {} bytes", body.len());
        Ok((status, body))
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, RequestFailed> {
    serde_json::to_vec(value).map_err(|e| RequestFailed::Decode(format!("failed to encode request body: {e}")))
}

/// Non-2xx statuses become [`RequestFailed::Status`], using the body's message when it has one.
fn ensure_success(status: StatusCode, body: &[u8]) -> Result<(), RequestFailed> {
    if status.is_success() {
        Ok(())
    } else {
        let response = ActionResponse::from_body(body);
        Err(RequestFailed::from_status(status, response.message))
    }
}

/// For endpoints where either a non-2xx status or `"success": false` means failure.
fn reported_outcome(status: StatusCode, body: &[u8]) -> Result<ActionResponse, RequestFailed> {
    let response = ActionResponse::from_body(body);
    if !status.is_success() || response.reported_failure() {
        Err(RequestFailed::from_status(status, response.message))
    } else {
        Ok(response)
    }
}
