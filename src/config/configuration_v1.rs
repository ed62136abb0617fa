// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::{ConfigSchema, Timeouts};
use crate::app::structs::PanelLayout;

use super::CONFIG_VERSION;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_POLL_INTERVAL_MILLIS: u64 = 1000;
const MINIMUM_POLL_INTERVAL_MILLIS: u64 = 100;

fn default_version() -> i32 {
    0
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_poll_interval_millis() -> u64 {
    DEFAULT_POLL_INTERVAL_MILLIS
}

#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
pub struct ConfigurationV1 {
    #[serde(default = "default_version")]
    pub version: i32,
    /// base URL of the rig controller, e.g. `http://raspberrypi.local:5000`
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default)]
    pub layout: PanelLayout,
    /// which `/api/config` schema the controller speaks
    #[serde(default)]
    pub config_schema: ConfigSchema,
    #[serde(default = "default_poll_interval_millis")]
    pub poll_interval_millis: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_millis: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_timeout_millis: Option<u64>,
}

impl ConfigurationV1 {
    pub fn new_with_current_version(&self) -> ConfigurationV1 {
        ConfigurationV1 {
            version: CONFIG_VERSION,
            ..self.clone()
        }
    }

    pub fn with_server_url(&self, server_url: String) -> ConfigurationV1 {
        ConfigurationV1 {
            server_url,
            ..self.clone()
        }
    }

    pub fn is_version_outdated(version: i32) -> bool {
        version < CONFIG_VERSION
    }

    pub fn is_outdated(&self) -> bool {
        ConfigurationV1::is_version_outdated(self.version)
    }

    /// Status poll period. Never shorter than 100ms, whatever the file says.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_millis.max(MINIMUM_POLL_INTERVAL_MILLIS))
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            connect: self.connect_timeout_millis.map(Duration::from_millis),
            read: self.read_timeout_millis.map(Duration::from_millis),
        }
    }
}

impl Default for ConfigurationV1 {
    fn default() -> Self {
        ConfigurationV1 {
            version: CONFIG_VERSION,
            server_url: default_server_url(),
            layout: PanelLayout::default(),
            config_schema: ConfigSchema::default(),
            poll_interval_millis: DEFAULT_POLL_INTERVAL_MILLIS,
            connect_timeout_millis: None,
            read_timeout_millis: None,
        }
    }
}
