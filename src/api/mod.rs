// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

//! Client side of the rig controller's HTTP API

pub use client::{ActionRequest, DeviceApi, Timeouts};
pub use device_config::{ConfigSchema, DeviceConfig, FieldKind, FieldSpec};
pub use error::RequestFailed;
pub use structs::{ActionResponse, DeviceStatus};

mod client;
mod device_config;
mod error;
mod structs;
