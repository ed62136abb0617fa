// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

//! Panel behavior that doesn't depend on the GUI toolkit

pub mod config_form;
pub mod panel;
pub mod poller;
pub mod structs;
