// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

//! Local settings of this panel (which controller to talk to and how), stored as TOML

pub use configuration_minimal::ConfigurationMinimal;
pub use util::*;

mod configuration_minimal;
mod configuration_v1;
mod util;

pub mod v1 {
    pub use super::configuration_v1::*;
}

pub const CONFIG_VERSION: i32 = 1;
