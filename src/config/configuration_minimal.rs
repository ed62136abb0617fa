// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

use serde::Deserialize;

use super::CONFIG_VERSION;

// files written before settings were versioned have no version field
fn default_version() -> i32 {
    0
}

/// Just enough of a settings file to learn which version wrote it
#[derive(Deserialize)]
pub struct ConfigurationMinimal {
    #[serde(default = "default_version")]
    pub version: i32,
}

impl Default for ConfigurationMinimal {
    fn default() -> Self {
        ConfigurationMinimal {
            version: CONFIG_VERSION,
        }
    }
}
