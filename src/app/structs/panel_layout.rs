// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

use serde::{Deserialize, Serialize};

/// Which generation of controller firmware the panel is driving
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PanelLayout {
    /// rotary home/move/zero, slider self test, config form
    #[default]
    RotarySlider,
    /// home and full-cycle start only
    Legacy,
}
