// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

//! This module contains the small value types shared by the panel, the GUI and the settings.

pub use cli_args::CliArgs;
pub use indicator::Indicator;
pub use panel_action::PanelAction;
pub use panel_layout::PanelLayout;
pub use slider_test_state::SliderTestState;

mod cli_args;
mod indicator;
mod panel_action;
mod panel_layout;
mod slider_test_state;
