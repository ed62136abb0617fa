// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

/// Outcome of the most recent slider self test
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SliderTestState {
    #[default]
    Idle,
    Testing,
    Complete,
    Failed,
    Error,
}

impl SliderTestState {
    pub fn label(self) -> &'static str {
        match self {
            SliderTestState::Idle => "",
            SliderTestState::Testing => "Testing slider cycle...",
            SliderTestState::Complete => "Test Complete",
            SliderTestState::Failed => "Test Failed",
            SliderTestState::Error => "Test Error",
        }
    }
}
