// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

use std::fmt;
use std::fmt::{Display, Formatter};

use crate::app::structs::PanelLayout;

/// Buttons of the busy group. At most one of these is in flight at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelAction {
    Home,
    MoveForward,
    MoveBackward,
    SetZero,
    SliderTest,
    StartCycle,
}

impl PanelAction {
    pub fn available_in(self, layout: PanelLayout) -> bool {
        match layout {
            PanelLayout::RotarySlider => !matches!(self, PanelAction::StartCycle),
            PanelLayout::Legacy => matches!(self, PanelAction::Home | PanelAction::StartCycle),
        }
    }
}

impl Display for PanelAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PanelAction::Home => write!(f, "home"),
            PanelAction::MoveForward => write!(f, "move forward"),
            PanelAction::MoveBackward => write!(f, "move backward"),
            PanelAction::SetZero => write!(f, "set zero"),
            PanelAction::SliderTest => write!(f, "slider test"),
            PanelAction::StartCycle => write!(f, "start cycle"),
        }
    }
}
