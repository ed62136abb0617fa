// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

use crate::api::DeviceStatus;
use crate::app::structs::PanelLayout;

/// A binary sensor lamp on the panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indicator {
    Hall,
    Inductive,
    SliderMin,
    SliderMax,
}

impl Indicator {
    pub fn for_layout(layout: PanelLayout) -> &'static [Indicator] {
        match layout {
            PanelLayout::RotarySlider => &[Indicator::Hall, Indicator::Inductive, Indicator::SliderMin, Indicator::SliderMax],
            PanelLayout::Legacy => &[Indicator::Hall, Indicator::Inductive],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Indicator::Hall => "Hall",
            Indicator::Inductive => "Inductive",
            Indicator::SliderMin => "Slider min",
            Indicator::SliderMax => "Slider max",
        }
    }

    /// the status field this lamp mirrors
    pub fn read(self, status: &DeviceStatus) -> bool {
        match self {
            Indicator::Hall => status.hall_status,
            Indicator::Inductive => status.inductive_status,
            Indicator::SliderMin => status.slider_min,
            Indicator::SliderMax => status.slider_max,
        }
    }
}
