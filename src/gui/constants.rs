// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

pub const TEXT_INPUT_PADDING: u16 = 5;
pub const DEGREES_INPUT_WIDTH: f32 = 75.0;
pub const CONFIG_INPUT_WIDTH: f32 = 100.0;
pub const URL_INPUT_WIDTH: f32 = 260.0;
pub const CONFIG_LABEL_WIDTH: f32 = 180.0;
pub const TABLE_SPACING: u16 = 20;
pub const EOL_INPUT_SPACING: u16 = 5;
pub const INDICATOR_PADDING: u16 = 8;
pub const INDICATOR_RADIUS: f32 = 10.0;
pub const TEXT_SIZE_SMALL: u16 = 12;
pub const TEXT_SIZE_DEFAULT: f32 = 20.0;
pub const TEXT_SIZE_BIG: u16 = 30;
pub const WINDOW_SIZE: (u32, u32) = (720, 820);
