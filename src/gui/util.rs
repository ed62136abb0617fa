// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

use std::borrow::Cow;

use iced::Element;
use iced::widget::{Button, Container, Text};

use crate::gui::constants::TEXT_INPUT_PADDING;

pub fn input_label<'a, S: Into<Cow<'a, str>>, T: 'a>(label: S) -> Element<'a, T> {
    let text = Text::new(label);

    Container::new(text)
        .padding(TEXT_INPUT_PADDING)
        .into()
}

/// A button that only reacts to presses when `enabled`
pub fn button<'a, T: Clone + 'a>(label: &'a str, enabled: bool, message: T) -> Element<'a, T> {
    let button = Button::new(Text::new(label)).padding(TEXT_INPUT_PADDING);
    if enabled {
        button.on_press(message).into()
    } else {
        button.into()
    }
}
