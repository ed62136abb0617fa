// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

use iced::widget::container;
use iced::{Theme, theme};

use crate::app::structs::SliderTestState;
use crate::gui::constants::INDICATOR_RADIUS;

/// Look of a sensor lamp
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorAppearance {
    Active,
    Inactive,
}

impl From<bool> for IndicatorAppearance {
    fn from(active: bool) -> Self {
        if active {
            IndicatorAppearance::Active
        } else {
            IndicatorAppearance::Inactive
        }
    }
}

impl IndicatorAppearance {
    pub fn container_style(self) -> theme::Container {
        theme::Container::Custom(Box::new(self))
    }
}

impl container::StyleSheet for IndicatorAppearance {
    type Style = Theme;

    fn appearance(&self, style: &Self::Style) -> container::Appearance {
        let palette = style.extended_palette();

        let pair = match self {
            IndicatorAppearance::Active => palette.success.strong,
            IndicatorAppearance::Inactive => palette.background.weak,
        };

        container::Appearance {
            text_color: Some(pair.text),
            background: Some(pair.color.into()),
            border_radius: INDICATOR_RADIUS.into(),
            border_width: 1.0,
            border_color: palette.background.strong.color,
        }
    }
}

/// Text color for the slider test result
pub fn slider_test_text(state: SliderTestState, theme: &Theme) -> theme::Text {
    let palette = theme.extended_palette();

    match state {
        SliderTestState::Complete => theme::Text::Color(palette.success.strong.color),
        SliderTestState::Failed | SliderTestState::Error => theme::Text::Color(palette.danger.strong.color),
        SliderTestState::Idle | SliderTestState::Testing => theme::Text::Default,
    }
}

#[cfg(test)]
mod tests {
    use iced::widget::container::StyleSheet;

    use super::*;

    #[test]
    fn lamps_differ_when_lit() {
        let lit = IndicatorAppearance::from(true).appearance(&Theme::Dark);
        let unlit = IndicatorAppearance::from(false).appearance(&Theme::Dark);
        assert_ne!(lit.background, unlit.background);
    }

    #[test]
    fn only_finished_tests_are_colored() {
        assert!(matches!(slider_test_text(SliderTestState::Idle, &Theme::Dark), theme::Text::Default));
        assert!(matches!(slider_test_text(SliderTestState::Testing, &Theme::Dark), theme::Text::Default));
        assert!(matches!(slider_test_text(SliderTestState::Complete, &Theme::Dark), theme::Text::Color(_)));
        assert!(matches!(slider_test_text(SliderTestState::Failed, &Theme::Dark), theme::Text::Color(_)));
        assert!(matches!(slider_test_text(SliderTestState::Error, &Theme::Dark), theme::Text::Color(_)));
    }
}
