// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

//! Everything the control panel shows and enables, without any I/O.
//!
//! The GUI forwards button presses and request outcomes here and renders whatever this says.
//! Keeping it free of iced and hyper means the enable/disable rules can be tested directly.

use tracing::{debug, warn};

use crate::api::{ActionRequest, ActionResponse, ConfigSchema, DeviceConfig, DeviceStatus, RequestFailed};
use crate::app::config_form::ConfigForm;
use crate::app::structs::{Indicator, PanelAction, PanelLayout, SliderTestState};
use crate::util::extensions::FloatExtensions;
use crate::util::number;

#[derive(Clone, Debug)]
pub struct Panel {
    layout: PanelLayout,
    /// the busy-group action whose request hasn't settled yet
    in_flight: Option<PanelAction>,
    saving: bool,
    /// most recent successful poll
    status: Option<DeviceStatus>,
    message: String,
    slider_test: SliderTestState,
    degrees_text: String,
    config_form: ConfigForm,
}

impl Panel {
    pub fn new(layout: PanelLayout, schema: ConfigSchema) -> Panel {
        Panel {
            layout,
            in_flight: None,
            saving: false,
            status: None,
            message: String::new(),
            slider_test: SliderTestState::default(),
            degrees_text: String::new(),
            config_form: ConfigForm::new(schema),
        }
    }

    pub fn layout(&self) -> PanelLayout {
        self.layout
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<&DeviceStatus> {
        self.status.as_ref()
    }

    pub fn slider_test(&self) -> SliderTestState {
        self.slider_test
    }

    pub fn config_form(&self) -> &ConfigForm {
        &self.config_form
    }

    pub fn config_form_mut(&mut self) -> &mut ConfigForm {
        &mut self.config_form
    }

    pub fn degrees_text(&self) -> &str {
        &self.degrees_text
    }

    pub fn set_degrees_text(&mut self, text: String) {
        self.degrees_text = text;
    }

    fn reported_running(&self) -> bool {
        self.status.as_ref().map_or(false, |status| status.is_running)
    }

    fn reported_homed(&self) -> bool {
        self.status.as_ref().map_or(false, |status| status.is_homed)
    }

    /// True while a busy-group request is in flight or the rig says it's running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some() || self.reported_running()
    }

    pub fn is_enabled(&self, action: PanelAction) -> bool {
        if !action.available_in(self.layout) || self.is_busy() {
            return false;
        }
        match action {
            PanelAction::StartCycle => self.reported_homed(),
            _ => true,
        }
    }

    pub fn can_save(&self) -> bool {
        self.layout == PanelLayout::RotarySlider && !self.saving
    }

    pub fn indicator_active(&self, indicator: Indicator) -> bool {
        self.status.as_ref().map_or(false, |status| indicator.read(status))
    }

    pub fn active_indicators(&self) -> impl Iterator<Item = Indicator> + '_ {
        Indicator::for_layout(self.layout)
            .iter()
            .copied()
            .filter(|indicator| self.indicator_active(*indicator))
    }

    pub fn homed_label(&self) -> &'static str {
        if self.reported_homed() {
            "Homed"
        } else {
            "Not Homed"
        }
    }

    /// Operator pressed `action`. Returns the request to send, or `None` if the button is disabled.
    pub fn begin(&mut self, action: PanelAction) -> Option<ActionRequest> {
        if !self.is_enabled(action) {
            debug!("ignoring {action} while disabled");
            return None;
        }

        let request = match action {
            PanelAction::Home => match self.layout {
                PanelLayout::RotarySlider => {
                    self.message = "Homing rotary...".to_string();
                    ActionRequest::RotaryHome
                }
                PanelLayout::Legacy => {
                    self.message = "Homing sequence initiated...".to_string();
                    ActionRequest::LegacyHome
                }
            },
            PanelAction::MoveForward => {
                let degrees = requested_degrees(&self.degrees_text);
                self.message = format!("Moving +{degrees}°...");
                ActionRequest::RotaryMove { degrees }
            }
            PanelAction::MoveBackward => {
                let degrees = requested_degrees(&self.degrees_text);
                self.message = format!("Moving -{degrees}°...");
                ActionRequest::RotaryMove { degrees: negate(degrees) }
            }
            PanelAction::SetZero => {
                self.message = "Setting current position as zero...".to_string();
                ActionRequest::RotarySetZero
            }
            PanelAction::SliderTest => {
                self.slider_test = SliderTestState::Testing;
                self.message = "Starting slider test cycle...".to_string();
                ActionRequest::SliderTestCycle
            }
            PanelAction::StartCycle => {
                self.message = "Starting cycle...".to_string();
                ActionRequest::LegacyStart
            }
        };

        self.in_flight = Some(action);
        Some(request)
    }

    /// The request started by [`Panel::begin`] for `action` finished.
    pub fn settle(&mut self, action: PanelAction, result: Result<ActionResponse, RequestFailed>) {
        if self.in_flight == Some(action) {
            self.in_flight = None;
        } else {
            warn!("{action} settled but {:?} was in flight", self.in_flight);
        }

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                if action == PanelAction::SliderTest {
                    self.slider_test = SliderTestState::Error;
                }
                self.message = format!("Error: {}", e.message());
                return;
            }
        };

        let message = match (action, self.layout) {
            // legacy endpoints don't answer with anything worth showing
            (PanelAction::Home, PanelLayout::Legacy) | (PanelAction::StartCycle, _) => return,
            (PanelAction::Home, PanelLayout::RotarySlider) => response.message().unwrap_or("Homed"),
            (PanelAction::MoveForward | PanelAction::MoveBackward, _) => response.message().unwrap_or("Moved"),
            (PanelAction::SetZero, _) => response.message().unwrap_or("Zero set"),
            (PanelAction::SliderTest, _) => {
                self.slider_test = if response.success == Some(true) {
                    SliderTestState::Complete
                } else {
                    SliderTestState::Failed
                };
                response.message().unwrap_or("Slider test completed")
            }
        };
        self.message = message.to_string();
    }

    pub fn apply_poll(&mut self, outcome: Result<DeviceStatus, RequestFailed>) {
        match outcome {
            Ok(status) => {
                if self.layout == PanelLayout::Legacy {
                    self.message = status.system_message.clone();
                }
                self.status = Some(status);
            }
            Err(e) => {
                self.message = format!("Status error: {}", e.message());
            }
        }
    }

    pub fn apply_loaded_config(&mut self, result: Result<DeviceConfig, RequestFailed>) {
        match result {
            Ok(config) => self.config_form.populate(&config),
            Err(e) => self.message = format!("Load config error: {}", e.message()),
        }
    }

    /// Operator pressed save. Returns the coerced configuration to send, or `None` while a save is already running.
    pub fn begin_save(&mut self) -> Option<DeviceConfig> {
        if !self.can_save() {
            return None;
        }
        self.saving = true;
        self.message = "Saving configuration...".to_string();
        Some(self.config_form.to_config())
    }

    pub fn settle_save(&mut self, result: Result<ActionResponse, RequestFailed>) {
        self.saving = false;
        self.message = match result {
            Ok(_) => "Configuration saved".to_string(),
            Err(e) => format!("Save config error: {}", e.message()),
        };
    }
}

/// Magnitude to move by. Anything that doesn't read as a finite number means "don't move".
fn requested_degrees(text: &str) -> f64 {
    number::parse_float_prefix(text).unwrap_or(0.0).finite_or_zero().abs()
}

fn negate(degrees: f64) -> f64 {
    if degrees == 0.0 {
        0.0
    } else {
        -degrees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUSY_GROUP: [PanelAction; 5] = [
        PanelAction::Home,
        PanelAction::MoveForward,
        PanelAction::MoveBackward,
        PanelAction::SetZero,
        PanelAction::SliderTest,
    ];

    fn panel() -> Panel {
        Panel::new(PanelLayout::RotarySlider, ConfigSchema::Speed)
    }

    fn legacy_panel() -> Panel {
        Panel::new(PanelLayout::Legacy, ConfigSchema::Speed)
    }

    fn message(text: &str) -> Result<ActionResponse, RequestFailed> {
        Ok(ActionResponse { message: Some(text.to_string()), success: None })
    }

    fn failure(text: &str) -> RequestFailed {
        RequestFailed::Status { status: 500, message: text.to_string() }
    }

    #[test]
    fn idle_status_enables_controls() {
        let mut panel = panel();
        panel.apply_poll(Ok(DeviceStatus { is_running: false, is_homed: true, hall_status: true, ..Default::default() }));

        assert!(panel.indicator_active(Indicator::Hall));
        assert!(!panel.indicator_active(Indicator::Inductive));
        assert!(panel.is_enabled(PanelAction::MoveForward));
        assert!(panel.is_enabled(PanelAction::MoveBackward));

        let mut legacy = legacy_panel();
        legacy.apply_poll(Ok(DeviceStatus { is_running: false, is_homed: true, hall_status: true, ..Default::default() }));
        assert!(legacy.is_enabled(PanelAction::StartCycle));
        assert!(legacy.is_enabled(PanelAction::Home));
    }

    #[test]
    fn indicators_mirror_every_boolean() {
        let mut panel = panel();
        for bits in 0..16u8 {
            let status = DeviceStatus {
                hall_status: bits & 1 != 0,
                inductive_status: bits & 2 != 0,
                slider_min: bits & 4 != 0,
                slider_max: bits & 8 != 0,
                ..Default::default()
            };
            panel.apply_poll(Ok(status.clone()));
            for indicator in Indicator::for_layout(PanelLayout::RotarySlider) {
                assert_eq!(panel.indicator_active(*indicator), indicator.read(&status), "{indicator:?} for {bits:04b}");
            }
        }
    }

    #[test]
    fn nothing_is_lit_before_first_poll() {
        let panel = panel();
        assert_eq!(panel.active_indicators().count(), 0);
        assert_eq!(panel.homed_label(), "Not Homed");
    }

    #[test]
    fn running_rig_disables_busy_group() {
        let mut panel = panel();
        panel.apply_poll(Ok(DeviceStatus { is_running: true, is_homed: true, ..Default::default() }));
        for action in BUSY_GROUP {
            assert!(!panel.is_enabled(action), "{action}");
            assert_eq!(panel.begin(action), None);
        }
        assert!(panel.can_save());
    }

    #[test]
    fn in_flight_action_disables_busy_group_until_settled() {
        for action in BUSY_GROUP {
            for outcome in [message("ok"), Err(failure("nope"))] {
                let mut panel = panel();
                assert!(panel.begin(action).is_some());
                assert!(BUSY_GROUP.iter().all(|other| !panel.is_enabled(*other)));

                // a poll saying the rig is idle must not re-enable anything mid-request
                panel.apply_poll(Ok(DeviceStatus::default()));
                assert!(BUSY_GROUP.iter().all(|other| !panel.is_enabled(*other)));

                panel.settle(action, outcome);
                assert!(BUSY_GROUP.iter().all(|other| panel.is_enabled(*other)), "{action}");
            }
        }
    }

    #[test]
    fn move_sends_signed_magnitude() {
        let cases = [("15", 15.0), ("-15", 15.0), ("2.5 deg", 2.5), ("abc", 0.0), ("", 0.0), ("1e999", 0.0)];
        for (text, magnitude) in cases {
            let mut panel = panel();
            panel.set_degrees_text(text.to_string());
            assert_eq!(panel.begin(PanelAction::MoveForward), Some(ActionRequest::RotaryMove { degrees: magnitude }));
            panel.settle(PanelAction::MoveForward, message("Moved"));

            let expected = if magnitude == 0.0 { 0.0 } else { -magnitude };
            assert_eq!(panel.begin(PanelAction::MoveBackward), Some(ActionRequest::RotaryMove { degrees: expected }));
            match panel.begin(PanelAction::MoveBackward) {
                None => (),
                Some(request) => panic!("second request {request:?} while in flight"),
            }
        }
    }

    #[test]
    fn zero_backward_move_is_not_negative_zero() {
        let mut panel = panel();
        panel.set_degrees_text("0".into());
        match panel.begin(PanelAction::MoveBackward) {
            Some(ActionRequest::RotaryMove { degrees }) => assert!(degrees.is_sign_positive()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn move_reports_progress_then_result() {
        let mut panel = panel();
        panel.set_degrees_text("15".into());
        panel.begin(PanelAction::MoveBackward);
        assert_eq!(panel.message(), "Moving -15°...");
        panel.settle(PanelAction::MoveBackward, message("Moved"));
        assert_eq!(panel.message(), "Moved");
    }

    #[test]
    fn default_messages() {
        let mut panel = panel();
        for (action, text) in [(PanelAction::Home, "Homed"), (PanelAction::MoveForward, "Moved"), (PanelAction::SetZero, "Zero set")] {
            panel.begin(action);
            panel.settle(action, Ok(ActionResponse::default()));
            assert_eq!(panel.message(), text);
        }
    }

    #[test]
    fn errors_are_prefixed() {
        let mut panel = panel();
        panel.begin(PanelAction::Home);
        panel.settle(PanelAction::Home, Err(RequestFailed::Transport("connection refused".into())));
        assert_eq!(panel.message(), "Error: connection refused");
    }

    #[test]
    fn slider_test_outcomes() {
        let mut panel = panel();

        panel.begin(PanelAction::SliderTest);
        assert_eq!(panel.slider_test(), SliderTestState::Testing);
        assert_eq!(panel.message(), "Starting slider test cycle...");
        panel.settle(PanelAction::SliderTest, Ok(ActionResponse { success: Some(false), message: Some("timeout".into()) }));
        assert_eq!(panel.slider_test().label(), "Test Failed");
        assert_eq!(panel.message(), "timeout");

        panel.begin(PanelAction::SliderTest);
        panel.settle(PanelAction::SliderTest, Ok(ActionResponse { success: Some(true), message: None }));
        assert_eq!(panel.slider_test(), SliderTestState::Complete);
        assert_eq!(panel.message(), "Slider test completed");

        panel.begin(PanelAction::SliderTest);
        panel.settle(PanelAction::SliderTest, Ok(ActionResponse::default()));
        assert_eq!(panel.slider_test(), SliderTestState::Failed);

        panel.begin(PanelAction::SliderTest);
        panel.settle(PanelAction::SliderTest, Err(failure("Internal Server Error")));
        assert_eq!(panel.slider_test(), SliderTestState::Error);
        assert_eq!(panel.message(), "Error: Internal Server Error");
    }

    #[test]
    fn poll_errors_keep_last_status() {
        let mut panel = panel();
        panel.apply_poll(Ok(DeviceStatus { slider_max: true, ..Default::default() }));
        panel.apply_poll(Err(RequestFailed::Transport("connection reset".into())));

        assert_eq!(panel.message(), "Status error: connection reset");
        assert!(panel.indicator_active(Indicator::SliderMax));
    }

    #[test]
    fn legacy_layout() {
        let mut panel = legacy_panel();
        assert!(!panel.is_enabled(PanelAction::StartCycle), "start needs a homed rig");
        assert!(!panel.is_enabled(PanelAction::SetZero));
        assert!(!panel.can_save());

        assert_eq!(panel.begin(PanelAction::Home), Some(ActionRequest::LegacyHome));
        assert_eq!(panel.message(), "Homing sequence initiated...");
        panel.settle(PanelAction::Home, Ok(ActionResponse::default()));
        assert_eq!(panel.message(), "Homing sequence initiated...");

        panel.apply_poll(Ok(DeviceStatus { is_homed: true, system_message: "Homing successful. Ready to start cycle.".into(), ..Default::default() }));
        assert_eq!(panel.message(), "Homing successful. Ready to start cycle.");
        assert_eq!(panel.homed_label(), "Homed");

        assert_eq!(panel.begin(PanelAction::StartCycle), Some(ActionRequest::LegacyStart));
        assert_eq!(panel.message(), "Starting cycle...");
    }

    #[test]
    fn save_flow() {
        let mut panel = panel();
        panel.apply_loaded_config(ConfigSchema::Speed.parse(br#"{"step_degrees": 36, "rotary_speed": 50}"#).map_err(|e| RequestFailed::Decode(e.to_string())));
        assert_eq!(panel.config_form().text(0), Some("36"));

        let config = panel.begin_save().unwrap();
        assert_eq!(config, panel.config_form().to_config());
        assert_eq!(panel.message(), "Saving configuration...");
        assert!(panel.begin_save().is_none());

        panel.settle_save(Err(failure("step_degrees must divide 360")));
        assert_eq!(panel.message(), "Save config error: step_degrees must divide 360");
        assert!(panel.can_save());

        panel.begin_save();
        panel.settle_save(Ok(ActionResponse::default()));
        assert_eq!(panel.message(), "Configuration saved");
    }

    #[test]
    fn load_error_is_reported() {
        let mut panel = panel();
        panel.apply_loaded_config(Err(RequestFailed::Transport("connection refused".into())));
        assert_eq!(panel.message(), "Load config error: connection refused");
        assert!(!panel.config_form().is_loaded());
    }
}
