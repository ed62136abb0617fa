// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

use iced::widget::{Column, Container, Row, Rule, Scrollable, Text, TextInput};
use iced::{Alignment, Application, Command, Element, Length, Settings, Subscription, Theme};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use crate::api::{ActionResponse, ConfigSchema, DeviceApi, DeviceConfig, FieldKind, RequestFailed};
use crate::app::panel::Panel;
use crate::app::poller::PollOutcome;
use crate::app::structs::{Indicator, PanelAction, PanelLayout};
use crate::config;
use crate::config::v1::ConfigurationV1;
use crate::gui::constants::*;
use crate::gui::element_appearance::{self, IndicatorAppearance};
use crate::gui::subscription::ChannelSubscription;
use crate::gui::util;
use crate::gui::TokioExecutor;

pub fn run(flags: Flags) -> iced::Result {
    let mut settings = Settings::with_flags(flags);
    settings.default_text_size = TEXT_SIZE_DEFAULT;
    settings.window.size = WINDOW_SIZE;
    Gui::run(settings)
}

pub struct Flags {
    pub api: DeviceApi,
    pub settings: ConfigurationV1,
    pub poll_receiver: UnboundedReceiver<PollOutcome>,
}

#[derive(Debug, Clone)]
pub enum Message {
    ActionPressed(PanelAction),
    ActionComplete(PanelAction, Result<ActionResponse, RequestFailed>),
    DegreesUpdated(String),
    StatusPolled(PollOutcome),
    ConfigLoaded(Result<DeviceConfig, RequestFailed>),
    ConfigFieldUpdated(usize, String),
    SaveConfigRequest,
    SaveConfigComplete(Result<ActionResponse, RequestFailed>),
    ServerUrlUpdated(String),
    ApplySettingsRequest,
    ApplySettingsComplete(Result<ConfigurationV1, String>),
}

struct Gui {
    api: DeviceApi,
    settings: ConfigurationV1,
    server_url_text: String,
    settings_message: String,
    panel: Panel,
    status_subscription: ChannelSubscription<PollOutcome>,
}

impl Application for Gui {
    type Executor = TokioExecutor;
    type Message = Message;
    type Theme = Theme;
    type Flags = Flags;

    fn new(flags: Self::Flags) -> (Self, Command<Self::Message>) {
        let Flags { api, settings, poll_receiver } = flags;

        let command = match settings.layout {
            PanelLayout::RotarySlider => Command::perform(
                load_config(api.clone(), settings.config_schema),
                Message::ConfigLoaded,
            ),
            PanelLayout::Legacy => Command::none(),
        };

        let gui = Gui {
            // the saved URL, not a --server-url override
            server_url_text: settings.server_url.clone(),
            settings_message: String::new(),
            panel: Panel::new(settings.layout, settings.config_schema),
            status_subscription: ChannelSubscription::new(poll_receiver),
            api,
            settings,
        };

        (gui, command)
    }

    fn title(&self) -> String {
        format!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    fn update(&mut self, message: Self::Message) -> Command<Self::Message> {
        match message {
            Message::ActionPressed(action) => {
                match self.panel.begin(action) {
                    Some(request) => {
                        info!("{action} pressed: {request:?}");
                        let api = self.api.clone();
                        Command::perform(
                            async move { api.execute(request).await },
                            move |result| Message::ActionComplete(action, result),
                        )
                    }
                    None => Command::none(),
                }
            }
            Message::ActionComplete(action, result) => {
                match &result {
                    Ok(response) => info!("{action} completed: {response:?}"),
                    Err(e) => warn!("{action} failed: {e}"),
                }
                self.panel.settle(action, result);
                Command::none()
            }
            Message::DegreesUpdated(text) => {
                self.panel.set_degrees_text(text);
                Command::none()
            }
            Message::StatusPolled(outcome) => {
                self.panel.apply_poll(outcome);
                Command::none()
            }
            Message::ConfigLoaded(result) => {
                match &result {
                    Ok(config) => info!("loaded {} configuration: {config:?}", config.schema()),
                    Err(e) => warn!("could not load configuration: {e}"),
                }
                self.panel.apply_loaded_config(result);
                Command::none()
            }
            Message::ConfigFieldUpdated(index, text) => {
                if let Some(field) = self.panel.config_form().schema().fields().get(index) {
                    debug!("{} edited: {text:?}", field.key);
                }
                self.panel.config_form_mut().set_text(index, text);
                Command::none()
            }
            Message::SaveConfigRequest => {
                match self.panel.begin_save() {
                    Some(config) => {
                        info!("saving configuration: {config:?}");
                        let api = self.api.clone();
                        Command::perform(
                            async move { api.save_config(&config).await },
                            Message::SaveConfigComplete,
                        )
                    }
                    None => Command::none(),
                }
            }
            Message::SaveConfigComplete(result) => {
                if let Err(e) = &result {
                    warn!("configuration save failed: {e}");
                }
                self.panel.settle_save(result);
                Command::none()
            }
            Message::ServerUrlUpdated(text) => {
                self.server_url_text = text;
                Command::none()
            }
            Message::ApplySettingsRequest => {
                let server_url = self.server_url_text.trim().to_string();
                match DeviceApi::new(&server_url, self.settings.timeouts()) {
                    Ok(api) => {
                        let settings = self.settings.with_server_url(api.base_url().to_string());
                        debug!("saving settings: {settings:?}");
                        Command::perform(save_settings(settings), Message::ApplySettingsComplete)
                    }
                    Err(e) => {
                        self.settings_message = format!("Invalid server URL: {e}");
                        Command::none()
                    }
                }
            }
            Message::ApplySettingsComplete(result) => {
                match result {
                    Ok(settings) => {
                        info!("settings saved; controller URL is now {}", settings.server_url);
                        self.settings_message = format!("Settings saved. Restart to connect to {}", settings.server_url);
                        self.settings = settings;
                    }
                    Err(e) => {
                        warn!("could not save settings: {e}");
                        self.settings_message = format!("Could not save settings: {e}");
                    }
                }
                Command::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let mut content = Column::new()
            .spacing(TABLE_SPACING)
            .width(Length::Fill)
            .push(self.view_header())
            .push(self.view_indicators())
            .push(Rule::horizontal(TABLE_SPACING))
            .push(self.view_controls())
            .push(Text::new(self.panel.message()));

        if self.panel.layout() == PanelLayout::RotarySlider {
            content = content
                .push(Rule::horizontal(TABLE_SPACING))
                .push(self.view_config_form());
        }

        content = content
            .push(Rule::horizontal(TABLE_SPACING))
            .push(self.view_settings());

        Container::new(Scrollable::new(Container::new(content).padding(TABLE_SPACING)))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn theme(&self) -> Self::Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        self.status_subscription.subscribe().map(Message::StatusPolled)
    }
}

impl Gui {
    fn view_header(&self) -> Element<'_, Message> {
        let angle = match self.panel.status() {
            Some(status) => format!("Angle: {:.1}°", status.current_angle),
            None => "Angle: --".to_string(),
        };

        Row::new()
            .spacing(TABLE_SPACING)
            .align_items(Alignment::Center)
            .push(Text::new("Rotary Panel").size(TEXT_SIZE_BIG))
            .push(Text::new(self.panel.homed_label()))
            .push(Text::new(angle))
            .into()
    }

    fn view_indicators(&self) -> Element<'_, Message> {
        Indicator::for_layout(self.panel.layout())
            .iter()
            .fold(Row::new().spacing(TABLE_SPACING), |row, indicator| {
                let lamp = Container::new(Text::new(indicator.label()))
                    .padding(INDICATOR_PADDING)
                    .style(IndicatorAppearance::from(self.panel.indicator_active(*indicator)).container_style());
                row.push(lamp)
            })
            .into()
    }

    fn action_button(&self, label: &'static str, action: PanelAction) -> Element<'_, Message> {
        util::button(label, self.panel.is_enabled(action), Message::ActionPressed(action))
    }

    fn view_controls(&self) -> Element<'_, Message> {
        match self.panel.layout() {
            PanelLayout::RotarySlider => {
                let slider_test = Text::new(self.panel.slider_test().label())
                    .style(element_appearance::slider_test_text(self.panel.slider_test(), &self.theme()));

                Column::new()
                    .spacing(TABLE_SPACING)
                    .push(Row::new()
                        .spacing(TABLE_SPACING)
                        .push(self.action_button("Home", PanelAction::Home))
                        .push(self.action_button("Set zero", PanelAction::SetZero))
                    )
                    .push(Row::new()
                        .spacing(EOL_INPUT_SPACING)
                        .align_items(Alignment::Center)
                        .push(util::input_label("Degrees:"))
                        .push(
                            TextInput::new("degrees", self.panel.degrees_text())
                                .on_input(Message::DegreesUpdated)
                                .width(Length::Fixed(DEGREES_INPUT_WIDTH))
                                .padding(TEXT_INPUT_PADDING)
                        )
                        .push(self.action_button("- Move", PanelAction::MoveBackward))
                        .push(self.action_button("+ Move", PanelAction::MoveForward))
                    )
                    .push(Row::new()
                        .spacing(TABLE_SPACING)
                        .align_items(Alignment::Center)
                        .push(self.action_button("Slider test", PanelAction::SliderTest))
                        .push(slider_test)
                    )
                    .into()
            }
            PanelLayout::Legacy => {
                Row::new()
                    .spacing(TABLE_SPACING)
                    .push(self.action_button("Home", PanelAction::Home))
                    .push(self.action_button("Start", PanelAction::StartCycle))
                    .into()
            }
        }
    }

    fn view_config_form(&self) -> Element<'_, Message> {
        let form = self.panel.config_form();

        let fields = form.fields()
            .enumerate()
            .fold(Column::new().spacing(EOL_INPUT_SPACING), |column, (index, (field, text))| {
                column.push(Row::new()
                    .spacing(EOL_INPUT_SPACING)
                    .align_items(Alignment::Center)
                    .push(Container::new(util::input_label(field.label)).width(Length::Fixed(CONFIG_LABEL_WIDTH)))
                    .push(
                        TextInput::new(field_placeholder(field.kind), text)
                            .on_input(move |text| Message::ConfigFieldUpdated(index, text))
                            .width(Length::Fixed(CONFIG_INPUT_WIDTH))
                            .padding(TEXT_INPUT_PADDING)
                    )
                )
            });

        let title = match form.schema() {
            ConfigSchema::Speed => "Device configuration (speed)",
            ConfigSchema::Delay => "Device configuration (delay)",
        };

        let mut column = Column::new()
            .spacing(TABLE_SPACING)
            .push(Text::new(title));

        if !form.is_loaded() {
            column = column.push(Text::new("Waiting for the controller's configuration...").size(TEXT_SIZE_SMALL));
        }

        column
            .push(fields)
            .push(util::button("Save configuration", self.panel.can_save(), Message::SaveConfigRequest))
            .into()
    }

    fn view_settings(&self) -> Element<'_, Message> {
        Column::new()
            .spacing(EOL_INPUT_SPACING)
            .push(Row::new()
                .spacing(EOL_INPUT_SPACING)
                .align_items(Alignment::Center)
                .push(util::input_label("Controller URL:"))
                .push(
                    TextInput::new("http://127.0.0.1:5000", &self.server_url_text)
                        .on_input(Message::ServerUrlUpdated)
                        .width(Length::Fixed(URL_INPUT_WIDTH))
                        .padding(TEXT_INPUT_PADDING)
                )
                .push(util::button("Apply settings", true, Message::ApplySettingsRequest))
            )
            .push(Text::new(&self.settings_message).size(TEXT_SIZE_SMALL))
            .into()
    }
}

fn field_placeholder(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Float => "number",
        FieldKind::Integer => "whole number",
    }
}

async fn load_config(api: DeviceApi, schema: ConfigSchema) -> Result<DeviceConfig, RequestFailed> {
    api.load_config(schema).await
}

async fn save_settings(settings: ConfigurationV1) -> Result<ConfigurationV1, String> {
    config::save_configuration(&settings).await?;
    Ok(settings)
}
