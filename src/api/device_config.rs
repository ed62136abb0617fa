// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

//! The controller's tunable configuration, as served by `/api/config`.
//!
//! Controllers have shipped two incompatible schemas over time. Which one a deployment speaks is
//! picked in the local settings; the two are never merged or guessed between.

use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

use crate::util::number;

#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSchema {
    /// rotary speed + acceleration ramps, slider speeds
    #[default]
    Speed,
    /// dwell timing, slider step delays
    Delay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Float,
    Integer,
}

/// Describes one editable field of a [`DeviceConfig`]
#[derive(Debug)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { key, label, kind }
}

static SPEED_FIELDS: [FieldSpec; 7] = [
    field("step_degrees", "Step (degrees)", FieldKind::Float),
    field("pause_seconds", "Pause (s)", FieldKind::Float),
    field("rotary_speed", "Rotary speed (0-100)", FieldKind::Integer),
    field("rotary_accel_steps", "Rotary accel steps", FieldKind::Integer),
    field("rotary_decel_steps", "Rotary decel steps", FieldKind::Integer),
    field("slider_in_speed", "Slider in speed", FieldKind::Integer),
    field("slider_out_speed", "Slider out speed", FieldKind::Integer),
];

static DELAY_FIELDS: [FieldSpec; 5] = [
    field("step_degrees", "Step (degrees)", FieldKind::Float),
    field("pause_seconds", "Pause (s)", FieldKind::Float),
    field("dwell_seconds", "Dwell (s)", FieldKind::Float),
    field("slider_in_delay", "Slider in step delay (s)", FieldKind::Float),
    field("slider_out_delay", "Slider out step delay (s)", FieldKind::Float),
];

impl ConfigSchema {
    /// Form fields in display order
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            ConfigSchema::Speed => &SPEED_FIELDS,
            ConfigSchema::Delay => &DELAY_FIELDS,
        }
    }

    /// Decode a `GET /api/config` body as this schema.
    pub fn parse(self, body: &[u8]) -> Result<DeviceConfig, serde_json::Error> {
        match self {
            ConfigSchema::Speed => serde_json::from_slice(body).map(DeviceConfig::Speed),
            ConfigSchema::Delay => serde_json::from_slice(body).map(DeviceConfig::Delay),
        }
    }
}

impl Display for ConfigSchema {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSchema::Speed => write!(f, "speed"),
            ConfigSchema::Delay => write!(f, "delay"),
        }
    }
}

// A `None` goes over the wire as `null`, which is what the controller has always received for
// form fields that don't hold a number.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SpeedConfig {
    pub step_degrees: Option<f64>,
    pub pause_seconds: Option<f64>,
    #[serde(deserialize_with = "lenient_integer")]
    pub rotary_speed: Option<Number>,
    #[serde(deserialize_with = "lenient_integer")]
    pub rotary_accel_steps: Option<Number>,
    #[serde(deserialize_with = "lenient_integer")]
    pub rotary_decel_steps: Option<Number>,
    #[serde(deserialize_with = "lenient_integer")]
    pub slider_in_speed: Option<Number>,
    #[serde(deserialize_with = "lenient_integer")]
    pub slider_out_speed: Option<Number>,
}

/// Integer fields as loaded accept any JSON number. A float without a fractional part reads as
/// the integer, anything else is kept as sent.
fn lenient_integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Number>, D::Error> {
    let number = Option::<Number>::deserialize(deserializer)?;
    Ok(number.map(|number| match number.as_f64() {
        Some(value) if number.is_f64() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 => Number::from(value as i64),
        _ => number,
    }))
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct DelayConfig {
    pub step_degrees: Option<f64>,
    pub pause_seconds: Option<f64>,
    pub dwell_seconds: Option<f64>,
    pub slider_in_delay: Option<f64>,
    pub slider_out_delay: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Float(f64),
    /// whatever number the controller sent; always an integer when built from form text
    Integer(Number),
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Float(value) => write!(f, "{value}"),
            FieldValue::Integer(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum DeviceConfig {
    Speed(SpeedConfig),
    Delay(DelayConfig),
}

impl DeviceConfig {
    pub fn schema(&self) -> ConfigSchema {
        match self {
            DeviceConfig::Speed(_) => ConfigSchema::Speed,
            DeviceConfig::Delay(_) => ConfigSchema::Delay,
        }
    }

    /// Field values in the same order as [`ConfigSchema::fields`]
    pub fn values(&self) -> Vec<Option<FieldValue>> {
        use FieldValue::{Float, Integer};

        match self {
            DeviceConfig::Speed(config) => vec![
                config.step_degrees.map(Float),
                config.pause_seconds.map(Float),
                config.rotary_speed.clone().map(Integer),
                config.rotary_accel_steps.clone().map(Integer),
                config.rotary_decel_steps.clone().map(Integer),
                config.slider_in_speed.clone().map(Integer),
                config.slider_out_speed.clone().map(Integer),
            ],
            DeviceConfig::Delay(config) => vec![
                config.step_degrees.map(Float),
                config.pause_seconds.map(Float),
                config.dwell_seconds.map(Float),
                config.slider_in_delay.map(Float),
                config.slider_out_delay.map(Float),
            ],
        }
    }

    /// Build a config from raw form text, coercing each field the way a browser form would.
    ///
    /// `texts` is indexed like [`ConfigSchema::fields`]; missing entries count as empty.
    pub fn from_field_texts(schema: ConfigSchema, texts: &[String]) -> DeviceConfig {
        let text = |index: usize| texts.get(index).map(String::as_str).unwrap_or("");
        let float = |index: usize| number::parse_float_prefix(text(index)).filter(|value| value.is_finite());
        let integer = |index: usize| number::parse_int_prefix(text(index)).map(Number::from);

        match schema {
            ConfigSchema::Speed => DeviceConfig::Speed(SpeedConfig {
                step_degrees: float(0),
                pause_seconds: float(1),
                rotary_speed: integer(2),
                rotary_accel_steps: integer(3),
                rotary_decel_steps: integer(4),
                slider_in_speed: integer(5),
                slider_out_speed: integer(6),
            }),
            ConfigSchema::Delay => DeviceConfig::Delay(DelayConfig {
                step_degrees: float(0),
                pause_seconds: float(1),
                dwell_seconds: float(2),
                slider_in_delay: float(3),
                slider_out_delay: float(4),
            }),
        }
    }
}
