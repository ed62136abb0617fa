// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

use tracing::warn;

use crate::api::{ConfigSchema, DeviceConfig, FieldSpec};

/// Editable copy of the controller configuration, held as the raw text the operator typed
#[derive(Clone, Debug)]
pub struct ConfigForm {
    schema: ConfigSchema,
    texts: Vec<String>,
    loaded: bool,
}

impl ConfigForm {
    pub fn new(schema: ConfigSchema) -> ConfigForm {
        ConfigForm {
            schema,
            texts: vec![String::new(); schema.fields().len()],
            loaded: false,
        }
    }

    pub fn schema(&self) -> ConfigSchema {
        self.schema
    }

    /// whether a configuration has been received from the controller yet
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldSpec, &str)> + '_ {
        self.schema.fields().iter().zip(self.texts.iter().map(String::as_str))
    }

    pub fn text(&self, index: usize) -> Option<&str> {
        self.texts.get(index).map(String::as_str)
    }

    pub fn set_text(&mut self, index: usize, text: String) {
        match self.texts.get_mut(index) {
            Some(field) => *field = text,
            None => warn!("config field index {index} out of bounds"),
        }
    }

    /// Replace every field with the loaded value. Absent values leave the field empty.
    pub fn populate(&mut self, config: &DeviceConfig) {
        if config.schema() != self.schema {
            warn!("ignoring {} config for a {} form", config.schema(), self.schema);
            return;
        }

        self.texts = config.values()
            .into_iter()
            .map(|value| value.map(|value| value.to_string()).unwrap_or_default())
            .collect();
        self.loaded = true;
    }

    /// The configuration to send on save
    pub fn to_config(&self) -> DeviceConfig {
        DeviceConfig::from_field_texts(self.schema, &self.texts)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn starts_empty() {
        let form = ConfigForm::new(ConfigSchema::Delay);
        assert!(!form.is_loaded());
        assert_eq!(form.fields().count(), 5);
        assert!(form.fields().all(|(_, text)| text.is_empty()));
    }

    #[test]
    fn loaded_values_populate_exactly() {
        let body = br#"{"step_degrees": 36, "pause_seconds": 0.75, "rotary_speed": 50, "rotary_accel_steps": 100,
                        "rotary_decel_steps": 120, "slider_in_speed": 40, "slider_out_speed": null}"#;
        let config = ConfigSchema::Speed.parse(body).unwrap();

        let mut form = ConfigForm::new(ConfigSchema::Speed);
        form.populate(&config);

        let texts: Vec<&str> = form.fields().map(|(_, text)| text).collect();
        assert_eq!(texts, ["36", "0.75", "50", "100", "120", "40", ""]);
        assert!(form.is_loaded());
    }

    #[test]
    fn float_in_integer_field_still_populates() {
        let body = br#"{"step_degrees": 36.0, "pause_seconds": 1, "rotary_speed": 50.0, "rotary_accel_steps": 100.5,
                        "rotary_decel_steps": 120, "slider_in_speed": 40, "slider_out_speed": 60}"#;
        let config = ConfigSchema::Speed.parse(body).unwrap();

        let mut form = ConfigForm::new(ConfigSchema::Speed);
        form.populate(&config);

        let texts: Vec<&str> = form.fields().map(|(_, text)| text).collect();
        assert_eq!(texts, ["36", "1", "50", "100.5", "120", "40", "60"]);
        assert!(form.is_loaded());
    }

    #[test]
    fn edited_values_are_coerced_on_save() {
        let mut form = ConfigForm::new(ConfigSchema::Speed);
        for (index, text) in ["10", "2.5s", "75", "80.6", "x", "30", "35"].into_iter().enumerate() {
            form.set_text(index, text.to_string());
        }

        assert_eq!(
            serde_json::to_value(form.to_config()).unwrap(),
            json!({
                "step_degrees": 10.0, "pause_seconds": 2.5, "rotary_speed": 75,
                "rotary_accel_steps": 80, "rotary_decel_steps": null,
                "slider_in_speed": 30, "slider_out_speed": 35,
            })
        );
    }

    #[test]
    fn other_schema_is_ignored() {
        let mut form = ConfigForm::new(ConfigSchema::Delay);
        form.populate(&ConfigSchema::Speed.parse(b"{}").unwrap());
        assert!(!form.is_loaded());
    }

    #[test]
    fn out_of_range_edit_is_ignored() {
        let mut form = ConfigForm::new(ConfigSchema::Delay);
        form.set_text(99, "1".into());
        assert_eq!(form.text(99), None);
    }
}
