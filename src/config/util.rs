// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

use std::path::{Path, PathBuf};
use std::{convert, fs};

use directories::ProjectDirs;
use lazy_static::lazy_static;
use tokio::task;
use tracing::{info, warn};

use crate::config::v1::ConfigurationV1;
use crate::config::ConfigurationMinimal;
use crate::config::CONFIG_VERSION;

static CONFIG_FILE_NAME: &str = "config.toml";

lazy_static! {
    pub static ref CONFIG_FILE_PATH: Result<PathBuf, String> = create_config_file_path();
}

fn get_config_dir() -> Result<PathBuf, String> {
    ProjectDirs::from("io.github", "rotary-panel", env!("CARGO_PKG_NAME"))
        .map(|dirs| dirs.config_dir().into())
        .ok_or_else(|| "unable to locate configuration directory".to_string())
}

fn create_config_file_path() -> Result<PathBuf, String> {
    let config_dir_path = get_config_dir()?;
    fs::create_dir_all(config_dir_path.as_path()).map_err(|e| format!("failed to create configuration directory: {e}"))?;
    Ok(config_dir_path.join(CONFIG_FILE_NAME))
}

fn get_backup_config_file_path(config_file_path: &Path, version: i32) -> PathBuf {
    config_file_path.with_file_name(format!("backup_config_v{version}.toml"))
}

fn config_file_path() -> Result<&'static Path, String> {
    CONFIG_FILE_PATH.as_deref().map_err(Clone::clone)
}

/// save settings to the default location
pub async fn save_configuration(configuration: &ConfigurationV1) -> Result<(), String> {
    save_configuration_to(config_file_path()?, configuration).await
}

pub async fn save_configuration_to(path: &Path, configuration: &ConfigurationV1) -> Result<(), String> {
    let serialized_config = toml::to_string(configuration).map_err(|e| format!("failed to serialize configuration: {e}"))?;
    let path = path.to_path_buf();
    task::spawn_blocking(move || fs::write(path, serialized_config).map_err(|e| format!("{e:?}")))
        .await
        .map_err(|e| format!("{e:?}"))
        .and_then(convert::identity)
}

/// load settings from the default location, falling back to defaults on any error
pub async fn load_configuration() -> ConfigurationV1 {
    match config_file_path() {
        Ok(path) => load_configuration_from(path).await,
        Err(e) => {
            warn!("falling back to default config due to error: {e}");
            ConfigurationV1::default()
        }
    }
}

pub async fn load_configuration_from(path: &Path) -> ConfigurationV1 {
    info!("Attempting to load config from {path:?}");
    let contents = fs::read_to_string(path).map_err(|e| format!("{e:?}"));
    let loaded_configuration: Result<(String, ConfigurationMinimal), String> = contents
        .and_then(|string| toml::from_str(&string).map(|minimal| (string, minimal)).map_err(|e| format!("{e:?}")));

    let configuration: ConfigurationV1 = match loaded_configuration {
        Ok((contents, minimal)) => match toml::from_str::<ConfigurationV1>(&contents) {
            Ok(configuration) => configuration,
            Err(e) => {
                // keep the unreadable file around so the operator can recover their settings
                let backup_path = get_backup_config_file_path(path, minimal.version);
                if let Err(backup_error) = fs::copy(path, &backup_path) {
                    warn!("failed to back up unreadable config to {backup_path:?}: {backup_error}");
                }
                warn!("falling back to default config due to error: {e}");
                ConfigurationV1::default()
            }
        },
        Err(e) => {
            warn!("falling back to default config due to error: {e}");
            ConfigurationV1::default()
        }
    };
    info!("Loaded configuration v{}", configuration.version);

    if configuration.is_outdated() {
        let new_configuration = configuration.new_with_current_version();
        match save_configuration_to(path, &new_configuration).await {
            Ok(()) => {
                info!("Migrated configuration to v{CONFIG_VERSION}");
                new_configuration
            }
            Err(e) => {
                warn!("Error migrating configuration to v{CONFIG_VERSION}: {e}");
                configuration
            }
        }
    } else {
        configuration
    }
}
