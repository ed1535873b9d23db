use crate::logger::{error, Component};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    // Permission settings
    pub permissions: PermissionSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionSettings {
    /// Query the microphone permission state once at launch.
    pub check_on_launch: bool,
    /// Let the UI offer the system-settings shortcut after a denied check.
    pub offer_settings_on_denied: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            permissions: PermissionSettings::default(),
        }
    }
}

impl Default for PermissionSettings {
    fn default() -> Self {
        Self {
            check_on_launch: true,
            offer_settings_on_denied: true,
        }
    }
}

pub struct SettingsManager {
    settings_path: PathBuf,
    settings: AppSettings,
}

impl SettingsManager {
    pub fn new(app_data_dir: &Path) -> Result<Self, String> {
        let settings_path = app_data_dir.join("settings.json");

        // Load settings or create default
        let settings = match fs::read_to_string(&settings_path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                error(
                    Component::Settings,
                    &format!("Failed to parse settings.json: {}, using defaults", e),
                );
                AppSettings::default()
            }),
            Err(_) => {
                let default_settings = AppSettings::default();

                // Save default settings
                if let Ok(json) = serde_json::to_string_pretty(&default_settings) {
                    let _ = fs::write(&settings_path, json);
                }

                default_settings
            }
        };

        Ok(Self {
            settings_path,
            settings,
        })
    }

    pub fn get(&self) -> &AppSettings {
        &self.settings
    }

    pub fn update<F>(&mut self, updater: F) -> Result<(), String>
    where
        F: FnOnce(&mut AppSettings),
    {
        updater(&mut self.settings);
        self.save()
    }

    pub fn save(&self) -> Result<(), String> {
        let json = serde_json::to_string_pretty(&self.settings)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        fs::write(&self.settings_path, json)
            .map_err(|e| format!("Failed to save settings: {}", e))?;

        Ok(())
    }

    pub fn reload(&mut self) -> Result<(), String> {
        match fs::read_to_string(&self.settings_path) {
            Ok(contents) => {
                self.settings = serde_json::from_str(&contents)
                    .map_err(|e| format!("Failed to parse settings: {}", e))?;
                Ok(())
            }
            Err(e) => Err(format!("Failed to read settings: {}", e)),
        }
    }
}
