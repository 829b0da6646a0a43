// SPDX-License-Identifier: AGPL-3.0
// Course Catalog Core - Settings persistence
//
// Settings are stored in a local JSON file.
// A missing or unreadable file falls back to defaults.

use crate::types::{AppError, CatalogSettings};
use std::fs;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

/// In-memory copy of settings, persisted to disk on changes
pub struct SettingsStore {
    settings: RwLock<CatalogSettings>,
    file_path: PathBuf,
}

impl SettingsStore {
    /// Open the settings file in the platform config directory
    pub fn new() -> Result<Self, AppError> {
        Self::open(Self::get_settings_path()?)
    }

    /// Open settings at an explicit path, creating it with defaults if absent
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let file_path = file_path.into();
        tracing::info!("Settings file path: {:?}", file_path);

        let settings = if file_path.exists() {
            let content = fs::read_to_string(&file_path)
                .map_err(|e| AppError::FileIo(format!("Failed to read settings: {}", e)))?;

            serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse settings, using defaults: {}", e);
                CatalogSettings::default()
            })
        } else {
            tracing::info!("No settings file found, using defaults");
            CatalogSettings::default()
        };

        let store = Self {
            settings: RwLock::new(settings),
            file_path,
        };

        if !store.file_path.exists() {
            tracing::info!("Creating initial settings file");
            store.persist()?;
        }

        Ok(store)
    }

    fn get_settings_path() -> Result<PathBuf, AppError> {
        let config_dir = directories::ProjectDirs::from("com", "coursecatalog", "catalog")
            .ok_or_else(|| AppError::FileIo("Could not determine config directory".to_string()))?
            .config_dir()
            .to_path_buf();

        Ok(config_dir.join("settings.json"))
    }

    fn persist(&self) -> Result<(), AppError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::FileIo(format!("Failed to create config dir: {}", e)))?;
        }

        let settings = self.settings.read().unwrap_or_else(PoisonError::into_inner);
        let content = serde_json::to_string_pretty(&*settings)
            .map_err(|e| AppError::Serialization(format!("Failed to serialize settings: {}", e)))?;

        fs::write(&self.file_path, content)
            .map_err(|e| AppError::FileIo(format!("Failed to write settings: {}", e)))?;

        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> CatalogSettings {
        self.settings.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Validate, replace and persist settings
    pub fn update(&self, new_settings: CatalogSettings) -> Result<(), AppError> {
        new_settings.validate()?;
        tracing::info!("Updating settings, api url: {}", new_settings.api_url);
        {
            let mut settings = self.settings.write().unwrap_or_else(PoisonError::into_inner);
            *settings = new_settings;
        }

        let result = self.persist();
        if let Err(e) = &result {
            tracing::error!("Failed to persist settings: {}", e);
        }
        result
    }
}
