//! Configuration loading and management

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default LMDB map size in MiB. LMDB only reserves address space for it.
pub const DEFAULT_MAP_SIZE_MB: usize = 256;

/// Which record store backend to open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Lmdb,
}

/// Record store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Data directory, required for persistent backends
    pub path: Option<PathBuf>,

    /// LMDB map size in MiB
    pub map_size_mb: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::InMemory,
            path: None,
            map_size_mb: DEFAULT_MAP_SIZE_MB,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    Compact,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Ru,
    En,
}

/// User-facing application settings, stored alongside the records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub theme: ThemeMode,
    pub language: Language,
    pub sidebar_collapsed: bool,
}

/// Partial update of [`AppSettings`]; absent fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub theme: Option<ThemeMode>,
    pub language: Option<Language>,
    pub sidebar_collapsed: Option<bool>,
}

impl AppSettings {
    /// Merge a patch into these settings
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(collapsed) = patch.sidebar_collapsed {
            self.sidebar_collapsed = collapsed;
        }
    }
}

/// Complete configuration of a registry deployment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    pub storage: StorageConfig,
    pub settings: AppSettings,
}

impl CmsConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject combinations that cannot be opened
    pub fn validate(&self) -> Result<()> {
        if self.storage.backend == StorageBackend::Lmdb && self.storage.path.is_none() {
            bail!("storage.path is required for the lmdb backend");
        }
        if self.storage.map_size_mb == 0 {
            bail!("storage.map_size_mb must be positive");
        }
        Ok(())
    }

    /// In-memory store with default settings
    pub fn default_config() -> Self {
        Self::default()
    }
}
