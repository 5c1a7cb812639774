use crate::assessment::preview::DEFAULT_TITLE_WIDTH;
use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "skillcheck";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Per-user question database, under the platform's local data directory
pub fn default_db_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join(format!("{APP_NAME}.db")))
}

pub fn default_settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("settings.json"))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub database_path: Option<PathBuf>,
    pub json_output: bool,
    pub preview_title_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: None,
            json_output: false,
            preview_title_width: DEFAULT_TITLE_WIDTH,
        }
    }
}

impl Settings {
    /// Explicit path first, then the configured one, then the per-user default
    pub fn resolve_db_path(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.database_path.clone())
            .or_else(default_db_path)
            .unwrap_or_else(|| PathBuf::from(format!("{APP_NAME}.db")))
    }
}

pub trait SettingsStore {
    fn load(&self) -> Settings;
    fn save(&self, settings: &Settings) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new() -> Self {
        let path = default_settings_path()
            .unwrap_or_else(|| PathBuf::from(format!("{APP_NAME}_settings.json")));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Settings {
        let Ok(bytes) = fs::read(&self.path) else {
            return Settings::default();
        };
        match serde_json::from_slice::<Settings>(&bytes) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("ignoring unreadable settings {}: {e}", self.path.display());
                Settings::default()
            }
        }
    }

    fn save(&self, settings: &Settings) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(settings).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
