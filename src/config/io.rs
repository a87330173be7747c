use std::path::{Path, PathBuf};

use crate::app_dirs;

use super::{ConfigError, DashboardConfig};

/// Default filename used to store the dashboard configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable that replaces `api.base_url`.
pub const API_URL_ENV: &str = "FACTORY_QC_API_URL";

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from the app directory, falling back to defaults.
///
/// A missing file is created with the defaults so operators have something to
/// edit. Environment overrides are applied after the file is read.
pub fn load_or_default() -> Result<DashboardConfig, ConfigError> {
    load_or_default_at(&config_path()?, |key| std::env::var(key).ok())
}

fn load_or_default_at(
    path: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<DashboardConfig, ConfigError> {
    let config = if path.exists() {
        load_from_path(path)?
    } else {
        let defaults = DashboardConfig::default();
        if let Err(err) = save_to_path(&defaults, path) {
            tracing::warn!("Could not write default config: {err}");
        }
        defaults
    };
    apply_overrides_from(config, lookup)
}

/// Read and validate a TOML config file. Missing keys take their defaults.
pub fn load_from_path(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: DashboardConfig =
        toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;
    config.normalized()
}

/// Apply `FACTORY_QC_API_URL` on top of a loaded config.
pub fn apply_env_overrides(config: DashboardConfig) -> Result<DashboardConfig, ConfigError> {
    apply_overrides_from(config, |key| std::env::var(key).ok())
}

fn apply_overrides_from(
    mut config: DashboardConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<DashboardConfig, ConfigError> {
    if let Some(url) = lookup(API_URL_ENV).filter(|value| !value.trim().is_empty()) {
        config.api.base_url = url;
    }
    config.normalized()
}

/// Persist configuration to the app directory.
pub fn save(config: &DashboardConfig) -> Result<(), ConfigError> {
    save_to_path(config, &config_path()?)
}

/// Save configuration to a specific path, creating parent directories as needed.
pub fn save_to_path(config: &DashboardConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let text = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}
