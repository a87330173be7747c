//! Dashboard configuration stored as TOML in the app directory.
//!
//! A single [`DashboardConfig`] is resolved once at startup and handed to
//! both request panels and the batch tool.

mod errors;
mod io;
mod types;

pub use errors::ConfigError;
pub use io::{
    API_URL_ENV, CONFIG_FILE_NAME, apply_env_overrides, config_path, load_from_path,
    load_or_default, save, save_to_path,
};
pub use types::{
    ApiSettings, DEFAULT_API_URL, DashboardConfig, SensorSettings, ShowcaseSettings,
    normalize_base_url,
};
