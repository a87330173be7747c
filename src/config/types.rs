use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::ConfigError;

/// Base URL used when neither the config file nor the environment sets one.
pub const DEFAULT_API_URL: &str = "http://localhost:8001";

const IMAGE_ENDPOINT: &str = "predict-image/";
const SENSOR_ENDPOINT: &str = "predict-sensor/";
const MAX_HISTORY_CAPACITY: usize = 100;

/// Aggregate configuration for the dashboard and the batch tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub showcase: ShowcaseSettings,
    #[serde(default)]
    pub sensor: SensorSettings,
}

impl DashboardConfig {
    /// Validate and canonicalize values loaded from disk or the environment.
    pub fn normalized(mut self) -> Result<Self, ConfigError> {
        self.api.base_url = normalize_base_url(&self.api.base_url)?;
        self.api.connect_timeout_secs = self.api.connect_timeout_secs.max(1);
        self.api.request_timeout_secs = self.api.request_timeout_secs.max(1);
        self.sensor.history_capacity = self
            .sensor
            .history_capacity
            .clamp(1, MAX_HISTORY_CAPACITY);
        Ok(self)
    }
}

/// Where the external inference service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Scheme, host and optional path prefix shared by both endpoints.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Applies to both the upload and the response read.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ApiSettings {
    /// Full URL of the image classification endpoint.
    pub fn image_endpoint(&self) -> String {
        join_endpoint(&self.base_url, IMAGE_ENDPOINT)
    }

    /// Full URL of the sensor anomaly endpoint.
    pub fn sensor_endpoint(&self) -> String {
        join_endpoint(&self.base_url, SENSOR_ENDPOINT)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Location of the bundled showcase images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseSettings {
    /// Directory holding `test_images/` and `history/`.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
}

impl Default for ShowcaseSettings {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
        }
    }
}

/// Sensor panel tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSettings {
    /// Number of readings kept in the rolling history.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
        }
    }
}

/// Check that `raw` is an absolute http(s) URL and strip trailing slashes.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let parsed = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn join_endpoint(base: &str, endpoint: &str) -> String {
    format!("{}/{endpoint}", base.trim_end_matches('/'))
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_history_capacity() -> usize {
    crate::sensors::DEFAULT_HISTORY_CAPACITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_share_the_configured_base() {
        let api = ApiSettings {
            base_url: "http://factory.local:9000".into(),
            ..ApiSettings::default()
        };
        assert_eq!(api.image_endpoint(), "http://factory.local:9000/predict-image/");
        assert_eq!(api.sensor_endpoint(), "http://factory.local:9000/predict-sensor/");
    }

    #[test]
    fn default_endpoints_point_at_local_service() {
        let api = ApiSettings::default();
        assert_eq!(api.sensor_endpoint(), "http://localhost:8001/predict-sensor/");
    }

    #[test]
    fn normalize_strips_trailing_slashes_and_keeps_prefix() {
        assert_eq!(
            normalize_base_url(" https://qc.example.com/api/ ").unwrap(),
            "https://qc.example.com/api"
        );
    }

    #[test]
    fn normalize_rejects_non_http_urls() {
        assert!(normalize_base_url("ftp://qc.example.com").is_err());
        assert!(normalize_base_url("localhost:8001").is_err());
        assert!(normalize_base_url("http://qc.example.com/?x=1").is_err());
    }

    #[test]
    fn normalized_clamps_out_of_range_values() {
        let mut config = DashboardConfig::default();
        config.sensor.history_capacity = 0;
        config.api.request_timeout_secs = 0;
        let config = config.normalized().unwrap();
        assert_eq!(config.sensor.history_capacity, 1);
        assert_eq!(config.api.request_timeout_secs, 1);
    }
}
