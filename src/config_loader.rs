use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PREDICTION_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_CONFIG_FILE: &str = "fracflood.toml";

/// Gateway configuration, resolved once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Base URL of the external prediction service.
    pub prediction_api_url: String,
    pub host: String,
    pub port: u16,
    /// Upstream request timeout. Unset leaves reqwest's default (none).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    /// `limit` used for `load-data` when the caller omits it.
    pub default_test_limit: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            prediction_api_url: DEFAULT_PREDICTION_API_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout_secs: None,
            default_test_limit: 100,
        }
    }
}

impl GatewayConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check invariants and normalize the base URL.
    pub fn validated(mut self) -> Result<Self, figment::Error> {
        let url = self.prediction_api_url.trim().trim_end_matches('/').to_string();
        if url.is_empty() {
            return Err(figment::Error::from("prediction_api_url must be set"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(figment::Error::from(format!(
                "prediction_api_url must start with http:// or https://, got {url}"
            )));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(figment::Error::from("request_timeout_secs must be positive"));
        }
        self.prediction_api_url = url;
        Ok(self)
    }
}

/// Layering: defaults, then the TOML file, then `FRACFLOOD_*`, then the
/// legacy `FLASK_API_URL` alias for the base URL.
pub fn figment(config_path: &Path) -> Figment {
    Figment::from(Serialized::defaults(GatewayConfig::default()))
        .merge(Toml::file(config_path))
        .merge(Env::prefixed("FRACFLOOD_").ignore(&["config"]))
        .merge(
            Env::raw()
                .only(&["FLASK_API_URL"])
                .map(|_| "prediction_api_url".into()),
        )
}

/// Path of the config file: explicit argument, `FRACFLOOD_CONFIG`, or `fracflood.toml`.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os("FRACFLOOD_CONFIG").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

pub fn load_config(explicit: Option<&Path>) -> Result<GatewayConfig, figment::Error> {
    let path = config_path(explicit);
    let config: GatewayConfig = figment(&path).extract()?;
    config.validated()
}
