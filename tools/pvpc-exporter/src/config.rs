//! Exporter configuration, read from a JSON file at startup.

use {
    crate::{error::ConfigError, pvpc::PVPC_API_URL},
    serde::Deserialize,
    std::path::Path,
};

/// Where the binary looks for its configuration by default.
pub const DEFAULT_CONFIG_PATH: &str = "pvpc_exporter.json";

/// Read-only configuration passed into [`crate::Exporter`].
///
/// The JSON keys keep the PascalCase names used by existing deployments.
#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "Bucket", default)]
    pub bucket: String,
    #[serde(rename = "InfluxDBHost", default)]
    pub influxdb_host: String,
    #[serde(rename = "InfluxDBApiToken", default)]
    pub influxdb_api_token: String,
    #[serde(rename = "Org", default)]
    pub org: String,
    /// Market-data endpoint. Only overridden when pointing at a mirror or a mock.
    #[serde(rename = "PvpcApiUrl", default = "default_pvpc_api_url")]
    pub pvpc_api_url: String,
}

impl Config {
    /// Load and validate the configuration stored at `path`.
    pub async fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let conf = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;

        Self::from_json(&conf)
    }

    /// Parse and validate a configuration document.
    pub fn from_json(conf: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(conf)?;
        config.validate()?;

        Ok(config)
    }

    /// Check that every required field is present, in the order users are
    /// told about them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("Bucket", &self.bucket),
            ("InfluxDBHost", &self.influxdb_host),
            ("InfluxDBApiToken", &self.influxdb_api_token),
            ("Org", &self.org),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(name));
            }
        }

        Ok(())
    }

    /// Base URL of the InfluxDB instance. Hosts without a scheme are reached
    /// over HTTPS.
    pub fn influxdb_base_url(&self) -> String {
        let host = self.influxdb_host.trim().trim_end_matches('/');

        if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{host}")
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bucket", &self.bucket)
            .field("influxdb_host", &self.influxdb_host)
            .field("influxdb_api_token", &"<redacted>")
            .field("org", &self.org)
            .field("pvpc_api_url", &self.pvpc_api_url)
            .finish()
    }
}

fn default_pvpc_api_url() -> String {
    PVPC_API_URL.to_string()
}
