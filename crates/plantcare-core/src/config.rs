use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend URL used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";
/// Image analysis can take tens of seconds, so the timeout is generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the remote plant-care service.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Joins an API path onto the base URL with exactly one slash between them.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.endpoint("/api/chat"), "http://localhost:8000/api/chat");
    }

    #[test]
    fn test_endpoint_without_trailing_slash() {
        let config = ClientConfig::default().with_base_url("http://10.0.0.2:8000");
        assert_eq!(
            config.endpoint("api/analyze-plant"),
            "http://10.0.0.2:8000/api/analyze-plant"
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str("base_url = \"http://example.test\"").unwrap();
        assert_eq!(config.base_url, "http://example.test");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
