use plantcare_core::config::ClientConfig;
use serde::{Deserialize, Serialize};

/// Root of `config.toml`.
///
/// ```toml
/// [api]
/// base_url = "http://localhost:8000/"
/// timeout_secs = 60
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRoot {
    #[serde(default)]
    pub api: ClientConfig,
}
