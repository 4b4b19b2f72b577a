use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the backend client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// The API root; endpoint paths are resolved relative to it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// How long a single request may take, end to end
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_base_url() -> String {
    "http://localhost:8080/".to_owned()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}
