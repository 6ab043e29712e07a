use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://pixel-api.codenestedu.fr";
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 1000;
pub const DEFAULT_STORAGE_KEY: &str = "uid";

/// Settings the browser client reads from `config.json` at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Period of the cooldown poller.
    pub poll_interval_ms: u32,
    /// localStorage key holding the last used UID.
    pub storage_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_base_url: DEFAULT_API_URL.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_with_single_slash() {
        let mut config = ClientConfig::default();
        assert_eq!(config.endpoint("/tableau"), "https://pixel-api.codenestedu.fr/tableau");
        config.api_base_url = "http://localhost:3000/".into();
        assert_eq!(config.endpoint("tableau"), "http://localhost:3000/tableau");
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"apiBaseUrl":"http://127.0.0.1:9000"}"#).unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }
}
