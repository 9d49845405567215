use serde::Deserialize;

/// Hosted myFlix API.
pub const DEFAULT_BASE_URL: &str = "https://myflix-movies1980.herokuapp.com/";

/// Client settings. Deserializable so hosts can embed it in their own
/// config files; missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
