use serde::Deserialize;

const CONFIG_FILE_PATH: &str = "config.toml";

/// Service credential and endpoint settings, read once at startup from an
/// optional `config.toml` and overridden by environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub model: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        Self::from_file(CONFIG_FILE_PATH).with_env_overrides()
    }

    fn from_file(path: &str) -> Self {
        if !std::path::Path::new(path).exists() {
            return Config::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Config::default(),
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            self.api_key = Some(api_key);
        }
        if let Ok(api_base) = std::env::var("OPENAI_API_BASE") {
            self.api_base = Some(api_base);
        }
        if let Ok(model) = std::env::var("REPORT_MODEL") {
            self.model = Some(model);
        }
        self
    }
}
