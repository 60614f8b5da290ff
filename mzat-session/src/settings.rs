use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    "http://localhost:8080/api".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("MZAT_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(config::Environment::with_prefix("MZAT").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_url.is_empty() {
            return Err("api_url is required".to_string());
        }
        if !self.api_url.starts_with("http") {
            return Err("api_url must be a valid HTTP(S) URL".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url_passes_validation() {
        let settings = Settings {
            api_url: default_api_url(),
        };
        assert_eq!(settings.api_url, "http://localhost:8080/api");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_url() {
        let settings = Settings {
            api_url: String::new(),
        };
        assert_eq!(settings.validate().unwrap_err(), "api_url is required");
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let settings = Settings {
            api_url: "ftp://example.com/api".to_string(),
        };
        assert!(settings.validate().is_err());
    }
}
