use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};

/// Connection settings for the host REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root, e.g. `http://localhost:8080/api/v1`.
    pub api_url: String,
    /// Authentication token sent with every request.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api/v1".to_string(),
            token: None,
            timeout: default_timeout(),
        }
    }
}

impl ClientConfig {
    pub fn from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::Config(format!("Cannot read {}: {e}", path.display())))?;
        serde_yaml::from_str(&content)
            .map_err(|e| SettingsError::Config(format!("Invalid YAML: {e}")))
    }

    /// Apply command-line or environment overrides on top of the file.
    pub fn with_overrides(mut self, api_url: Option<String>, token: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if token.is_some() {
            self.token = token;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_yaml_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url: http://girder.local/api/v1").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_url, "http://girder.local/api/v1");
        assert_eq!(config.token, None);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn parses_humantime_timeout_and_token() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url: http://h/api/v1\ntoken: abc\ntimeout: 5s").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = ClientConfig::from_file(Path::new("/nonexistent/msearch.yaml")).unwrap_err();
        assert!(matches!(err, SettingsError::Config(_)));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let config = ClientConfig::default()
            .with_overrides(Some("http://other/api/v1".into()), None);
        assert_eq!(config.api_url, "http://other/api/v1");
        assert_eq!(config.token, None);

        let config = config.with_overrides(None, Some("t".into()));
        assert_eq!(config.api_url, "http://other/api/v1");
        assert_eq!(config.token.as_deref(), Some("t"));
    }
}
