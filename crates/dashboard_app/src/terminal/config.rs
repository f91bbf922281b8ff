use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use dashboard_engine::ApiSettings;
use dashboard_logging::dash_info;
use serde::{Deserialize, Serialize};

const DEFAULT_TOKEN_ENV: &str = "DASHBOARD_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base: String,
    pub connect_timeout_secs: u64,
    /// Unset leaves request deadlines to the HTTP transport.
    pub request_timeout_secs: Option<u64>,
    /// Environment variable holding the bearer token.
    pub token_env: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            api_base: api.base_url,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.map(|timeout| timeout.as_secs()),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Reads the config file. A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                dash_info!("No config at {:?}; using defaults", path);
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()));
            }
        };

        let config: Self = ron::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        dash_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Bearer token from the configured environment variable. Blank values count as absent.
    pub fn read_token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = DashboardConfig::load(&dir.path().join("absent.ron")).expect("config");

        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.api_base, "http://127.0.0.1:8000");
        assert_eq!(config.request_timeout_secs, None);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(
            file,
            r#"(api_base: "https://jobs.example.com/api", request_timeout_secs: Some(20))"#
        )
        .expect("write");

        let config = DashboardConfig::load(file.path()).expect("config");
        let settings = config.api_settings();

        assert_eq!(settings.base_url, "https://jobs.example.com/api");
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(20)));
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.token_env, "DASHBOARD_TOKEN");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "(api_base: 42").expect("write");

        assert!(DashboardConfig::load(file.path()).is_err());
    }

    #[test]
    fn token_is_read_from_named_variable() {
        let config = DashboardConfig {
            token_env: "CANDIDATE_DASHBOARD_TEST_TOKEN".to_string(),
            ..DashboardConfig::default()
        };
        assert_eq!(config.read_token(), None);

        std::env::set_var("CANDIDATE_DASHBOARD_TEST_TOKEN", "  abc.def  ");
        assert_eq!(config.read_token().as_deref(), Some("abc.def"));

        std::env::set_var("CANDIDATE_DASHBOARD_TEST_TOKEN", "   ");
        assert_eq!(config.read_token(), None);
        std::env::remove_var("CANDIDATE_DASHBOARD_TEST_TOKEN");
    }
}
