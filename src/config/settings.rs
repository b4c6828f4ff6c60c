use crate::config::toml_config::TomlConfig;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_header_name, validate_non_empty_string, validate_path, validate_range, validate_url,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

pub const ENV_BASE_URL: &str = "DASHBOARD_API_URL";
pub const ENV_TOKEN_FILE: &str = "DASHBOARD_TOKEN_FILE";

/// Values given on the command line; they beat everything else.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub base_url: Option<String>,
    pub token_file: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Fully resolved connection settings for [`ApiClient`](crate::core::client::ApiClient).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub default_headers: HashMap<String, String>,
    /// Empty means requests are sent without a bearer token.
    pub token_file: String,
}

impl ApiSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: default_user_agent(),
            default_headers: HashMap::new(),
            token_file: String::new(),
        }
    }

    /// Merges, highest priority first: command line, config file,
    /// environment, built-in defaults.
    pub fn resolve(overrides: &SettingsOverrides, file: Option<&TomlConfig>) -> Self {
        Self::resolve_with_env(overrides, file, |key| std::env::var(key).ok())
    }

    pub fn resolve_with_env<F>(overrides: &SettingsOverrides, file: Option<&TomlConfig>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api = file.map(|f| &f.api);
        let auth = file.map(|f| &f.auth);

        let base_url = overrides
            .base_url
            .clone()
            .or_else(|| api.and_then(|a| a.base_url.clone()))
            .or_else(|| env(ENV_BASE_URL))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let token_file = overrides
            .token_file
            .clone()
            .or_else(|| auth.and_then(|a| a.token_file.clone()))
            .or_else(|| env(ENV_TOKEN_FILE))
            .unwrap_or_else(default_token_file);

        let timeout_seconds = overrides
            .timeout_seconds
            .or_else(|| api.and_then(|a| a.timeout_seconds))
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        let user_agent = api
            .and_then(|a| a.user_agent.clone())
            .unwrap_or_else(default_user_agent);

        let default_headers = api.map(|a| a.headers.clone()).unwrap_or_default();

        Self {
            base_url,
            timeout_seconds,
            user_agent,
            default_headers,
            token_file,
        }
    }
}

fn default_user_agent() -> String {
    format!("dashboard-client/{}", env!("CARGO_PKG_VERSION"))
}

fn default_token_file() -> String {
    dirs::config_dir()
        .map(|p| p.join("dashboard-client").join("token").to_string_lossy().to_string())
        .unwrap_or_else(|| ".dashboard-token".to_string())
}

impl ConfigProvider for ApiSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    fn token_file(&self) -> &str {
        &self.token_file
    }
}

impl Validate for ApiSettings {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.base_url)?;
        validate_range("api.timeout_seconds", self.timeout_seconds, 1, MAX_TIMEOUT_SECONDS)?;
        validate_non_empty_string("api.user_agent", &self.user_agent)?;

        for name in self.default_headers.keys() {
            validate_header_name("api.headers", name)?;
        }

        if !self.token_file.is_empty() {
            validate_path("auth.token_file", &self.token_file)?;
        }

        Ok(())
    }
}
