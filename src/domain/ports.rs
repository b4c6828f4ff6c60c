use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
    fn default_headers(&self) -> &HashMap<String, String>;
    fn token_file(&self) -> &str;
}

/// Where the bearer token lives between runs. Read on every request so a
/// token saved mid-session is picked up by the next call.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<Option<String>>;
    async fn save(&self, token: &str) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// Everything the diagnostics channel learns about a failed request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureRecord {
    pub endpoint: String,
    pub status: Option<u16>,
    pub body: Option<String>,
    pub message: String,
}

pub trait Diagnostics: Send + Sync {
    fn request_failed(&self, record: &FailureRecord);
    fn warn(&self, endpoint: &str, message: &str);
}
