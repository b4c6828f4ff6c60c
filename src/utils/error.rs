use serde::Serialize;
use thiserror::Error;

/// Shown whenever the API answers 401, whichever endpoint was called.
pub const AUTH_ERROR_MESSAGE: &str = "Authentication failed. Please log in again.";

/// What went wrong with a single service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceErrorKind {
    /// The API answered 401.
    Auth,
    /// No response at all: connection refused, DNS, timeout.
    Network,
    /// Any non-2xx status other than 401.
    Server,
    /// 2xx, but the body did not match the declared shape.
    Decode,
    /// The token store could not be read, so no request was sent.
    Credentials,
}

/// Normalized failure of a service call. `Display` only shows the
/// human-readable message; `kind` and `status` stay available to callers
/// that want to branch on them.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ServiceError {
    /// Maps a failed call onto the two user-facing messages: the shared
    /// authentication message for 401, the per-service one otherwise.
    pub fn classify(status: Option<u16>, decode_failed: bool, failure_message: &str) -> Self {
        let kind = match status {
            Some(401) => ServiceErrorKind::Auth,
            Some(_) if decode_failed => ServiceErrorKind::Decode,
            Some(_) => ServiceErrorKind::Server,
            None => ServiceErrorKind::Network,
        };

        let message = match kind {
            ServiceErrorKind::Auth => AUTH_ERROR_MESSAGE.to_string(),
            _ => failure_message.to_string(),
        };

        Self {
            kind,
            status,
            message,
        }
    }

    /// The stored token could not be read. Reported with the per-service
    /// message like any other non-auth failure.
    pub fn credentials_unreadable(failure_message: &str) -> Self {
        Self {
            kind: ServiceErrorKind::Credentials,
            status: None,
            message: failure_message.to_string(),
        }
    }

    pub fn is_auth(&self) -> bool {
        self.kind == ServiceErrorKind::Auth
    }
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("HTTP client setup failed: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    Network,
    Api,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DashboardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashboardError::Service(e) => match e.kind {
                ServiceErrorKind::Auth | ServiceErrorKind::Credentials => {
                    ErrorCategory::Authentication
                }
                ServiceErrorKind::Network => ErrorCategory::Network,
                ServiceErrorKind::Server | ServiceErrorKind::Decode => ErrorCategory::Api,
            },
            DashboardError::ConfigError { .. }
            | DashboardError::InvalidConfigValueError { .. }
            | DashboardError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DashboardError::HttpClientError(_)
            | DashboardError::IoError(_)
            | DashboardError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Authentication | ErrorCategory::Api | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DashboardError::Service(e) => e.message.clone(),
            DashboardError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            DashboardError::MissingConfigError { field } => {
                format!("Setting '{}' is required", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Authentication => "Run `dashboard login <token>` with a fresh token",
            ErrorCategory::Network => "Check that the API is reachable at the configured base URL",
            ErrorCategory::Api => "The API returned an unexpected response; try again later",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::System => "Check file permissions and available resources",
        }
    }

    pub fn as_service(&self) -> Option<&ServiceError> {
        match self {
            DashboardError::Service(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
