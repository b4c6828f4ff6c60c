pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    CollectingDiagnostics, FileTokenStore, MemoryTokenStore, NoToken, TracingDiagnostics,
};
pub use config::{ApiSettings, TomlConfig};
pub use crate::core::{
    client::ApiClient,
    dashboard::{DashboardPage, DashboardSnapshot, Section, Widget},
};
pub use utils::error::{
    DashboardError, Result, ServiceError, ServiceErrorKind, AUTH_ERROR_MESSAGE,
};
