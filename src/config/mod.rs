#[cfg(feature = "cli")]
pub mod cli;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, OutputFormat};
pub use settings::{ApiSettings, SettingsOverrides};
pub use toml_config::TomlConfig;
