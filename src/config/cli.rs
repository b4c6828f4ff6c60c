use crate::config::settings::{ApiSettings, SettingsOverrides};
use crate::config::toml_config::TomlConfig;
use crate::core::dashboard::Section;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sales analytics dashboard in the terminal")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    /// API base URL (overrides the config file and DASHBOARD_API_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// File holding the bearer token; pass an empty string to send none
    #[arg(long, global = true)]
    pub token_file: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Log as JSON lines instead of compact text
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Load every widget at once
    Dashboard,

    /// Load a single section
    Fetch {
        #[arg(value_enum)]
        section: Section,
    },

    /// Store a bearer token for later requests
    Login { token: String },

    /// Forget the stored token
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl CliConfig {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            base_url: self.base_url.clone(),
            token_file: self.token_file.clone(),
            timeout_seconds: self.timeout,
        }
    }

    pub fn load_file(&self) -> Result<Option<TomlConfig>> {
        match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Ok(Some(file))
            }
            None => Ok(None),
        }
    }

    /// Resolves and validates the settings the client will run with.
    pub fn settings(&self, file: Option<&TomlConfig>) -> Result<ApiSettings> {
        let settings = ApiSettings::resolve(&self.overrides(), file);
        settings.validate()?;
        Ok(settings)
    }
}
