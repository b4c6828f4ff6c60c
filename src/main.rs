use clap::Parser;
use dashboard_client::config::{Command, OutputFormat};
use dashboard_client::core::TokenStore;
use dashboard_client::utils::error::{DashboardError, ErrorSeverity};
use dashboard_client::utils::logger;
use dashboard_client::{ApiClient, CliConfig, DashboardPage, Result};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    let file = match config.load_file() {
        Ok(file) => file,
        Err(e) => {
            // logging is not set up yet; the log level may live in the broken file
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    let level = file.as_ref().and_then(|f| f.log_level());
    if config.json_logs || file.as_ref().is_some_and(|f| f.json_logs()) {
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger(config.verbose, level);
    }

    tracing::info!("Starting dashboard CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config, file.as_ref()).await {
        tracing::error!(
            "❌ Dashboard command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }
}

async fn run(
    config: &CliConfig,
    file: Option<&dashboard_client::TomlConfig>,
) -> Result<()> {
    let settings = config.settings(file)?;
    tracing::debug!("Resolved settings: {:?}", settings);

    let client = ApiClient::new(&settings)?;

    match &config.command {
        Command::Login { token } => {
            client.token_store().save(token).await?;
            tracing::info!("Token stored in {}", settings.token_file);
            println!("✅ Logged in");
        }
        Command::Logout => {
            client.token_store().clear().await?;
            println!("✅ Logged out");
        }
        Command::Fetch { section } => {
            let page = DashboardPage::new(client);
            match config.format {
                OutputFormat::Json => {
                    let value = page.load_section(*section).await?;
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
                OutputFormat::Text => print!("{}", page.render_section(*section).await?),
            }
        }
        Command::Dashboard => {
            let page = DashboardPage::new(client);
            let snapshot = page.load().await;
            match config.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
                OutputFormat::Text => print!("{}", snapshot.render_summary()),
            }

            if snapshot.ready_count() == 0 {
                if let Some((section, message)) = snapshot.failures().first() {
                    tracing::warn!("No widget loaded; first failure in {:?}: {}", section, message);
                }
                std::process::exit(2);
            }
        }
    }

    Ok(())
}

fn exit_code(e: &DashboardError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
