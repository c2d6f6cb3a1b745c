use clap::{Parser, Subcommand};
use colored::*;
use std::process;

mod cli;

use cli::admin::{handle_admin_command, AdminCommands};
use cli::catalog::{handle_catalog_command, CatalogCommands};
use cli::prefs::update_prefs;
use sleep_cli::client_state::Theme;
use sleep_cli::config::Config;
use sleep_config::SLEEP_REMOTE_URL;
use sleep_core::constants::DEFAULT_REMOTE_URL;

#[derive(Parser)]
#[command(name = "projectsleep")]
#[command(about = "Project Sleep - custom ROM catalog server and admin client")]
#[command(version)]
struct Cli {
    /// Base URL of the Project Sleep API
    #[arg(long, global = true, env = SLEEP_REMOTE_URL, default_value = DEFAULT_REMOTE_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on (overrides SLEEP_API_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    #[command(flatten)]
    Catalog(CatalogCommands),
    #[command(flatten)]
    Admin(AdminCommands),
    /// Show or change client preferences
    Prefs {
        /// Color theme
        #[arg(long, value_enum)]
        theme: Option<Theme>,
        /// Display language code, e.g. en, id, ru
        #[arg(long)]
        language: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = handle_command(cli.command, &cli.api_url).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(command: Commands, api_url: &str) -> anyhow::Result<()> {
    match command {
        Commands::Serve { port } => {
            sleep_cli::init_tracing("info");

            let mut config = Config::from_env()?;
            if let Some(port) = port {
                if port == 0 {
                    anyhow::bail!("Port 0 is out of valid range (1-65535)");
                }
                config.port = port;
            }

            sleep_cli::run_server(config).await
        }
        Commands::Catalog(command) => {
            sleep_cli::init_tracing("warn");
            handle_catalog_command(command, api_url).await
        }
        Commands::Admin(command) => {
            sleep_cli::init_tracing("warn");
            handle_admin_command(command, api_url).await
        }
        Commands::Prefs { theme, language } => update_prefs(theme, language),
    }
}
